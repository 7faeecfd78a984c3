//! Readers for tab-delimited mutation logs.
//!
//! Format: `scaffold \t position \t ref_allele \t called_allele`, positions
//! 1-based and strictly increasing per scaffold. The expected-log reader
//! additionally consumes a 5th depth column when a minimum-depth filter is
//! configured, diverting sub-threshold sites into the uncallable set.

use std::path::Path;

use tracing::debug;

use crate::core::{
    AlleleCode, RawVariantLog, RawVariantRecord, UncallableSites, VariantLog, VariantRecord,
};
use crate::parsing::{parse_int, split_fields, ParseError};

/// Read a mutation log, decoding each allele field from its first symbol.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::InvalidRecord` on a malformed line.
pub fn read_log(path: &Path) -> Result<VariantLog, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_log_text(&content)
}

/// Parse mutation-log text into a [`VariantLog`].
///
/// # Errors
///
/// Returns `ParseError::InvalidRecord` on a malformed line.
pub fn parse_log_text(text: &str) -> Result<VariantLog, ParseError> {
    let mut log = VariantLog::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let line_num = i + 1;
        let fields = split_fields(line, line_num, 4)?;
        let position = parse_int(fields[1], "position", line_num, line)?;
        let ref_allele = decode_allele(fields[0], fields[1], fields[2]);
        let called_allele = decode_allele(fields[0], fields[1], fields[3]);
        log.push(fields[0], VariantRecord::new(position, ref_allele, called_allele));
    }

    Ok(log)
}

/// Read the expected (ground-truth) log, applying the minimum-depth filter.
///
/// With `min_depth > 0`, each record must carry a 5th integer depth column;
/// records below the threshold are excluded from the log and recorded in the
/// returned uncallable-site set instead.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read,
/// `ParseError::InvalidRecord` on a malformed line, or
/// `ParseError::MissingDepth` when filtering is enabled and a record has no
/// depth column.
pub fn read_expected_log(
    path: &Path,
    min_depth: u64,
) -> Result<(VariantLog, UncallableSites), ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_expected_text(&content, min_depth)
}

/// Parse expected-log text, applying the minimum-depth filter.
///
/// # Errors
///
/// See [`read_expected_log`].
pub fn parse_expected_text(
    text: &str,
    min_depth: u64,
) -> Result<(VariantLog, UncallableSites), ParseError> {
    let mut log = VariantLog::new();
    let mut uncallable = UncallableSites::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let line_num = i + 1;
        let fields = split_fields(line, line_num, 4)?;
        let position = parse_int(fields[1], "position", line_num, line)?;

        if min_depth > 0 {
            let depth_field = fields.get(4).ok_or(ParseError::MissingDepth { line: line_num })?;
            let depth = parse_int(depth_field, "depth", line_num, line)?;
            if depth < 0 || (depth as u64) < min_depth {
                uncallable.insert((fields[0].to_string(), position));
                continue;
            }
        }

        let ref_allele = decode_allele(fields[0], fields[1], fields[2]);
        let called_allele = decode_allele(fields[0], fields[1], fields[3]);
        log.push(fields[0], VariantRecord::new(position, ref_allele, called_allele));
    }

    Ok((log, uncallable))
}

/// Read a mutation log keeping the allele fields verbatim.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::InvalidRecord` on a malformed line.
pub fn read_raw_log(path: &Path) -> Result<RawVariantLog, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_raw_text(&content)
}

/// Parse mutation-log text into a [`RawVariantLog`].
///
/// # Errors
///
/// Returns `ParseError::InvalidRecord` on a malformed line.
pub fn parse_raw_text(text: &str) -> Result<RawVariantLog, ParseError> {
    let mut log = RawVariantLog::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let line_num = i + 1;
        let fields = split_fields(line, line_num, 4)?;
        let position = parse_int(fields[1], "position", line_num, line)?;
        log.push(
            fields[0],
            RawVariantRecord::new(position, fields[2], fields[3]),
        );
    }

    Ok(log)
}

fn decode_allele(scaffold: &str, position: &str, field: &str) -> AlleleCode {
    let code = AlleleCode::from_symbol(field.chars().next().unwrap_or('N'));
    if !code.is_base() {
        debug!(scaffold, position, allele = field, "non-ACGT allele in mutation log");
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_text() {
        let text = "chr1\t100\tA\tC\nchr1\t250\tG\tR\nchr2\t7\tT\tA\n";
        let log = parse_log_text(text).unwrap();

        let chr1 = log.get("chr1");
        assert_eq!(chr1.len(), 2);
        assert_eq!(chr1[0], VariantRecord::new(100, AlleleCode::A, AlleleCode::C));
        assert_eq!(chr1[1], VariantRecord::new(250, AlleleCode::G, AlleleCode::R));
        assert_eq!(log.get("chr2").len(), 1);
    }

    #[test]
    fn test_parse_log_rejects_short_lines() {
        let err = parse_log_text("chr1\t100\tA\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidRecord { line: 1, .. }));
    }

    #[test]
    fn test_parse_log_rejects_bad_position() {
        let err = parse_log_text("chr1\tabc\tA\tC\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidRecord { line: 1, .. }));
    }

    #[test]
    fn test_expected_log_depth_filter() {
        let text = "chr1\t100\tA\tC\t30\nchr1\t200\tG\tT\t3\nchr1\t300\tT\tY\t12\n";
        let (log, uncallable) = parse_expected_text(text, 10).unwrap();

        assert_eq!(log.get("chr1").len(), 2);
        assert_eq!(uncallable.len(), 1);
        assert!(uncallable.contains(&("chr1".to_string(), 200)));
    }

    #[test]
    fn test_expected_log_depth_column_required() {
        let err = parse_expected_text("chr1\t100\tA\tC\n", 10).unwrap_err();
        assert!(matches!(err, ParseError::MissingDepth { line: 1 }));
    }

    #[test]
    fn test_expected_log_depth_ignored_when_disabled() {
        let (log, uncallable) = parse_expected_text("chr1\t100\tA\tC\n", 0).unwrap();
        assert_eq!(log.get("chr1").len(), 1);
        assert!(uncallable.is_empty());
    }

    #[test]
    fn test_parse_raw_keeps_indel_alleles() {
        let text = "chr1\t100\tACT\tN\nchr1\t200\tG\tN\n";
        let log = parse_raw_text(text).unwrap();

        let chr1 = log.get("chr1");
        assert!(chr1[0].is_indel());
        assert!(!chr1[1].is_indel());
        assert_eq!(chr1[0].ref_allele, "ACT");
    }
}
