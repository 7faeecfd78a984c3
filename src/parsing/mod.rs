//! Parsers for the tab-delimited inputs consumed by the engines.
//!
//! - **FASTA index (.fai)**: scaffold iteration order and lengths
//! - **Mutation logs**: 4-column `scaffold pos ref called` records, with an
//!   optional 5th depth column consumed when a minimum-depth filter is set
//! - **Indel event logs**: `scaffold pos kind size` records feeding the
//!   coordinate map
//!
//! Every loader reads its file fully into an owned table before any engine
//! pass begins. Malformed records are fatal parse errors with line context,
//! never silently skipped.

use thiserror::Error;

pub mod fai;
pub mod indel;
pub mod snplog;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid record on line {line}: {reason}: '{text}'")]
    InvalidRecord {
        line: usize,
        reason: String,
        text: String,
    },

    #[error("minimum depth filter is set, but line {line} of the expected log has no depth column")]
    MissingDepth { line: usize },
}

impl ParseError {
    pub(crate) fn invalid(line: usize, reason: impl Into<String>, text: &str) -> Self {
        Self::InvalidRecord {
            line,
            reason: reason.into(),
            text: text.to_string(),
        }
    }
}

/// Split one log line into at least `min_fields` tab-delimited fields.
pub(crate) fn split_fields<'a>(
    line: &'a str,
    line_num: usize,
    min_fields: usize,
) -> Result<Vec<&'a str>, ParseError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < min_fields {
        return Err(ParseError::invalid(
            line_num,
            format!("expected at least {min_fields} tab-delimited fields, found {}", fields.len()),
            line,
        ));
    }
    Ok(fields)
}

/// Parse a field as an integer, attributing failures to the source line.
pub(crate) fn parse_int(
    field: &str,
    what: &str,
    line_num: usize,
    line: &str,
) -> Result<i64, ParseError> {
    field
        .trim()
        .parse()
        .map_err(|_| ParseError::invalid(line_num, format!("non-numeric {what} '{field}'"), line))
}
