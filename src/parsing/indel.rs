//! Reader for indel event logs.
//!
//! Format: `scaffold \t position \t kind \t size`, positions 0-based. Kind
//! `ins` is an insertion; anything else is treated as a deletion. Size-0
//! events are legal no-ops for the coordinate map.

use std::path::Path;

use crate::parsing::{parse_int, split_fields, ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndelKind {
    Insertion,
    Deletion,
}

/// One length-changing event in a branch's mutation history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndelEvent {
    pub scaffold: String,
    /// 0-based reference position of the event
    pub position: i64,
    pub kind: IndelKind,
    /// Event size in bases; 0 has no coordinate effect
    pub size: i64,
}

impl IndelEvent {
    /// Net coordinate offset this event introduces downstream of itself.
    #[must_use]
    pub fn offset(&self) -> i64 {
        match self.kind {
            IndelKind::Insertion => self.size,
            IndelKind::Deletion => -self.size,
        }
    }
}

/// Read an indel event log in file order.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::InvalidRecord` on a malformed line.
pub fn read_indel_log(path: &Path) -> Result<Vec<IndelEvent>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_indel_text(&content)
}

/// Parse indel-log text in order.
///
/// # Errors
///
/// Returns `ParseError::InvalidRecord` on a malformed line.
pub fn parse_indel_text(text: &str) -> Result<Vec<IndelEvent>, ParseError> {
    let mut events = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let line_num = i + 1;
        let fields = split_fields(line, line_num, 4)?;
        let position = parse_int(fields[1], "position", line_num, line)?;
        let size = parse_int(fields[3], "size", line_num, line)?;
        if size < 0 {
            return Err(ParseError::invalid(
                line_num,
                format!("negative indel size '{}'", fields[3]),
                line,
            ));
        }
        let kind = if fields[2] == "ins" {
            IndelKind::Insertion
        } else {
            IndelKind::Deletion
        };
        events.push(IndelEvent {
            scaffold: fields[0].to_string(),
            position,
            kind,
            size,
        });
    }

    Ok(events)
}
