//! Scaffold index loaded from a FASTA index (.fai) file using noodles.
//!
//! The index supplies the scaffold visit order shared by all three engines
//! and the per-scaffold lengths the compare statistics need. Only name and
//! length are consumed.

use std::collections::HashMap;
use std::path::Path;

use crate::parsing::ParseError;

/// One named reference sequence with its length in bases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scaffold {
    pub name: String,
    pub length: u64,
}

/// Ordered list of scaffolds with a name-to-length lookup.
///
/// Ordering is the appearance order in the .fai file and defines the merge
/// partition order for every engine pass.
#[derive(Debug, Default)]
pub struct ScaffoldIndex {
    scaffolds: Vec<Scaffold>,
    lengths: HashMap<String, u64>,
}

impl ScaffoldIndex {
    /// Read a FASTA index file using noodles, falling back to the plain
    /// name/length text form when the file is not a full five-column index.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be read, or
    /// `ParseError::InvalidRecord` if neither parse yields a scaffold.
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        use noodles::fasta;

        let content = std::fs::read_to_string(path)?;

        let index = match fasta::fai::io::Reader::new(content.as_bytes()).read_index() {
            Ok(index) => index,
            Err(_) => return Self::from_text(&content),
        };

        let mut scaffolds = Self::default();
        for record in index.as_ref() {
            let name = String::from_utf8_lossy(record.name()).to_string();
            scaffolds.push(Scaffold {
                name,
                length: record.length(),
            });
        }

        if scaffolds.is_empty() {
            return Err(ParseError::invalid(0, "no scaffolds found in FAI file", ""));
        }

        Ok(scaffolds)
    }

    /// Parse index text directly (two or more tab-delimited fields per line).
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidRecord` on a malformed line or when no
    /// scaffolds are found.
    pub fn from_text(text: &str) -> Result<Self, ParseError> {
        let mut scaffolds = Self::default();

        for (i, line) in text.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let line_num = i + 1;
            let fields = super::split_fields(line, line_num, 2)?;
            let length = super::parse_int(fields[1], "scaffold length", line_num, line)?;
            let length = u64::try_from(length).map_err(|_| {
                ParseError::invalid(line_num, format!("negative scaffold length '{}'", fields[1]), line)
            })?;
            scaffolds.push(Scaffold {
                name: fields[0].to_string(),
                length,
            });
        }

        if scaffolds.is_empty() {
            return Err(ParseError::invalid(0, "no scaffolds found in FAI file", ""));
        }

        Ok(scaffolds)
    }

    fn push(&mut self, scaffold: Scaffold) {
        self.lengths.insert(scaffold.name.clone(), scaffold.length);
        self.scaffolds.push(scaffold);
    }

    /// Scaffolds in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Scaffold> {
        self.scaffolds.iter()
    }

    #[must_use]
    pub fn length(&self, name: &str) -> Option<u64> {
        self.lengths.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.lengths.contains_key(name)
    }

    /// Total bases across all scaffolds.
    #[must_use]
    pub fn genome_size(&self) -> u64 {
        self.scaffolds.iter().map(|s| s.length).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scaffolds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scaffolds.is_empty()
    }
}
