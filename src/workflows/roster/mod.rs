//! Structured CSV roster intake producing well-formed candidate profiles.
//!
//! This is data loading for the matching pool, not resume parsing: rows are
//! expected to already carry clean, column-shaped candidate data.

mod parser;

use std::io::Read;
use std::path::Path;

use tracing::warn;

use crate::workflows::matching::domain::CandidateProfile;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster file: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CandidateProfile>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parse a roster export. Rows without a usable id or name are skipped
    /// with a logged omission; well-formed rows become profiles in file
    /// order.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<CandidateProfile>, RosterImportError> {
        let mut profiles = Vec::new();

        for profile in parser::parse_records(reader)? {
            if profile.id.as_str().trim().is_empty() || profile.name.trim().is_empty() {
                warn!(
                    candidate_id = profile.id.as_str(),
                    name = %profile.name,
                    "skipping roster row without id or name"
                );
                continue;
            }
            profiles.push(profile);
        }

        Ok(profiles)
    }
}
