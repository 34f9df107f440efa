//! Import of the residential radon survey export and per-province aggregation.
//!
//! The survey figures are display-only; they never feed into scoring or the
//! regional baselines.

mod parser;
mod stats;

pub use stats::{province_name, ProvinceStats};

use parser::SurveyRecord;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug)]
pub enum SurveyImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for SurveyImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurveyImportError::Io(err) => write!(f, "failed to read radon survey: {}", err),
            SurveyImportError::Csv(err) => write!(f, "invalid radon survey CSV data: {}", err),
        }
    }
}

impl std::error::Error for SurveyImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SurveyImportError::Io(err) => Some(err),
            SurveyImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SurveyImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for SurveyImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Usable readings from a survey export.
#[derive(Debug, Clone, Default)]
pub struct RegionalSurvey {
    records: Vec<SurveyRecord>,
}

impl RegionalSurvey {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SurveyImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SurveyImportError> {
        let records = parser::parse_records(reader)?;
        info!(readings = records.len(), "loaded radon survey readings");
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Per-province summaries sorted by descending average.
    pub fn province_stats(&self) -> Vec<ProvinceStats> {
        stats::province_stats(&self.records)
    }
}
