use std::fmt;
use std::path::PathBuf;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cutoff below which files are considered already imported. Always UTC, second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Watermark(pub NaiveDateTime);

impl Watermark {
    /// "Import everything."
    pub const MIN: Watermark = Watermark(NaiveDateTime::MIN);

    pub fn from_utc(at: DateTime<Utc>) -> Self {
        Self(at.naive_utc())
    }

    pub fn is_min(&self) -> bool {
        *self == Self::MIN
    }
}

impl fmt::Display for Watermark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_min() {
            // chrono's minimum has a negative year; print the year-1 floor instead.
            return f.write_str("01-Jan-0001 00:00:00");
        }
        write!(f, "{}", self.0.format(crate::watermark::WATERMARK_FORMAT))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub last_access: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub extension: String,
    pub last_access: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyFailure {
    pub destination: PathBuf,
    pub message: String,
}

/// Outcome counts of one copy pass.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub copied: usize,
    pub skipped: usize,
    pub failures: Vec<CopyFailure>,
}

impl RunSummary {
    pub fn errored(&self) -> usize {
        self.failures.len()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Copied {} files, skipped {}, errors: {}.",
            self.copied,
            self.skipped,
            self.errored()
        )
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrimSummary {
    pub removed: usize,
    pub failed: usize,
}

/// Everything one import run did, returned by [`crate::Copier::run`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub watermark: Watermark,
    pub scanned: usize,
    pub candidates: usize,
    pub summary: RunSummary,
    pub trim: TrimSummary,
    pub next_watermark: Watermark,
}
