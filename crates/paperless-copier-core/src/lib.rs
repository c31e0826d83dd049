pub mod config;
pub mod copy;
pub mod error;
pub mod models;
pub mod paths;
pub mod scan;
pub mod trim;
pub mod watermark;

// Publicly re-export the main types for a clean external API.
pub use config::Settings;
pub use error::{Error, Result};
pub use models::{CandidateFile, CopyFailure, RunReport, RunSummary, ScannedFile, TrimSummary, Watermark};

use chrono::Utc;
use scan::RECOGNIZED_EXTENSIONS;
use tracing::{info, instrument};

/// One import run from a source tree into the consume folder.
#[derive(Debug)]
pub struct Copier {
    settings: Settings,
}

impl Copier {
    /// Fails when either root is missing; nothing has been touched at that point.
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Copies the documents accessed since the last run, trims empty destination
    /// folders and stores the new watermark.
    ///
    /// Per-file failures end up in the report. The watermark is written even when
    /// some copies failed, so those files are not retried unless accessed again.
    #[instrument(skip(self), name = "import_process", fields(source = %self.settings.source_dir.display()))]
    pub fn run(&self) -> Result<RunReport> {
        let sentinel_path = self.settings.sentinel_path();
        let watermark = watermark::read_watermark(&sentinel_path);

        info!("Starting document import from {}...", self.settings.source_dir.display());
        let all_files = scan::scan_source(&self.settings.source_dir);
        let candidates = scan::filter_candidates(&all_files, watermark, RECOGNIZED_EXTENSIONS);

        let summary = copy::copy_all(&candidates, &self.settings.source_dir, &self.settings.dest_dir);
        let trim = trim::trim_empty_directories(&self.settings.dest_dir);

        info!("Writing timestamp...");
        let next_watermark = watermark::write_watermark(&sentinel_path, Utc::now())?;

        Ok(RunReport {
            watermark,
            scanned: all_files.len(),
            candidates: candidates.len(),
            summary,
            trim,
            next_watermark,
        })
    }
}
