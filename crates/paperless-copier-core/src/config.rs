use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Folder watched by the Paperless consumer on the NAS.
pub const DEFAULT_DEST_DIR: &str = "/volume1/dockerdata/paperless/data/consume";

/// Name of the file, directly under the source root, holding the last import time.
pub const SENTINEL_FILE_NAME: &str = ".PaperlessImportTimestamp";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Directory tree scanned for new documents.
    pub source_dir: PathBuf,

    /// Directory the documents are copied into.
    pub dest_dir: PathBuf,
}

impl Settings {
    /// Builds the settings from the command-line positionals, falling back to
    /// [`DEFAULT_DEST_DIR`] when no destination is given.
    pub fn from_args(source_dir: &Path, dest_dir: Option<&Path>) -> Result<Self> {
        let config_builder = config::Config::builder()
            .set_default("dest_dir", DEFAULT_DEST_DIR)?
            .set_override("source_dir", source_dir.to_string_lossy().into_owned())?
            .set_override_option(
                "dest_dir",
                dest_dir.map(|p| p.to_string_lossy().into_owned()),
            )?
            .build()?;
        config_builder.try_deserialize().map_err(Error::Config)
    }

    pub fn sentinel_path(&self) -> PathBuf {
        self.source_dir.join(SENTINEL_FILE_NAME)
    }

    /// Checks that both roots exist. Nothing is read or written before this passes.
    pub fn validate(&self) -> Result<()> {
        if !self.source_dir.is_dir() {
            return Err(Error::SourceNotFound(self.source_dir.clone()));
        }
        if !self.dest_dir.is_dir() {
            return Err(Error::DestinationNotFound(self.dest_dir.clone()));
        }
        Ok(())
    }
}
