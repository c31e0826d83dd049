//! Copies candidates into the destination tree, at most once per relative path.

use crate::error::Result;
use crate::models::{CandidateFile, CopyFailure, RunSummary};
use crate::paths::destination_for;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Copies every candidate that has no counterpart under `dest_root` yet.
///
/// A failure on one file is recorded in the summary and never stops the batch.
#[instrument(skip_all, fields(count = candidates.len()))]
pub fn copy_all(candidates: &[CandidateFile], source_root: &Path, dest_root: &Path) -> RunSummary {
    let mut summary = RunSummary::default();

    for candidate in candidates {
        let dest_path = match destination_for(&candidate.path, source_root, dest_root) {
            Ok(path) => path,
            Err(e) => {
                warn!(path = %candidate.path.display(), error = %e, "Cannot map file into destination.");
                summary.failures.push(CopyFailure {
                    destination: candidate.path.clone(),
                    message: e.to_string(),
                });
                continue;
            }
        };

        if dest_path.is_file() {
            info!("{} already existed. Skipping...", dest_path.display());
            summary.skipped += 1;
            continue;
        }

        info!("Copying {} to {}...", candidate.path.display(), dest_root.display());
        match copy_one(&candidate.path, &dest_path) {
            Ok(bytes) => {
                debug!(path = %dest_path.display(), bytes, "Copied.");
                summary.copied += 1;
            }
            Err(e) => {
                warn!("Error copying {}: {}", dest_path.display(), e);
                summary.failures.push(CopyFailure {
                    destination: dest_path,
                    message: e.to_string(),
                });
            }
        }
    }

    info!("{}", summary);
    summary
}

fn copy_one(source: &Path, dest: &Path) -> Result<u64> {
    if let Some(parent) = dest.parent() {
        if !parent.is_dir() {
            info!("Creating directory {}", parent.display());
            fs::create_dir_all(parent)?;
        }
    }

    let mut reader = File::open(source)?;
    // create_new: a file that appeared since the existence check is left untouched.
    let mut writer = OpenOptions::new().write(true).create_new(true).open(dest)?;
    Ok(io::copy(&mut reader, &mut writer)?)
}
