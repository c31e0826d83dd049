//! Bottom-up removal of destination folders left empty once the consumer has taken
//! their documents.

use crate::models::TrimSummary;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// macOS folder metadata, ignored when deciding whether a folder is empty.
pub const IGNORABLE_ARTIFACT: &str = ".DS_Store";

/// Removes every empty directory below `root`. `root` itself is kept.
///
/// Symlinks are never followed; a symlink counts as a file.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn trim_empty_directories(root: &Path) -> TrimSummary {
    info!("Trimming empty folders...");
    let mut summary = TrimSummary::default();
    match subdirectories(root) {
        Ok(subdirs) => {
            for subdir in subdirs {
                trim_dir(&subdir, &mut summary);
            }
        }
        Err(e) => {
            warn!(error = %e, "Unable to list destination folder.");
        }
    }
    debug!(removed = summary.removed, failed = summary.failed, "Trim pass finished.");
    summary
}

fn trim_dir(dir: &Path, summary: &mut TrimSummary) {
    if let Ok(subdirs) = subdirectories(dir) {
        for subdir in subdirs {
            trim_dir(&subdir, summary);
        }
    }

    let listing = match Listing::read(dir) {
        Ok(listing) => listing,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "Unable to list folder.");
            return;
        }
    };

    let listing = if listing.has_artifact {
        let artifact = dir.join(IGNORABLE_ARTIFACT);
        if let Err(e) = fs::remove_file(&artifact) {
            warn!(path = %artifact.display(), error = %e, "Unable to delete metadata file.");
            return;
        }
        match Listing::read(dir) {
            Ok(listing) => listing,
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "Unable to list folder.");
                return;
            }
        }
    } else {
        listing
    };

    if listing.files > 0 || listing.dirs > 0 {
        return;
    }

    match fs::remove_dir(dir) {
        Ok(()) => {
            info!("Deleted folder {}.", dir.display());
            summary.removed += 1;
        }
        Err(e) => {
            warn!(error = %e, "Unable to delete folder {}.", dir.display());
            summary.failed += 1;
        }
    }
}

#[derive(Debug, Default)]
struct Listing {
    /// Every non-directory entry, the artifact and symlinks included.
    files: usize,
    dirs: usize,
    has_artifact: bool,
}

impl Listing {
    fn read(dir: &Path) -> io::Result<Self> {
        let mut listing = Listing::default();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                listing.dirs += 1;
            } else {
                listing.files += 1;
                if entry.file_name() == IGNORABLE_ARTIFACT {
                    listing.has_artifact = true;
                }
            }
        }
        Ok(listing)
    }
}

fn subdirectories(dir: &Path) -> io::Result<Vec<std::path::PathBuf>> {
    let mut subdirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            subdirs.push(entry.path());
        }
    }
    subdirs.sort();
    Ok(subdirs)
}
