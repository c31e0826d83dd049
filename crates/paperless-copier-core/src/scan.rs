//! Source tree listing and candidate selection.

use crate::models::{CandidateFile, ScannedFile, Watermark};
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

/// Document types handed to the consumer. Images and plain text are left out so they
/// don't need to be OCR'd.
pub const RECOGNIZED_EXTENSIONS: &[&str] = &["pdf", "docx", "xlsx"];

/// Lists every file below `source_root`, at any depth, in file-name order.
///
/// Symlinks are followed. Unreadable entries and symlink loops are logged and left out.
#[instrument(skip_all, fields(root = %source_root.display()))]
pub fn scan_source(source_root: &Path) -> Vec<ScannedFile> {
    let mut files = Vec::new();

    for entry_result in WalkDir::new(source_root).follow_links(true).sort_by_file_name() {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Could not read directory entry, skipping.");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let last_access = entry
            .metadata()
            .map_err(std::io::Error::from)
            .and_then(|meta| meta.accessed().or_else(|_| meta.modified()));
        match last_access {
            Ok(time) => files.push(ScannedFile {
                path: entry.into_path(),
                last_access: DateTime::<Utc>::from(time).naive_utc(),
            }),
            Err(e) => {
                warn!(path = %entry.path().display(), error = %e, "Could not read file timestamps, skipping.");
            }
        }
    }

    info!("Found {} files in source folder.", files.len());
    files
}

/// Keeps the files accessed strictly after `watermark` whose extension is in `extensions`.
pub fn filter_candidates(
    all_files: &[ScannedFile],
    watermark: Watermark,
    extensions: &[&str],
) -> Vec<CandidateFile> {
    let candidates: Vec<CandidateFile> = all_files
        .iter()
        .filter(|file| file.last_access > watermark.0)
        .filter_map(|file| {
            let extension = extension_of(&file.path).unwrap_or_default();
            if !is_recognized(extension, extensions) {
                debug!(path = %file.path.display(), "Extension not recognized.");
                return None;
            }
            Some(CandidateFile {
                path: file.path.clone(),
                extension: String::from_utf8_lossy(extension).into_owned(),
                last_access: file.last_access,
            })
        })
        .collect();

    info!("Found {} files that match the filter.", candidates.len());
    candidates
}

/// Raw bytes after the last `.` of the file name, so `.pdf` on its own counts as a pdf.
/// Names that are not valid UTF-8 still yield their extension.
fn extension_of(path: &Path) -> Option<&[u8]> {
    let name = path.file_name()?.as_encoded_bytes();
    let dot = name.iter().rposition(|b| *b == b'.')?;
    Some(&name[dot + 1..])
}

fn is_recognized(extension: &[u8], extensions: &[&str]) -> bool {
    extensions.iter().any(|known| known.as_bytes().eq_ignore_ascii_case(extension))
}
