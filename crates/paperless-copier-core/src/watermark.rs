//! Persistence of the last-import timestamp in the sentinel file.

use crate::error::Result;
use crate::models::Watermark;
use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// `05-Jan-2024 13:45:02`
pub const WATERMARK_FORMAT: &str = "%d-%b-%Y %H:%M:%S";

/// Reads the watermark from the first line of the sentinel file.
///
/// Never fails: a missing, unreadable, empty or malformed file yields [`Watermark::MIN`].
pub fn read_watermark(sentinel_path: &Path) -> Watermark {
    let watermark = match fs::read_to_string(sentinel_path) {
        Ok(content) => parse_watermark(content.lines().next().unwrap_or_default())
            .unwrap_or_else(|| {
                debug!(path = %sentinel_path.display(), "Sentinel file is malformed, importing everything.");
                Watermark::MIN
            }),
        Err(e) => {
            debug!(path = %sentinel_path.display(), error = %e, "No usable sentinel file, importing everything.");
            Watermark::MIN
        }
    };
    info!("Importing docs with timestamp since {}", watermark);
    watermark
}

/// Overwrites the sentinel file with `at`, truncated to whole seconds.
pub fn write_watermark(sentinel_path: &Path, at: DateTime<Utc>) -> Result<Watermark> {
    let watermark = Watermark::from_utc(at.with_nanosecond(0).unwrap_or(at));
    debug!(path = %sentinel_path.display(), %watermark, "Writing sentinel file.");
    fs::write(sentinel_path, watermark.to_string())?;
    Ok(watermark)
}

fn parse_watermark(line: &str) -> Option<Watermark> {
    NaiveDateTime::parse_from_str(line, WATERMARK_FORMAT)
        .ok()
        .map(Watermark)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use tempfile::tempdir;

    #[test]
    fn parses_the_sentinel_format() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(13, 45, 2)
            .unwrap();
        assert_eq!(parse_watermark("05-Jan-2024 13:45:02"), Some(Watermark(expected)));
    }

    #[test]
    fn rejects_other_formats() {
        assert_eq!(parse_watermark(""), None);
        assert_eq!(parse_watermark("2024-01-05 13:45:02"), None);
        assert_eq!(parse_watermark("05-Jan-2024"), None);
        assert_eq!(parse_watermark("garbage"), None);
    }

    #[test]
    fn missing_or_malformed_sentinel_means_import_everything() {
        let dir = tempdir().unwrap();
        let sentinel = dir.path().join(".PaperlessImportTimestamp");
        assert!(read_watermark(&sentinel).is_min());

        fs::write(&sentinel, "not a date\n").unwrap();
        assert!(read_watermark(&sentinel).is_min());

        fs::write(&sentinel, "").unwrap();
        assert!(read_watermark(&sentinel).is_min());
    }

    #[test]
    fn import_everything_cutoff_prints_as_year_one() {
        assert_eq!(Watermark::MIN.to_string(), "01-Jan-0001 00:00:00");
    }

    #[test]
    fn only_the_first_line_counts() {
        let dir = tempdir().unwrap();
        let sentinel = dir.path().join(".PaperlessImportTimestamp");
        fs::write(&sentinel, "05-Jan-2024 13:45:02\r\nleftover\n").unwrap();
        assert_eq!(read_watermark(&sentinel).to_string(), "05-Jan-2024 13:45:02");
    }

    #[test]
    fn written_watermark_reads_back_without_subseconds() {
        let dir = tempdir().unwrap();
        let sentinel = dir.path().join(".PaperlessImportTimestamp");
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 59).unwrap()
            + chrono::Duration::milliseconds(750);

        let written = write_watermark(&sentinel, at).unwrap();

        assert_eq!(fs::read_to_string(&sentinel).unwrap(), "09-Mar-2024 07:05:59");
        assert_eq!(read_watermark(&sentinel), written);
    }
}
