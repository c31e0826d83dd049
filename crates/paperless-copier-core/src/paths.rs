use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Returns `full_path` relative to `root`.
///
/// Comparison is per path component, so a root of `/data/src` (with or without a
/// trailing separator) never matches `/data/src2/...` or `/data/src-backup/...`.
pub fn relativize(full_path: &Path, root: &Path) -> Result<PathBuf> {
    full_path
        .strip_prefix(root)
        .map(Path::to_path_buf)
        .map_err(|_| Error::OutsideRoot {
            path: full_path.to_path_buf(),
            root: root.to_path_buf(),
        })
}

/// Re-roots a file found under `source_root` onto `dest_root`.
pub fn destination_for(full_path: &Path, source_root: &Path, dest_root: &Path) -> Result<PathBuf> {
    Ok(dest_root.join(relativize(full_path, source_root)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_every_intermediate_segment() {
        let rel = relativize(
            Path::new("/data/src/2024/taxes/receipt.pdf"),
            Path::new("/data/src"),
        )
        .unwrap();
        assert_eq!(rel, PathBuf::from("2024/taxes/receipt.pdf"));
    }

    #[test]
    fn trailing_separator_on_root_is_irrelevant() {
        let rel = relativize(Path::new("/data/src/a.pdf"), Path::new("/data/src/")).unwrap();
        assert_eq!(rel, PathBuf::from("a.pdf"));
    }

    #[test]
    fn sibling_sharing_a_prefix_is_not_inside_root() {
        for outside in ["/data/src2/a.pdf", "/data/src-backup/x/a.pdf"] {
            let err = relativize(Path::new(outside), Path::new("/data/src")).unwrap_err();
            assert!(matches!(err, Error::OutsideRoot { .. }));
        }
    }

    #[test]
    fn destination_is_dest_root_plus_relative_path() {
        let dest = destination_for(
            Path::new("/data/src/docs/report.pdf"),
            Path::new("/data/src"),
            Path::new("/consume"),
        )
        .unwrap();
        assert_eq!(dest, PathBuf::from("/consume/docs/report.pdf"));
    }
}
