//! Output-path and extension derivation
//!
//! Every compression method derives its default output name the same way:
//! append the method's extension to the full file name. Files keep their
//! original extension (`report.txt` becomes `report.txt.gz`), directories
//! get the archive extension appended to the directory name (`backup`
//! becomes `backup.tgz`). Appending rather than swapping the last dot
//! segment keeps dotted directory names intact (`my.backup` derives
//! `my.backup.tgz`, not `my.tgz`).

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Derive the default compressed output path for `source`.
///
/// `ext` is the extension the compression method wants for this kind of
/// source, without a leading dot.
pub fn output_path(source: &Path, ext: &str) -> PathBuf {
    let mut name = source
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("archive"));
    name.push(".");
    name.push(ext);
    source.with_file_name(name)
}

/// Derive the default decompressed output path for `source` by stripping
/// the final extension only.
///
/// `backup.tgz` becomes `backup`; `report.txt.gz` keeps its inner
/// extension and becomes `report.txt`. A source without an extension is
/// returned unchanged.
pub fn decompressed_path(source: &Path) -> PathBuf {
    match source.file_stem() {
        Some(stem) => source.with_file_name(stem),
        None => source.to_path_buf(),
    }
}

/// Normalize an extension for registry lookups: trim whitespace, strip
/// leading dots and lowercase the rest, so ` .TGZ ` matches `tgz`.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_appends_extension() {
        assert_eq!(
            output_path(Path::new("/data/report.txt"), "gz"),
            PathBuf::from("/data/report.txt.gz")
        );
        assert_eq!(
            output_path(Path::new("/data/backup"), "tgz"),
            PathBuf::from("/data/backup.tgz")
        );
        // Dotted directory names keep their full name.
        assert_eq!(
            output_path(Path::new("/data/my.backup"), "zip"),
            PathBuf::from("/data/my.backup.zip")
        );
    }

    #[test]
    fn test_decompressed_path_strips_last_extension_only() {
        assert_eq!(
            decompressed_path(Path::new("/data/backup.tgz")),
            PathBuf::from("/data/backup")
        );
        assert_eq!(
            decompressed_path(Path::new("/data/report.txt.gz")),
            PathBuf::from("/data/report.txt")
        );
        assert_eq!(
            decompressed_path(Path::new("/data/plain")),
            PathBuf::from("/data/plain")
        );
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("gz"), "gz");
        assert_eq!(normalize_extension(".gz"), "gz");
        assert_eq!(normalize_extension(" .TGZ "), "tgz");
        assert_eq!(normalize_extension(""), "");
    }
}
