//! Round-trip tests for the native zip method
//!
//! These cover the uniform compress/decompress contract: file and
//! directory sources, the single-vs-multi extraction policy, and the
//! overwrite guard leaving pre-existing targets untouched.

use squeeze::codec::ZIP;
use squeeze::{Codec, SqueezeError};
use std::fs;
use tempfile::tempdir;

/// A compressed single file decompresses back to identical bytes.
#[test]
fn test_single_file_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("report.txt");
    let archive = dir.path().join("report.txt.zip");
    let restored = dir.path().join("restored.txt");

    fs::write(&source, b"quarterly numbers, all of them")?;

    ZIP.compress(&source, &archive, 5, false)?;
    assert!(archive.exists());

    ZIP.decompress(&archive, &restored, false)?;
    assert_eq!(fs::read(&restored)?, fs::read(&source)?);

    Ok(())
}

/// A directory with nested files round-trips with relative structure and
/// contents preserved.
#[test]
fn test_directory_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("project");
    fs::create_dir_all(source.join("docs/deep"))?;
    fs::write(source.join("readme.md"), b"# project")?;
    fs::write(source.join("docs/guide.md"), b"guide text")?;
    fs::write(source.join("docs/deep/notes.txt"), b"nested notes")?;

    let archive = dir.path().join("project.zip");
    ZIP.compress(&source, &archive, 5, false)?;

    let restored = dir.path().join("restored");
    ZIP.decompress(&archive, &restored, false)?;

    assert_eq!(fs::read(restored.join("readme.md"))?, b"# project");
    assert_eq!(fs::read(restored.join("docs/guide.md"))?, b"guide text");
    assert_eq!(fs::read(restored.join("docs/deep/notes.txt"))?, b"nested notes");

    Ok(())
}

/// The overwrite guard fails the call and leaves the existing target
/// byte-for-byte unchanged.
#[test]
fn test_compress_respects_overwrite_guard() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("data.txt");
    let target = dir.path().join("data.txt.zip");

    fs::write(&source, b"payload")?;
    fs::write(&target, b"previous artifact, not a zip at all")?;

    let err = ZIP.compress(&source, &target, 5, false).unwrap_err();
    assert!(matches!(err, SqueezeError::TargetExists(_)));
    assert_eq!(fs::read(&target)?, b"previous artifact, not a zip at all");

    // With overwrite permitted the same call succeeds.
    ZIP.compress(&source, &target, 5, true)?;
    assert_ne!(fs::read(&target)?, b"previous artifact, not a zip at all");

    Ok(())
}

/// Decompressing a single-file archive with an existing-directory target
/// places the file inside it under its original name.
#[test]
fn test_single_file_archive_into_directory_target() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("notes.txt");
    let archive = dir.path().join("notes.txt.zip");
    fs::write(&source, b"remember the milk")?;
    ZIP.compress(&source, &archive, 5, false)?;

    let target_dir = dir.path().join("inbox");
    fs::create_dir(&target_dir)?;
    ZIP.decompress(&archive, &target_dir, false)?;

    assert_eq!(fs::read(target_dir.join("notes.txt"))?, b"remember the milk");

    Ok(())
}

/// Decompressing a multi-entry archive into a non-existent path creates
/// that path as a directory and populates it.
#[test]
fn test_multi_entry_archive_creates_target_directory() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("bundle");
    fs::create_dir(&source)?;
    fs::write(source.join("one.txt"), b"1")?;
    fs::write(source.join("two.txt"), b"2")?;

    let archive = dir.path().join("bundle.zip");
    ZIP.compress(&source, &archive, 5, false)?;

    let target = dir.path().join("does/not/exist/yet");
    ZIP.decompress(&archive, &target, false)?;

    assert!(target.is_dir());
    assert_eq!(fs::read(target.join("one.txt"))?, b"1");
    assert_eq!(fs::read(target.join("two.txt"))?, b"2");

    Ok(())
}

/// Per-entry overwrite: an existing file is skipped when overwrite is
/// false, while missing entries are still extracted.
#[test]
fn test_extraction_skips_existing_entries_individually() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("bundle");
    fs::create_dir(&source)?;
    fs::write(source.join("keep.txt"), b"from archive")?;
    fs::write(source.join("new.txt"), b"fresh")?;

    let archive = dir.path().join("bundle.zip");
    ZIP.compress(&source, &archive, 5, false)?;

    let target = dir.path().join("out");
    fs::create_dir(&target)?;
    fs::write(target.join("keep.txt"), b"local edits")?;

    ZIP.decompress(&archive, &target, false)?;

    // The existing file survived, the missing one arrived.
    assert_eq!(fs::read(target.join("keep.txt"))?, b"local edits");
    assert_eq!(fs::read(target.join("new.txt"))?, b"fresh");

    // With overwrite permitted the archive wins.
    ZIP.decompress(&archive, &target, true)?;
    assert_eq!(fs::read(target.join("keep.txt"))?, b"from archive");

    Ok(())
}

/// Missing or invalid sources fail before anything touches the target.
#[test]
fn test_source_errors() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    let missing = dir.path().join("nope.txt");
    let target = dir.path().join("nope.zip");
    let err = ZIP.compress(&missing, &target, 5, true).unwrap_err();
    assert!(matches!(err, SqueezeError::SourceMissing(_)));
    assert!(!target.exists());

    // Decompressing a directory is refused.
    let not_an_archive = dir.path().join("somedir");
    fs::create_dir(&not_an_archive)?;
    let err = ZIP
        .decompress(&not_an_archive, &dir.path().join("out"), true)
        .unwrap_err();
    assert!(matches!(err, SqueezeError::SourceNotFile(_)));

    Ok(())
}

/// The convenience functions resolve a method and run it.
#[test]
fn test_crate_level_convenience_functions() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("data.txt");
    fs::write(&source, b"via the front door")?;

    // Route through the zip method explicitly so the test does not depend
    // on which external tools the host has.
    let method = squeeze::for_extension("zip").expect("zip is always available");
    let archive = dir.path().join(method.output_name(&source));
    assert_eq!(archive.file_name().unwrap(), "data.txt.zip");
    method.compress(&source, &archive, 5, false)?;

    let restored = dir.path().join("restored.txt");
    squeeze::decompress(&archive, &restored, false)?;
    assert_eq!(fs::read(&restored)?, b"via the front door");

    Ok(())
}
