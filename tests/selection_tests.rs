//! Selection-engine tests through the public API
//!
//! The registry's behavioral tests with scripted availability live next to
//! the registry itself; these exercise the process-wide table the way a
//! collaborator would.

use squeeze::codec::{GZIP, PIGZ, ZIP};
use squeeze::Codec;
use std::path::Path;

/// The native method guarantees best() always finds something.
#[test]
fn test_best_always_finds_a_method() {
    let method = squeeze::best().expect("zip is compiled in and always available");
    assert!(method.is_available());
}

/// Unknown extensions resolve to none rather than an unrelated method.
#[test]
fn test_unregistered_extension_finds_nothing() {
    assert!(squeeze::for_extension("fake").is_none());
    assert!(squeeze::for_extension("").is_none());
}

/// Extension lookup ignores case and a leading dot.
#[test]
fn test_extension_lookup_normalization() {
    let plain = squeeze::for_extension("zip").expect("zip is always available");
    let dotted = squeeze::for_extension(".ZIP").expect("zip is always available");
    assert_eq!(plain.name(), dotted.name());
}

/// When both gzip tiers are installed, the parallel tier wins the
/// shared extensions.
#[test]
fn test_priority_prefers_pigz_over_gzip() {
    if !GZIP.is_available() || !PIGZ.is_available() {
        println!("skipping: gzip and pigz are not both installed");
        return;
    }
    let chosen = squeeze::for_extension("gz").expect("both tiers are available");
    assert_eq!(chosen.name(), "pigz");

    let chosen = squeeze::for_extension("tgz").expect("both tiers are available");
    assert_eq!(chosen.name(), "pigz");
}

/// Repeated resolutions with stable availability return the same method.
#[test]
fn test_selection_is_stable() {
    let first = squeeze::best().expect("zip is always available").name();
    for _ in 0..20 {
        assert_eq!(squeeze::best().expect("still available").name(), first);
    }
}

/// Filename derivation differs between files and directories.
#[test]
fn test_output_name_derivation() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let file = dir.path().join("report.txt");
    std::fs::write(&file, b"x")?;
    let subdir = dir.path().join("backup");
    std::fs::create_dir(&subdir)?;

    assert_eq!(ZIP.output_name(&file), "report.txt.zip");
    assert_eq!(ZIP.output_name(&subdir), "backup.zip");

    assert_eq!(GZIP.output_name(&file), "report.txt.gz");
    assert_eq!(GZIP.output_name(&subdir), "backup.tgz");
    assert_eq!(PIGZ.output_name(&subdir), "backup.tgz");

    // Only a live regular file gets the file-style extension; a path that
    // does not exist derives the archive extension.
    assert_eq!(GZIP.output_name(Path::new("/no/such/path")), "path.tgz");

    Ok(())
}

/// The registration listing is ordered highest priority first and names
/// every default method.
#[test]
fn test_registration_listing() {
    let entries = squeeze::global().registrations();
    assert_eq!(entries.len(), 5);

    let priorities: Vec<i32> = entries.iter().map(|entry| entry.priority).collect();
    let mut sorted = priorities.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(priorities, sorted);

    let names: Vec<&str> = entries.iter().map(|entry| entry.codec.name()).collect();
    assert!(names.contains(&"zip"));
    assert!(names.contains(&"gzip"));
    assert!(names.contains(&"pigz"));
}
