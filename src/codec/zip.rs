//! Native in-process zip method
//!
//! The universal fallback: archives are written and read with the `zip`
//! crate, so this method needs no external tools and always reports itself
//! available. Directory sources are walked recursively and stored with
//! directory-relative names; single files are stored under their own name.

use crate::codec::{ensure_source_exists, ensure_source_is_file, ensure_target_writable, Codec};
use crate::common::{clamp_level, Result, SqueezeError};
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Shared instance registered at startup.
pub static ZIP: ZipCodec = ZipCodec;

/// The native in-process zip compression method.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipCodec;

impl Codec for ZipCodec {
    fn name(&self) -> &'static str {
        "zip"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["zip"]
    }

    fn target_extension(&self, _source_is_dir: bool) -> &'static str {
        "zip"
    }

    fn is_available(&self) -> bool {
        // The archive facility is compiled into the crate.
        true
    }

    fn compress(&self, source: &Path, target: &Path, level: u32, overwrite: bool) -> Result<()> {
        ensure_source_exists(source)?;
        ensure_target_writable(target, overwrite)?;

        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(clamp_level(level))));

        let mut writer = ZipWriter::new(File::create(target)?);

        if source.is_dir() {
            // Sorted walk keeps archive layout stable across runs.
            for entry in WalkDir::new(source).sort_by_file_name() {
                let entry = entry.map_err(io::Error::from)?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let relative = entry
                    .path()
                    .strip_prefix(source)
                    .map_err(|err| SqueezeError::Io(io::Error::other(err)))?;
                writer.start_file(member_name(relative), options)?;
                io::copy(&mut File::open(entry.path())?, &mut writer)?;
            }
        } else {
            writer.start_file(member_name(Path::new(file_name(source)?)), options)?;
            io::copy(&mut File::open(source)?, &mut writer)?;
        }

        writer.finish()?;
        Ok(())
    }

    fn decompress(&self, source: &Path, target: &Path, overwrite: bool) -> Result<()> {
        ensure_source_is_file(source)?;

        let mut archive = ZipArchive::new(File::open(source)?)?;

        if archive.len() == 1 && archive.by_index(0)?.is_file() {
            return extract_single(&mut archive, target, overwrite);
        }
        extract_all(&mut archive, target, overwrite)
    }
}

/// Extract the only file in `archive`, treating `target` as a file path.
///
/// An existing directory target receives the file inside it under the
/// member's own name; parent directories are created as needed.
fn extract_single(archive: &mut ZipArchive<File>, target: &Path, overwrite: bool) -> Result<()> {
    let mut member = archive.by_index(0)?;
    let member_file_name = Path::new(member.name())
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "member".into());

    let target = if target.is_dir() {
        target.join(member_file_name)
    } else {
        target.to_path_buf()
    };
    ensure_target_writable(&target, overwrite)?;

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    io::copy(&mut member, &mut File::create(&target)?)?;
    Ok(())
}

/// Extract every member of `archive` beneath the directory `target`,
/// creating it when absent. Existing files are skipped, not clobbered,
/// when `overwrite` is false; the rest of the extraction continues.
fn extract_all(archive: &mut ZipArchive<File>, target: &Path, overwrite: bool) -> Result<()> {
    fs::create_dir_all(target)?;

    for index in 0..archive.len() {
        let mut member = archive.by_index(index)?;
        // enclosed_name() rejects absolute and parent-relative member
        // names, so no entry can land outside `target`.
        let Some(relative) = member.enclosed_name() else {
            log::warn!("skipping archive member with unsafe name: {}", member.name());
            continue;
        };
        let destination = target.join(relative);

        if member.is_dir() {
            fs::create_dir_all(&destination)?;
            continue;
        }
        if destination.exists() && !overwrite {
            continue;
        }
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        io::copy(&mut member, &mut File::create(&destination)?)?;
    }
    Ok(())
}

/// Join a relative path into a `/`-separated archive member name.
fn member_name(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn file_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| SqueezeError::SourceNotFile(path.to_path_buf()))
}
