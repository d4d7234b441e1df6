//! External gzip-family methods
//!
//! Two tiers of the same wire format: `tar` piped through `gzip`/`gunzip`
//! (tier 1) and through `pigz`/`unpigz` (tier 2, parallel and therefore
//! preferred when installed). Both produce standard gzip streams, so
//! archives written by one tier decompress with the other.
//!
//! Directory archives are created with `tar -C <parent> <name>`, which
//! stores one leading directory component and nothing above it; extraction
//! strips that single component again. The two conventions must stay
//! symmetric or nested directories stop round-tripping.

use crate::codec::pipeline::{run, run_to_file, Pipeline};
use crate::codec::{ensure_source_exists, ensure_source_is_file, ensure_target_writable, Codec};
use crate::common::{clamp_level, Result, SqueezeError};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Tier 1: `tar` + `gzip`/`gunzip`.
pub static GZIP: PipedGzip = PipedGzip {
    name: "gzip",
    compress_tool: "gzip",
    decompress_tool: "gunzip",
};

/// Tier 2: `tar` + `pigz`/`unpigz`. Same stream format as tier 1 with
/// parallel (de)compression.
pub static PIGZ: PipedGzip = PipedGzip {
    name: "pigz",
    compress_tool: "pigz",
    decompress_tool: "unpigz",
};

/// A gzip-family method backed by a pair of external binaries.
///
/// The archiver is always `tar`; the compressor/decompressor pair is what
/// distinguishes the tiers.
#[derive(Debug, Clone, Copy)]
pub struct PipedGzip {
    name: &'static str,
    compress_tool: &'static str,
    decompress_tool: &'static str,
}

impl PipedGzip {
    /// Whether `source` names a tar archive rather than a bare `.gz` file.
    fn is_tarball(source: &Path) -> bool {
        let name = source
            .file_name()
            .map(|name| name.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        name.ends_with(".tgz") || name.contains(".tar")
    }

    /// Split a directory source into the `-C` working directory and the
    /// name stored in the archive.
    fn split_dir(source: &Path) -> Result<(PathBuf, PathBuf)> {
        let name = source
            .file_name()
            .map(PathBuf::from)
            .ok_or_else(|| SqueezeError::SourceMissing(source.to_path_buf()))?;
        let parent = match source.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok((parent, name))
    }

    fn compress_dir(&self, source: &Path, target: &Path, level: u32) -> Result<()> {
        let (parent, name) = Self::split_dir(source)?;

        // tar -cf - -C <parent> <name> | <tool> -<level> > target
        // The -C strategy stores names relative to the directory's parent,
        // never absolute paths.
        let mut archiver = Command::new("tar");
        archiver.arg("-cf").arg("-").arg("-C").arg(parent).arg(name);

        let mut compressor = Command::new(self.compress_tool);
        compressor.arg(format!("-{}", clamp_level(level)));

        Pipeline::new(archiver, compressor).run_to_file(target)
    }

    fn compress_file(&self, source: &Path, target: &Path, level: u32) -> Result<()> {
        // <tool> -<level> -c <source> > target
        let mut compressor = Command::new(self.compress_tool);
        compressor
            .arg(format!("-{}", clamp_level(level)))
            .arg("-c")
            .arg(source);
        run_to_file(compressor, target)
    }

    fn decompress_tarball(&self, source: &Path, target: &Path, overwrite: bool) -> Result<()> {
        if target.is_file() && !overwrite {
            return Err(SqueezeError::TargetExists(target.to_path_buf()));
        }
        fs::create_dir_all(target)?;

        // Members carry one leading directory component from the -C
        // compression convention; discard it on the way out.
        let mut extractor = Command::new("tar");
        extractor
            .arg("-xf")
            .arg(source)
            .arg("--strip-components=1")
            .arg(format!("--use-compress-program={}", self.decompress_tool))
            .arg("-C")
            .arg(target);
        if !overwrite {
            // Per-entry skip: existing files stay untouched without
            // aborting the rest of the extraction.
            extractor.arg("--skip-old-files");
        }
        run(extractor)
    }

    fn decompress_file(&self, source: &Path, target: &Path, overwrite: bool) -> Result<()> {
        let target = if target.is_dir() {
            target.join(
                crate::naming::decompressed_path(source)
                    .file_name()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("member")),
            )
        } else {
            target.to_path_buf()
        };
        ensure_target_writable(&target, overwrite)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        // <detool> -c <source> > target
        let mut decompressor = Command::new(self.decompress_tool);
        decompressor.arg("-c").arg(source);
        run_to_file(decompressor, &target)
    }
}

impl Codec for PipedGzip {
    fn name(&self) -> &'static str {
        self.name
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["tgz", "gz"]
    }

    fn target_extension(&self, source_is_dir: bool) -> &'static str {
        if source_is_dir {
            "tgz"
        } else {
            "gz"
        }
    }

    fn is_available(&self) -> bool {
        which::which(self.compress_tool).is_ok() && which::which(self.decompress_tool).is_ok()
    }

    fn compress(&self, source: &Path, target: &Path, level: u32, overwrite: bool) -> Result<()> {
        ensure_source_exists(source)?;
        ensure_target_writable(target, overwrite)?;

        if source.is_dir() {
            self.compress_dir(source, target, level)
        } else {
            self.compress_file(source, target, level)
        }
    }

    fn decompress(&self, source: &Path, target: &Path, overwrite: bool) -> Result<()> {
        ensure_source_is_file(source)?;

        if Self::is_tarball(source) {
            self.decompress_tarball(source, target, overwrite)
        } else {
            self.decompress_file(source, target, overwrite)
        }
    }
}
