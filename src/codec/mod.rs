//! Compression method implementations
//!
//! This module defines the [`Codec`] trait, the uniform contract every
//! compression method implements, and the concrete methods shipped with the
//! crate: the native in-process [`ZipCodec`] and the external
//! [`PipedGzip`] pipelines (`tar` piped through `gzip` or `pigz`).
//!
//! Codecs are stateless: every call is an independent transaction against
//! the filesystem, and instances are shared as `&'static` references by the
//! registry.

mod gzip;
mod pipeline;
mod zip;

pub use gzip::{PipedGzip, GZIP, PIGZ};
pub use pipeline::Pipeline;
pub use zip::{ZipCodec, ZIP};

use crate::common::{Result, SqueezeError};
use crate::naming;
use std::path::{Path, PathBuf};

/// The uniform contract implemented by every compression method.
///
/// A codec compresses a single file or a whole directory into one artifact
/// and can reverse the transformation. Directory archives store paths
/// relative to the directory being archived, never absolute paths or the
/// directory's parent.
pub trait Codec: Send + Sync {
    /// Short human-readable name of this method (`"zip"`, `"gzip"`, ...).
    fn name(&self) -> &'static str;

    /// Extensions this method claims in the registry, without leading dots.
    fn extensions(&self) -> &'static [&'static str];

    /// The extension used when deriving an output name for `source`.
    ///
    /// Directory sources may use a different extension than plain files
    /// (a directory compresses to `.tgz`, a file to `.gz`).
    fn target_extension(&self, source_is_dir: bool) -> &'static str;

    /// Whether this method can run on the host right now.
    ///
    /// Cheap and side-effect free; the selection engine calls this on every
    /// resolution so tool availability is never cached.
    fn is_available(&self) -> bool;

    /// Compress `source` (file or directory) into the single artifact
    /// `target`.
    ///
    /// Fails with [`SqueezeError::TargetExists`] when `target` exists and
    /// `overwrite` is false, without touching `target`.
    fn compress(&self, source: &Path, target: &Path, level: u32, overwrite: bool) -> Result<()>;

    /// Decompress the artifact `source` into `target`.
    ///
    /// An archive holding exactly one file may treat `target` as a file
    /// path (an existing directory target receives the file under its own
    /// name). Archives with multiple entries treat `target` as a directory,
    /// creating it when absent; existing files are skipped per entry when
    /// `overwrite` is false.
    fn decompress(&self, source: &Path, target: &Path, overwrite: bool) -> Result<()>;

    /// Derive the default output path for compressing `source`.
    ///
    /// Only a live regular file gets the file-style extension; anything
    /// else (directories, not-yet-existing paths) derives the archive
    /// extension.
    fn output_path(&self, source: &Path) -> PathBuf {
        naming::output_path(source, self.target_extension(!source.is_file()))
    }

    /// Derive the default output file name for compressing `source`.
    fn output_name(&self, source: &Path) -> String {
        self.output_path(source)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for dyn Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec").field("name", &self.name()).finish()
    }
}

/// Fail with [`SqueezeError::SourceMissing`] when `source` does not exist.
pub(crate) fn ensure_source_exists(source: &Path) -> Result<()> {
    if source.exists() {
        Ok(())
    } else {
        Err(SqueezeError::SourceMissing(source.to_path_buf()))
    }
}

/// Fail with [`SqueezeError::SourceNotFile`] unless `source` is a regular
/// file. Used by decompression, which only accepts archive files.
pub(crate) fn ensure_source_is_file(source: &Path) -> Result<()> {
    ensure_source_exists(source)?;
    if source.is_file() {
        Ok(())
    } else {
        Err(SqueezeError::SourceNotFile(source.to_path_buf()))
    }
}

/// The shared overwrite guard: fail with [`SqueezeError::TargetExists`]
/// when `target` exists and overwriting was not permitted.
pub(crate) fn ensure_target_writable(target: &Path, overwrite: bool) -> Result<()> {
    if target.exists() && !overwrite {
        Err(SqueezeError::TargetExists(target.to_path_buf()))
    } else {
        Ok(())
    }
}
