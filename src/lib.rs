//! Squeeze - pick the best compression method the host offers
//!
//! This crate turns a file or directory into a single compressed artifact
//! and reverses the transformation later, without the caller needing to
//! know which compression tool is installed. Methods register themselves
//! with a priority and the extensions they claim; selection filters the
//! table by live tool availability and returns the highest-priority match.
//!
//! Three methods ship with the crate:
//!
//! - **zip** - native in-process archive, always available, the fallback
//! - **gzip** - `tar` piped through `gzip`/`gunzip`
//! - **pigz** - `tar` piped through `pigz`/`unpigz`, preferred over gzip
//!   when installed because it compresses in parallel
//!
//! # Example - best method available
//!
//! ```no_run
//! use std::path::Path;
//!
//! let method = squeeze::best().expect("zip is always registered");
//! let source = Path::new("/data/backup");
//! let target = method.output_path(source); // e.g. /data/backup.tgz
//! method.compress(source, &target, squeeze::DEFAULT_COMPRESSION_LEVEL, true)?;
//! # Ok::<(), squeeze::SqueezeError>(())
//! ```
//!
//! # Example - method for a specific extension
//!
//! ```no_run
//! use std::path::Path;
//!
//! if let Some(method) = squeeze::for_extension("gz") {
//!     method.decompress(Path::new("report.txt.gz"), Path::new("report.txt"), true)?;
//! }
//! # Ok::<(), squeeze::SqueezeError>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod codec;
pub mod common;
pub mod error;
pub mod naming;
pub mod registry;

// Re-export commonly used types
pub use codec::{Codec, Pipeline, PipedGzip, ZipCodec};
pub use common::{
    clamp_level, Result, SqueezeError, DEFAULT_COMPRESSION_LEVEL, MAX_COMPRESSION_LEVEL,
    MIN_COMPRESSION_LEVEL,
};
pub use registry::{best, for_extension, global, Registration, Registry};

// Convenience functions

use std::path::Path;

/// Compress `source` into `target` with the best method available.
///
/// # Arguments
/// * `source` - File or directory to compress
/// * `target` - Path for the compressed artifact
/// * `level` - Compression level (1-9)
/// * `overwrite` - Whether an existing `target` may be replaced
pub fn compress(source: &Path, target: &Path, level: u32, overwrite: bool) -> Result<()> {
    let method = best().ok_or(SqueezeError::NoMethod)?;
    method.compress(source, target, level, overwrite)
}

/// Decompress the artifact `source` into `target`, picking the method from
/// the source's final extension.
///
/// # Arguments
/// * `source` - Compressed artifact
/// * `target` - File or directory to decompress into
/// * `overwrite` - Whether existing targets may be replaced
pub fn decompress(source: &Path, target: &Path, overwrite: bool) -> Result<()> {
    let extension = source
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default();
    let method = for_extension(&extension)
        .ok_or_else(|| SqueezeError::NoMethodForExtension(extension.clone()))?;
    method.decompress(source, target, overwrite)
}
