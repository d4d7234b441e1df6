//! Common types and constants for the compression engine
//!
//! This module defines the error taxonomy and the handful of shared
//! constants used by the registry, the selection engine and the individual
//! compression methods.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Compression level used when the caller does not specify one.
///
/// Levels follow the gzip convention: 1 is fastest, 9 is smallest.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 5;

/// Lowest compression level accepted by the supported backends.
pub const MIN_COMPRESSION_LEVEL: u32 = 1;

/// Highest compression level accepted by the supported backends.
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

/// Clamp a caller-supplied level into the 1-9 range shared by deflate and
/// the gzip family of tools.
pub fn clamp_level(level: u32) -> u32 {
    level.clamp(MIN_COMPRESSION_LEVEL, MAX_COMPRESSION_LEVEL)
}

/// Error type for compression and decompression operations
#[derive(Debug, Error)]
pub enum SqueezeError {
    /// No registered compression method is available on this host
    #[error("no compression method is available")]
    NoMethod,

    /// No available compression method claims the requested extension
    #[error("no compression method is available for extension '{0}'")]
    NoMethodForExtension(String),

    /// The target path already exists and overwriting was not permitted
    #[error("target '{0}' already exists and overwrite is disabled")]
    TargetExists(PathBuf),

    /// The source path does not exist
    #[error("source '{0}' does not exist")]
    SourceMissing(PathBuf),

    /// The source path exists but is not a regular file
    #[error("source '{0}' is not a regular file")]
    SourceNotFile(PathBuf),

    /// A required external tool could not be started
    #[error("external tool '{0}' could not be started (is it installed?)")]
    ToolMissing(String),

    /// An external tool ran but reported failure
    #[error("external tool '{tool}' failed with {status}")]
    ToolFailed {
        /// Name of the tool that failed
        tool: String,
        /// Exit status reported by the process
        status: ExitStatus,
    },

    /// Error reported by the native archive backend
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for compression operations
pub type Result<T> = std::result::Result<T, SqueezeError>;
