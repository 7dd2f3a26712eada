use std::path::PathBuf;
use thiserror::Error;

/// Core error types for pkglink.
///
/// Only failures that abort a whole link-resolution pass are represented here.
/// Per-dependency lookup misses never become errors; they degrade to the
/// fallback registry URL instead.
///
/// # Examples
///
/// ```
/// use pkglink_core::error::{PkgLinkError, Result};
///
/// fn parse_manifest(content: &str) -> Result<serde_json::Value> {
///     // JSON errors convert automatically
///     Ok(serde_json::from_str(content)?)
/// }
///
/// assert!(matches!(parse_manifest("{"), Err(PkgLinkError::Json(_))));
/// ```
#[derive(Error, Debug)]
pub enum PkgLinkError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid package.json structure: {0}")]
    InvalidStructure(String),

    #[error("cannot locate node_modules for manifest: {}", .0.display())]
    InvalidManifestPath(PathBuf),

    #[error("invalid URI: {0}")]
    InvalidUri(String),
}

/// Convenience type alias for `Result<T, PkgLinkError>`.
pub type Result<T> = std::result::Result<T, PkgLinkError>;
