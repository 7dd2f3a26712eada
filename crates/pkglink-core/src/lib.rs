//! Core abstractions for pkglink.
//!
//! This crate provides the pieces shared by the manifest-specific resolver and
//! the language server:
//!
//! - **Errors**: [`PkgLinkError`] and the [`Result`] alias
//! - **Filesystem seam**: [`FileSystem`] with local and in-memory implementations
//! - **Positions**: [`LineOffsetTable`] for byte offset to LSP position mapping
//! - **Output**: [`LinkRecord`], one per linked dependency

pub mod error;
pub mod fs;
pub mod link;
pub mod position;

// Re-export commonly used types
pub use error::{PkgLinkError, Result};
pub use fs::{FileSystem, LocalFileSystem, MemoryFileSystem};
pub use link::LinkRecord;
pub use position::LineOffsetTable;
