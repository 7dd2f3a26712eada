//! LSP protocol handlers.
//!
//! - [`document_links`]: clickable dependency names in package.json
//!
//! Handlers are plain async functions over explicit collaborators (filesystem,
//! document store, configuration) so they can be exercised without a running
//! server. The server logs handler errors and degrades to an empty response.

pub mod document_links;
