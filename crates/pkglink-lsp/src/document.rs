//! Open document storage.
//!
//! The server keeps the latest full text of every open document. Requests for
//! documents the client never opened (e.g. after a server restart) fall back
//! to reading the file from disk.

use dashmap::DashMap;
use pkglink_core::{FileSystem, PkgLinkError, Result};
use tower_lsp_server::ls_types::Uri;

/// Manifest file name served by pkglink.
pub const MANIFEST_FILE: &str = "package.json";

/// Returns `true` for `file://` URIs naming a package.json.
pub fn is_package_json(uri: &Uri) -> bool {
    uri.to_file_path()
        .is_some_and(|path| path.file_name().is_some_and(|name| name == MANIFEST_FILE))
}

/// Latest text of each open document, keyed by URI.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Uri, String>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores or replaces the text of a document.
    pub fn update(&self, uri: Uri, text: String) {
        self.documents.insert(uri, text);
    }

    pub fn remove(&self, uri: &Uri) {
        self.documents.remove(uri);
    }

    /// Returns a copy of the stored text.
    pub fn get(&self, uri: &Uri) -> Option<String> {
        self.documents.get(uri).map(|doc| doc.value().clone())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Returns the stored text, or reads the document from disk if it is not
    /// open.
    ///
    /// # Errors
    ///
    /// - `PkgLinkError::InvalidUri` - URI is not a file:// URI
    /// - `PkgLinkError::Io` - File read error (not found, permission denied, etc.)
    pub async fn load(&self, fs: &dyn FileSystem, uri: &Uri) -> Result<String> {
        if let Some(text) = self.get(uri) {
            return Ok(text);
        }

        let path = uri
            .to_file_path()
            .ok_or_else(|| PkgLinkError::InvalidUri(format!("{:?}", uri)))?;

        tracing::debug!("loading unopened document from disk: {}", path.display());
        fs.read_to_string(&path).await
    }
}
