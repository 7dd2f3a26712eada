//! Document link handler for package.json dependencies.

use crate::document::{DocumentStore, is_package_json};
use pkglink_core::{FileSystem, LinkRecord, PkgLinkError, Result};
use pkglink_npm::{ScopeLinkMap, resolve_links};
use std::str::FromStr;
use tower_lsp_server::ls_types::{DocumentLink, Uri};

/// Builds the `textDocument/documentLink` response for `uri`.
///
/// Returns `Ok(None)` for documents that are not a `file://` package.json.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded or its content is not a
/// valid package.json. No partial results are produced in that case.
pub async fn handle_document_links(
    fs: &dyn FileSystem,
    documents: &DocumentStore,
    scopes: &ScopeLinkMap,
    uri: &Uri,
) -> Result<Option<Vec<DocumentLink>>> {
    if !is_package_json(uri) {
        tracing::debug!("not a package.json, skipping links: {:?}", uri);
        return Ok(None);
    }

    let path = uri
        .to_file_path()
        .ok_or_else(|| PkgLinkError::InvalidUri(format!("{:?}", uri)))?;
    let content = documents.load(fs, uri).await?;

    let records = resolve_links(fs, scopes, &path, &content).await?;
    tracing::debug!("resolved {} dependency links for {:?}", records.len(), uri);

    Ok(Some(records.into_iter().map(to_document_link).collect()))
}

/// Converts a resolved record into an LSP link.
///
/// A URL that is not a valid URI keeps its range but gets no target.
fn to_document_link(record: LinkRecord) -> DocumentLink {
    let target = match Uri::from_str(&record.url) {
        Ok(target) => Some(target),
        Err(e) => {
            tracing::warn!("invalid homepage URL for {}: {} ({})", record.name, record.url, e);
            None
        }
    };

    DocumentLink {
        range: record.range,
        target,
        tooltip: Some(format!("Open homepage of {}", record.name)),
        data: None,
    }
}
