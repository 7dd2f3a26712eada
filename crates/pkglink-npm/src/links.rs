//! Dependency link resolution for a whole manifest.

use crate::homepage::HomepageResolver;
use crate::parser::parse_package_json;
use crate::scope::ScopeLinkMap;
use futures::future::join_all;
use pkglink_core::{FileSystem, LineOffsetTable, LinkRecord, Result};
use std::path::Path;

/// Produces one [`LinkRecord`] per unique dependency of a package.json.
///
/// Homepages for all dependencies are resolved concurrently. The returned
/// records follow map-union order (`dependencies` first, then new
/// `devDependencies`), and their count always equals the number of unique
/// dependency names.
///
/// # Errors
///
/// Returns an error if:
/// - `content` is not valid JSON or its top-level value is not an object
/// - `manifest_path` has no parent directory
///
/// Individual homepage lookups never fail the whole pass.
///
/// # Examples
///
/// ```
/// use pkglink_core::MemoryFileSystem;
/// use pkglink_npm::links::resolve_links;
/// use pkglink_npm::scope::ScopeLinkMap;
/// use std::path::Path;
///
/// # #[tokio::main]
/// # async fn main() -> pkglink_core::Result<()> {
/// let content = r#"{"dependencies": {"lodash": "^4.0.0"}}"#;
/// let links = resolve_links(
///     &MemoryFileSystem::new(),
///     &ScopeLinkMap::new(),
///     Path::new("/app/package.json"),
///     content,
/// )
/// .await?;
///
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].url, "https://www.npmjs.com/package/lodash");
/// # Ok(())
/// # }
/// ```
pub async fn resolve_links(
    fs: &dyn FileSystem,
    scopes: &ScopeLinkMap,
    manifest_path: &Path,
    content: &str,
) -> Result<Vec<LinkRecord>> {
    let dependencies = parse_package_json(content)?;
    let resolver = HomepageResolver::for_manifest(fs, scopes, manifest_path)?;

    let keys = dependencies.unique();
    if keys.is_empty() {
        return Ok(Vec::new());
    }

    tracing::debug!(
        "resolving {} homepages under {}",
        keys.len(),
        resolver.node_modules().display()
    );

    let homepages = join_all(keys.iter().map(|key| resolver.resolve(&key.name))).await;

    let line_table = LineOffsetTable::new(content);
    let links = keys
        .into_iter()
        .zip(homepages)
        .map(|(key, url)| LinkRecord {
            name: key.name.clone(),
            range: line_table.range_from_span(content, key.span.clone()),
            url,
        })
        .collect();

    Ok(links)
}
