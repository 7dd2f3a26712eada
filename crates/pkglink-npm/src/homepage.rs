//! Homepage resolution from installed packages.
//!
//! A dependency's homepage is read from its own `package.json` inside the
//! `node_modules` directory next to the manifest. Anything that prevents that
//! (package not installed, unreadable directory, malformed manifest, missing
//! `homepage` field) falls back to the scope link map or the npmjs.com page.

use crate::scope::{PackageName, ScopeLinkMap};
use pkglink_core::{FileSystem, PkgLinkError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the installed packages directory.
pub const NODE_MODULES: &str = "node_modules";

/// Fields read from an installed package's own manifest.
#[derive(Debug, Deserialize)]
struct InstalledManifest {
    homepage: Option<serde_json::Value>,
}

/// Resolves homepage URLs for the dependencies of one manifest.
///
/// The resolver only borrows its collaborators; it is built per resolution
/// pass so configuration changes are picked up on the next request.
///
/// # Examples
///
/// ```
/// use pkglink_core::MemoryFileSystem;
/// use pkglink_npm::homepage::HomepageResolver;
/// use pkglink_npm::scope::ScopeLinkMap;
/// use std::path::Path;
///
/// # #[tokio::main]
/// # async fn main() -> pkglink_core::Result<()> {
/// let fs = MemoryFileSystem::new().with_file(
///     "/app/node_modules/express/package.json",
///     r#"{"homepage": "http://expressjs.com/"}"#,
/// );
/// let scopes = ScopeLinkMap::new();
/// let resolver = HomepageResolver::for_manifest(&fs, &scopes, Path::new("/app/package.json"))?;
///
/// assert_eq!(resolver.resolve("express").await, "http://expressjs.com/");
/// assert_eq!(resolver.resolve("koa").await, "https://www.npmjs.com/package/koa");
/// # Ok(())
/// # }
/// ```
pub struct HomepageResolver<'a> {
    fs: &'a dyn FileSystem,
    scopes: &'a ScopeLinkMap,
    node_modules: PathBuf,
}

impl<'a> HomepageResolver<'a> {
    /// Creates a resolver for the manifest at `manifest_path`.
    ///
    /// # Errors
    ///
    /// Returns [`PkgLinkError::InvalidManifestPath`] if the manifest has no
    /// parent directory to look for `node_modules` in.
    pub fn for_manifest(
        fs: &'a dyn FileSystem,
        scopes: &'a ScopeLinkMap,
        manifest_path: &Path,
    ) -> Result<Self> {
        let dir = manifest_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .ok_or_else(|| PkgLinkError::InvalidManifestPath(manifest_path.to_path_buf()))?;

        Ok(Self {
            fs,
            scopes,
            node_modules: dir.join(NODE_MODULES),
        })
    }

    pub fn node_modules(&self) -> &Path {
        &self.node_modules
    }

    /// Resolves the homepage for `name`.
    ///
    /// Never fails: every lookup miss degrades to
    /// [`ScopeLinkMap::default_url`].
    pub async fn resolve(&self, name: &str) -> String {
        match self.installed_homepage(name).await {
            Some(homepage) => homepage,
            None => self.scopes.default_url(name),
        }
    }

    /// Looks up the homepage declared by the installed copy of `name`.
    async fn installed_homepage(&self, name: &str) -> Option<String> {
        let package = PackageName::parse(name);
        let entries = self.list_entries(&self.node_modules).await;

        let package_dir = match package.scope {
            Some(scope) => {
                if !entries.iter().any(|e| e == scope) {
                    tracing::trace!("scope {} not installed", scope);
                    return None;
                }
                let scope_dir = self.node_modules.join(scope);
                let scoped_entries = self.list_entries(&scope_dir).await;
                if package.bare.is_empty() || !scoped_entries.iter().any(|e| e == package.bare) {
                    tracing::trace!("package {} not installed", name);
                    return None;
                }
                scope_dir.join(package.bare)
            }
            None => {
                if !entries.iter().any(|e| e == name) {
                    tracing::trace!("package {} not installed", name);
                    return None;
                }
                self.node_modules.join(name)
            }
        };

        self.read_homepage(&package_dir).await
    }

    /// Lists `dir`, treating any failure as an empty directory.
    async fn list_entries(&self, dir: &Path) -> Vec<String> {
        match self.fs.read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!("cannot list {}: {}", dir.display(), e);
                Vec::new()
            }
        }
    }

    /// Reads the `homepage` field of `<package_dir>/package.json`.
    async fn read_homepage(&self, package_dir: &Path) -> Option<String> {
        let manifest_path = package_dir.join("package.json");

        let content = match self.fs.read_to_string(&manifest_path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("cannot read {}: {}", manifest_path.display(), e);
                return None;
            }
        };

        let manifest = match serde_json::from_str::<InstalledManifest>(&content) {
            Ok(manifest) => manifest,
            Err(e) => {
                tracing::warn!("malformed {}: {}", manifest_path.display(), e);
                return None;
            }
        };

        match manifest.homepage {
            Some(serde_json::Value::String(homepage)) if !homepage.is_empty() => Some(homepage),
            Some(serde_json::Value::String(_)) | None => None,
            Some(other) => {
                tracing::debug!(
                    "ignoring non-string homepage in {}: {}",
                    manifest_path.display(),
                    other
                );
                None
            }
        }
    }
}
