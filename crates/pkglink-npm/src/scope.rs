//! Package scopes and user-configured scope link prefixes.

use crate::registry::package_url;
use serde::Deserialize;
use std::collections::HashMap;

/// A dependency name split into its scope and bare name.
///
/// # Examples
///
/// ```
/// use pkglink_npm::scope::PackageName;
///
/// let scoped = PackageName::parse("@babel/core");
/// assert_eq!(scoped.scope, Some("@babel"));
/// assert_eq!(scoped.bare, "core");
///
/// let plain = PackageName::parse("lodash");
/// assert_eq!(plain.scope, None);
/// assert_eq!(plain.bare, "lodash");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageName<'a> {
    pub scope: Option<&'a str>,
    pub bare: &'a str,
}

impl<'a> PackageName<'a> {
    /// Splits `name` at the first `/` if it starts with `@`.
    ///
    /// A scope without a slash (`@scope`) yields an empty bare name.
    pub fn parse(name: &'a str) -> Self {
        if name.starts_with('@') {
            match name.split_once('/') {
                Some((scope, bare)) => Self {
                    scope: Some(scope),
                    bare,
                },
                None => Self {
                    scope: Some(name),
                    bare: "",
                },
            }
        } else {
            Self {
                scope: None,
                bare: name,
            }
        }
    }
}

/// User mapping from a name prefix (usually a scope such as `@myorg`) to the
/// URL prefix used for packages under it.
///
/// Lookups use longest-prefix match, with ties broken by key order, so the
/// result never depends on the iteration order of the configured map.
///
/// # Examples
///
/// ```
/// use pkglink_npm::scope::ScopeLinkMap;
///
/// let map: ScopeLinkMap = serde_json::from_str(
///     r#"{"@myorg": "https://git.example.com/", "@myorg/ui": "https://ui.example.com/"}"#,
/// ).unwrap();
///
/// assert_eq!(map.default_url("@myorg/api"), "https://git.example.com/@myorg/api");
/// assert_eq!(map.default_url("@myorg/ui-kit"), "https://ui.example.com/@myorg/ui-kit");
/// assert_eq!(map.default_url("react"), "https://www.npmjs.com/package/react");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ScopeLinkMap(HashMap<String, String>);

impl ScopeLinkMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, prefix: impl Into<String>, url: impl Into<String>) {
        self.0.insert(prefix.into(), url.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the configured `(prefix, url)` pair that best matches `name`.
    pub fn find(&self, name: &str) -> Option<(&str, &str)> {
        self.0
            .iter()
            .filter(|(prefix, _)| name.starts_with(prefix.as_str()))
            .max_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| b.cmp(a)))
            .map(|(prefix, url)| (prefix.as_str(), url.as_str()))
    }

    /// URL to use when no installed homepage is found for `name`.
    ///
    /// The configured URL prefix is concatenated with the full package name,
    /// falling back to the npmjs.com package page.
    pub fn default_url(&self, name: &str) -> String {
        match self.find(name) {
            Some((_, url)) => format!("{}{}", url, name),
            None => package_url(name),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ScopeLinkMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
