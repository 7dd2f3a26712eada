use std::collections::{HashMap, HashSet};
use std::ops::Range as ByteSpan;

/// Section in package.json where a dependency is declared.
///
/// Only the two sections that produce homepage links are recognized:
/// - `dependencies`: Production dependencies
/// - `devDependencies`: Development-only dependencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NpmDependencySection {
    /// Production dependencies (`dependencies`)
    Dependencies,
    /// Development dependencies (`devDependencies`)
    DevDependencies,
}

impl NpmDependencySection {
    /// Maps a top-level package.json key to its section.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "dependencies" => Some(Self::Dependencies),
            "devDependencies" => Some(Self::DevDependencies),
            _ => None,
        }
    }

    /// The package.json key for this section.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Dependencies => "dependencies",
            Self::DevDependencies => "devDependencies",
        }
    }
}

/// A dependency key as it appears in the manifest source.
///
/// `span` is the byte range of the raw key text between its quotes. For keys
/// containing escape sequences the span covers the escaped source text while
/// `name` holds the decoded value.
///
/// # Examples
///
/// ```
/// use pkglink_npm::types::{NpmDependencyKey, NpmDependencySection};
///
/// let key = NpmDependencyKey {
///     name: "express".into(),
///     section: NpmDependencySection::Dependencies,
///     span: 21..28,
/// };
///
/// assert_eq!(key.span.len(), key.name.len());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpmDependencyKey {
    pub name: String,
    pub section: NpmDependencySection,
    pub span: ByteSpan<usize>,
}

/// All dependency keys found in a package.json, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDependencies {
    pub keys: Vec<NpmDependencyKey>,
}

impl ManifestDependencies {
    /// Returns the unique dependency keys in map-union order.
    ///
    /// Every `dependencies` key comes first in declaration order, followed by
    /// the `devDependencies` keys that were not already seen. A name declared
    /// in both sections appears once and keeps the span of its first
    /// occurrence in the document.
    pub fn unique(&self) -> Vec<&NpmDependencyKey> {
        let mut earliest: HashMap<&str, &NpmDependencyKey> =
            HashMap::with_capacity(self.keys.len());
        for key in &self.keys {
            earliest
                .entry(key.name.as_str())
                .and_modify(|first| {
                    if key.span.start < first.span.start {
                        *first = key;
                    }
                })
                .or_insert(key);
        }

        let mut seen = HashSet::with_capacity(earliest.len());
        let mut result = Vec::with_capacity(earliest.len());

        for section in [
            NpmDependencySection::Dependencies,
            NpmDependencySection::DevDependencies,
        ] {
            for key in self.keys.iter().filter(|k| k.section == section) {
                let name = key.name.as_str();
                if seen.insert(name) {
                    result.push(earliest.get(name).copied().unwrap_or(key));
                }
            }
        }

        result
    }

    /// Returns the unique dependency names in map-union order.
    pub fn names(&self) -> Vec<&str> {
        self.unique().into_iter().map(|k| k.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
