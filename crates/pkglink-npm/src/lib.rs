//! npm support for pkglink.
//!
//! This crate turns the dependency keys of a package.json into homepage
//! links:
//!
//! - [`parser`]: span-tracking extraction of `dependencies` / `devDependencies` keys
//! - [`scope`]: scoped package names and the user's scope link map
//! - [`homepage`]: homepage lookup in the sibling `node_modules` directory
//! - [`links`]: the end-to-end pass producing [`pkglink_core::LinkRecord`]s

pub mod homepage;
pub mod links;
pub mod parser;
pub mod registry;
pub mod scope;
pub mod types;

pub use homepage::HomepageResolver;
pub use links::resolve_links;
pub use parser::parse_package_json;
pub use registry::{NPMJS_URL, package_url};
pub use scope::{PackageName, ScopeLinkMap};
pub use types::{ManifestDependencies, NpmDependencyKey, NpmDependencySection};
