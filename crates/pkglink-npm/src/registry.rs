//! npm registry URLs.
//!
//! No requests are made to the registry; the package page URL is only used as
//! a link target when no better homepage is known.

/// Base URL for package pages on npmjs.com.
pub const NPMJS_URL: &str = "https://www.npmjs.com/package/";

/// Returns the URL for a package's page on npmjs.com.
///
/// The name is appended verbatim so scoped packages keep their readable
/// `@scope/name` form, which npmjs.com serves directly.
///
/// # Examples
///
/// ```
/// use pkglink_npm::registry::package_url;
///
/// assert_eq!(package_url("lodash"), "https://www.npmjs.com/package/lodash");
/// assert_eq!(package_url("@types/node"), "https://www.npmjs.com/package/@types/node");
/// ```
pub fn package_url(name: &str) -> String {
    format!("{}{}", NPMJS_URL, name)
}
