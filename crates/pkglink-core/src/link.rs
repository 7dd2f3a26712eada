use serde::Serialize;
use tower_lsp_server::ls_types::Range;

/// A dependency name paired with the URL it should link to.
///
/// One record is produced per unique dependency of a manifest. `range` covers
/// the dependency key text inside the manifest, excluding the quotes.
///
/// # Examples
///
/// ```
/// use pkglink_core::LinkRecord;
/// use tower_lsp_server::ls_types::{Position, Range};
///
/// let link = LinkRecord {
///     name: "lodash".into(),
///     range: Range::new(Position::new(2, 5), Position::new(2, 11)),
///     url: "https://www.npmjs.com/package/lodash".into(),
/// };
///
/// assert_eq!(link.range.end.character - link.range.start.character, 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRecord {
    pub name: String,
    pub range: Range,
    pub url: String,
}
