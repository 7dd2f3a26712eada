use pkglink_npm::ScopeLinkMap;
use serde::Deserialize;
use serde_json::Value;

/// Configuration section name used by clients for pkglink settings.
pub const CONFIG_SECTION: &str = "node-package-links";

/// Root configuration for the pkglink server.
///
/// Provided by the LSP client via initialization options, workspace settings
/// notifications, or pulled per request with `workspace/configuration`.
///
/// # Examples
///
/// ```
/// use pkglink_lsp::config::LinksConfig;
///
/// let json = r#"{
///     "scopeLinkMap": {
///         "@myorg": "https://npm.myorg.example/package/"
///     }
/// }"#;
///
/// let config: LinksConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(
///     config.scope_link_map.default_url("@myorg/ui"),
///     "https://npm.myorg.example/package/@myorg/ui"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinksConfig {
    #[serde(default)]
    pub scope_link_map: ScopeLinkMap,
}

impl LinksConfig {
    /// Builds the configuration from a client settings value.
    ///
    /// Accepts either the section contents (`{"scopeLinkMap": {...}}`) or an
    /// object wrapping them under [`CONFIG_SECTION`]. `null` yields the
    /// default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings do not match the expected shape, e.g.
    /// a non-string URL prefix.
    pub fn from_settings(settings: Value) -> serde_json::Result<Self> {
        let section = match settings {
            Value::Object(mut map) if map.contains_key(CONFIG_SECTION) => {
                map.remove(CONFIG_SECTION).unwrap_or_default()
            }
            other => other,
        };

        if section.is_null() {
            return Ok(Self::default());
        }

        serde_json::from_value(section)
    }
}

/// Returns `true` if `settings` holds no value for the pkglink section.
///
/// Clients answer `workspace/configuration` for a section the user never set
/// with `null` or `{}`; such answers must not replace pushed settings.
pub fn settings_unset(settings: &Value) -> bool {
    match settings {
        Value::Null => true,
        Value::Object(map) => match map.get(CONFIG_SECTION) {
            Some(section) => settings_unset(section),
            None => map.is_empty(),
        },
        _ => false,
    }
}
