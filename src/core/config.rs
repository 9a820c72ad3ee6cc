//! Typed configuration for the expiry check.
//!
//! The host hands over a loose `String -> String` property map. It is read
//! once, here, and invalid values fall back to their defaults instead of
//! failing the authentication flow.

use std::collections::BTreeMap;

use serde::Serialize;

/// Property key naming the attribute that holds the expiration timestamp.
pub const CFG_ATTR: &str = "userAttributeName";

/// Property key for the warning window in days.
pub const CFG_WARN_DAYS: &str = "warnThresholdDays";

/// Attribute read when none is configured.
pub const DEFAULT_ATTRIBUTE: &str = "krbPasswordExpiration";

/// Warning window used when none (or garbage) is configured.
pub const DEFAULT_WARN_DAYS: u32 = 7;

/// Validated expiry-check settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryCheckConfig {
    /// Name of the identity attribute carrying the GeneralizedTime value.
    pub attribute_name: String,
    /// Days before expiry at which a password update is forced.
    pub warn_threshold_days: u32,
}

impl Default for ExpiryCheckConfig {
    fn default() -> Self {
        Self {
            attribute_name: DEFAULT_ATTRIBUTE.to_string(),
            warn_threshold_days: DEFAULT_WARN_DAYS,
        }
    }
}

impl ExpiryCheckConfig {
    /// Build the configuration from host properties.
    ///
    /// A blank attribute name and a threshold that is not a non-negative
    /// integer both fall back to the defaults.
    pub fn from_properties(properties: &BTreeMap<String, String>) -> Self {
        let attribute_name = properties
            .get(CFG_ATTR)
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_ATTRIBUTE)
            .to_string();

        Self {
            attribute_name,
            warn_threshold_days: parse_warn_days(properties.get(CFG_WARN_DAYS).map(String::as_str)),
        }
    }
}

/// Parse a configured warning window, falling back to [`DEFAULT_WARN_DAYS`].
pub fn parse_warn_days(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return DEFAULT_WARN_DAYS;
    };
    match raw.parse::<u32>() {
        Ok(days) => days,
        Err(_) => {
            tracing::warn!(
                value = raw,
                default = DEFAULT_WARN_DAYS,
                "ignoring invalid {CFG_WARN_DAYS}"
            );
            DEFAULT_WARN_DAYS
        }
    }
}
