//! Shared test fixtures and helper utilities.
//!
//! Provides expiration values and user records with known timing relative
//! to a pinned "now", for use in CLI integration tests.
#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

/// The pinned evaluation time used across tests.
pub const NOW: &str = "2025-09-02T00:00:00Z";

/// Expires two days after [`NOW`].
pub const EXPIRES_IN_TWO_DAYS: &str = "20250904000000Z";

/// Expires exactly seven days after [`NOW`].
pub const EXPIRES_IN_SEVEN_DAYS: &str = "20250909000000Z";

/// Expires seven days and one second after [`NOW`].
pub const EXPIRES_JUST_OUTSIDE_WINDOW: &str = "20250909000001Z";

/// Expired well before [`NOW`].
pub const ALREADY_EXPIRED: &str = "20250801000000Z";

/// Two days after [`NOW`], written with a +05:30 offset.
pub const EXPIRES_IN_TWO_DAYS_WITH_OFFSET: &str = "20250904053000+0530";

/// A value in no recognized encoding.
pub const NOT_A_TIMESTAMP: &str = "not-a-timestamp";

/// A user record JSON document with the given expiration attribute.
pub fn user_json(attribute: &str, value: &str) -> String {
    serde_json::json!({
        "username": "alice",
        "attributes": { attribute: [value] },
        "requiredActions": []
    })
    .to_string()
}

/// Write `content` to a fresh temporary file.
pub fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}
