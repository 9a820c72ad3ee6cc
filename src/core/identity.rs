//! Identity and authentication-session collaborators.
//!
//! The expiry check only needs a narrow slice of the host identity runtime:
//! reading one attribute, flagging a required action, and attaching a note
//! to the current authentication attempt. Those seams are traits here, with
//! JSON-backed in-memory implementations used by the CLI and tests.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// A mandatory step an identity must complete before further use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequiredAction {
    VerifyEmail,
    UpdateProfile,
    ConfigureTotp,
    UpdatePassword,
    TermsAndConditions,
}

impl RequiredAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VerifyEmail => "VERIFY_EMAIL",
            Self::UpdateProfile => "UPDATE_PROFILE",
            Self::ConfigureTotp => "CONFIGURE_TOTP",
            Self::UpdatePassword => "UPDATE_PASSWORD",
            Self::TermsAndConditions => "TERMS_AND_CONDITIONS",
        }
    }
}

impl fmt::Display for RequiredAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The identity bound to an authentication attempt.
pub trait Identity {
    /// Login name, for log context.
    fn username(&self) -> &str;

    /// First value of a (possibly multi-valued) attribute.
    fn first_attribute(&self, name: &str) -> Option<&str>;

    /// Add a required action. Adding one that is already present is a no-op.
    fn add_required_action(&mut self, action: RequiredAction);

    fn has_required_action(&self, action: RequiredAction) -> bool;
}

/// Notes attached to the current authentication attempt.
pub trait AuthNotes {
    fn set_auth_note(&mut self, key: &str, value: String);

    fn auth_note(&self, key: &str) -> Option<&str>;
}

/// A user record as exported from the identity store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub required_actions: BTreeSet<RequiredAction>,
}

impl UserRecord {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Builder-style attribute setter, replacing any previous values.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), vec![value.into()]);
        self
    }
}

impl Identity for UserRecord {
    fn username(&self) -> &str {
        &self.username
    }

    fn first_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    fn add_required_action(&mut self, action: RequiredAction) {
        self.required_actions.insert(action);
    }

    fn has_required_action(&self, action: RequiredAction) -> bool {
        self.required_actions.contains(&action)
    }
}

/// In-memory state of one authentication attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthenticationSession {
    notes: BTreeMap<String, String>,
}

impl AuthenticationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notes(&self) -> &BTreeMap<String, String> {
        &self.notes
    }
}

impl AuthNotes for AuthenticationSession {
    fn set_auth_note(&mut self, key: &str, value: String) {
        self.notes.insert(key.to_string(), value);
    }

    fn auth_note(&self, key: &str) -> Option<&str> {
        self.notes.get(key).map(String::as_str)
    }
}
