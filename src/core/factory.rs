//! Registration metadata and construction for the expiry authenticator.
//!
//! Hosts discover the step by its provider id, render its configuration
//! form from [`CONFIG_PROPERTIES`], and build one authenticator per attempt
//! with [`AuthenticatorFactory::create`].

use std::collections::BTreeMap;

use serde::Serialize;

use super::authenticator::PasswordExpiryAuthenticator;
use super::clock::Clock;
use super::config::{CFG_ATTR, CFG_WARN_DAYS, DEFAULT_ATTRIBUTE, ExpiryCheckConfig};

/// Provider id under which the step is registered.
pub const PROVIDER_ID: &str = "idm-password-expiry-check";

const DISPLAY_TYPE: &str = "Password Expiry Check (IdM/LDAP)";
const REFERENCE_CATEGORY: &str = "password-expiry";
const HELP_TEXT: &str =
    "Reads krbPasswordExpiration from a user attribute and triggers UPDATE_PASSWORD if within threshold.";

/// Input widget type of a configuration property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PropertyType {
    String,
}

/// One entry of the configuration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigProperty {
    pub name: &'static str,
    pub label: &'static str,
    pub help_text: &'static str,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub default_value: &'static str,
}

/// The configuration form of the step.
pub const CONFIG_PROPERTIES: [ConfigProperty; 2] = [
    ConfigProperty {
        name: CFG_ATTR,
        label: "User attribute name",
        help_text: "User attribute containing krbPasswordExpiration (GeneralizedTime, e.g. 20250904000000Z).",
        property_type: PropertyType::String,
        default_value: DEFAULT_ATTRIBUTE,
    },
    ConfigProperty {
        name: CFG_WARN_DAYS,
        label: "Warn/force threshold (days)",
        help_text: "If password expires in N days or less, force UPDATE_PASSWORD.",
        property_type: PropertyType::String,
        default_value: "7",
    },
];

/// How the step may be placed in a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Requirement {
    Required,
    Alternative,
    Disabled,
}

impl Requirement {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "REQUIRED",
            Self::Alternative => "ALTERNATIVE",
            Self::Disabled => "DISABLED",
        }
    }
}

const REQUIREMENT_CHOICES: [Requirement; 3] = [
    Requirement::Required,
    Requirement::Alternative,
    Requirement::Disabled,
];

/// Serializable summary of everything the factory advertises.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactoryDescriptor {
    pub id: &'static str,
    pub display_type: &'static str,
    pub reference_category: &'static str,
    pub help_text: &'static str,
    pub configurable: bool,
    pub user_setup_allowed: bool,
    pub requirement_choices: &'static [Requirement],
    pub config_properties: &'static [ConfigProperty],
}

/// Stateless factory for [`PasswordExpiryAuthenticator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthenticatorFactory;

impl AuthenticatorFactory {
    pub fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    pub fn display_type(&self) -> &'static str {
        DISPLAY_TYPE
    }

    pub fn reference_category(&self) -> &'static str {
        REFERENCE_CATEGORY
    }

    pub fn help_text(&self) -> &'static str {
        HELP_TEXT
    }

    pub fn is_configurable(&self) -> bool {
        true
    }

    pub fn is_user_setup_allowed(&self) -> bool {
        false
    }

    pub fn config_properties(&self) -> &'static [ConfigProperty] {
        &CONFIG_PROPERTIES
    }

    pub fn requirement_choices(&self) -> &'static [Requirement] {
        &REQUIREMENT_CHOICES
    }

    /// Build an authenticator from the host's property map.
    pub fn create<C: Clock>(
        &self,
        properties: &BTreeMap<String, String>,
        clock: C,
    ) -> PasswordExpiryAuthenticator<C> {
        let config = ExpiryCheckConfig::from_properties(properties);
        tracing::debug!(
            provider = PROVIDER_ID,
            attribute = %config.attribute_name,
            warn_days = config.warn_threshold_days,
            "creating password expiry authenticator"
        );
        PasswordExpiryAuthenticator::new(config, clock)
    }

    pub fn descriptor(&self) -> FactoryDescriptor {
        FactoryDescriptor {
            id: self.id(),
            display_type: self.display_type(),
            reference_category: self.reference_category(),
            help_text: self.help_text(),
            configurable: self.is_configurable(),
            user_setup_allowed: self.is_user_setup_allowed(),
            requirement_choices: self.requirement_choices(),
            config_properties: self.config_properties(),
        }
    }
}
