//! pwexpiry: decide whether a directory identity must change its password.
//!
//! Parses GeneralizedTime expiration attributes (for example
//! `krbPasswordExpiration` from FreeIPA/IdM), evaluates them against a
//! warning window, and flags `UPDATE_PASSWORD` on the identity when the
//! password is about to expire. Missing or malformed data never blocks a
//! login.

#![forbid(unsafe_code)]

pub mod core;
pub mod error;

pub use crate::core::authenticator::{
    AUTH_NOTE_KEY, Assessment, FlowOutcome, PasswordExpiryAuthenticator, SkipReason, StepResult,
};
pub use crate::core::clock::{Clock, FixedClock, SystemClock};
pub use crate::core::config::ExpiryCheckConfig;
pub use crate::core::factory::AuthenticatorFactory;
pub use crate::core::generalized_time::{Instant, parse_generalized_time};
pub use crate::core::policy::{ExpiryDecision, evaluate};
pub use crate::error::PwExpiryError;
