//! Core password-expiry logic.
//!
//! This module contains the domain logic separated from CLI concerns.
//! All types and functions here are testable without the CLI layer.

pub mod authenticator;
pub mod clock;
pub mod config;
pub mod factory;
pub mod generalized_time;
pub mod identity;
pub mod policy;
pub mod time_travel;
