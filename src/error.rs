//! Domain error types for pwexpiry.
//!
//! Only CLI-boundary failures live here. The expiry decision engine has no
//! error type: malformed timestamps, missing attributes and bad threshold
//! configuration all resolve to "no action" or a default instead of failing.

use thiserror::Error;

/// Errors that can occur while gathering input for an expiry check.
#[derive(Debug, Error)]
pub enum PwExpiryError {
    /// No timestamp value was provided via any input method.
    #[error("no value provided: pass a timestamp as an argument, via --value-env, or through stdin")]
    NoValueProvided,

    /// The specified environment variable is not set.
    #[error("environment variable '{name}' is not set")]
    EnvVarNotFound {
        /// Name of the missing environment variable.
        name: String,
    },

    /// The environment variable name cannot be looked up.
    #[error("invalid environment variable name '{name}'")]
    InvalidEnvVarName {
        /// The rejected name.
        name: String,
    },

    /// Failed to read from stdin.
    #[error("failed to read stdin: {reason}")]
    StdinReadError {
        /// Description of the read failure.
        reason: String,
    },

    /// Failed to parse a `--now` expression.
    #[error("invalid time expression '{expression}': {reason}")]
    InvalidTimeExpression {
        /// The time expression that failed to parse.
        expression: String,
        /// Description of the parsing failure.
        reason: String,
    },

    /// A `--property` argument is not of the form `KEY=VALUE`.
    #[error("invalid property '{entry}': expected KEY=VALUE")]
    InvalidProperty {
        /// The rejected argument.
        entry: String,
    },

    /// Failed to read or write the identity record file.
    #[error("failed to access user file '{path}': {reason}")]
    UserFileError {
        /// Path to the user file.
        path: String,
        /// Description of the I/O failure.
        reason: String,
    },

    /// The identity record file is not valid JSON for a user record.
    #[error("failed to parse user file '{path}': {reason}")]
    UserFileParseError {
        /// Path to the user file.
        path: String,
        /// Description of the parsing failure.
        reason: String,
    },
}
