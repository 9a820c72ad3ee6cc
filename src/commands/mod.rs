//! Command handlers for each CLI subcommand.
//!
//! Each subcommand is implemented in its own module and exposes
//! a single `execute` function that receives the parsed arguments.
//! Input resolution shared between handlers lives here.

pub mod check;
pub mod describe;
pub mod evaluate;

use std::collections::BTreeMap;
use std::io::{IsTerminal, Read};

use pwexpiry::core::clock::{Clock, FixedClock, SystemClock};
use pwexpiry::core::time_travel::parse_time_expression;
use pwexpiry::error::PwExpiryError;

/// Upper bound on how much stdin is read for a single value.
const STDIN_MAX_BYTES: u64 = 64 * 1024;

/// Resolve the raw expiration value from an argument, env var, or stdin.
///
/// A blank value is returned as-is: it is a legitimate "no action" input,
/// not an error.
pub(crate) fn resolve_value(
    arg: Option<&str>,
    env_name: Option<&str>,
) -> Result<String, PwExpiryError> {
    if let Some(name) = env_name {
        validate_env_var_name(name)?;
        return std::env::var(name).map_err(|_| PwExpiryError::EnvVarNotFound {
            name: name.to_string(),
        });
    }

    if let Some(value) = arg {
        return Ok(value.to_string());
    }

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(PwExpiryError::NoValueProvided);
    }

    let mut buf = String::new();
    stdin
        .lock()
        .take(STDIN_MAX_BYTES + 1)
        .read_to_string(&mut buf)
        .map_err(|e| PwExpiryError::StdinReadError {
            reason: e.to_string(),
        })?;
    if buf.len() as u64 > STDIN_MAX_BYTES {
        return Err(PwExpiryError::StdinReadError {
            reason: format!("input exceeds maximum size of {STDIN_MAX_BYTES} bytes"),
        });
    }
    Ok(buf)
}

/// Reject names `std::env::var` cannot look up.
fn validate_env_var_name(name: &str) -> Result<(), PwExpiryError> {
    if name.is_empty() || name.contains('=') || name.contains('\0') {
        return Err(PwExpiryError::InvalidEnvVarName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Pin "now" for the whole command, honoring a `--now` override.
pub(crate) fn resolve_clock(now: Option<&str>) -> Result<FixedClock, PwExpiryError> {
    let wall = SystemClock.now();
    let instant = match now {
        Some(expression) => parse_time_expression(expression, wall)?.instant,
        None => wall,
    };
    Ok(FixedClock::new(instant))
}

/// Parse repeated `KEY=VALUE` arguments into a property map.
///
/// Later entries win. Values may be empty or contain `=`.
pub(crate) fn parse_properties(
    entries: &[String],
) -> Result<BTreeMap<String, String>, PwExpiryError> {
    entries
        .iter()
        .map(|entry| match entry.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => Err(PwExpiryError::InvalidProperty {
                entry: entry.clone(),
            }),
        })
        .collect()
}
