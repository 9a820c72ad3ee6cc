//! Simulated "now" for expiry checks.
//!
//! Parses time expressions (relative like "+7d" or absolute like RFC 3339)
//! so an expiry attribute can be evaluated as of a different moment.

use chrono::DateTime;

use super::generalized_time::{Instant, parse_generalized_time};
use crate::error::PwExpiryError;

/// A parsed time target for time-travel evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeTarget {
    /// The resolved absolute instant.
    pub instant: Instant,
    /// The original expression provided by the user.
    pub expression: String,
}

/// Parse a time-travel expression into an absolute instant.
///
/// Supports the following formats:
/// - Relative to `base`: `+7d`, `-1h`, `+30m`, `+2w`, `+1y`, `-5s`
/// - Absolute RFC 3339: `2025-09-02T00:00:00Z`
/// - Absolute GeneralizedTime: `20250902000000Z`
/// - Absolute Unix epoch: `1756771200`
///
/// # Errors
///
/// Returns an error if the expression doesn't match any known format.
pub fn parse_time_expression(expression: &str, base: Instant) -> Result<TimeTarget, PwExpiryError> {
    let trimmed = expression.trim();
    let invalid = |reason: &str| PwExpiryError::InvalidTimeExpression {
        expression: expression.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid("expression is empty"));
    }

    let instant = if let Some(rest) = trimmed.strip_prefix('+') {
        let offset = parse_relative(rest).map_err(|r| invalid(&r))?;
        shift(base, offset).ok_or_else(|| invalid("offset is out of range"))?
    } else if let Some(rest) = trimmed.strip_prefix('-') {
        let offset = parse_relative(rest).map_err(|r| invalid(&r))?;
        shift(base, -offset).ok_or_else(|| invalid("offset is out of range"))?
    } else if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let seconds = trimmed
            .parse::<i64>()
            .map_err(|_| invalid("epoch seconds are out of range"))?;
        Instant::from_epoch_seconds(seconds)
    } else if let Some(instant) = parse_generalized_time(trimmed) {
        instant
    } else {
        let datetime = DateTime::parse_from_rfc3339(trimmed)
            .map_err(|_| invalid("expected a relative offset, RFC 3339, GeneralizedTime, or epoch seconds"))?;
        Instant::from_epoch_seconds(datetime.timestamp())
    };

    Ok(TimeTarget {
        instant,
        expression: expression.to_string(),
    })
}

/// Parse `<amount><unit>` into a number of seconds.
fn parse_relative(spec: &str) -> Result<i64, String> {
    let unit_at = spec
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| "missing unit (use s, m, h, d, w or y)".to_string())?;
    let (amount, unit) = spec.split_at(unit_at);

    if amount.is_empty() {
        return Err("missing amount".to_string());
    }
    let amount: i64 = amount
        .parse()
        .map_err(|_| "amount is out of range".to_string())?;

    let unit_seconds = match unit {
        "s" => 1,
        "m" => 60,
        "h" => 3_600,
        "d" => 86_400,
        "w" => 7 * 86_400,
        "y" => 365 * 86_400,
        other => return Err(format!("unknown unit '{other}'")),
    };

    amount
        .checked_mul(unit_seconds)
        .ok_or_else(|| "amount is out of range".to_string())
}

fn shift(base: Instant, seconds: i64) -> Option<Instant> {
    base.epoch_seconds()
        .checked_add(seconds)
        .map(Instant::from_epoch_seconds)
}
