//! Expiry threshold policy.
//!
//! Turns an expiry instant, the current instant and a warning window into
//! an [`ExpiryDecision`]. The force-change comparison is made on the signed
//! second count; the whole-day figure is only used for the message.

use serde::Serialize;

use super::generalized_time::Instant;

/// Seconds in one day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// The outcome of evaluating one expiry timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryDecision {
    /// Whether the identity must update its password before continuing.
    pub force_change: bool,
    /// Signed seconds until expiry; negative once expired.
    pub seconds_left: i64,
    /// Whole days left, floored and clamped at zero.
    pub remaining_days: u64,
    /// Human-readable summary of `remaining_days`.
    pub message: String,
}

/// Evaluate an expiry instant against `now` with a window of `warning_days`.
///
/// The boundary is inclusive: expiring exactly `warning_days` days from now
/// forces a change.
pub fn evaluate(expiry: Instant, now: Instant, warning_days: u32) -> ExpiryDecision {
    let seconds_left = expiry.seconds_since(now);
    let days_left = seconds_left.div_euclid(SECONDS_PER_DAY);
    let window = i64::from(warning_days) * SECONDS_PER_DAY;
    let remaining_days = days_left.max(0).unsigned_abs();

    ExpiryDecision {
        force_change: seconds_left <= window,
        seconds_left,
        remaining_days,
        message: expiry_message(remaining_days),
    }
}

/// Render the remaining-days message.
pub fn expiry_message(remaining_days: u64) -> String {
    format!("Password expires in {remaining_days} day(s)")
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: Instant = Instant::from_epoch_seconds(1_756_771_200); // 2025-09-02T00:00:00Z

    fn at(offset: i64) -> Instant {
        Instant::from_epoch_seconds(NOW.epoch_seconds() + offset)
    }

    #[test]
    fn test_exact_window_boundary_forces_change() {
        let decision = evaluate(at(7 * SECONDS_PER_DAY), NOW, 7);
        assert!(decision.force_change);
        assert_eq!(decision.remaining_days, 7);
    }

    #[test]
    fn test_one_second_past_window_does_not_force() {
        let decision = evaluate(at(7 * SECONDS_PER_DAY + 1), NOW, 7);
        assert!(!decision.force_change);
        assert_eq!(decision.remaining_days, 7);
        assert_eq!(decision.message, "Password expires in 7 day(s)");
    }

    #[test]
    fn test_already_expired_clamps_remaining_days() {
        let decision = evaluate(at(-100_000), NOW, 7);
        assert!(decision.force_change);
        assert_eq!(decision.seconds_left, -100_000);
        assert_eq!(decision.remaining_days, 0);
        assert_eq!(decision.message, "Password expires in 0 day(s)");
    }

    #[test]
    fn test_two_days_left() {
        let decision = evaluate(at(172_800), NOW, 7);
        assert_eq!(
            decision,
            ExpiryDecision {
                force_change: true,
                seconds_left: 172_800,
                remaining_days: 2,
                message: "Password expires in 2 day(s)".to_string(),
            }
        );
    }

    #[test]
    fn test_partial_day_floors_down() {
        let decision = evaluate(at(2 * SECONDS_PER_DAY - 1), NOW, 7);
        assert_eq!(decision.remaining_days, 1);
    }

    #[test]
    fn test_negative_seconds_floor_not_truncate() {
        // -1s floors to -1 day, which clamps to 0.
        let decision = evaluate(at(-1), NOW, 0);
        assert_eq!(decision.seconds_left, -1);
        assert_eq!(decision.remaining_days, 0);
        assert!(decision.force_change);
    }

    #[test]
    fn test_zero_window_forces_only_at_or_after_expiry() {
        assert!(evaluate(at(0), NOW, 0).force_change);
        assert!(!evaluate(at(1), NOW, 0).force_change);
    }

    #[test]
    fn test_far_future_expiry_does_not_force() {
        let decision = evaluate(at(365 * SECONDS_PER_DAY), NOW, 7);
        assert!(!decision.force_change);
        assert_eq!(decision.remaining_days, 365);
    }

    #[test]
    fn test_huge_window_does_not_overflow() {
        let decision = evaluate(at(365 * SECONDS_PER_DAY), NOW, u32::MAX);
        assert!(decision.force_change);
    }

    #[test]
    fn test_extreme_instants_do_not_overflow() {
        let decision = evaluate(
            Instant::from_epoch_seconds(i64::MAX),
            Instant::from_epoch_seconds(i64::MIN),
            7,
        );
        assert!(!decision.force_change);

        let decision = evaluate(
            Instant::from_epoch_seconds(i64::MIN),
            Instant::from_epoch_seconds(i64::MAX),
            7,
        );
        assert!(decision.force_change);
        assert_eq!(decision.remaining_days, 0);
    }

    #[test]
    fn test_decision_serializes_camel_case() {
        let json = serde_json::to_value(evaluate(at(172_800), NOW, 7)).unwrap();
        assert_eq!(json["forceChange"], true);
        assert_eq!(json["secondsLeft"], 172_800);
        assert_eq!(json["remainingDays"], 2);
        assert_eq!(json["message"], "Password expires in 2 day(s)");
    }
}
