//! The password-expiry authenticator step.
//!
//! Reads the expiration attribute of the identity bound to an attempt,
//! evaluates it, and when the warning window is reached flags
//! `UPDATE_PASSWORD` and records an auth note. The step never blocks a
//! login: missing or unparsable data resolves to "no action" and the
//! outcome is always [`FlowOutcome::Success`] once an identity is bound.

use serde::Serialize;

use super::clock::Clock;
use super::config::ExpiryCheckConfig;
use super::generalized_time::{Instant, parse_generalized_time};
use super::identity::{AuthNotes, Identity, RequiredAction};
use super::policy::{self, ExpiryDecision};

/// Auth note key carrying the expiry message.
pub const AUTH_NOTE_KEY: &str = "pwd-expiry-warning";

/// Terminal signal for the authentication step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowOutcome {
    /// Continue the flow.
    Success,
    /// No identity was bound; the step does not apply.
    Attempted,
}

impl FlowOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Attempted => "attempted",
        }
    }
}

/// Everything one run of the step produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepResult {
    pub outcome: FlowOutcome,
    /// `None` when no identity was bound.
    pub assessment: Option<Assessment>,
}

/// Why an expiry check resolved to "no action".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    MissingAttribute,
    UnparsableTimestamp,
}

impl SkipReason {
    pub fn describe(self) -> &'static str {
        match self {
            Self::MissingAttribute => "no expiration attribute",
            Self::UnparsableTimestamp => "unrecognized timestamp format",
        }
    }
}

/// Result of looking at one expiration value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Assessment {
    /// Nothing to decide; the flow proceeds untouched.
    NoAction { reason: SkipReason },
    /// The value parsed and was evaluated.
    #[serde(rename_all = "camelCase")]
    Evaluated {
        expires_at: Instant,
        evaluated_at: Instant,
        decision: ExpiryDecision,
    },
}

impl Assessment {
    pub fn force_change(&self) -> bool {
        self.decision().is_some_and(|d| d.force_change)
    }

    pub fn decision(&self) -> Option<&ExpiryDecision> {
        match self {
            Self::NoAction { .. } => None,
            Self::Evaluated { decision, .. } => Some(decision),
        }
    }
}

/// Assess a raw attribute value.
///
/// Absent or blank values and values that are not GeneralizedTime resolve to
/// [`Assessment::NoAction`]. The clock is read only when there is something
/// to compare against.
pub fn assess_value(raw: Option<&str>, warn_days: u32, clock: &impl Clock) -> Assessment {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Assessment::NoAction {
            reason: SkipReason::MissingAttribute,
        };
    };

    let Some(expires_at) = parse_generalized_time(value) else {
        tracing::warn!(len = value.len(), "expiration value is not GeneralizedTime; skipping check");
        return Assessment::NoAction {
            reason: SkipReason::UnparsableTimestamp,
        };
    };

    let now = clock.now();
    Assessment::Evaluated {
        expires_at,
        evaluated_at: now,
        decision: policy::evaluate(expires_at, now, warn_days),
    }
}

/// Forces a password update when the configured expiry attribute is close.
#[derive(Debug, Clone)]
pub struct PasswordExpiryAuthenticator<C> {
    config: ExpiryCheckConfig,
    clock: C,
}

impl<C: Clock> PasswordExpiryAuthenticator<C> {
    pub fn new(config: ExpiryCheckConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &ExpiryCheckConfig {
        &self.config
    }

    /// Assess an identity without touching it.
    pub fn assess(&self, identity: &dyn Identity) -> Assessment {
        assess_value(
            identity.first_attribute(&self.config.attribute_name),
            self.config.warn_threshold_days,
            &self.clock,
        )
    }

    /// Run the step for the identity bound to the attempt, if any.
    pub fn authenticate(
        &self,
        identity: Option<&mut dyn Identity>,
        notes: &mut dyn AuthNotes,
    ) -> FlowOutcome {
        self.execute(identity, notes).outcome
    }

    /// Like [`authenticate`](Self::authenticate), also returning the assessment.
    pub fn execute(
        &self,
        identity: Option<&mut dyn Identity>,
        notes: &mut dyn AuthNotes,
    ) -> StepResult {
        let Some(identity) = identity else {
            tracing::debug!("no identity bound to attempt; password expiry check not applicable");
            return StepResult {
                outcome: FlowOutcome::Attempted,
                assessment: None,
            };
        };

        let assessment = self.assess(identity);
        match &assessment {
            Assessment::NoAction { reason } => {
                tracing::debug!(
                    user = identity.username(),
                    attribute = %self.config.attribute_name,
                    reason = reason.describe(),
                    "password expiry check skipped"
                );
            }
            Assessment::Evaluated { decision, .. } if decision.force_change => {
                identity.add_required_action(RequiredAction::UpdatePassword);
                notes.set_auth_note(AUTH_NOTE_KEY, decision.message.clone());
                tracing::info!(
                    user = identity.username(),
                    remaining_days = decision.remaining_days,
                    "password expiry within warning window; update required"
                );
            }
            Assessment::Evaluated { decision, .. } => {
                tracing::debug!(
                    user = identity.username(),
                    remaining_days = decision.remaining_days,
                    "password expiry outside warning window"
                );
            }
        }

        StepResult {
            outcome: FlowOutcome::Success,
            assessment: Some(assessment),
        }
    }

    /// Form submissions are not expected; this step has no form.
    pub fn action(&self) -> FlowOutcome {
        FlowOutcome::Success
    }

    pub fn requires_user(&self) -> bool {
        true
    }

    pub fn configured_for(&self, _identity: &dyn Identity) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::core::clock::FixedClock;
    use crate::core::config::DEFAULT_ATTRIBUTE;
    use crate::core::identity::{AuthenticationSession, UserRecord};

    const NOW: Instant = Instant::from_epoch_seconds(1_756_771_200); // 2025-09-02T00:00:00Z

    fn authenticator(warn_days: u32) -> PasswordExpiryAuthenticator<FixedClock> {
        let config = ExpiryCheckConfig {
            warn_threshold_days: warn_days,
            ..ExpiryCheckConfig::default()
        };
        PasswordExpiryAuthenticator::new(config, FixedClock::new(NOW))
    }

    fn user_with(value: &str) -> UserRecord {
        UserRecord::new("alice").with_attribute(DEFAULT_ATTRIBUTE, value)
    }

    /// A clock that fails the test if it is ever read.
    struct UnreadClock;

    impl Clock for UnreadClock {
        fn now(&self) -> Instant {
            panic!("clock must not be read");
        }
    }

    #[test]
    fn test_end_to_end_two_days_left_forces_change() {
        let mut user = user_with("20250904000000Z");
        let mut session = AuthenticationSession::new();

        let outcome = authenticator(7).authenticate(Some(&mut user), &mut session);

        assert_eq!(outcome, FlowOutcome::Success);
        assert!(user.has_required_action(RequiredAction::UpdatePassword));
        assert_eq!(
            session.auth_note(AUTH_NOTE_KEY),
            Some("Password expires in 2 day(s)")
        );
    }

    #[test]
    fn test_assessment_carries_decision_details() {
        let user = user_with("20250904000000Z");
        let assessment = authenticator(7).assess(&user);
        let Assessment::Evaluated {
            expires_at,
            evaluated_at,
            decision,
        } = assessment
        else {
            panic!("expected an evaluation");
        };
        assert_eq!(expires_at.to_string(), "2025-09-04T00:00:00Z");
        assert_eq!(evaluated_at, NOW);
        assert_eq!(decision.seconds_left, 172_800);
        assert_eq!(decision.remaining_days, 2);
        assert!(decision.force_change);
    }

    #[test]
    fn test_outside_window_leaves_identity_untouched() {
        let mut user = user_with("20251001000000Z");
        let before = user.clone();
        let mut session = AuthenticationSession::new();

        let outcome = authenticator(7).authenticate(Some(&mut user), &mut session);

        assert_eq!(outcome, FlowOutcome::Success);
        assert_eq!(user, before);
        assert!(session.notes().is_empty());
    }

    #[test]
    fn test_no_identity_is_attempted() {
        let mut session = AuthenticationSession::new();
        let outcome = authenticator(7).authenticate(None, &mut session);
        assert_eq!(outcome, FlowOutcome::Attempted);
        assert!(session.notes().is_empty());
    }

    #[test]
    fn test_blank_value_is_no_action() {
        for raw in ["", "   "] {
            let mut user = user_with(raw);
            let mut session = AuthenticationSession::new();
            let auth = authenticator(u32::MAX);

            assert_eq!(
                auth.assess(&user),
                Assessment::NoAction {
                    reason: SkipReason::MissingAttribute
                }
            );
            assert_eq!(
                auth.authenticate(Some(&mut user), &mut session),
                FlowOutcome::Success
            );
            assert!(user.required_actions.is_empty());
        }
    }

    #[test]
    fn test_missing_attribute_is_no_action() {
        let mut user = UserRecord::new("alice");
        let mut session = AuthenticationSession::new();
        let outcome = authenticator(7).authenticate(Some(&mut user), &mut session);
        assert_eq!(outcome, FlowOutcome::Success);
        assert!(user.required_actions.is_empty());
        assert!(session.notes().is_empty());
    }

    #[test]
    fn test_unparsable_value_fails_open() {
        let mut user = user_with("not-a-timestamp");
        let mut session = AuthenticationSession::new();
        let auth = authenticator(7);

        assert_eq!(
            auth.assess(&user),
            Assessment::NoAction {
                reason: SkipReason::UnparsableTimestamp
            }
        );
        assert_eq!(
            auth.authenticate(Some(&mut user), &mut session),
            FlowOutcome::Success
        );
        assert!(user.required_actions.is_empty());
    }

    #[test]
    fn test_value_is_trimmed_before_parsing() {
        let user = user_with("  20250904000000Z\n");
        assert!(authenticator(7).assess(&user).force_change());
    }

    #[test]
    fn test_clock_not_read_when_nothing_to_evaluate() {
        assert_eq!(
            assess_value(None, 7, &UnreadClock),
            Assessment::NoAction {
                reason: SkipReason::MissingAttribute
            }
        );
        assert_eq!(
            assess_value(Some("garbage"), 7, &UnreadClock),
            Assessment::NoAction {
                reason: SkipReason::UnparsableTimestamp
            }
        );
    }

    #[test]
    fn test_repeated_authentication_is_idempotent() {
        let auth = authenticator(7);
        let mut once = user_with("20250904000000Z");
        let mut twice = once.clone();
        let mut session = AuthenticationSession::new();

        auth.authenticate(Some(&mut once), &mut session);
        auth.authenticate(Some(&mut twice), &mut session);
        auth.authenticate(Some(&mut twice), &mut session);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_existing_required_actions_are_preserved() {
        let mut user = user_with("20250904000000Z");
        user.add_required_action(RequiredAction::VerifyEmail);
        let mut session = AuthenticationSession::new();

        authenticator(7).authenticate(Some(&mut user), &mut session);

        assert!(user.has_required_action(RequiredAction::VerifyEmail));
        assert!(user.has_required_action(RequiredAction::UpdatePassword));
    }

    #[test]
    fn test_custom_attribute_name_is_read() {
        let config = ExpiryCheckConfig {
            attribute_name: "passwordExpirationTime".to_string(),
            warn_threshold_days: 7,
        };
        let auth = PasswordExpiryAuthenticator::new(config, FixedClock::new(NOW));
        let user = UserRecord::new("alice")
            .with_attribute("passwordExpirationTime", "20250903000000Z")
            .with_attribute(DEFAULT_ATTRIBUTE, "20300101000000Z");

        let decision = auth.assess(&user).decision().cloned().unwrap();
        assert_eq!(decision.remaining_days, 1);
    }

    #[test]
    fn test_offset_timestamp_is_normalized() {
        // 2025-09-04T05:30+05:30 is exactly 2 days after NOW.
        let user = user_with("20250904053000+0530");
        let decision = authenticator(7).assess(&user).decision().cloned().unwrap();
        assert_eq!(decision.seconds_left, 172_800);
    }

    #[test]
    fn test_already_expired_renders_zero_days() {
        let mut user = user_with("20250801000000Z");
        let mut session = AuthenticationSession::new();
        authenticator(7).authenticate(Some(&mut user), &mut session);
        assert_eq!(
            session.auth_note(AUTH_NOTE_KEY),
            Some("Password expires in 0 day(s)")
        );
    }

    #[test]
    fn test_execute_reports_assessment() {
        let mut user = user_with("20250904000000Z");
        let mut session = AuthenticationSession::new();
        let result = authenticator(7).execute(Some(&mut user), &mut session);
        assert_eq!(result.outcome, FlowOutcome::Success);
        assert!(result.assessment.is_some_and(|a| a.force_change()));

        let result = authenticator(7).execute(None, &mut session);
        assert_eq!(result.outcome, FlowOutcome::Attempted);
        assert_eq!(result.assessment, None);
    }

    #[test]
    fn test_capability_flags() {
        let auth = authenticator(7);
        assert!(auth.requires_user());
        assert!(auth.configured_for(&UserRecord::new("alice")));
        assert_eq!(auth.action(), FlowOutcome::Success);
    }

    #[test]
    fn test_assessment_serialization() {
        let user = user_with("20250904000000Z");
        let json = serde_json::to_value(authenticator(7).assess(&user)).unwrap();
        assert_eq!(json["status"], "evaluated");
        assert_eq!(json["expiresAt"], 1_756_944_000);
        assert_eq!(json["decision"]["forceChange"], true);

        let skipped = serde_json::to_value(assess_value(None, 7, &UnreadClock)).unwrap();
        assert_eq!(skipped["status"], "noAction");
        assert_eq!(skipped["reason"], "missingAttribute");
    }
}
