//! Handler for the `evaluate` subcommand.
//!
//! Loads a JSON user record, runs the password-expiry step against it
//! the way a host would during login, and reports the outcome, the
//! required actions, and the auth notes. With `--write` the updated
//! record is saved back.

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use pwexpiry::core::authenticator::AUTH_NOTE_KEY;
use pwexpiry::core::config::{CFG_ATTR, CFG_WARN_DAYS};
use pwexpiry::core::factory::AuthenticatorFactory;
use pwexpiry::core::identity::{AuthNotes, AuthenticationSession, Identity, UserRecord};
use pwexpiry::error::PwExpiryError;

use crate::cli::EvaluateArgs;
use crate::display::expiry_status::render_assessment;
use crate::display::json_printer::print_json;
use crate::display::use_color;

/// Execute the `evaluate` subcommand with the given arguments.
pub fn execute(args: &EvaluateArgs) -> Result<()> {
    let mut properties = super::parse_properties(&args.properties)?;
    if let Some(attribute) = &args.attribute {
        properties.insert(CFG_ATTR.to_string(), attribute.clone());
    }
    if let Some(days) = &args.warn_days {
        properties.insert(CFG_WARN_DAYS.to_string(), days.clone());
    }

    let clock = super::resolve_clock(args.now.as_deref())?;
    let authenticator = AuthenticatorFactory.create(&properties, clock);

    let mut user = load_user(&args.user)?;
    let mut session = AuthenticationSession::new();
    let result = authenticator.execute(
        user.as_mut().map(|u| u as &mut dyn Identity),
        &mut session,
    );

    if args.write {
        if let Some(user) = &user {
            save_user(&args.user, user)?;
        }
    }

    if args.json {
        let report = json!({
            "outcome": result.outcome,
            "config": authenticator.config(),
            "assessment": result.assessment,
            "user": user,
            "authNotes": session.notes(),
        });
        print_json(&report, false);
        return Ok(());
    }

    let color = use_color();
    println!("--- Outcome ---");
    println!("Step:        {}", result.outcome.as_str());
    match (&user, &result.assessment) {
        (Some(user), Some(assessment)) => {
            println!("User:        {}", user.username());
            println!("Attribute:   {}", authenticator.config().attribute_name);
            println!("{}", render_assessment(assessment, color));
            println!();
            println!("--- Required Actions ---");
            if user.required_actions.is_empty() {
                println!("(none)");
            }
            for action in &user.required_actions {
                println!("{action}");
            }
            if let Some(note) = session.auth_note(AUTH_NOTE_KEY) {
                println!();
                println!("--- Auth Notes ---");
                println!("{AUTH_NOTE_KEY}: {note}");
            }
            println!();
            println!("--- User ---");
            print_json(&serde_json::to_value(user)?, color);
        }
        _ => println!("No identity bound to the attempt; check not applicable."),
    }
    Ok(())
}

/// Read a user record; a JSON `null` document means "no identity".
fn load_user(path: &Path) -> Result<Option<UserRecord>, PwExpiryError> {
    let content = std::fs::read_to_string(path).map_err(|e| PwExpiryError::UserFileError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| PwExpiryError::UserFileParseError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn save_user(path: &Path, user: &UserRecord) -> Result<(), PwExpiryError> {
    let mut content =
        serde_json::to_string_pretty(user).map_err(|e| PwExpiryError::UserFileError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    content.push('\n');
    std::fs::write(path, content).map_err(|e| PwExpiryError::UserFileError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
