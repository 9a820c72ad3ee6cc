//! Handler for the `check` subcommand.
//!
//! Evaluates a single expiration value read from a CLI argument,
//! environment variable, or stdin, optionally as of a simulated "now".

use anyhow::Result;
use serde_json::json;

use pwexpiry::core::authenticator::assess_value;
use pwexpiry::core::config::parse_warn_days;

use crate::cli::CheckArgs;
use crate::display::expiry_status::render_assessment;
use crate::display::json_printer::print_json;
use crate::display::use_color;

/// Execute the `check` subcommand with the given arguments.
pub fn execute(args: &CheckArgs) -> Result<()> {
    let raw = super::resolve_value(args.value.as_deref(), args.value_env.as_deref())?;
    let warn_days = parse_warn_days(args.warn_days.as_deref());
    let clock = super::resolve_clock(args.now.as_deref())?;

    let assessment = assess_value(Some(raw.as_str()), warn_days, &clock);

    if args.json {
        let report = json!({
            "warnThresholdDays": warn_days,
            "assessment": assessment,
        });
        print_json(&report, false);
    } else {
        println!("{}", render_assessment(&assessment, use_color()));
        println!("Window:      {warn_days} day(s)");
    }
    Ok(())
}
