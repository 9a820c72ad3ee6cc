//! Expiry status display.
//!
//! Renders an [`Assessment`] as human-readable lines with color coding:
//! - Update required: red "UPDATE REQUIRED (Password expires in N day(s))"
//! - Outside the window: green "OK (Password expires in N day(s))"
//! - Nothing evaluated: yellow "NO ACTION (reason)"

use colored::Colorize;

use pwexpiry::core::authenticator::Assessment;

/// Render the status block for one assessment.
pub fn render_assessment(assessment: &Assessment, use_color: bool) -> String {
    match assessment {
        Assessment::NoAction { reason } => {
            let status = format!("NO ACTION ({})", reason.describe());
            format!("Status:      {}", paint(&status, Tone::Neutral, use_color))
        }
        Assessment::Evaluated {
            expires_at,
            evaluated_at,
            decision,
        } => {
            let (label, tone) = if decision.force_change {
                ("UPDATE REQUIRED", Tone::Alert)
            } else {
                ("OK", Tone::Good)
            };
            let status = format!("{label} ({})", decision.message);
            [
                format!("Status:      {}", paint(&status, tone, use_color)),
                format!("Expires at:  {expires_at}"),
                format!("Checked at:  {evaluated_at}"),
                format!("Seconds left: {}", decision.seconds_left),
            ]
            .join("\n")
        }
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Good,
    Alert,
    Neutral,
}

fn paint(text: &str, tone: Tone, use_color: bool) -> String {
    if !use_color {
        return text.to_string();
    }
    match tone {
        Tone::Good => text.green().bold().to_string(),
        Tone::Alert => text.red().bold().to_string(),
        Tone::Neutral => text.yellow().to_string(),
    }
}
