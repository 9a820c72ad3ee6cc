//! Terminal display and formatting utilities.
//!
//! Handles colorized JSON output and expiry status rendering for
//! human-readable terminal output.

pub mod expiry_status;
pub mod json_printer;

use std::io::IsTerminal;

/// Whether stdout is an interactive terminal worth colorizing.
pub fn use_color() -> bool {
    std::io::stdout().is_terminal()
}
