//! Command implementations for the pingroute CLI.

mod google;
mod indexnow;
mod key;
mod routes;

pub use google::execute as submit_google;
pub use indexnow::execute as submit_indexnow;
pub use key::{generate as generate_key, location as key_location};
pub use routes::execute as list_routes;

use colored::{ColoredString, Colorize};
use pingroute_core::SubmissionResult;

/// One-line rendering of a destination's outcome, `✓ 200` / `✗ 403`.
fn outcome(result: &SubmissionResult) -> (ColoredString, String) {
    let marker = if result.ok { "✓".green() } else { "✗".red() };
    let status = if result.status == 0 {
        "no response".to_string()
    } else {
        result.status.to_string()
    };
    (marker, status)
}

/// Indented first line of a failure body, if any.
fn failure_detail(result: &SubmissionResult) -> Option<String> {
    if result.ok {
        return None;
    }
    result
        .body
        .as_deref()
        .and_then(|body| body.lines().map(str::trim).find(|line| !line.is_empty()))
        .map(|line| format!("    {}", line.bright_black()))
}
