//! Printing outcomes and mapping them to exit codes.

use serde_json::json;
use std::path::Path;

use fightsort_core::{Action, ProcessError, SortOutcome};

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// Exit code for one processed file.
///
/// Only a kept higher-resolution incumbent counts as a failed job among the
/// rejections; the other rejections mean the library already has what it
/// needs.
pub fn exit_code(result: &Result<SortOutcome, ProcessError>) -> u8 {
    match result {
        Ok(outcome) => match outcome.action {
            Action::RejectLowerAttempt(_) => EXIT_FAILURE,
            _ => EXIT_OK,
        },
        Err(_) => EXIT_FAILURE,
    }
}

/// Human-readable line for one processed file.
pub fn message(result: &Result<SortOutcome, ProcessError>) -> String {
    match result {
        Ok(outcome) => outcome.message(),
        Err(e) => format!("Error: {}", error_chain(e)),
    }
}

fn error_chain(error: &dyn std::error::Error) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

/// JSON object for one processed file.
pub fn to_json(source: &Path, result: &Result<SortOutcome, ProcessError>) -> serde_json::Value {
    match result {
        Ok(outcome) => {
            let mut value = serde_json::to_value(outcome).unwrap_or_else(|_| json!({}));
            value["message"] = json!(outcome.message());
            value["exit_code"] = json!(exit_code(result));
            value
        }
        Err(e) => json!({
            "source": source,
            "error": error_chain(e),
            "fatal": e.is_fatal(),
            "exit_code": exit_code(result),
        }),
    }
}

/// Prints one result to stdout in the selected format.
pub fn print(source: &Path, result: &Result<SortOutcome, ProcessError>, as_json: bool) {
    if as_json {
        println!("{}", to_json(source, result));
    } else {
        println!("{}", message(result));
        if let Ok(outcome) = result {
            for warning in &outcome.warnings {
                println!("Warning: {warning}");
            }
        }
    }
}
