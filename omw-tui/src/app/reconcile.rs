//! Turning command outcomes into [`UiOutputState`].
//!
//! Each function takes the current state by value and returns the next one.
//! Results may arrive out of order; whichever settles last wins the fields it
//! writes.

use super::state::{Severity, UiOutputState};
use crate::api::ApiResult;
use crate::command::{CommandError, Operation};

pub fn reconcile(mut state: UiOutputState, op: &Operation, result: ApiResult) -> UiOutputState {
    match result {
        ApiResult::Failure(message) => {
            state.status_text = message;
            state.severity = Severity::Error;
            if op.is_report() {
                state.report_visible = false;
            }
        }
        ApiResult::Success(payload) => {
            state.status_text.clear();
            state.severity = Severity::Normal;
            if op.is_report() {
                state.report_visible = true;
                state.report_payload = payload;
            }
        }
    }
    state
}

/// A command line that was turned away before anything was sent.
pub fn reject(mut state: UiOutputState, error: &CommandError) -> UiOutputState {
    state.status_text = error.to_string();
    state.severity = Severity::Error;
    state
}

/// The `?` command: flip help and close any open report.
pub fn toggle_help(mut state: UiOutputState) -> UiOutputState {
    state.help_visible = !state.help_visible;
    state.report_visible = false;
    state
}

/// Reset the status line when a new command is accepted.
pub fn clear_status(mut state: UiOutputState) -> UiOutputState {
    state.status_text.clear();
    state.severity = Severity::Normal;
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{ReportFormat, ReportRequest, TaskEntry, ADD_REQUIRES_TASK, INVALID_COMMAND};
    use crate::week::current_week;
    use serde_json::json;
    use time::macros::date;

    fn report_op() -> Operation {
        Operation::Report(ReportRequest {
            range: current_week(date!(2024 - 06 - 12)),
            format: ReportFormat::Json,
        })
    }

    fn add_op() -> Operation {
        Operation::Add(TaskEntry {
            words: vec!["coding".to_string()],
            marker: None,
        })
    }

    fn showing_report() -> UiOutputState {
        UiOutputState {
            report_visible: true,
            report_payload: json!({"entries": []}),
            ..UiOutputState::default()
        }
    }

    #[test]
    fn report_success_shows_payload() {
        let payload = json!({"taskTotalHours": 3_600_000_000_000_i64});
        let state = UiOutputState {
            status_text: "old error".to_string(),
            severity: Severity::Error,
            ..UiOutputState::default()
        };

        let state = reconcile(state, &report_op(), ApiResult::Success(payload.clone()));

        assert!(state.report_visible);
        assert_eq!(state.report_payload, payload);
        assert_eq!(state.status_text, "");
        assert_eq!(state.severity, Severity::Normal);
    }

    #[test]
    fn report_failure_hides_report() {
        let state = reconcile(
            showing_report(),
            &report_op(),
            ApiResult::Failure("GET /report returned error".to_string()),
        );

        assert!(!state.report_visible);
        assert_eq!(state.status_text, "GET /report returned error");
        assert!(state.is_error());
    }

    #[test]
    fn other_failures_leave_report_alone() {
        let state = reconcile(
            showing_report(),
            &Operation::Hello,
            ApiResult::Failure("boom".to_string()),
        );

        assert!(state.report_visible);
        assert_eq!(state.status_text, "boom");
        assert!(state.is_error());
    }

    #[test]
    fn other_successes_clear_status_only() {
        let state = UiOutputState {
            status_text: "stale".to_string(),
            severity: Severity::Error,
            ..showing_report()
        };

        let state = reconcile(state, &add_op(), ApiResult::Success(json!({"ignored": 1})));

        assert_eq!(state.status_text, "");
        assert_eq!(state.severity, Severity::Normal);
        assert!(state.report_visible);
        assert_eq!(state.report_payload, json!({"entries": []}));
    }

    #[test]
    fn later_result_overwrites_earlier() {
        let state = reconcile(
            UiOutputState::default(),
            &report_op(),
            ApiResult::Success(json!({"week": "this"})),
        );
        let state = reconcile(state, &report_op(), ApiResult::Success(json!({"week": "last"})));
        assert_eq!(state.report_payload, json!({"week": "last"}));
    }

    #[test]
    fn rejections_use_fixed_messages() {
        let state = reject(UiOutputState::default(), &CommandError::InvalidInput);
        assert_eq!(state.status_text, INVALID_COMMAND);
        assert!(state.is_error());

        let state = reject(
            UiOutputState::default(),
            &CommandError::UnknownCommand("xyz".to_string()),
        );
        assert_eq!(state.status_text, "Invalid command - try again or ? for help");

        let state = reject(UiOutputState::default(), &CommandError::MissingArgument);
        assert_eq!(state.status_text, ADD_REQUIRES_TASK);
        assert!(state.is_error());
    }

    #[test]
    fn toggle_help_closes_report() {
        let state = toggle_help(showing_report());
        assert!(state.help_visible);
        assert!(!state.report_visible);

        let state = toggle_help(state);
        assert!(!state.help_visible);
        assert!(!state.report_visible);
    }
}
