use crate::api::OmwClient;
use crate::app::{self, App, UiOutputState};
use crate::command::{self, Operation};
use crate::week;
use time::Date;

use super::action_queue::{Action, ActionTx};

pub(super) fn run_action(action: Action, app: &mut App, client: &OmwClient, action_tx: &ActionTx) {
    match action {
        Action::Submit { line } => {
            submit(&line, week::local_today(), app, client, action_tx);
        }
        Action::Settle { op, result } => {
            tracing::debug!(operation = op.name(), "applying settled result");
            app.dispatch_settled(&op, result);
        }
    }
}

/// Validate and resolve `line`. Rejected lines and `?` are applied
/// immediately; everything else is sent from a background task that reports
/// back with [`Action::Settle`].
pub(super) fn submit(
    line: &str,
    today: Date,
    app: &mut App,
    client: &OmwClient,
    action_tx: &ActionTx,
) {
    tracing::info!(command = %line, "command entered");

    let op = match command::tokenize(line).and_then(|parsed| command::operation(&parsed, today)) {
        Ok(op) => op,
        Err(e) => {
            tracing::info!(command = %line, error = ?e, "command rejected");
            app.command_rejected(&e);
            return;
        }
    };

    app.command_accepted();
    if op == Operation::ToggleHelp {
        app.help_command();
        return;
    }

    app.dispatch_started();
    let client = client.clone();
    let action_tx = action_tx.clone();
    tokio::spawn(async move {
        let result = client.dispatch(&op).await;
        // The loop may already be gone on shutdown.
        let _ = action_tx.send(Action::Settle { op, result });
    });
}

/// Run one command line start to finish without the terminal UI.
pub async fn interpret_once(line: &str, today: Date, client: &OmwClient) -> UiOutputState {
    let state = UiOutputState::default();
    let op = match command::tokenize(line).and_then(|parsed| command::operation(&parsed, today)) {
        Ok(op) => op,
        Err(e) => return app::reject(state, &e),
    };
    if op == Operation::ToggleHelp {
        return app::toggle_help(state);
    }
    let result = client.dispatch(&op).await;
    app::reconcile(state, &op, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiResult;
    use crate::app::Severity;
    use crate::command::{ADD_REQUIRES_TASK, INVALID_COMMAND};
    use crate::config::OmwConfig;
    use axum::{
        extract::{RawQuery, State},
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use time::macros::date;

    use super::super::action_queue::channel;

    const THURSDAY: Date = date!(2024 - 06 - 13);
    const WEDNESDAY: Date = date!(2024 - 06 - 12);

    /// A client whose port has nothing listening.
    async fn unreachable_client() -> OmwClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        OmwClient::new(&format!("http://{}/omw/", addr), Duration::from_secs(2)).unwrap()
    }

    /// A backend that answers `GET /omw/report` with an empty week and
    /// records every query string it was sent.
    async fn report_backend() -> (OmwClient, Arc<Mutex<Vec<String>>>) {
        let queries = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route(
                "/omw/report",
                get(
                    |State(queries): State<Arc<Mutex<Vec<String>>>>,
                     RawQuery(query): RawQuery| async move {
                        queries.lock().unwrap().push(query.unwrap_or_default());
                        Json(json!({
                            "reportFrom": "2024-06-10T00:00:00Z",
                            "reportTo": "2024-06-15T00:00:00Z",
                            "ignoreTotalHours": 0,
                            "breakTotalHours": 0,
                            "taskTotalHours": 0,
                            "entries": null
                        }))
                    },
                ),
            )
            .with_state(queries.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client =
            OmwClient::new(&format!("http://{}/omw/", addr), Duration::from_secs(5)).unwrap();
        (client, queries)
    }

    fn test_app() -> App {
        App::new(&OmwConfig::default())
    }

    #[tokio::test]
    async fn unknown_command_is_rejected_without_dispatch() {
        let client = unreachable_client().await;
        let (tx, mut rx) = channel();
        let mut app = test_app();

        submit("xyz", THURSDAY, &mut app, &client, &tx);

        assert_eq!(app.output.status_text, INVALID_COMMAND);
        assert_eq!(app.output.severity, Severity::Error);
        assert_eq!(app.in_flight, 0);
        drop(tx);
        assert!(rx.recv().await.is_none(), "no dispatch expected");
    }

    #[tokio::test]
    async fn add_without_task_is_rejected_without_dispatch() {
        let client = unreachable_client().await;
        let (tx, mut rx) = channel();
        let mut app = test_app();

        submit("a", THURSDAY, &mut app, &client, &tx);

        assert_eq!(app.output.status_text, ADD_REQUIRES_TASK);
        assert!(app.output.is_error());
        assert_eq!(app.in_flight, 0);
        drop(tx);
        assert!(rx.recv().await.is_none(), "no dispatch expected");
    }

    #[tokio::test]
    async fn invalid_characters_are_rejected_without_dispatch() {
        let client = unreachable_client().await;
        let (tx, mut rx) = channel();
        let mut app = test_app();

        submit("a drop table;", THURSDAY, &mut app, &client, &tx);

        assert_eq!(app.output.status_text, INVALID_COMMAND);
        assert_eq!(app.in_flight, 0);
        drop(tx);
        assert!(rx.recv().await.is_none(), "no dispatch expected");
    }

    #[tokio::test]
    async fn help_toggles_locally() {
        let client = unreachable_client().await;
        let (tx, mut rx) = channel();
        let mut app = test_app();
        app.output.report_visible = true;

        submit("?", THURSDAY, &mut app, &client, &tx);

        assert!(app.output.help_visible);
        assert!(!app.output.report_visible);
        assert_eq!(app.in_flight, 0);
        drop(tx);
        assert!(rx.recv().await.is_none(), "no dispatch expected");
    }

    #[tokio::test]
    async fn accepted_command_clears_status_and_settles_later() {
        let client = unreachable_client().await;
        let (tx, mut rx) = channel();
        let mut app = test_app();
        app.output.status_text = "previous error".to_string();
        app.output.severity = Severity::Error;

        submit("h", THURSDAY, &mut app, &client, &tx);

        assert_eq!(app.output.status_text, "");
        assert_eq!(app.output.severity, Severity::Normal);
        assert!(app.is_busy());

        let action = rx.recv().await.expect("settle action");
        let Action::Settle { op, result } = &action else {
            panic!("unexpected action: {action:?}");
        };
        assert_eq!(op, &Operation::Hello);
        assert!(matches!(result, ApiResult::Failure(_)));

        run_action(action, &mut app, &client, &tx);
        assert!(!app.is_busy());
        assert!(app.output.is_error());
        assert!(app.output.status_text.starts_with("Failed to call POST /hello"));
    }

    #[tokio::test]
    async fn settled_report_opens_panel() {
        let client = unreachable_client().await;
        let (tx, _rx) = channel();
        let mut app = test_app();
        app.dispatch_started();
        app.report_scroll = 7;

        let op = command::operation(&command::tokenize("r").unwrap(), THURSDAY).unwrap();
        let payload = json!({"entries": null});
        run_action(
            Action::Settle {
                op,
                result: ApiResult::Success(payload.clone()),
            },
            &mut app,
            &client,
            &tx,
        );

        assert!(app.output.report_visible);
        assert_eq!(app.output.report_payload, payload);
        assert_eq!(app.report_scroll, 0);
        assert_eq!(app.in_flight, 0);
    }

    #[tokio::test]
    async fn interpret_once_reports_rejections() {
        let client = unreachable_client().await;

        let state = interpret_once("xyz", THURSDAY, &client).await;
        assert_eq!(state.status_text, INVALID_COMMAND);

        let state = interpret_once("?", THURSDAY, &client).await;
        assert!(state.help_visible);
        assert!(!state.is_error());

        let state = interpret_once("e", THURSDAY, &client).await;
        assert!(state.is_error());
        assert!(state.status_text.starts_with("Failed to call GET /edit"));
    }

    #[tokio::test]
    async fn report_round_trip_opens_panel() {
        let (client, queries) = report_backend().await;

        let state = interpret_once("r", WEDNESDAY, &client).await;

        assert!(state.report_visible);
        assert!(!state.is_error());
        assert_eq!(state.status_text, "");
        assert_eq!(state.report_payload["entries"], serde_json::Value::Null);
        assert_eq!(
            queries.lock().unwrap().as_slice(),
            ["args=2024-06-10&args=2024-06-14&args=json"]
        );
    }

    #[tokio::test]
    async fn submitted_report_settles_into_app() {
        let (client, queries) = report_backend().await;
        let (tx, mut rx) = channel();
        let mut app = test_app();

        submit("last", WEDNESDAY, &mut app, &client, &tx);
        assert!(app.is_busy());

        let action = rx.recv().await.expect("settle action");
        run_action(action, &mut app, &client, &tx);

        assert!(!app.is_busy());
        assert!(app.output.report_visible);
        assert!(!app.output.is_error());
        assert_eq!(
            queries.lock().unwrap().as_slice(),
            ["args=2024-06-03&args=2024-06-07&args=json"]
        );
    }
}
