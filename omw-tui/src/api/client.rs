use anyhow::{Context, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL},
    redirect, Client, RequestBuilder, Url,
};
use serde_json::Value;
use std::time::Duration;

use super::dto::{ArgsRequest, EmptyRequest};
use super::ApiResult;
use crate::command::{CommandError, Operation};
use crate::week::format_date;

#[derive(Debug, Clone)]
pub struct OmwClient {
    client: Client,
    base_url: Url,
}

impl OmwClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        // Url::join drops the last path segment unless the base ends with '/'.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalized).with_context(|| format!("Invalid API URL: {}", base_url))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .default_headers(headers)
            .redirect(redirect::Policy::none())
            .referer(false)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, CommandError> {
        self.base_url
            .join(path)
            .map_err(|e| CommandError::Network(format!("Failed to build URL for {path}: {e}")))
    }

    fn request(&self, op: &Operation) -> Result<(RequestBuilder, String), CommandError> {
        let request = match op {
            Operation::Hello => self.client.post(self.endpoint("hello")?).json(&EmptyRequest {}),
            Operation::Add(task) => self.client.post(self.endpoint("add")?).json(&ArgsRequest {
                args: &task.wire_args(),
            }),
            Operation::Report(report) => {
                let start = format_date(report.range.start).map_err(|e| {
                    CommandError::Backend(format!("Failed to format report start date: {e}"))
                })?;
                let end = format_date(report.range.end).map_err(|e| {
                    CommandError::Backend(format!("Failed to format report end date: {e}"))
                })?;
                self.client.get(self.endpoint("report")?).query(&[
                    ("args", start),
                    ("args", end),
                    ("args", report.format.as_str().to_string()),
                ])
            }
            Operation::Stretch => self
                .client
                .post(self.endpoint("stretch")?)
                .json(&EmptyRequest {}),
            Operation::Edit => self.client.get(self.endpoint("edit")?),
            Operation::ToggleHelp => {
                return Err(CommandError::Backend(
                    "toggle is handled locally and has no backend call".to_string(),
                ))
            }
        };

        let method = match op {
            Operation::Report(_) | Operation::Edit => "GET",
            _ => "POST",
        };
        Ok((request, format!("{} /{}", method, op.name())))
    }

    /// Send the request for `op` and fold every outcome into an [`ApiResult`].
    pub async fn dispatch(&self, op: &Operation) -> ApiResult {
        match self.send(op).await {
            Ok(payload) => {
                tracing::debug!(operation = op.name(), "dispatch succeeded");
                ApiResult::Success(payload)
            }
            Err(e) => {
                tracing::warn!(operation = op.name(), error = %e, "dispatch failed");
                ApiResult::Failure(e.to_string())
            }
        }
    }

    async fn send(&self, op: &Operation) -> Result<Value, CommandError> {
        let (request, call_name) = self.request(op)?;
        match op {
            Operation::Add(task) => {
                tracing::info!(call = %call_name, task = %task.description(), "calling omw backend")
            }
            Operation::Report(report) => {
                tracing::info!(call = %call_name, range = %report.range, "calling omw backend")
            }
            _ => tracing::info!(call = %call_name, "calling omw backend"),
        }

        let response = request
            .send()
            .await
            .map_err(|e| CommandError::Network(format!("Failed to call {}: {}", call_name, e)))?;

        let status = response.status();
        if status.is_redirection() {
            return Err(CommandError::Backend(format!(
                "{} was redirected ({}), redirects are not followed",
                call_name, status
            )));
        }

        let status_error = response.error_for_status_ref().err();
        let body = response.text().await.map_err(|e| {
            CommandError::Network(format!("Failed to read {} response: {}", call_name, e))
        })?;

        if let Some(e) = status_error {
            let detail = body.trim();
            let message = if detail.is_empty() {
                format!("{} returned error: {}", call_name, e)
            } else {
                format!("{} returned error: {}: {}", call_name, e, detail)
            };
            return Err(CommandError::Backend(message));
        }

        parse_body(&body, &call_name)
    }
}

/// Empty bodies count as `{}`; anything else must be JSON.
fn parse_body(body: &str, call_name: &str) -> Result<Value, CommandError> {
    if body.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_str(body).map_err(|e| {
        CommandError::Backend(format!("Failed to parse {} response: {}", call_name, e))
    })
}
