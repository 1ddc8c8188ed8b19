use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::api::google_auth::ServiceAccountAuth;

pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("request to Google failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Google Sheets API returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("token exchange failed: {0}")]
    Auth(String),
    #[error("invalid service account key: {0}")]
    Key(#[from] jsonwebtoken::errors::Error),
    #[error("unexpected response from Google: {0}")]
    Decode(String),
}

impl SheetsError {
    /// The Sheets API answers 400 when a range names a tab that does not exist.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, SheetsError::Api { status: 400, .. })
    }
}

/// The handful of spreadsheet operations lead storage needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpreadsheetApi: Send + Sync {
    async fn read_range(&self, range: &str) -> Result<Vec<Vec<String>>, SheetsError>;
    async fn add_sheet(&self, title: &str) -> Result<(), SheetsError>;
    async fn write_range(&self, range: &str, values: Vec<Vec<String>>) -> Result<(), SheetsError>;
    /// Appends rows below the table found in `range`; returns how many rows were written.
    async fn append_rows(&self, range: &str, values: Vec<Vec<String>>) -> Result<u64, SheetsError>;
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

fn cell_text(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.to_string())
}

fn updated_rows(response: &Value) -> u64 {
    response
        .pointer("/updates/updatedRows")
        .and_then(Value::as_u64)
        .unwrap_or(0)
}

pub struct GoogleSheetsClient {
    http: Client,
    auth: ServiceAccountAuth,
    spreadsheet_id: String,
    base_url: String,
}

impl GoogleSheetsClient {
    pub fn new(http: Client, auth: ServiceAccountAuth, spreadsheet_id: impl Into<String>) -> Self {
        Self {
            http,
            auth,
            spreadsheet_id: spreadsheet_id.into(),
            base_url: SHEETS_API_BASE.to_string(),
        }
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/{}/values/{}",
            self.base_url,
            self.spreadsheet_id,
            urlencoding::encode(range)
        )
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(SheetsError::Api {
            status: status.as_u16(),
            message: api_error_message(&body),
        })
    }
}

#[async_trait]
impl SpreadsheetApi for GoogleSheetsClient {
    async fn read_range(&self, range: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        let token = self.auth.access_token().await?;
        let response = self
            .http
            .get(self.values_url(range))
            .bearer_auth(token)
            .send()
            .await?;
        let body: ValueRange = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| SheetsError::Decode(e.to_string()))?;
        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    async fn add_sheet(&self, title: &str) -> Result<(), SheetsError> {
        let token = self.auth.access_token().await?;
        let url = format!("{}/{}:batchUpdate", self.base_url, self.spreadsheet_id);
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&json!({
                "requests": [{ "addSheet": { "properties": { "title": title } } }]
            }))
            .send()
            .await?;
        Self::check(response).await?;
        tracing::info!("Created sheet tab {}", title);
        Ok(())
    }

    async fn write_range(&self, range: &str, values: Vec<Vec<String>>) -> Result<(), SheetsError> {
        let token = self.auth.access_token().await?;
        let response = self
            .http
            .put(self.values_url(range))
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(token)
            .json(&json!({ "range": range, "values": values }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn append_rows(&self, range: &str, values: Vec<Vec<String>>) -> Result<u64, SheetsError> {
        let token = self.auth.access_token().await?;
        let url = format!("{}:append", self.values_url(range));
        let response = self
            .http
            .post(url)
            .query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
            .bearer_auth(token)
            .json(&json!({ "values": values }))
            .send()
            .await?;
        let body: Value = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| SheetsError::Decode(e.to_string()))?;
        tracing::debug!("Append response: {}", body);
        Ok(updated_rows(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updated_rows_defaults_to_zero() {
        assert_eq!(updated_rows(&json!({ "updates": { "updatedRows": 1 } })), 1);
        assert_eq!(updated_rows(&json!({ "updates": {} })), 0);
        assert_eq!(updated_rows(&json!({})), 0);
    }

    #[test]
    fn api_error_message_prefers_google_message() {
        let body = r#"{"error":{"code":400,"message":"Unable to parse range: 'Lead Submissions'!A1:A1","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(
            api_error_message(body),
            "Unable to parse range: 'Lead Submissions'!A1:A1"
        );
        assert_eq!(api_error_message("gateway timeout"), "gateway timeout");
    }

    #[test]
    fn only_400_counts_as_missing_tab() {
        let missing = SheetsError::Api { status: 400, message: "Unable to parse range".into() };
        let denied = SheetsError::Api { status: 403, message: "forbidden".into() };
        assert!(missing.is_bad_request());
        assert!(!denied.is_bad_request());
        assert!(!SheetsError::Auth("nope".into()).is_bad_request());
    }

    #[test]
    fn cells_become_text() {
        assert_eq!(cell_text(json!("Timestamp")), "Timestamp");
        assert_eq!(cell_text(json!(42)), "42");
        assert_eq!(cell_text(Value::Null), "");
    }
}
