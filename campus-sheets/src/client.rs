//! Blocking REST client for the spreadsheet values API.
//!
//! Two operations only: read a range (`GET …/values/{range}`) and bulk
//! append (`POST …/values/{range}:append`). The append is a single call
//! regardless of row count; a mid-batch failure loses the whole batch.

use serde::{Deserialize, Serialize};

use crate::error::{request_err, SheetsError};

/// A block of cell values, as the values API represents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(rename = "majorDimension", skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    /// Absent in responses for an empty range.
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct AppendResponse {
    #[serde(default)]
    updates: Option<AppendUpdates>,
}

#[derive(Debug, Deserialize)]
struct AppendUpdates {
    #[serde(rename = "updatedRows", default)]
    updated_rows: usize,
}

/// Handle to one spreadsheet backend. Cheap to clone; the underlying agent
/// shares its connection pool.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    agent: ureq::Agent,
    base_url: String,
    token: String,
}

impl SheetsClient {
    /// `base_url` is the API root up to and including the version segment,
    /// e.g. `https://sheets.googleapis.com/v4`.
    pub fn new(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            agent: ureq::agent(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            token: token.into(),
        }
    }

    pub(crate) fn values_url(&self, spreadsheet_id: &str, range: &str) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}",
            self.base_url, spreadsheet_id, range
        )
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Read every row of `range`. An empty range yields an empty vec.
    pub fn get_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, SheetsError> {
        let url = self.values_url(spreadsheet_id, range);
        tracing::debug!("GET {url}");
        let response = self
            .agent
            .get(&url)
            .set("Authorization", &self.bearer())
            .call()
            .map_err(|e| request_err(&url, e))?;
        let value_range: ValueRange = response.into_json().map_err(|e| SheetsError::Body {
            context: url,
            source: e,
        })?;
        Ok(value_range.values)
    }

    /// Append `rows` below the last data row of `range` in one call.
    /// Returns the number of rows the backend reports as written.
    pub fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: &[Vec<String>],
    ) -> Result<usize, SheetsError> {
        let url = format!(
            "{}:append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS",
            self.values_url(spreadsheet_id, range)
        );
        let payload = ValueRange {
            range: None,
            major_dimension: Some("ROWS".to_owned()),
            values: rows.to_vec(),
        };
        tracing::debug!("POST {url} ({} rows)", rows.len());
        let response = self
            .agent
            .post(&url)
            .set("Authorization", &self.bearer())
            .send_json(&payload)
            .map_err(|e| request_err(&url, e))?;
        let parsed: AppendResponse = response.into_json().map_err(|e| SheetsError::Body {
            context: url,
            source: e,
        })?;
        Ok(parsed
            .updates
            .map(|u| u.updated_rows)
            .unwrap_or(rows.len()))
    }
}
