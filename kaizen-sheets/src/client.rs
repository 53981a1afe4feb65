//! Google Sheets remote table client.
//!
//! `SheetsClient` is the single gateway to the backing spreadsheet. It
//! is constructed explicitly with [`SheetsClient::connect`], which
//! resolves the worksheet's numeric sheet id and verifies the remote
//! header row against the declared schema before any read or write:
//! a drifted header fails fast instead of silently misaligning columns.
//! The client owns its HTTP connection pool; dropping it ends the
//! session.
//!
//! There are no retries and no partial results: any transport or
//! service failure surfaces as a [`SheetsError`] and the interaction
//! stops.

use crate::rows;
use crate::types::{ApiErrorBody, BatchUpdateRequest, SpreadsheetMeta, ValueRange};
use async_trait::async_trait;
use kaizen_core::{Field, KaizenResult, SheetsConfig, SheetsError, TableStore};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Remote table client bound to one worksheet of one spreadsheet.
pub struct SheetsClient {
    http: Client,
    base_url: String,
    spreadsheet_id: String,
    worksheet: String,
    sheet_id: i64,
    api_token: String,
}

impl SheetsClient {
    /// Establish the session: build the HTTP client, resolve the
    /// worksheet, and verify the remote header matches the schema.
    ///
    /// Connection and authorization failures here are fatal to the
    /// caller; the system renders nothing on top of a store it cannot
    /// reach.
    pub async fn connect(config: &SheetsConfig) -> KaizenResult<Self> {
        let http = Client::builder().build().map_err(|e| SheetsError::Connection {
            reason: e.to_string(),
        })?;

        let mut client = Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            worksheet: config.worksheet.clone(),
            sheet_id: 0,
            api_token: config.api_token.clone(),
        };

        client.sheet_id = client.resolve_sheet_id().await?;
        client.verify_header().await?;

        tracing::info!(
            spreadsheet_id = %client.spreadsheet_id,
            worksheet = %client.worksheet,
            sheet_id = client.sheet_id,
            "Connected to backing spreadsheet"
        );

        Ok(client)
    }

    /// The worksheet this client is bound to.
    pub fn worksheet(&self) -> &str {
        &self.worksheet
    }

    /// Read every data row, keyed by the sheet's own header row.
    ///
    /// Rows shorter than the header are padded with `""`; cells beyond
    /// the declared span are never requested.
    pub async fn read_all(&self) -> KaizenResult<Vec<HashMap<String, String>>> {
        let range = rows::table_range(&self.worksheet);
        let url = format!(
            "{}/spreadsheets/{}/values/{}?majorDimension=ROWS",
            self.base_url,
            self.spreadsheet_id,
            urlencoding::encode(&range)
        );
        let value_range: ValueRange = self.get_json("values.get", url).await?;

        let mut table = value_range.rows_as_text();
        if table.is_empty() {
            return Ok(Vec::new());
        }
        let header = table.remove(0);

        Ok(table
            .into_iter()
            .map(|row| {
                header
                    .iter()
                    .enumerate()
                    .map(|(i, key)| (key.clone(), row.get(i).cloned().unwrap_or_default()))
                    .collect()
            })
            .collect())
    }

    /// Append one row after the last existing row.
    pub async fn append(&self, row: Vec<String>) -> KaizenResult<()> {
        let range = rows::table_range(&self.worksheet);
        let url = format!(
            "{}/spreadsheets/{}/values/{}:append?valueInputOption=RAW&insertDataOption=INSERT_ROWS",
            self.base_url,
            self.spreadsheet_id,
            urlencoding::encode(&range)
        );
        self.post_json("values.append", url, &ValueRange::single_row(row))
            .await?;
        Ok(())
    }

    /// Overwrite the full declared column span of one sheet row.
    ///
    /// Every cell is transmitted as a string; the service rejects bare
    /// numeric payloads on this path.
    pub async fn update_range(&self, row_number: u32, row: Vec<String>) -> KaizenResult<()> {
        let range = rows::row_range(&self.worksheet, row_number);
        let url = format!(
            "{}/spreadsheets/{}/values/{}?valueInputOption=RAW",
            self.base_url,
            self.spreadsheet_id,
            urlencoding::encode(&range)
        );
        self.put_json("values.update", url, &ValueRange::single_row(row))
            .await?;
        Ok(())
    }

    /// Physically remove one sheet row; subsequent rows shift up.
    pub async fn delete_row(&self, row_number: u32) -> KaizenResult<()> {
        let url = format!(
            "{}/spreadsheets/{}:batchUpdate",
            self.base_url, self.spreadsheet_id
        );
        let body = BatchUpdateRequest::delete_row(self.sheet_id, row_number);
        self.post_json("batchUpdate.deleteDimension", url, &body)
            .await?;
        Ok(())
    }

    async fn resolve_sheet_id(&self) -> KaizenResult<i64> {
        let url = format!(
            "{}/spreadsheets/{}?fields=sheets.properties",
            self.base_url, self.spreadsheet_id
        );
        let meta: SpreadsheetMeta = self.get_json("spreadsheets.get", url).await?;

        meta.sheets
            .iter()
            .find(|s| s.properties.title == self.worksheet)
            .map(|s| s.properties.sheet_id)
            .ok_or_else(|| {
                SheetsError::WorksheetNotFound {
                    worksheet: self.worksheet.clone(),
                    spreadsheet_id: self.spreadsheet_id.clone(),
                }
                .into()
            })
    }

    /// Compare the remote header row against the declared schema,
    /// case-exactly, column by column.
    async fn verify_header(&self) -> KaizenResult<()> {
        let range = rows::header_range(&self.worksheet);
        let url = format!(
            "{}/spreadsheets/{}/values/{}",
            self.base_url,
            self.spreadsheet_id,
            urlencoding::encode(&range)
        );
        let value_range: ValueRange = self.get_json("values.get", url).await?;
        let table = value_range.rows_as_text();
        let header = table.first();

        for (index, field) in Field::ALL.iter().enumerate() {
            let found = header.and_then(|row| row.get(index));
            if found.map(String::as_str) != Some(field.header()) {
                return Err(SheetsError::SchemaMismatch {
                    column: index + 1,
                    expected: field.header().to_string(),
                    found: found.cloned(),
                }
                .into());
            }
        }
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, url: String) -> KaizenResult<T> {
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| SheetsError::Connection {
                reason: e.to_string(),
            })?;
        Self::decode(endpoint, response).await
    }

    async fn post_json<B: serde::Serialize>(
        &self,
        endpoint: &str,
        url: String,
        body: &B,
    ) -> KaizenResult<serde_json::Value> {
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(body)
            .send()
            .await
            .map_err(|e| SheetsError::Connection {
                reason: e.to_string(),
            })?;
        Self::decode(endpoint, response).await
    }

    async fn put_json<B: serde::Serialize>(
        &self,
        endpoint: &str,
        url: String,
        body: &B,
    ) -> KaizenResult<serde_json::Value> {
        let response = self
            .http
            .put(&url)
            .bearer_auth(&self.api_token)
            .json(body)
            .send()
            .await
            .map_err(|e| SheetsError::Connection {
                reason: e.to_string(),
            })?;
        Self::decode(endpoint, response).await
    }

    async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> KaizenResult<T> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(|e| {
                SheetsError::InvalidResponse {
                    reason: e.to_string(),
                }
                .into()
            });
        }

        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .map(|body| body.error.message)
            .unwrap_or(text);

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                SheetsError::Authorization { message }
            }
            _ => SheetsError::RequestFailed {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message,
            },
        }
        .into())
    }
}

#[async_trait]
impl TableStore for SheetsClient {
    async fn read_all(&self) -> KaizenResult<Vec<HashMap<String, String>>> {
        SheetsClient::read_all(self).await
    }

    async fn append(&self, row: Vec<String>) -> KaizenResult<()> {
        SheetsClient::append(self, row).await
    }

    async fn update_range(&self, row_number: u32, row: Vec<String>) -> KaizenResult<()> {
        SheetsClient::update_range(self, row_number, row).await
    }

    async fn delete_row(&self, row_number: u32) -> KaizenResult<()> {
        SheetsClient::delete_row(self, row_number).await
    }
}

impl std::fmt::Debug for SheetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsClient")
            .field("base_url", &self.base_url)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("worksheet", &self.worksheet)
            .field("sheet_id", &self.sheet_id)
            .field("api_token", &"[REDACTED]")
            .finish()
    }
}
