//! Wire types for the Sheets and Drive REST APIs.

use serde::{Deserialize, Serialize};

/// A block of cell values, as the Sheets values endpoints exchange it.
///
/// Cells come back as loosely-typed JSON values (the service may return
/// numbers or booleans for cells that look like them); everything is
/// stringified at the client boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(rename = "majorDimension", skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Vec<serde_json::Value>>>,
}

impl ValueRange {
    /// Body carrying a single row of string cells.
    pub fn single_row(row: Vec<String>) -> Self {
        Self {
            range: None,
            major_dimension: Some("ROWS".to_string()),
            values: Some(vec![row.into_iter().map(serde_json::Value::String).collect()]),
        }
    }

    /// The contained rows with every cell rendered as text. Null cells
    /// become `""`, numbers and booleans their display form.
    pub fn rows_as_text(&self) -> Vec<Vec<String>> {
        self.values
            .as_ref()
            .map(|rows| {
                rows.iter()
                    .map(|row| row.iter().map(cell_to_text).collect())
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn cell_to_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Spreadsheet metadata (only the sheet list is requested).
#[derive(Debug, Clone, Deserialize)]
pub struct SpreadsheetMeta {
    #[serde(default)]
    pub sheets: Vec<SheetMeta>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetMeta {
    pub properties: SheetProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub sheet_id: i64,
    pub title: String,
}

/// `batchUpdate` request deleting one row range.
#[derive(Debug, Clone, Serialize)]
pub struct BatchUpdateRequest {
    pub requests: Vec<BatchRequest>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub delete_dimension: DeleteDimension,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteDimension {
    pub range: DimensionRange,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRange {
    pub sheet_id: i64,
    pub dimension: String,
    pub start_index: u32,
    pub end_index: u32,
}

impl BatchUpdateRequest {
    /// Delete exactly one row, addressed by its one-based row number.
    pub fn delete_row(sheet_id: i64, row_number: u32) -> Self {
        Self {
            requests: vec![BatchRequest {
                delete_dimension: DeleteDimension {
                    range: DimensionRange {
                        sheet_id,
                        dimension: "ROWS".to_string(),
                        // deleteDimension takes zero-based half-open indices
                        start_index: row_number - 1,
                        end_index: row_number,
                    },
                },
            }],
        }
    }
}

/// Error envelope both Google APIs return on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Drive file resource (only the fields the upload path requests).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    #[serde(default)]
    pub web_view_link: Option<String>,
}

/// Metadata part of a multipart Drive upload.
#[derive(Debug, Clone, Serialize)]
pub struct DriveFileMetadata {
    pub name: String,
    pub parents: Vec<String>,
}

/// Body making an uploaded file link-readable by anyone.
#[derive(Debug, Clone, Serialize)]
pub struct DrivePermission {
    pub role: &'static str,
    #[serde(rename = "type")]
    pub permission_type: &'static str,
}

impl DrivePermission {
    pub fn anyone_reader() -> Self {
        Self {
            role: "reader",
            permission_type: "anyone",
        }
    }
}
