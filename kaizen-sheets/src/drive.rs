//! Drive attachment client.
//!
//! Uploads a file into the configured folder, makes it link-readable,
//! and returns the public link. The link is stored verbatim on the
//! record; an upload failure aborts the whole submission before
//! anything is appended to the table.

use crate::types::{ApiErrorBody, DriveFile, DriveFileMetadata, DrivePermission};
use async_trait::async_trait;
use kaizen_core::{AttachmentError, AttachmentStore, KaizenResult, SheetsConfig};
use reqwest::multipart::{Form, Part};
use reqwest::Client;

/// Attachment client bound to one Drive folder.
pub struct DriveClient {
    http: Client,
    base_url: String,
    upload_url: String,
    folder_id: String,
    api_token: String,
}

impl DriveClient {
    /// Build a client from the shared configuration. Requires a
    /// configured attachment folder.
    pub fn new(config: &SheetsConfig) -> KaizenResult<Self> {
        let folder_id = config
            .drive_folder_id
            .clone()
            .ok_or(AttachmentError::NotConfigured)?;

        let http = Client::builder().build().map_err(|e| AttachmentError::UploadFailed {
            reason: e.to_string(),
        })?;

        Ok(Self {
            http,
            base_url: config.drive_base_url.trim_end_matches('/').to_string(),
            upload_url: config.drive_upload_url.trim_end_matches('/').to_string(),
            folder_id,
            api_token: config.api_token.clone(),
        })
    }

    /// Upload a file and return its public link.
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> KaizenResult<String> {
        let metadata = DriveFileMetadata {
            name: file_name.to_string(),
            parents: vec![self.folder_id.clone()],
        };
        let metadata_json =
            serde_json::to_string(&metadata).map_err(|e| AttachmentError::UploadFailed {
                reason: e.to_string(),
            })?;

        let form = Form::new()
            .part(
                "metadata",
                Part::text(metadata_json)
                    .mime_str("application/json")
                    .map_err(|e| AttachmentError::UploadFailed {
                        reason: e.to_string(),
                    })?,
            )
            .part(
                "media",
                Part::bytes(bytes)
                    .mime_str(mime_for(file_name))
                    .map_err(|e| AttachmentError::UploadFailed {
                        reason: e.to_string(),
                    })?,
            );

        let url = format!(
            "{}/files?uploadType=multipart&fields=id,webViewLink",
            self.upload_url
        );
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AttachmentError::UploadFailed {
                reason: e.to_string(),
            })?;

        let file: DriveFile = Self::decode(response).await?;

        // Link-readable for reviewers without Drive access to the folder.
        let permission_url = format!("{}/files/{}/permissions", self.base_url, file.id);
        let response = self
            .http
            .post(&permission_url)
            .bearer_auth(&self.api_token)
            .json(&DrivePermission::anyone_reader())
            .send()
            .await
            .map_err(|e| AttachmentError::UploadFailed {
                reason: e.to_string(),
            })?;
        Self::decode::<serde_json::Value>(response).await?;

        tracing::info!(file_id = %file.id, name = %file_name, "Uploaded attachment");

        Ok(file
            .web_view_link
            .unwrap_or_else(|| format!("https://drive.google.com/uc?id={}", file.id)))
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> KaizenResult<T> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(|e| {
                AttachmentError::UploadFailed {
                    reason: format!("Failed to parse response: {}", e),
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

        Err(AttachmentError::UploadFailed {
            reason: format!("status {}: {}", status.as_u16(), message),
        }
        .into())
    }
}

fn mime_for(file_name: &str) -> &'static str {
    match file_name.rsplit('.').next().map(str::to_ascii_lowercase) {
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ext) if ext == "png" => "image/png",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl AttachmentStore for DriveClient {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> KaizenResult<String> {
        DriveClient::upload(self, file_name, bytes).await
    }
}

impl std::fmt::Debug for DriveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriveClient")
            .field("base_url", &self.base_url)
            .field("folder_id", &self.folder_id)
            .field("api_token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_extensions() {
        assert_eq!(mime_for("foto.jpg"), "image/jpeg");
        assert_eq!(mime_for("foto.JPEG"), "image/jpeg");
        assert_eq!(mime_for("diagrama.png"), "image/png");
        assert_eq!(mime_for("arquivo.pdf"), "application/octet-stream");
    }

    #[test]
    fn test_new_requires_folder() {
        let config = SheetsConfig::new("sheet-id", "token");
        assert!(DriveClient::new(&config).is_err());

        let config = config.with_drive_folder("folder-1");
        assert!(DriveClient::new(&config).is_ok());
    }
}
