//! Async traits seaming the repository from the remote services.
//!
//! `TableStore` is the four-operation surface of the backing table; the
//! production implementation talks to the Sheets API, tests use an
//! in-memory table. `AttachmentStore` is the upload interface of the
//! object store behind the attachment path.

use crate::error::KaizenResult;
use async_trait::async_trait;
use std::collections::HashMap;

/// The backing table's read and mutation operations.
///
/// Rows are addressed by their one-based row number *including the
/// header row*; callers translate from record positions before calling
/// in. `read_all` returns header-keyed rows, inheriting the column
/// association from the store's own header row.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Read every data row, keyed by column header. Full-table read,
    /// no pagination; an empty table yields an empty vec.
    async fn read_all(&self) -> KaizenResult<Vec<HashMap<String, String>>>;

    /// Append one row after the last existing row.
    async fn append(&self, row: Vec<String>) -> KaizenResult<()>;

    /// Overwrite the full declared column span of one row.
    async fn update_range(&self, row_number: u32, row: Vec<String>) -> KaizenResult<()>;

    /// Physically remove one row; every subsequent row shifts up.
    async fn delete_row(&self, row_number: u32) -> KaizenResult<()>;
}

/// Upload interface of the remote object store holding attachments.
///
/// Implementations receive the raw payload and return a public,
/// readable link that is stored verbatim on the record.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Upload a file and return its public link.
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> KaizenResult<String>;
}
