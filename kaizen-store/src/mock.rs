//! In-memory table store for tests.

use async_trait::async_trait;
use kaizen_core::{Field, KaizenResult, SheetsError, TableStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory stand-in for the remote table.
///
/// Holds the header and data rows the way the sheet would, counts
/// `read_all` calls so tests can assert cache behavior, and applies the
/// same one-based (header-inclusive) row addressing as the real store.
pub struct InMemoryTable {
    header: Vec<String>,
    rows: Mutex<Vec<Vec<String>>>,
    read_calls: AtomicUsize,
}

impl InMemoryTable {
    /// Empty table with the declared schema as its header.
    pub fn new() -> Self {
        Self {
            header: Field::ALL.iter().map(|f| f.header().to_string()).collect(),
            rows: Mutex::new(Vec::new()),
            read_calls: AtomicUsize::new(0),
        }
    }

    /// Table pre-seeded with data rows.
    pub fn with_rows(rows: Vec<Vec<String>>) -> Self {
        let table = Self::new();
        *table.rows.lock().unwrap() = rows;
        table
    }

    /// How many times `read_all` has been called.
    pub fn read_calls(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }

    /// Copy of the current data rows.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.rows.lock().unwrap().clone()
    }

    fn data_index(&self, row_number: u32, len: usize) -> KaizenResult<usize> {
        let index = (row_number as usize)
            .checked_sub(2)
            .filter(|i| *i < len)
            .ok_or_else(|| SheetsError::RequestFailed {
                endpoint: "mock".to_string(),
                status: 400,
                message: format!("row {} out of range", row_number),
            })?;
        Ok(index)
    }
}

impl Default for InMemoryTable {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TableStore for InMemoryTable {
    async fn read_all(&self) -> KaizenResult<Vec<HashMap<String, String>>> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .map(|row| {
                self.header
                    .iter()
                    .enumerate()
                    .map(|(i, key)| (key.clone(), row.get(i).cloned().unwrap_or_default()))
                    .collect()
            })
            .collect())
    }

    async fn append(&self, row: Vec<String>) -> KaizenResult<()> {
        self.rows.lock().unwrap().push(row);
        Ok(())
    }

    async fn update_range(&self, row_number: u32, row: Vec<String>) -> KaizenResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let index = self.data_index(row_number, rows.len())?;
        rows[index] = row;
        Ok(())
    }

    async fn delete_row(&self, row_number: u32) -> KaizenResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let index = self.data_index(row_number, rows.len())?;
        rows.remove(index);
        Ok(())
    }
}
