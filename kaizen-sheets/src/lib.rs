//! Remote table access for the Kaizen idea tracker.
//!
//! Everything that knows the backing store is a Google spreadsheet
//! lives here: the [`client::SheetsClient`] gateway, the Drive
//! attachment client, the record/row mapper, and the row-number
//! arithmetic. The repository layer upstream only sees the
//! `TableStore` trait.

pub mod client;
pub mod drive;
pub mod mapper;
pub mod rows;
pub mod types;

pub use client::SheetsClient;
pub use drive::DriveClient;
