//! Cached repository layer for the Kaizen idea tracker.
//!
//! [`repo::IdeaRepository`] is the only surface the presentation layer
//! talks to. Its mutating methods invalidate the snapshot cache
//! internally and unconditionally, so no call site can forget and serve
//! stale reads after a write. [`mock::InMemoryTable`] backs the tests.

pub mod cache;
pub mod mock;
pub mod repo;

pub use cache::TableCache;
pub use mock::InMemoryTable;
pub use repo::IdeaRepository;
