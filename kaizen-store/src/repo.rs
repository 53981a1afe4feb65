//! The idea repository.
//!
//! Single seam between the presentation layer and the backing table.
//! Reads go through the snapshot cache; every mutating method
//! invalidates that cache itself, unconditionally, as part of its own
//! contract. Positions handed to `update`/`delete` refer to the
//! current snapshot generation and are stale after any mutation.

use crate::cache::TableCache;
use chrono::Utc;
use kaizen_core::{Field, IdeaRecord, KaizenResult, Status, TableStore, ValidationError};
use kaizen_sheets::{mapper, rows};
use std::sync::Arc;
use std::time::Duration;

/// Repository of idea records over a [`TableStore`].
pub struct IdeaRepository<S: TableStore + ?Sized> {
    store: Arc<S>,
    cache: TableCache,
}

impl<S: TableStore + ?Sized> IdeaRepository<S> {
    /// Create a repository with the given snapshot lifetime.
    pub fn new(store: Arc<S>, cache_ttl: Duration) -> Self {
        Self {
            store,
            cache: TableCache::new(cache_ttl),
        }
    }

    /// Current table snapshot, cached for the configured lifetime.
    pub async fn list(&self) -> KaizenResult<Arc<Vec<IdeaRecord>>> {
        if let Some(snapshot) = self.cache.get().await {
            return Ok(snapshot);
        }
        let named_rows = self.store.read_all().await?;
        let records = named_rows.iter().map(mapper::from_row).collect();
        Ok(self.cache.store(records).await)
    }

    /// Zero-based position of the record with the given identifier in
    /// the current snapshot, if present.
    pub async fn find_position(&self, id: i64) -> KaizenResult<Option<usize>> {
        Ok(self.list().await?.iter().position(|r| r.id() == Some(id)))
    }

    /// Validate, stamp and append a new submission.
    ///
    /// The identifier is one plus the current maximum (1 on an empty
    /// table) and is never reused by this path. Submission date and
    /// default status are stamped when the draft leaves them empty.
    pub async fn submit(&self, mut draft: IdeaRecord) -> KaizenResult<IdeaRecord> {
        if let Some(field) = draft.missing_required() {
            return Err(ValidationError::RequiredFieldMissing {
                field: field.header().to_string(),
            }
            .into());
        }

        let snapshot = self.list().await?;
        let next_id = snapshot
            .iter()
            .filter_map(|r| r.id())
            .max()
            .map(|max| max + 1)
            .unwrap_or(1);
        draft.set_id(next_id);

        if draft.get(Field::SubmittedOn).is_empty() {
            draft.set(Field::SubmittedOn, today_stamp());
        }
        if draft.get(Field::Status).is_empty() {
            draft.set_status(Status::default());
        }

        self.store.append(mapper::to_row(&draft)).await?;
        self.cache.invalidate().await;
        tracing::info!(id = next_id, "Idea appended");
        Ok(draft)
    }

    /// Merge edits over the record at `position` and overwrite its full
    /// row. Fields the edit does not set are carried over unchanged;
    /// the identifier is never taken from an edit.
    pub async fn update(&self, position: usize, edits: &IdeaRecord) -> KaizenResult<IdeaRecord> {
        let snapshot = self.list().await?;
        let mut current = snapshot
            .get(position)
            .cloned()
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "position".to_string(),
                reason: format!("no record at position {}", position),
            })?;
        current.merge_from(edits);

        let row_number = rows::to_remote(position);
        self.store
            .update_range(row_number, mapper::to_row(&current))
            .await?;
        self.cache.invalidate().await;
        tracing::info!(position, row_number, "Idea row overwritten");
        Ok(current)
    }

    /// Physically remove the record at `position`. Every record after
    /// it shifts down by one; previously observed positions are stale.
    pub async fn delete(&self, position: usize) -> KaizenResult<()> {
        let row_number = rows::to_remote(position);
        self.store.delete_row(row_number).await?;
        self.cache.invalidate().await;
        tracing::info!(position, row_number, "Idea row removed");
        Ok(())
    }

    /// Discard the snapshot without mutating anything (the dashboard's
    /// "reload data" action).
    pub async fn refresh(&self) {
        self.cache.invalidate().await;
    }
}

/// Submission date stamp, São Paulo time (fixed UTC-3, no DST since 2019).
fn today_stamp() -> String {
    (Utc::now() - chrono::Duration::hours(3))
        .format("%d/%m/%Y")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::InMemoryTable;

    const TTL: Duration = Duration::from_secs(300);

    fn repo_with(rows: Vec<Vec<String>>) -> (Arc<InMemoryTable>, IdeaRepository<InMemoryTable>) {
        let store = Arc::new(InMemoryTable::with_rows(rows));
        let repo = IdeaRepository::new(Arc::clone(&store), TTL);
        (store, repo)
    }

    fn seeded_row(id: i64, name: &str) -> Vec<String> {
        let mut record = IdeaRecord::new();
        record.set_id(id);
        record.set(Field::IdeaName, name);
        record.set_status(Status::New);
        mapper::to_row(&record)
    }

    fn draft(name: &str) -> IdeaRecord {
        let mut record = IdeaRecord::new();
        record.set(Field::Submitter, "Maria Souza");
        record.set(Field::BadgeNumber, "4821");
        record.set(Field::SubmitterArea, "Caldeira");
        record.set(Field::IdeaName, name);
        record.set(Field::ProblemDescription, "Perda de vapor na linha 2");
        record.set(Field::SolutionDescription, "Isolar o trecho exposto");
        record
    }

    #[tokio::test]
    async fn test_submit_assigns_one_on_empty_table() {
        let (store, repo) = repo_with(vec![]);
        let saved = repo.submit(draft("Isolamento térmico")).await.unwrap();
        assert_eq!(saved.id(), Some(1));
        assert_eq!(store.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_assigns_max_plus_one() {
        let (store, repo) = repo_with(vec![seeded_row(1, "a"), seeded_row(5, "b")]);
        let saved = repo.submit(draft("nova")).await.unwrap();
        assert_eq!(saved.id(), Some(6));

        let rows = store.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2][Field::Id.index()], "6");
    }

    #[tokio::test]
    async fn test_submit_stamps_date_and_status() {
        let (store, repo) = repo_with(vec![]);
        let saved = repo.submit(draft("carimbo")).await.unwrap();
        assert_eq!(saved.status(), Some(Status::New));
        assert!(!saved.get(Field::SubmittedOn).is_empty());

        let rows = store.rows();
        assert_eq!(rows[0][Field::Status.index()], "Nova");
    }

    #[tokio::test]
    async fn test_submit_rejects_missing_required_field() {
        let (store, repo) = repo_with(vec![]);
        let mut incomplete = draft("sem matrícula");
        incomplete.set(Field::BadgeNumber, "  ");

        let err = repo.submit(incomplete).await.unwrap_err();
        assert!(err.to_string().contains("Matrícula"));
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn test_list_is_cached_within_lifetime() {
        let (store, repo) = repo_with(vec![seeded_row(1, "a")]);
        let first = repo.list().await.unwrap();
        let second = repo.list().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.read_calls(), 1);
    }

    #[tokio::test]
    async fn test_mutations_invalidate_cache() {
        let (store, repo) = repo_with(vec![seeded_row(1, "a")]);
        repo.list().await.unwrap();
        repo.submit(draft("nova")).await.unwrap();
        repo.list().await.unwrap();
        // one read before the append, one after the invalidation
        assert_eq!(store.read_calls(), 2);
    }

    #[tokio::test]
    async fn test_refresh_forces_reread() {
        let (store, repo) = repo_with(vec![seeded_row(1, "a")]);
        repo.list().await.unwrap();
        repo.refresh().await;
        repo.list().await.unwrap();
        assert_eq!(store.read_calls(), 2);
    }

    #[tokio::test]
    async fn test_update_overwrites_only_that_row() {
        let (store, repo) = repo_with(vec![seeded_row(1, "primeira"), seeded_row(2, "segunda")]);

        let mut edits = IdeaRecord::new();
        edits.set_status(Status::Approved);
        let updated = repo.update(1, &edits).await.unwrap();

        assert_eq!(updated.id(), Some(2));
        assert_eq!(updated.get(Field::IdeaName), "segunda");
        assert_eq!(updated.status(), Some(Status::Approved));

        let rows = store.rows();
        assert_eq!(rows[0][Field::Status.index()], "Nova");
        assert_eq!(rows[1][Field::Status.index()], "Aprovada");
        assert_eq!(rows[1][Field::IdeaName.index()], "segunda");
    }

    #[tokio::test]
    async fn test_update_out_of_range_position() {
        let (_, repo) = repo_with(vec![seeded_row(1, "a")]);
        let edits = IdeaRecord::new();
        assert!(repo.update(5, &edits).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_shifts_subsequent_positions() {
        let (store, repo) = repo_with(vec![
            seeded_row(1, "a"),
            seeded_row(2, "b"),
            seeded_row(3, "c"),
        ]);

        repo.delete(1).await.unwrap();

        let rows = store.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][Field::Id.index()], "1");
        assert_eq!(rows[1][Field::Id.index()], "3");

        assert_eq!(repo.find_position(3).await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn test_find_position() {
        let (_, repo) = repo_with(vec![seeded_row(10, "a"), seeded_row(11, "b")]);
        assert_eq!(repo.find_position(11).await.unwrap(), Some(1));
        assert_eq!(repo.find_position(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_non_numeric_ids_are_skipped_for_assignment() {
        let mut odd_row = seeded_row(2, "ok");
        odd_row[Field::Id.index()] = "rascunho".to_string();
        let (_, repo) = repo_with(vec![seeded_row(1, "a"), odd_row]);

        let saved = repo.submit(draft("nova")).await.unwrap();
        assert_eq!(saved.id(), Some(2));
    }

    // Full lifecycle: ids 1,2 seeded, append gets id 3, editing
    // position 1 rewrites sheet row 4, deleting position 0 removes
    // sheet row 2 and id 2 moves to position 0.
    #[tokio::test]
    async fn test_append_edit_delete_scenario() {
        let (store, repo) = repo_with(vec![seeded_row(1, "primeira"), seeded_row(2, "segunda")]);

        let saved = repo.submit(draft("terceira")).await.unwrap();
        assert_eq!(saved.id(), Some(3));
        assert_eq!(store.rows().len(), 3);

        let mut edits = IdeaRecord::new();
        edits.set_status(Status::Approved);
        repo.update(1, &edits).await.unwrap();
        let rows = store.rows();
        assert_eq!(rows[1][Field::Status.index()], "Aprovada");
        assert_eq!(rows[0][Field::Status.index()], "Nova");

        repo.delete(0).await.unwrap();
        let snapshot = repo.list().await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].id(), Some(2));
        assert_eq!(repo.find_position(2).await.unwrap(), Some(0));
    }
}
