//! Unit of work over the relational store.
//!
//! A [`RepositoryContext`] owns at most one open transaction, begun by the
//! first staged write. Repositories stage their inserts and updates inside it
//! through [`RepositoryContext::scope`]; nothing becomes durable until
//! [`RepositoryContext::save`] commits. Reads go through the open transaction
//! when there is one and straight to the connection pool otherwise, so a
//! read-only unit of work never holds a pooled connection between calls.
//! Dropping the context with staged changes rolls them back.
use crate::errors::PropertiesError;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};

pub struct RepositoryContext {
    db: DatabaseConnection,
    txn: Mutex<Option<DatabaseTransaction>>,
    staged: AtomicU64,
}

impl RepositoryContext {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            txn: Mutex::new(None),
            staged: AtomicU64::new(0),
        }
    }

    /// Exclusive access to the open transaction, beginning one if needed.
    ///
    /// Callers must drop the guard before yielding to anything that may call
    /// back into the same context.
    pub async fn scope(
        &self,
    ) -> Result<MappedMutexGuard<'_, DatabaseTransaction>, PropertiesError> {
        let mut guard = self.txn.lock().await;
        if guard.is_none() {
            tracing::debug!("Beginning unit of work");
            *guard = Some(self.db.begin().await?);
        }
        MutexGuard::try_map(guard, |txn| txn.as_mut()).map_err(|_| {
            PropertiesError::Db(sea_orm::DbErr::Custom(
                "unit of work unavailable".to_string(),
            ))
        })
    }

    /// The open transaction, if a write has begun one.
    ///
    /// Readers query through it when present and through
    /// [`connection`](Self::connection) otherwise.
    pub(crate) async fn current(&self) -> MutexGuard<'_, Option<DatabaseTransaction>> {
        self.txn.lock().await
    }

    pub(crate) fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Records one staged row change to be reported by the next [`save`](Self::save).
    pub(crate) fn track_change(&self) {
        self.staged.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of row changes staged since the last save.
    pub fn pending_changes(&self) -> u64 {
        self.staged.load(Ordering::Relaxed)
    }

    /// Commits every staged change and returns how many row changes it made durable.
    pub async fn save(&self) -> Result<u64, PropertiesError> {
        let mut guard = self.txn.lock().await;
        let committed = self.staged.swap(0, Ordering::Relaxed);
        if let Some(txn) = guard.take() {
            txn.commit().await?;
            tracing::debug!(committed, "Committed unit of work");
        }
        Ok(committed)
    }

    /// Rolls back the open transaction and returns how many staged row changes it dropped.
    pub async fn discard(&self) -> Result<u64, PropertiesError> {
        let mut guard = self.txn.lock().await;
        let dropped = self.staged.swap(0, Ordering::Relaxed);
        if let Some(txn) = guard.take() {
            txn.rollback().await?;
            tracing::debug!(dropped, "Rolled back unit of work");
        }
        Ok(dropped)
    }

    /// Ends the unit of work: commits after `outcome` succeeded, rolls back after it failed.
    pub async fn finish<T>(
        &self,
        outcome: Result<T, PropertiesError>,
    ) -> Result<T, PropertiesError> {
        match outcome {
            Ok(value) => {
                self.save().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback) = self.discard().await {
                    tracing::warn!(error = %rollback, "Rollback failed");
                }
                Err(err)
            }
        }
    }
}

impl Drop for RepositoryContext {
    fn drop(&mut self) {
        let pending = *self.staged.get_mut();
        if pending > 0 {
            tracing::warn!(pending, "Discarding unsaved changes");
        }
    }
}
