//! Picture Store: the relational record of which days have been ingested.

mod db;
mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use common::PictureRecord;
use sea_orm::DbErr;
use thiserror::Error;

pub use db::DbPictureRepository;
pub use memory::MemoryPictureRepository;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A row for this date already exists. Dates are unique in the store.
    #[error("picture for {0} is already stored")]
    Duplicate(NaiveDate),

    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

/// Storage capability the picture workflows depend on.
///
/// Row-count returning operations report how many rows they touched so
/// callers can check the outcome they expect.
#[async_trait]
pub trait PictureRepository: Send + Sync {
    /// Insert a record. `raw` is never persisted.
    async fn insert_one(&self, record: &PictureRecord) -> Result<u64, StoreError>;

    async fn get_by_date(&self, date: NaiveDate) -> Result<Option<PictureRecord>, StoreError>;

    /// Records with `start <= date <= end`, oldest first.
    async fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PictureRecord>, StoreError>;

    async fn delete_by_date(&self, date: NaiveDate) -> Result<u64, StoreError>;
}
