use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use common::PictureRecord;
use tokio::sync::RwLock;

use super::{PictureRepository, StoreError};

/// Picture Store kept in process memory, keyed and ordered by date.
#[derive(Default)]
pub struct MemoryPictureRepository {
    rows: RwLock<BTreeMap<NaiveDate, PictureRecord>>,
}

impl MemoryPictureRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl PictureRepository for MemoryPictureRepository {
    async fn insert_one(&self, record: &PictureRecord) -> Result<u64, StoreError> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&record.date) {
            return Err(StoreError::Duplicate(record.date));
        }
        rows.insert(
            record.date,
            PictureRecord {
                raw: Vec::new(),
                ..record.clone()
            },
        );
        Ok(1)
    }

    async fn get_by_date(&self, date: NaiveDate) -> Result<Option<PictureRecord>, StoreError> {
        Ok(self.rows.read().await.get(&date).cloned())
    }

    async fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PictureRecord>, StoreError> {
        if start > end {
            return Ok(Vec::new());
        }
        Ok(self
            .rows
            .read()
            .await
            .range(start..=end)
            .map(|(_, r)| r.clone())
            .collect())
    }

    async fn delete_by_date(&self, date: NaiveDate) -> Result<u64, StoreError> {
        Ok(self.rows.write().await.remove(&date).map_or(0, |_| 1))
    }
}
