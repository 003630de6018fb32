use async_trait::async_trait;
use chrono::NaiveDate;
use common::PictureRecord;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, SqlErr};
use tracing::instrument;

use super::{PictureRepository, StoreError};
use crate::entity::picture;

/// Picture Store backed by the `pictures` table.
#[derive(Clone)]
pub struct DbPictureRepository {
    db: DatabaseConnection,
}

impl DbPictureRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PictureRepository for DbPictureRepository {
    #[instrument(skip(self, record), fields(date = %record.date))]
    async fn insert_one(&self, record: &PictureRecord) -> Result<u64, StoreError> {
        picture::Entity::insert(picture::ActiveModel::from(record))
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::Duplicate(record.date),
                _ => StoreError::Db(e),
            })
    }

    async fn get_by_date(&self, date: NaiveDate) -> Result<Option<PictureRecord>, StoreError> {
        let model = picture::Entity::find_by_id(date).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PictureRecord>, StoreError> {
        let models = picture::Entity::find()
            .filter(picture::Column::Date.between(start, end))
            .order_by_asc(picture::Column::Date)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn delete_by_date(&self, date: NaiveDate) -> Result<u64, StoreError> {
        let result = picture::Entity::delete_by_id(date).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}
