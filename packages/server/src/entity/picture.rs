use common::{MediaType, PictureRecord};
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Metadata of one stored picture of the day. The payload lives on disk.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pictures")]
pub struct Model {
    /// One row per day.
    #[sea_orm(primary_key, auto_increment = false)]
    pub date: Date,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub url: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub hd_url: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub thumbnail_url: Option<String>,

    pub media_type: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub copyright: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub explanation: String,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PictureRecord {
    fn from(m: Model) -> Self {
        Self {
            date: m.date,
            title: m.title,
            url: m.url,
            hd_url: m.hd_url,
            thumbnail_url: m.thumbnail_url,
            media_type: MediaType::from(m.media_type),
            copyright: m.copyright,
            explanation: m.explanation,
            raw: Vec::new(),
        }
    }
}

impl From<&PictureRecord> for ActiveModel {
    fn from(r: &PictureRecord) -> Self {
        Self {
            date: Set(r.date),
            title: Set(r.title.clone()),
            url: Set(r.url.clone()),
            hd_url: Set(r.hd_url.clone()),
            thumbnail_url: Set(r.thumbnail_url.clone()),
            media_type: Set(r.media_type.to_string()),
            copyright: Set(r.copyright.clone()),
            explanation: Set(r.explanation.clone()),
        }
    }
}
