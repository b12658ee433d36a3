use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::image::Image;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImageDto {
    pub id: i32,
    pub name: String,
    pub file: String,
    pub enable: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Image> for ImageDto {
    fn from(value: Image) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            file: value.file.into_inner(),
            enable: value.enable,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
