use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::image::{Image as DomainImage, NewImage as DomainNewImage};
use crate::domain::types::{ImageName, StoredFileName, TypeConstraintError};

/// Diesel model representing the `images` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::images)]
pub struct Image {
    pub id: i32,
    pub name: String,
    pub file: String,
    pub enable: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Image`].
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::images)]
pub struct NewImage {
    pub name: String,
    pub file: String,
    pub enable: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Image> for DomainImage {
    type Error = TypeConstraintError;

    fn try_from(image: Image) -> Result<Self, Self::Error> {
        Ok(Self {
            id: image.id.try_into()?,
            name: ImageName::new(image.name)?,
            file: StoredFileName::new(image.file)?,
            enable: image.enable,
            created_at: image.created_at,
            updated_at: image.updated_at,
        })
    }
}

impl From<DomainNewImage> for NewImage {
    fn from(image: DomainNewImage) -> Self {
        Self {
            name: image.name.into_inner(),
            file: image.file.into_inner(),
            enable: image.enable,
            created_at: image.created_at,
            updated_at: image.updated_at,
        }
    }
}
