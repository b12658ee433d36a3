use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::category::Category;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub enable: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            enable: value.enable,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
