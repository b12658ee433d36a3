use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::product::Product;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub enable: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for ProductDto {
    fn from(value: Product) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            description: value.description.into_inner(),
            enable: value.enable,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
