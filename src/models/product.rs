use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{Product as DomainProduct, NewProduct as DomainNewProduct};
use crate::domain::types::{ProductDescription, ProductName, TypeConstraintError};

/// Diesel model representing the `products` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub enable: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Product`].
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub enable: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Product> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: product.id.try_into()?,
            name: ProductName::new(product.name)?,
            description: ProductDescription::new(product.description)?,
            enable: product.enable,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }
}

impl From<DomainNewProduct> for NewProduct {
    fn from(product: DomainNewProduct) -> Self {
        Self {
            name: product.name.into_inner(),
            description: product.description.into_inner(),
            enable: product.enable,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
