use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ProductDescription, ProductId, ProductName};

/// Canonical product record.
///
/// Associations to categories and images live in the link tables and are
/// accessed through the repository, not carried on the record itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub description: ProductDescription,
    pub enable: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Product`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub name: ProductName,
    pub description: ProductDescription,
    pub enable: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
