use chrono::NaiveDateTime;
use diesel::prelude::*;

/// Diesel model representing the `category_product` link table.
#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = crate::schema::category_product)]
pub struct CategoryProduct {
    pub product_id: i32,
    pub category_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Diesel model representing the `product_image` link table.
#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = crate::schema::product_image)]
pub struct ProductImage {
    pub product_id: i32,
    pub image_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
