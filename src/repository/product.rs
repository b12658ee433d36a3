use chrono::Utc;
use diesel::prelude::*;

use crate::domain::product::{NewProduct, Product};
use crate::domain::types::{CategoryId, ImageId, ProductDescription, ProductId, ProductName};
use crate::models::product::{NewProduct as DbNewProduct, Product as DbProduct};
use crate::repository::association::{
    attach_categories, attach_images, ensure_categories_exist, ensure_images_exist, id_set,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ListQuery, ProductReader, ProductWriter};

impl ProductReader for DieselRepository {
    fn list_products(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let query_builder = || products::table.into_boxed::<diesel::sqlite::Sqlite>();

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.sql_offset())
                .limit(pagination.per_page as i64);
        }

        let items = items
            .order(products::created_at.desc())
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Product>, _>>()?;

        Ok((total, items))
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let product = products::table
            .filter(products::id.eq(id.get()))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        let product = product.map(TryInto::try_into).transpose()?;
        Ok(product)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(
        &self,
        product: &NewProduct,
        image_ids: &[ImageId],
        category_ids: &[CategoryId],
    ) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_product: DbNewProduct = product.clone().into();
        let image_ids = id_set(image_ids);
        let category_ids = id_set(category_ids);

        let created = conn.transaction::<_, RepositoryError, _>(|conn| {
            ensure_images_exist(conn, &image_ids)?;
            ensure_categories_exist(conn, &category_ids)?;

            let row = diesel::insert_into(products::table)
                .values(db_product)
                .get_result::<DbProduct>(conn)?;

            let now = Utc::now().naive_utc();
            attach_images(conn, row.id, &image_ids, now)?;
            attach_categories(conn, row.id, &category_ids, now)?;

            Ok(row)
        })?;

        Ok(created.try_into()?)
    }

    fn update_product(
        &self,
        id: ProductId,
        name: &ProductName,
        description: &ProductDescription,
        enable: bool,
    ) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let updated = diesel::update(products::table.filter(products::id.eq(id.get())))
            .set((
                products::name.eq(name.as_str()),
                products::description.eq(description.as_str()),
                products::enable.eq(enable),
                products::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbProduct>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize> {
        use crate::schema::{category_product, product_image, products};

        let mut conn = self.conn()?;

        let affected = conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(
                product_image::table.filter(product_image::product_id.eq(id.get())),
            )
            .execute(conn)?;

            diesel::delete(
                category_product::table.filter(category_product::product_id.eq(id.get())),
            )
            .execute(conn)?;

            Ok(diesel::delete(products::table.filter(products::id.eq(id.get()))).execute(conn)?)
        })?;

        Ok(affected)
    }
}
