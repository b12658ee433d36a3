use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use chrono::Utc;
use diesel::prelude::*;

use crate::domain::category::Category;
use crate::domain::image::Image;
use crate::domain::product::Product;
use crate::domain::types::{CategoryId, ImageId, ProductId};
use crate::models::category::Category as DbCategory;
use crate::models::image::Image as DbImage;
use crate::models::links::{CategoryProduct, ProductImage};
use crate::models::product::Product as DbProduct;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AssociationReader, AssociationWriter, DieselRepository};

/// Fail unless every image id is present in the `images` table.
///
/// Runs inside the caller's transaction so a replacement that references a
/// missing id leaves the existing links untouched.
pub(crate) fn ensure_images_exist(
    conn: &mut SqliteConnection,
    ids: &BTreeSet<i32>,
) -> Result<(), RepositoryError> {
    use crate::schema::images;

    let found = images::table
        .filter(images::id.eq_any(ids))
        .count()
        .get_result::<i64>(conn)? as usize;

    if found != ids.len() {
        return Err(RepositoryError::Validation(
            "image_ids reference images that do not exist".into(),
        ));
    }

    Ok(())
}

/// Fail unless every category id is present in the `categories` table.
pub(crate) fn ensure_categories_exist(
    conn: &mut SqliteConnection,
    ids: &BTreeSet<i32>,
) -> Result<(), RepositoryError> {
    use crate::schema::categories;

    let found = categories::table
        .filter(categories::id.eq_any(ids))
        .count()
        .get_result::<i64>(conn)? as usize;

    if found != ids.len() {
        return Err(RepositoryError::Validation(
            "category_ids reference categories that do not exist".into(),
        ));
    }

    Ok(())
}

/// Insert one `product_image` link row per id, stamped with `now`.
pub(crate) fn attach_images(
    conn: &mut SqliteConnection,
    product_id: i32,
    ids: &BTreeSet<i32>,
    now: NaiveDateTime,
) -> QueryResult<usize> {
    use crate::schema::product_image;

    let rows = ids
        .iter()
        .map(|&image_id| ProductImage {
            product_id,
            image_id,
            created_at: now,
            updated_at: now,
        })
        .collect::<Vec<_>>();

    diesel::insert_into(product_image::table)
        .values(&rows)
        .execute(conn)
}

/// Insert one `category_product` link row per id, stamped with `now`.
pub(crate) fn attach_categories(
    conn: &mut SqliteConnection,
    product_id: i32,
    ids: &BTreeSet<i32>,
    now: NaiveDateTime,
) -> QueryResult<usize> {
    use crate::schema::category_product;

    let rows = ids
        .iter()
        .map(|&category_id| CategoryProduct {
            product_id,
            category_id,
            created_at: now,
            updated_at: now,
        })
        .collect::<Vec<_>>();

    diesel::insert_into(category_product::table)
        .values(&rows)
        .execute(conn)
}

/// Collapse raw ids into a set, dropping duplicates.
pub(crate) fn id_set<I: Copy + Into<i32>>(ids: &[I]) -> BTreeSet<i32> {
    ids.iter().map(|&id| id.into()).collect()
}

impl AssociationReader for DieselRepository {
    fn list_product_images(&self, product_id: ProductId) -> RepositoryResult<Vec<Image>> {
        use crate::schema::{images, product_image};

        let mut conn = self.conn()?;

        let items = product_image::table
            .inner_join(images::table)
            .filter(product_image::product_id.eq(product_id.get()))
            .select(images::all_columns)
            .order(images::id.asc())
            .load::<DbImage>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Image>, _>>()?;

        Ok(items)
    }

    fn list_product_categories(&self, product_id: ProductId) -> RepositoryResult<Vec<Category>> {
        use crate::schema::{categories, category_product};

        let mut conn = self.conn()?;

        let items = category_product::table
            .inner_join(categories::table)
            .filter(category_product::product_id.eq(product_id.get()))
            .select(categories::all_columns)
            .order(categories::id.asc())
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }

    fn list_category_products(&self, category_id: CategoryId) -> RepositoryResult<Vec<Product>> {
        use crate::schema::{category_product, products};

        let mut conn = self.conn()?;

        let items = category_product::table
            .inner_join(products::table)
            .filter(category_product::category_id.eq(category_id.get()))
            .select(products::all_columns)
            .order(products::id.asc())
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Product>, _>>()?;

        Ok(items)
    }

    fn list_image_products(&self, image_id: ImageId) -> RepositoryResult<Vec<Product>> {
        use crate::schema::{product_image, products};

        let mut conn = self.conn()?;

        let items = product_image::table
            .inner_join(products::table)
            .filter(product_image::image_id.eq(image_id.get()))
            .select(products::all_columns)
            .order(products::id.asc())
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Product>, _>>()?;

        Ok(items)
    }
}

impl AssociationWriter for DieselRepository {
    fn replace_product_images(
        &self,
        product_id: ProductId,
        image_ids: &[ImageId],
    ) -> RepositoryResult<usize> {
        use crate::schema::product_image;

        let mut conn = self.conn()?;
        let ids = id_set(image_ids);

        let inserted = conn.transaction::<_, RepositoryError, _>(|conn| {
            ensure_images_exist(conn, &ids)?;

            diesel::delete(
                product_image::table.filter(product_image::product_id.eq(product_id.get())),
            )
            .execute(conn)?;

            Ok(attach_images(conn, product_id.get(), &ids, Utc::now().naive_utc())?)
        })?;

        Ok(inserted)
    }

    fn replace_product_categories(
        &self,
        product_id: ProductId,
        category_ids: &[CategoryId],
    ) -> RepositoryResult<usize> {
        use crate::schema::category_product;

        let mut conn = self.conn()?;
        let ids = id_set(category_ids);

        let inserted = conn.transaction::<_, RepositoryError, _>(|conn| {
            ensure_categories_exist(conn, &ids)?;

            diesel::delete(
                category_product::table.filter(category_product::product_id.eq(product_id.get())),
            )
            .execute(conn)?;

            Ok(attach_categories(conn, product_id.get(), &ids, Utc::now().naive_utc())?)
        })?;

        Ok(inserted)
    }
}
