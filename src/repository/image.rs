use chrono::Utc;
use diesel::prelude::*;

use crate::domain::image::{Image, NewImage};
use crate::domain::types::{ImageId, ImageName, StoredFileName};
use crate::models::image::{Image as DbImage, NewImage as DbNewImage};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ImageReader, ImageWriter, ListQuery};

impl ImageReader for DieselRepository {
    fn list_images(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Image>)> {
        use crate::schema::images;

        let mut conn = self.conn()?;

        let query_builder = || images::table.into_boxed::<diesel::sqlite::Sqlite>();

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.sql_offset())
                .limit(pagination.per_page as i64);
        }

        let items = items
            .order(images::created_at.desc())
            .load::<DbImage>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Image>, _>>()?;

        Ok((total, items))
    }

    fn get_image_by_id(&self, id: ImageId) -> RepositoryResult<Option<Image>> {
        use crate::schema::images;

        let mut conn = self.conn()?;

        let image = images::table
            .filter(images::id.eq(id.get()))
            .first::<DbImage>(&mut conn)
            .optional()?;

        let image = image.map(TryInto::try_into).transpose()?;
        Ok(image)
    }
}

impl ImageWriter for DieselRepository {
    fn create_images(&self, images: &[NewImage]) -> RepositoryResult<Vec<Image>> {
        use crate::schema::images as images_table;

        let mut conn = self.conn()?;

        let created = conn.transaction::<_, RepositoryError, _>(|conn| {
            let mut created = Vec::with_capacity(images.len());
            for image in images {
                let db_image: DbNewImage = image.clone().into();
                let row = diesel::insert_into(images_table::table)
                    .values(db_image)
                    .get_result::<DbImage>(conn)?;
                created.push(row.try_into()?);
            }
            Ok(created)
        })?;

        Ok(created)
    }

    fn update_image(
        &self,
        id: ImageId,
        name: &ImageName,
        enable: bool,
        file: Option<&StoredFileName>,
    ) -> RepositoryResult<Image> {
        use crate::schema::images;

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        let updated = match file {
            Some(file) => diesel::update(images::table.filter(images::id.eq(id.get())))
                .set((
                    images::name.eq(name.as_str()),
                    images::enable.eq(enable),
                    images::file.eq(file.as_str()),
                    images::updated_at.eq(now),
                ))
                .get_result::<DbImage>(&mut conn)?,
            None => diesel::update(images::table.filter(images::id.eq(id.get())))
                .set((
                    images::name.eq(name.as_str()),
                    images::enable.eq(enable),
                    images::updated_at.eq(now),
                ))
                .get_result::<DbImage>(&mut conn)?,
        };

        Ok(updated.try_into()?)
    }

    fn delete_image(&self, id: ImageId) -> RepositoryResult<usize> {
        use crate::schema::{images, product_image};

        let mut conn = self.conn()?;

        let affected = conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(product_image::table.filter(product_image::image_id.eq(id.get())))
                .execute(conn)?;

            Ok(diesel::delete(images::table.filter(images::id.eq(id.get()))).execute(conn)?)
        })?;

        Ok(affected)
    }
}
