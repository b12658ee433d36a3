use chrono::Utc;
use diesel::prelude::*;

use crate::domain::category::{Category, NewCategory};
use crate::domain::types::{CategoryId, CategoryName};
use crate::models::category::{Category as DbCategory, NewCategory as DbNewCategory};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository, ListQuery};

impl CategoryReader for DieselRepository {
    fn list_categories(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Category>)> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let query_builder = || categories::table.into_boxed::<diesel::sqlite::Sqlite>();

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.sql_offset())
                .limit(pagination.per_page as i64);
        }

        let items = items
            .order(categories::created_at.desc())
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok((total, items))
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::id.eq(id.get()))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_category: DbNewCategory = category.clone().into();

        let created = diesel::insert_into(categories::table)
            .values(db_category)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_category(
        &self,
        id: CategoryId,
        name: &CategoryName,
        enable: bool,
    ) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let updated = diesel::update(categories::table.filter(categories::id.eq(id.get())))
            .set((
                categories::name.eq(name.as_str()),
                categories::enable.eq(enable),
                categories::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbCategory>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        use crate::schema::{categories, category_product};

        let mut conn = self.conn()?;

        let affected = conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(
                category_product::table.filter(category_product::category_id.eq(id.get())),
            )
            .execute(conn)?;

            Ok(
                diesel::delete(categories::table.filter(categories::id.eq(id.get())))
                    .execute(conn)?,
            )
        })?;

        Ok(affected)
    }
}
