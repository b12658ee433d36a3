use chrono::Utc;
use diesel::prelude::*;

use crate::domain::types::EntityKind;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, EnableWriter};

impl EnableWriter for DieselRepository {
    fn set_enabled(&self, kind: EntityKind, id: i32, enable: bool) -> RepositoryResult<usize> {
        use crate::schema::{categories, images, products};

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        let affected = match kind {
            EntityKind::Category => {
                diesel::update(categories::table.filter(categories::id.eq(id)))
                    .set((categories::enable.eq(enable), categories::updated_at.eq(now)))
                    .execute(&mut conn)?
            }
            EntityKind::Image => diesel::update(images::table.filter(images::id.eq(id)))
                .set((images::enable.eq(enable), images::updated_at.eq(now)))
                .execute(&mut conn)?,
            EntityKind::Product => diesel::update(products::table.filter(products::id.eq(id)))
                .set((products::enable.eq(enable), products::updated_at.eq(now)))
                .execute(&mut conn)?,
        };

        Ok(affected)
    }
}
