use crate::domain::category::Category;
use crate::domain::product::Product;
use crate::domain::types::CategoryId;
use crate::forms::categories::CategoryFormPayload;
use crate::pagination::Paginated;
use crate::repository::{AssociationReader, CategoryReader, CategoryWriter, ListQuery};

use super::{ServiceError, ServiceResult, map_repository_error, pagination_params};

fn parse_id(id: i32) -> ServiceResult<CategoryId> {
    CategoryId::new(id)
        .map_err(|_| ServiceError::Validation("ID must be greater than 0.".into()))
}

pub fn list_categories<R>(
    page: Option<usize>,
    size: Option<i64>,
    repo: &R,
) -> ServiceResult<Paginated<Category>>
where
    R: CategoryReader,
{
    let pagination = pagination_params(page, size)?;

    let query = ListQuery::default().paginate(pagination.page, pagination.per_page);
    match repo.list_categories(query) {
        Ok((total, items)) => Ok(Paginated::new(items, total, pagination)),
        Err(e) => Err(map_repository_error("list categories", e)),
    }
}

pub fn create_category<R>(payload: CategoryFormPayload, repo: &R) -> ServiceResult<Category>
where
    R: CategoryWriter,
{
    repo.create_category(&payload.into_new_category())
        .map_err(|e| map_repository_error("create the category", e))
}

pub fn get_category<R>(id: i32, repo: &R) -> ServiceResult<Category>
where
    R: CategoryReader,
{
    let id = parse_id(id)?;

    match repo.get_category_by_id(id) {
        Ok(Some(category)) => Ok(category),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(map_repository_error("get the category", e)),
    }
}

pub fn update_category<R>(
    id: i32,
    payload: CategoryFormPayload,
    repo: &R,
) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter,
{
    let id = parse_id(id)?;

    match repo.get_category_by_id(id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => return Err(map_repository_error("get the category", e)),
    }

    repo.update_category(id, &payload.name, payload.enable)
        .map_err(|e| map_repository_error("update the category", e))
}

/// Delete a category, detaching its product links first. Returns the record
/// that was removed.
pub fn delete_category<R>(id: i32, repo: &R) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter,
{
    let id = parse_id(id)?;

    let category = match repo.get_category_by_id(id) {
        Ok(Some(category)) => category,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => return Err(map_repository_error("get the category", e)),
    };

    match repo.delete_category(id) {
        Ok(_) => Ok(category),
        Err(e) => Err(map_repository_error("delete the category", e)),
    }
}

/// The category together with its associated products; the route decides how
/// to render an empty set.
pub fn category_products<R>(id: i32, repo: &R) -> ServiceResult<(Category, Vec<Product>)>
where
    R: CategoryReader + AssociationReader,
{
    let id = parse_id(id)?;

    let category = match repo.get_category_by_id(id) {
        Ok(Some(category)) => category,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => return Err(map_repository_error("get the category", e)),
    };

    let products = repo
        .list_category_products(id)
        .map_err(|e| map_repository_error("list category products", e))?;

    Ok((category, products))
}
