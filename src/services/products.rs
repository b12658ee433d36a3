use crate::domain::category::Category;
use crate::domain::image::Image;
use crate::domain::product::Product;
use crate::domain::types::{CategoryId, ImageId, ProductId};
use crate::forms::products::{
    ProductFormPayload, SetCategoriesFormPayload, SetImagesFormPayload,
};
use crate::pagination::Paginated;
use crate::repository::{
    AssociationReader, AssociationWriter, ListQuery, ProductReader, ProductWriter,
};

use super::{ServiceError, ServiceResult, map_repository_error, pagination_params};

fn parse_id(id: i32) -> ServiceResult<ProductId> {
    ProductId::new(id).map_err(|_| ServiceError::Validation("ID must be greater than 0.".into()))
}

fn load_product<R>(id: ProductId, repo: &R) -> ServiceResult<Product>
where
    R: ProductReader,
{
    match repo.get_product_by_id(id) {
        Ok(Some(product)) => Ok(product),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(map_repository_error("get the product", e)),
    }
}

pub fn list_products<R>(
    page: Option<usize>,
    size: Option<i64>,
    repo: &R,
) -> ServiceResult<Paginated<Product>>
where
    R: ProductReader,
{
    let pagination = pagination_params(page, size)?;

    let query = ListQuery::default().paginate(pagination.page, pagination.per_page);
    match repo.list_products(query) {
        Ok((total, items)) => Ok(Paginated::new(items, total, pagination)),
        Err(e) => Err(map_repository_error("list products", e)),
    }
}

pub fn get_product<R>(id: i32, repo: &R) -> ServiceResult<Product>
where
    R: ProductReader,
{
    load_product(parse_id(id)?, repo)
}

/// Create a product together with its initial associations in one
/// transaction. Absent id lists attach nothing; every supplied id must
/// reference an existing row.
pub fn create_product<R>(payload: ProductFormPayload, repo: &R) -> ServiceResult<Product>
where
    R: ProductWriter,
{
    let image_ids = payload.image_ids.clone();
    let category_ids = payload.category_ids.clone();

    repo.create_product(&payload.into_new_product(), &image_ids, &category_ids)
        .map_err(|e| map_repository_error("create the product", e))
}

/// Replace the product's own fields. Association ids in the payload were
/// validated at the boundary but are not applied here; the dedicated set
/// endpoints own association changes.
pub fn update_product<R>(id: i32, payload: ProductFormPayload, repo: &R) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter,
{
    let id = parse_id(id)?;
    load_product(id, repo)?;

    repo.update_product(id, &payload.name, &payload.description, payload.enable)
        .map_err(|e| map_repository_error("update the product", e))
}

/// Delete a product, detaching all of its image and category links first.
/// Returns the record that was removed.
pub fn delete_product<R>(id: i32, repo: &R) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter,
{
    let id = parse_id(id)?;
    let product = load_product(id, repo)?;

    match repo.delete_product(id) {
        Ok(_) => Ok(product),
        Err(e) => Err(map_repository_error("delete the product", e)),
    }
}

/// The product together with its associated images; the route decides how
/// to render an empty set.
pub fn product_images<R>(id: i32, repo: &R) -> ServiceResult<(Product, Vec<Image>)>
where
    R: ProductReader + AssociationReader,
{
    let id = parse_id(id)?;
    let product = load_product(id, repo)?;

    let images = repo
        .list_product_images(id)
        .map_err(|e| map_repository_error("list product images", e))?;

    Ok((product, images))
}

/// The product together with its associated categories.
pub fn product_categories<R>(id: i32, repo: &R) -> ServiceResult<(Product, Vec<Category>)>
where
    R: ProductReader + AssociationReader,
{
    let id = parse_id(id)?;
    let product = load_product(id, repo)?;

    let categories = repo
        .list_product_categories(id)
        .map_err(|e| map_repository_error("list product categories", e))?;

    Ok((product, categories))
}

/// Atomically replace the product's image set with exactly the supplied ids.
pub fn set_images<R>(
    id: i32,
    payload: SetImagesFormPayload,
    repo: &R,
) -> ServiceResult<Vec<ImageId>>
where
    R: ProductReader + AssociationWriter,
{
    let id = parse_id(id)?;
    load_product(id, repo)?;

    match repo.replace_product_images(id, &payload.image_ids) {
        Ok(_) => Ok(payload.image_ids),
        Err(e) => Err(map_repository_error("assign images to the product", e)),
    }
}

/// Atomically replace the product's category set with exactly the supplied
/// ids.
pub fn set_categories<R>(
    id: i32,
    payload: SetCategoriesFormPayload,
    repo: &R,
) -> ServiceResult<Vec<CategoryId>>
where
    R: ProductReader + AssociationWriter,
{
    let id = parse_id(id)?;
    load_product(id, repo)?;

    match repo.replace_product_categories(id, &payload.category_ids) {
        Ok(_) => Ok(payload.category_ids),
        Err(e) => Err(map_repository_error("assign categories to the product", e)),
    }
}
