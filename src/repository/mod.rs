use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, NewCategory};
use crate::domain::image::{Image, NewImage};
use crate::domain::product::{NewProduct, Product};
use crate::domain::types::{
    CategoryId, CategoryName, EntityKind, ImageId, ImageName, ProductDescription, ProductId,
    ProductName, StoredFileName,
};
use crate::pagination::Pagination;
use crate::repository::errors::RepositoryResult;

pub mod association;
pub mod category;
pub mod enable;
pub mod errors;
pub mod image;
pub mod product;
#[cfg(test)]
pub mod test;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing any of the catalog collections.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Pagination parameters; `None` loads everything.
    pub pagination: Option<Pagination>,
}

impl ListQuery {
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List categories using the supplied query options.
    fn list_categories(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Category>)>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category and return the stored record.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Replace the mutable fields of a category.
    fn update_category(
        &self,
        id: CategoryId,
        name: &CategoryName,
        enable: bool,
    ) -> RepositoryResult<Category>;
    /// Delete a category, detaching its product links first.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}

/// Read-only operations for image entities.
pub trait ImageReader {
    /// List images using the supplied query options.
    fn list_images(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Image>)>;
    /// Retrieve an image by its identifier.
    fn get_image_by_id(&self, id: ImageId) -> RepositoryResult<Option<Image>>;
}

/// Write operations for image entities.
pub trait ImageWriter {
    /// Persist a batch of new images in one transaction, returning the
    /// stored records. Either every row persists or none do.
    fn create_images(&self, images: &[NewImage]) -> RepositoryResult<Vec<Image>>;
    /// Replace the mutable fields and, when supplied, the stored file
    /// reference.
    fn update_image(
        &self,
        id: ImageId,
        name: &ImageName,
        enable: bool,
        file: Option<&StoredFileName>,
    ) -> RepositoryResult<Image>;
    /// Delete an image, detaching its product links first.
    fn delete_image(&self, id: ImageId) -> RepositoryResult<usize>;
}

/// Read-only operations for product entities.
pub trait ProductReader {
    /// List products using the supplied query options.
    fn list_products(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    /// Retrieve a product by its identifier.
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
}

/// Write operations for product entities.
pub trait ProductWriter {
    /// Persist a new product together with its initial associations in one
    /// transaction. Every referenced id must exist; empty slices attach
    /// nothing.
    fn create_product(
        &self,
        product: &NewProduct,
        image_ids: &[ImageId],
        category_ids: &[CategoryId],
    ) -> RepositoryResult<Product>;
    /// Replace the mutable fields of a product.
    fn update_product(
        &self,
        id: ProductId,
        name: &ProductName,
        description: &ProductDescription,
        enable: bool,
    ) -> RepositoryResult<Product>;
    /// Delete a product, detaching its image and category links first.
    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize>;
}

/// Read-only operations over the product↔image and product↔category links.
pub trait AssociationReader {
    /// Images attached to a product.
    fn list_product_images(&self, product_id: ProductId) -> RepositoryResult<Vec<Image>>;
    /// Categories attached to a product.
    fn list_product_categories(&self, product_id: ProductId) -> RepositoryResult<Vec<Category>>;
    /// Products attached to a category.
    fn list_category_products(&self, category_id: CategoryId) -> RepositoryResult<Vec<Product>>;
    /// Products attached to an image.
    fn list_image_products(&self, image_id: ImageId) -> RepositoryResult<Vec<Product>>;
}

/// Atomic replace operations over the association link tables.
///
/// Replacement substitutes the entire existing set with the supplied one in
/// a single transaction; there are no additive merge semantics. A failed
/// replacement leaves the existing links untouched.
pub trait AssociationWriter {
    /// Replace a product's image set with exactly `image_ids`.
    fn replace_product_images(
        &self,
        product_id: ProductId,
        image_ids: &[ImageId],
    ) -> RepositoryResult<usize>;
    /// Replace a product's category set with exactly `category_ids`.
    fn replace_product_categories(
        &self,
        product_id: ProductId,
        category_ids: &[CategoryId],
    ) -> RepositoryResult<usize>;
}

/// Enable/disable transitions applied uniformly across the catalog tables.
pub trait EnableWriter {
    /// Set the `enable` flag of one entity, returning the number of rows
    /// updated (zero when the id does not exist).
    fn set_enabled(&self, kind: EntityKind, id: i32, enable: bool) -> RepositoryResult<usize>;
}
