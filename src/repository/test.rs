use std::sync::Mutex;

use crate::domain::category::{Category, NewCategory};
use crate::domain::image::{Image, NewImage};
use crate::domain::product::{NewProduct, Product};
use crate::domain::types::{
    CategoryId, CategoryName, EntityKind, ImageId, ImageName, ProductDescription, ProductId,
    ProductName, StoredFileName,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    AssociationReader, AssociationWriter, CategoryReader, CategoryWriter, EnableWriter,
    ImageReader, ImageWriter, ListQuery, ProductReader, ProductWriter,
};

#[derive(Default)]
struct State {
    categories: Vec<Category>,
    images: Vec<Image>,
    products: Vec<Product>,
    /// (product_id, image_id) pairs.
    product_images: Vec<(i32, i32)>,
    /// (product_id, category_id) pairs.
    category_products: Vec<(i32, i32)>,
    next_id: i32,
}

/// Simple in-memory repository used for unit tests.
#[derive(Default)]
pub struct TestRepository {
    state: Mutex<State>,
}

impl TestRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                next_id: 1,
                ..State::default()
            }),
        }
    }

    pub fn with_categories(self, categories: Vec<Category>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.next_id = state
                .next_id
                .max(categories.iter().map(|c| c.id.get()).max().unwrap_or(0) + 1);
            state.categories = categories;
        }
        self
    }

    pub fn with_images(self, images: Vec<Image>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.next_id = state
                .next_id
                .max(images.iter().map(|i| i.id.get()).max().unwrap_or(0) + 1);
            state.images = images;
        }
        self
    }

    pub fn with_products(self, products: Vec<Product>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.next_id = state
                .next_id
                .max(products.iter().map(|p| p.id.get()).max().unwrap_or(0) + 1);
            state.products = products;
        }
        self
    }

    pub fn with_product_images(self, links: Vec<(i32, i32)>) -> Self {
        self.state.lock().unwrap().product_images = links;
        self
    }

    pub fn with_category_products(self, links: Vec<(i32, i32)>) -> Self {
        self.state.lock().unwrap().category_products = links;
        self
    }

    /// Raw (product_id, image_id) pairs currently stored.
    pub fn product_image_links(&self) -> Vec<(i32, i32)> {
        self.state.lock().unwrap().product_images.clone()
    }

    /// Raw (product_id, category_id) pairs currently stored.
    pub fn category_product_links(&self) -> Vec<(i32, i32)> {
        self.state.lock().unwrap().category_products.clone()
    }

    fn take_id(state: &mut State) -> i32 {
        let id = state.next_id;
        state.next_id += 1;
        id
    }
}

impl CategoryReader for TestRepository {
    fn list_categories(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Category>)> {
        let state = self.state.lock().unwrap();
        let total = state.categories.len();
        let mut items = state.categories.clone();
        if let Some(pagination) = query.pagination {
            items = items
                .into_iter()
                .skip(pagination.offset())
                .take(pagination.per_page)
                .collect();
        }
        Ok((total, items))
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        let state = self.state.lock().unwrap();
        Ok(state.categories.iter().find(|c| c.id == id).cloned())
    }
}

impl CategoryWriter for TestRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        let mut state = self.state.lock().unwrap();
        let id = Self::take_id(&mut state);
        let created = Category {
            id: CategoryId::new(id)?,
            name: category.name.clone(),
            enable: category.enable,
            created_at: category.created_at,
            updated_at: category.updated_at,
        };
        state.categories.push(created.clone());
        Ok(created)
    }

    fn update_category(
        &self,
        id: CategoryId,
        name: &CategoryName,
        enable: bool,
    ) -> RepositoryResult<Category> {
        let mut state = self.state.lock().unwrap();
        let category = state
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RepositoryError::Database(diesel::result::Error::NotFound))?;
        category.name = name.clone();
        category.enable = enable;
        Ok(category.clone())
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        let mut state = self.state.lock().unwrap();
        state.category_products.retain(|&(_, c)| c != id.get());
        let before = state.categories.len();
        state.categories.retain(|c| c.id != id);
        Ok(before - state.categories.len())
    }
}

impl ImageReader for TestRepository {
    fn list_images(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Image>)> {
        let state = self.state.lock().unwrap();
        let total = state.images.len();
        let mut items = state.images.clone();
        if let Some(pagination) = query.pagination {
            items = items
                .into_iter()
                .skip(pagination.offset())
                .take(pagination.per_page)
                .collect();
        }
        Ok((total, items))
    }

    fn get_image_by_id(&self, id: ImageId) -> RepositoryResult<Option<Image>> {
        let state = self.state.lock().unwrap();
        Ok(state.images.iter().find(|i| i.id == id).cloned())
    }
}

impl ImageWriter for TestRepository {
    fn create_images(&self, images: &[NewImage]) -> RepositoryResult<Vec<Image>> {
        let mut state = self.state.lock().unwrap();
        let mut created = Vec::with_capacity(images.len());
        for image in images {
            let id = Self::take_id(&mut state);
            let row = Image {
                id: ImageId::new(id)?,
                name: image.name.clone(),
                file: image.file.clone(),
                enable: image.enable,
                created_at: image.created_at,
                updated_at: image.updated_at,
            };
            state.images.push(row.clone());
            created.push(row);
        }
        Ok(created)
    }

    fn update_image(
        &self,
        id: ImageId,
        name: &ImageName,
        enable: bool,
        file: Option<&StoredFileName>,
    ) -> RepositoryResult<Image> {
        let mut state = self.state.lock().unwrap();
        let image = state
            .images
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(RepositoryError::Database(diesel::result::Error::NotFound))?;
        image.name = name.clone();
        image.enable = enable;
        if let Some(file) = file {
            image.file = file.clone();
        }
        Ok(image.clone())
    }

    fn delete_image(&self, id: ImageId) -> RepositoryResult<usize> {
        let mut state = self.state.lock().unwrap();
        state.product_images.retain(|&(_, i)| i != id.get());
        let before = state.images.len();
        state.images.retain(|i| i.id != id);
        Ok(before - state.images.len())
    }
}

impl ProductReader for TestRepository {
    fn list_products(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        let state = self.state.lock().unwrap();
        let total = state.products.len();
        let mut items = state.products.clone();
        if let Some(pagination) = query.pagination {
            items = items
                .into_iter()
                .skip(pagination.offset())
                .take(pagination.per_page)
                .collect();
        }
        Ok((total, items))
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        let state = self.state.lock().unwrap();
        Ok(state.products.iter().find(|p| p.id == id).cloned())
    }
}

impl ProductWriter for TestRepository {
    fn create_product(
        &self,
        product: &NewProduct,
        image_ids: &[ImageId],
        category_ids: &[CategoryId],
    ) -> RepositoryResult<Product> {
        let mut state = self.state.lock().unwrap();

        if !image_ids
            .iter()
            .all(|id| state.images.iter().any(|i| i.id == *id))
        {
            return Err(RepositoryError::Validation(
                "image_ids reference images that do not exist".into(),
            ));
        }
        if !category_ids
            .iter()
            .all(|id| state.categories.iter().any(|c| c.id == *id))
        {
            return Err(RepositoryError::Validation(
                "category_ids reference categories that do not exist".into(),
            ));
        }

        let id = Self::take_id(&mut state);
        let created = Product {
            id: ProductId::new(id)?,
            name: product.name.clone(),
            description: product.description.clone(),
            enable: product.enable,
            created_at: product.created_at,
            updated_at: product.updated_at,
        };
        state.products.push(created.clone());
        for image_id in image_ids {
            state.product_images.push((id, image_id.get()));
        }
        for category_id in category_ids {
            state.category_products.push((id, category_id.get()));
        }
        Ok(created)
    }

    fn update_product(
        &self,
        id: ProductId,
        name: &ProductName,
        description: &ProductDescription,
        enable: bool,
    ) -> RepositoryResult<Product> {
        let mut state = self.state.lock().unwrap();
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::Database(diesel::result::Error::NotFound))?;
        product.name = name.clone();
        product.description = description.clone();
        product.enable = enable;
        Ok(product.clone())
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize> {
        let mut state = self.state.lock().unwrap();
        state.product_images.retain(|&(p, _)| p != id.get());
        state.category_products.retain(|&(p, _)| p != id.get());
        let before = state.products.len();
        state.products.retain(|p| p.id != id);
        Ok(before - state.products.len())
    }
}

impl AssociationReader for TestRepository {
    fn list_product_images(&self, product_id: ProductId) -> RepositoryResult<Vec<Image>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .images
            .iter()
            .filter(|i| {
                state
                    .product_images
                    .iter()
                    .any(|&(p, img)| p == product_id.get() && img == i.id.get())
            })
            .cloned()
            .collect())
    }

    fn list_product_categories(&self, product_id: ProductId) -> RepositoryResult<Vec<Category>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .categories
            .iter()
            .filter(|c| {
                state
                    .category_products
                    .iter()
                    .any(|&(p, cat)| p == product_id.get() && cat == c.id.get())
            })
            .cloned()
            .collect())
    }

    fn list_category_products(&self, category_id: CategoryId) -> RepositoryResult<Vec<Product>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .products
            .iter()
            .filter(|p| {
                state
                    .category_products
                    .iter()
                    .any(|&(prod, cat)| cat == category_id.get() && prod == p.id.get())
            })
            .cloned()
            .collect())
    }

    fn list_image_products(&self, image_id: ImageId) -> RepositoryResult<Vec<Product>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .products
            .iter()
            .filter(|p| {
                state
                    .product_images
                    .iter()
                    .any(|&(prod, img)| img == image_id.get() && prod == p.id.get())
            })
            .cloned()
            .collect())
    }
}

impl AssociationWriter for TestRepository {
    fn replace_product_images(
        &self,
        product_id: ProductId,
        image_ids: &[ImageId],
    ) -> RepositoryResult<usize> {
        let mut state = self.state.lock().unwrap();
        if !image_ids
            .iter()
            .all(|id| state.images.iter().any(|i| i.id == *id))
        {
            return Err(RepositoryError::Validation(
                "image_ids reference images that do not exist".into(),
            ));
        }
        state.product_images.retain(|&(p, _)| p != product_id.get());
        for image_id in image_ids {
            state.product_images.push((product_id.get(), image_id.get()));
        }
        Ok(image_ids.len())
    }

    fn replace_product_categories(
        &self,
        product_id: ProductId,
        category_ids: &[CategoryId],
    ) -> RepositoryResult<usize> {
        let mut state = self.state.lock().unwrap();
        if !category_ids
            .iter()
            .all(|id| state.categories.iter().any(|c| c.id == *id))
        {
            return Err(RepositoryError::Validation(
                "category_ids reference categories that do not exist".into(),
            ));
        }
        state
            .category_products
            .retain(|&(p, _)| p != product_id.get());
        for category_id in category_ids {
            state
                .category_products
                .push((product_id.get(), category_id.get()));
        }
        Ok(category_ids.len())
    }
}

impl EnableWriter for TestRepository {
    fn set_enabled(&self, kind: EntityKind, id: i32, enable: bool) -> RepositoryResult<usize> {
        let mut state = self.state.lock().unwrap();
        let affected = match kind {
            EntityKind::Category => state
                .categories
                .iter_mut()
                .filter(|c| c.id == id)
                .map(|c| c.enable = enable)
                .count(),
            EntityKind::Image => state
                .images
                .iter_mut()
                .filter(|i| i.id == id)
                .map(|i| i.enable = enable)
                .count(),
            EntityKind::Product => state
                .products
                .iter_mut()
                .filter(|p| p.id == id)
                .map(|p| p.enable = enable)
                .count(),
        };
        Ok(affected)
    }
}
