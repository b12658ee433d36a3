use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::NewProduct;
use crate::domain::types::{
    CategoryId, ImageId, ProductDescription, ProductName, TypeConstraintError,
};

#[derive(Debug, Error)]
pub enum ProductFormError {
    #[error("Product form validation failed: {0}")]
    Validation(String),
    #[error(transparent)]
    Constraint(#[from] TypeConstraintError),
    #[error("{0} must be a non-empty array")]
    EmptyIdList(&'static str),
}

impl From<ValidationErrors> for ProductFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

/// JSON body accepted by product create and update.
///
/// `image_ids` and `category_ids` are optional initial associations; they are
/// applied on create and validated but ignored on update, where the PUT
/// association endpoints are the way to change the sets.
#[derive(Debug, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub enable: bool,
    #[serde(default)]
    pub image_ids: Option<Vec<i32>>,
    #[serde(default)]
    pub category_ids: Option<Vec<i32>>,
}

/// Validated product form fields.
#[derive(Debug, Clone)]
pub struct ProductFormPayload {
    pub name: ProductName,
    pub description: ProductDescription,
    pub enable: bool,
    pub image_ids: Vec<ImageId>,
    pub category_ids: Vec<CategoryId>,
}

fn parse_image_ids(ids: Vec<i32>) -> Result<Vec<ImageId>, TypeConstraintError> {
    ids.into_iter().map(ImageId::new).collect()
}

fn parse_category_ids(ids: Vec<i32>) -> Result<Vec<CategoryId>, TypeConstraintError> {
    ids.into_iter().map(CategoryId::new).collect()
}

impl TryFrom<ProductForm> for ProductFormPayload {
    type Error = ProductFormError;

    fn try_from(form: ProductForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            name: ProductName::new(form.name)?,
            description: ProductDescription::new(form.description)?,
            enable: form.enable,
            image_ids: parse_image_ids(form.image_ids.unwrap_or_default())?,
            category_ids: parse_category_ids(form.category_ids.unwrap_or_default())?,
        })
    }
}

impl ProductFormPayload {
    pub fn into_new_product(self) -> NewProduct {
        let now = Utc::now().naive_utc();
        NewProduct {
            name: self.name,
            description: self.description,
            enable: self.enable,
            created_at: now,
            updated_at: now,
        }
    }
}

/// JSON body of `PUT /products/{id}/images`: the full replacement image set.
#[derive(Debug, Deserialize)]
pub struct SetImagesForm {
    pub image_ids: Vec<i32>,
}

#[derive(Debug, Clone)]
pub struct SetImagesFormPayload {
    pub image_ids: Vec<ImageId>,
}

impl TryFrom<SetImagesForm> for SetImagesFormPayload {
    type Error = ProductFormError;

    fn try_from(form: SetImagesForm) -> Result<Self, Self::Error> {
        // Replace semantics never clear a set; an empty array is rejected so
        // "remove all" only ever happens through deletion.
        if form.image_ids.is_empty() {
            return Err(ProductFormError::EmptyIdList("image_ids"));
        }
        Ok(Self {
            image_ids: parse_image_ids(form.image_ids)?,
        })
    }
}

/// JSON body of `PUT /products/{id}/categories`.
#[derive(Debug, Deserialize)]
pub struct SetCategoriesForm {
    pub category_ids: Vec<i32>,
}

#[derive(Debug, Clone)]
pub struct SetCategoriesFormPayload {
    pub category_ids: Vec<CategoryId>,
}

impl TryFrom<SetCategoriesForm> for SetCategoriesFormPayload {
    type Error = ProductFormError;

    fn try_from(form: SetCategoriesForm) -> Result<Self, Self::Error> {
        if form.category_ids.is_empty() {
            return Err(ProductFormError::EmptyIdList("category_ids"));
        }
        Ok(Self {
            category_ids: parse_category_ids(form.category_ids)?,
        })
    }
}
