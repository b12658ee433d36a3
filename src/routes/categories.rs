use actix_web::http::StatusCode;
use actix_web::{Responder, delete, get, patch, post, route, web};

use crate::domain::types::{EnableAction, EntityKind};
use crate::dto::categories::CategoryDto;
use crate::dto::products::ProductDto;
use crate::forms::categories::{CategoryForm, CategoryFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{ListQueryParams, error_message, service_error, success, validation_failed};
use crate::services::categories::{
    category_products as category_products_service, create_category as create_category_service,
    delete_category as delete_category_service, get_category as get_category_service,
    list_categories as list_categories_service, update_category as update_category_service,
};
use crate::services::enable::set_enabled as set_enabled_service;

const KIND: EntityKind = EntityKind::Category;

#[get("/categories")]
pub async fn list_categories(
    params: web::Query<ListQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match list_categories_service(params.page, params.size, repo.get_ref()) {
        Ok(page) => success(
            "Categories retrieved successfully",
            page.map(CategoryDto::from),
        ),
        Err(err) => service_error(err, KIND, 0),
    }
}

#[post("/categories")]
pub async fn create_category(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CategoryForm>,
) -> impl Responder {
    let payload: CategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return validation_failed(vec![e.to_string()]),
    };

    match create_category_service(payload, repo.get_ref()) {
        Ok(category) => success(
            "New category has been created.",
            CategoryDto::from(category),
        ),
        Err(err) => service_error(err, KIND, 0),
    }
}

#[get("/categories/{id}")]
pub async fn get_category(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = id.into_inner();
    match get_category_service(id, repo.get_ref()) {
        Ok(category) => success(
            "Category retrieved successfully",
            CategoryDto::from(category),
        ),
        Err(err) => service_error(err, KIND, id),
    }
}

#[route("/categories/{id}", method = "PUT", method = "PATCH")]
pub async fn update_category(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CategoryForm>,
) -> impl Responder {
    let id = id.into_inner();
    let payload: CategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return validation_failed(vec![e.to_string()]),
    };

    match update_category_service(id, payload, repo.get_ref()) {
        Ok(category) => success("Category updated successfully", CategoryDto::from(category)),
        Err(err) => service_error(err, KIND, id),
    }
}

#[delete("/categories/{id}")]
pub async fn delete_category(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = id.into_inner();
    match delete_category_service(id, repo.get_ref()) {
        Ok(category) => success("Category deleted successfully", CategoryDto::from(category)),
        Err(err) => service_error(err, KIND, id),
    }
}

#[get("/categories/{id}/products")]
pub async fn category_products(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = id.into_inner();
    match category_products_service(id, repo.get_ref()) {
        Ok((category, products)) if products.is_empty() => error_message(
            &format!("No products in {} category.", category.name),
            StatusCode::NOT_FOUND,
        ),
        Ok((_, products)) => success(
            "Products retrieved successfully",
            products.into_iter().map(ProductDto::from).collect::<Vec<_>>(),
        ),
        Err(err) => service_error(err, KIND, id),
    }
}

#[patch("/categories/{id}/{enable_value}")]
pub async fn set_category_enable(
    path: web::Path<(i32, String)>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (id, enable_value) = path.into_inner();
    let action = match EnableAction::try_from(enable_value.as_str()) {
        Ok(action) => action,
        Err(_) => return error_message("Invalid request", StatusCode::BAD_REQUEST),
    };

    match set_enabled_service(KIND, id, action, repo.get_ref()) {
        Ok(confirmation) => {
            let message = confirmation.message.clone();
            success(
                &message,
                serde_json::json!({ "id": id, "enable": confirmation.enable }),
            )
        }
        Err(err) => service_error(err, KIND, id),
    }
}

/// Register the category endpoints.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_categories)
        .service(create_category)
        .service(category_products)
        .service(set_category_enable)
        .service(get_category)
        .service(update_category)
        .service(delete_category);
}
