use actix_web::http::StatusCode;
use actix_web::{Responder, delete, get, patch, post, put, route, web};

use crate::domain::types::{EnableAction, EntityKind};
use crate::dto::categories::CategoryDto;
use crate::dto::images::ImageDto;
use crate::dto::products::ProductDto;
use crate::forms::products::{
    ProductForm, ProductFormPayload, SetCategoriesForm, SetCategoriesFormPayload, SetImagesForm,
    SetImagesFormPayload,
};
use crate::repository::DieselRepository;
use crate::routes::{ListQueryParams, error_message, service_error, success, validation_failed};
use crate::services::enable::set_enabled as set_enabled_service;
use crate::services::products::{
    create_product as create_product_service, delete_product as delete_product_service,
    get_product as get_product_service, list_products as list_products_service,
    product_categories as product_categories_service, product_images as product_images_service,
    set_categories as set_categories_service, set_images as set_images_service,
    update_product as update_product_service,
};

const KIND: EntityKind = EntityKind::Product;

#[get("/products")]
pub async fn list_products(
    params: web::Query<ListQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match list_products_service(params.page, params.size, repo.get_ref()) {
        Ok(page) => success("Products retrieved successfully", page.map(ProductDto::from)),
        Err(err) => service_error(err, KIND, 0),
    }
}

#[post("/products")]
pub async fn create_product(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ProductForm>,
) -> impl Responder {
    let payload: ProductFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return validation_failed(vec![e.to_string()]),
    };

    match create_product_service(payload, repo.get_ref()) {
        Ok(product) => success("New product has been created.", ProductDto::from(product)),
        Err(err) => service_error(err, KIND, 0),
    }
}

#[get("/products/{id}")]
pub async fn get_product(id: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    let id = id.into_inner();
    match get_product_service(id, repo.get_ref()) {
        Ok(product) => success("Product retrieved successfully", ProductDto::from(product)),
        Err(err) => service_error(err, KIND, id),
    }
}

#[route("/products/{id}", method = "PUT", method = "PATCH")]
pub async fn update_product(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ProductForm>,
) -> impl Responder {
    let id = id.into_inner();
    let payload: ProductFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return validation_failed(vec![e.to_string()]),
    };

    match update_product_service(id, payload, repo.get_ref()) {
        Ok(product) => success("Product updated successfully", ProductDto::from(product)),
        Err(err) => service_error(err, KIND, id),
    }
}

#[delete("/products/{id}")]
pub async fn delete_product(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = id.into_inner();
    match delete_product_service(id, repo.get_ref()) {
        Ok(product) => success("Product deleted successfully", ProductDto::from(product)),
        Err(err) => service_error(err, KIND, id),
    }
}

#[get("/products/{id}/images")]
pub async fn product_images(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = id.into_inner();
    match product_images_service(id, repo.get_ref()) {
        Ok((product, images)) if images.is_empty() => error_message(
            &format!("No images in {} product.", product.name),
            StatusCode::NOT_FOUND,
        ),
        Ok((_, images)) => success(
            "Images retrieved successfully",
            images.into_iter().map(ImageDto::from).collect::<Vec<_>>(),
        ),
        Err(err) => service_error(err, KIND, id),
    }
}

#[get("/products/{id}/categories")]
pub async fn product_categories(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = id.into_inner();
    match product_categories_service(id, repo.get_ref()) {
        Ok((product, categories)) if categories.is_empty() => error_message(
            &format!("No categories in {} product.", product.name),
            StatusCode::NOT_FOUND,
        ),
        Ok((_, categories)) => success(
            "Categories retrieved successfully",
            categories
                .into_iter()
                .map(CategoryDto::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => service_error(err, KIND, id),
    }
}

#[put("/products/{id}/images")]
pub async fn set_product_images(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<SetImagesForm>,
) -> impl Responder {
    let id = id.into_inner();
    let payload: SetImagesFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return validation_failed(vec![e.to_string()]),
    };

    match set_images_service(id, payload, repo.get_ref()) {
        Ok(image_ids) => success(
            &format!("Assigning images to product {id} succeed."),
            serde_json::json!({ "image_ids": image_ids }),
        ),
        Err(err) => service_error(err, KIND, id),
    }
}

#[put("/products/{id}/categories")]
pub async fn set_product_categories(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<SetCategoriesForm>,
) -> impl Responder {
    let id = id.into_inner();
    let payload: SetCategoriesFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return validation_failed(vec![e.to_string()]),
    };

    match set_categories_service(id, payload, repo.get_ref()) {
        Ok(category_ids) => success(
            &format!("Assigning categories to product {id} succeed."),
            serde_json::json!({ "category_ids": category_ids }),
        ),
        Err(err) => service_error(err, KIND, id),
    }
}

#[patch("/products/{id}/{enable_value}")]
pub async fn set_product_enable(
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

/// Register the product endpoints.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_products)
        .service(create_product)
        .service(product_images)
        .service(product_categories)
        .service(set_product_images)
        .service(set_product_categories)
        .service(set_product_enable)
        .service(get_product)
        .service(update_product)
        .service(delete_product);
}
