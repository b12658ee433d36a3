use actix_multipart::form::MultipartForm;
use actix_web::http::StatusCode;
use actix_web::{Responder, delete, get, patch, post, route, web};

use crate::domain::types::{EnableAction, EntityKind};
use crate::dto::images::ImageDto;
use crate::dto::products::ProductDto;
use crate::forms::images::{UpdateImageForm, UploadImagesForm};
use crate::repository::DieselRepository;
use crate::routes::{ListQueryParams, error_message, service_error, success, validation_failed};
use crate::services::enable::set_enabled as set_enabled_service;
use crate::services::images::{
    create_images as create_images_service, delete_image as delete_image_service,
    get_image as get_image_service, image_products as image_products_service,
    list_images as list_images_service, update_image as update_image_service,
};
use crate::storage::DiskImageStore;

const KIND: EntityKind = EntityKind::Image;

#[get("/images")]
pub async fn list_images(
    params: web::Query<ListQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match list_images_service(params.page, params.size, repo.get_ref()) {
        Ok(page) => success("Images retrieved successfully", page.map(ImageDto::from)),
        Err(err) => service_error(err, KIND, 0),
    }
}

#[post("/images")]
pub async fn create_images(
    MultipartForm(mut form): MultipartForm<UploadImagesForm>,
    repo: web::Data<DieselRepository>,
    store: web::Data<DiskImageStore>,
) -> impl Responder {
    let payload = match form.parse() {
        Ok(payload) => payload,
        Err(e) => return validation_failed(vec![e.to_string()]),
    };

    match create_images_service(payload, repo.get_ref(), store.get_ref()) {
        Ok(images) => success(
            "New image has been created.",
            images.into_iter().map(ImageDto::from).collect::<Vec<_>>(),
        ),
        Err(err) => service_error(err, KIND, 0),
    }
}

#[get("/images/{id}")]
pub async fn get_image(id: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    let id = id.into_inner();
    match get_image_service(id, repo.get_ref()) {
        Ok(image) => success("Image retrieved successfully", ImageDto::from(image)),
        Err(err) => service_error(err, KIND, id),
    }
}

#[route("/images/{id}", method = "PUT", method = "PATCH")]
pub async fn update_image(
    id: web::Path<i32>,
    MultipartForm(mut form): MultipartForm<UpdateImageForm>,
    repo: web::Data<DieselRepository>,
    store: web::Data<DiskImageStore>,
) -> impl Responder {
    let id = id.into_inner();
    let payload = match form.parse() {
        Ok(payload) => payload,
        Err(e) => return validation_failed(vec![e.to_string()]),
    };

    match update_image_service(id, payload, repo.get_ref(), store.get_ref()) {
        Ok(image) => success("Image updated successfully", ImageDto::from(image)),
        Err(err) => service_error(err, KIND, id),
    }
}

#[delete("/images/{id}")]
pub async fn delete_image(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    store: web::Data<DiskImageStore>,
) -> impl Responder {
    let id = id.into_inner();
    match delete_image_service(id, repo.get_ref(), store.get_ref()) {
        Ok(image) => success("Image deleted successfully", ImageDto::from(image)),
        Err(err) => service_error(err, KIND, id),
    }
}

#[get("/images/{id}/products")]
pub async fn image_products(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = id.into_inner();
    match image_products_service(id, repo.get_ref()) {
        Ok((image, products)) if products.is_empty() => error_message(
            &format!("No products in {} image.", image.name),
            StatusCode::NOT_FOUND,
        ),
        Ok((_, products)) => success(
            "Products retrieved successfully",
            products.into_iter().map(ProductDto::from).collect::<Vec<_>>(),
        ),
        Err(err) => service_error(err, KIND, id),
    }
}

#[patch("/images/{id}/{enable_value}")]
pub async fn set_image_enable(
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

/// Register the image endpoints.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_images)
        .service(create_images)
        .service(image_products)
        .service(set_image_enable)
        .service(get_image)
        .service(update_image)
        .service(delete_image);
}
