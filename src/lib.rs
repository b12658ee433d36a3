//! Core library exports for the catalog API service.
//!
//! This crate exposes domain types, forms, models, repositories, routes and
//! service layers used by the catalog web application.

pub mod db;
pub mod domain;
pub mod dto;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
pub mod storage;
