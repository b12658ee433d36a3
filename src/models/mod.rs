//! Diesel row structs and their conversions to and from domain records.

pub mod category;
pub mod config;
pub mod image;
pub mod links;
pub mod product;
