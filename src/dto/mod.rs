//! Wire representations returned inside the response envelope.

pub mod categories;
pub mod images;
pub mod products;
