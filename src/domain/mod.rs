//! Plain domain records and the constrained value types they carry.

pub mod category;
pub mod image;
pub mod product;
pub mod types;
