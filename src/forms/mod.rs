//! Request payloads and their validation.
//!
//! Each wire-facing form converts into a payload struct carrying domain
//! types; conversion is where field validation happens.

pub mod categories;
pub mod images;
pub mod products;
