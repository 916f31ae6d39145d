//! Catalog Domain - Products and sale units
//!
//! A product can be sold in several units with different prices; stock is
//! always tracked in the product's base unit via each unit's conversion
//! factor. The catalog is the membership authority consulted when orders
//! are created.

pub mod catalog;
pub mod error;
pub mod product;

pub use catalog::Catalog;
pub use error::CatalogError;
pub use product::{Product, ProductUnit};
