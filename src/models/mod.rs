//! Data models for catalogs, baskets and pricing results

mod basket;
mod catalog;
mod price;
mod result;

pub use basket::*;
pub use catalog::*;
pub use price::*;
pub use result::*;
