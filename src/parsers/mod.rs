//! Input parsers for catalog and basket data

pub mod basket;
pub mod catalog;

pub use basket::{load_basket_file, parse_basket_args, parse_basket_entry, parse_basket_json};
pub use catalog::{parse_catalog, CatalogLoader};
