pub mod catalog;
pub mod config;
pub mod source;

pub use catalog::{Catalog, CatalogEntry, CatalogError};
pub use config::CatalogConfig;
pub use source::CatalogTrackSource;
