// Adapters layer: concrete implementations for external systems (vPIC http api, reference catalog, storage).

pub mod catalog;
pub mod storage;
pub mod vpic_client;

pub use catalog::{Catalog, CatalogRepository};
pub use storage::LocalStorage;
pub use vpic_client::VpicClient;
