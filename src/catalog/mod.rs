pub mod categories;
pub mod client;
pub mod products;

pub use categories::{CategoryRecord, CreateCategoryRequest, UpdateCategoryRequest};
pub use client::CatalogClient;
pub use products::{CreateProductRequest, ProductRecord, UpdateProductRequest};
