//! Product catalogue domain
//!
//! CRUD over the `products` collection, served as an Axum router that the
//! application nests under `/api/v1/products`.
//!
//! Requests flow `handlers` -> `service` -> `repository`. The service turns
//! each store outcome into success, 400 or 404; the repository trait hides
//! MongoDB so handler and service tests can run without a database.
//!
//! ```rust,no_run
//! use domain_products::{handlers, MongoProductRepository, ProductService};
//!
//! # async fn wire() -> Result<(), mongodb::error::Error> {
//! let client = mongodb::Client::with_uri_str("mongodb://localhost:27017").await?;
//! let products = handlers::router(ProductService::new(MongoProductRepository::new(
//!     &client.database("catalog"),
//! )));
//! # let _: axum::Router = products;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult, NOT_FOUND_MESSAGE};
pub use handlers::ApiDoc;
pub use models::{
    CreateProduct, MessageResponse, PageQuery, Product, ProductListResponse, ProductPage,
    ProductResponse, UpdateProduct, PAGE_SIZE,
};
pub use mongodb::{MongoProductRepository, ProductDocument};
pub use repository::ProductRepository;
pub use service::ProductService;
