//! Products Domain
//!
//! Product catalog with search, price-range filtering, sorting and
//! pagination. Every product owns exactly one image file; the file follows
//! the record through create, update and delete.
//!
//! ```text
//! Handlers → Service → Repository (trait + MongoDB) → Models
//!                   ↘ Attachments → FileStorage (trait + local disk)
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, LocalFileStorage, MongoProductRepository, ProductService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("catalog");
//!
//! let repository = MongoProductRepository::new(&db);
//! let service = ProductService::new(repository, LocalFileStorage::new("uploads"));
//! let router = handlers::router(service, 5 * 1024 * 1024);
//! # Ok(())
//! # }
//! ```

pub mod attachments;
pub mod error;
pub mod form;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod query;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use attachments::{Attachments, CleanupWarning, Committed, FileStorage, LocalFileStorage};
pub use error::{ProductError, ProductResult, parse_id};
pub use form::{ProductForm, Upload};
pub use handlers::ApiDoc;
pub use models::{
    CreateProduct, PRODUCTS_COLLECTION, Product, ProductDetails, ProductFields,
    ProductListResponse, ProductPage, ProductResponse,
};
pub use mongodb::MongoProductRepository;
pub use query::{
    ListQuery, MAX_SAFE_INTEGER, PriceRange, ProductPredicate, QueryRequest, RangeToken,
    SortDirection, SortSpec,
};
pub use repository::ProductRepository;
pub use service::ProductService;
