//! Categories Domain
//!
//! Categories group products. Products reference them by id; deleting a
//! category leaves those references in place.
//!
//! ```text
//! Handlers → Service → Repository (trait + MongoDB) → Models
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_categories::{handlers, CategoryService, MongoCategoryRepository};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("catalog");
//!
//! let repository = MongoCategoryRepository::new(&db);
//! let router = handlers::router(CategoryService::new(repository));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{CategoryError, CategoryResult, parse_id};
pub use handlers::ApiDoc;
pub use models::{
    CATEGORIES_COLLECTION, Category, CategoryListResponse, CategoryPage, CategoryQuery,
    CategoryResponse, CreateCategory, DeletedResponse, PageInfo, UpdateCategory,
};
pub use mongodb::MongoCategoryRepository;
pub use repository::CategoryRepository;
pub use service::CategoryService;
