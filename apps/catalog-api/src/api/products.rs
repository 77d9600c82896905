//! Products API routes

use axum::Router;
use domain_products::{LocalFileStorage, MongoProductRepository, ProductService, handlers};

use crate::state::AppState;

/// Create products router
pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(&state.db);
    let storage = LocalFileStorage::new(&state.config.uploads.dir);
    let service = ProductService::new(repository, storage);
    handlers::router(service, state.config.uploads.max_bytes)
}

/// Initialize products indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    let repository = MongoProductRepository::new(&state.db);
    repository.init_indexes().await?;
    Ok(())
}
