use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::ProductResult;
use crate::models::{Product, ProductDetails, ProductFields};
use crate::query::{ProductPredicate, SortSpec};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product and return it with categories resolved
    async fn create(&self, product: Product) -> ProductResult<ProductDetails>;

    /// Number of products matching the predicate
    async fn count(&self, predicate: &ProductPredicate) -> ProductResult<u64>;

    /// Matching products in sort order, categories resolved.
    /// A `limit` of zero returns every match after `skip`.
    async fn find(
        &self,
        predicate: &ProductPredicate,
        sort: &SortSpec,
        skip: u64,
        limit: u64,
    ) -> ProductResult<Vec<ProductDetails>>;

    /// One product with categories resolved
    async fn find_by_id(&self, id: ObjectId) -> ProductResult<Option<ProductDetails>>;

    /// The stored document, category references unresolved
    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>>;

    /// Apply the patch and, when given, the new image path.
    /// Returns the updated product or `None` if absent.
    async fn update(
        &self,
        id: ObjectId,
        fields: ProductFields,
        image: Option<String>,
    ) -> ProductResult<Option<ProductDetails>>;

    /// Delete by ID, returning the removed document
    async fn delete(&self, id: ObjectId) -> ProductResult<Option<Product>>;

    /// Check if a product name exists
    async fn exists_by_name(&self, name: &str) -> ProductResult<bool>;
}
