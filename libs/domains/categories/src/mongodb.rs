//! MongoDB implementation of CategoryRepository

use async_trait::async_trait;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, oid::ObjectId},
    options::{FindOptions, IndexOptions, ReturnDocument},
};
use tracing::instrument;

use crate::error::CategoryResult;
use crate::models::{CATEGORIES_COLLECTION, Category, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;

/// MongoDB implementation of the CategoryRepository
pub struct MongoCategoryRepository {
    collection: Collection<Category>,
}

impl MongoCategoryRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, CATEGORIES_COLLECTION)
    }

    /// Create with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Category>(collection_name);
        Self { collection }
    }

    /// Index backing name lookups and the name-sorted listing.
    ///
    /// Not unique: uniqueness stays an application-level pre-check.
    pub async fn init_indexes(&self) -> CategoryResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder().name("idx_name".to_string()).build())
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("Category indexes created successfully");
        Ok(())
    }

    pub fn collection(&self) -> &Collection<Category> {
        &self.collection
    }

    fn name_filter(pattern: &str) -> Document {
        doc! { "name": { "$regex": pattern, "$options": "i" } }
    }

    fn build_update(input: &UpdateCategory) -> Document {
        let mut set = doc! { "updated_at": Utc::now().to_rfc3339() };
        if let Some(ref name) = input.name {
            set.insert("name", name.as_str());
        }
        doc! { "$set": set }
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    #[instrument(skip(self, input), fields(category_name = %input.name))]
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category> {
        let category = Category::new(input);

        self.collection.insert_one(&category).await?;

        tracing::info!(category_id = %category.id, "Category created successfully");
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn count(&self, pattern: &str) -> CategoryResult<u64> {
        let count = self
            .collection
            .count_documents(Self::name_filter(pattern))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn list(&self, pattern: &str, skip: u64, limit: u64) -> CategoryResult<Vec<Category>> {
        let mut options = FindOptions::builder()
            .sort(doc! { "name": 1 })
            .skip(skip)
            .build();
        if limit > 0 {
            options.limit = Some(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let cursor = self
            .collection
            .find(Self::name_filter(pattern))
            .with_options(options)
            .await?;
        let categories: Vec<Category> = cursor.try_collect().await?;

        Ok(categories)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> CategoryResult<Option<Category>> {
        let category = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(category)
    }

    #[instrument(skip(self, input))]
    async fn update(
        &self,
        id: ObjectId,
        input: UpdateCategory,
    ) -> CategoryResult<Option<Category>> {
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, Self::build_update(&input))
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(category_id = %id, "Category updated successfully");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> CategoryResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count > 0 {
            tracing::info!(category_id = %id, "Category deleted successfully");
        }
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn exists_by_name(&self, name: &str) -> CategoryResult<bool> {
        let count = self.collection.count_documents(doc! { "name": name }).await?;
        Ok(count > 0)
    }
}
