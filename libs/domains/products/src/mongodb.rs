//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::Utc;
use domain_categories::CATEGORIES_COLLECTION;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, oid::ObjectId},
    options::{IndexOptions, ReturnDocument},
};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{PRODUCTS_COLLECTION, Product, ProductDetails, ProductFields};
use crate::query::{ProductPredicate, SortSpec};
use crate::repository::ProductRepository;

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Product>,
    categories_collection: String,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collections(db, PRODUCTS_COLLECTION, CATEGORIES_COLLECTION)
    }

    /// Create with custom collection names, e.g. per-test isolation
    pub fn with_collections(db: &Database, products: &str, categories: &str) -> Self {
        Self {
            collection: db.collection::<Product>(products),
            categories_collection: categories.to_string(),
        }
    }

    /// Indexes for name lookups, price-range filtering and category joins.
    ///
    /// The name index is not unique: uniqueness stays an application-level
    /// pre-check.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let index = |keys: Document, name: &str| {
            IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().name(name.to_string()).build())
                .build()
        };

        let indexes = vec![
            index(doc! { "name": 1 }, "idx_name"),
            index(doc! { "price": 1 }, "idx_price"),
            index(doc! { "categories": 1 }, "idx_categories"),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    /// Text search on name OR description, AND an inclusive price band
    fn build_filter(predicate: &ProductPredicate) -> Document {
        let pattern = predicate.pattern.as_str();
        doc! {
            "$and": [
                {
                    "$or": [
                        { "name": { "$regex": pattern, "$options": "i" } },
                        { "description": { "$regex": pattern, "$options": "i" } },
                    ]
                },
                {
                    "price": {
                        "$gte": predicate.price.low,
                        "$lte": predicate.price.high,
                    }
                },
            ]
        }
    }

    /// Resolve category ids and drop bookkeeping fields
    fn lookup_stages(categories: &str) -> [Document; 2] {
        [
            doc! {
                "$lookup": {
                    "from": categories,
                    "localField": "categories",
                    "foreignField": "_id",
                    "as": "categories",
                }
            },
            doc! { "$project": { "updated_at": 0 } },
        ]
    }

    fn build_pipeline(
        categories: &str,
        predicate: &ProductPredicate,
        sort: &SortSpec,
        skip: u64,
        limit: u64,
    ) -> Vec<Document> {
        let mut order = Document::new();
        order.insert(sort.field.clone(), sort.direction.as_i32());

        let mut pipeline = vec![
            doc! { "$match": Self::build_filter(predicate) },
            doc! { "$sort": order },
        ];

        if skip > 0 {
            pipeline.push(doc! { "$skip": i64::try_from(skip).unwrap_or(i64::MAX) });
        }
        if limit > 0 {
            pipeline.push(doc! { "$limit": i64::try_from(limit).unwrap_or(i64::MAX) });
        }

        pipeline.extend(Self::lookup_stages(categories));
        pipeline
    }

    fn build_update(fields: &ProductFields, image: Option<&str>) -> Document {
        let mut set = doc! { "updated_at": Utc::now().to_rfc3339() };

        if let Some(ref name) = fields.name {
            set.insert("name", name.as_str());
        }
        if let Some(price) = fields.price {
            set.insert("price", price);
        }
        if let Some(quantity) = fields.quantity {
            set.insert("quantity", quantity);
        }
        if let Some(sold) = fields.sold {
            set.insert("sold", sold);
        }
        if let Some(ref description) = fields.description {
            set.insert("description", description.as_str());
        }
        if let Some(ref categories) = fields.categories {
            set.insert("categories", categories.clone());
        }
        if let Some(image) = image {
            set.insert("image", image);
        }

        doc! { "$set": set }
    }

    async fn aggregate_details(&self, pipeline: Vec<Document>) -> ProductResult<Vec<ProductDetails>> {
        let cursor = self
            .collection
            .aggregate(pipeline)
            .with_type::<ProductDetails>()
            .await?;
        let products: Vec<ProductDetails> = cursor.try_collect().await?;
        Ok(products)
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_name = %product.name))]
    async fn create(&self, product: Product) -> ProductResult<ProductDetails> {
        let id = product.id;
        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %id, "Product created successfully");
        self.find_by_id(id).await?.ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    async fn count(&self, predicate: &ProductPredicate) -> ProductResult<u64> {
        let count = self
            .collection
            .count_documents(Self::build_filter(predicate))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn find(
        &self,
        predicate: &ProductPredicate,
        sort: &SortSpec,
        skip: u64,
        limit: u64,
    ) -> ProductResult<Vec<ProductDetails>> {
        let pipeline =
            Self::build_pipeline(&self.categories_collection, predicate, sort, skip, limit);
        self.aggregate_details(pipeline).await
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> ProductResult<Option<ProductDetails>> {
        let mut pipeline = vec![doc! { "$match": { "_id": id } }];
        pipeline.extend(Self::lookup_stages(&self.categories_collection));

        let mut products = self.aggregate_details(pipeline).await?;
        Ok(products.pop())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(product)
    }

    #[instrument(skip(self, fields))]
    async fn update(
        &self,
        id: ObjectId,
        fields: ProductFields,
        image: Option<String>,
    ) -> ProductResult<Option<ProductDetails>> {
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, Self::build_update(&fields, image.as_deref()))
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_none() {
            return Ok(None);
        }

        tracing::info!(product_id = %id, "Product updated successfully");
        self.find_by_id(id).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let removed = self
            .collection
            .find_one_and_delete(doc! { "_id": id })
            .await?;

        if removed.is_some() {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn exists_by_name(&self, name: &str) -> ProductResult<bool> {
        let count = self.collection.count_documents(doc! { "name": name }).await?;
        Ok(count > 0)
    }
}
