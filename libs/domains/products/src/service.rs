//! Product Service - Business logic layer
//!
//! Listing composes the predicate, pagination and sort; create, update and
//! delete tie the record change to the image file through [`Attachments`].

use database::Pagination;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::attachments::{Attachments, Committed, FileStorage};
use crate::error::{ProductError, ProductResult, parse_id};
use crate::form::Upload;
use crate::models::{CreateProduct, Product, ProductDetails, ProductFields, ProductPage};
use crate::query::QueryRequest;
use crate::repository::ProductRepository;

/// Product service providing business logic operations
pub struct ProductService<R: ProductRepository, S: FileStorage> {
    repository: Arc<R>,
    attachments: Attachments<S>,
}

impl<R: ProductRepository, S: FileStorage> ProductService<R, S> {
    pub fn new(repository: R, storage: S) -> Self {
        Self {
            repository: Arc::new(repository),
            attachments: Attachments::new(storage),
        }
    }

    /// One page of products matching the query, categories resolved
    #[instrument(skip(self))]
    pub async fn list(&self, query: &QueryRequest) -> ProductResult<ProductPage> {
        let predicate = query.predicate();
        let count = self.repository.count(&predicate).await?;
        let page = Pagination::compute(count, query.limit, query.page);

        let products = self
            .repository
            .find(&predicate, &query.sort, page.skip, page.limit)
            .await?;

        Ok(ProductPage {
            products,
            total_pages: page.total_pages,
            current_page: page.current_page,
        })
    }

    /// Get a product by its hex ID
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> ProductResult<ProductDetails> {
        let id = parse_id(id)?;
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Save an uploaded image, yielding the candidate path for create/update
    #[instrument(skip(self, upload))]
    pub async fn store_upload(&self, upload: Option<Upload>) -> ProductResult<Option<String>> {
        match upload {
            Some(upload) => {
                let path = self.attachments.save(&upload.file_name, upload.bytes).await?;
                Ok(Some(path))
            }
            None => Ok(None),
        }
    }

    /// Create a product owning `image`.
    ///
    /// The image is checked before anything else. A rejected create discards
    /// the candidate file.
    #[instrument(skip(self, fields))]
    pub async fn create(
        &self,
        fields: ProductFields,
        image: Option<String>,
    ) -> ProductResult<ProductDetails> {
        let result = self.try_create(fields, image.as_deref()).await;
        if result.is_err() {
            self.attachments.discard(image.as_deref()).await;
        }
        result
    }

    async fn try_create(
        &self,
        fields: ProductFields,
        image: Option<&str>,
    ) -> ProductResult<ProductDetails> {
        let image = Attachments::<S>::require(image)?;
        let input = CreateProduct::try_from(fields)?;
        input.validate()?;

        if self.repository.exists_by_name(&input.name).await? {
            return Err(ProductError::DuplicateName(input.name));
        }

        self.repository.create(Product::new(input, image)).await
    }

    /// Patch a product and, when a new image is given, swap it in.
    ///
    /// The previous image is removed only after the record change is
    /// committed; a failed removal comes back as a warning.
    #[instrument(skip(self, fields))]
    pub async fn update(
        &self,
        id: &str,
        fields: ProductFields,
        image: Option<String>,
    ) -> ProductResult<Committed<ProductDetails>> {
        match self.try_update(id, fields, image.clone()).await {
            Ok((updated, previous)) => {
                let warning = self
                    .attachments
                    .replace(previous.as_deref(), image.as_deref())
                    .await;
                Ok(Committed {
                    value: updated,
                    warning,
                })
            }
            Err(e) => {
                self.attachments.discard(image.as_deref()).await;
                Err(e)
            }
        }
    }

    /// Returns the updated product and the image path it replaced
    async fn try_update(
        &self,
        id: &str,
        fields: ProductFields,
        image: Option<String>,
    ) -> ProductResult<(ProductDetails, Option<String>)> {
        let id = parse_id(id)?;
        fields.validate()?;

        let existing = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        if let Some(ref new_name) = fields.name {
            if new_name != &existing.name && self.repository.exists_by_name(new_name).await? {
                return Err(ProductError::DuplicateName(new_name.clone()));
            }
        }

        let updated = self
            .repository
            .update(id, fields, image)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        Ok((updated, existing.image))
    }

    /// Delete a product, then remove its image file.
    ///
    /// The deletion is final even if the file cannot be removed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> ProductResult<Committed<ObjectId>> {
        let id = parse_id(id)?;

        let removed = self
            .repository
            .delete(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let warning = match removed.image.as_deref() {
            Some(path) if !path.is_empty() => self.attachments.release(path).await,
            _ => None,
        };

        Ok(Committed { value: id, warning })
    }
}

impl<R: ProductRepository, S: FileStorage> Clone for ProductService<R, S> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            attachments: self.attachments.clone(),
        }
    }
}
