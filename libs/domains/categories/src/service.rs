//! Category Service - Business logic layer

use database::{Pagination, wildcard_pattern};
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{CategoryError, CategoryResult, parse_id};
use crate::models::{Category, CategoryPage, CategoryQuery, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;

/// Category service providing business logic operations
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// One page of categories matching the search text, sorted by name
    #[instrument(skip(self))]
    pub async fn list(&self, query: &CategoryQuery) -> CategoryResult<CategoryPage> {
        let pattern = wildcard_pattern(&query.search);
        let count = self.repository.count(&pattern).await?;
        let page = Pagination::compute(count, query.limit, query.page);

        let categories = self
            .repository
            .list(&pattern, page.skip, page.limit)
            .await?;

        Ok(CategoryPage {
            categories,
            total_pages: page.total_pages,
            current_page: page.current_page,
        })
    }

    /// Get a category by its hex ID
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> CategoryResult<Category> {
        let id = parse_id(id)?;
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound(id))
    }

    /// Create a category with a name not used by any other
    #[instrument(skip(self, input), fields(category_name = %input.name))]
    pub async fn create(&self, input: CreateCategory) -> CategoryResult<Category> {
        input.validate()?;

        if self.repository.exists_by_name(&input.name).await? {
            return Err(CategoryError::DuplicateName(input.name));
        }

        self.repository.create(input).await
    }

    /// Update a category; renaming onto another category's name is a conflict
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: UpdateCategory) -> CategoryResult<Category> {
        input.validate()?;
        let id = parse_id(id)?;

        let existing = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound(id))?;

        if let Some(ref new_name) = input.name {
            if new_name != &existing.name && self.repository.exists_by_name(new_name).await? {
                return Err(CategoryError::DuplicateName(new_name.clone()));
            }
        }

        self.repository
            .update(id, input)
            .await?
            .ok_or(CategoryError::NotFound(id))
    }

    /// Delete a category. Products keep dangling references.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> CategoryResult<ObjectId> {
        let id = parse_id(id)?;

        if !self.repository.delete(id).await? {
            return Err(CategoryError::NotFound(id));
        }
        Ok(id)
    }
}

impl<R: CategoryRepository> Clone for CategoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
