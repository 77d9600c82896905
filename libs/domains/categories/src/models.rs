use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Collection holding category documents
pub const CATEGORIES_COLLECTION: &str = "categories";

/// Category document as stored in MongoDB
///
/// Products reference categories by `_id`; this is also the shape a
/// `$lookup` from the products collection yields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(input: CreateCategory) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            name: input.name,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Category as returned over HTTP
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    /// 24-digit hex identifier
    #[schema(example = "65f1c0a2b3d4e5f6a7b8c9d0")]
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.to_hex(),
            name: category.name,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

/// DTO for creating a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
}

/// DTO for renaming a category
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,
}

/// Query parameters for listing categories
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct CategoryQuery {
    /// Page size, 0 returns every match
    #[serde(default)]
    pub limit: u64,
    /// 1-based page, clamped to the last page
    #[serde(default = "first_page")]
    pub page: u64,
    /// Case-insensitive substring of the name
    #[serde(default)]
    pub search: String,
}

fn first_page() -> u64 {
    1
}

impl Default for CategoryQuery {
    fn default() -> Self {
        Self {
            limit: 0,
            page: first_page(),
            search: String::new(),
        }
    }
}

/// One page of categories
#[derive(Debug, Clone)]
pub struct CategoryPage {
    pub categories: Vec<Category>,
    pub total_pages: u64,
    pub current_page: u64,
}

/// Page position reported next to list results
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_pages: u64,
    pub current_page: u64,
}

/// Body of `GET /categories`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryResponse>,
    pub pagination: PageInfo,
}

impl From<CategoryPage> for CategoryListResponse {
    fn from(page: CategoryPage) -> Self {
        Self {
            categories: page.categories.into_iter().map(Into::into).collect(),
            pagination: PageInfo {
                total_pages: page.total_pages,
                current_page: page.current_page,
            },
        }
    }
}

/// Body returned after a delete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    pub id: String,
}
