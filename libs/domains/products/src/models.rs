use chrono::{DateTime, Utc};
use domain_categories::{Category, CategoryResponse, PageInfo};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::ProductError;

/// Collection holding product documents
pub const PRODUCTS_COLLECTION: &str = "products";

/// Product document as stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub sold: i32,
    #[serde(default)]
    pub description: String,
    /// Path of the stored image file, owned by this record
    #[serde(default)]
    pub image: Option<String>,
    /// Referenced categories, no ownership
    #[serde(default)]
    pub categories: Vec<ObjectId>,
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(input: CreateProduct, image: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            name: input.name,
            price: input.price,
            quantity: input.quantity,
            sold: input.sold,
            description: input.description,
            image: Some(image.into()),
            categories: input.categories,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Product with its category references resolved.
///
/// Read model produced by the listing pipeline; bookkeeping fields such as
/// `updated_at` are projected away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetails {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub sold: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub categories: Vec<Category>,
    pub created_at: DateTime<Utc>,
}

/// Product as returned over HTTP
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    /// 24-digit hex identifier
    #[schema(example = "65f1c0a2b3d4e5f6a7b8c9d1")]
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub sold: i32,
    pub description: String,
    #[schema(example = "uploads/0b6c7e0e-4d7f-4c59-a1a4-4f4d8f0f7a11-lamp.png")]
    pub image: Option<String>,
    pub categories: Vec<CategoryResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<ProductDetails> for ProductResponse {
    fn from(product: ProductDetails) -> Self {
        Self {
            id: product.id.to_hex(),
            name: product.name,
            price: product.price,
            quantity: product.quantity,
            sold: product.sold,
            description: product.description,
            image: product.image,
            categories: product.categories.into_iter().map(Into::into).collect(),
            created_at: product.created_at,
        }
    }
}

/// NaN slips past range checks and infinities match no price band
fn finite_price(price: f64) -> Result<(), ValidationError> {
    if price.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("finite").with_message("Price must be a finite number".into()))
    }
}

/// Validated input for a new product
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,
    #[validate(
        range(min = 0.0, message = "Price must not be negative"),
        custom(function = "finite_price")
    )]
    pub price: f64,
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: i32,
    #[validate(range(min = 0, message = "Sold must not be negative"))]
    pub sold: i32,
    pub description: String,
    pub categories: Vec<ObjectId>,
}

/// Product fields as submitted by a client.
///
/// Used verbatim as the update patch: absent fields stay untouched.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ProductFields {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: Option<String>,
    #[validate(
        range(min = 0.0, message = "Price must not be negative"),
        custom(function = "finite_price")
    )]
    pub price: Option<f64>,
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0, message = "Sold must not be negative"))]
    pub sold: Option<i32>,
    pub description: Option<String>,
    pub categories: Option<Vec<ObjectId>>,
}

impl ProductFields {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl TryFrom<ProductFields> for CreateProduct {
    type Error = ProductError;

    fn try_from(fields: ProductFields) -> Result<Self, Self::Error> {
        let name = fields
            .name
            .ok_or_else(|| ProductError::Validation("name is required".to_string()))?;
        let price = fields
            .price
            .ok_or_else(|| ProductError::Validation("price is required".to_string()))?;

        Ok(Self {
            name,
            price,
            quantity: fields.quantity.unwrap_or(0),
            sold: fields.sold.unwrap_or(0),
            description: fields.description.unwrap_or_default(),
            categories: fields.categories.unwrap_or_default(),
        })
    }
}

/// One page of products
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<ProductDetails>,
    pub total_pages: u64,
    pub current_page: u64,
}

/// Body of `GET /products`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    pub pagination: PageInfo,
}

impl From<ProductPage> for ProductListResponse {
    fn from(page: ProductPage) -> Self {
        Self {
            products: page.products.into_iter().map(Into::into).collect(),
            pagination: PageInfo {
                total_pages: page.total_pages,
                current_page: page.current_page,
            },
        }
    }
}

/// `multipart/form-data` body accepted by create and update
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct ProductMultipart {
    #[schema(example = "Desk lamp")]
    pub name: Option<String>,
    #[schema(example = 249.0)]
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    pub sold: Option<i32>,
    pub description: Option<String>,
    /// Category ids, repeated or comma-separated
    pub categories: Option<Vec<String>>,
    /// Image file (`image/*`); required on create
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> ProductFields {
        ProductFields {
            name: Some("Desk lamp".into()),
            price: Some(249.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_from_fields_applies_defaults() {
        let input = CreateProduct::try_from(fields()).unwrap();
        assert_eq!(input.quantity, 0);
        assert_eq!(input.sold, 0);
        assert_eq!(input.description, "");
        assert!(input.categories.is_empty());
    }

    #[test]
    fn test_create_requires_name_and_price() {
        let missing_name = ProductFields {
            name: None,
            ..fields()
        };
        let err = CreateProduct::try_from(missing_name).unwrap_err();
        assert!(err.is_validation());

        let missing_price = ProductFields {
            price: None,
            ..fields()
        };
        assert!(CreateProduct::try_from(missing_price).is_err());
    }

    #[test]
    fn test_create_product_validation() {
        let mut input = CreateProduct::try_from(fields()).unwrap();
        assert!(input.validate().is_ok());

        input.price = -1.0;
        assert!(input.validate().is_err());

        input.price = f64::NAN;
        assert!(input.validate().is_err());

        input.price = f64::INFINITY;
        assert!(input.validate().is_err());

        input.price = 1.0;
        input.sold = -3;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_patch_validation_skips_absent_fields() {
        assert!(ProductFields::default().validate().is_ok());
        assert!(ProductFields::default().is_empty());

        let bad = ProductFields {
            quantity: Some(-1),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
        assert!(!bad.is_empty());

        let nan = ProductFields {
            price: Some(f64::NAN),
            ..Default::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_new_product_owns_image() {
        let product = Product::new(CreateProduct::try_from(fields()).unwrap(), "uploads/a.png");
        assert_eq!(product.image.as_deref(), Some("uploads/a.png"));
        assert_eq!(product.created_at, product.updated_at);
    }

    #[test]
    fn test_response_resolves_categories_to_hex() {
        let category = Category::new(domain_categories::CreateCategory {
            name: "Lighting".into(),
        });
        let category_hex = category.id.to_hex();

        let details = ProductDetails {
            id: ObjectId::new(),
            name: "Desk lamp".into(),
            price: 249.0,
            quantity: 3,
            sold: 1,
            description: String::new(),
            image: Some("uploads/a.png".into()),
            categories: vec![category],
            created_at: Utc::now(),
        };

        let response = ProductResponse::from(details);
        assert_eq!(response.id.len(), 24);
        assert_eq!(response.categories[0].id, category_hex);
    }
}
