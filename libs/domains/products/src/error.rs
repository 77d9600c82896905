use axum::extract::multipart::MultipartError;
use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(ObjectId),

    #[error("Malformed product id: '{0}'")]
    MalformedId(String),

    #[error("Product with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid price range: '{0}'")]
    InvalidRange(String),

    #[error("Invalid sort direction: {0} (expected 1 or -1)")]
    InvalidSortDirection(i64),

    #[error("Invalid sort field: '{0}'")]
    InvalidSortField(String),

    #[error("Product image is required")]
    MissingImage,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidFields(#[from] validator::ValidationErrors),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

impl ProductError {
    /// Whether the caller sent something unacceptable, as opposed to a
    /// lookup miss or a backend failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ProductError::InvalidRange(_)
                | ProductError::InvalidSortDirection(_)
                | ProductError::InvalidSortField(_)
                | ProductError::MissingImage
                | ProductError::Validation(_)
                | ProductError::InvalidFields(_)
        )
    }
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::MalformedId(id) => {
                AppError::InvalidId(format!("Malformed product id: '{}'", id))
            }
            ProductError::DuplicateName(name) => {
                AppError::Conflict(format!("Product with name '{}' already exists", name))
            }
            ProductError::InvalidFields(errors) => AppError::ValidationError(errors),
            err @ (ProductError::InvalidRange(_)
            | ProductError::InvalidSortDirection(_)
            | ProductError::InvalidSortField(_)
            | ProductError::MissingImage
            | ProductError::Validation(_)) => AppError::BadRequest(err.to_string()),
            ProductError::Multipart(e) => AppError::Multipart(e),
            ProductError::Storage(e) => AppError::Io(e),
            ProductError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Parse a product identifier, keeping malformed input distinct from
/// absent records.
pub fn parse_id(raw: &str) -> ProductResult<ObjectId> {
    ObjectId::parse_str(raw.trim()).map_err(|_| ProductError::MalformedId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_parse_id_distinguishes_malformed() {
        assert!(matches!(parse_id("abc"), Err(ProductError::MalformedId(raw)) if raw == "abc"));

        let id = ObjectId::new();
        assert_eq!(parse_id(&id.to_hex()).unwrap(), id);
    }

    #[test]
    fn test_validation_family() {
        assert!(ProductError::MissingImage.is_validation());
        assert!(ProductError::InvalidRange("range9".into()).is_validation());
        assert!(ProductError::InvalidSortDirection(2).is_validation());
        assert!(!ProductError::NotFound(ObjectId::new()).is_validation());
        assert!(!ProductError::MalformedId("x".into()).is_validation());
    }

    #[test]
    fn test_status_mapping() {
        let status = |err: ProductError| err.into_response().status();

        assert_eq!(status(ProductError::MissingImage), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(ProductError::InvalidRange("range9".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(ProductError::MalformedId("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(ProductError::NotFound(ObjectId::new())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(ProductError::DuplicateName("Lamp".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(ProductError::Storage(std::io::Error::other("disk"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
