use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("Category not found: {0}")]
    NotFound(ObjectId),

    #[error("Malformed category id: '{0}'")]
    MalformedId(String),

    #[error("Category with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid input: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

pub type CategoryResult<T> = Result<T, CategoryError>;

/// Convert CategoryError to AppError for standardized error responses
impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(id) => AppError::NotFound(format!("Category {} not found", id)),
            CategoryError::MalformedId(id) => {
                AppError::InvalidId(format!("Malformed category id: '{}'", id))
            }
            CategoryError::DuplicateName(name) => {
                AppError::Conflict(format!("Category with name '{}' already exists", name))
            }
            CategoryError::Validation(errors) => AppError::ValidationError(errors),
            CategoryError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for CategoryError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Parse a path/body identifier, keeping malformed input distinct from
/// absent records.
pub fn parse_id(raw: &str) -> CategoryResult<ObjectId> {
    ObjectId::parse_str(raw.trim()).map_err(|_| CategoryError::MalformedId(raw.to_string()))
}
