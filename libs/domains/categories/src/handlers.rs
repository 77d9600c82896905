//! HTTP handlers for Categories API

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CategoryResult;
use crate::models::{
    CategoryListResponse, CategoryQuery, CategoryResponse, CreateCategory, DeletedResponse,
    PageInfo, UpdateCategory,
};
use crate::repository::CategoryRepository;
use crate::service::CategoryService;

/// OpenAPI documentation for Categories API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        create_category,
        get_category,
        update_category,
        delete_category,
    ),
    components(
        schemas(
            CategoryResponse, CategoryListResponse, CreateCategory, UpdateCategory,
            PageInfo, DeletedResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Categories", description = "Category management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the categories router
pub fn router<R: CategoryRepository + 'static>(service: CategoryService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .with_state(shared_service)
}

/// List categories, optionally filtered by name and paginated
#[utoipa::path(
    get,
    path = "",
    tag = "Categories",
    params(CategoryQuery),
    responses(
        (status = 200, description = "Page of categories", body = CategoryListResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    query: Result<Query<CategoryQuery>, QueryRejection>,
) -> Result<Json<CategoryListResponse>, AppError> {
    let Query(query) = query?;
    let page = service.list(&query).await?;
    Ok(Json(page.into()))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "",
    tag = "Categories",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created successfully", body = CategoryResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> CategoryResult<impl IntoResponse> {
    let category = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Categories",
    params(
        ("id" = String, Path, description = "Category ID (24-digit hex)")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    Path(id): Path<String>,
) -> CategoryResult<Json<CategoryResponse>> {
    let category = service.get(&id).await?;
    Ok(Json(category.into()))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Categories",
    params(
        ("id" = String, Path, description = "Category ID (24-digit hex)")
    ),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated successfully", body = CategoryResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> CategoryResult<Json<CategoryResponse>> {
    let category = service.update(&id, input).await?;
    Ok(Json(category.into()))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Categories",
    params(
        ("id" = String, Path, description = "Category ID (24-digit hex)")
    ),
    responses(
        (status = 200, description = "Category deleted", body = DeletedResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    Path(id): Path<String>,
) -> CategoryResult<Json<DeletedResponse>> {
    let id = service.delete(&id).await?;
    Ok(Json(DeletedResponse { id: id.to_hex() }))
}
