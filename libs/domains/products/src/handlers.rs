//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, Path, Query, State, multipart::MultipartRejection,
        rejection::QueryRejection,
    },
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::{
    AppError,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, PayloadTooLargeResponse,
    },
};
use domain_categories::{CategoryResponse, DeletedResponse, PageInfo};
use serde::Serialize;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::attachments::{Committed, FileStorage};
use crate::error::ProductResult;
use crate::form::ProductForm;
use crate::models::{ProductListResponse, ProductMultipart, ProductResponse};
use crate::query::{ListQuery, QueryRequest};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(
            ProductResponse, ProductListResponse, ProductMultipart, CategoryResponse,
            PageInfo, DeletedResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            PayloadTooLargeResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router.
///
/// `max_upload_bytes` caps request bodies, which bounds the image size.
pub fn router<R, S>(service: ProductService<R, S>, max_upload_bytes: usize) -> Router
where
    R: ProductRepository + 'static,
    S: FileStorage + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(shared_service)
}

type SharedService<R, S> = State<Arc<ProductService<R, S>>>;

/// JSON response carrying a `Warning: 199` header when cleanup failed
fn committed_response<T: Serialize>(status: StatusCode, committed: Committed<T>) -> Response {
    let mut response = (status, Json(committed.value)).into_response();

    if let Some(warning) = committed.warning {
        let text = format!("199 - \"{}\"", warning.to_string().replace('"', "'"));
        if let Ok(value) = HeaderValue::from_str(&text) {
            response.headers_mut().insert(header::WARNING, value);
        }
    }

    response
}

/// List products with search, price range, sort and pagination
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of products", body = ProductListResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository, S: FileStorage>(
    State(service): SharedService<R, S>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ProductListResponse>, AppError> {
    let Query(query) = query?;
    let query = QueryRequest::try_from(query)?;
    let page = service.list(&query).await?;
    Ok(Json(page.into()))
}

/// Create a product; the `image` part is required
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body(content = ProductMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product created successfully", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 413, response = PayloadTooLargeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository, S: FileStorage>(
    State(service): SharedService<R, S>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let form = ProductForm::from_multipart(multipart?).await?;
    let image = service.store_upload(form.image).await?;
    let product = service.create(form.fields, image).await?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))).into_response())
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (24-digit hex)")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository, S: FileStorage>(
    State(service): SharedService<R, S>,
    Path(id): Path<String>,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.get(&id).await?;
    Ok(Json(product.into()))
}

/// Update a product; a new `image` part replaces the stored file
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (24-digit hex)")
    ),
    request_body(content = ProductMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product updated; a Warning header reports a stale file left behind", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 413, response = PayloadTooLargeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository, S: FileStorage>(
    State(service): SharedService<R, S>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let form = ProductForm::from_multipart(multipart?).await?;
    let image = service.store_upload(form.image).await?;
    let committed = service.update(&id, form.fields, image).await?;

    Ok(committed_response(
        StatusCode::OK,
        committed.map(ProductResponse::from),
    ))
}

/// Delete a product and its image file
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (24-digit hex)")
    ),
    responses(
        (status = 200, description = "Product deleted; a Warning header reports a file left behind", body = DeletedResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository, S: FileStorage>(
    State(service): SharedService<R, S>,
    Path(id): Path<String>,
) -> ProductResult<Response> {
    let committed = service.delete(&id).await?;
    Ok(committed_response(
        StatusCode::OK,
        committed.map(|id| DeletedResponse { id: id.to_hex() }),
    ))
}
