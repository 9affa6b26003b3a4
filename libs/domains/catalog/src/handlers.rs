use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use axum_helpers::errors::responses::{InternalServerErrorResponse, NotFoundResponse};
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::models::{
    Brand, Pagination, ProductParams, ProductResponse, ProductType, SortKey,
};
use crate::service::CatalogService;

/// State shared by the catalog handlers.
#[derive(Clone)]
pub struct CatalogState {
    pub service: CatalogService,
    /// Prefix for product picture URLs, e.g. `https://api.example.com/content/`
    pub assets_base_url: String,
}

impl CatalogState {
    pub fn new(service: CatalogService, assets_base_url: impl Into<String>) -> Self {
        Self {
            service,
            assets_base_url: assets_base_url.into(),
        }
    }
}

/// OpenAPI documentation for the catalog API
#[derive(OpenApi)]
#[openapi(
    paths(list_products, get_product, list_brands, list_types),
    components(
        schemas(ProductResponse, Brand, ProductType, SortKey, Pagination<ProductResponse>),
        responses(NotFoundResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "products", description = "Catalog browsing endpoints")
    )
)]
pub struct ApiDoc;

/// Create the catalog router with all HTTP endpoints
pub fn router(state: CatalogState) -> Router {
    Router::new()
        .route("/", get(list_products))
        .route("/brands", get(list_brands))
        .route("/types", get(list_types))
        .route("/{id}", get(get_product))
        .with_state(state)
}

/// List products with filtering, sorting, and pagination
#[utoipa::path(
    get,
    path = "",
    tag = "products",
    params(ProductParams),
    responses(
        (status = 200, description = "One page of products with the total count", body = Pagination<ProductResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products(
    State(state): State<CatalogState>,
    Query(params): Query<ProductParams>,
) -> CatalogResult<Json<Pagination<ProductResponse>>> {
    let page = state.service.list_products(&params).await?;

    let data = page
        .data
        .iter()
        .map(|p| ProductResponse::from_entity(p, &state.assets_base_url))
        .collect();

    Ok(Json(Pagination::new(
        page.page_index,
        page.page_size,
        page.count,
        data,
    )))
}

/// Get a single product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "products",
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product(
    State(state): State<CatalogState>,
    Path(id): Path<i32>,
) -> CatalogResult<Json<ProductResponse>> {
    let product = state.service.get_product(id).await?;
    Ok(Json(ProductResponse::from_entity(
        &product,
        &state.assets_base_url,
    )))
}

/// List all product brands
#[utoipa::path(
    get,
    path = "/brands",
    tag = "products",
    responses(
        (status = 200, description = "All brands", body = Vec<Brand>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_brands(State(state): State<CatalogState>) -> CatalogResult<Json<Vec<Brand>>> {
    let brands = state.service.list_brands().await?;
    Ok(Json(brands))
}

/// List all product types
#[utoipa::path(
    get,
    path = "/types",
    tag = "products",
    responses(
        (status = 200, description = "All product types", body = Vec<ProductType>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_types(State(state): State<CatalogState>) -> CatalogResult<Json<Vec<ProductType>>> {
    let types = state.service.list_types().await?;
    Ok(Json(types))
}
