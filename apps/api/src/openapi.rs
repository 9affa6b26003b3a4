use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Read-only product catalog with filtering, sorting, and pagination"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/products", api = domain_catalog::ApiDoc)
    )
)]
pub struct ApiDoc;
