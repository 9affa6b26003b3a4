use axum::Router;
use domain_catalog::{
    CatalogService, CatalogState, PgBrandRepository, PgProductRepository, PgTypeRepository,
    handlers,
};
use std::sync::Arc;

pub fn router(state: &crate::state::AppState) -> Router {
    let service = CatalogService::new(
        Arc::new(PgProductRepository::new(state.db.clone())),
        Arc::new(PgBrandRepository::new(state.db.clone())),
        Arc::new(PgTypeRepository::new(state.db.clone())),
    );

    handlers::router(CatalogState::new(service, state.config.public_url.clone()))
}
