use axum::Router;

pub mod health;
pub mod products;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Returns a stateless Router: every sub-router has its state already
/// applied, so only cheap Arc clones happen per nest.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().nest("/products", products::router(state))
}

/// Creates a router with the /ready endpoint that performs real checks.
///
/// Merged with the stateless app router from `create_router`; the
/// /ready endpoint pings the database.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
