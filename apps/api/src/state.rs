//! Application state management.

/// Shared application state.
///
/// Cloned per handler; the database connection is an Arc'd pool so the
/// clone is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
}
