use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use tracing::debug;

use crate::common::DatabaseError;

/// Check PostgreSQL database health
///
/// Executes a simple `SELECT 1` query to verify the database connection is
/// working. Useful for Kubernetes readiness and liveness checks.
///
/// # Example
/// ```ignore
/// use database::postgres::{connect, check_health};
///
/// let db = connect(&db_url).await?;
/// check_health(&db).await?;
/// ```
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    debug!("Running PostgreSQL health check");

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());
    let row = db.query_one_raw(stmt).await?;
    if row.is_none() {
        return Err(DatabaseError::HealthCheckFailed(
            "health query returned no rows".to_owned(),
        ));
    }

    debug!("PostgreSQL health check passed");
    Ok(())
}
