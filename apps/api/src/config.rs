use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Public base URL prefixed onto product picture paths, e.g.
    /// `https://api.example.com/content/`. Empty leaves paths relative.
    pub public_url: String,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - will fail if not set
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let public_url = env_or_default("PUBLIC_URL", "");

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            public_url,
        })
    }
}
