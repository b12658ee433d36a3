use std::env;

/// Runtime configuration for the catalog service, read from the environment.
#[derive(Clone)]
pub struct ServerConfig {
    /// SQLite database location.
    pub database_url: String,
    /// Directory where uploaded image files are stored.
    pub media_root: String,
    /// Address the HTTP server binds to.
    pub bind_address: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "catalog.db".to_string()),
            media_root: env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".to_string()),
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        }
    }
}
