/// Connection settings for the user store, fixed at startup.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub region: String,
    pub table_name: String,
}

/// Immutable process configuration, read from the environment once in `main`
/// and passed into the components that need it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("APP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(8080),
            store: StoreConfig {
                region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".into()),
                table_name: std::env::var("USER_TABLE")
                    .unwrap_or_else(|_| "user-service-table".into()),
            },
        }
    }
}
