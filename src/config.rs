use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: Option<String>,
    #[serde(default = "default_dispatch_interval")]
    pub dispatch_interval_ms: u64,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    pub sentry_dsn: Option<String>,
}

fn default_dispatch_interval() -> u64 {
    60_000 // Default to once per minute
}

fn default_http_port() -> u16 {
    8080
}

impl Config {
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        let config = envy::from_env::<Config>()?;

        // Manually check that DATABASE_URL was loaded for the main app
        if config.database_url.is_none() {
            return Err(envy::Error::MissingValue("DATABASE_URL"));
        }

        Ok(config)
    }

    /// Returns the database URL.
    ///
    /// # Panics
    /// Panics if the database_url is not set. This should only be
    /// called after `load()` which validates it.
    pub fn database_url(&self) -> &str {
        self.database_url
            .as_deref()
            .expect("DATABASE_URL is not set")
    }
}
