//! Engine configuration
//!
//! All values come from environment variables with sensible defaults;
//! a `.env` file is honored when present.
//!
//! | Environment variable | Default | Meaning |
//! |----------------------|---------|---------|
//! | ENVIRONMENT | development | Runtime environment |
//! | LOG_LEVEL | info | Tracing level filter |
//! | LOG_DIR | (unset) | Daily rolling log files when set |
//! | ORDER_NUMBER_PREFIX | ORD | Prefix of generated order numbers |

/// Engine configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Tracing level filter
    pub log_level: String,
    /// Directory for rolling log files; stderr only when unset
    pub log_dir: Option<String>,
    /// Prefix of generated order numbers
    pub order_number_prefix: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            order_number_prefix: std::env::var("ORDER_NUMBER_PREFIX")
                .unwrap_or_else(|_| "ORD".into()),
        }
    }

    /// Whether this is a production environment.
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
