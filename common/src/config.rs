use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::{env, fs};

/// Process-wide configuration, loaded once from the environment.
///
/// Every value has a development default except the external collaborator
/// settings, which stay `None` until configured (see `IDENTITY_API_URL`,
/// `PAYMENT_API_URL`, `PAYMENT_API_KEY`).
#[derive(Debug, Deserialize)]
pub struct Config {
    pub project_name: String,
    pub env: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: i64,
    pub identity_api_url: Option<String>,
    pub payment_api_url: Option<String>,
    pub payment_api_key: Option<String>,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

impl Config {
    /// Loads `.env` (if present) and initializes the singleton.
    pub fn init() -> &'static Self {
        dotenvy::dotenv().ok();
        CONFIG.get_or_init(Self::from_env)
    }

    /// Returns the configuration, initializing from the environment on first
    /// use so tests don't need an explicit `init()` call.
    pub fn get() -> &'static Self {
        CONFIG.get_or_init(|| {
            dotenvy::dotenv().ok();
            Self::from_env()
        })
    }

    fn from_env() -> Self {
        let project_name = env::var("PROJECT_NAME").unwrap_or_else(|_| "edustation-api".into());
        let env_name = env::var("ENV").unwrap_or_else(|_| "development".into());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into());
        let log_to_stdout = env::var("LOG_TO_STDOUT")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(true);
        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "data/edustation.db".into());
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        if let Some(parent) = std::path::Path::new(&log_file).parent() {
            fs::create_dir_all(parent).expect("Failed to create log directory");
        }

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
        let jwt_duration_minutes = env::var("JWT_DURATION_MINUTES")
            .ok()
            .and_then(|m| m.parse().ok())
            .unwrap_or(60);

        Config {
            project_name,
            env: env_name,
            log_level,
            log_file,
            log_to_stdout,
            database_path,
            host,
            port,
            jwt_secret,
            jwt_duration_minutes,
            identity_api_url: env::var("IDENTITY_API_URL").ok(),
            payment_api_url: env::var("PAYMENT_API_URL").ok(),
            payment_api_key: env::var("PAYMENT_API_KEY").ok(),
        }
    }
}
