// src/config.rs

use std::env;
use dotenvy::dotenv;

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub log_dir: String,
    pub cors_origins: Vec<String>,
    /// JSON file of assessments loaded into the store at startup.
    pub seed_file: Option<String>,
    /// Problems found while loading, logged once tracing is up.
    pub warnings: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let mut warnings = Vec::new();

        let port = match parse_port(env::var("PORT").ok().as_deref()) {
            Ok(port) => port,
            Err(msg) => {
                warnings.push(msg);
                DEFAULT_PORT
            }
        };

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR")
            .unwrap_or_else(|_| "logs".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://127.0.0.1:3000".to_string(),
                ]
            });

        let seed_file = env::var("SEED_FILE").ok().filter(|s| !s.is_empty());

        Self {
            host,
            port,
            rust_log,
            log_dir,
            cors_origins,
            seed_file,
            warnings,
        }
    }
}

/// Unset means the default port.
fn parse_port(raw: Option<&str>) -> Result<u16, String> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| format!("Invalid PORT '{}', using {}", raw, DEFAULT_PORT)),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
