// src/config.rs

use std::env;

pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// CORS origin for the browser client; None allows any origin.
    pub frontend_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3001),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            frontend_url: env::var("FRONTEND_URL").ok().filter(|s| !s.is_empty()),
        }
    }
}
