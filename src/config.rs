use std::env;

use tracing::info;

/// Runtime settings for the client. Everything comes from the environment
/// with local-dev defaults; a `.env` file is honored when present.
pub struct Config {
    /// Base URL of the CarbonCalc backend.
    pub api_url: String,
    /// Directory holding the sled-backed local store (token, wishlist).
    pub data_dir: String,
}

impl Config {
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        Self {
            api_url: load_or("CARBONCALC_API_URL", "http://localhost:8080"),
            data_dir: load_or("CARBONCALC_DATA_DIR", ".carboncalc"),
        }
    }
}

fn load_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}
