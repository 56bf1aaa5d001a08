use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config::from_lookup(|key| env::var(key).ok())
});

pub struct Config {
    pub bind_addr: String,
    pub server_url: String,
    /// Requested per-phase delay; the animator clamps it.
    pub step_delay: Duration,
    pub static_dir: Option<PathBuf>,
    pub log_level: tracing::Level,
    /// Variables that were set but could not be parsed. The config is read
    /// before logging exists, so `main` reports these once it does.
    pub warnings: Vec<String>,
}

impl Config {
    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();
        let step_delay_ms = get_parsed(&lookup, "BSVIZ_STEP_DELAY_MS", 1200u64, &mut warnings);
        let log_level = get_parsed(&lookup, "BSVIZ_LOG_LEVEL", tracing::Level::INFO, &mut warnings);
        Config {
            bind_addr: get_or_default(&lookup, "BSVIZ_BIND_ADDR", "127.0.0.1:5000"),
            server_url: get_or_default(&lookup, "BSVIZ_SERVER_URL", "http://127.0.0.1:5000"),
            step_delay: Duration::from_millis(step_delay_ms),
            static_dir: lookup("BSVIZ_STATIC_DIR").map(PathBuf::from),
            log_level,
            warnings,
        }
    }
}

fn get_or_default<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

fn get_parsed<F, T>(lookup: &F, key: &str, default: T, warnings: &mut Vec<String>) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warnings.push(format!("ignoring unparseable {key}={raw}"));
            default
        }),
        None => default,
    }
}
