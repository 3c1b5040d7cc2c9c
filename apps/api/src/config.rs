use anyhow::{Context, Result};

const DEFAULT_SUGGESTION_LIMIT: u32 = 5;
const DEFAULT_UPLOAD_MAX_BYTES: usize = 2 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Maximum rows returned by `/api/get-suggestions`.
    pub suggestion_limit: u32,
    /// Largest accepted profile image, in bytes.
    pub upload_max_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: optional_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            suggestion_limit: optional_env("SUGGESTION_LIMIT", DEFAULT_SUGGESTION_LIMIT)?,
            upload_max_bytes: optional_env("UPLOAD_MAX_BYTES", DEFAULT_UPLOAD_MAX_BYTES)?,
        })
    }

    /// Configuration used by router tests; no database is contacted.
    pub fn for_tests() -> Self {
        Config {
            database_url: "postgres://localhost/talentlink_test".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            upload_max_bytes: DEFAULT_UPLOAD_MAX_BYTES,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{key} must be a valid non-negative number, got '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_suggestion_limit_rejected() {
        let err = parse_value::<u32>("SUGGESTION_LIMIT", "-1").unwrap_err();
        assert!(err.to_string().contains("SUGGESTION_LIMIT"));
    }

    #[test]
    fn test_parse_value_trims() {
        assert_eq!(parse_value::<u32>("SUGGESTION_LIMIT", " 12 ").unwrap(), 12);
        assert_eq!(
            parse_value::<usize>("UPLOAD_MAX_BYTES", "1048576").unwrap(),
            1_048_576
        );
    }
}
