//! Centralized configuration (environment variables + defaults).

use anyhow::{anyhow, Context, Result};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Plain,
    Json,
}

/// Database URL must be provided (no default) for safety.
pub fn database_url() -> Result<String> {
    std::env::var("DATABASE_URL").map_err(|_| anyhow!("DATABASE_URL must be set"))
}

/// Address the HTTP server binds to.
pub fn bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

/// Connection pool size.
pub fn max_connections() -> Result<u32> {
    parse_max_connections(std::env::var("DB_MAX_CONNECTIONS").ok().as_deref())
}

pub fn log_format() -> Result<LogFormat> {
    parse_log_format(std::env::var("LOG_FORMAT").ok().as_deref())
}

fn parse_max_connections(raw: Option<&str>) -> Result<u32> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_MAX_CONNECTIONS);
    };
    let n = raw
        .trim()
        .parse::<u32>()
        .with_context(|| format!("DB_MAX_CONNECTIONS must be a positive integer, got {:?}", raw))?;
    if n == 0 {
        return Err(anyhow!("DB_MAX_CONNECTIONS must be at least 1"));
    }
    Ok(n)
}

fn parse_log_format(raw: Option<&str>) -> Result<LogFormat> {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("plain") | Some("text") => Ok(LogFormat::Plain),
        Some("json") => Ok(LogFormat::Json),
        Some(other) => Err(anyhow!("LOG_FORMAT must be `plain` or `json`, got {:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_connections_defaults_and_validates() {
        assert_eq!(parse_max_connections(None).unwrap(), DEFAULT_MAX_CONNECTIONS);
        assert_eq!(parse_max_connections(Some(" 12 ")).unwrap(), 12);
        assert!(parse_max_connections(Some("0")).is_err());
        assert!(parse_max_connections(Some("-1")).is_err());
        assert!(parse_max_connections(Some("many")).is_err());
    }

    #[test]
    fn log_format_values() {
        assert_eq!(parse_log_format(None).unwrap(), LogFormat::Plain);
        assert_eq!(parse_log_format(Some("JSON")).unwrap(), LogFormat::Json);
        assert_eq!(parse_log_format(Some("plain")).unwrap(), LogFormat::Plain);
        assert!(parse_log_format(Some("xml")).is_err());
    }
}
