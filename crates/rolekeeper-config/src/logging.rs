//! Logging configuration.
//!
//! - `LOG_LEVEL`: default filter when `RUST_LOG` is unset (default: `info`)
//! - `LOG_FORMAT`: `json` or `compact` (default: `json`)
//! - `LOG_DIR`: when set, structured logs are also written to a daily rolling file there

use crate::env::var_or;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Compact,
}

impl LogFormat {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "compact" | "text" | "pretty" => LogFormat::Compact,
            _ => LogFormat::Json,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub directory: Option<String>,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            level: var_or("LOG_LEVEL", "info").to_lowercase(),
            format: LogFormat::parse(&var_or("LOG_FORMAT", "json")),
            directory: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::parse(" TEXT "), LogFormat::Compact);
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("anything"), LogFormat::Json);
    }
}
