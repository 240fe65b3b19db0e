//! Server configuration for the Lorebot GraphQL API.
//!
//! Settings come from command line arguments, with environment variables as
//! fallbacks, or are built programmatically.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LOREBOT_SERVER_PORT` | 4000 | Server port |
//! | `LOREBOT_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `LOREBOT_LOG_LEVEL` | info | Log level |
//! | `LOREBOT_LOG_FORMAT` | full | Log output format (full, compact, pretty) |
//! | `LOREBOT_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `LOREBOT_ENABLE_CORS` | true | Enable CORS |
//! | `LOREBOT_CORS_ORIGINS` | * | Allowed origins |
//! | `LOREBOT_CORS_METHODS` | GET,POST,OPTIONS | Allowed methods |
//! | `LOREBOT_CORS_HEADERS` | Content-Type,Authorization,Accept | Allowed headers |
//! | `LOREBOT_DATABASE_URL` | lorebot.db | SQLite file, or `:memory:` |
//! | `LOREBOT_MAX_CONNECTIONS` | 10 | Connection pool size |
//! | `LOREBOT_SEED_FILE` | | SQL file run once at startup |
//! | `LOREBOT_DEFAULT_PAGE_SIZE` | 10 | Page size when `first` is omitted |
//! | `LOREBOT_MAX_PAGE_SIZE` | 100 | Upper bound on `first` |
//! | `LOREBOT_RECENT_LIMIT` | 20 | Entries returned by the recent feed |
//!
//! # Example
//!
//! ```rust
//! use lorebot_graphql::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::fmt;

use clap::{Parser, ValueEnum};

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Single line per event with all fields.
    #[default]
    Full,
    /// Shorter single line output.
    Compact,
    /// Multi-line, human friendly output.
    Pretty,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Full => write!(f, "full"),
            LogFormat::Compact => write!(f, "compact"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}

/// Server configuration for the GraphQL API.
///
/// Parsed from command line arguments with [`ServerConfig::parse`]; every
/// option falls back to its `LOREBOT_*` environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "lorebot")]
#[command(about = "GraphQL API over the Lorebot lore catalog")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "LOREBOT_SERVER_PORT", default_value = "4000")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "LOREBOT_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "LOREBOT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format.
    #[arg(long, env = "LOREBOT_LOG_FORMAT", value_enum, default_value_t = LogFormat::Full)]
    pub log_format: LogFormat,

    /// Request timeout in seconds.
    #[arg(long, env = "LOREBOT_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "LOREBOT_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "LOREBOT_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "LOREBOT_CORS_METHODS", default_value = "GET,POST,OPTIONS")]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "LOREBOT_CORS_HEADERS",
        default_value = "Content-Type,Authorization,Accept"
    )]
    pub cors_headers: String,

    /// SQLite database file, or `:memory:` for a private in-memory database.
    #[arg(long, env = "LOREBOT_DATABASE_URL", default_value = "lorebot.db")]
    pub database_url: String,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "LOREBOT_MAX_CONNECTIONS", default_value = "10")]
    pub max_connections: u32,

    /// SQL file executed after the schema is created, typically seed rows.
    #[arg(long, env = "LOREBOT_SEED_FILE")]
    pub seed_file: Option<String>,

    /// Page size used when a query omits `first`.
    #[arg(long, env = "LOREBOT_DEFAULT_PAGE_SIZE", default_value = "10")]
    pub default_page_size: usize,

    /// Largest page a query may request.
    #[arg(long, env = "LOREBOT_MAX_PAGE_SIZE", default_value = "100")]
    pub max_page_size: usize,

    /// Number of entries returned by the recent feed.
    #[arg(long, env = "LOREBOT_RECENT_LIMIT", default_value = "20")]
    pub recent_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 4000,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Full,
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,OPTIONS".to_string(),
            cors_headers: "Content-Type,Authorization,Accept".to_string(),
            database_url: "lorebot.db".to_string(),
            max_connections: 10,
            seed_file: None,
            default_page_size: 10,
            max_page_size: 100,
            recent_limit: 20,
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns whether the database lives in memory only.
    pub fn is_memory_database(&self) -> bool {
        self.database_url == ":memory:"
    }

    /// Validates the configuration and returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.database_url.trim().is_empty() {
            errors.push("Database URL cannot be empty".to_string());
        }

        if self.max_connections == 0 {
            errors.push("Max connections cannot be 0".to_string());
        }

        if self.max_page_size == 0 {
            errors.push("Max page size cannot be 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            errors.push("Default page size cannot exceed max page size".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Uses an in-memory database, ephemeral port 0 and no CORS.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            log_format: LogFormat::Compact,
            request_timeout: 5,
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            database_url: ":memory:".to_string(),
            max_connections: 1,
            seed_file: None,
            default_page_size: 10,
            max_page_size: 100,
            recent_limit: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 4000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.max_page_size, 100);
        assert!(config.enable_cors);
        assert!(!config.is_memory_database());
    }

    #[test]
    fn test_defaults_match_cli_defaults() {
        let parsed = ServerConfig::try_parse_from(["lorebot"]).unwrap();
        let default = ServerConfig::default();
        assert_eq!(parsed.port, default.port);
        assert_eq!(parsed.log_format, default.log_format);
        assert_eq!(parsed.cors_methods, default.cors_methods);
        assert_eq!(parsed.database_url, default.database_url);
        assert_eq!(parsed.recent_limit, default.recent_limit);
    }

    #[test]
    fn test_parse_log_format() {
        let config =
            ServerConfig::try_parse_from(["lorebot", "--log-format", "pretty", "-p", "9000"])
                .unwrap();
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.port, 9000);

        assert!(ServerConfig::try_parse_from(["lorebot", "--log-format", "json"]).is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 3000,
            host: "0.0.0.0".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_port() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().iter().any(|e| e.contains("Port")));
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let config = ServerConfig {
            default_page_size: 200,
            max_page_size: 50,
            database_url: " ".to_string(),
            max_connections: 0,
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_zero_default_page_size_is_allowed() {
        let config = ServerConfig {
            default_page_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_for_testing() {
        let config = ServerConfig::for_testing();
        assert_eq!(config.port, 0);
        assert!(!config.enable_cors);
        assert!(config.is_memory_database());
    }
}
