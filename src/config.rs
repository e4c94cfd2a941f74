//! Process configuration, read once at startup

use std::path::PathBuf;

/// Runtime configuration for the service
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub port: u16,
    /// How long an idle session survives before it expires
    pub session_ttl_hours: i64,
    /// Longest message the validator accepts, in characters
    pub max_message_length: usize,
    /// CORS allowlist; `*` admits any origin
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let db_path = std::env::var("TELLER_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
                PathBuf::from(home).join(".teller/teller.db")
            });

        let port = std::env::var("TELLER_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);

        let session_ttl_hours = std::env::var("TELLER_SESSION_TTL_HOURS")
            .ok()
            .and_then(|h| h.parse().ok())
            .unwrap_or(1);

        let max_message_length = std::env::var("TELLER_MAX_MESSAGE_LENGTH")
            .ok()
            .and_then(|n| n.parse().ok())
            .unwrap_or(1000);

        let allowed_origins = std::env::var("TELLER_ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_else(|_| vec!["*".to_string()]);

        Self {
            db_path,
            port,
            session_ttl_hours,
            max_message_length,
            allowed_origins,
        }
    }

    /// True when the CORS allowlist admits any origin
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if origins.is_empty() {
        vec!["*".to_string()]
    } else {
        origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_origins(origins: Vec<String>) -> AppConfig {
        AppConfig {
            db_path: PathBuf::from("/tmp/teller-test.db"),
            port: 8000,
            session_ttl_hours: 1,
            max_message_length: 1000,
            allowed_origins: origins,
        }
    }

    #[test]
    fn test_parse_origins_splits_and_trims() {
        assert_eq!(
            parse_origins("https://a.example, https://b.example ,"),
            vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ]
        );
    }

    #[test]
    fn test_parse_origins_blank_falls_back_to_wildcard() {
        assert_eq!(parse_origins("  ,, "), vec!["*".to_string()]);
    }

    #[test]
    fn test_allows_any_origin() {
        assert!(config_with_origins(vec!["*".to_string()]).allows_any_origin());
        assert!(
            config_with_origins(vec!["https://a.example".to_string(), "*".to_string()])
                .allows_any_origin()
        );
        assert!(!config_with_origins(vec!["https://a.example".to_string()]).allows_any_origin());
    }
}
