//! Application configuration loaded from environment variables.

use std::env;

use publisher_core::services::VerificationConfig;
use publisher_infra::database::DatabaseConfig;

/// Which mail backend delivers verification links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailBackend {
    /// Write messages to the log.
    Console,
    /// Keep messages in process memory.
    Memory,
    Smtp(SmtpSettings),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub starttls: bool,
}

/// Credentials for a superuser created at startup when missing.
#[derive(Debug, Clone)]
pub struct SuperuserBootstrap {
    pub email: String,
    pub password: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub run_migrations: bool,
    pub mail: MailBackend,
    pub verification: VerificationConfig,
    pub superuser: Option<SuperuserBootstrap>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let mut config = DatabaseConfig::new(url);
            config.max_connections = parse_var("DB_MAX_CONNECTIONS").unwrap_or(100);
            config.min_connections = parse_var("DB_MIN_CONNECTIONS").unwrap_or(10);
            config
        });

        let defaults = VerificationConfig::default();
        let verification = VerificationConfig {
            base_url: env::var("VERIFICATION_BASE_URL").unwrap_or(defaults.base_url),
            from_address: env::var("MAIL_FROM").unwrap_or(defaults.from_address),
        };

        let superuser = match (env::var("SUPERUSER_EMAIL"), env::var("SUPERUSER_PASSWORD")) {
            (Ok(email), Ok(password)) => Some(SuperuserBootstrap { email, password }),
            _ => None,
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            run_migrations: flag("RUN_MIGRATIONS", false),
            mail: Self::parse_mail_backend(),
            verification,
            superuser,
        }
    }

    /// Parse the mail backend from `MAIL_BACKEND` and the `SMTP_*` variables.
    fn parse_mail_backend() -> MailBackend {
        let backend = env::var("MAIL_BACKEND").unwrap_or_else(|_| "console".to_string());

        match backend.to_lowercase().as_str() {
            "smtp" => MailBackend::Smtp(SmtpSettings {
                host: env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
                port: parse_var("SMTP_PORT").unwrap_or(587),
                username: env::var("SMTP_USERNAME").ok(),
                password: env::var("SMTP_PASSWORD").ok(),
                starttls: flag("SMTP_STARTTLS", true),
            }),
            "memory" => MailBackend::Memory,
            "console" => MailBackend::Console,
            other => {
                tracing::warn!(backend = %other, "Unknown MAIL_BACKEND, using console");
                MailBackend::Console
            }
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

fn flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no"))
        .unwrap_or(default)
}
