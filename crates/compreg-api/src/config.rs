//! Service configuration.
//!
//! Read from environment variables at startup. Only the signing secret is
//! required; every other setting has a default or enables an optional
//! collaborator when present.

use compreg_events::KafkaConfig;
use thiserror::Error;

use crate::auth::SigningSecret;

/// Runtime configuration for the API binary.
///
/// Custom `Debug` implementation redacts the signing secret and the
/// database URL (which may embed a password).
#[derive(Clone)]
pub struct AppConfig {
    /// HTTP bind port.
    pub port: u16,
    /// HMAC secret for issuing and verifying tokens.
    pub signing_secret: SigningSecret,
    /// Lifetime of issued tokens, in seconds.
    pub token_ttl_secs: i64,
    /// Postgres URL. `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Upper bound on pooled Postgres connections.
    pub database_max_connections: u32,
    /// Notification stream. `None` selects the log publisher.
    pub kafka: Option<KafkaConfig>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("signing_secret", &"[REDACTED]")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("database_max_connections", &self.database_max_connections)
            .field("kafka", &self.kafka)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 8080)
    /// - `JWT_KEY` (required, non-empty)
    /// - `TOKEN_TTL_SECS` (default: 3600)
    /// - `DATABASE_URL` (optional; unset means in-memory)
    /// - `DATABASE_MAX_CONNECTIONS` (default: 20)
    /// - `KAFKA_URL` (optional; unset means log-only notifications)
    /// - `KAFKA_TOPIC` (default: `companies`)
    /// - `KAFKA_PARTITION` (default: 0)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let signing_secret = get("JWT_KEY")
            .map(SigningSecret::new)
            .ok_or(ConfigError::MissingSigningSecret)?;

        let kafka = match get("KAFKA_URL") {
            Some(bootstrap) => Some(KafkaConfig {
                bootstrap,
                topic: get("KAFKA_TOPIC").unwrap_or_else(|| "companies".to_string()),
                partition: parse_or("KAFKA_PARTITION", get("KAFKA_PARTITION"), 0)?,
            }),
            None => None,
        };

        let token_ttl_secs: i64 = parse_or("TOKEN_TTL_SECS", get("TOKEN_TTL_SECS"), 3600)?;
        if token_ttl_secs <= 0 {
            return Err(ConfigError::InvalidValue {
                var: "TOKEN_TTL_SECS".to_string(),
                value: token_ttl_secs.to_string(),
                reason: "must be positive".to_string(),
            });
        }

        Ok(Self {
            port: parse_or("PORT", get("PORT"), 8080)?,
            signing_secret,
            token_ttl_secs,
            database_url: get("DATABASE_URL"),
            database_max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                get("DATABASE_MAX_CONNECTIONS"),
                20,
            )?,
            kafka,
        })
    }
}

fn parse_or<T>(var: &str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            var: var.to_string(),
            reason: e.to_string(),
            value,
        }),
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_KEY environment variable is required")]
    MissingSigningSecret,
    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        var: String,
        value: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| map.get(var).cloned())
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let cfg = load(&[("JWT_KEY", "s3cret")]).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.token_ttl_secs, 3600);
        assert_eq!(cfg.database_url, None);
        assert_eq!(cfg.database_max_connections, 20);
        assert!(cfg.kafka.is_none());
    }

    #[test]
    fn missing_or_blank_secret_is_rejected() {
        assert!(matches!(load(&[]), Err(ConfigError::MissingSigningSecret)));
        assert!(matches!(
            load(&[("JWT_KEY", "  ")]),
            Err(ConfigError::MissingSigningSecret)
        ));
    }

    #[test]
    fn kafka_settings_are_read_when_url_is_set() {
        let cfg = load(&[
            ("JWT_KEY", "s3cret"),
            ("KAFKA_URL", "broker:9092"),
            ("KAFKA_PARTITION", "3"),
        ])
        .unwrap();
        let kafka = cfg.kafka.unwrap();
        assert_eq!(kafka.bootstrap, "broker:9092");
        assert_eq!(kafka.topic, "companies");
        assert_eq!(kafka.partition, 3);
    }

    #[test]
    fn unparseable_port_is_rejected() {
        let err = load(&[("JWT_KEY", "s3cret"), ("PORT", "eighty")]).unwrap_err();
        match err {
            ConfigError::InvalidValue { var, value, .. } => {
                assert_eq!(var, "PORT");
                assert_eq!(value, "eighty");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_positive_token_ttl_is_rejected() {
        for raw in ["0", "-60"] {
            let err = load(&[("JWT_KEY", "s3cret"), ("TOKEN_TTL_SECS", raw)]).unwrap_err();
            match err {
                ConfigError::InvalidValue { var, value, reason } => {
                    assert_eq!(var, "TOKEN_TTL_SECS");
                    assert_eq!(value, raw);
                    assert_eq!(reason, "must be positive");
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn debug_redacts_secret_and_database_url() {
        let cfg = load(&[
            ("JWT_KEY", "s3cret"),
            ("DATABASE_URL", "postgres://app:hunter2@db/companies"),
        ])
        .unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("s3cret"));
        assert!(!debug.contains("hunter2"));
    }
}
