use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;

const MIN_SECRET_LEN: usize = 32;

/// One year. Longer lifetimes are almost certainly a typo.
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub database_pool_size: u32,
    pub session_secret: String,
    pub session_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env file loaded: {}", e);
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let session_secret = required(&lookup, "SESSION_SECRET")?;
        if session_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Invalid {
                key: "SESSION_SECRET",
                reason: format!("must be at least {MIN_SECRET_LEN} bytes"),
            });
        }

        let bcrypt_cost = try_load(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                reason: "must be between 4 and 31".to_string(),
            });
        }

        let session_ttl_hours = try_load(&lookup, "SESSION_TTL_HOURS", 24 * 14)?;
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&session_ttl_hours) {
            return Err(ConfigError::Invalid {
                key: "SESSION_TTL_HOURS",
                reason: format!("must be between 1 and {MAX_SESSION_TTL_HOURS}"),
            });
        }

        Ok(Self {
            port: try_load(&lookup, "PORT", 8080)?,
            database_url: required(&lookup, "DATABASE_URL")?,
            database_pool_size: try_load(&lookup, "DATABASE_POOL_SIZE", 10)?,
            session_secret,
            session_ttl_hours,
            bcrypt_cost,
            cors_allowed_origin: lookup("CORS_ALLOWED_ORIGIN"),
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    lookup(key).ok_or(ConfigError::Missing(key))
}

fn try_load<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => {
            log::info!("{} not set, using default: {}", key, default);
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{Config, ConfigError, MAX_SESSION_TTL_HOURS, try_load};

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    fn invalid_key(result: Result<Config, ConfigError>) -> Option<&'static str> {
        match result {
            Err(ConfigError::Invalid { key, .. }) => Some(key),
            _ => None,
        }
    }

    #[test]
    fn test_defaults_apply_when_only_required_keys_are_set() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/swap"),
            ("SESSION_SECRET", SECRET),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.database_pool_size, 10);
        assert_eq!(config.session_ttl_hours, 24 * 14);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert!(config.cors_allowed_origin.is_none());
    }

    #[test]
    fn test_missing_required_keys() {
        assert!(matches!(
            load(&[("DATABASE_URL", "postgres://localhost/swap")]),
            Err(ConfigError::Missing("SESSION_SECRET"))
        ));
        assert!(matches!(
            load(&[("SESSION_SECRET", SECRET)]),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));
    }

    #[test]
    fn test_try_load_parses_trims_and_rejects_junk() {
        let lookup = |key: &str| match key {
            "PORT" => Some(" 9090 ".to_string()),
            "DATABASE_POOL_SIZE" => Some("many".to_string()),
            _ => None,
        };

        assert_eq!(try_load::<u16>(&lookup, "PORT", 8080).unwrap(), 9090);
        assert_eq!(try_load::<u32>(&lookup, "BCRYPT_COST", 12).unwrap(), 12);
        assert!(matches!(
            try_load::<u32>(&lookup, "DATABASE_POOL_SIZE", 10),
            Err(ConfigError::Invalid {
                key: "DATABASE_POOL_SIZE",
                ..
            })
        ));
    }

    #[test]
    fn test_short_secret_is_rejected() {
        let result = load(&[
            ("DATABASE_URL", "postgres://localhost/swap"),
            ("SESSION_SECRET", "too-short"),
        ]);

        assert_eq!(invalid_key(result), Some("SESSION_SECRET"));
    }

    #[test]
    fn test_bcrypt_cost_range() {
        for cost in ["3", "32"] {
            let result = load(&[
                ("DATABASE_URL", "postgres://localhost/swap"),
                ("SESSION_SECRET", SECRET),
                ("BCRYPT_COST", cost),
            ]);
            assert_eq!(invalid_key(result), Some("BCRYPT_COST"), "{cost}");
        }
    }

    #[test]
    fn test_session_ttl_range() {
        let too_long = (MAX_SESSION_TTL_HOURS + 1).to_string();
        let huge = (i64::MAX / 1000).to_string();

        for ttl in ["0", "-1", too_long.as_str(), huge.as_str()] {
            let result = load(&[
                ("DATABASE_URL", "postgres://localhost/swap"),
                ("SESSION_SECRET", SECRET),
                ("SESSION_TTL_HOURS", ttl),
            ]);
            assert_eq!(invalid_key(result), Some("SESSION_TTL_HOURS"), "{ttl}");
        }

        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/swap"),
            ("SESSION_SECRET", SECRET),
            ("SESSION_TTL_HOURS", "1"),
        ])
        .unwrap();
        assert_eq!(config.session_ttl_hours, 1);
    }
}
