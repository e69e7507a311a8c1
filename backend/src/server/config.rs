//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `TWEETSHARE_*` environment variables or a
//! configuration file. Unset values fall back to the defaults documented on
//! each accessor.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use rand::RngCore;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroizing;

use crate::outbound::security::{TOKEN_TTL_DAYS_DEFAULT, TOKEN_TTL_DAYS_MAX};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";
const DEFAULT_MAIL_FROM: &str = "noreply@tweetshare.local";
const RECOMMENDED_SECRET_LEN: usize = 32;
const EPHEMERAL_SECRET_LEN: usize = 64;

/// Startup configuration problems.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBindAddr { value: String, message: String },
    #[error("TWEETSHARE_JWT_SECRET must be set in release builds")]
    MissingJwtSecret,
    #[error("token lifetime must be between 1 and {max} days, got {0}", max = TOKEN_TTL_DAYS_MAX)]
    InvalidTokenTtl(i64),
}

/// Server settings.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TWEETSHARE")]
#[serde(default)]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; in-memory stores are used when absent.
    pub database_url: Option<String>,
    /// HMAC secret for signing access tokens.
    pub jwt_secret: Option<String>,
    /// Access token lifetime in days.
    pub token_ttl_days: Option<i64>,
    /// bcrypt work factor.
    pub bcrypt_cost: Option<u32>,
    /// Sender address on tweet notifications.
    pub mail_from: Option<String>,
}

impl AppSettings {
    /// Configured bind address, defaulting to `0.0.0.0:3001`.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim()
            .parse()
            .map_err(|err: std::net::AddrParseError| ConfigError::InvalidBindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            })
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Token lifetime in days, defaulting to seven and capped at ten years.
    pub fn token_ttl_days(&self) -> Result<i64, ConfigError> {
        match self.token_ttl_days {
            None => Ok(TOKEN_TTL_DAYS_DEFAULT),
            Some(days) if (1..=TOKEN_TTL_DAYS_MAX).contains(&days) => Ok(days),
            Some(days) => Err(ConfigError::InvalidTokenTtl(days)),
        }
    }

    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.unwrap_or(bcrypt::DEFAULT_COST)
    }

    pub fn mail_from(&self) -> &str {
        self.mail_from.as_deref().unwrap_or(DEFAULT_MAIL_FROM)
    }

    /// Token signing secret.
    ///
    /// Without a configured secret, `allow_ephemeral` permits a random one;
    /// tokens then stop verifying after a restart.
    pub fn resolve_jwt_secret(
        &self,
        allow_ephemeral: bool,
    ) -> Result<Zeroizing<Vec<u8>>, ConfigError> {
        match self.jwt_secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => {
                if secret.len() < RECOMMENDED_SECRET_LEN {
                    warn!(
                        length = secret.len(),
                        "TWEETSHARE_JWT_SECRET is shorter than {RECOMMENDED_SECRET_LEN} bytes"
                    );
                }
                Ok(Zeroizing::new(secret.as_bytes().to_vec()))
            }
            None if allow_ephemeral => {
                warn!("TWEETSHARE_JWT_SECRET not set; using an ephemeral secret (dev only)");
                let mut secret = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
                rand::thread_rng().fill_bytes(secret.as_mut_slice());
                Ok(secret)
            }
            None => Err(ConfigError::MissingJwtSecret),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and defaults.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "TWEETSHARE_BIND_ADDR",
        "TWEETSHARE_DATABASE_URL",
        "TWEETSHARE_JWT_SECRET",
        "TWEETSHARE_TOKEN_TTL_DAYS",
        "TWEETSHARE_BCRYPT_COST",
        "TWEETSHARE_MAIL_FROM",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("tweetshare")]).expect("config should load")
    }

    fn unset_all() -> [(&'static str, Option<String>); 6] {
        VARS.map(|name| (name, None))
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(unset_all());

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:3001".parse::<SocketAddr>().expect("literal address")
        );
        assert!(settings.database_url().is_none());
        assert_eq!(settings.token_ttl_days().expect("default ttl"), 7);
        assert_eq!(settings.bcrypt_cost(), bcrypt::DEFAULT_COST);
        assert_eq!(settings.mail_from(), DEFAULT_MAIL_FROM);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("TWEETSHARE_BIND_ADDR", Some("127.0.0.1:8080".to_owned())),
            (
                "TWEETSHARE_DATABASE_URL",
                Some("postgres://tweetshare@localhost/tweetshare".to_owned()),
            ),
            ("TWEETSHARE_JWT_SECRET", Some("s".repeat(40))),
            ("TWEETSHARE_TOKEN_TTL_DAYS", Some("2".to_owned())),
            ("TWEETSHARE_BCRYPT_COST", Some("6".to_owned())),
            ("TWEETSHARE_MAIL_FROM", None),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("address").to_string(),
            "127.0.0.1:8080"
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://tweetshare@localhost/tweetshare")
        );
        assert_eq!(settings.token_ttl_days().expect("ttl"), 2);
        assert_eq!(settings.bcrypt_cost(), 6);
        let secret = settings.resolve_jwt_secret(false).expect("secret");
        assert_eq!(secret.as_slice(), "s".repeat(40).as_bytes());
    }

    fn settings() -> AppSettings {
        AppSettings::default()
    }

    #[rstest]
    fn release_builds_require_a_secret() {
        assert!(matches!(
            settings().resolve_jwt_secret(false),
            Err(ConfigError::MissingJwtSecret)
        ));
    }

    #[rstest]
    fn ephemeral_secrets_are_random() {
        let first = settings().resolve_jwt_secret(true).expect("ephemeral");
        let second = settings().resolve_jwt_secret(true).expect("ephemeral");
        assert_eq!(first.len(), EPHEMERAL_SECRET_LEN);
        assert_ne!(first.as_slice(), second.as_slice());
    }

    #[rstest]
    #[case(Some("not an address".to_owned()))]
    #[case(Some("localhost".to_owned()))]
    fn malformed_bind_addr_is_reported(#[case] value: Option<String>) {
        let settings = AppSettings {
            bind_addr: value,
            ..settings()
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(ConfigError::InvalidBindAddr { .. })
        ));
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    #[case(TOKEN_TTL_DAYS_MAX + 1)]
    #[case(9_223_372_036_854_775)]
    #[case(i64::MAX)]
    fn out_of_range_ttl_is_rejected(#[case] days: i64) {
        let settings = AppSettings {
            token_ttl_days: Some(days),
            ..settings()
        };
        assert!(matches!(
            settings.token_ttl_days(),
            Err(ConfigError::InvalidTokenTtl(d)) if d == days
        ));
    }

    #[rstest]
    fn longest_ttl_is_accepted() {
        let settings = AppSettings {
            token_ttl_days: Some(TOKEN_TTL_DAYS_MAX),
            ..settings()
        };
        assert_eq!(settings.token_ttl_days().expect("ttl"), TOKEN_TTL_DAYS_MAX);
    }

    #[rstest]
    fn empty_sources_resolve_every_default() {
        let _guard = lock_env(unset_all());

        let settings = AppSettings::load_from_iter([OsString::from("tweetshare")]);
        assert!(settings.is_ok(), "load failed: {settings:?}");
        let settings = settings.expect("checked above");
        assert!(settings.jwt_secret.is_none());
        assert!(settings.resolve_jwt_secret(true).is_ok());
    }

    #[rstest]
    fn blank_database_url_is_ignored() {
        let settings = AppSettings {
            database_url: Some("   ".to_owned()),
            ..settings()
        };
        assert!(settings.database_url().is_none());
    }
}
