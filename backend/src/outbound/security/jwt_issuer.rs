//! `TokenIssuer` producing HS256 JSON Web Tokens.
//!
//! Tokens carry the user id as `sub`, the email, and issue/expiry times.
//! Expiry is checked by `jsonwebtoken` with its default leeway.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenError, TokenIssuer};
use crate::domain::{AccessToken, User, UserId};

/// Default token lifetime.
pub const TOKEN_TTL_DAYS_DEFAULT: i64 = 7;

/// Longest accepted token lifetime.
pub const TOKEN_TTL_DAYS_MAX: i64 = 3650;

/// Token lifetime for `days`, clamped to `1..=TOKEN_TTL_DAYS_MAX`.
pub fn token_ttl(days: i64) -> Duration {
    let days = days.clamp(1, TOKEN_TTL_DAYS_MAX);
    Duration::try_days(days).unwrap_or_else(|| Duration::days(TOKEN_TTL_DAYS_DEFAULT))
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies tokens with a shared secret.
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenIssuer {
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
            clock,
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user: &User) -> Result<AccessToken, TokenError> {
        let now = self.clock.utc();
        let expires = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::signing("token expiry overflows"))?;
        let claims = Claims {
            sub: user.id().to_string(),
            email: user.email().to_string(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::invalid("missing token"));
        }
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|err| {
            match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::expired(),
                _ => TokenError::invalid(err.to_string()),
            }
        })?;
        UserId::new(&data.claims.sub).map_err(|err| TokenError::invalid(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, Email};
    use chrono::{DateTime, Utc};
    use mockable::MockClock;
    use rstest::{fixture, rstest};

    const SECRET: &[u8] = b"an-adequately-long-test-signing-secret";

    fn clock_at(at: DateTime<Utc>) -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        clock.expect_utc().returning(move || at);
        Arc::new(clock)
    }

    fn issuer_at(at: DateTime<Utc>) -> JwtTokenIssuer {
        JwtTokenIssuer::new(SECRET, Duration::days(TOKEN_TTL_DAYS_DEFAULT), clock_at(at))
    }

    #[rstest]
    #[case(0, 1)]
    #[case(7, 7)]
    #[case(TOKEN_TTL_DAYS_MAX, TOKEN_TTL_DAYS_MAX)]
    #[case(9_223_372_036_854_775, TOKEN_TTL_DAYS_MAX)]
    #[case(i64::MAX, TOKEN_TTL_DAYS_MAX)]
    fn ttl_is_bounded(#[case] requested: i64, #[case] expected_days: i64) {
        assert_eq!(token_ttl(requested), Duration::days(expected_days));
    }

    #[rstest]
    fn longest_ttl_still_issues_tokens(user: User) {
        let now = Utc::now();
        let issuer = JwtTokenIssuer::new(SECRET, token_ttl(i64::MAX), clock_at(now));
        let token = issuer.issue(&user).expect("token issued");
        assert_eq!(&issuer.verify(token.as_str()).expect("verifies"), user.id());
    }

    #[fixture]
    fn user() -> User {
        User::new(
            UserId::random(),
            Email::new("ada@example.com").expect("valid email"),
            DisplayName::new("Ada").expect("valid name"),
            Utc::now(),
        )
    }

    #[rstest]
    fn issued_token_verifies_to_its_user(user: User) {
        let issuer = issuer_at(Utc::now());
        let token = issuer.issue(&user).expect("issue");
        assert_eq!(issuer.verify(token.as_str()).expect("verify"), *user.id());
    }

    #[rstest]
    fn tampered_token_is_invalid(user: User) {
        let issuer = issuer_at(Utc::now());
        let token = issuer.issue(&user).expect("issue");
        let mut tampered = token.as_str().to_owned();
        tampered.push('x');
        assert!(matches!(
            issuer.verify(&tampered),
            Err(TokenError::Invalid { .. })
        ));
    }

    #[rstest]
    fn token_signed_with_other_secret_is_invalid(user: User) {
        let other = JwtTokenIssuer::new(
            b"some-other-secret-entirely",
            Duration::days(1),
            clock_at(Utc::now()),
        );
        let token = other.issue(&user).expect("issue");
        assert!(matches!(
            issuer_at(Utc::now()).verify(token.as_str()),
            Err(TokenError::Invalid { .. })
        ));
    }

    #[rstest]
    fn expired_token_is_rejected(user: User) {
        let issued_long_ago = Utc::now() - Duration::days(30);
        let issuer = issuer_at(issued_long_ago);
        let token = issuer.issue(&user).expect("issue");
        assert_eq!(issuer.verify(token.as_str()), Err(TokenError::expired()));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("not.a.jwt")]
    fn garbage_is_invalid(#[case] token: &str) {
        assert!(matches!(
            issuer_at(Utc::now()).verify(token),
            Err(TokenError::Invalid { .. })
        ));
    }
}
