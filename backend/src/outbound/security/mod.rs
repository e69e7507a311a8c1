//! Credential adapters: bcrypt password hashing and HS256 bearer tokens.

mod bcrypt_hasher;
mod jwt_issuer;

pub use bcrypt_hasher::BcryptPasswordHasher;
pub use jwt_issuer::{JwtTokenIssuer, TOKEN_TTL_DAYS_DEFAULT, TOKEN_TTL_DAYS_MAX, token_ttl};
