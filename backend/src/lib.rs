//! Tweetshare backend: users register and sign in with bearer tokens, post
//! tweets and share them with other users.
//!
//! Layout follows ports and adapters: [`domain`] holds entities, services and
//! port traits; [`inbound`] exposes them over HTTP; [`outbound`] implements
//! the driven ports against PostgreSQL, in-memory stores, bcrypt, JWT and a
//! logging mailer. [`server`] wires them together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
