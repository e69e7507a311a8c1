//! In-process adapters backed by `RwLock`-guarded collections.
//!
//! They implement the same ports as the Diesel repositories and uphold the
//! same uniqueness and ordering contracts. The server falls back to them when
//! no database URL is configured; integration tests use them directly.

mod tweet_repository;
mod user_repository;

pub use tweet_repository::InMemoryTweetRepository;
pub use user_repository::InMemoryUserRepository;
