//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! them with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        /// Normalised (trimmed, lower-cased) login email. Unique.
        email -> Varchar,
        /// Display name, at most 64 characters.
        name -> Varchar,
        /// bcrypt hash; never leaves the persistence layer except as a
        /// domain `PasswordHash`.
        password_hash -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Immutable tweets.
    tweets (id) {
        id -> Uuid,
        content -> Text,
        author_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Grants of one tweet to one recipient. `(tweet_id, shared_with_id)` is
    /// unique.
    tweet_shares (id) {
        id -> Uuid,
        tweet_id -> Uuid,
        shared_with_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(tweets -> users (author_id));
diesel::joinable!(tweet_shares -> tweets (tweet_id));
diesel::joinable!(tweet_shares -> users (shared_with_id));

diesel::allow_tables_to_appear_in_same_query!(tweet_shares, tweets, users);
