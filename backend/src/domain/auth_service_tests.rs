//! Tests for the authentication service.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockable::MockClock;
use rstest::rstest;

use super::*;
use crate::domain::ports::{MockPasswordHasher, MockTokenIssuer, MockUserRepository};
use crate::domain::{AccessToken, DisplayName, Email, ErrorCode, PasswordHash};

type Service = AuthService<MockUserRepository, MockPasswordHasher, MockTokenIssuer>;

fn fixed_clock() -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    clock.expect_utc().returning(|| {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    });
    Arc::new(clock)
}

fn make_service(
    users: MockUserRepository,
    hasher: MockPasswordHasher,
    tokens: MockTokenIssuer,
) -> Service {
    AuthService::new(Arc::new(users), Arc::new(hasher), Arc::new(tokens), fixed_clock())
}

fn account(email: &str, hash: &str) -> UserAccount {
    UserAccount::new(
        User::new(
            UserId::random(),
            Email::new(email).expect("valid email"),
            DisplayName::new("Ada").expect("valid name"),
            Utc::now(),
        ),
        PasswordHash::new(hash),
    )
}

fn issuing_tokens() -> MockTokenIssuer {
    let mut tokens = MockTokenIssuer::new();
    tokens
        .expect_issue()
        .returning(|_| Ok(AccessToken::new("signed-token")));
    tokens
}

#[tokio::test]
async fn register_persists_hashed_account_and_issues_token() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().times(1).return_once(|_| Ok(None));
    users
        .expect_insert()
        .withf(|account| {
            account.password_hash().as_str() == "hashed:secret1"
                && account.user().email().as_ref() == "ada@example.com"
        })
        .times(1)
        .return_once(|_| Ok(()));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .returning(|pw| Ok(PasswordHash::new(format!("hashed:{pw}"))));

    let service = make_service(users, hasher, issuing_tokens());
    let registration =
        Registration::try_from_parts("Ada@Example.com", "secret1", "Ada").expect("valid");
    let session = service.register(&registration).await.expect("register");

    assert_eq!(session.user.email().as_ref(), "ada@example.com");
    assert_eq!(session.user.name().as_ref(), "Ada");
    assert_eq!(
        session.user.created_at(),
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("ts")
    );
    assert_eq!(session.access_token.as_str(), "signed-token");
}

#[tokio::test]
async fn register_rejects_existing_email() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(Some(account("ada@example.com", "h"))));
    users.expect_insert().times(0);

    let service = make_service(users, MockPasswordHasher::new(), MockTokenIssuer::new());
    let registration =
        Registration::try_from_parts("ada@example.com", "secret1", "Ada").expect("valid");
    let err = service.register(&registration).await.expect_err("conflict");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.details().expect("details")["field"], "email");
}

#[tokio::test]
async fn register_maps_unique_index_violation_to_conflict() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().return_once(|_| Ok(None));
    users
        .expect_insert()
        .return_once(|_| Err(UserPersistenceError::duplicate_email("ada@example.com")));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|_| Ok(PasswordHash::new("h")));

    let service = make_service(users, hasher, MockTokenIssuer::new());
    let registration =
        Registration::try_from_parts("ada@example.com", "secret1", "Ada").expect("valid");
    let err = service.register(&registration).await.expect_err("conflict");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[case(false, true)]
#[case(true, false)]
#[tokio::test]
async fn login_rejects_unknown_email_and_bad_password_alike(
    #[case] user_exists: bool,
    #[case] password_matches: bool,
) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().return_once(move |_| {
        Ok(user_exists.then(|| account("ada@example.com", "stored")))
    });
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .returning(move |_, _| Ok(password_matches));

    let service = make_service(users, hasher, MockTokenIssuer::new());
    let creds = LoginCredentials::try_from_parts("ada@example.com", "pw").expect("valid");
    let err = service.login(&creds).await.expect_err("unauthorized");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), INVALID_CREDENTIALS);
}

#[tokio::test]
async fn login_issues_token_for_valid_credentials() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(|_| Ok(Some(account("ada@example.com", "stored"))));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .withf(|pw, hash| pw == "pw" && hash.as_str() == "stored")
        .returning(|_, _| Ok(true));

    let service = make_service(users, hasher, issuing_tokens());
    let creds = LoginCredentials::try_from_parts("ada@example.com", "pw").expect("valid");
    let session = service.login(&creds).await.expect("login");
    assert_eq!(session.access_token.as_str(), "signed-token");
}

#[tokio::test]
async fn login_surfaces_connection_failures_as_unavailable() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(|_| Err(UserPersistenceError::connection("pool exhausted")));

    let service = make_service(users, MockPasswordHasher::new(), MockTokenIssuer::new());
    let creds = LoginCredentials::try_from_parts("ada@example.com", "pw").expect("valid");
    let err = service.login(&creds).await.expect_err("unavailable");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn change_password_rejects_wrong_old_password() {
    let existing = account("ada@example.com", "stored");
    let id = existing.user().id().clone();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    users.expect_update_password_hash().times(0);
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().returning(|_, _| Ok(false));

    let service = make_service(users, hasher, MockTokenIssuer::new());
    let change = PasswordChange::try_from_parts("wrong", "newsecret").expect("valid");
    let err = service
        .change_password(&id, &change)
        .await
        .expect_err("bad request");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn change_password_stores_new_hash() {
    let existing = account("ada@example.com", "stored");
    let id = existing.user().id().clone();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    users
        .expect_update_password_hash()
        .withf(|_, hash| hash.as_str() == "hashed:newsecret")
        .times(1)
        .return_once(|_, _| Ok(true));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().returning(|_, _| Ok(true));
    hasher
        .expect_hash()
        .returning(|pw| Ok(PasswordHash::new(format!("hashed:{pw}"))));

    let service = make_service(users, hasher, MockTokenIssuer::new());
    let change = PasswordChange::try_from_parts("oldsecret", "newsecret").expect("valid");
    let result = service.change_password(&id, &change).await.expect("changed");
    assert_eq!(result.message, "Password changed successfully");
}

#[tokio::test]
async fn change_password_for_missing_user_is_unauthorized() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));

    let service = make_service(users, MockPasswordHasher::new(), MockTokenIssuer::new());
    let change = PasswordChange::try_from_parts("oldsecret", "newsecret").expect("valid");
    let err = service
        .change_password(&UserId::random(), &change)
        .await
        .expect_err("unauthorized");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[case(TokenError::expired())]
#[case(TokenError::invalid("bad signature"))]
#[tokio::test]
async fn authenticate_rejects_bad_tokens(#[case] failure: TokenError) {
    let mut tokens = MockTokenIssuer::new();
    tokens.expect_verify().return_once(move |_| Err(failure));

    let service = make_service(MockUserRepository::new(), MockPasswordHasher::new(), tokens);
    let err = service.authenticate("token").await.expect_err("unauthorized");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[tokio::test]
async fn authenticate_rejects_tokens_for_deleted_users() {
    let mut tokens = MockTokenIssuer::new();
    tokens.expect_verify().returning(|_| Ok(UserId::random()));
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));

    let service = make_service(users, MockPasswordHasher::new(), tokens);
    let err = service.authenticate("token").await.expect_err("unauthorized");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[tokio::test]
async fn authenticate_returns_token_subject() {
    let existing = account("ada@example.com", "stored");
    let id = existing.user().id().clone();
    let verified = id.clone();
    let mut tokens = MockTokenIssuer::new();
    tokens.expect_verify().return_once(move |_| Ok(verified));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));

    let service = make_service(users, MockPasswordHasher::new(), tokens);
    assert_eq!(service.authenticate("token").await.expect("ok"), id);
}
