//! Tests for the tweet service.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use mockable::MockClock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    MockNotificationSink, MockTweetRepository, MockUserRepository, NotificationError, SharedTweet,
    UserPersistenceError,
};
use crate::domain::{DisplayName, Email, ErrorCode, PasswordHash, TweetContent};

type Service = TweetService<MockUserRepository, MockTweetRepository>;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

fn user(name: &str) -> User {
    User::new(
        UserId::random(),
        Email::new(format!("{}@example.com", name.to_lowercase())).expect("valid email"),
        DisplayName::new(name).expect("valid name"),
        now(),
    )
}

fn tweet_by(author: &User, content: &str, minutes_ago: i64) -> Tweet {
    Tweet {
        id: TweetId::random(),
        content: TweetContent::new(content).expect("valid content"),
        author_id: author.id().clone(),
        created_at: now() - Duration::minutes(minutes_ago),
    }
}

struct People {
    ada: User,
    bob: User,
    cy: User,
}

#[fixture]
fn people() -> People {
    People {
        ada: user("Ada"),
        bob: user("Bob"),
        cy: user("Cy"),
    }
}

fn clock() -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    clock.expect_utc().returning(now);
    Arc::new(clock)
}

fn silent_sink() -> MockNotificationSink {
    let mut sink = MockNotificationSink::new();
    sink.expect_notify().times(0);
    sink
}

fn make_service(
    users: MockUserRepository,
    tweets: MockTweetRepository,
    sink: MockNotificationSink,
) -> Service {
    TweetService::new(
        Arc::new(users),
        Arc::new(tweets),
        NotificationDispatcher::new(Arc::new(sink)),
        clock(),
    )
}

fn users_returning(all: Vec<User>) -> MockUserRepository {
    let mut users = MockUserRepository::new();
    let by_id = all.clone();
    users.expect_find_by_id().returning(move |id| {
        Ok(by_id
            .iter()
            .find(|user| user.id() == id)
            .map(|user| UserAccount::new(user.clone(), PasswordHash::new("hash"))))
    });
    users.expect_find_by_ids().returning(move |ids| {
        Ok(all
            .iter()
            .filter(|user| ids.contains(user.id()))
            .cloned()
            .collect())
    });
    users
}

#[rstest]
#[tokio::test]
async fn create_shares_with_unique_recipients_excluding_author(people: People) {
    let People { ada, bob, cy } = people;
    let users = users_returning(vec![ada.clone(), bob.clone(), cy.clone()]);

    let mut tweets = MockTweetRepository::new();
    tweets
        .expect_insert_tweet()
        .withf(|tweet| tweet.content.as_ref() == "hello")
        .times(1)
        .return_once(|_| Ok(()));
    let expected = vec![bob.id().clone(), cy.id().clone()];
    tweets
        .expect_insert_shares()
        .withf(move |shares| {
            shares
                .iter()
                .map(|share| share.shared_with_id.clone())
                .collect::<Vec<_>>()
                == expected
        })
        .times(1)
        .return_once(|_| Ok(()));

    let mut sink = MockNotificationSink::new();
    sink.expect_notify()
        .withf(|n| n.author_name == "Ada" && n.content == "hello")
        .times(2)
        .returning(|_| Ok(()));

    let service = make_service(users, tweets, sink);
    let request = NewTweet::try_from_parts(
        "hello".into(),
        &[
            bob.id().to_string(),
            ada.id().to_string(),
            cy.id().to_string(),
            bob.id().to_string(),
        ],
    )
    .expect("valid request");

    let view = service.create(ada.id(), &request).await.expect("created");
    assert_eq!(view.author, ada);
    assert_eq!(view.created_at, now());
    assert!(view.shared_with.is_none());
}

#[rstest]
#[tokio::test]
async fn create_without_recipients_skips_shares_and_notifications(people: People) {
    let users = users_returning(vec![people.ada.clone()]);
    let mut tweets = MockTweetRepository::new();
    tweets.expect_insert_tweet().times(1).return_once(|_| Ok(()));
    tweets.expect_insert_shares().times(0);

    let service = make_service(users, tweets, silent_sink());
    let request = NewTweet::try_from_parts("solo".into(), &[]).expect("valid request");
    let view = service.create(people.ada.id(), &request).await.expect("created");
    assert_eq!(view.content.as_ref(), "solo");
}

#[rstest]
#[tokio::test]
async fn create_rejects_missing_author(people: People) {
    let users = users_returning(vec![people.bob.clone()]);
    let mut tweets = MockTweetRepository::new();
    tweets.expect_insert_tweet().times(0);

    let service = make_service(users, tweets, silent_sink());
    let request = NewTweet::try_from_parts("hello".into(), &[]).expect("valid request");
    let err = service
        .create(people.ada.id(), &request)
        .await
        .expect_err("missing author");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "User not found");
}

#[rstest]
#[tokio::test]
async fn create_rejects_unknown_recipients_before_writing(people: People) {
    let users = users_returning(vec![people.ada.clone()]);
    let mut tweets = MockTweetRepository::new();
    tweets.expect_insert_tweet().times(0);

    let service = make_service(users, tweets, silent_sink());
    let request = NewTweet::try_from_parts("hello".into(), &[people.bob.id().to_string()])
        .expect("valid request");
    let err = service
        .create(people.ada.id(), &request)
        .await
        .expect_err("unknown recipient");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.details().expect("details")["code"], "unknown_user");
}

#[rstest]
#[tokio::test]
async fn create_succeeds_when_notifications_fail(people: People) {
    let users = users_returning(vec![people.ada.clone(), people.bob.clone()]);
    let mut tweets = MockTweetRepository::new();
    tweets.expect_insert_tweet().return_once(|_| Ok(()));
    tweets.expect_insert_shares().return_once(|_| Ok(()));
    let mut sink = MockNotificationSink::new();
    sink.expect_notify()
        .times(1)
        .returning(|_| Err(NotificationError::delivery("smtp down")));

    let service = make_service(users, tweets, sink);
    let request = NewTweet::try_from_parts("hello".into(), &[people.bob.id().to_string()])
        .expect("valid request");
    assert!(service.create(people.ada.id(), &request).await.is_ok());
}

#[rstest]
#[tokio::test]
async fn create_surfaces_share_write_failures(people: People) {
    let users = users_returning(vec![people.ada.clone(), people.bob.clone()]);
    let mut tweets = MockTweetRepository::new();
    tweets.expect_insert_tweet().return_once(|_| Ok(()));
    tweets
        .expect_insert_shares()
        .return_once(|_| Err(TweetPersistenceError::query("constraint violated")));

    let service = make_service(users, tweets, silent_sink());
    let request = NewTweet::try_from_parts("hello".into(), &[people.bob.id().to_string()])
        .expect("valid request");
    let err = service
        .create(people.ada.id(), &request)
        .await
        .expect_err("share failure");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn my_tweets_attach_shares_per_tweet(people: People) {
    let People { ada, bob, cy } = people;
    let newer = tweet_by(&ada, "newer", 1);
    let older = tweet_by(&ada, "older", 5);
    let share = TweetShare {
        id: ShareId::random(),
        tweet_id: older.id,
        shared_with_id: bob.id().clone(),
        created_at: older.created_at,
    };

    let users = users_returning(vec![ada.clone(), bob.clone(), cy]);
    let mut tweets = MockTweetRepository::new();
    let listed = vec![newer.clone(), older.clone()];
    tweets
        .expect_list_by_author()
        .return_once(move |_| Ok(listed));
    tweets
        .expect_shares_for_tweets()
        .return_once(move |_| Ok(vec![share]));

    let service = make_service(users, tweets, silent_sink());
    let views = service.my_tweets(ada.id()).await.expect("my tweets");

    assert_eq!(views.len(), 2);
    assert_eq!(views[0].id, newer.id);
    assert_eq!(views[0].shared_with.as_deref(), Some(&[][..]));
    let older_shares = views[1].shared_with.as_ref().expect("shares attached");
    assert_eq!(older_shares.len(), 1);
    assert_eq!(older_shares[0].shared_with_user, bob);
}

#[rstest]
#[tokio::test]
async fn shared_with_me_returns_one_tweet_per_share(people: People) {
    let People { ada, bob, cy } = people;
    let from_ada = tweet_by(&ada, "from ada", 10);
    let from_cy = tweet_by(&cy, "from cy", 20);
    let share = |tweet: &Tweet, minutes_ago| TweetShare {
        id: ShareId::random(),
        tweet_id: tweet.id,
        shared_with_id: bob.id().clone(),
        created_at: now() - Duration::minutes(minutes_ago),
    };
    let shared = vec![
        SharedTweet {
            share: share(&from_cy, 1),
            tweet: from_cy.clone(),
        },
        SharedTweet {
            share: share(&from_ada, 2),
            tweet: from_ada.clone(),
        },
    ];

    let users = users_returning(vec![ada.clone(), bob.clone(), cy.clone()]);
    let mut tweets = MockTweetRepository::new();
    tweets
        .expect_list_shared_with()
        .return_once(move |_| Ok(shared));

    let service = make_service(users, tweets, silent_sink());
    let views = service.shared_with_me(bob.id()).await.expect("shared");

    let summary: Vec<(&str, &User)> = views
        .iter()
        .map(|view| (view.content.as_ref(), &view.author))
        .collect();
    assert_eq!(summary, vec![("from cy", &cy), ("from ada", &ada)]);
}

#[rstest]
#[tokio::test]
async fn find_one_reports_missing_tweet() {
    let mut tweets = MockTweetRepository::new();
    tweets.expect_find_by_id().return_once(|_| Ok(None));

    let service = make_service(MockUserRepository::new(), tweets, silent_sink());
    let err = service
        .find_one(&TweetId::random())
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "Tweet not found");
}

#[rstest]
#[tokio::test]
async fn find_one_maps_connection_failures(people: People) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(|_| Err(UserPersistenceError::connection("refused")));
    let tweet = tweet_by(&people.ada, "hello", 0);
    let mut tweets = MockTweetRepository::new();
    tweets
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(tweet)));

    let service = make_service(users, tweets, silent_sink());
    let err = service
        .find_one(&TweetId::random())
        .await
        .expect_err("unavailable");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
