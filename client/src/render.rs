//! Plain-text views of users and tweets.

use std::fmt::Write as _;

use crate::types::{Tweet, User};

const RULE: &str = "----------------------------------------";

/// One tweet card: author, timestamp, content and recipients.
pub fn tweet(tweet: &Tweet) -> String {
    let mut out = format!(
        "{} <{}>  {}\n{}\n",
        tweet.author.name,
        tweet.author.email,
        tweet.created_at.format("%Y-%m-%d %H:%M UTC"),
        tweet.content,
    );
    let recipients: Vec<&str> = tweet
        .shares()
        .iter()
        .map(|share| share.shared_with_user.name.as_str())
        .collect();
    if !recipients.is_empty() {
        let _ = writeln!(out, "Shared with: {}", recipients.join(", "));
    }
    let _ = writeln!(out, "id: {}", tweet.id);
    out
}

/// A titled list of tweets, or an empty-state line.
pub fn tweets(title: &str, list: &[Tweet], empty: &str) -> String {
    let mut out = format!("{title}\n{RULE}\n");
    if list.is_empty() {
        let _ = writeln!(out, "{empty}");
        return out;
    }
    for (index, item) in list.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&tweet(item));
    }
    out
}

pub fn user(user: &User) -> String {
    format!("{} <{}>  id: {}", user.name, user.email, user.id)
}

/// The user directory, one line per user.
pub fn users<'a>(list: impl IntoIterator<Item = &'a User>) -> String {
    let mut out = String::new();
    for item in list {
        let _ = writeln!(out, "{}", user(item));
    }
    if out.is_empty() {
        out.push_str("No other users yet.\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TweetShare;
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    #[fixture]
    fn ada() -> User {
        User {
            id: Uuid::nil(),
            email: "ada@example.com".to_owned(),
            name: "Ada".to_owned(),
            created_at: Utc
                .with_ymd_and_hms(2024, 6, 1, 12, 30, 0)
                .single()
                .expect("valid"),
        }
    }

    fn tweet_by(author: &User, shared_with: Option<Vec<TweetShare>>) -> Tweet {
        Tweet {
            id: Uuid::nil(),
            content: "Hello".to_owned(),
            author_id: author.id,
            created_at: author.created_at,
            author: author.clone(),
            shared_with,
        }
    }

    #[rstest]
    fn card_lists_recipients_by_name(ada: User) {
        let bob = User {
            name: "Bob".to_owned(),
            ..ada.clone()
        };
        let share = TweetShare {
            id: Uuid::nil(),
            tweet_id: Uuid::nil(),
            shared_with_id: bob.id,
            created_at: ada.created_at,
            shared_with_user: bob,
        };
        let card = tweet(&tweet_by(&ada, Some(vec![share])));
        assert!(card.starts_with("Ada <ada@example.com>  2024-06-01 12:30 UTC\nHello\n"));
        assert!(card.contains("Shared with: Bob\n"));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(Vec::new()))]
    fn card_omits_empty_share_line(ada: User, #[case] shares: Option<Vec<TweetShare>>) {
        assert!(!tweet(&tweet_by(&ada, shares)).contains("Shared with"));
    }

    #[rstest]
    fn empty_list_shows_the_placeholder() {
        let out = tweets("Shared with me", &[], "No tweets shared with you yet.");
        assert!(out.ends_with("No tweets shared with you yet.\n"));
    }

    #[rstest]
    fn directory_renders_one_line_per_user(ada: User) {
        assert_eq!(
            users([&ada]),
            "Ada <ada@example.com>  id: 00000000-0000-0000-0000-000000000000\n"
        );
        assert_eq!(users(std::iter::empty()), "No other users yet.\n");
    }
}
