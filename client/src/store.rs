//! Client-side application state.
//!
//! Three slices mirror what the terminal views need: the signed-in user, the
//! two tweet lists and the user directory. Each slice tracks an in-flight
//! flag and the last error message. The `AppState` methods run one API call
//! and fold its outcome into the matching slice.

use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::types::{
    AuthResponse, ChangePasswordData, CreateTweetData, LoginData, MessageResponse, RegisterData,
    Tweet, User,
};

/// Signed-in identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub fn pending(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn signed_in(&mut self, response: AuthResponse) {
        self.loading = false;
        self.user = Some(response.user);
        self.token = Some(response.access_token);
    }

    pub fn failed(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    pub fn logout(&mut self) {
        *self = Self::default();
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Tweets authored by and shared with the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TweetsState {
    pub my_tweets: Vec<Tweet>,
    pub shared_tweets: Vec<Tweet>,
    pub loading: bool,
    pub error: Option<String>,
}

impl TweetsState {
    pub fn pending(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Prepend a freshly created tweet, keeping newest-first order.
    pub fn created(&mut self, tweet: Tweet) {
        self.loading = false;
        self.my_tweets.insert(0, tweet);
    }

    pub fn my_tweets_loaded(&mut self, tweets: Vec<Tweet>) {
        self.loading = false;
        self.my_tweets = tweets;
    }

    pub fn shared_loaded(&mut self, tweets: Vec<Tweet>) {
        self.loading = false;
        self.shared_tweets = tweets;
    }

    pub fn failed(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

/// Directory of registered users, used to pick share recipients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsersState {
    pub users: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl UsersState {
    pub fn pending(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn loaded(&mut self, users: Vec<User>) {
        self.loading = false;
        self.users = users;
    }

    pub fn failed(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    /// Everyone except `me`; the candidates for sharing.
    pub fn others(&self, me: Uuid) -> impl Iterator<Item = &User> {
        self.users.iter().filter(move |user| user.id != me)
    }

    /// Look up a user by email, ignoring case.
    pub fn by_email(&self, email: &str) -> Option<&User> {
        let wanted = email.trim();
        self.users
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(wanted))
    }
}

/// Whole client state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub auth: AuthState,
    pub tweets: TweetsState,
    pub users: UsersState,
}

impl AppState {
    /// State for a session resumed from a stored token.
    pub fn with_token(token: impl Into<String>) -> Self {
        let mut state = Self::default();
        state.auth.token = Some(token.into());
        state
    }

    /// Register and sign in. The client adopts the issued token.
    pub async fn register(
        &mut self,
        api: &mut ApiClient,
        data: &RegisterData,
    ) -> Result<(), ClientError> {
        self.auth.pending();
        match api.register(data).await {
            Ok(response) => {
                api.set_token(Some(response.access_token.clone()));
                self.auth.signed_in(response);
                Ok(())
            }
            Err(err) => {
                self.auth.failed(err.display_message("Registration failed"));
                Err(err)
            }
        }
    }

    /// Sign in. The client adopts the issued token.
    pub async fn login(&mut self, api: &mut ApiClient, data: &LoginData) -> Result<(), ClientError> {
        self.auth.pending();
        match api.login(data).await {
            Ok(response) => {
                api.set_token(Some(response.access_token.clone()));
                self.auth.signed_in(response);
                Ok(())
            }
            Err(err) => {
                self.auth.failed(err.display_message("Login failed"));
                Err(err)
            }
        }
    }

    /// Drop the session everywhere, including cached lists.
    pub fn logout(&mut self, api: &mut ApiClient) {
        api.set_token(None);
        *self = Self::default();
    }

    /// Refresh the signed-in user's profile.
    pub async fn load_profile(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        self.auth.pending();
        match api.me().await {
            Ok(user) => {
                self.auth.loading = false;
                self.auth.set_user(user);
                Ok(())
            }
            Err(err) => {
                self.auth.failed(err.display_message("Failed to fetch profile"));
                Err(err)
            }
        }
    }

    pub async fn change_password(
        &mut self,
        api: &ApiClient,
        data: &ChangePasswordData,
    ) -> Result<MessageResponse, ClientError> {
        self.auth.pending();
        let outcome = api.change_password(data).await;
        match &outcome {
            Ok(_) => self.auth.loading = false,
            Err(err) => self
                .auth
                .failed(err.display_message("Failed to change password")),
        }
        outcome
    }

    pub async fn load_users(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        self.users.pending();
        match api.users().await {
            Ok(users) => {
                self.users.loaded(users);
                Ok(())
            }
            Err(err) => {
                self.users.failed(err.display_message("Failed to fetch users"));
                Err(err)
            }
        }
    }

    /// Post a tweet and prepend it to `my_tweets`.
    pub async fn create_tweet(
        &mut self,
        api: &ApiClient,
        data: &CreateTweetData,
    ) -> Result<Tweet, ClientError> {
        self.tweets.pending();
        match api.create_tweet(data).await {
            Ok(tweet) => {
                self.tweets.created(tweet.clone());
                Ok(tweet)
            }
            Err(err) => {
                self.tweets
                    .failed(err.display_message("Failed to create tweet"));
                Err(err)
            }
        }
    }

    pub async fn load_my_tweets(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        self.tweets.pending();
        match api.my_tweets().await {
            Ok(tweets) => {
                self.tweets.my_tweets_loaded(tweets);
                Ok(())
            }
            Err(err) => {
                self.tweets
                    .failed(err.display_message("Failed to fetch tweets"));
                Err(err)
            }
        }
    }

    pub async fn load_shared_tweets(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        self.tweets.pending();
        match api.shared_with_me().await {
            Ok(tweets) => {
                self.tweets.shared_loaded(tweets);
                Ok(())
            }
            Err(err) => {
                self.tweets
                    .failed(err.display_message("Failed to fetch shared tweets"));
                Err(err)
            }
        }
    }
}
