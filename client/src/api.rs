//! Reqwest-backed client for the `/api` surface.
//!
//! The client owns transport only: URL joining, bearer headers, status
//! mapping and JSON decoding.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use crate::error::ClientError;
use crate::types::{
    AuthResponse, ChangePasswordData, CreateTweetData, LoginData, MessageResponse, RegisterData,
    Tweet, User,
};

/// Base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Typed client for the tweetshare API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client for `base_url` with the default request timeout.
    ///
    /// # Examples
    /// ```
    /// use tweetshare_client::ApiClient;
    ///
    /// let client = ApiClient::new("http://localhost:3001/api").expect("valid URL");
    /// assert_eq!(client.base_url().as_str(), "http://localhost:3001/api/");
    /// ```
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Build a client with an explicit request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = normalise_base(base_url)?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn register(&self, data: &RegisterData) -> Result<AuthResponse, ClientError> {
        let request = self.http.post(self.endpoint("auth/register")?).json(data);
        self.send(request).await
    }

    pub async fn login(&self, data: &LoginData) -> Result<AuthResponse, ClientError> {
        let request = self.http.post(self.endpoint("auth/login")?).json(data);
        self.send(request).await
    }

    pub async fn change_password(
        &self,
        data: &ChangePasswordData,
    ) -> Result<MessageResponse, ClientError> {
        let request = self
            .authorised(self.http.put(self.endpoint("auth/change-password")?))?
            .json(data);
        self.send(request).await
    }

    pub async fn users(&self) -> Result<Vec<User>, ClientError> {
        self.get("users").await
    }

    pub async fn me(&self) -> Result<User, ClientError> {
        self.get("users/me").await
    }

    pub async fn user(&self, id: Uuid) -> Result<User, ClientError> {
        self.get(&format!("users/{id}")).await
    }

    pub async fn create_tweet(&self, data: &CreateTweetData) -> Result<Tweet, ClientError> {
        let request = self
            .authorised(self.http.post(self.endpoint("tweets")?))?
            .json(data);
        self.send(request).await
    }

    pub async fn my_tweets(&self) -> Result<Vec<Tweet>, ClientError> {
        self.get("tweets/my-tweets").await
    }

    pub async fn shared_with_me(&self) -> Result<Vec<Tweet>, ClientError> {
        self.get("tweets/shared-with-me").await
    }

    pub async fn tweet(&self, id: Uuid) -> Result<Tweet, ClientError> {
        self.get(&format!("tweets/{id}")).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.authorised(self.http.get(self.endpoint(path)?))?;
        self.send(request).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::InvalidUrl(err.to_string()))
    }

    fn authorised(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::NotSignedIn)?;
        Ok(request.bearer_auth(token))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        let trace_id = response
            .headers()
            .get("trace-id")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await?;
        debug!(
            status = status.as_u16(),
            trace_id = trace_id.as_deref(),
            bytes = body.len(),
            "api response"
        );

        if !status.is_success() {
            return Err(ClientError::from_response(status, body.as_ref()));
        }
        serde_json::from_slice(body.as_ref()).map_err(|err| ClientError::Decode(err.to_string()))
    }
}

/// Parse `raw` and ensure a trailing slash so relative joins keep the path.
fn normalise_base(raw: &str) -> Result<Url, ClientError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_owned()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash).map_err(|err| ClientError::InvalidUrl(err.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidUrl(format!("{raw} cannot be a base URL")));
    }
    Ok(url)
}
