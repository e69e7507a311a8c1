//! Correlation id for one API request.
//!
//! The `Trace` middleware opens a scope per request; inside it, handlers,
//! services and [`crate::domain::Error`] constructors read the id through
//! [`TraceId::current`]. The same id is echoed in the `trace-id` response
//! header and in the `traceId` field of error bodies.
//!
//! The id is task-local. Work moved to another task (for example bcrypt on
//! the blocking pool) does not see it unless wrapped in [`TraceId::scope`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Response and request header carrying the trace id.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// UUID identifying one request across logs, errors and headers.
///
/// # Examples
/// ```
/// use tweetshare::domain::TraceId;
///
/// let id = TraceId::from_header(" 6f1e3c9a-2b4d-4f8e-9a7b-1c2d3e4f5a6b ").expect("uuid");
/// assert_eq!(id.to_string(), "6f1e3c9a-2b4d-4f8e-9a7b-1c2d3e4f5a6b");
/// assert!(TraceId::from_header("req-42").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random id for a request that did not bring one.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Accept a caller-supplied header value when it is a well-formed UUID.
    pub fn from_header(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }

    /// The id of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current id.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
