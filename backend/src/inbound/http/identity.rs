//! Bearer-token identity extraction.
//!
//! Handlers that need a signed-in caller take an [`AuthenticatedUser`]
//! argument. The extractor reads `Authorization: Bearer <token>` and resolves
//! it through the [`AuthCommand`](crate::domain::ports::AuthCommand) port held
//! in [`HttpState`]. Missing or rejected tokens yield `401 Unauthorized`.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserId};

use super::state::HttpState;

/// The caller resolved from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    pub fn id(&self) -> &UserId {
        &self.0
    }

    pub fn into_inner(self) -> UserId {
        self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Result<String, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("Unauthorized"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("Unauthorized"))?;
    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| Error::unauthorized("Unauthorized"))?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(Error::unauthorized("Unauthorized"));
    }
    Ok(token.to_owned())
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let token = token?;
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let id = state.auth.authenticate(&token).await?;
            Ok(AuthenticatedUser(id))
        })
    }
}
