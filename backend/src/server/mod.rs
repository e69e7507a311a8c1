//! Server construction and middleware wiring.
//!
//! The binary and the integration tests share this composition root: both
//! build an [`HttpState`] with [`build_http_state`] and serve it with
//! [`create_server`].

mod config;
mod state_builders;

pub use config::{AppSettings, ConfigError};
pub use state_builders::{ServiceSettings, Stores, build_http_state};

use std::net::TcpListener;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{configure_api, json_config};

/// Build the application: `/api` routes, health checks and, in debug
/// builds, Swagger UI at `/docs`.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .service(web::scope("/api").configure(configure_api))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Serve the application on an already bound listener and mark the service
/// ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when the listener cannot be adopted.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    listener: TcpListener,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .listen(listener)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
