//! Backend entry-point: loads settings, prepares storage and serves the API.

use std::io;
use std::net::TcpListener;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use tweetshare::inbound::http::health::HealthState;
use tweetshare::outbound::persistence::{DbPool, PoolConfig, run_migrations_blocking};
use tweetshare::server::{
    AppSettings, ServiceSettings, Stores, build_http_state, create_server,
};

async fn prepare_stores(settings: &AppSettings) -> io::Result<Stores> {
    let Some(url) = settings.database_url() else {
        warn!("TWEETSHARE_DATABASE_URL not set; using in-memory stores");
        return Ok(Stores::InMemory);
    };
    let applied = run_migrations_blocking(url.to_owned())
        .await
        .map_err(io::Error::other)?;
    info!(applied, "database migrations complete");
    let pool = DbPool::new(PoolConfig::new(url))
        .await
        .map_err(io::Error::other)?;
    Ok(Stores::Postgres(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| io::Error::other(err.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let service_settings = ServiceSettings {
        jwt_secret: settings
            .resolve_jwt_secret(cfg!(debug_assertions))
            .map_err(io::Error::other)?,
        token_ttl_days: settings.token_ttl_days().map_err(io::Error::other)?,
        bcrypt_cost: settings.bcrypt_cost(),
        mail_from: settings.mail_from().to_owned(),
    };

    let stores = prepare_stores(&settings).await?;
    let http_state = web::Data::new(build_http_state(
        stores,
        &service_settings,
        Arc::new(DefaultClock),
    ));

    let listener = TcpListener::bind(bind_addr)?;
    info!(%bind_addr, "listening");
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, http_state, listener)?.await
}
