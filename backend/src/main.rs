//! Backend entry-point: loads settings, wires the store, seeds tags and
//! serves the REST API.

mod server;

use std::ffi::OsString;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use magazine::inbound::http::health::HealthState;
use magazine::outbound::persistence::DbPool;
use magazine::seeding::{SeedSettings, seed_tags_on_startup};
use magazine::settings::ServerSettings;

use server::{ServerConfig, build_http_state, create_server};

/// Settings come from the environment and configuration files only, so the
/// two settings structs never compete for command-line flags.
fn program_args() -> [OsString; 1] {
    [OsString::from("magazine")]
}

async fn build_server_config(settings: &ServerSettings) -> std::io::Result<ServerConfig> {
    let config = ServerConfig::new(settings.bind_addr());
    let Some(database_url) = settings.database_url() else {
        warn!("MAGAZINE_DATABASE_URL is not set; using the in-memory store");
        return Ok(config);
    };

    let pool = DbPool::connect(database_url, settings.db_max_connections())
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    info!(max_connections = settings.db_max_connections(), "database pool ready");
    Ok(config.with_db_pool(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(program_args())
        .map_err(|err| std::io::Error::other(format!("invalid server settings: {err}")))?;
    let seed_settings = SeedSettings::load_from_iter(program_args())
        .map_err(|err| std::io::Error::other(format!("invalid seed settings: {err}")))?;

    let config = build_server_config(&settings).await?;
    let http_state = build_http_state(&config);

    seed_tags_on_startup(&seed_settings, http_state.tags.command.as_ref())
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %config.bind_addr(), "starting HTTP server");
    create_server(health_state, http_state, &config)?.await
}
