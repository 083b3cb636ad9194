//! Server entry-point: loads settings, opens storage and serves the API.

mod server;

use std::io;
use std::path::Path;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroize;

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use backend::settings::AppSettings;
use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|e| io::Error::other(e.to_string()))?;
    let key = load_session_key(
        &settings.session_key_file(),
        settings.allows_ephemeral_session_key(),
    )?;

    let mut config = ServerConfig::new(
        key,
        settings.cookie_secure(),
        SameSite::Lax,
        settings.bind_addr(),
    );
    if let Some(url) = settings.database_url() {
        config = config.with_db_pool(open_database(url, settings.db_max_connections()).await?);
    }
    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(server::prometheus_metrics());
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(addr = %settings.bind_addr(), "courses API listening");
    let result = server.await;
    health_state.mark_unhealthy();
    result
}

/// Minimum key file length; `Key::derive_from` needs at least 32 bytes.
const SESSION_KEY_MIN_LEN: usize = 64;

fn load_session_key(path: &Path, allow_ephemeral: bool) -> io::Result<Key> {
    match std::fs::read(path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "session key at {} is {length} bytes; at least {SESSION_KEY_MIN_LEN} required",
                        path.display()
                    ),
                ));
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(e) if allow_ephemeral => {
            warn!(path = %path.display(), error = %e, "using temporary session key (dev only)");
            Ok(Key::generate())
        }
        Err(e) => Err(io::Error::other(format!(
            "failed to read session key at {}: {e}",
            path.display()
        ))),
    }
}

async fn open_database(url: &str, max_connections: u32) -> io::Result<DbPool> {
    run_pending_migrations(url)
        .await
        .map_err(|e| io::Error::other(format!("database migrations failed: {e}")))?;
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(max_connections))
        .await
        .map_err(|e| io::Error::other(format!("database pool failed: {e}")))?;
    info!(max_connections, "connected to PostgreSQL");
    Ok(pool)
}
