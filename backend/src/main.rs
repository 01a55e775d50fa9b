//! Backend entry-point: wires the database pool, template registry, session
//! layer, and HTTP route table.

use std::env;
use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::{web, App, HttpServer};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use backend::inbound::http::{routes, HttpState};
use backend::outbound::persistence::{
    run_migrations, DbPool, DieselListingRepository, DieselReviewRepository, DieselUserRepository,
    PoolConfig,
};
use backend::outbound::render::HandlebarsRenderer;
use backend::{MethodOverride, Trace};

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

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());
    let template_dir = env::var("TEMPLATE_DIR").unwrap_or_else(|_| "templates".into());

    let key = session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    // diesel_migrations is synchronous; keep it off the async runtime.
    let migration_url = database_url.clone();
    tokio::task::spawn_blocking(move || run_migrations(&migration_url))
        .await
        .map_err(|e| std::io::Error::other(format!("migration task failed: {e}")))?
        .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))?;

    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("pool init failed: {e}")))?;

    let renderer = HandlebarsRenderer::from_directory(&template_dir)
        .map_err(|e| std::io::Error::other(format!("template load failed: {e}")))?;

    let state = web::Data::new(HttpState::new(
        Arc::new(DieselListingRepository::new(pool.clone())),
        Arc::new(DieselReviewRepository::new(pool.clone())),
        Arc::new(DieselUserRepository::new(pool)),
        Arc::new(renderer),
    ));

    HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".into())
            .cookie_path("/".into())
            .cookie_secure(cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(SameSite::Lax)
            .build();

        App::new()
            .app_data(state.clone())
            .wrap(session)
            .wrap(MethodOverride)
            .wrap(Trace)
            .configure(routes)
    })
    .bind(bind_addr)?
    .run()
    .await
}

/// Load the session signing key, or generate an ephemeral one when allowed.
fn session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}
