// src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use siren_search::{
    app::build_router,
    config::{AppState, Config},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // If the configuration is incomplete the server must not start.
    let config = Config::from_env()?;
    let app_state = AppState::new(&config).await?;

    // Only the accounts table belongs to us, the reference tables are read-only.
    sqlx::migrate!().run(&app_state.users_pool).await?;
    tracing::info!("✅ Migrations exécutées avec succès");

    let app = build_router(app_state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("🚀 Serveur à l'écoute sur {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
