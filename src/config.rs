// src/config.rs

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, str::FromStr, time::Duration};

use crate::{
    db::{ActivityRepository, CompanyRepository, GeoRepository, UserRepository},
    services::{
        activity_service::ActivityService, auth::AuthService, geo_service::GeoService,
        search_service::SearchService,
    },
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Settings read once at start-up from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    /// Store holding the SIRENE reference tables.
    pub database_url: String,
    /// Store holding `admin_users`. Same as `database_url` unless overridden.
    pub users_database_url: String,
    pub jwt_secret: String,
    pub jwt_ttl_minutes: i64,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL doit être définie")?;
        let users_database_url =
            env::var("USERS_DATABASE_URL").unwrap_or_else(|_| database_url.clone());
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET doit être défini")?;

        Ok(Self {
            database_url,
            users_database_url,
            jwt_secret,
            jwt_ttl_minutes: env_or("JWT_TTL_MINUTES", 30)?,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 5)?,
            db_acquire_timeout: Duration::from_secs(env_or("DB_ACQUIRE_TIMEOUT_SECS", 3)?),
        })
    }
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{key} contient une valeur invalide: {raw}")),
        Err(_) => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub users_pool: PgPool,
    pub auth_service: AuthService,
    pub search_service: SearchService,
    pub activity_service: ActivityService,
    pub geo_service: GeoService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = pool_options(config)
            .connect(&config.database_url)
            .await
            .context("connexion à la base SIRENE impossible")?;

        let users_pool = if config.users_database_url == config.database_url {
            db_pool.clone()
        } else {
            pool_options(config)
                .connect(&config.users_database_url)
                .await
                .context("connexion à la base des utilisateurs impossible")?
        };

        tracing::info!("✅ Connexion à la base de données établie");

        Ok(Self::from_pools(config, db_pool, users_pool))
    }

    /// Wires the dependency graph on top of already created pools.
    pub fn from_pools(config: &Config, db_pool: PgPool, users_pool: PgPool) -> Self {
        let user_repo = UserRepository::new(users_pool.clone());
        let auth_service =
            AuthService::new(user_repo, config.jwt_secret.clone(), config.jwt_ttl_minutes);

        Self {
            db_pool,
            users_pool,
            auth_service,
            search_service: SearchService::new(CompanyRepository),
            activity_service: ActivityService::new(ActivityRepository),
            geo_service: GeoService::new(GeoRepository),
        }
    }
}

fn pool_options(config: &Config) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout)
}
