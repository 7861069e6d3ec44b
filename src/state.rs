use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use axum::extract::FromRef;
use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use url::Url;

#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: DBPool,
}

impl AppState {
    pub fn new() -> Result<Self> {
        let config: DbConfig = envy::prefixed("PG_").from_env()?;
        Ok(Self::from_pool(create_db_pool(&config)?))
    }

    pub fn from_pool(pool: DBPool) -> Self {
        Self { pool }
    }
}

pub type DBPool = Pool<Postgres>;

impl FromRef<AppState> for DBPool {
    fn from_ref(input: &AppState) -> Self {
        input.pool.clone()
    }
}

fn default_port() -> u16 {
    3000
}

fn default_bind_address() -> String {
    "::".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Ok(envy::from_env()?)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind_address
            .parse()
            .with_context(|| format!("invalid BIND_ADDRESS {:?}", self.bind_address))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

fn default_pg_port() -> u16 {
    5432
}

#[derive(Debug, Deserialize)]
pub struct DbConfig {
    host: String,
    #[serde(default = "default_pg_port")]
    port: u16,
    user: String,
    pass: String,
    database: String,
    sslmode: Option<String>,
    acquire_timeout_secs: Option<u64>,
}

impl DbConfig {
    fn url(&self) -> Result<Url> {
        let mut url = Url::parse("postgres://")?;
        url.set_host(Some(&self.host))?;
        url.set_username(&self.user)
            .map_err(|()| anyhow!("username should be accepted"))?;
        url.set_password(Some(&self.pass))
            .map_err(|()| anyhow!("password should be accepted"))?;
        url.set_port(Some(self.port))
            .map_err(|()| anyhow!("port should be accepted"))?;
        url.set_path(&self.database);
        if let Some(mode) = &self.sslmode {
            url.query_pairs_mut().append_pair("sslmode", mode);
        }
        Ok(url)
    }
}

pub fn create_db_pool(config: &DbConfig) -> Result<DBPool> {
    let url = config.url()?;
    let mut options = PgPoolOptions::new();
    if let Some(secs) = config.acquire_timeout_secs {
        options = options.acquire_timeout(Duration::from_secs(secs));
    }
    Ok(options.connect_lazy(url.as_ref())?)
}
