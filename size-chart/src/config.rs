use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use axum_extra::extract::cookie::Key;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::warn;
use uuid::Uuid;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";
const DEFAULT_NONCE_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);
const DEFAULT_PKG_DIR: &str = "./size-chart-frontend/size-chart-client/pkg";

/// Process configuration, read once from the environment at startup.
#[derive(Clone)]
pub(crate) struct Config {
    pub(crate) port: u16,
    pub(crate) database_url: String,
    pub(crate) cookie_key: Key,
    pub(crate) nonce_secret: Vec<u8>,
    pub(crate) nonce_lifetime: Duration,
    pub(crate) public_url: String,
    /// Output of `wasm-pack build --target web` for the client, served under `/pkg`.
    pub(crate) pkg_dir: PathBuf,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match var("PORT") {
            Some(port) => port.parse::<u16>().context("PORT is not a valid port")?,
            None => DEFAULT_PORT,
        };
        let database_url = var("DATABASE_URL").unwrap_or_else(|| {
            warn!("DATABASE_URL not set, settings will not survive a restart");
            DEFAULT_DATABASE_URL.to_string()
        });
        let cookie_key = match var("KEY") {
            Some(key) => {
                let bytes = STANDARD.decode(key.trim()).context("KEY is not valid base64")?;
                Key::try_from(bytes.as_slice()).map_err(|e| {
                    anyhow::anyhow!("KEY must decode to at least 64 bytes: {e:?}")
                })?
            }
            None => {
                warn!("KEY not set, generating a cookie key. Sessions end on restart");
                Key::generate()
            }
        };
        let nonce_secret = match var("NONCE_SECRET") {
            Some(secret) if !secret.is_empty() => secret.into_bytes(),
            _ => {
                warn!("NONCE_SECRET not set, generating one. Issued tokens end on restart");
                Uuid::new_v4()
                    .as_bytes()
                    .iter()
                    .chain(Uuid::new_v4().as_bytes())
                    .copied()
                    .collect()
            }
        };
        let nonce_lifetime = match var("NONCE_LIFETIME_SECS") {
            Some(secs) => Duration::from_secs(
                secs.parse::<u64>()
                    .context("NONCE_LIFETIME_SECS is not a number")?,
            ),
            None => DEFAULT_NONCE_LIFETIME,
        };
        let public_url = var("PUBLIC_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("http://localhost:{port}"));
        let pkg_dir = var("PKG_DIR").map_or_else(|| PathBuf::from(DEFAULT_PKG_DIR), PathBuf::from);
        Ok(Self {
            port,
            database_url,
            cookie_key,
            nonce_secret,
            nonce_lifetime,
            public_url,
            pkg_dir,
        })
    }

    pub(crate) fn ajax_url(&self) -> String {
        format!("{}/admin-ajax", self.public_url)
    }

    /// Fixed values for tests, no environment involved.
    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            cookie_key: Key::generate(),
            nonce_secret: b"test secret".to_vec(),
            nonce_lifetime: DEFAULT_NONCE_LIFETIME,
            public_url: "http://shop.test".to_string(),
            pkg_dir: PathBuf::from(DEFAULT_PKG_DIR),
        }
    }
}
