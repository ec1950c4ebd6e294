mod config;
mod lookup_service;
mod nonce;
mod web;

use std::sync::Arc;

use anyhow::Result;
use size_chart_db::SizeChartDb;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::lookup_service::ChartLookupService;
use crate::nonce::NonceService;
use crate::web::WebState;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let config = Config::from_env()?;
    info!("db starting");
    let db = Arc::new(SizeChartDb::connect(&config.database_url).await?);
    let nonces = NonceService::new(&config.nonce_secret, config.nonce_lifetime);
    let lookup_service = ChartLookupService::new(db.clone(), db, nonces);
    let web_state = WebState {
        lookup_service,
        key: config.cookie_key.clone(),
        config: Arc::new(config),
    };
    web::start_web(web_state).await
}
