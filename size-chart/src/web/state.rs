use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use std::sync::Arc;

use crate::config::Config;
use crate::lookup_service::ChartLookupService;

#[derive(Clone)]
pub(crate) struct WebState {
    pub(crate) lookup_service: ChartLookupService,
    pub(crate) key: Key,
    pub(crate) config: Arc<Config>,
}

impl FromRef<WebState> for ChartLookupService {
    fn from_ref(input: &WebState) -> Self {
        input.lookup_service.clone()
    }
}

impl FromRef<WebState> for Key {
    fn from_ref(input: &WebState) -> Self {
        input.key.clone()
    }
}

impl FromRef<WebState> for Arc<Config> {
    fn from_ref(input: &WebState) -> Self {
        input.config.clone()
    }
}
