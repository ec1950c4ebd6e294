use std::sync::Arc;

use size_chart_api_types::lookup::{IMAGE_UNAVAILABLE, NO_IMAGE};
use size_chart_api_types::{
    ChartSettingsForm, ImageRef, LookupForm, LookupRequest, LookupResult, ProductId, Rendition,
    SIZE_CHART_ADMIN_ACTION, SIZE_CHART_NONCE_ACTION,
};
use size_chart_db::product_chart::save_settings;
use size_chart_db::{DbError, MediaLibrary, MetaStore, ProductChartConfig};
use tracing::{debug, warn};

use crate::nonce::{NonceService, SessionId};

/// What the product page needs to draw the size chart button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChartButton {
    pub(crate) product_id: ProductId,
    pub(crate) label: String,
}

/// Serves size chart lookups and the settings around them. Holds no state of its own,
/// every call goes back to the settings store and the media library.
#[derive(Clone)]
pub(crate) struct ChartLookupService {
    settings: Arc<dyn MetaStore>,
    media: Arc<dyn MediaLibrary>,
    nonces: NonceService,
}

impl ChartLookupService {
    pub(crate) fn new(
        settings: Arc<dyn MetaStore>,
        media: Arc<dyn MediaLibrary>,
        nonces: NonceService,
    ) -> Self {
        Self {
            settings,
            media,
            nonces,
        }
    }

    pub(crate) fn issue_token(&self, session: &SessionId) -> String {
        self.nonces.create(session, SIZE_CHART_NONCE_ACTION)
    }

    /// Token for the settings form and media registration, distinct from the shopper token.
    pub(crate) fn issue_admin_token(&self, session: &SessionId) -> String {
        self.nonces.create(session, SIZE_CHART_ADMIN_ACTION)
    }

    pub(crate) fn verify_admin_token(
        &self,
        session: Option<&SessionId>,
        token: Option<&str>,
    ) -> bool {
        match (session, token) {
            (Some(session), Some(token)) => {
                self.nonces.verify(session, SIZE_CHART_ADMIN_ACTION, token)
            }
            _ => false,
        }
    }

    pub(crate) async fn chart_settings(
        &self,
        product_id: ProductId,
    ) -> Result<ProductChartConfig, DbError> {
        ProductChartConfig::load(self.settings.as_ref(), product_id).await
    }

    /// Parses and answers a lookup. The token is verified before anything is read.
    pub(crate) async fn lookup(
        &self,
        session: Option<&SessionId>,
        form: LookupForm,
    ) -> Result<LookupResult, DbError> {
        let request = form.into_request(|token| {
            session.is_some_and(|session| {
                self.nonces
                    .verify(session, SIZE_CHART_NONCE_ACTION, token)
            })
        });
        match request {
            Ok(request) => self.lookup_request(&request).await,
            Err(rejected) => {
                if rejected.is_bad_token() {
                    warn!(
                        "Rejected size chart lookup with a bad token. session: {:?}",
                        session.map(SessionId::as_str)
                    );
                }
                Ok(rejected)
            }
        }
    }

    pub(crate) async fn lookup_request(
        &self,
        request: &LookupRequest,
    ) -> Result<LookupResult, DbError> {
        let Some(image) =
            ProductChartConfig::load_image_ref(self.settings.as_ref(), request.product_id).await?
        else {
            return Ok(LookupResult::not_found(NO_IMAGE));
        };
        match self.media.resolve_url(image, Rendition::Full).await? {
            Some(url) => Ok(LookupResult::found(url)),
            None => {
                debug!(
                    "Product {} references missing attachment {image}",
                    request.product_id
                );
                Ok(LookupResult::not_found(IMAGE_UNAVAILABLE))
            }
        }
    }

    /// `Some` only when the chart is enabled and its image still resolves.
    pub(crate) async fn chart_button(
        &self,
        product_id: ProductId,
    ) -> Result<Option<ChartButton>, DbError> {
        let config = ProductChartConfig::load(self.settings.as_ref(), product_id).await?;
        if !config.enabled {
            return Ok(None);
        }
        let Some(image) = config.image_ref else {
            return Ok(None);
        };
        if self.media.resolve_url(image, Rendition::Full).await?.is_none() {
            return Ok(None);
        }
        Ok(Some(ChartButton {
            product_id,
            label: config.label().to_string(),
        }))
    }

    pub(crate) async fn on_settings_saved(
        &self,
        product_id: ProductId,
        form: &ChartSettingsForm,
    ) -> Result<(), DbError> {
        save_settings(self.settings.as_ref(), product_id, form).await
    }

    pub(crate) async fn register_media(
        &self,
        url: &str,
        thumbnail_url: Option<&str>,
    ) -> Result<ImageRef, DbError> {
        self.media.register(url, thumbnail_url).await
    }
}
