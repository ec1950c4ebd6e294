use async_trait::async_trait;
use reqwest::header::COOKIE;
use size_chart_api_types::result::{AjaxData, AjaxResponse};
use size_chart_api_types::{LookupResult, ProductId, GET_SIZE_CHART_ACTION};

use crate::error::{AppError, AppResult};

/// Where size chart lookups go. Errors are transport level failures, a lookup that was
/// answered (even negatively) is a `LookupResult`.
#[async_trait(?Send)]
pub trait ChartClient {
    async fn lookup(&self, product_id: ProductId) -> AppResult<LookupResult>;
}

/// Posts lookups to the server's ajax endpoint with the token the page was rendered with.
#[derive(Clone, Debug)]
pub struct HttpChartClient {
    client: reqwest::Client,
    ajax_url: String,
    nonce: String,
    session_cookie: Option<String>,
}

impl HttpChartClient {
    pub fn new(ajax_url: impl Into<String>, nonce: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            ajax_url: ajax_url.into(),
            nonce: nonce.into(),
            session_cookie: None,
        }
    }

    /// Browsers attach the session cookie themselves, other callers have to pass it along.
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }
}

#[async_trait(?Send)]
impl ChartClient for HttpChartClient {
    async fn lookup(&self, product_id: ProductId) -> AppResult<LookupResult> {
        let product_id = product_id.to_string();
        let mut request = self.client.post(&self.ajax_url).form(&[
            ("action", GET_SIZE_CHART_ACTION),
            ("product_id", product_id.as_str()),
            ("nonce", self.nonce.as_str()),
        ]);
        if let Some(cookie) = &self.session_cookie {
            request = request.header(COOKIE, cookie);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        let payload: AjaxResponse = serde_json::from_str(&body)?;
        interpret_response(status, payload)
    }
}

/// Maps the endpoint's status code and payload back onto a lookup result.
pub fn interpret_response(status: u16, payload: AjaxResponse) -> AppResult<LookupResult> {
    match (payload.success, payload.data) {
        (true, AjaxData::Image { image_url }) => Ok(LookupResult::found(image_url)),
        (true, AjaxData::Message { message }) => Ok(LookupResult::not_found(message)),
        (false, AjaxData::Message { message }) => match status {
            400 | 403 => Ok(LookupResult::invalid(message)),
            500..=599 => Err(AppError::Unavailable(message)),
            _ => Ok(LookupResult::not_found(message)),
        },
        (false, AjaxData::Image { .. }) => Err(AppError::Unavailable(
            "failed response without a message".to_string(),
        )),
    }
}
