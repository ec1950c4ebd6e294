use serde::{Deserialize, Serialize};

use crate::ProductId;

pub const BAD_TOKEN: &str = "bad token";
pub const BAD_PRODUCT_ID: &str = "bad product id";
pub const NO_IMAGE: &str = "no size chart image found";
pub const IMAGE_UNAVAILABLE: &str = "size chart image unavailable";
pub const TIMEOUT: &str = "timeout";

/// Raw form body posted to the lookup endpoint. Every field is optional so that missing fields
/// reach validation instead of failing extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupForm {
    pub action: Option<String>,
    pub product_id: Option<String>,
    pub nonce: Option<String>,
}

/// A lookup that has passed the token check and carries a well formed product id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub product_id: ProductId,
    pub token: String,
}

impl LookupForm {
    /// Validates the form. The token is checked before the product id is even looked at,
    /// so a bad token always wins over a bad id.
    pub fn into_request<F>(self, token_is_valid: F) -> Result<LookupRequest, LookupResult>
    where
        F: FnOnce(&str) -> bool,
    {
        let token = match self.nonce {
            Some(token) if !token.is_empty() && token_is_valid(&token) => token,
            _ => return Err(LookupResult::invalid(BAD_TOKEN)),
        };
        let product_id = self
            .product_id
            .as_deref()
            .and_then(|id| id.parse::<ProductId>().ok())
            .ok_or_else(|| LookupResult::invalid(BAD_PRODUCT_ID))?;
        Ok(LookupRequest { product_id, token })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LookupResult {
    Found { image_url: String },
    NotFound { reason: String },
    Invalid { reason: String },
}

impl LookupResult {
    pub fn found(image_url: impl Into<String>) -> Self {
        Self::Found {
            image_url: image_url.into(),
        }
    }

    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::NotFound {
            reason: reason.into(),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }

    pub fn is_bad_token(&self) -> bool {
        matches!(self, Self::Invalid { reason } if reason == BAD_TOKEN)
    }
}
