use serde::{Deserialize, Serialize};

use crate::LookupResult;

/// The `{"success": .., "data": ..}` envelope the lookup endpoint has always answered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AjaxResponse {
    pub success: bool,
    pub data: AjaxData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AjaxData {
    Image { image_url: String },
    Message { message: String },
}

impl AjaxResponse {
    pub fn success(image_url: impl Into<String>) -> Self {
        Self {
            success: true,
            data: AjaxData::Image {
                image_url: image_url.into(),
            },
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: AjaxData::Message {
                message: message.into(),
            },
        }
    }

    /// Human readable message of a failed response.
    pub fn message(&self) -> Option<&str> {
        match &self.data {
            AjaxData::Message { message } => Some(message),
            AjaxData::Image { .. } => None,
        }
    }
}

impl From<&LookupResult> for AjaxResponse {
    fn from(value: &LookupResult) -> Self {
        match value {
            LookupResult::Found { image_url } => Self::success(image_url.as_str()),
            LookupResult::NotFound { reason } | LookupResult::Invalid { reason } => {
                Self::failure(reason.as_str())
            }
        }
    }
}
