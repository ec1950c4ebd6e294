use serde::{Deserialize, Serialize};

use crate::ImageRef;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRegistration {
    pub url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Admin token, same as the settings form carries.
    #[serde(default)]
    pub nonce: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRegistered {
    pub id: ImageRef,
}
