//! Ids and classes shared by the server rendered product page and the script that binds it.

/// Carries `data-ajax-url` and `data-nonce` for the client.
pub const DATA_ID: &str = "size-chart-data";
pub const MODAL_ID: &str = "size-chart-modal";
pub const MODAL_CLASS: &str = "size-chart-modal";
pub const CONTENT_CLASS: &str = "size-chart-modal-content";
pub const CLOSE_CLASS: &str = "size-chart-close";
pub const IMAGE_CLASS: &str = "size-chart-image";
pub const BUTTON_CLASS: &str = "size-chart-button";
pub const NOTICES_ID: &str = "size-chart-notices";
pub const IMAGE_ALT: &str = "Size Chart";
