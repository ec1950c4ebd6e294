mod product;

pub mod lookup;
pub mod markup;
pub mod media;
pub mod result;
pub mod settings;

pub use lookup::{LookupForm, LookupRequest, LookupResult};
pub use product::{ImageRef, InvalidProductId, ProductId, Rendition};
pub use settings::ChartSettingsForm;

/// Action name the lookup endpoint dispatches on.
pub const GET_SIZE_CHART_ACTION: &str = "get_size_chart";

/// Action the anti-forgery token is minted for.
pub const SIZE_CHART_NONCE_ACTION: &str = "size_chart_nonce";

/// Action the admin forms' token is minted for.
pub const SIZE_CHART_ADMIN_ACTION: &str = "size_chart_admin";
