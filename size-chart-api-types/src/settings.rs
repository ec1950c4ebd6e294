use serde::{Deserialize, Serialize};

/// Admin form fields for a product's size chart settings.
///
/// The checkbox is only present in the body when ticked. The other two fields are only
/// written back when present, matching how the product edit form posts them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSettingsForm {
    #[serde(rename = "_enable_size_chart", default)]
    pub enable: Option<String>,
    #[serde(rename = "_size_chart_button_text", default)]
    pub button_text: Option<String>,
    #[serde(rename = "_size_chart_image_id", default)]
    pub image_id: Option<String>,
    /// Admin token rendered into the settings form.
    #[serde(rename = "_size_chart_admin_nonce", default)]
    pub nonce: Option<String>,
}
