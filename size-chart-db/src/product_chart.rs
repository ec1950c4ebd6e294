use size_chart_api_types::{ChartSettingsForm, ImageRef, ProductId};
use tracing::info;

use crate::{DbError, MetaStore};

pub const ENABLE_KEY: &str = "_enable_size_chart";
pub const BUTTON_TEXT_KEY: &str = "_size_chart_button_text";
pub const IMAGE_ID_KEY: &str = "_size_chart_image_id";
pub const DEFAULT_BUTTON_LABEL: &str = "Size Chart";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductChartConfig {
    pub enabled: bool,
    pub button_label: String,
    pub image_ref: Option<ImageRef>,
}

impl ProductChartConfig {
    pub async fn load(store: &dyn MetaStore, product: ProductId) -> Result<Self, DbError> {
        let enabled = store.get_meta(product, ENABLE_KEY).await?;
        let button_label = store.get_meta(product, BUTTON_TEXT_KEY).await?;
        let image_ref = store.get_meta(product, IMAGE_ID_KEY).await?;
        Ok(Self {
            enabled: enabled.as_deref() == Some("yes"),
            button_label: button_label.unwrap_or_default(),
            image_ref: image_ref.as_deref().and_then(ImageRef::from_meta),
        })
    }

    /// Only the image reference, for callers that don't care about the button.
    pub async fn load_image_ref(
        store: &dyn MetaStore,
        product: ProductId,
    ) -> Result<Option<ImageRef>, DbError> {
        let image_ref = store.get_meta(product, IMAGE_ID_KEY).await?;
        Ok(image_ref.as_deref().and_then(ImageRef::from_meta))
    }

    pub fn label(&self) -> &str {
        if self.button_label.is_empty() {
            DEFAULT_BUTTON_LABEL
        } else {
            &self.button_label
        }
    }
}

/// Persists the admin form. The enabled flag is always written, the label and image only when
/// the form carried them.
pub async fn save_settings(
    store: &dyn MetaStore,
    product: ProductId,
    form: &ChartSettingsForm,
) -> Result<(), DbError> {
    let enabled = if form.enable.is_some() { "yes" } else { "no" };
    store.set_meta(product, ENABLE_KEY, enabled).await?;
    if let Some(text) = &form.button_text {
        store
            .set_meta(product, BUTTON_TEXT_KEY, &sanitize_text_field(text))
            .await?;
    }
    if let Some(image_id) = &form.image_id {
        store
            .set_meta(product, IMAGE_ID_KEY, &absint(image_id).to_string())
            .await?;
    }
    info!("Saved size chart settings for product {product} enabled={enabled}");
    Ok(())
}

/// Strips markup and collapses every run of whitespace (line breaks and tabs included) into a
/// single space.
pub fn sanitize_text_field(input: &str) -> String {
    let mut stripped = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => stripped.push(c),
            _ => {}
        }
    }
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Leading integer of the string, made non-negative. Anything unparsable is 0 and digit runs
/// too large for an `i64` saturate at `i64::MAX`.
pub fn absint(input: &str) -> i64 {
    let input = input.trim();
    let digits = input.strip_prefix(['-', '+']).unwrap_or(input);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(i64::MAX)
}
