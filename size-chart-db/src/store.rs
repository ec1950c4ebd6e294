use async_trait::async_trait;
use size_chart_api_types::{ImageRef, ProductId, Rendition};

use crate::DbError;

/// Per product key/value settings, the host's "post meta".
#[async_trait]
pub trait MetaStore: Send + Sync {
    async fn get_meta(&self, product: ProductId, key: &str) -> Result<Option<String>, DbError>;

    async fn set_meta(&self, product: ProductId, key: &str, value: &str) -> Result<(), DbError>;
}

/// Turns attachment references into urls.
#[async_trait]
pub trait MediaLibrary: Send + Sync {
    /// `None` when the reference does not point at an attachment (anymore).
    async fn resolve_url(
        &self,
        image: ImageRef,
        rendition: Rendition,
    ) -> Result<Option<String>, DbError>;

    async fn register(&self, url: &str, thumbnail_url: Option<&str>) -> Result<ImageRef, DbError>;
}
