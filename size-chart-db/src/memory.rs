use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use size_chart_api_types::{ImageRef, ProductId, Rendition};
use tokio::sync::RwLock;

use crate::{DbError, MediaLibrary, MetaStore};

#[derive(Debug, Clone)]
struct StoredAttachment {
    url: String,
    thumbnail_url: Option<String>,
}

/// Process local store used for tests and local development.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    meta: RwLock<HashMap<(ProductId, String), String>>,
    attachments: RwLock<HashMap<ImageRef, StoredAttachment>>,
    last_attachment_id: AtomicI64,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    /// Makes every subsequent call fail as if the backing database went away.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Drops an attachment while leaving references to it in place.
    pub async fn remove_attachment(&self, image: ImageRef) {
        self.attachments.write().await.remove(&image);
    }

    fn check_available(&self) -> Result<(), DbError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable("in memory store switched off".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl MetaStore for InMemoryStore {
    async fn get_meta(&self, product: ProductId, key: &str) -> Result<Option<String>, DbError> {
        self.check_available()?;
        let meta = self.meta.read().await;
        Ok(meta.get(&(product, key.to_string())).cloned())
    }

    async fn set_meta(&self, product: ProductId, key: &str, value: &str) -> Result<(), DbError> {
        self.check_available()?;
        self.meta
            .write()
            .await
            .insert((product, key.to_string()), value.to_string());
        Ok(())
    }
}

#[async_trait]
impl MediaLibrary for InMemoryStore {
    async fn resolve_url(
        &self,
        image: ImageRef,
        rendition: Rendition,
    ) -> Result<Option<String>, DbError> {
        self.check_available()?;
        let attachments = self.attachments.read().await;
        Ok(attachments.get(&image).map(|a| match rendition {
            Rendition::Full => a.url.clone(),
            Rendition::Thumbnail => a.thumbnail_url.clone().unwrap_or_else(|| a.url.clone()),
        }))
    }

    async fn register(&self, url: &str, thumbnail_url: Option<&str>) -> Result<ImageRef, DbError> {
        self.check_available()?;
        let id = ImageRef(self.last_attachment_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.attachments.write().await.insert(
            id,
            StoredAttachment {
                url: url.to_string(),
                thumbnail_url: thumbnail_url.map(str::to_string),
            },
        );
        Ok(id)
    }
}
