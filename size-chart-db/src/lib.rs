pub mod entity;
pub mod memory;
pub mod product_chart;
pub mod store;

use migration::{Migrator, MigratorTrait};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};
use size_chart_api_types::{ImageRef, ProductId, Rendition};
use thiserror::Error;
use tracing::info;

use crate::entity::*;
pub use crate::memory::InMemoryStore;
pub use crate::product_chart::ProductChartConfig;
pub use crate::store::{MediaLibrary, MetaStore};
pub use sea_orm::DbErr as SeaDbErr;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Db Error {0}")]
    Sea(#[from] SeaDbErr),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Clone, Debug)]
pub struct SizeChartDb {
    db: DatabaseConnection,
}

impl SizeChartDb {
    pub async fn connect(url: &str) -> Result<Self, DbError> {
        let mut opt = ConnectOptions::new(url.to_string());
        if url.starts_with("sqlite::memory:") {
            // every pooled connection would otherwise see its own empty database
            opt.max_connections(1).min_connections(1);
        } else {
            opt.max_connections(20).min_connections(0);
        }
        opt.sqlx_logging(false);
        let db: DatabaseConnection = Database::connect(opt).await?;
        Migrator::up(&db, None).await?;
        info!("size chart db connected & migrated");
        Ok(Self { db })
    }
}

#[async_trait::async_trait]
impl MetaStore for SizeChartDb {
    async fn get_meta(&self, product: ProductId, key: &str) -> Result<Option<String>, DbError> {
        let meta = product_meta::Entity::find()
            .filter(product_meta::Column::ProductId.eq(product.get()))
            .filter(product_meta::Column::MetaKey.eq(key))
            .one(&self.db)
            .await?;
        Ok(meta.map(|m| m.meta_value))
    }

    async fn set_meta(&self, product: ProductId, key: &str, value: &str) -> Result<(), DbError> {
        let model = product_meta::ActiveModel {
            product_id: Set(product.get()),
            meta_key: Set(key.to_string()),
            meta_value: Set(value.to_string()),
        };
        product_meta::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    product_meta::Column::ProductId,
                    product_meta::Column::MetaKey,
                ])
                .update_column(product_meta::Column::MetaValue)
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl MediaLibrary for SizeChartDb {
    async fn resolve_url(
        &self,
        image: ImageRef,
        rendition: Rendition,
    ) -> Result<Option<String>, DbError> {
        let Ok(id) = i32::try_from(image.0) else {
            return Ok(None);
        };
        let attachment = attachment::Entity::find_by_id(id).one(&self.db).await?;
        Ok(attachment.map(|a| match rendition {
            Rendition::Full => a.url,
            Rendition::Thumbnail => a.thumbnail_url.unwrap_or(a.url),
        }))
    }

    async fn register(&self, url: &str, thumbnail_url: Option<&str>) -> Result<ImageRef, DbError> {
        let model = attachment::ActiveModel {
            id: NotSet,
            url: Set(url.to_string()),
            thumbnail_url: Set(thumbnail_url.map(str::to_string)),
        };
        let insert = attachment::Entity::insert(model).exec(&self.db).await?;
        info!("Registered attachment {}", insert.last_insert_id);
        Ok(ImageRef(i64::from(insert.last_insert_id)))
    }
}
