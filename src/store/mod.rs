pub mod error;
pub mod memory;
#[cfg(feature = "mongo")]
pub mod mongo;
pub mod traits;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryStore;
#[cfg(feature = "mongo")]
pub use mongo::MongoStore;
pub use traits::DataStore;

use crate::config::DatabaseConfig;

/// Open the store selected by `config`.
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn DataStore>> {
    match config {
        DatabaseConfig::InMemory { preload_demo_data } => {
            let store = if *preload_demo_data {
                InMemoryStore::with_listings(crate::seed::demo_listings())
            } else {
                InMemoryStore::new()
            };
            info!(listings = store.len(), "using in-memory store");
            Ok(Arc::new(store))
        }
        DatabaseConfig::Mongo { url, database } => connect_mongo(url, database).await,
    }
}

#[cfg(feature = "mongo")]
async fn connect_mongo(url: &str, database: &str) -> Result<Arc<dyn DataStore>> {
    use anyhow::Context;

    let store = MongoStore::connect(url, database)
        .await
        .context("could not connect to MongoDB")?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "mongo"))]
async fn connect_mongo(_url: &str, _database: &str) -> Result<Arc<dyn DataStore>> {
    anyhow::bail!("MongoDB was requested but this binary was built without the `mongo` feature")
}
