//! Key-value store access.
//!
//! Handlers talk to a [`StoreClient`], which forwards to whichever
//! [`KvStore`] backend was selected at startup: Redis in production, or the
//! in-process [`MemoryStore`] for local development and tests.

mod memory;
mod redis_store;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{Config, StoreBackend};

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

/// A persisted record: flat mapping of field name to string value
pub type Record = HashMap<String, String>;

/// Operations every backend provides
///
/// Errors from any of these are treated as the store being unavailable.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Round trip to the store
    async fn ping(&self) -> Result<()>;

    async fn exists(&self, key: &str) -> Result<bool>;

    /// Fetch the record at `key`, `None` if the key does not exist
    async fn get(&self, key: &str) -> Result<Option<Record>>;

    /// Write every field of `record` at `key`
    async fn set(&self, key: &str, record: &Record) -> Result<()>;

    /// Write every field of `record` at `key` only if `key` already exists
    ///
    /// The check and the write are one atomic step, so a concurrent delete
    /// can never be undone by this write. Returns whether the write happened.
    async fn update_existing(&self, key: &str, record: &Record) -> Result<bool>;

    /// Remove `key`; removing an absent key is not an error
    async fn delete(&self, key: &str) -> Result<()>;

    /// All keys in the store, in the backend's native order
    async fn keys(&self) -> Result<Vec<String>>;

    /// Atomically increment the integer at `key` and return the new value
    ///
    /// An absent key counts as 0.
    async fn increment(&self, key: &str) -> Result<i64>;
}

/// Shareable store handle for use across async handlers
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<dyn KvStore>,
}

impl StoreClient {
    pub fn new(store: impl KvStore + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Connect to the backend named in the configuration
    ///
    /// For Redis, each configured endpoint is tried in order and the first
    /// one that answers a PING is used. Fails if none are reachable.
    pub async fn from_config(config: &Config) -> Result<Self> {
        match config.store_backend {
            StoreBackend::Memory => {
                tracing::warn!("Using the in-memory store; data is lost on exit");
                Ok(Self::new(MemoryStore::new()))
            }
            StoreBackend::Redis => {
                for endpoint in &config.redis_endpoints {
                    tracing::info!(
                        "Connecting to Redis ({}) at {}:{}",
                        endpoint.source,
                        endpoint.host,
                        endpoint.port
                    );
                    match RedisStore::connect(endpoint, config.store_timeout).await {
                        Ok(store) => {
                            tracing::info!(
                                "Successfully connected to Redis at {}:{}",
                                endpoint.host,
                                endpoint.port
                            );
                            return Ok(Self::new(store));
                        }
                        Err(e) => {
                            tracing::warn!("No Redis at {}:{}: {:#}", endpoint.host, endpoint.port, e);
                        }
                    }
                }
                Err(anyhow!("Could not connect to the Redis service"))
            }
        }
    }

    pub async fn ping(&self) -> Result<()> {
        self.inner.ping().await
    }

    pub async fn exists(&self, key: &str) -> Result<bool> {
        self.inner.exists(key).await
    }

    pub async fn get(&self, key: &str) -> Result<Option<Record>> {
        self.inner.get(key).await
    }

    pub async fn set(&self, key: &str, record: &Record) -> Result<()> {
        self.inner.set(key, record).await
    }

    pub async fn update_existing(&self, key: &str, record: &Record) -> Result<bool> {
        self.inner.update_existing(key, record).await
    }

    pub async fn delete(&self, key: &str) -> Result<()> {
        self.inner.delete(key).await
    }

    pub async fn keys(&self) -> Result<Vec<String>> {
        self.inner.keys().await
    }

    pub async fn increment(&self, key: &str) -> Result<i64> {
        self.inner.increment(key).await
    }
}
