//! In-process backend for local development and tests. Not durable.

use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{KvStore, Record};

#[derive(Debug, Clone)]
enum Value {
    Hash(Record),
    Counter(i64),
}

/// In-memory implementation of [`KvStore`]
///
/// Mirrors the Redis semantics the service relies on: hashes and counters
/// live in one keyspace, and using a key as the wrong kind is an error.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.data.read().await.contains_key(key))
    }

    async fn get(&self, key: &str) -> Result<Option<Record>> {
        match self.data.read().await.get(key) {
            Some(Value::Hash(record)) => Ok(Some(record.clone())),
            Some(Value::Counter(_)) => bail!("key '{}' holds a counter, not a record", key),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, record: &Record) -> Result<()> {
        let mut data = self.data.write().await;
        match data.get_mut(key) {
            Some(Value::Hash(existing)) => {
                existing.extend(record.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            Some(Value::Counter(_)) => bail!("key '{}' holds a counter, not a record", key),
            None => {
                data.insert(key.to_string(), Value::Hash(record.clone()));
            }
        }
        Ok(())
    }

    async fn update_existing(&self, key: &str, record: &Record) -> Result<bool> {
        let mut data = self.data.write().await;
        match data.get_mut(key) {
            Some(Value::Hash(existing)) => {
                existing.extend(record.iter().map(|(k, v)| (k.clone(), v.clone())));
                Ok(true)
            }
            Some(Value::Counter(_)) => bail!("key '{}' holds a counter, not a record", key),
            None => Ok(false),
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.data.write().await.remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        Ok(self.data.read().await.keys().cloned().collect())
    }

    async fn increment(&self, key: &str) -> Result<i64> {
        let mut data = self.data.write().await;
        let value = data.entry(key.to_string()).or_insert(Value::Counter(0));
        match value {
            Value::Counter(n) => {
                *n += 1;
                Ok(*n)
            }
            Value::Hash(_) => bail!("key '{}' holds a record, not a counter", key),
        }
    }
}
