use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, ConnectionAddr, ConnectionInfo, RedisConnectionInfo, Script};
use std::time::Duration;

use super::{KvStore, Record};
use crate::config::RedisEndpoint;

// HSET only when the hash is still there, in one server-side step
const UPDATE_EXISTING_SCRIPT: &str = r"
if redis.call('EXISTS', KEYS[1]) == 1 then
    redis.call('HSET', KEYS[1], unpack(ARGV))
    return 1
end
return 0
";

/// Redis-backed [`KvStore`]
///
/// Records are Redis hashes and the id counter is a plain integer key.
/// The multiplexed connection is cheap to clone, so every call works on its
/// own handle and concurrent requests share one socket.
#[derive(Clone)]
pub struct RedisStore {
    connection: MultiplexedConnection,
    update_existing: Script,
}

impl RedisStore {
    /// Open a connection to `endpoint` and verify it answers PING
    ///
    /// `timeout` bounds both the initial connect and every later response.
    pub async fn connect(endpoint: &RedisEndpoint, timeout: Duration) -> Result<Self> {
        let info = ConnectionInfo {
            addr: ConnectionAddr::Tcp(endpoint.host.clone(), endpoint.port),
            redis: RedisConnectionInfo {
                password: endpoint.password.clone(),
                ..Default::default()
            },
        };

        let client = redis::Client::open(info).context("Invalid Redis connection info")?;
        let connection = client
            .get_multiplexed_async_connection_with_timeouts(timeout, timeout)
            .await
            .context("Failed to connect to Redis")?;

        let store = Self {
            connection,
            update_existing: Script::new(UPDATE_EXISTING_SCRIPT),
        };
        store.ping().await?;
        Ok(store)
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn ping(&self) -> Result<()> {
        let mut con = self.connection.clone();
        let pong: String = redis::cmd("PING")
            .query_async(&mut con)
            .await
            .context("Failed to ping Redis")?;
        if pong != "PONG" {
            bail!("Unexpected PING reply from Redis: {}", pong);
        }
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut con = self.connection.clone();
        let exists: bool = con
            .exists(key)
            .await
            .context("Failed to check key existence in Redis")?;
        Ok(exists)
    }

    async fn get(&self, key: &str) -> Result<Option<Record>> {
        let mut con = self.connection.clone();
        let record: Record = con
            .hgetall(key)
            .await
            .context("Failed to read record from Redis")?;

        // HGETALL answers an empty hash for missing keys
        if record.is_empty() {
            tracing::debug!("Record not found with key: {}", key);
            Ok(None)
        } else {
            tracing::debug!("Read record with key: {}", key);
            Ok(Some(record))
        }
    }

    async fn set(&self, key: &str, record: &Record) -> Result<()> {
        let mut con = self.connection.clone();
        let fields: Vec<(&str, &str)> = record
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        let _: () = con
            .hset_multiple(key, &fields[..])
            .await
            .context("Failed to write record to Redis")?;

        tracing::debug!("Wrote record with key: {}", key);
        Ok(())
    }

    async fn update_existing(&self, key: &str, record: &Record) -> Result<bool> {
        let mut con = self.connection.clone();
        let mut invocation = self.update_existing.prepare_invoke();
        invocation.key(key);
        for (field, value) in record {
            invocation.arg(field).arg(value);
        }
        let updated: bool = invocation
            .invoke_async(&mut con)
            .await
            .context("Failed to update record in Redis")?;

        tracing::debug!("Updated record with key: {} (existed: {})", key, updated);
        Ok(updated)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut con = self.connection.clone();
        let _: () = con
            .del(key)
            .await
            .context("Failed to delete key from Redis")?;

        tracing::debug!("Deleted key: {}", key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut con = self.connection.clone();
        let keys: Vec<String> = con
            .keys("*")
            .await
            .context("Failed to list keys from Redis")?;
        Ok(keys)
    }

    async fn increment(&self, key: &str) -> Result<i64> {
        let mut con = self.connection.clone();
        let value: i64 = con
            .incr(key, 1)
            .await
            .context("Failed to increment counter in Redis")?;
        Ok(value)
    }
}

// These talk to a real Redis on localhost:6379 and share its keyspace, so
// they only touch keys under a test-only prefix.
#[cfg(test)]
mod tests {
    use super::*;

    async fn local_store() -> RedisStore {
        let endpoint = RedisEndpoint {
            source: "test",
            host: "127.0.0.1".to_string(),
            port: 6379,
            password: None,
        };
        RedisStore::connect(&endpoint, Duration::from_secs(2))
            .await
            .expect("Failed to connect to local Redis")
    }

    #[tokio::test]
    #[ignore = "requires a Redis server on localhost:6379"]
    async fn test_record_lifecycle() {
        let store = local_store().await;
        let key = "pet-service-test:record";
        store.delete(key).await.unwrap();

        let record: Record = [("name", "fido"), ("category", "dog")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        assert_eq!(store.get(key).await.unwrap(), None);
        store.set(key, &record).await.unwrap();
        assert!(store.exists(key).await.unwrap());
        assert_eq!(store.get(key).await.unwrap(), Some(record));
        assert!(store.keys().await.unwrap().contains(&key.to_string()));

        let renamed: Record = [("name".to_string(), "rex".to_string())].into_iter().collect();
        assert!(store.update_existing(key, &renamed).await.unwrap());
        assert_eq!(store.get(key).await.unwrap().unwrap()["name"], "rex");

        store.delete(key).await.unwrap();
        store.delete(key).await.unwrap();
        assert!(!store.exists(key).await.unwrap());
        assert!(!store.update_existing(key, &renamed).await.unwrap());
        assert!(!store.exists(key).await.unwrap());
    }

    #[tokio::test]
    #[ignore = "requires a Redis server on localhost:6379"]
    async fn test_increment() {
        let store = local_store().await;
        let key = "pet-service-test:counter";
        store.delete(key).await.unwrap();

        assert_eq!(store.increment(key).await.unwrap(), 1);
        assert_eq!(store.increment(key).await.unwrap(), 2);

        store.delete(key).await.unwrap();
    }
}
