use std::env;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Which key-value backend the service talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    Memory,
}

/// A Redis endpoint the service may connect to at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisEndpoint {
    /// Where the endpoint came from, for startup logs
    pub source: &'static str,
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub debug: bool,
    pub service_host: String,
    pub service_port: u16,
    pub store_backend: StoreBackend,
    pub store_timeout: Duration,
    /// Candidate endpoints in connection order; the first reachable one wins
    pub redis_endpoints: Vec<RedisEndpoint>,
}

// Shape of the bound-service credential blob.
#[derive(Deserialize)]
struct VcapServices {
    rediscloud: Vec<BoundService>,
}

#[derive(Deserialize)]
struct BoundService {
    credentials: Credentials,
}

#[derive(Deserialize)]
struct Credentials {
    hostname: String,
    port: PortValue,
    password: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortValue {
    Number(u16),
    Text(String),
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let debug = lookup("DEBUG")
            .map(|v| matches!(v.as_str(), "true" | "True" | "TRUE" | "1"))
            .unwrap_or(false);

        let service_port = lookup("PORT")
            .unwrap_or_else(|| "5000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let store_backend = match lookup("PET_STORE").as_deref() {
            None | Some("redis") => StoreBackend::Redis,
            Some("memory") => StoreBackend::Memory,
            Some(other) => bail!("PET_STORE must be one of: redis, memory, got '{}'", other),
        };

        let store_timeout = lookup("STORE_TIMEOUT_SECS")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u64>()
            .map(Duration::from_secs)
            .context("STORE_TIMEOUT_SECS must be a whole number of seconds")?;

        let mut redis_endpoints = Vec::new();
        if let Some(blob) = lookup("VCAP_SERVICES") {
            redis_endpoints.push(parse_vcap_services(&blob)?);
        }
        redis_endpoints.push(RedisEndpoint {
            source: "localhost",
            host: "127.0.0.1".to_string(),
            port: 6379,
            password: None,
        });
        redis_endpoints.push(RedisEndpoint {
            source: "network host",
            host: "redis".to_string(),
            port: 6379,
            password: None,
        });

        Ok(Config {
            debug,
            service_host,
            service_port,
            store_backend,
            store_timeout,
            redis_endpoints,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Debug: {}", self.debug);
        tracing::info!("  Store backend: {:?}", self.store_backend);
        if self.store_backend == StoreBackend::Redis {
            for endpoint in &self.redis_endpoints {
                tracing::info!(
                    "  Redis candidate ({}): {}:{}",
                    endpoint.source,
                    endpoint.host,
                    endpoint.port
                );
            }
            tracing::info!("  Store timeout: {:?}", self.store_timeout);
        }
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}

fn parse_vcap_services(blob: &str) -> Result<RedisEndpoint> {
    let services: VcapServices =
        serde_json::from_str(blob).context("VCAP_SERVICES is not a valid service binding")?;
    let service = services
        .rediscloud
        .into_iter()
        .next()
        .context("VCAP_SERVICES has no rediscloud binding")?;

    let creds = service.credentials;
    let port = match creds.port {
        PortValue::Number(port) => port,
        PortValue::Text(text) => text
            .parse::<u16>()
            .context("VCAP_SERVICES rediscloud port is not a valid port number")?,
    };

    Ok(RedisEndpoint {
        source: "VCAP_SERVICES",
        host: creds.hostname,
        port,
        password: creds.password.filter(|p| !p.is_empty()),
    })
}
