use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::store::DeliveryPolicy;

/// Top-level configuration settings for the application.
///
/// Includes settings for the server, the store and logging.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server: ServerSettings,
    pub store: StoreSettings,
    pub log: LogSettings,
}

/// Configuration settings for the server.
///
/// Defines the host and port the server will bind to.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Which broadcast strategy the store runs.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    #[default]
    Rendezvous,
    Timeout,
    Buffered,
}

/// Configuration settings for the store.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub delivery: DeliveryMode,
    /// Only read in `timeout` mode.
    pub send_timeout_ms: u64,
    /// Only read in `buffered` mode.
    pub buffer_capacity: usize,
    /// Messages published at startup, keyed by topic.
    pub preload: BTreeMap<String, Vec<String>>,
}

impl StoreSettings {
    pub fn delivery_policy(&self) -> DeliveryPolicy {
        match self.delivery {
            DeliveryMode::Rendezvous => DeliveryPolicy::Rendezvous,
            DeliveryMode::Timeout => {
                DeliveryPolicy::RendezvousTimeout(Duration::from_millis(self.send_timeout_ms))
            }
            DeliveryMode::Buffered => DeliveryPolicy::Buffered {
                capacity: self.buffer_capacity,
            },
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub store: Option<PartialStoreSettings>,
    pub log: Option<PartialLogSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct PartialStoreSettings {
    pub delivery: Option<DeliveryMode>,
    pub send_timeout_ms: Option<u64>,
    pub buffer_capacity: Option<usize>,
    pub preload: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLogSettings {
    pub level: Option<String>,
}

/// Provides default values for `Settings`.
///
/// Ensures the application has sensible defaults if no configuration is provided.
impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            store: StoreSettings {
                delivery: DeliveryMode::Rendezvous,
                send_timeout_ms: 1000,
                buffer_capacity: 64,
                preload: BTreeMap::new(),
            },
            log: LogSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl Settings {
    /// Fill every value missing from `partial` with its default.
    pub fn merge(partial: PartialSettings) -> Self {
        let default = Self::default();
        let server = partial.server;
        let store = partial.store;
        let log = partial.log;

        Self {
            server: ServerSettings {
                host: server
                    .as_ref()
                    .and_then(|s| s.host.clone())
                    .unwrap_or(default.server.host),
                port: server
                    .as_ref()
                    .and_then(|s| s.port)
                    .unwrap_or(default.server.port),
            },
            store: StoreSettings {
                delivery: store
                    .as_ref()
                    .and_then(|s| s.delivery)
                    .unwrap_or(default.store.delivery),
                send_timeout_ms: store
                    .as_ref()
                    .and_then(|s| s.send_timeout_ms)
                    .unwrap_or(default.store.send_timeout_ms),
                buffer_capacity: store
                    .as_ref()
                    .and_then(|s| s.buffer_capacity)
                    .unwrap_or(default.store.buffer_capacity),
                preload: store
                    .and_then(|s| s.preload)
                    .unwrap_or(default.store.preload),
            },
            log: LogSettings {
                level: log
                    .and_then(|l| l.level)
                    .unwrap_or(default.log.level),
            },
        }
    }
}
