//! Data exchange client
//!
//! Entities exchange byte payloads through a key-value data store while they
//! run. Keys are prefixed with the owning entity's name, so a model `sim_0`
//! sending `"temp"` writes `sim_0_temp`, and a consumer registered against
//! `sim_0` reads it back by asking for `"temp"`.
//!
//! Settings come from an explicit [`ClientConfig`]; the client never reads
//! process environment.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use trueno_ensemble::client::{Client, ClientConfig, MemoryDataStore};
//!
//! # fn example() -> trueno_ensemble::Result<()> {
//! let store = Arc::new(MemoryDataStore::new());
//!
//! let mut producer = Client::new("sim_0", ClientConfig::default());
//! producer.register_outgoing("db", Arc::clone(&store));
//! producer.send_data("temp", b"300".to_vec())?;
//!
//! let mut consumer = Client::new("analysis", ClientConfig::default());
//! consumer.register_incoming("sim_0", store);
//! let data = consumer.get_data("temp", false)?;
//! assert_eq!(data["sim_0"], Some(b"300".to_vec()));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

mod memory;

pub use memory::MemoryDataStore;

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Key-value store used for runtime data exchange.
pub trait DataStore: Send + Sync {
    /// Get a value by key.
    ///
    /// Returns `None` if the key doesn't exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store a value, overwriting any existing one.
    fn send(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Delete a key.
    ///
    /// No-op if the key doesn't exist.
    fn delete(&self, key: &str) -> Result<()>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool>;

    /// Poll until `key` exists, sleeping `wait_interval` between attempts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] once `max_wait` has elapsed.
    fn poll(&self, key: &str, wait_interval: Duration, max_wait: Option<Duration>) -> Result<Vec<u8>> {
        let started = Instant::now();
        loop {
            if let Some(value) = self.get(key)? {
                return Ok(value);
            }
            if max_wait.is_some_and(|limit| started.elapsed() >= limit) {
                return Err(Error::Timeout {
                    key: key.to_string(),
                    waited_ms: started.elapsed().as_millis(),
                });
            }
            thread::sleep(wait_interval);
        }
    }
}

/// Client polling behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Delay between polling attempts when waiting for a key
    pub wait_interval: Duration,
    /// Give up waiting after this long; `None` waits indefinitely
    pub max_wait: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            wait_interval: Duration::from_millis(500),
            max_wait: None,
        }
    }
}

/// Sends and receives data on behalf of one named entity
pub struct Client<S: DataStore> {
    name: String,
    config: ClientConfig,
    connections_in: IndexMap<String, Arc<S>>,
    connections_out: IndexMap<String, Arc<S>>,
}

impl<S: DataStore> Client<S> {
    /// Create a client for the entity `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, config: ClientConfig) -> Self {
        Self {
            name: name.into(),
            config,
            connections_in: IndexMap::new(),
            connections_out: IndexMap::new(),
        }
    }

    /// Entity name used to prefix outgoing keys.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read data produced by entity `source` from `store`.
    pub fn register_incoming(&mut self, source: impl Into<String>, store: Arc<S>) {
        self.connections_in.insert(source.into(), store);
    }

    /// Send data to `store`, registered under `name`.
    pub fn register_outgoing(&mut self, name: impl Into<String>, store: Arc<S>) {
        self.connections_out.insert(name.into(), store);
    }

    /// Store `value` at `<client name>_<key>` on the first outgoing connection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an empty key or when no outgoing
    /// connection is registered.
    pub fn send_data(&self, key: &str, value: Vec<u8>) -> Result<()> {
        if key.is_empty() {
            return Err(Error::Configuration("Key must not be empty".to_string()));
        }
        let Some(store) = self.connections_out.values().next() else {
            return Err(Error::Configuration(format!(
                "Client {} has no outgoing connection to send {key}",
                self.name
            )));
        };
        store.send(&prefixed(&self.name, key), value)
    }

    /// Read `<source>_<key>` from every incoming connection, keyed by source.
    ///
    /// With `wait`, each connection is polled until the key appears.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an empty key and
    /// [`Error::Timeout`] if a wait exceeds `max_wait`.
    pub fn get_data(&self, key: &str, wait: bool) -> Result<IndexMap<String, Option<Vec<u8>>>> {
        if key.is_empty() {
            return Err(Error::Configuration("Key must not be empty".to_string()));
        }
        let mut all_data = IndexMap::with_capacity(self.connections_in.len());
        for (source, store) in &self.connections_in {
            let full_key = prefixed(source, key);
            let data = if wait {
                Some(store.poll(&full_key, self.config.wait_interval, self.config.max_wait)?)
            } else {
                store.get(&full_key)?
            };
            all_data.insert(source.clone(), data);
        }
        Ok(all_data)
    }
}

fn prefixed(name: &str, key: &str) -> String {
    format!("{name}_{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> ClientConfig {
        ClientConfig {
            wait_interval: Duration::from_millis(5),
            max_wait: Some(Duration::from_millis(50)),
        }
    }

    #[test]
    fn test_send_prefixes_key() {
        let store = Arc::new(MemoryDataStore::new());
        let mut client = Client::new("sim_0", fast_config());
        client.register_outgoing("db", Arc::clone(&store));

        client.send_data("temp", b"1".to_vec()).unwrap();

        assert_eq!(store.get("sim_0_temp").unwrap(), Some(b"1".to_vec()));
        assert!(!store.exists("temp").unwrap());
    }

    #[test]
    fn test_send_without_connection_rejected() {
        let client: Client<MemoryDataStore> = Client::new("sim_0", fast_config());
        let err = client.send_data("temp", vec![1]).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_empty_key_rejected() {
        let client: Client<MemoryDataStore> = Client::new("sim_0", fast_config());
        assert!(matches!(
            client.get_data("", false).unwrap_err(),
            Error::Configuration(_)
        ));
    }

    #[test]
    fn test_get_from_multiple_sources() {
        let store = Arc::new(MemoryDataStore::new());
        store.send("sim_0_temp", b"a".to_vec()).unwrap();
        store.send("sim_1_temp", b"b".to_vec()).unwrap();

        let mut client = Client::new("analysis", fast_config());
        client.register_incoming("sim_0", Arc::clone(&store));
        client.register_incoming("sim_1", Arc::clone(&store));
        client.register_incoming("sim_2", store);

        let data = client.get_data("temp", false).unwrap();
        let sources: Vec<&String> = data.keys().collect();
        assert_eq!(sources, vec!["sim_0", "sim_1", "sim_2"]);
        assert_eq!(data["sim_1"], Some(b"b".to_vec()));
        assert_eq!(data["sim_2"], None);
    }

    #[test]
    fn test_wait_times_out() {
        let store = Arc::new(MemoryDataStore::new());
        let mut client = Client::new("analysis", fast_config());
        client.register_incoming("sim_0", store);

        let err = client.get_data("never", true).unwrap_err();
        assert!(matches!(err, Error::Timeout { ref key, .. } if key == "sim_0_never"));
    }

    #[test]
    fn test_wait_sees_late_value() {
        let store = Arc::new(MemoryDataStore::new());
        let mut client = Client::new(
            "analysis",
            ClientConfig {
                wait_interval: Duration::from_millis(5),
                max_wait: Some(Duration::from_secs(5)),
            },
        );
        client.register_incoming("sim_0", Arc::clone(&store));

        let writer = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            store.send("sim_0_late", b"done".to_vec()).unwrap();
        });
        let data = client.get_data("late", true).unwrap();
        writer.join().unwrap();
        assert_eq!(data["sim_0"], Some(b"done".to_vec()));
    }
}
