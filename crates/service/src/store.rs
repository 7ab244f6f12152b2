use std::{collections::HashMap, sync::Arc};

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::pokemon::validate_payload;

/// In-memory pokemon store: id -> raw JSON record.
///
/// Records are kept as `serde_json::Value` rather than a closed struct so
/// extra fields submitted by clients survive the round trip unchanged.
/// One store instance is built at startup and handed to the router, so each
/// test server gets isolated state. Cloning yields a handle to the same map.
#[derive(Clone)]
pub struct PokemonStore {
    inner: Arc<RwLock<HashMap<String, Value>>>,
}

impl Default for PokemonStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PokemonStore {
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// List all records, order unspecified.
    pub async fn list(&self) -> Vec<Value> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    pub async fn get(&self, id: &str) -> Option<Value> {
        let map = self.inner.read().await;
        map.get(id).cloned()
    }

    /// Validate, assign a fresh id and insert. No mutation on validation failure.
    pub async fn create(&self, mut payload: Value) -> Result<Value, ServiceError> {
        validate_payload(&payload)?;
        let id = Uuid::new_v4().to_string();
        payload["id"] = Value::String(id.clone());
        let mut map = self.inner.write().await;
        map.insert(id.clone(), payload.clone());
        debug!(%id, "pokemon created");
        Ok(payload)
    }

    /// Validate and replace the record wholesale. The stored `id` is forced to
    /// the addressed one, so a stray `id` in the body cannot re-key the record.
    pub async fn replace(&self, id: &str, mut payload: Value) -> Result<Value, ServiceError> {
        validate_payload(&payload)?;
        let mut map = self.inner.write().await;
        if !map.contains_key(id) {
            return Err(ServiceError::not_found(id));
        }
        payload["id"] = Value::String(id.to_string());
        map.insert(id.to_string(), payload.clone());
        debug!(%id, "pokemon replaced");
        Ok(payload)
    }

    /// Remove the record. Returns whether it existed.
    pub async fn remove(&self, id: &str) -> bool {
        let mut map = self.inner.write().await;
        let existed = map.remove(id).is_some();
        if existed {
            debug!(%id, "pokemon removed");
        }
        existed
    }
}
