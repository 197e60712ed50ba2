//! Versioned envelope for persisted values.
//!
//! Everything written through [`Cache::save_versioned`] is wrapped as
//! `{ "version": N, "savedAt": "...", "state": ... }`. Values that predate the
//! envelope come back as [`Stored::Legacy`] so the owning crate can migrate them.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{Cache, CacheError, KeyValueStore};

/// Schema version written by this build.
pub const CURRENT_VERSION: u32 = 1;

/// A persisted value plus its schema version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persisted<T> {
    /// Schema version of `state`.
    pub version: u32,
    /// When the value was written.
    pub saved_at: DateTime<Utc>,
    /// The value itself.
    pub state: T,
}

impl<T> Persisted<T> {
    /// Wrap a value at the current version.
    pub fn new(state: T) -> Self {
        Self {
            version: CURRENT_VERSION,
            saved_at: Utc::now(),
            state,
        }
    }
}

/// What was found under a key.
#[derive(Debug, Clone, PartialEq)]
pub enum Stored<T> {
    /// An enveloped value at a version this build understands.
    Current(Persisted<T>),
    /// A bare value written before envelopes existed (version 0).
    Legacy(serde_json::Value),
}

impl<T: DeserializeOwned> Stored<T> {
    /// Classify a raw JSON document.
    pub fn decode(value: serde_json::Value) -> Result<Self, CacheError> {
        let version = match envelope_version(&value) {
            Some(version) => version,
            None => return Ok(Stored::Legacy(value)),
        };

        if version > CURRENT_VERSION {
            return Err(CacheError::UnsupportedVersion {
                found: version,
                supported: CURRENT_VERSION,
            });
        }

        let persisted: Persisted<T> = serde_json::from_value(value)?;
        Ok(Stored::Current(persisted))
    }
}

/// The envelope version, if `value` looks like an envelope at all.
fn envelope_version(value: &serde_json::Value) -> Option<u32> {
    let object = value.as_object()?;
    if !object.contains_key("state") {
        return None;
    }
    object
        .get("version")?
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
}

impl<S: KeyValueStore> Cache<S> {
    /// Write `value` wrapped in a [`Persisted`] envelope.
    pub fn save_versioned<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), CacheError> {
        let persisted = Persisted::new(value);
        self.set(key, &persisted)
    }

    /// Read and classify the value under `key`.
    pub fn load_versioned<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<Stored<T>>, CacheError> {
        match self.get_value(key)? {
            Some(value) => Stored::decode(value).map(Some),
            None => Ok(None),
        }
    }
}
