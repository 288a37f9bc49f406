use crate::error::StoreError;
use crate::kv::KeyValueStore;
use crate::{SHEET_KEY, WEBHOOK_KEY};

/// Integration endpoints configured from the admin console.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrationEndpoints {
    pub sheet_link: Option<String>,
    pub webhook_url: Option<String>,
}

impl IntegrationEndpoints {
    /// Reads both endpoints. Blank stored values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self, StoreError> {
        let read = |key: &str| -> Result<Option<String>, StoreError> {
            Ok(store.get(key)?.filter(|v| !v.trim().is_empty()))
        };
        Ok(Self {
            sheet_link: read(SHEET_KEY)?,
            webhook_url: read(WEBHOOK_KEY)?,
        })
    }

    /// Writes both endpoints. `None` or blank values clear their key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be written.
    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StoreError> {
        let sheet = write_endpoint(store, SHEET_KEY, self.sheet_link.as_deref())?;
        let webhook = write_endpoint(store, WEBHOOK_KEY, self.webhook_url.as_deref())?;
        tracing::info!(sheet, webhook, "integration endpoints saved");
        Ok(())
    }
}

/// Stores the trimmed value or clears the key. Returns whether a value was stored.
fn write_endpoint(
    store: &dyn KeyValueStore,
    key: &str,
    value: Option<&str>,
) -> Result<bool, StoreError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => {
            store.set(key, v)?;
            Ok(true)
        }
        None => {
            store.clear(key)?;
            Ok(false)
        }
    }
}
