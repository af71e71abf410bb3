use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::error::CacheError;

/// Descriptive metadata for an application, owned by the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    pub guid: String,
    pub name: String,
    pub space_guid: String,
    pub space_name: String,
    pub org_guid: String,
    pub org_name: String,
    pub ignored: bool,
}

/// Read-only application metadata lookup. `Ok(None)` is a plain miss.
#[async_trait]
pub trait AppCache {
    async fn get_app(&self, app_id: &str) -> Result<Option<AppMetadata>, CacheError>;
}

/// A cache seeded once and never refreshed.
#[derive(Debug, Clone, Default)]
pub struct StaticCache {
    apps: HashMap<String, AppMetadata>,
}

impl StaticCache {
    pub fn new(apps: impl IntoIterator<Item = AppMetadata>) -> Self {
        StaticCache {
            apps: apps.into_iter().map(|app| (app.guid.clone(), app)).collect(),
        }
    }

    /// Loads a JSON array of application records.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let apps: Vec<AppMetadata> = serde_json::from_str(&raw)?;

        info!(path = %path.display(), count = apps.len(), "loaded application metadata");
        Ok(StaticCache::new(apps))
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

#[async_trait]
impl AppCache for StaticCache {
    async fn get_app(&self, app_id: &str) -> Result<Option<AppMetadata>, CacheError> {
        Ok(self.apps.get(app_id).cloned())
    }
}
