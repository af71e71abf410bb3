#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use eventrouter::cache::{AppCache, AppMetadata};
use eventrouter::error::{CacheError, SinkError};
use eventrouter::event::Fields;
use eventrouter::sinks::EventSink;

#[derive(Debug, Clone, PartialEq)]
pub struct Write {
    pub fields: Fields,
    pub msg: String,
}

/// Records every write. Queued errors are returned by the next writes, in order.
#[derive(Clone, Default)]
pub struct MemorySink {
    writes: Arc<Mutex<Vec<Write>>>,
    failures: Arc<Mutex<VecDeque<SinkError>>>,
}

impl MemorySink {
    pub fn failing(errors: impl IntoIterator<Item = SinkError>) -> Self {
        MemorySink {
            writes: Arc::default(),
            failures: Arc::new(Mutex::new(errors.into_iter().collect())),
        }
    }

    pub fn len(&self) -> usize {
        self.writes.lock().unwrap().len()
    }

    pub fn writes(&self) -> Vec<Write> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventSink for MemorySink {
    async fn write(&self, fields: &Fields, msg: &str) -> Result<(), SinkError> {
        self.writes.lock().unwrap().push(Write {
            fields: fields.clone(),
            msg: msg.to_owned(),
        });

        match self.failures.lock().unwrap().pop_front() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Serves a fixed set of apps and counts lookups.
#[derive(Clone, Default)]
pub struct CountingCache {
    apps: HashMap<String, AppMetadata>,
    lookups: Arc<AtomicUsize>,
    broken: bool,
}

impl CountingCache {
    pub fn with_apps(apps: impl IntoIterator<Item = AppMetadata>) -> Self {
        CountingCache {
            apps: apps.into_iter().map(|app| (app.guid.clone(), app)).collect(),
            ..Default::default()
        }
    }

    pub fn broken() -> Self {
        CountingCache {
            broken: true,
            ..Default::default()
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AppCache for CountingCache {
    async fn get_app(&self, app_id: &str) -> Result<Option<AppMetadata>, CacheError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        if self.broken {
            return Err(CacheError::FetchError("connection refused".to_owned()));
        }
        Ok(self.apps.get(app_id).cloned())
    }
}

pub fn app(guid: &str, name: &str, ignored: bool) -> AppMetadata {
    AppMetadata {
        guid: guid.to_owned(),
        name: name.to_owned(),
        space_guid: format!("{guid}-space"),
        space_name: "production".to_owned(),
        org_guid: format!("{guid}-org"),
        org_name: "acme".to_owned(),
        ignored,
    }
}
