use std::collections::HashMap;

use serde::Serialize;

use crate::cache::AppMetadata;
use crate::envelope::{Envelope, EventType};
use crate::selection::ExtraFields;

pub const APP_ID_FIELD: &str = "cf_app_id";
pub const IGNORED_APP_FIELD: &str = "cf_ignored_app";

const ORIGIN: &str = "firehose";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_owned())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::UInt(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

pub type Fields = HashMap<String, FieldValue>;

/// Outcome of a typed field read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLookup<T> {
    Missing,
    Mismatch,
    Found(T),
}

/// A normalized event: the fields sent to the sink and a human readable message.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    pub fields: Fields,
    pub msg: String,
}

impl Event {
    pub fn new(event_type: EventType, fields: Fields, msg: impl Into<String>) -> Self {
        Event {
            event_type,
            fields,
            msg: msg.into(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn get_str(&self, key: &str) -> FieldLookup<&str> {
        match self.fields.get(key) {
            None => FieldLookup::Missing,
            Some(value) => value.as_str().map_or(FieldLookup::Mismatch, FieldLookup::Found),
        }
    }

    pub fn get_bool(&self, key: &str) -> FieldLookup<bool> {
        match self.fields.get(key) {
            None => FieldLookup::Missing,
            Some(value) => value.as_bool().map_or(FieldLookup::Mismatch, FieldLookup::Found),
        }
    }

    /// Copies the envelope level metadata, shared by every event type.
    pub fn annotate_with_envelope_data(&mut self, envelope: &Envelope) {
        self.insert("origin", envelope.origin.as_str());
        self.insert("deployment", envelope.deployment.as_str());
        self.insert("ip", envelope.ip.as_str());
        self.insert("job", envelope.job.as_str());
        self.insert("job_index", envelope.index.as_str());
        self.insert("envelope_timestamp", envelope.timestamp);
        self.insert("event_type", envelope.event_type.as_str());

        for (name, value) in &envelope.tags {
            self.insert(format!("tag_{name}"), value.as_str());
        }
    }

    /// Merges the operator configured fields, overwriting on collision.
    pub fn annotate_with_meta_data(&mut self, extra_fields: &ExtraFields) {
        self.insert("cf_origin", ORIGIN);

        for (key, value) in extra_fields.iter() {
            self.insert(key.as_str(), value.as_str());
        }
    }

    pub fn annotate_with_app_data(&mut self, app: &AppMetadata) {
        let descriptive = [
            ("cf_app_name", &app.name),
            ("cf_space_id", &app.space_guid),
            ("cf_space_name", &app.space_name),
            ("cf_org_id", &app.org_guid),
            ("cf_org_name", &app.org_name),
        ];

        for (key, value) in descriptive {
            if !value.is_empty() {
                self.insert(key, value.as_str());
            }
        }

        if app.ignored {
            self.insert(IGNORED_APP_FIELD, true);
        }
    }

    pub fn is_ignored(&self) -> bool {
        match self.get_bool(IGNORED_APP_FIELD) {
            FieldLookup::Found(ignored) => ignored,
            FieldLookup::Mismatch => {
                tracing::debug!(
                    field = IGNORED_APP_FIELD,
                    "ignore flag is not a boolean, keeping event"
                );
                false
            }
            FieldLookup::Missing => false,
        }
    }
}
