//! Type specific extractors turning an envelope into a normalized event,
//! dispatched through a registry keyed by event type.
use std::collections::HashMap;

use crate::envelope::{Envelope, EventType};
use crate::error::BuildError;
use crate::event::{Event, Fields, APP_ID_FIELD};

pub type BuildFn = fn(&Envelope) -> Event;

#[derive(Clone)]
pub struct BuilderRegistry {
    builders: HashMap<EventType, BuildFn>,
}

impl BuilderRegistry {
    pub fn empty() -> Self {
        BuilderRegistry {
            builders: HashMap::new(),
        }
    }

    /// Registers `builder` for `event_type`, replacing any previous one.
    pub fn register(&mut self, event_type: EventType, builder: BuildFn) -> &mut Self {
        self.builders.insert(event_type, builder);
        self
    }

    pub fn supports(&self, event_type: EventType) -> bool {
        self.builders.contains_key(&event_type)
    }

    pub fn build(&self, envelope: &Envelope) -> Result<Event, BuildError> {
        let builder = self
            .builders
            .get(&envelope.event_type)
            .ok_or(BuildError::UnsupportedEventType(envelope.event_type))?;

        Ok(builder(envelope))
    }
}

impl Default for BuilderRegistry {
    fn default() -> Self {
        let mut registry = BuilderRegistry::empty();
        registry
            .register(EventType::HttpStartStop, http_start_stop)
            .register(EventType::LogMessage, log_message)
            .register(EventType::ValueMetric, value_metric)
            .register(EventType::CounterEvent, counter_event)
            .register(EventType::Error, error_event)
            .register(EventType::ContainerMetric, container_metric);
        registry
    }
}

// An empty app id is never written so that the key alone signals a lookup.
fn insert_app_id(event: &mut Event, app_id: String) {
    if !app_id.is_empty() {
        event.insert(APP_ID_FIELD, app_id);
    }
}

pub fn http_start_stop(envelope: &Envelope) -> Event {
    let http = envelope.http_start_stop();

    let mut event = Event::new(EventType::HttpStartStop, Fields::new(), "");
    event.insert("start_timestamp", http.start_timestamp);
    event.insert("stop_timestamp", http.stop_timestamp);
    event.insert("request_id", http.request_id);
    event.insert("peer_type", http.peer_type.as_str());
    event.insert("method", http.method);
    event.insert("uri", http.uri);
    event.insert("remote_addr", http.remote_address);
    event.insert("user_agent", http.user_agent);
    event.insert("status_code", http.status_code);
    event.insert("content_length", http.content_length);
    event.insert("instance_index", http.instance_index);
    event.insert("instance_id", http.instance_id);
    event.insert("forwarded", http.forwarded.join(","));
    insert_app_id(&mut event, http.application_id);
    event
}

pub fn log_message(envelope: &Envelope) -> Event {
    let log = envelope.log_message();

    let mut event = Event::new(EventType::LogMessage, Fields::new(), log.message);
    event.insert("timestamp", log.timestamp);
    event.insert("source_type", log.source_type);
    event.insert("message_type", log.message_type.as_str());
    event.insert("source_instance", log.source_instance);
    insert_app_id(&mut event, log.app_id);
    event
}

pub fn value_metric(envelope: &Envelope) -> Event {
    let metric = envelope.value_metric();

    let mut event = Event::new(EventType::ValueMetric, Fields::new(), "");
    event.insert("name", metric.name);
    event.insert("unit", metric.unit);
    event.insert("value", metric.value);
    event
}

pub fn counter_event(envelope: &Envelope) -> Event {
    let counter = envelope.counter_event();

    let mut event = Event::new(EventType::CounterEvent, Fields::new(), "");
    event.insert("name", counter.name);
    event.insert("delta", counter.delta);
    event.insert("total", counter.total);
    event
}

pub fn error_event(envelope: &Envelope) -> Event {
    let error = envelope.error();

    let mut event = Event::new(EventType::Error, Fields::new(), error.message);
    event.insert("source", error.source);
    event.insert("code", error.code);
    event
}

pub fn container_metric(envelope: &Envelope) -> Event {
    let metric = envelope.container_metric();

    let mut event = Event::new(EventType::ContainerMetric, Fields::new(), "");
    event.insert("instance_index", metric.instance_index);
    event.insert("cpu_percentage", metric.cpu_percentage);
    event.insert("memory_bytes", metric.memory_bytes);
    event.insert("disk_bytes", metric.disk_bytes);
    event.insert("memory_bytes_quota", metric.memory_bytes_quota);
    event.insert("disk_bytes_quota", metric.disk_bytes_quota);
    insert_app_id(&mut event, metric.application_id);
    event
}
