//! Decoded platform envelopes, as handed over by the upstream stream consumer.
//!
//! Payload getters follow protobuf semantics: an absent payload reads as its
//! zero value, so builders never have to special-case a missing body.
use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum EventType {
    HttpStart,
    HttpStop,
    HttpStartStop,
    LogMessage,
    ValueMetric,
    CounterEvent,
    Error,
    ContainerMetric,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::HttpStart => "HttpStart",
            EventType::HttpStop => "HttpStop",
            EventType::HttpStartStop => "HttpStartStop",
            EventType::LogMessage => "LogMessage",
            EventType::ValueMetric => "ValueMetric",
            EventType::CounterEvent => "CounterEvent",
            EventType::Error => "Error",
            EventType::ContainerMetric => "ContainerMetric",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum PeerType {
    #[default]
    Client,
    Server,
}

impl PeerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeerType::Client => "Client",
            PeerType::Server => "Server",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum MessageType {
    #[default]
    #[serde(rename = "OUT")]
    Out,
    #[serde(rename = "ERR")]
    Err,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Out => "OUT",
            MessageType::Err => "ERR",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HttpStartStop {
    pub start_timestamp: i64,
    pub stop_timestamp: i64,
    pub request_id: String,
    pub peer_type: PeerType,
    pub method: String,
    pub uri: String,
    pub remote_address: String,
    pub user_agent: String,
    pub status_code: i32,
    pub content_length: i64,
    pub application_id: String,
    pub instance_index: i32,
    pub instance_id: String,
    pub forwarded: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogMessage {
    pub message: String,
    pub message_type: MessageType,
    pub timestamp: i64,
    pub app_id: String,
    pub source_type: String,
    pub source_instance: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ValueMetric {
    pub name: String,
    pub value: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CounterEvent {
    pub name: String,
    pub delta: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorPayload {
    pub source: String,
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContainerMetric {
    pub application_id: String,
    pub instance_index: i32,
    pub cpu_percentage: f64,
    pub memory_bytes: u64,
    pub disk_bytes: u64,
    pub memory_bytes_quota: u64,
    pub disk_bytes_quota: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub event_type: EventType,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub deployment: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub index: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,

    #[serde(default)]
    pub http_start_stop: Option<HttpStartStop>,
    #[serde(default)]
    pub log_message: Option<LogMessage>,
    #[serde(default)]
    pub value_metric: Option<ValueMetric>,
    #[serde(default)]
    pub counter_event: Option<CounterEvent>,
    #[serde(default)]
    pub error: Option<ErrorPayload>,
    #[serde(default)]
    pub container_metric: Option<ContainerMetric>,
}

impl Envelope {
    /// An envelope with only the type tag set, for callers that fill in the rest.
    pub fn new(event_type: EventType) -> Self {
        Envelope {
            event_type,
            origin: String::new(),
            timestamp: 0,
            deployment: String::new(),
            job: String::new(),
            index: String::new(),
            ip: String::new(),
            tags: BTreeMap::new(),
            http_start_stop: None,
            log_message: None,
            value_metric: None,
            counter_event: None,
            error: None,
            container_metric: None,
        }
    }

    pub fn http_start_stop(&self) -> HttpStartStop {
        self.http_start_stop.clone().unwrap_or_default()
    }

    pub fn log_message(&self) -> LogMessage {
        self.log_message.clone().unwrap_or_default()
    }

    pub fn value_metric(&self) -> ValueMetric {
        self.value_metric.clone().unwrap_or_default()
    }

    pub fn counter_event(&self) -> CounterEvent {
        self.counter_event.clone().unwrap_or_default()
    }

    pub fn error(&self) -> ErrorPayload {
        self.error.clone().unwrap_or_default()
    }

    pub fn container_metric(&self) -> ContainerMetric {
        self.container_metric.clone().unwrap_or_default()
    }
}
