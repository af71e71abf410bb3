//! Parsers for the two operator supplied option strings: the selected event
//! types and the extra fields merged into every event.
use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

use crate::envelope::EventType;
use crate::error::ConfigError;

/// Event types an operator may select. The legacy `HttpStart` and `HttpStop`
/// tags are not part of it.
pub const ROUTABLE_EVENTS: &[EventType] = &[
    EventType::HttpStartStop,
    EventType::LogMessage,
    EventType::ValueMetric,
    EventType::CounterEvent,
    EventType::Error,
    EventType::ContainerMetric,
];

const DEFAULT_SELECTED_EVENT: EventType = EventType::LogMessage;

/// The allow-set of event type names. An empty set admits nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedEvents {
    names: HashSet<String>,
}

impl SelectedEvents {
    pub fn accept(&self, type_name: &str) -> bool {
        self.names.contains(type_name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SelectedEvents {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        SelectedEvents {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl FromStr for SelectedEvents {
    type Err = ConfigError;

    /// Parses a comma separated list of event type names. A blank string
    /// selects log messages only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok([DEFAULT_SELECTED_EVENT.as_str()].into_iter().collect());
        }

        let mut names = HashSet::new();
        for name in s.split(',').map(str::trim) {
            if !ROUTABLE_EVENTS.iter().any(|t| t.as_str() == name) {
                return Err(ConfigError::UnauthorizedEvent(name.to_owned()));
            }
            names.insert(name.to_owned());
        }

        Ok(SelectedEvents { names })
    }
}

/// Static key/value pairs merged into every routed event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraFields {
    fields: BTreeMap<String, String>,
}

impl ExtraFields {
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.fields.iter()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ExtraFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ExtraFields {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl FromStr for ExtraFields {
    type Err = ConfigError;

    /// Parses `key:value, key:value`. Spaces are dropped and empty entries skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = BTreeMap::new();

        for pair in s.split(',').filter(|pair| !pair.is_empty()) {
            let cleaned = pair.replace(' ', "");
            let parts: Vec<&str> = cleaned.split(':').collect();
            match parts.as_slice() {
                [key, value] => {
                    fields.insert((*key).to_owned(), (*value).to_owned());
                }
                _ => return Err(ConfigError::MalformedExtraFields(pair.to_owned())),
            }
        }

        Ok(ExtraFields { fields })
    }
}
