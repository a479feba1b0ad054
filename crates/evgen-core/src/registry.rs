//! The per-run catalog of analysed events.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::fields::FieldMapping;
use crate::types::InterfaceName;

/// One analysed interface and its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDescriptor {
    pub name: InterfaceName,
    pub fields: FieldMapping,
}

/// All events of one run, ordered by qualified name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventCatalog {
    events: Vec<EventDescriptor>,
}

impl EventCatalog {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EventDescriptor> {
        self.events.iter()
    }

    /// Looks up an event by qualified name.
    pub fn get(&self, name: &str) -> Option<&EventDescriptor> {
        self.events
            .binary_search_by(|event| event.name.as_str().cmp(name))
            .ok()
            .map(|index| &self.events[index])
    }
}

impl<'a> IntoIterator for &'a EventCatalog {
    type Item = &'a EventDescriptor;
    type IntoIter = std::slice::Iter<'a, EventDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl IntoIterator for EventCatalog {
    type Item = EventDescriptor;
    type IntoIter = std::vec::IntoIter<EventDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

/// Collects inferred field mappings for one run.
///
/// Recording an interface a second time replaces its earlier mapping.
#[derive(Debug, Default)]
pub struct EventRegistry {
    events: BTreeMap<InterfaceName, FieldMapping>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Records `fields` for `name`, returning the mapping it replaced.
    pub fn record(&mut self, name: InterfaceName, fields: FieldMapping) -> Option<FieldMapping> {
        if self.events.contains_key(&name) {
            tracing::debug!(interface = %name, "replacing previously recorded event");
        }
        self.events.insert(name, fields)
    }

    /// Returns the catalog in qualified-name order.
    pub fn snapshot(&self) -> EventCatalog {
        let events = self
            .events
            .iter()
            .map(|(name, fields)| EventDescriptor {
                name: name.clone(),
                fields: fields.clone(),
            })
            .collect();
        EventCatalog { events }
    }

    /// Consumes the registry, ending the run.
    pub fn into_catalog(self) -> EventCatalog {
        let events = self
            .events
            .into_iter()
            .map(|(name, fields)| EventDescriptor { name, fields })
            .collect();
        EventCatalog { events }
    }
}

/// An [`EventRegistry`] that serializes concurrent `record` calls.
#[derive(Debug, Default)]
pub struct SharedRegistry {
    inner: Mutex<EventRegistry>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: InterfaceName, fields: FieldMapping) -> Option<FieldMapping> {
        self.inner.lock().record(name, fields)
    }

    pub fn snapshot(&self) -> EventCatalog {
        self.inner.lock().snapshot()
    }

    pub fn into_inner(self) -> EventRegistry {
        self.inner.into_inner()
    }
}

impl From<EventRegistry> for SharedRegistry {
    fn from(registry: EventRegistry) -> Self {
        Self {
            inner: Mutex::new(registry),
        }
    }
}
