//! Narrow view of the host runtime the validator depends on.
//!
//! The host owns the content type and the entry values. The validator only
//! needs to read both and be told when a value changes, so the host is split
//! into [`SchemaProvider`] and [`ValueProvider`]. [`MemoryEntry`] implements
//! both in memory and stands in for the host in the CLI and in tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::Value;

use crate::schema::ContentType;

/// Callback invoked with the id of the field whose value changed.
pub type ChangeListener = Rc<dyn Fn(&str)>;

/// Read access to the active content type.
pub trait SchemaProvider {
    fn content_type(&self) -> &ContentType;
}

/// Read access to entry values plus change subscription.
pub trait ValueProvider {
    /// Current value of `field_id`, `None` when the entry has no such field.
    ///
    /// A field that exists but has no value reads as `Some(Value::Null)`.
    fn value(&self, field_id: &str) -> Option<Value>;

    /// Ids of every field on the entry.
    fn field_ids(&self) -> Vec<String>;

    /// Register `listener` to run whenever the value of `field_id` changes.
    fn on_value_changed(&self, field_id: &str, listener: ChangeListener);
}

/// In-memory host holding one content type and one entry.
pub struct MemoryEntry {
    content_type: ContentType,
    values: RefCell<BTreeMap<String, Value>>,
    listeners: RefCell<Vec<(String, ChangeListener)>>,
}

impl MemoryEntry {
    /// Create an entry with every field of `content_type` unset.
    pub fn new(content_type: ContentType) -> Self {
        let values = content_type
            .fields
            .iter()
            .map(|field| (field.id.clone(), Value::Null))
            .collect();

        Self {
            content_type,
            values: RefCell::new(values),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Create an entry and seed values for known fields.
    ///
    /// Values for ids the content type does not declare are dropped.
    pub fn with_values(
        content_type: ContentType,
        values: impl IntoIterator<Item = (String, Value)>,
    ) -> Self {
        let entry = Self::new(content_type);
        {
            let mut current = entry.values.borrow_mut();
            for (field_id, value) in values {
                match current.get_mut(&field_id) {
                    Some(slot) => *slot = value,
                    None => {
                        tracing::warn!(event = "unknown_field_value", field = %field_id);
                    }
                }
            }
        }
        entry
    }

    /// Replace the value of `field_id` and notify its listeners.
    ///
    /// Returns false without notifying when the entry has no such field.
    pub fn set_value(&self, field_id: &str, value: Value) -> bool {
        {
            let mut values = self.values.borrow_mut();
            match values.get_mut(field_id) {
                Some(slot) => *slot = value,
                None => return false,
            }
        }

        let listeners: Vec<ChangeListener> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(id, _)| id == field_id)
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        tracing::debug!(
            event = "value_changed",
            field = %field_id,
            listeners = listeners.len()
        );
        for listener in listeners {
            listener(field_id);
        }
        true
    }

    /// Number of listeners registered across all fields.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl SchemaProvider for MemoryEntry {
    fn content_type(&self) -> &ContentType {
        &self.content_type
    }
}

impl ValueProvider for MemoryEntry {
    fn value(&self, field_id: &str) -> Option<Value> {
        self.values.borrow().get(field_id).cloned()
    }

    fn field_ids(&self) -> Vec<String> {
        self.content_type
            .fields
            .iter()
            .map(|field| field.id.clone())
            .collect()
    }

    fn on_value_changed(&self, field_id: &str, listener: ChangeListener) {
        self.listeners
            .borrow_mut()
            .push((field_id.to_string(), listener));
    }
}

impl<T: SchemaProvider + ?Sized> SchemaProvider for Rc<T> {
    fn content_type(&self) -> &ContentType {
        (**self).content_type()
    }
}

impl<T: ValueProvider + ?Sized> ValueProvider for Rc<T> {
    fn value(&self, field_id: &str) -> Option<Value> {
        (**self).value(field_id)
    }

    fn field_ids(&self) -> Vec<String> {
        (**self).field_ids()
    }

    fn on_value_changed(&self, field_id: &str, listener: ChangeListener) {
        (**self).on_value_changed(field_id, listener)
    }
}
