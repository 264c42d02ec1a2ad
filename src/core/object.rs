//! Purpose: Normalize raw entries into a keyed object with coalesced repeats.
//! Exports: `FieldValue`, `ParsedObject`.
//! Role: The single shape schema validation runs against, however entries were sourced.
//! Invariants: Repeated keys coalesce into ordered sequences, never overwrite.
//! Invariants: Output is a pure function of the input entry order.

use crate::core::entries::RawEntries;
use serde_json::{Map, Value};

/// A field holds one value until its key repeats, then an ordered sequence.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldValue {
    Single(String),
    Many(Vec<String>),
}

impl FieldValue {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            FieldValue::Single(value) => Some(value),
            FieldValue::Many(_) => None,
        }
    }

    pub fn as_many(&self) -> Option<&[String]> {
        match self {
            FieldValue::Single(_) => None,
            FieldValue::Many(values) => Some(values),
        }
    }

    pub fn count(&self) -> usize {
        match self {
            FieldValue::Single(_) => 1,
            FieldValue::Many(values) => values.len(),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            FieldValue::Single(first) => {
                let first = std::mem::take(first);
                *self = FieldValue::Many(vec![first, value]);
            }
            FieldValue::Many(values) => values.push(value),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Single(value) => Value::String(value.clone()),
            FieldValue::Many(values) => Value::Array(
                values.iter().map(|value| Value::String(value.clone())).collect(),
            ),
        }
    }
}

/// Insertion-ordered mapping from field name to [`FieldValue`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParsedObject {
    fields: Vec<(String, FieldValue)>,
}

impl ParsedObject {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn from_entries(entries: &RawEntries) -> Self {
        let mut object = Self::new();
        for (key, value) in entries.iter() {
            object.insert(key, value);
        }
        object
    }

    /// Coalescing insert: an unseen key stores a scalar, a key seen once
    /// becomes a two-element sequence, further repeats append.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == key) {
            Some((_, existing)) => existing.push(value),
            None => self.fields.push((key, FieldValue::Single(value))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (name, value) in &self.fields {
            map.insert(name.clone(), value.to_json());
        }
        Value::Object(map)
    }
}
