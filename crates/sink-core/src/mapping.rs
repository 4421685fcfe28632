//! The field-mapping specification: `col1:header.h1,col2:body.b1,...`.
//!
//! Parsed once at configuration time; evaluation is a pure function of one
//! event.

use model::{core::value::Value, records::event::Event};
use serde_json::{Map, Value as JsonValue};

const HEADER_PREFIX: &str = "header.";
const BODY_PREFIX: &str = "body.";

/// Where a mapped column reads its value from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// A key in the event's header map.
    Header(String),
    /// A top-level key in the event's JSON body. No nested-path traversal.
    Body(String),
    /// A reference with an unrecognized prefix; always evaluates to NULL.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub column: String,
    pub selector: Selector,
}

/// Ordered column/selector pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingSpec {
    entries: Vec<MappingEntry>,
}

/// A mapping entry that could not be parsed and was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingDiagnostic {
    pub entry: String,
    pub reason: String,
}

impl MappingSpec {
    /// Splits `mapping` on `,` into entries and each entry on `:` into a
    /// (column, reference) pair.
    ///
    /// Malformed entries are collected as diagnostics and skipped rather
    /// than failing the whole mapping; valid entries keep their input order.
    pub fn parse(mapping: &str) -> (Self, Vec<MappingDiagnostic>) {
        let mut entries = Vec::new();
        let mut diagnostics = Vec::new();

        for raw in mapping.split(',') {
            let parts: Vec<&str> = raw.split(':').collect();
            if parts.len() != 2 {
                diagnostics.push(MappingDiagnostic {
                    entry: raw.to_string(),
                    reason: format!("expected 2 tokens separated by ':', found {}", parts.len()),
                });
                continue;
            }

            let (column, reference) = (parts[0], parts[1]);
            if column.is_empty() {
                diagnostics.push(MappingDiagnostic {
                    entry: raw.to_string(),
                    reason: "empty column name".to_string(),
                });
                continue;
            }

            let selector = if let Some(key) = reference.strip_prefix(HEADER_PREFIX) {
                Selector::Header(key.to_string())
            } else if let Some(key) = reference.strip_prefix(BODY_PREFIX) {
                Selector::Body(key.to_string())
            } else {
                Selector::Unknown
            };

            entries.push(MappingEntry {
                column: column.to_string(),
                selector,
            });
        }

        (Self { entries }, diagnostics)
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Selector {
    /// Resolves this selector against one event.
    ///
    /// Absent headers, absent body keys, an absent (undecodable) body, and
    /// unknown references all evaluate to NULL.
    pub fn evaluate(&self, event: &Event, body: Option<&Map<String, JsonValue>>) -> Value {
        match self {
            Selector::Header(key) => match event.header(key) {
                Some(v) => Value::String(v.to_string()),
                None => Value::Null,
            },
            Selector::Body(key) => body
                .and_then(|map| map.get(key))
                .map(|v| Value::from_json(v.clone()))
                .unwrap_or(Value::Null),
            Selector::Unknown => Value::Null,
        }
    }
}
