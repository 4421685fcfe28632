//! Renders a drained batch of events into per-event insert rows.

use crate::mapping::MappingSpec;
use model::records::{event::Event, insert::InsertRow};
use serde_json::{Map, Value as JsonValue};
use std::str::FromStr;
use tracing::warn;

/// Supported event body encodings. Anything else is rejected at
/// configuration time, never per event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BodyFormat {
    #[default]
    Json,
}

impl FromStr for BodyFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(BodyFormat::Json),
            _ => Err(()),
        }
    }
}

/// An event whose body could not be decoded. Its body-sourced columns were
/// rendered as NULL; header-sourced columns still resolved.
#[derive(Debug)]
pub struct PayloadDiagnostic {
    pub event_index: usize,
    pub error: serde_json::Error,
}

#[derive(Debug, Default)]
pub struct RenderedBatch {
    pub rows: Vec<InsertRow>,
    pub malformed: Vec<PayloadDiagnostic>,
}

/// Produces one insert row per event, in input order, with column order
/// equal to mapping order. Never fails: an undecodable body yields NULL for
/// every body-sourced column of that event and a diagnostic, and the batch
/// proceeds.
pub fn render_batch(
    table: &str,
    mapping: &MappingSpec,
    events: &[Event],
    format: BodyFormat,
) -> RenderedBatch {
    match format {
        BodyFormat::Json => render_json(table, mapping, events),
    }
}

fn render_json(table: &str, mapping: &MappingSpec, events: &[Event]) -> RenderedBatch {
    let mut batch = RenderedBatch::default();

    for (index, event) in events.iter().enumerate() {
        let body = match serde_json::from_slice::<Map<String, JsonValue>>(event.body()) {
            Ok(map) => Some(map),
            Err(error) => {
                warn!(
                    event = index,
                    %error,
                    "event body is not a JSON object, body fields map to NULL"
                );
                batch.malformed.push(PayloadDiagnostic {
                    event_index: index,
                    error,
                });
                None
            }
        };

        let mut columns = Vec::with_capacity(mapping.len());
        let mut values = Vec::with_capacity(mapping.len());
        for entry in mapping.entries() {
            columns.push(entry.column.clone());
            values.push(entry.selector.evaluate(event, body.as_ref()));
        }
        batch.rows.push(InsertRow::new(table, columns, values));
    }

    batch
}
