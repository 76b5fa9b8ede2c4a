//! Annotation ingestion with per-dataset field names.
//!
//! # The Field-Name Problem
//!
//! Every annotation export names the same fields differently:
//!
//! ```text
//! ┌────────────────┬─────────┬───────────────┬─────────────┐
//! │ Dataset        │ text    │ span fields   │ class field │
//! ├────────────────┼─────────┼───────────────┼─────────────┤
//! │ MITMovie       │ text    │ start / end   │ label       │
//! │ prodigy export │ text    │ start / end   │ label       │
//! │ label-studio   │ data    │ begin / end   │ labels      │
//! │ in-house tools │ content │ from / to     │ tag         │
//! └────────────────┴─────────┴───────────────┴─────────────┘
//! ```
//!
//! Rather than demanding callers reshape their JSON, a [`FieldMap`] names
//! where each field lives and the parser pulls annotations straight out of
//! `serde_json::Value`. Parsed annotations go through the span validator
//! before they are returned, so downstream code only ever sees validated
//! geometry.

use crate::annotation::{Annotation, Span};
use crate::{Error, Result};
use serde_json::Value;

/// Field names for locating annotation data inside raw JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    /// Field holding the raw text.
    pub text: String,
    /// Field holding the span array.
    pub spans: String,
    /// Span field holding the start character offset.
    pub start: String,
    /// Span field holding the end character offset.
    pub end: String,
    /// Span field holding the entity class name.
    pub label: String,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            text: "text".to_string(),
            spans: "spans".to_string(),
            start: "start".to_string(),
            end: "end".to_string(),
            label: "label".to_string(),
        }
    }
}

/// Parse one annotation object out of raw JSON and validate its spans.
///
/// # Errors
///
/// [`Error::Schema`] for missing fields, wrong types, or negative offsets;
/// [`Error::Validation`] for span geometry violations.
pub fn parse_annotation(value: &Value, fields: &FieldMap) -> Result<Annotation> {
    let text = value
        .get(&fields.text)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            Error::schema(format!("annotation is missing string field '{}'", fields.text))
        })?;

    let raw_spans = value
        .get(&fields.spans)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            Error::schema(format!("annotation is missing array field '{}'", fields.spans))
        })?;

    let spans = raw_spans
        .iter()
        .enumerate()
        .map(|(i, raw)| parse_span(raw, i, fields))
        .collect::<Result<Vec<Span>>>()?;

    Annotation::validate(text, spans)
}

/// Parse a batch of annotation objects; fails on the first invalid item.
///
/// # Errors
///
/// Same as [`parse_annotation`], plus [`Error::Schema`] if `value` is not
/// an array.
pub fn parse_batch(value: &Value, fields: &FieldMap) -> Result<Vec<Annotation>> {
    let items = value
        .as_array()
        .ok_or_else(|| Error::schema("batch input must be a JSON array of annotations"))?;

    items
        .iter()
        .map(|item| parse_annotation(item, fields))
        .collect()
}

fn parse_span(raw: &Value, index: usize, fields: &FieldMap) -> Result<Span> {
    let start = span_offset(raw, index, &fields.start)?;
    let end = span_offset(raw, index, &fields.end)?;
    let label = raw
        .get(&fields.label)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            Error::schema(format!("span {index} is missing string field '{}'", fields.label))
        })?;

    Ok(Span::new(start, end, label))
}

fn span_offset(raw: &Value, index: usize, field: &str) -> Result<usize> {
    let value = raw
        .get(field)
        .and_then(Value::as_i64)
        .ok_or_else(|| Error::schema(format!("span {index} is missing integer field '{field}'")))?;

    usize::try_from(value).map_err(|_| {
        Error::schema(format!(
            "span {index} has a negative offset ({field}={value}); character offsets must be >= 0"
        ))
    })
}
