//! # Input and Output Records
//!
//! The dynamic value types that flow through every calculator: an
//! [`InputRecord`] maps field names to entered values, an [`OutputRecord`]
//! is the ordered list of computed results. Both are plain data with clean
//! JSON serialization, and neither holds any hidden state - evaluating the
//! same record twice yields bit-identical output.
//!
//! ## Example
//!
//! ```rust
//! use volt_core::value::{InputRecord, Value};
//!
//! let mut record = InputRecord::new();
//! record.insert("transformer_kva".to_string(), Value::Number(1500.0));
//! record.insert("conductor_material".to_string(), Value::text("copper"));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// A single field value: a finite number or a piece of text.
///
/// Choice (enum) fields store their selected option as `Text`; schema
/// validation enforces membership in the declared option set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// Convenience constructor for text values
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Get the numeric value, if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    /// Get the text value, if this is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Number(_) => None,
            Value::Text(s) => Some(s.as_str()),
        }
    }

    /// Render the value the way it was entered (for error messages)
    pub fn display(&self) -> String {
        match self {
            Value::Number(n) => n.to_string(),
            Value::Text(s) => s.clone(),
        }
    }
}

/// Current values for one calculator form, keyed by field name.
///
/// Created from schema defaults when a session starts, mutated
/// field-by-field, and discarded with the session. A `BTreeMap` keeps
/// iteration order deterministic.
pub type InputRecord = BTreeMap<String, Value>;

/// Read-only view over a validated [`InputRecord`].
///
/// Transforms receive one of these instead of the raw map so field access
/// propagates a structured error rather than panicking. The validator
/// guarantees every declared field is present and in-domain before a
/// transform ever sees the record.
#[derive(Debug, Clone, Copy)]
pub struct Inputs<'a> {
    record: &'a InputRecord,
}

impl<'a> Inputs<'a> {
    /// Wrap a validated record
    pub fn new(record: &'a InputRecord) -> Self {
        Inputs { record }
    }

    /// Get a numeric field
    pub fn num(&self, name: &str) -> CalcResult<f64> {
        match self.record.get(name) {
            Some(Value::Number(n)) => Ok(*n),
            Some(other) => Err(CalcError::invalid_input(
                name,
                other.display(),
                "Expected a number",
            )),
            None => Err(CalcError::missing_field(name)),
        }
    }

    /// Get a choice or text field
    pub fn choice(&self, name: &str) -> CalcResult<&'a str> {
        match self.record.get(name) {
            Some(Value::Text(s)) => Ok(s.as_str()),
            Some(other) => Err(CalcError::invalid_input(
                name,
                other.display(),
                "Expected a selection",
            )),
            None => Err(CalcError::missing_field(name)),
        }
    }
}

/// One computed result: a number with a unit, or a classification label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum OutputValue {
    /// Numeric result (e.g., fault current in amperes)
    Number { value: f64, unit: String },
    /// Derived classification (e.g., "PPE Category 2")
    Label { text: String },
}

/// A named entry in an [`OutputRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputField {
    /// Stable key for programmatic access (e.g., "fault_current")
    pub key: String,
    /// Display name (e.g., "Fault current")
    pub name: String,
    /// The computed value
    pub value: OutputValue,
}

/// Ordered set of results from one transform invocation.
///
/// Superseded wholesale on every recomputation; never cached, never
/// mutated in place by consumers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputRecord {
    pub fields: Vec<OutputField>,
}

impl OutputRecord {
    pub fn new() -> Self {
        OutputRecord { fields: Vec::new() }
    }

    /// Append a numeric result (builder style)
    pub fn number(
        mut self,
        key: &str,
        name: &str,
        value: f64,
        unit: &str,
    ) -> Self {
        self.fields.push(OutputField {
            key: key.to_string(),
            name: name.to_string(),
            value: OutputValue::Number {
                value,
                unit: unit.to_string(),
            },
        });
        self
    }

    /// Append a classification label (builder style)
    pub fn label(mut self, key: &str, name: &str, text: impl Into<String>) -> Self {
        self.fields.push(OutputField {
            key: key.to_string(),
            name: name.to_string(),
            value: OutputValue::Label { text: text.into() },
        });
        self
    }

    /// Look up a field by key
    pub fn get(&self, key: &str) -> Option<&OutputField> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Numeric value of a field, if present and numeric
    pub fn number_value(&self, key: &str) -> Option<f64> {
        match self.get(key)?.value {
            OutputValue::Number { value, .. } => Some(value),
            OutputValue::Label { .. } => None,
        }
    }

    /// Label text of a field, if present and a label
    pub fn label_text(&self, key: &str) -> Option<&str> {
        match &self.get(key)?.value {
            OutputValue::Label { text } => Some(text.as_str()),
            OutputValue::Number { .. } => None,
        }
    }

    /// Reject records containing NaN or infinity.
    ///
    /// Arithmetic edge cases are prevented upstream by input constraints;
    /// if one slips through it becomes a structured error here instead of
    /// an `Infinity` on screen.
    pub fn ensure_finite(&self) -> CalcResult<()> {
        for field in &self.fields {
            if let OutputValue::Number { value, .. } = field.value {
                if !value.is_finite() {
                    return Err(CalcError::non_finite(&field.key));
                }
            }
        }
        Ok(())
    }
}
