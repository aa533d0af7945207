//! # Input Schemas
//!
//! Declarative field constraints for every calculator. Each calculator's
//! domain rules are data - a list of [`FieldSpec`]s with a tagged
//! [`FieldKind`] - checked by one generic validator, so there are no
//! per-calculator imperative checks scattered through the transforms.
//!
//! A schema serves double duty: it rejects out-of-domain input before a
//! transform runs, and it drives form rendering (field order, labels,
//! units, defaults, option lists).
//!
//! ## Example
//!
//! ```rust
//! use volt_core::schema::{FieldSpec, InputSchema};
//!
//! let schema = InputSchema::new(vec![
//!     FieldSpec::number("load_kw", "Connected load", "kW", 100.0).positive(),
//!     FieldSpec::number("power_factor", "Power factor", "", 0.8)
//!         .positive()
//!         .max(1.0),
//!     FieldSpec::choice("material", "Conductor material", &["copper", "aluminum"], "copper"),
//! ]);
//!
//! let record = schema.defaults();
//! assert!(schema.validate(&record).is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::FieldIssue;
use crate::value::{InputRecord, Value};

/// The legal domain of one field, as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum FieldKind {
    /// Numeric entry with optional inclusive bounds.
    ///
    /// `strict_min` marks quantities that must be strictly greater than
    /// the minimum (current, voltage, length - where zero is physically
    /// meaningless).
    Number {
        min: Option<f64>,
        max: Option<f64>,
        strict_min: bool,
        default: f64,
    },
    /// Selection from a finite set of options.
    Choice {
        options: Vec<String>,
        default: String,
    },
    /// Free text (labels, tags). No constraints.
    Text { default: String },
}

/// One named field in a calculator's input schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Stable field name used as the record key (e.g., "transformer_kva")
    pub name: String,
    /// Display label (e.g., "Transformer rating")
    pub label: String,
    /// Display unit, empty when dimensionless (e.g., "kVA", "%")
    pub unit: String,
    /// Domain constraints
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Numeric field with a minimum of zero (inclusive) and no maximum
    pub fn number(name: &str, label: &str, unit: &str, default: f64) -> Self {
        FieldSpec {
            name: name.to_string(),
            label: label.to_string(),
            unit: unit.to_string(),
            kind: FieldKind::Number {
                min: Some(0.0),
                max: None,
                strict_min: false,
                default,
            },
        }
    }

    /// Choice field over a fixed option set
    pub fn choice(name: &str, label: &str, options: &[&str], default: &str) -> Self {
        debug_assert!(options.contains(&default));
        FieldSpec {
            name: name.to_string(),
            label: label.to_string(),
            unit: String::new(),
            kind: FieldKind::Choice {
                options: options.iter().map(|s| s.to_string()).collect(),
                default: default.to_string(),
            },
        }
    }

    /// Free-text field
    pub fn text(name: &str, label: &str, default: &str) -> Self {
        FieldSpec {
            name: name.to_string(),
            label: label.to_string(),
            unit: String::new(),
            kind: FieldKind::Text {
                default: default.to_string(),
            },
        }
    }

    /// Require the value to be strictly greater than the minimum
    pub fn positive(mut self) -> Self {
        if let FieldKind::Number { strict_min, .. } = &mut self.kind {
            *strict_min = true;
        }
        self
    }

    /// Set the inclusive minimum
    pub fn min(mut self, value: f64) -> Self {
        if let FieldKind::Number { min, .. } = &mut self.kind {
            *min = Some(value);
        }
        self
    }

    /// Set the inclusive maximum
    pub fn max(mut self, value: f64) -> Self {
        if let FieldKind::Number { max, .. } = &mut self.kind {
            *max = Some(value);
        }
        self
    }

    /// The default value for this field
    pub fn default_value(&self) -> Value {
        match &self.kind {
            FieldKind::Number { default, .. } => Value::Number(*default),
            FieldKind::Choice { default, .. } => Value::text(default.clone()),
            FieldKind::Text { default } => Value::text(default.clone()),
        }
    }

    /// Check one value against this field's constraints
    pub fn check(&self, value: &Value) -> Option<FieldIssue> {
        match (&self.kind, value) {
            (
                FieldKind::Number {
                    min,
                    max,
                    strict_min,
                    ..
                },
                Value::Number(n),
            ) => {
                if !n.is_finite() {
                    return Some(self.issue(value, "Enter a number"));
                }
                if let Some(lo) = min {
                    if *strict_min && *n <= *lo {
                        return Some(
                            self.issue(value, format!("Must be greater than {}", lo)),
                        );
                    }
                    if !*strict_min && *n < *lo {
                        return Some(self.issue(value, format!("Must be at least {}", lo)));
                    }
                }
                if let Some(hi) = max {
                    if *n > *hi {
                        return Some(self.issue(value, format!("Must be at most {}", hi)));
                    }
                }
                None
            }
            (FieldKind::Number { .. }, Value::Text(_)) => {
                Some(self.issue(value, "Enter a number"))
            }
            (FieldKind::Choice { options, .. }, Value::Text(s)) => {
                if options.iter().any(|o| o == s) {
                    None
                } else {
                    Some(self.issue(value, format!("Choose one of: {}", options.join(", "))))
                }
            }
            (FieldKind::Choice { options, .. }, Value::Number(_)) => {
                Some(self.issue(value, format!("Choose one of: {}", options.join(", "))))
            }
            (FieldKind::Text { .. }, _) => None,
        }
    }

    /// Parse raw form text into a typed value.
    ///
    /// Empty or non-numeric text for a numeric field is invalid input,
    /// never coerced to zero.
    pub fn parse_raw(&self, raw: &str) -> Result<Value, FieldIssue> {
        let trimmed = raw.trim();
        match &self.kind {
            FieldKind::Number { .. } => {
                if trimmed.is_empty() {
                    return Err(FieldIssue::new(&self.name, raw, "Enter a value"));
                }
                let parsed: f64 = trimmed
                    .parse()
                    .map_err(|_| FieldIssue::new(&self.name, raw, "Enter a number"))?;
                let value = Value::Number(parsed);
                match self.check(&value) {
                    Some(issue) => Err(issue),
                    None => Ok(value),
                }
            }
            FieldKind::Choice { .. } | FieldKind::Text { .. } => {
                let value = Value::text(trimmed);
                match self.check(&value) {
                    Some(issue) => Err(issue),
                    None => Ok(value),
                }
            }
        }
    }

    fn issue(&self, value: &Value, message: impl Into<String>) -> FieldIssue {
        FieldIssue::new(&self.name, value.display(), message)
    }
}

/// Ordered set of fields for one calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    pub fields: Vec<FieldSpec>,
}

impl InputSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        InputSchema { fields }
    }

    /// Look up a field spec by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Build a record populated with every field's default
    pub fn defaults(&self) -> InputRecord {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.default_value()))
            .collect()
    }

    /// Validate a whole record against this schema.
    ///
    /// Collects every problem rather than stopping at the first, so a form
    /// can mark all offending fields in one pass. Fields not declared in
    /// the schema are rejected.
    pub fn validate(&self, record: &InputRecord) -> Result<(), Vec<FieldIssue>> {
        let mut issues = Vec::new();

        for spec in &self.fields {
            match record.get(&spec.name) {
                Some(value) => {
                    if let Some(issue) = spec.check(value) {
                        issues.push(issue);
                    }
                }
                None => issues.push(FieldIssue::new(&spec.name, "", "Required")),
            }
        }

        for name in record.keys() {
            if self.field(name).is_none() {
                issues.push(FieldIssue::new(
                    name,
                    record[name].display(),
                    "Unknown field",
                ));
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}
