//! # Reactive Form Session
//!
//! The recompute loop behind every calculator form, as an explicit
//! unidirectional reducer: `reduce(state, change) -> new state`. No
//! observer graph, no ambient singleton, no async - every accepted field
//! mutation re-parses the whole form and, when it validates, recomputes
//! the output synchronously before the function returns.
//!
//! The session has two observable states: idle showing the last valid
//! output, and (instantaneously) computing. Invalid input never produces
//! an error panel; the offending fields are flagged and the previous
//! valid output stays on display.
//!
//! ## Example
//!
//! ```rust
//! use volt_core::session::{reduce, FieldChange, SessionState};
//!
//! let state = SessionState::new("fault-current").unwrap();
//! let state = reduce(&state, FieldChange::new("transformer_kva", "2000"));
//! assert!(state.is_valid());
//!
//! // A bad keystroke flags the field and keeps the previous output
//! let state = reduce(&state, FieldChange::new("transformer_kva", "abc"));
//! assert!(!state.is_valid());
//! assert!(state.output.is_some());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::registry::{self, CalculatorDefinition};
use crate::value::{InputRecord, OutputRecord, Value};

/// One user edit: a field name and the raw text as typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: String,
    pub raw: String,
}

impl FieldChange {
    pub fn new(field: impl Into<String>, raw: impl Into<String>) -> Self {
        FieldChange {
            field: field.into(),
            raw: raw.into(),
        }
    }
}

/// Immutable-per-update form state for one calculator session.
///
/// Owned by exactly one form; discarded on navigation. Nothing here is
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Registry slug this session is bound to
    pub slug: String,
    /// Raw text per field, exactly as entered
    pub raw: BTreeMap<String, String>,
    /// Validation message per offending field; empty when the form is clean
    pub issues: BTreeMap<String, String>,
    /// Last valid output. Retained unchanged while input is invalid.
    pub output: Option<OutputRecord>,
}

impl SessionState {
    /// Start a session seeded with the calculator's schema defaults.
    ///
    /// Defaults are always in-domain, so the initial output is computed
    /// immediately.
    pub fn new(slug: &str) -> CalcResult<SessionState> {
        let def =
            registry::lookup(slug).ok_or_else(|| CalcError::unknown_calculator(slug))?;

        let defaults = def.schema.defaults();
        let raw = defaults
            .iter()
            .map(|(name, value)| {
                let text = match value {
                    Value::Number(n) => n.to_string(),
                    Value::Text(s) => s.clone(),
                };
                (name.clone(), text)
            })
            .collect();
        let output = def.evaluate(&defaults)?;

        Ok(SessionState {
            slug: slug.to_string(),
            raw,
            issues: BTreeMap::new(),
            output: Some(output),
        })
    }

    /// The registry definition this session is bound to
    pub fn definition(&self) -> Option<&'static CalculatorDefinition> {
        registry::lookup(&self.slug)
    }

    /// True when every field parses and validates
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Apply one edit, returning the successor state
    pub fn apply(&self, change: FieldChange) -> SessionState {
        reduce(self, change)
    }
}

/// Pure state-update function: apply one field edit and recompute.
///
/// Parsing, validation, and the transform all run before this returns;
/// the output visible in the returned state always corresponds to the
/// most recently validated record. Edits naming an unknown field, or a
/// session bound to an unknown slug, leave the state unchanged.
pub fn reduce(state: &SessionState, change: FieldChange) -> SessionState {
    let mut next = state.clone();

    let def = match registry::lookup(&state.slug) {
        Some(def) => def,
        None => return next,
    };
    if def.schema.field(&change.field).is_none() {
        return next;
    }

    next.raw.insert(change.field, change.raw);

    // Re-parse the whole form from raw text
    let mut record = InputRecord::new();
    let mut issues = BTreeMap::new();
    for spec in &def.schema.fields {
        let raw = next.raw.get(&spec.name).map(String::as_str).unwrap_or("");
        match spec.parse_raw(raw) {
            Ok(value) => {
                record.insert(spec.name.clone(), value);
            }
            Err(issue) => {
                issues.insert(spec.name.clone(), issue.message);
            }
        }
    }
    next.issues = issues;

    // Recompute only from a fully valid record; otherwise the previous
    // valid output stays on display
    if next.issues.is_empty() {
        if let Ok(output) = def.evaluate(&record) {
            next.output = Some(output);
        }
    }

    next
}
