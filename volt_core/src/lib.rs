//! # volt_core - Electrical Estimator Engine
//!
//! `volt_core` is the computational heart of Voltcalc: a registry of
//! electrical engineering calculators, each pairing a declarative input
//! schema with a pure transform over static reference tables. All inputs
//! and outputs are JSON-serializable, so the engine drops into any
//! frontend unchanged.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: transforms are pure functions; identical input yields
//!   bit-identical output
//! - **Data-driven domains**: every field constraint is schema data
//!   checked by one generic validator, not scattered imperative checks
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//! - **Estimators, not studies**: the simplified formulas (Lee arc flash,
//!   infinite-bus short circuit) are documented screening tools
//!
//! ## Quick Start
//!
//! ```rust
//! use volt_core::registry;
//!
//! let def = registry::lookup("transformer-sizing").unwrap();
//! let record = def.schema.defaults();
//! let output = registry::evaluate("transformer-sizing", &record).unwrap();
//!
//! assert_eq!(output.number_value("recommended_kva"), Some(500.0));
//! ```
//!
//! ## Modules
//!
//! - [`registry`] - calculator definitions, lookup, search, `evaluate`
//! - [`schema`] - declarative field constraints and the generic validator
//! - [`session`] - the reactive form reducer (recompute on every edit)
//! - [`transforms`] - the calculators, grouped by site category
//! - [`tables`] - NEC and standard-size reference data
//! - [`value`] - input/output records
//! - [`errors`] - structured error types

pub mod errors;
pub mod registry;
pub mod schema;
pub mod session;
pub mod tables;
pub mod transforms;
pub mod value;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult, FieldIssue};
pub use registry::{evaluate, CalculatorDefinition, CalculatorInfo, Category};
pub use schema::{FieldKind, FieldSpec, InputSchema};
pub use session::{reduce, FieldChange, SessionState};
pub use value::{InputRecord, Inputs, OutputRecord, OutputValue, Value};
