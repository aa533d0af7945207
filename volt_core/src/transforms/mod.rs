//! # Transform Functions
//!
//! One module per site category, one nested module per calculator. Each
//! calculator exposes the same pair:
//!
//! - `schema() -> InputSchema` - declarative field constraints
//! - `calculate(&Inputs) -> CalcResult<OutputRecord>` - the pure transform
//!
//! Transforms are deterministic, synchronous, and side-effect-free. They
//! assume validated input (the registry runs the schema validator first)
//! and complete in O(1) or O(table size).
//!
//! ## Categories
//!
//! - [`system_analysis`] - fault levels, loads, power factor
//! - [`power_distribution`] - transformer/breaker/busbar/generator sizing
//! - [`cabling`] - conductor sizing, conduit and tray fill, earthing
//! - [`lighting_safety`] - arc flash, illumination, emergency supplies
//! - [`renewable`] - solar and wind estimators

pub mod cabling;
pub mod lighting_safety;
pub mod power_distribution;
pub mod renewable;
pub mod system_analysis;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::tables::WireGauge;

/// Square root of three, the line factor for balanced three-phase systems
pub const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// System phase configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Single,
    #[default]
    Three,
}

impl Phase {
    /// All phase options for UI selection
    pub const ALL: [Phase; 2] = [Phase::Single, Phase::Three];

    /// Schema option code
    pub fn code(&self) -> &'static str {
        match self {
            Phase::Single => "single",
            Phase::Three => "three",
        }
    }

    /// Parse from a schema choice value
    pub fn from_code(s: &str) -> CalcResult<Self> {
        match s {
            "single" => Ok(Phase::Single),
            "three" => Ok(Phase::Three),
            other => Err(CalcError::lookup_miss("phase", other)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Single => "Single-phase",
            Phase::Three => "Three-phase",
        }
    }

    /// Line current for a given apparent power: I = VA / (V) or VA / (V*sqrt3)
    pub fn line_current(&self, volt_amperes: f64, voltage: f64) -> f64 {
        match self {
            Phase::Single => volt_amperes / voltage,
            Phase::Three => volt_amperes / (voltage * SQRT_3),
        }
    }

    /// Circuit factor for the NEC voltage-drop formulas: 2 for single-phase
    /// out-and-back, sqrt3 for balanced three-phase
    pub fn drop_factor(&self) -> f64 {
        match self {
            Phase::Single => 2.0,
            Phase::Three => SQRT_3,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Option codes for a wire-gauge choice field
pub fn gauge_codes() -> Vec<&'static str> {
    WireGauge::ALL.iter().map(|g| g.code()).collect()
}
