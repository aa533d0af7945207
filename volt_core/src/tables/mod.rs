//! # Reference Tables
//!
//! Static lookup data consumed by the transforms. Everything here is
//! read-only and shared: conductor gauges with circular mils and NEC
//! Chapter 9 Table 9 impedances, conduit dimensions, the ascending
//! standard-size ladders (breakers, transformers, busbars, ...), and the
//! NFPA 70E PPE category thresholds.
//!
//! ## Table Types
//!
//! - [`conductors`] - AWG/kcmil gauges, materials, raceways, NEC Table 9
//! - [`standard_sizes`] - ascending equipment-rating ladders and selection
//! - [`ppe`] - incident-energy PPE categories

pub mod conductors;
pub mod ppe;
pub mod standard_sizes;

// Re-export conductor types
pub use conductors::{ConductorMaterial, EarthMaterial, Impedance, Raceway, WireGauge};

// Re-export standard-size tables and selection helpers
pub use standard_sizes::{
    select_at_least, BusbarSection, ConduitSize, BATTERY_AH, BREAKER_AMP_STEPS,
    BUSBAR_SECTIONS, CAPACITOR_KVAR_STEPS, CONDUIT_SIZES, EARTH_CONDUCTOR_MM2,
    GENERATOR_KVA_RATINGS, TRANSFORMER_KVA_RATINGS, TRAY_WIDTHS_MM, UPS_KVA_RATINGS,
};

// Re-export PPE classification
pub use ppe::PpeCategory;
