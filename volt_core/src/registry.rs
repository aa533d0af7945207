//! # Calculator Registry
//!
//! Central, immutable list of every calculator on the site: slug, display
//! metadata, input schema, and transform, built once at first use and
//! shared read-only after that. Declaration order is the navigation order
//! for previous/next links and category listings.
//!
//! ## Usage
//!
//! ```rust
//! use volt_core::registry;
//!
//! let def = registry::lookup("fault-current").unwrap();
//! let record = def.schema.defaults();
//! let output = registry::evaluate("fault-current", &record).unwrap();
//! assert!(output.number_value("fault_current").unwrap() > 0.0);
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::schema::InputSchema;
use crate::transforms::{
    cabling, lighting_safety, power_distribution, renewable, system_analysis,
};
use crate::value::{InputRecord, Inputs, OutputRecord};

/// Site category for navigation and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    SystemAnalysis,
    PowerDistribution,
    CablingContainment,
    LightingSafety,
    RenewableEnergy,
}

impl Category {
    /// All categories in site menu order
    pub const ALL: [Category; 5] = [
        Category::SystemAnalysis,
        Category::PowerDistribution,
        Category::CablingContainment,
        Category::LightingSafety,
        Category::RenewableEnergy,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::SystemAnalysis => "System Analysis",
            Category::PowerDistribution => "Power Distribution",
            Category::CablingContainment => "Cabling & Containment",
            Category::LightingSafety => "Lighting & Safety",
            Category::RenewableEnergy => "Renewable Energy",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Signature shared by every transform function
pub type TransformFn = fn(&Inputs) -> CalcResult<OutputRecord>;

/// One registered calculator: routing key, display metadata, schema, and
/// transform. Static for the life of the process, never mutated.
pub struct CalculatorDefinition {
    /// Unique routing key (e.g., "fault-current")
    pub slug: &'static str,
    /// Display title
    pub title: &'static str,
    /// One-line description for listings and search results
    pub short_description: &'static str,
    /// Site category
    pub category: Category,
    /// Declarative input constraints; also drives form rendering
    pub schema: InputSchema,
    /// The pure transform
    pub transform: TransformFn,
}

impl CalculatorDefinition {
    /// Serializable metadata view (everything except the function pointer),
    /// as consumed by the navigation/content layer.
    pub fn info(&self) -> CalculatorInfo {
        CalculatorInfo {
            slug: self.slug.to_string(),
            title: self.title.to_string(),
            short_description: self.short_description.to_string(),
            category: self.category,
            schema: self.schema.clone(),
        }
    }

    /// Validate a record against this calculator's schema and run the
    /// transform. Non-finite results are rejected, never returned.
    pub fn evaluate(&self, record: &InputRecord) -> CalcResult<OutputRecord> {
        self.schema
            .validate(record)
            .map_err(CalcError::validation)?;
        let output = (self.transform)(&Inputs::new(record))?;
        output.ensure_finite()?;
        Ok(output)
    }
}

impl std::fmt::Debug for CalculatorDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalculatorDefinition")
            .field("slug", &self.slug)
            .field("title", &self.title)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// JSON-friendly calculator metadata for the navigation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorInfo {
    pub slug: String,
    pub title: String,
    pub short_description: String,
    pub category: Category,
    pub schema: InputSchema,
}

fn definition(
    slug: &'static str,
    title: &'static str,
    short_description: &'static str,
    category: Category,
    schema: InputSchema,
    transform: TransformFn,
) -> CalculatorDefinition {
    CalculatorDefinition {
        slug,
        title,
        short_description,
        category,
        schema,
        transform,
    }
}

static REGISTRY: Lazy<Vec<CalculatorDefinition>> = Lazy::new(|| {
    use Category::*;
    vec![
        // --- System Analysis ---
        definition(
            "fault-current",
            "Fault Current Calculator",
            "Symmetrical fault current at a transformer secondary",
            SystemAnalysis,
            system_analysis::fault_current::schema(),
            system_analysis::fault_current::calculate,
        ),
        definition(
            "short-circuit-advanced",
            "Short Circuit Calculator (Advanced)",
            "Fault current at the end of a feeder, with cable attenuation",
            SystemAnalysis,
            system_analysis::short_circuit_advanced::schema(),
            system_analysis::short_circuit_advanced::calculate,
        ),
        definition(
            "load-aggregation",
            "Load Aggregation Calculator",
            "Panel totals and line current across branch loads",
            SystemAnalysis,
            system_analysis::load_aggregation::schema(),
            system_analysis::load_aggregation::calculate,
        ),
        definition(
            "power-factor-correction",
            "Power Factor Correction Calculator",
            "Capacitor kVAR to reach a target power factor",
            SystemAnalysis,
            system_analysis::power_factor_correction::schema(),
            system_analysis::power_factor_correction::calculate,
        ),
        definition(
            "motor-full-load-current",
            "Motor Full-Load Current Calculator",
            "Motor running current and breaker recommendation",
            SystemAnalysis,
            system_analysis::motor_full_load_current::schema(),
            system_analysis::motor_full_load_current::calculate,
        ),
        // --- Power Distribution ---
        definition(
            "transformer-sizing",
            "Transformer Sizing Calculator",
            "Standard kVA rating from load, diversity, and growth",
            PowerDistribution,
            power_distribution::transformer_sizing::schema(),
            power_distribution::transformer_sizing::calculate,
        ),
        definition(
            "breaker-sizing",
            "Breaker Sizing Calculator",
            "Standard breaker ampere step for a load current",
            PowerDistribution,
            power_distribution::breaker_sizing::schema(),
            power_distribution::breaker_sizing::calculate,
        ),
        definition(
            "busbar-sizing",
            "Busbar Sizing Calculator",
            "Rectangular bar section by design current density",
            PowerDistribution,
            power_distribution::busbar_sizing::schema(),
            power_distribution::busbar_sizing::calculate,
        ),
        definition(
            "voltage-drop",
            "Voltage Drop Calculator",
            "NEC table-method drop and compliance check",
            PowerDistribution,
            power_distribution::voltage_drop::schema(),
            power_distribution::voltage_drop::calculate,
        ),
        definition(
            "generator-sizing",
            "Generator Sizing Calculator",
            "Standby genset rating with growth margin",
            PowerDistribution,
            power_distribution::generator_sizing::schema(),
            power_distribution::generator_sizing::calculate,
        ),
        definition(
            "ups-sizing",
            "UPS Sizing Calculator",
            "UPS frame and battery bank for a critical load",
            PowerDistribution,
            power_distribution::ups_sizing::schema(),
            power_distribution::ups_sizing::calculate,
        ),
        // --- Cabling & Containment ---
        definition(
            "cable-sizing",
            "Cable Sizing Calculator",
            "Minimum conductor size for a voltage-drop target",
            CablingContainment,
            cabling::cable_sizing::schema(),
            cabling::cable_sizing::calculate,
        ),
        definition(
            "conduit-fill",
            "Conduit Fill Calculator",
            "NEC fill check for THHN conductors in conduit",
            CablingContainment,
            cabling::conduit_fill::schema(),
            cabling::conduit_fill::calculate,
        ),
        definition(
            "cable-tray-fill",
            "Cable Tray Fill Calculator",
            "Tray width selection at an area fill limit",
            CablingContainment,
            cabling::cable_tray_fill::schema(),
            cabling::cable_tray_fill::calculate,
        ),
        definition(
            "earthing-conductor",
            "Earthing Conductor Calculator",
            "Adiabatic earth conductor sizing",
            CablingContainment,
            cabling::earthing_conductor::schema(),
            cabling::earthing_conductor::calculate,
        ),
        // --- Lighting & Safety ---
        definition(
            "arc-flash",
            "Arc Flash Calculator",
            "Incident energy estimate and PPE category",
            LightingSafety,
            lighting_safety::arc_flash::schema(),
            lighting_safety::arc_flash::calculate,
        ),
        definition(
            "illumination",
            "Illumination Calculator",
            "Fixture count by the lumen method",
            LightingSafety,
            lighting_safety::illumination::schema(),
            lighting_safety::illumination::calculate,
        ),
        definition(
            "emergency-battery",
            "Emergency Battery Calculator",
            "Battery capacity for emergency lighting backup",
            LightingSafety,
            lighting_safety::emergency_battery::schema(),
            lighting_safety::emergency_battery::calculate,
        ),
        definition(
            "earth-resistance",
            "Earth Resistance Calculator",
            "Single rod electrode resistance estimate",
            LightingSafety,
            lighting_safety::earth_resistance::schema(),
            lighting_safety::earth_resistance::calculate,
        ),
        // --- Renewable Energy ---
        definition(
            "solar-array-sizing",
            "Solar Array Sizing Calculator",
            "PV array and panel count from daily consumption",
            RenewableEnergy,
            renewable::solar_array_sizing::schema(),
            renewable::solar_array_sizing::calculate,
        ),
        definition(
            "solar-battery-storage",
            "Solar Battery Storage Calculator",
            "Off-grid battery bank for days of autonomy",
            RenewableEnergy,
            renewable::solar_battery_storage::schema(),
            renewable::solar_battery_storage::calculate,
        ),
        definition(
            "wind-turbine-energy",
            "Wind Turbine Energy Calculator",
            "Turbine power and annual energy estimate",
            RenewableEnergy,
            renewable::wind_turbine_energy::schema(),
            renewable::wind_turbine_energy::calculate,
        ),
    ]
});

static BY_SLUG: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    let mut index = HashMap::with_capacity(REGISTRY.len());
    for (position, def) in REGISTRY.iter().enumerate() {
        let previous = index.insert(def.slug, position);
        debug_assert!(previous.is_none(), "duplicate slug: {}", def.slug);
    }
    index
});

/// Every registered calculator, in declaration order
pub fn all() -> &'static [CalculatorDefinition] {
    &REGISTRY
}

/// Find a calculator by slug
pub fn lookup(slug: &str) -> Option<&'static CalculatorDefinition> {
    BY_SLUG.get(slug).map(|&i| &REGISTRY[i])
}

/// Calculators in one category, in declaration order
pub fn list_by_category(category: Category) -> Vec<&'static CalculatorDefinition> {
    REGISTRY.iter().filter(|d| d.category == category).collect()
}

/// Case-insensitive substring search over titles and slugs.
///
/// Finite and restartable: each call walks the registry fresh and returns
/// a complete result list in declaration order.
pub fn search(query: &str) -> Vec<&'static CalculatorDefinition> {
    let needle = query.to_lowercase();
    REGISTRY
        .iter()
        .filter(|d| {
            d.title.to_lowercase().contains(&needle) || d.slug.contains(&needle)
        })
        .collect()
}

/// Previous and next calculators in declaration order, for page
/// navigation. `None` at either end; outer `None` for an unknown slug.
#[allow(clippy::type_complexity)]
pub fn neighbors(
    slug: &str,
) -> Option<(
    Option<&'static CalculatorDefinition>,
    Option<&'static CalculatorDefinition>,
)> {
    let position = *BY_SLUG.get(slug)?;
    let prev = position.checked_sub(1).map(|i| &REGISTRY[i]);
    let next = REGISTRY.get(position + 1);
    Some((prev, next))
}

/// Evaluate one calculator against an input record.
///
/// The single in-process entry point: schema validation, transform, and
/// finiteness check in one call.
pub fn evaluate(slug: &str, record: &InputRecord) -> CalcResult<OutputRecord> {
    let def = lookup(slug).ok_or_else(|| CalcError::unknown_calculator(slug))?;
    def.evaluate(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_registry_has_all_calculators() {
        assert_eq!(all().len(), 22);
    }

    #[test]
    fn test_slugs_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for def in all() {
            assert!(seen.insert(def.slug), "duplicate slug: {}", def.slug);
        }
    }

    #[test]
    fn test_every_category_is_populated() {
        for category in Category::ALL {
            assert!(
                !list_by_category(category).is_empty(),
                "empty category: {}",
                category
            );
        }
    }

    #[test]
    fn test_every_default_record_evaluates() {
        // Each calculator's schema defaults must be in-domain and produce
        // a finite output record
        for def in all() {
            let record = def.schema.defaults();
            let output = def
                .evaluate(&record)
                .unwrap_or_else(|e| panic!("{} failed on defaults: {}", def.slug, e));
            assert!(!output.fields.is_empty(), "{} returned nothing", def.slug);
        }
    }

    #[test]
    fn test_lookup_and_unknown_slug() {
        assert_eq!(lookup("voltage-drop").unwrap().slug, "voltage-drop");
        assert!(lookup("flux-capacitor").is_none());

        let err = evaluate("flux-capacitor", &InputRecord::new()).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_CALCULATOR");
    }

    #[test]
    fn test_evaluate_rejects_out_of_domain_input() {
        let def = lookup("fault-current").unwrap();
        let mut record = def.schema.defaults();
        record.insert("secondary_voltage".to_string(), Value::Number(0.0));
        let err = evaluate("fault-current", &record).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION");
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        for def in all() {
            let record = def.schema.defaults();
            let first = def.evaluate(&record).unwrap();
            let second = def.evaluate(&record).unwrap();
            assert_eq!(first, second, "{} not deterministic", def.slug);
        }
    }

    #[test]
    fn test_search_matches_title_and_slug() {
        let by_title = search("Transformer");
        assert!(by_title.iter().any(|d| d.slug == "transformer-sizing"));

        let by_slug = search("ups");
        assert!(by_slug.iter().any(|d| d.slug == "ups-sizing"));

        // Case-insensitive, and restartable (same result twice)
        assert_eq!(search("VOLTAGE").len(), search("voltage").len());
        assert!(search("zzz-no-such").is_empty());
    }

    #[test]
    fn test_neighbors_follow_declaration_order() {
        let (prev, next) = neighbors("fault-current").unwrap();
        assert!(prev.is_none());
        assert_eq!(next.unwrap().slug, "short-circuit-advanced");

        let (prev, next) = neighbors("wind-turbine-energy").unwrap();
        assert_eq!(prev.unwrap().slug, "solar-battery-storage");
        assert!(next.is_none());

        assert!(neighbors("nope").is_none());
    }

    #[test]
    fn test_info_serializes() {
        let def = lookup("arc-flash").unwrap();
        let json = serde_json::to_string(&def.info()).unwrap();
        let back: CalculatorInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back.slug, "arc-flash");
        assert_eq!(back.category, Category::LightingSafety);
        assert_eq!(back.schema, def.schema);
    }
}
