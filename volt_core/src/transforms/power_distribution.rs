//! Power Distribution Calculators
//!
//! Equipment sizing against the standard rating ladders (transformers,
//! breakers, busbars, gensets, UPS) and the NEC table-method voltage drop.

use crate::errors::CalcResult;
use crate::schema::{FieldSpec, InputSchema};
use crate::tables::{
    select_at_least, BusbarSection, ConductorMaterial, Raceway, WireGauge, BATTERY_AH,
    BREAKER_AMP_STEPS, GENERATOR_KVA_RATINGS, TRANSFORMER_KVA_RATINGS, UPS_KVA_RATINGS,
};
use crate::transforms::{gauge_codes, Phase};
use crate::value::{Inputs, OutputRecord};

/// Transformer kVA selection from connected load, diversity, and growth.
///
/// `peak = connected * diversity`, `required = peak * (1 + growth%)`, then
/// the smallest standard rating >= required (saturating at the largest).
pub mod transformer_sizing {
    use super::*;

    pub fn schema() -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("connected_load_kva", "Connected load", "kVA", 450.0)
                .positive(),
            FieldSpec::number("diversity_factor", "Diversity factor", "", 0.8)
                .positive()
                .max(1.0),
            FieldSpec::number("future_expansion_pct", "Future expansion", "%", 20.0)
                .max(100.0),
        ])
    }

    pub fn calculate(inputs: &Inputs) -> CalcResult<OutputRecord> {
        let connected = inputs.num("connected_load_kva")?;
        let diversity = inputs.num("diversity_factor")?;
        let expansion = inputs.num("future_expansion_pct")?;

        let peak_kva = connected * diversity;
        let required_kva = peak_kva * (1.0 + expansion / 100.0);
        let recommended = select_at_least(&TRANSFORMER_KVA_RATINGS, required_kva);
        let utilization = required_kva / recommended * 100.0;

        Ok(OutputRecord::new()
            .number("peak_load", "Peak demand", peak_kva, "kVA")
            .number("required_kva", "Required capacity", required_kva, "kVA")
            .number("recommended_kva", "Recommended standard rating", recommended, "kVA")
            .number("utilization", "Utilization at required load", utilization, "%"))
    }
}

/// Breaker ampere-step selection with the 125% continuous-duty factor.
pub mod breaker_sizing {
    use super::*;

    pub fn schema() -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("load_current", "Load current", "A", 85.0).positive(),
            FieldSpec::choice(
                "duty",
                "Load duty",
                &["continuous", "non_continuous"],
                "continuous",
            ),
        ])
    }

    pub fn calculate(inputs: &Inputs) -> CalcResult<OutputRecord> {
        let current = inputs.num("load_current")?;
        let duty = inputs.choice("duty")?;

        let factor = if duty == "continuous" { 1.25 } else { 1.0 };
        let required = current * factor;
        let rating = select_at_least(&BREAKER_AMP_STEPS, required);

        let frame = if rating <= 125.0 {
            "MCB"
        } else if rating <= 1600.0 {
            "MCCB"
        } else {
            "ACB"
        };

        Ok(OutputRecord::new()
            .number("required_rating", "Required rating", required, "A")
            .number("breaker_rating", "Standard breaker rating", rating, "A")
            .label("frame_class", "Frame class", frame))
    }
}

/// Rectangular busbar selection by design current density.
pub mod busbar_sizing {
    use super::*;

    pub fn schema() -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("load_current", "Continuous current", "A", 1000.0).positive(),
            FieldSpec::choice(
                "material",
                "Busbar material",
                &["copper", "aluminum"],
                "copper",
            ),
        ])
    }

    pub fn calculate(inputs: &Inputs) -> CalcResult<OutputRecord> {
        let current = inputs.num("load_current")?;
        let material = ConductorMaterial::from_code(inputs.choice("material")?)?;

        let density = material.busbar_current_density();
        let required_mm2 = current / density;
        let section = BusbarSection::at_least_area(required_mm2);
        let actual_density = current / section.area_mm2();

        Ok(OutputRecord::new()
            .number("required_area", "Required cross-section", required_mm2, "mm2")
            .label("recommended_bar", "Recommended bar", section.display_name())
            .number("bar_area", "Bar cross-section", section.area_mm2(), "mm2")
            .number("actual_density", "Resulting current density", actual_density, "A/mm2"))
    }
}

/// NEC table-method voltage drop.
///
/// Effective impedance `Z = R*cos(phi) + X*sin(phi)` from Chapter 9
/// Table 9, then `Vd = 2*I*Z*L/1000` single-phase or `sqrt3*I*Z*L/1000`
/// three-phase, L in feet.
pub mod voltage_drop {
    use super::*;

    pub fn schema() -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("load_current", "Load current", "A", 100.0).positive(),
            FieldSpec::number("length_ft", "One-way run length", "ft", 150.0).positive(),
            FieldSpec::number("system_voltage", "System voltage", "V", 480.0).positive(),
            FieldSpec::number("power_factor", "Load power factor", "", 0.85)
                .positive()
                .max(1.0),
            FieldSpec::choice("phase", "Phase", &["single", "three"], "three"),
            FieldSpec::choice("wire_gauge", "Conductor size", &gauge_codes(), "1/0"),
            FieldSpec::choice(
                "conductor_material",
                "Conductor material",
                &["copper", "aluminum"],
                "copper",
            ),
            FieldSpec::choice("raceway", "Raceway", &["pvc", "steel"], "pvc"),
        ])
    }

    pub fn calculate(inputs: &Inputs) -> CalcResult<OutputRecord> {
        let current = inputs.num("load_current")?;
        let length_ft = inputs.num("length_ft")?;
        let voltage = inputs.num("system_voltage")?;
        let pf = inputs.num("power_factor")?;
        let phase = Phase::from_code(inputs.choice("phase")?)?;
        let gauge = WireGauge::from_code(inputs.choice("wire_gauge")?)?;
        let material = ConductorMaterial::from_code(inputs.choice("conductor_material")?)?;
        let raceway = Raceway::from_code(inputs.choice("raceway")?)?;

        let impedance = gauge.nec_impedance(material, raceway);
        let z_effective = impedance.effective(pf);
        let drop_v = phase.drop_factor() * current * z_effective * length_ft / 1000.0;
        let drop_pct = drop_v / voltage * 100.0;

        let tier = if drop_pct <= 3.0 {
            "Within NEC 3% branch recommendation"
        } else if drop_pct <= 5.0 {
            "Within NEC 5% total recommendation"
        } else {
            "Exceeds NEC 5% recommendation"
        };

        Ok(OutputRecord::new()
            .number("effective_impedance", "Effective impedance", z_effective, "ohm/kft")
            .number("voltage_drop", "Voltage drop", drop_v, "V")
            .number("drop_percent", "Voltage drop", drop_pct, "%")
            .number("voltage_at_load", "Voltage at load", voltage - drop_v, "V")
            .label("compliance", "Compliance", tier))
    }
}

/// Standby genset kVA selection with a growth margin.
pub mod generator_sizing {
    use super::*;

    pub fn schema() -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("running_load_kw", "Running load", "kW", 200.0).positive(),
            FieldSpec::number("power_factor", "Load power factor", "", 0.8)
                .positive()
                .max(1.0),
            FieldSpec::number("growth_margin_pct", "Growth margin", "%", 25.0).max(100.0),
        ])
    }

    pub fn calculate(inputs: &Inputs) -> CalcResult<OutputRecord> {
        let load_kw = inputs.num("running_load_kw")?;
        let pf = inputs.num("power_factor")?;
        let margin = inputs.num("growth_margin_pct")?;

        let load_kva = load_kw / pf;
        let required_kva = load_kva * (1.0 + margin / 100.0);
        let rating = select_at_least(&GENERATOR_KVA_RATINGS, required_kva);
        let loading_pct = load_kva / rating * 100.0;

        Ok(OutputRecord::new()
            .number("load_kva", "Running load", load_kva, "kVA")
            .number("required_kva", "Required capacity", required_kva, "kVA")
            .number("recommended_kva", "Recommended genset rating", rating, "kVA")
            .number("loading", "Loading at running load", loading_pct, "%"))
    }
}

/// UPS frame and battery bank sizing.
pub mod ups_sizing {
    use super::*;

    pub fn schema() -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("load_w", "Critical load", "W", 3000.0).positive(),
            FieldSpec::number("power_factor", "Load power factor", "", 0.9)
                .positive()
                .max(1.0),
            FieldSpec::number("margin_pct", "Sizing margin", "%", 25.0).max(100.0),
            FieldSpec::number("backup_minutes", "Backup time", "min", 30.0).positive(),
            FieldSpec::number("battery_voltage", "Battery bank voltage", "V", 192.0)
                .positive(),
            FieldSpec::number("inverter_efficiency_pct", "Inverter efficiency", "%", 90.0)
                .positive()
                .max(100.0),
            FieldSpec::number("depth_of_discharge_pct", "Depth of discharge", "%", 80.0)
                .positive()
                .max(100.0),
        ])
    }

    pub fn calculate(inputs: &Inputs) -> CalcResult<OutputRecord> {
        let load_w = inputs.num("load_w")?;
        let pf = inputs.num("power_factor")?;
        let margin = inputs.num("margin_pct")?;
        let minutes = inputs.num("backup_minutes")?;
        let bank_v = inputs.num("battery_voltage")?;
        let efficiency = inputs.num("inverter_efficiency_pct")? / 100.0;
        let dod = inputs.num("depth_of_discharge_pct")? / 100.0;

        let required_kva = load_w / pf * (1.0 + margin / 100.0) / 1000.0;
        let frame_kva = select_at_least(&UPS_KVA_RATINGS, required_kva);

        let energy_wh = load_w * minutes / 60.0 / efficiency;
        let required_ah = energy_wh / (bank_v * dod);
        let battery_ah = select_at_least(&BATTERY_AH, required_ah);

        Ok(OutputRecord::new()
            .number("required_kva", "Required UPS capacity", required_kva, "kVA")
            .number("ups_rating", "Recommended UPS frame", frame_kva, "kVA")
            .number("required_ah", "Required battery capacity", required_ah, "Ah")
            .number("battery_ah", "Recommended battery", battery_ah, "Ah"))
    }
}
