//! Lighting & Safety Calculators
//!
//! Arc-flash incident energy (simplified Lee estimator), lumen-method
//! illumination, emergency lighting batteries, and earth electrode
//! resistance.

use crate::errors::CalcResult;
use crate::schema::{FieldSpec, InputSchema};
use crate::tables::{select_at_least, PpeCategory, BATTERY_AH};
use crate::value::{Inputs, OutputRecord};

/// Arc-flash incident energy and PPE category.
///
/// Simplified Lee estimator `E = 5.271 * I * t * (d/18)^-2` with I in kA,
/// t in seconds, d in inches. An educational screening number, not an
/// IEEE 1584 study.
pub mod arc_flash {
    use super::*;

    pub fn schema() -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("fault_current_ka", "Bolted fault current", "kA", 30.0)
                .positive(),
            FieldSpec::number("clearing_time_s", "Arc clearing time", "s", 0.2)
                .positive()
                .max(2.0),
            FieldSpec::number("working_distance_in", "Working distance", "in", 18.0)
                .positive(),
        ])
    }

    pub fn calculate(inputs: &Inputs) -> CalcResult<OutputRecord> {
        let fault_ka = inputs.num("fault_current_ka")?;
        let time_s = inputs.num("clearing_time_s")?;
        let distance_in = inputs.num("working_distance_in")?;

        let energy = 5.271 * fault_ka * time_s * (distance_in / 18.0).powi(-2);
        let category = PpeCategory::classify(energy);

        let mut out = OutputRecord::new()
            .number("incident_energy", "Incident energy", energy, "cal/cm2")
            .label("ppe_category", "PPE category", category.display_name());
        if let Some(rating) = category.required_arc_rating() {
            out = out.number("arc_rating", "Minimum clothing arc rating", rating, "cal/cm2");
        }
        Ok(out)
    }
}

/// Fixture count by the lumen method.
///
/// `N = E * A / (lumens * UF * MF)`, rounded up to whole fixtures.
pub mod illumination {
    use super::*;

    pub fn schema() -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("room_length_m", "Room length", "m", 12.0).positive(),
            FieldSpec::number("room_width_m", "Room width", "m", 8.0).positive(),
            FieldSpec::number("target_lux", "Target illuminance", "lux", 500.0).positive(),
            FieldSpec::number("lumens_per_fixture", "Lumens per fixture", "lm", 5200.0)
                .positive(),
            FieldSpec::number("utilization_factor", "Utilization factor", "", 0.8)
                .positive()
                .max(1.0),
            FieldSpec::number("maintenance_factor", "Maintenance factor", "", 0.8)
                .positive()
                .max(1.0),
        ])
    }

    pub fn calculate(inputs: &Inputs) -> CalcResult<OutputRecord> {
        let length = inputs.num("room_length_m")?;
        let width = inputs.num("room_width_m")?;
        let lux = inputs.num("target_lux")?;
        let lumens = inputs.num("lumens_per_fixture")?;
        let uf = inputs.num("utilization_factor")?;
        let mf = inputs.num("maintenance_factor")?;

        let area = length * width;
        let required_lumens = lux * area / (uf * mf);
        let fixtures = (required_lumens / lumens).ceil();
        let achieved_lux = fixtures * lumens * uf * mf / area;

        Ok(OutputRecord::new()
            .number("room_area", "Room area", area, "m2")
            .number("required_lumens", "Required luminous flux", required_lumens, "lm")
            .number("fixtures", "Fixtures required", fixtures, "")
            .number("achieved_lux", "Achieved illuminance", achieved_lux, "lux"))
    }
}

/// Battery capacity for emergency lighting backup.
pub mod emergency_battery {
    use super::*;

    pub fn schema() -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("lighting_load_w", "Emergency lighting load", "W", 1200.0)
                .positive(),
            FieldSpec::number("backup_hours", "Backup duration", "h", 3.0)
                .positive()
                .max(24.0),
            FieldSpec::number("battery_voltage", "Battery bank voltage", "V", 48.0)
                .positive(),
            FieldSpec::number("inverter_efficiency_pct", "Inverter efficiency", "%", 85.0)
                .positive()
                .max(100.0),
            FieldSpec::number("depth_of_discharge_pct", "Depth of discharge", "%", 80.0)
                .positive()
                .max(100.0),
        ])
    }

    pub fn calculate(inputs: &Inputs) -> CalcResult<OutputRecord> {
        let load_w = inputs.num("lighting_load_w")?;
        let hours = inputs.num("backup_hours")?;
        let bank_v = inputs.num("battery_voltage")?;
        let efficiency = inputs.num("inverter_efficiency_pct")? / 100.0;
        let dod = inputs.num("depth_of_discharge_pct")? / 100.0;

        let energy_wh = load_w * hours / efficiency;
        let required_ah = energy_wh / (bank_v * dod);
        let battery_ah = select_at_least(&BATTERY_AH, required_ah);

        Ok(OutputRecord::new()
            .number("energy", "Energy to deliver", energy_wh, "Wh")
            .number("required_ah", "Required battery capacity", required_ah, "Ah")
            .number("battery_ah", "Recommended battery", battery_ah, "Ah"))
    }
}

/// Resistance of a single driven earth rod.
///
/// `R = rho / (2*pi*L) * (ln(8L/d) - 1)` with the rod diameter converted
/// to meters.
pub mod earth_resistance {
    use super::*;

    pub fn schema() -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("soil_resistivity", "Soil resistivity", "ohm-m", 100.0)
                .positive(),
            FieldSpec::number("rod_length_m", "Rod length", "m", 3.0).positive(),
            FieldSpec::number("rod_diameter_mm", "Rod diameter", "mm", 16.0).positive(),
        ])
    }

    pub fn calculate(inputs: &Inputs) -> CalcResult<OutputRecord> {
        let resistivity = inputs.num("soil_resistivity")?;
        let length = inputs.num("rod_length_m")?;
        let diameter_m = inputs.num("rod_diameter_mm")? / 1000.0;

        let resistance = resistivity / (2.0 * std::f64::consts::PI * length)
            * ((8.0 * length / diameter_m).ln() - 1.0);

        let tier = if resistance <= 1.0 {
            "Substation grade (1 ohm or less)"
        } else if resistance <= 5.0 {
            "Good (5 ohm or less)"
        } else if resistance <= 10.0 {
            "Acceptable for most installations"
        } else {
            "High - add rods or treat the soil"
        };

        Ok(OutputRecord::new()
            .number("resistance", "Rod resistance", resistance, "ohm")
            .label("assessment", "Assessment", tier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{InputRecord, Inputs, Value};

    fn run(
        schema: InputSchema,
        calc: fn(&Inputs) -> CalcResult<OutputRecord>,
        overrides: &[(&str, Value)],
    ) -> OutputRecord {
        let mut record: InputRecord = schema.defaults();
        for (name, value) in overrides {
            record.insert(name.to_string(), value.clone());
        }
        schema.validate(&record).expect("record should validate");
        calc(&Inputs::new(&record)).expect("transform should succeed")
    }

    #[test]
    fn test_arc_flash_energy_and_category() {
        // 30 kA, 0.2 s, 18 in: E = 5.271 * 30 * 0.2 = 31.63 -> Category 4
        let out = run(arc_flash::schema(), arc_flash::calculate, &[]);
        let energy = out.number_value("incident_energy").unwrap();
        assert!((energy - 31.626).abs() < 0.001, "E = {}", energy);
        assert_eq!(out.label_text("ppe_category"), Some("Category 4"));
        assert_eq!(out.number_value("arc_rating"), Some(40.0));
    }

    #[test]
    fn test_arc_flash_distance_inverse_square() {
        let near = run(arc_flash::schema(), arc_flash::calculate, &[]);
        let far = run(
            arc_flash::schema(),
            arc_flash::calculate,
            &[("working_distance_in", Value::Number(36.0))],
        );
        let ratio = near.number_value("incident_energy").unwrap()
            / far.number_value("incident_energy").unwrap();
        assert!((ratio - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_arc_flash_low_energy_has_no_rating_field() {
        let out = run(
            arc_flash::schema(),
            arc_flash::calculate,
            &[
                ("fault_current_ka", Value::Number(1.0)),
                ("clearing_time_s", Value::Number(0.1)),
            ],
        );
        // E = 0.53 cal/cm2 -> Category 0, no minimum clothing rating
        assert_eq!(out.label_text("ppe_category"), Some("Category 0"));
        assert!(out.get("arc_rating").is_none());
    }

    #[test]
    fn test_illumination_lumen_method() {
        // 96 m2 at 500 lux, UF*MF = 0.64: 75000 lm -> 15 fixtures of 5200 lm
        let out = run(illumination::schema(), illumination::calculate, &[]);
        assert_eq!(out.number_value("room_area"), Some(96.0));
        assert_eq!(out.number_value("fixtures"), Some(15.0));
        let achieved = out.number_value("achieved_lux").unwrap();
        assert!((achieved - 520.0).abs() < 0.01);
        // Always at or above target after rounding up
        assert!(achieved >= 500.0);
    }

    #[test]
    fn test_emergency_battery_sizing() {
        // 1200 W * 3 h / 0.85 = 4235 Wh; / (48 * 0.8) = 110.3 Ah -> 120 Ah
        let out = run(emergency_battery::schema(), emergency_battery::calculate, &[]);
        let ah = out.number_value("required_ah").unwrap();
        assert!((ah - 110.29).abs() < 0.05);
        assert_eq!(out.number_value("battery_ah"), Some(120.0));
    }

    #[test]
    fn test_emergency_battery_saturates_at_largest() {
        let out = run(
            emergency_battery::schema(),
            emergency_battery::calculate,
            &[("lighting_load_w", Value::Number(50_000.0))],
        );
        assert_eq!(out.number_value("battery_ah"), Some(200.0));
    }

    #[test]
    fn test_earth_resistance_single_rod() {
        // 100 ohm-m, 3 m rod, 16 mm: R = 100/(2*pi*3) * (ln(1500) - 1) = 33.5
        let out = run(earth_resistance::schema(), earth_resistance::calculate, &[]);
        let r = out.number_value("resistance").unwrap();
        assert!((r - 33.5).abs() < 0.1, "R = {}", r);
        assert_eq!(
            out.label_text("assessment"),
            Some("High - add rods or treat the soil")
        );
    }

    #[test]
    fn test_earth_resistance_improves_with_length() {
        let short = run(earth_resistance::schema(), earth_resistance::calculate, &[]);
        let long = run(
            earth_resistance::schema(),
            earth_resistance::calculate,
            &[("rod_length_m", Value::Number(6.0))],
        );
        assert!(
            long.number_value("resistance").unwrap()
                < short.number_value("resistance").unwrap()
        );
    }
}
