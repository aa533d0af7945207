//! Renewable Energy Calculators
//!
//! First-pass sizing for solar arrays, storage banks, and small wind
//! turbines.

use crate::errors::CalcResult;
use crate::schema::{FieldSpec, InputSchema};
use crate::value::{Inputs, OutputRecord};

/// PV array size from daily consumption and peak sun hours.
pub mod solar_array_sizing {
    use super::*;

    pub fn schema() -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("daily_consumption_kwh", "Daily consumption", "kWh", 30.0)
                .positive(),
            FieldSpec::number("peak_sun_hours", "Peak sun hours", "h", 5.0)
                .positive()
                .max(12.0),
            FieldSpec::number("system_losses_pct", "System losses", "%", 20.0).max(50.0),
            FieldSpec::number("panel_watts", "Panel rating", "W", 550.0).positive(),
        ])
    }

    pub fn calculate(inputs: &Inputs) -> CalcResult<OutputRecord> {
        let daily_kwh = inputs.num("daily_consumption_kwh")?;
        let sun_hours = inputs.num("peak_sun_hours")?;
        let losses = inputs.num("system_losses_pct")? / 100.0;
        let panel_w = inputs.num("panel_watts")?;

        let array_kw = daily_kwh / (sun_hours * (1.0 - losses));
        let panels = (array_kw * 1000.0 / panel_w).ceil();
        let installed_kw = panels * panel_w / 1000.0;

        Ok(OutputRecord::new()
            .number("array_kw", "Required array size", array_kw, "kW")
            .number("panels", "Panels required", panels, "")
            .number("installed_kw", "Installed array size", installed_kw, "kW"))
    }
}

/// Battery bank for off-grid autonomy.
pub mod solar_battery_storage {
    use super::*;

    /// Capacity of one standard string used for the parallel-string count
    const STRING_AH: f64 = 200.0;

    pub fn schema() -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("daily_consumption_kwh", "Daily consumption", "kWh", 30.0)
                .positive(),
            FieldSpec::number("autonomy_days", "Days of autonomy", "days", 2.0)
                .positive()
                .max(14.0),
            FieldSpec::number("system_voltage", "Bank voltage", "V", 48.0).positive(),
            FieldSpec::number("depth_of_discharge_pct", "Depth of discharge", "%", 80.0)
                .positive()
                .max(100.0),
        ])
    }

    pub fn calculate(inputs: &Inputs) -> CalcResult<OutputRecord> {
        let daily_kwh = inputs.num("daily_consumption_kwh")?;
        let days = inputs.num("autonomy_days")?;
        let bank_v = inputs.num("system_voltage")?;
        let dod = inputs.num("depth_of_discharge_pct")? / 100.0;

        let energy_wh = daily_kwh * 1000.0 * days;
        let required_ah = energy_wh / (bank_v * dod);
        let strings = (required_ah / STRING_AH).ceil();
        let installed_ah = strings * STRING_AH;

        Ok(OutputRecord::new()
            .number("required_ah", "Required bank capacity", required_ah, "Ah")
            .number("strings", "Parallel strings of 200 Ah", strings, "")
            .number("installed_ah", "Installed bank capacity", installed_ah, "Ah"))
    }
}

/// Wind turbine output from swept area and wind speed.
///
/// `P = 0.5 * rho * A * v^3 * Cp`, capped by the Betz limit on Cp.
pub mod wind_turbine_energy {
    use super::*;

    /// Hours in a non-leap year
    const HOURS_PER_YEAR: f64 = 8760.0;

    pub fn schema() -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("rotor_diameter_m", "Rotor diameter", "m", 10.0).positive(),
            FieldSpec::number("wind_speed_ms", "Mean wind speed", "m/s", 7.0)
                .positive()
                .max(30.0),
            FieldSpec::number("air_density", "Air density", "kg/m3", 1.225)
                .positive()
                .max(1.5),
            FieldSpec::number("power_coefficient", "Power coefficient", "", 0.4)
                .positive()
                .max(0.593),
            FieldSpec::number("availability_pct", "Availability", "%", 90.0)
                .positive()
                .max(100.0),
        ])
    }

    pub fn calculate(inputs: &Inputs) -> CalcResult<OutputRecord> {
        let diameter = inputs.num("rotor_diameter_m")?;
        let wind_speed = inputs.num("wind_speed_ms")?;
        let density = inputs.num("air_density")?;
        let cp = inputs.num("power_coefficient")?;
        let availability = inputs.num("availability_pct")? / 100.0;

        let swept_area = std::f64::consts::PI * diameter.powi(2) / 4.0;
        let power_w = 0.5 * density * swept_area * wind_speed.powi(3) * cp;
        let annual_mwh = power_w * HOURS_PER_YEAR * availability / 1.0e6;

        Ok(OutputRecord::new()
            .number("swept_area", "Swept area", swept_area, "m2")
            .number("power_kw", "Power at mean wind speed", power_w / 1000.0, "kW")
            .number("annual_mwh", "Annual energy estimate", annual_mwh, "MWh"))
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
    fn test_solar_array_sizing() {
        // 30 kWh / (5 h * 0.8) = 7.5 kW -> 14 panels of 550 W
        let out = run(solar_array_sizing::schema(), solar_array_sizing::calculate, &[]);
        assert_eq!(out.number_value("array_kw"), Some(7.5));
        assert_eq!(out.number_value("panels"), Some(14.0));
        assert_eq!(out.number_value("installed_kw"), Some(7.7));
    }

    #[test]
    fn test_solar_array_zero_losses() {
        let out = run(
            solar_array_sizing::schema(),
            solar_array_sizing::calculate,
            &[("system_losses_pct", Value::Number(0.0))],
        );
        assert_eq!(out.number_value("array_kw"), Some(6.0));
    }

    #[test]
    fn test_solar_battery_storage() {
        // 30 kWh * 2 days / (48 V * 0.8) = 1562.5 Ah -> 8 strings of 200 Ah
        let out = run(
            solar_battery_storage::schema(),
            solar_battery_storage::calculate,
            &[],
        );
        let required = out.number_value("required_ah").unwrap();
        assert!((required - 1562.5).abs() < 1e-9, "Ah = {}", required);
        assert_eq!(out.number_value("strings"), Some(8.0));
        assert_eq!(out.number_value("installed_ah"), Some(1600.0));
    }

    #[test]
    fn test_wind_turbine_power() {
        // D=10: A = 78.54 m2; P = 0.5 * 1.225 * A * 343 * 0.4 = 6.6 kW
        let out = run(wind_turbine_energy::schema(), wind_turbine_energy::calculate, &[]);
        let power = out.number_value("power_kw").unwrap();
        assert!((power - 6.6).abs() < 0.01, "P = {}", power);
        let annual = out.number_value("annual_mwh").unwrap();
        assert!((annual - 52.04).abs() < 0.1, "E = {}", annual);
    }

    #[test]
    fn test_wind_power_cubic_in_wind_speed() {
        let base = run(wind_turbine_energy::schema(), wind_turbine_energy::calculate, &[]);
        let double = run(
            wind_turbine_energy::schema(),
            wind_turbine_energy::calculate,
            &[("wind_speed_ms", Value::Number(14.0))],
        );
        let ratio = double.number_value("power_kw").unwrap()
            / base.number_value("power_kw").unwrap();
        assert!((ratio - 8.0).abs() < 1e-9);
    }
}
