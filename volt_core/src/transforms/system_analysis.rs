//! System Analysis Calculators
//!
//! Fault levels, load aggregation, power factor correction, and motor
//! currents. The short-circuit estimators use the infinite-bus
//! approximation (source impedance from the transformer nameplate alone);
//! they are educational estimators, not IEC 60909 studies.

use crate::errors::CalcResult;
use crate::schema::{FieldSpec, InputSchema};
use crate::tables::{
    select_at_least, ConductorMaterial, Raceway, WireGauge, BREAKER_AMP_STEPS,
    CAPACITOR_KVAR_STEPS,
};
use crate::transforms::{gauge_codes, Phase, SQRT_3};
use crate::value::{Inputs, OutputRecord};

/// Transformer secondary fault current (infinite bus).
///
/// `I_fault = (kVA * 1000) / (V * sqrt3) / (Z% / 100)`
pub mod fault_current {
    use super::*;

    pub fn schema() -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("transformer_kva", "Transformer rating", "kVA", 1500.0)
                .positive(),
            FieldSpec::number("secondary_voltage", "Secondary voltage", "V", 480.0)
                .positive(),
            FieldSpec::number("impedance_pct", "Transformer impedance", "%", 5.75)
                .positive()
                .max(20.0),
        ])
    }

    pub fn calculate(inputs: &Inputs) -> CalcResult<OutputRecord> {
        let kva = inputs.num("transformer_kva")?;
        let voltage = inputs.num("secondary_voltage")?;
        let impedance_pct = inputs.num("impedance_pct")?;

        let full_load_a = kva * 1000.0 / (voltage * SQRT_3);
        let fault_a = full_load_a / (impedance_pct / 100.0);
        let fault_mva = kva / (impedance_pct / 100.0) / 1000.0;

        Ok(OutputRecord::new()
            .number("full_load_current", "Full-load current", full_load_a, "A")
            .number("fault_current", "Symmetrical fault current", fault_a, "A")
            .number("fault_mva", "Fault level", fault_mva, "MVA"))
    }
}

/// Fault current at the end of a feeder cable.
///
/// Source impedance comes from the transformer nameplate, cable impedance
/// from the NEC table scaled by length; the two magnitudes are added
/// arithmetically. A rough attenuation estimate, kept deliberately simple.
pub mod short_circuit_advanced {
    use super::*;

    pub fn schema() -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("transformer_kva", "Transformer rating", "kVA", 1000.0)
                .positive(),
            FieldSpec::number("secondary_voltage", "Secondary voltage", "V", 480.0)
                .positive(),
            FieldSpec::number("impedance_pct", "Transformer impedance", "%", 5.75)
                .positive()
                .max(20.0),
            FieldSpec::number("cable_length_ft", "Feeder length", "ft", 100.0).positive(),
            FieldSpec::choice("wire_gauge", "Conductor size", &gauge_codes(), "4/0"),
            FieldSpec::choice(
                "conductor_material",
                "Conductor material",
                &["copper", "aluminum"],
                "copper",
            ),
            FieldSpec::choice("raceway", "Raceway", &["pvc", "steel"], "steel"),
        ])
    }

    pub fn calculate(inputs: &Inputs) -> CalcResult<OutputRecord> {
        let kva = inputs.num("transformer_kva")?;
        let voltage = inputs.num("secondary_voltage")?;
        let impedance_pct = inputs.num("impedance_pct")?;
        let length_ft = inputs.num("cable_length_ft")?;
        let gauge = WireGauge::from_code(inputs.choice("wire_gauge")?)?;
        let material = ConductorMaterial::from_code(inputs.choice("conductor_material")?)?;
        let raceway = Raceway::from_code(inputs.choice("raceway")?)?;

        let source_fault_a = kva * 1000.0 / (voltage * SQRT_3) / (impedance_pct / 100.0);
        let phase_voltage = voltage / SQRT_3;
        let source_ohms = phase_voltage / source_fault_a;

        let imp = gauge.nec_impedance(material, raceway);
        let cable_ohms = (imp.r_ohms_per_kft.powi(2) + imp.x_ohms_per_kft.powi(2)).sqrt()
            * length_ft
            / 1000.0;

        let end_fault_a = phase_voltage / (source_ohms + cable_ohms);
        let attenuation = end_fault_a / source_fault_a;

        Ok(OutputRecord::new()
            .number("source_fault_current", "Fault current at source", source_fault_a, "A")
            .number("cable_impedance", "Cable impedance", cable_ohms, "ohm")
            .number("end_fault_current", "Fault current at cable end", end_fault_a, "A")
            .number("attenuation", "Attenuation factor", attenuation, ""))
    }
}

/// Panel load totals across up to four branch loads.
///
/// Total kVA is the sum of per-branch `kW / PF`; summation order cannot
/// affect the result.
pub mod load_aggregation {
    use super::*;

    const BRANCHES: usize = 4;

    pub fn schema() -> InputSchema {
        let mut fields = vec![
            FieldSpec::number("system_voltage", "System voltage", "V", 480.0).positive(),
            FieldSpec::choice("phase", "Phase", &["single", "three"], "three"),
        ];
        let branch_defaults = [(50.0, 0.85), (30.0, 0.9), (0.0, 0.9), (0.0, 0.9)];
        for (i, (kw, pf)) in branch_defaults.iter().enumerate().take(BRANCHES) {
            let n = i + 1;
            fields.push(FieldSpec::number(
                &format!("branch{}_kw", n),
                &format!("Branch {} load", n),
                "kW",
                *kw,
            ));
            fields.push(
                FieldSpec::number(
                    &format!("branch{}_pf", n),
                    &format!("Branch {} power factor", n),
                    "",
                    *pf,
                )
                .positive()
                .max(1.0),
            );
        }
        InputSchema::new(fields)
    }

    pub fn calculate(inputs: &Inputs) -> CalcResult<OutputRecord> {
        let voltage = inputs.num("system_voltage")?;
        let phase = Phase::from_code(inputs.choice("phase")?)?;

        let mut total_kw = 0.0;
        let mut total_kva = 0.0;
        for n in 1..=BRANCHES {
            let kw = inputs.num(&format!("branch{}_kw", n))?;
            let pf = inputs.num(&format!("branch{}_pf", n))?;
            if kw > 0.0 {
                total_kw += kw;
                total_kva += kw / pf;
            }
        }

        let aggregate_pf = if total_kva > 0.0 {
            total_kw / total_kva
        } else {
            0.0
        };
        let line_current = phase.line_current(total_kva * 1000.0, voltage);

        Ok(OutputRecord::new()
            .number("total_kw", "Total real power", total_kw, "kW")
            .number("total_kva", "Total apparent power", total_kva, "kVA")
            .number("aggregate_pf", "Aggregate power factor", aggregate_pf, "")
            .number("line_current", "Line current", line_current, "A"))
    }
}

/// Capacitor kVAR to raise a lagging power factor to a target.
///
/// `kVAR = P * (tan(acos(PF_now)) - tan(acos(PF_target)))`; a target at or
/// below the present power factor needs no correction (exactly zero, never
/// a negative bank).
pub mod power_factor_correction {
    use super::*;

    pub fn schema() -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("load_kw", "Real power load", "kW", 100.0).positive(),
            FieldSpec::number("current_pf", "Present power factor", "", 0.8)
                .positive()
                .max(1.0),
            FieldSpec::number("target_pf", "Target power factor", "", 0.95)
                .positive()
                .max(1.0),
        ])
    }

    pub fn calculate(inputs: &Inputs) -> CalcResult<OutputRecord> {
        let load_kw = inputs.num("load_kw")?;
        let current_pf = inputs.num("current_pf")?;
        let target_pf = inputs.num("target_pf")?;

        let kva_before = load_kw / current_pf;
        let kva_after = load_kw / target_pf;

        let (required_kvar, bank_kvar, status) = if current_pf >= target_pf {
            (0.0, 0.0, "Target already met - no correction required")
        } else {
            let kvar =
                load_kw * (current_pf.acos().tan() - target_pf.acos().tan());
            let bank = select_at_least(&CAPACITOR_KVAR_STEPS, kvar);
            (kvar, bank, "Correction required")
        };

        Ok(OutputRecord::new()
            .number("required_kvar", "Required correction", required_kvar, "kVAR")
            .number("recommended_bank", "Recommended capacitor bank", bank_kvar, "kVAR")
            .number("kva_before", "Apparent power before", kva_before, "kVA")
            .number("kva_released", "Apparent power released", kva_before - kva_after, "kVA")
            .label("status", "Status", status))
    }
}

/// Motor full-load current with a 125% breaker recommendation.
pub mod motor_full_load_current {
    use super::*;

    pub fn schema() -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("motor_kw", "Motor shaft power", "kW", 55.0).positive(),
            FieldSpec::number("system_voltage", "System voltage", "V", 400.0).positive(),
            FieldSpec::number("power_factor", "Power factor", "", 0.85)
                .positive()
                .max(1.0),
            FieldSpec::number("efficiency_pct", "Efficiency", "%", 92.0)
                .positive()
                .max(100.0),
            FieldSpec::choice("phase", "Phase", &["single", "three"], "three"),
        ])
    }

    pub fn calculate(inputs: &Inputs) -> CalcResult<OutputRecord> {
        let motor_kw = inputs.num("motor_kw")?;
        let voltage = inputs.num("system_voltage")?;
        let pf = inputs.num("power_factor")?;
        let efficiency = inputs.num("efficiency_pct")? / 100.0;
        let phase = Phase::from_code(inputs.choice("phase")?)?;

        let input_kw = motor_kw / efficiency;
        let flc = phase.line_current(input_kw * 1000.0 / pf, voltage);
        let breaker = select_at_least(&BREAKER_AMP_STEPS, flc * 1.25);

        Ok(OutputRecord::new()
            .number("input_power", "Electrical input power", input_kw, "kW")
            .number("full_load_current", "Full-load current", flc, "A")
            .number("recommended_breaker", "Recommended breaker", breaker, "A"))
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
    fn test_fault_current_worked_example() {
        // 1500 kVA, 480 V, 5.75 %Z: about 31.4 kA
        let out = run(fault_current::schema(), fault_current::calculate, &[]);
        let fault = out.number_value("fault_current").unwrap();
        let expected = 31_404.0;
        assert!(
            (fault - expected).abs() / expected < 0.005,
            "fault = {}",
            fault
        );
    }

    #[test]
    fn test_fault_current_scales_inversely_with_impedance() {
        let low_z = run(
            fault_current::schema(),
            fault_current::calculate,
            &[("impedance_pct", Value::Number(4.0))],
        );
        let high_z = run(
            fault_current::schema(),
            fault_current::calculate,
            &[("impedance_pct", Value::Number(8.0))],
        );
        let ratio = low_z.number_value("fault_current").unwrap()
            / high_z.number_value("fault_current").unwrap();
        assert!((ratio - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_circuit_attenuates_with_length() {
        let near = run(
            short_circuit_advanced::schema(),
            short_circuit_advanced::calculate,
            &[("cable_length_ft", Value::Number(10.0))],
        );
        let far = run(
            short_circuit_advanced::schema(),
            short_circuit_advanced::calculate,
            &[("cable_length_ft", Value::Number(500.0))],
        );
        let near_end = near.number_value("end_fault_current").unwrap();
        let far_end = far.number_value("end_fault_current").unwrap();
        let source = near.number_value("source_fault_current").unwrap();
        assert!(near_end < source);
        assert!(far_end < near_end);
        assert!(far.number_value("attenuation").unwrap() < 1.0);
    }

    #[test]
    fn test_load_aggregation_totals() {
        // Defaults: 50 kW @ 0.85 + 30 kW @ 0.9
        let out = run(load_aggregation::schema(), load_aggregation::calculate, &[]);
        let kva = out.number_value("total_kva").unwrap();
        let expected = 50.0 / 0.85 + 30.0 / 0.9;
        assert!((kva - expected).abs() < 1e-9);
        assert_eq!(out.number_value("total_kw").unwrap(), 80.0);
    }

    #[test]
    fn test_load_aggregation_order_independent() {
        let ab = run(load_aggregation::schema(), load_aggregation::calculate, &[]);
        // Same branches, swapped slots
        let ba = run(
            load_aggregation::schema(),
            load_aggregation::calculate,
            &[
                ("branch1_kw", Value::Number(30.0)),
                ("branch1_pf", Value::Number(0.9)),
                ("branch2_kw", Value::Number(50.0)),
                ("branch2_pf", Value::Number(0.85)),
            ],
        );
        assert_eq!(
            ab.number_value("total_kva"),
            ba.number_value("total_kva")
        );
        assert_eq!(
            ab.number_value("line_current"),
            ba.number_value("line_current")
        );
    }

    #[test]
    fn test_load_aggregation_all_idle() {
        let out = run(
            load_aggregation::schema(),
            load_aggregation::calculate,
            &[
                ("branch1_kw", Value::Number(0.0)),
                ("branch2_kw", Value::Number(0.0)),
            ],
        );
        assert_eq!(out.number_value("total_kva"), Some(0.0));
        assert_eq!(out.number_value("aggregate_pf"), Some(0.0));
        assert!(out.ensure_finite().is_ok());
    }

    #[test]
    fn test_pf_correction_worked_example() {
        // 100 kW, 0.8 -> 0.95: about 42.13 kVAR
        let out = run(
            power_factor_correction::schema(),
            power_factor_correction::calculate,
            &[],
        );
        let kvar = out.number_value("required_kvar").unwrap();
        assert!((kvar - 42.13).abs() < 0.05, "kvar = {}", kvar);
        assert_eq!(out.number_value("recommended_bank"), Some(50.0));
    }

    #[test]
    fn test_pf_correction_already_met_is_exactly_zero() {
        let out = run(
            power_factor_correction::schema(),
            power_factor_correction::calculate,
            &[
                ("current_pf", Value::Number(0.95)),
                ("target_pf", Value::Number(0.9)),
            ],
        );
        assert_eq!(out.number_value("required_kvar"), Some(0.0));
        assert_eq!(out.number_value("recommended_bank"), Some(0.0));
        assert!(out.label_text("status").unwrap().contains("already met"));
    }

    #[test]
    fn test_motor_flc_and_breaker() {
        // 55 kW, 400 V, 0.85 PF, 92% efficiency, three-phase
        let out = run(
            motor_full_load_current::schema(),
            motor_full_load_current::calculate,
            &[],
        );
        let flc = out.number_value("full_load_current").unwrap();
        let expected = 55.0 / 0.92 * 1000.0 / 0.85 / (400.0 * SQRT_3);
        assert!((flc - expected).abs() < 0.01);
        // 1.25 * 101.5 A lands on the 160 A step
        assert_eq!(out.number_value("recommended_breaker"), Some(160.0));
    }

    #[test]
    fn test_determinism() {
        let a = run(fault_current::schema(), fault_current::calculate, &[]);
        let b = run(fault_current::schema(), fault_current::calculate, &[]);
        assert_eq!(a, b);
    }
}
