//! Conductor Reference Data (NEC Chapter 9)
//!
//! Standard AWG/kcmil gauges with circular-mil areas, THHN insulated
//! conductor areas (Table 5), and AC resistance/reactance per 1000 ft
//! (Table 9) keyed by conductor material and raceway type.
//!
//! Values are the commonly published NEC figures rounded as printed in the
//! code tables. They back educational estimators, not stamped designs.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Conductor material for wiring and busbar calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConductorMaterial {
    #[default]
    Copper,
    Aluminum,
}

impl ConductorMaterial {
    /// All materials for UI selection
    pub const ALL: [ConductorMaterial; 2] =
        [ConductorMaterial::Copper, ConductorMaterial::Aluminum];

    /// Schema option code (e.g., "copper")
    pub fn code(&self) -> &'static str {
        match self {
            ConductorMaterial::Copper => "copper",
            ConductorMaterial::Aluminum => "aluminum",
        }
    }

    /// Parse from a schema choice value
    pub fn from_code(s: &str) -> CalcResult<Self> {
        match s {
            "copper" => Ok(ConductorMaterial::Copper),
            "aluminum" => Ok(ConductorMaterial::Aluminum),
            other => Err(CalcError::lookup_miss("conductor_material", other)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ConductorMaterial::Copper => "Copper",
            ConductorMaterial::Aluminum => "Aluminum",
        }
    }

    /// K constant for the circular-mils voltage-drop method (ohm-cmil/ft)
    pub fn k_circular_mils(&self) -> f64 {
        match self {
            ConductorMaterial::Copper => 12.9,
            ConductorMaterial::Aluminum => 21.2,
        }
    }

    /// Typical design current density for busbar sizing (A/mm2)
    pub fn busbar_current_density(&self) -> f64 {
        match self {
            ConductorMaterial::Copper => 1.2,
            ConductorMaterial::Aluminum => 0.8,
        }
    }
}

impl std::fmt::Display for ConductorMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Earthing conductor material for the adiabatic sizing formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EarthMaterial {
    #[default]
    Copper,
    Aluminum,
    Steel,
}

impl EarthMaterial {
    /// All materials for UI selection
    pub const ALL: [EarthMaterial; 3] = [
        EarthMaterial::Copper,
        EarthMaterial::Aluminum,
        EarthMaterial::Steel,
    ];

    /// Schema option code
    pub fn code(&self) -> &'static str {
        match self {
            EarthMaterial::Copper => "copper",
            EarthMaterial::Aluminum => "aluminum",
            EarthMaterial::Steel => "steel",
        }
    }

    /// Parse from a schema choice value
    pub fn from_code(s: &str) -> CalcResult<Self> {
        match s {
            "copper" => Ok(EarthMaterial::Copper),
            "aluminum" => Ok(EarthMaterial::Aluminum),
            "steel" => Ok(EarthMaterial::Steel),
            other => Err(CalcError::lookup_miss("earth_material", other)),
        }
    }

    /// Material factor k for S = I*sqrt(t)/k (IEC 60364-5-54, PVC insulated)
    pub fn adiabatic_k(&self) -> f64 {
        match self {
            EarthMaterial::Copper => 143.0,
            EarthMaterial::Aluminum => 94.0,
            EarthMaterial::Steel => 52.0,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            EarthMaterial::Copper => "Copper",
            EarthMaterial::Aluminum => "Aluminum",
            EarthMaterial::Steel => "Steel",
        }
    }
}

/// Raceway type for the NEC Table 9 impedance columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Raceway {
    /// PVC or aluminum conduit column
    #[default]
    Pvc,
    /// Steel conduit column (higher reactance)
    Steel,
}

impl Raceway {
    /// All raceway types for UI selection
    pub const ALL: [Raceway; 2] = [Raceway::Pvc, Raceway::Steel];

    /// Schema option code
    pub fn code(&self) -> &'static str {
        match self {
            Raceway::Pvc => "pvc",
            Raceway::Steel => "steel",
        }
    }

    /// Parse from a schema choice value
    pub fn from_code(s: &str) -> CalcResult<Self> {
        match s {
            "pvc" => Ok(Raceway::Pvc),
            "steel" => Ok(Raceway::Steel),
            other => Err(CalcError::lookup_miss("raceway", other)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Raceway::Pvc => "PVC conduit",
            Raceway::Steel => "Steel conduit",
        }
    }
}

/// AC resistance and reactance for one conductor, ohms per 1000 ft
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Impedance {
    pub r_ohms_per_kft: f64,
    pub x_ohms_per_kft: f64,
}

impl Impedance {
    /// Effective impedance to neutral at a given power factor angle:
    /// Z = R*cos(phi) + X*sin(phi)
    pub fn effective(&self, power_factor: f64) -> f64 {
        let phi = power_factor.clamp(0.0, 1.0).acos();
        self.r_ohms_per_kft * phi.cos() + self.x_ohms_per_kft * phi.sin()
    }
}

/// One row of the conductor table: Table 9 impedances plus areas.
#[derive(Debug, Clone, Copy)]
struct GaugeRow {
    circular_mils: f64,
    /// THHN insulated conductor area, Table 5 (in2)
    thhn_area_in2: f64,
    x_pvc: f64,
    x_steel: f64,
    r_cu_pvc: f64,
    r_cu_steel: f64,
    r_al_pvc: f64,
    r_al_steel: f64,
}

/// Standard conductor gauge (AWG and kcmil)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WireGauge {
    #[serde(rename = "14")]
    Awg14,
    #[serde(rename = "12")]
    #[default]
    Awg12,
    #[serde(rename = "10")]
    Awg10,
    #[serde(rename = "8")]
    Awg8,
    #[serde(rename = "6")]
    Awg6,
    #[serde(rename = "4")]
    Awg4,
    #[serde(rename = "3")]
    Awg3,
    #[serde(rename = "2")]
    Awg2,
    #[serde(rename = "1")]
    Awg1,
    #[serde(rename = "1/0")]
    Awg1_0,
    #[serde(rename = "2/0")]
    Awg2_0,
    #[serde(rename = "3/0")]
    Awg3_0,
    #[serde(rename = "4/0")]
    Awg4_0,
    #[serde(rename = "250")]
    Kcmil250,
    #[serde(rename = "300")]
    Kcmil300,
    #[serde(rename = "350")]
    Kcmil350,
    #[serde(rename = "400")]
    Kcmil400,
    #[serde(rename = "500")]
    Kcmil500,
    #[serde(rename = "600")]
    Kcmil600,
    #[serde(rename = "750")]
    Kcmil750,
    #[serde(rename = "1000")]
    Kcmil1000,
}

impl WireGauge {
    /// All gauges, smallest conductor first (ascending circular mils)
    pub const ALL: [WireGauge; 21] = [
        WireGauge::Awg14,
        WireGauge::Awg12,
        WireGauge::Awg10,
        WireGauge::Awg8,
        WireGauge::Awg6,
        WireGauge::Awg4,
        WireGauge::Awg3,
        WireGauge::Awg2,
        WireGauge::Awg1,
        WireGauge::Awg1_0,
        WireGauge::Awg2_0,
        WireGauge::Awg3_0,
        WireGauge::Awg4_0,
        WireGauge::Kcmil250,
        WireGauge::Kcmil300,
        WireGauge::Kcmil350,
        WireGauge::Kcmil400,
        WireGauge::Kcmil500,
        WireGauge::Kcmil600,
        WireGauge::Kcmil750,
        WireGauge::Kcmil1000,
    ];

    /// Schema option code (e.g., "12", "1/0", "250")
    pub fn code(&self) -> &'static str {
        match self {
            WireGauge::Awg14 => "14",
            WireGauge::Awg12 => "12",
            WireGauge::Awg10 => "10",
            WireGauge::Awg8 => "8",
            WireGauge::Awg6 => "6",
            WireGauge::Awg4 => "4",
            WireGauge::Awg3 => "3",
            WireGauge::Awg2 => "2",
            WireGauge::Awg1 => "1",
            WireGauge::Awg1_0 => "1/0",
            WireGauge::Awg2_0 => "2/0",
            WireGauge::Awg3_0 => "3/0",
            WireGauge::Awg4_0 => "4/0",
            WireGauge::Kcmil250 => "250",
            WireGauge::Kcmil300 => "300",
            WireGauge::Kcmil350 => "350",
            WireGauge::Kcmil400 => "400",
            WireGauge::Kcmil500 => "500",
            WireGauge::Kcmil600 => "600",
            WireGauge::Kcmil750 => "750",
            WireGauge::Kcmil1000 => "1000",
        }
    }

    /// Parse from a schema choice value
    pub fn from_code(s: &str) -> CalcResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|g| g.code() == s)
            .ok_or_else(|| CalcError::lookup_miss("wire_gauge", s))
    }

    /// Get display name (e.g., "12 AWG", "250 kcmil")
    pub fn display_name(&self) -> String {
        match self {
            WireGauge::Kcmil250
            | WireGauge::Kcmil300
            | WireGauge::Kcmil350
            | WireGauge::Kcmil400
            | WireGauge::Kcmil500
            | WireGauge::Kcmil600
            | WireGauge::Kcmil750
            | WireGauge::Kcmil1000 => format!("{} kcmil", self.code()),
            _ => format!("{} AWG", self.code()),
        }
    }

    fn row(&self) -> GaugeRow {
        // circular_mils, thhn_area, x_pvc, x_steel, r_cu_pvc, r_cu_steel, r_al_pvc, r_al_steel
        let (cm, a, xp, xs, rcp, rcs, rap, ras) = match self {
            WireGauge::Awg14 => (4110.0, 0.0097, 0.058, 0.073, 3.10, 3.10, 5.06, 5.06),
            WireGauge::Awg12 => (6530.0, 0.0133, 0.054, 0.068, 2.00, 2.00, 3.20, 3.20),
            WireGauge::Awg10 => (10380.0, 0.0211, 0.050, 0.063, 1.20, 1.20, 2.00, 2.00),
            WireGauge::Awg8 => (16510.0, 0.0366, 0.052, 0.065, 0.78, 0.78, 1.30, 1.30),
            WireGauge::Awg6 => (26240.0, 0.0507, 0.051, 0.064, 0.49, 0.49, 0.81, 0.81),
            WireGauge::Awg4 => (41740.0, 0.0824, 0.048, 0.060, 0.31, 0.31, 0.51, 0.51),
            WireGauge::Awg3 => (52620.0, 0.0973, 0.047, 0.059, 0.25, 0.25, 0.40, 0.40),
            WireGauge::Awg2 => (66360.0, 0.1158, 0.045, 0.057, 0.19, 0.20, 0.32, 0.32),
            WireGauge::Awg1 => (83690.0, 0.1562, 0.046, 0.057, 0.15, 0.16, 0.25, 0.25),
            WireGauge::Awg1_0 => (105600.0, 0.1855, 0.044, 0.055, 0.12, 0.12, 0.20, 0.20),
            WireGauge::Awg2_0 => (133100.0, 0.2223, 0.043, 0.054, 0.10, 0.10, 0.16, 0.16),
            WireGauge::Awg3_0 => (167800.0, 0.2679, 0.042, 0.052, 0.077, 0.079, 0.13, 0.13),
            WireGauge::Awg4_0 => (211600.0, 0.3237, 0.041, 0.051, 0.062, 0.063, 0.10, 0.10),
            WireGauge::Kcmil250 => (250000.0, 0.3970, 0.041, 0.052, 0.052, 0.054, 0.085, 0.086),
            WireGauge::Kcmil300 => (300000.0, 0.4608, 0.041, 0.051, 0.044, 0.045, 0.071, 0.072),
            WireGauge::Kcmil350 => (350000.0, 0.5242, 0.040, 0.050, 0.038, 0.039, 0.061, 0.063),
            WireGauge::Kcmil400 => (400000.0, 0.5863, 0.040, 0.049, 0.033, 0.035, 0.054, 0.055),
            WireGauge::Kcmil500 => (500000.0, 0.7073, 0.039, 0.048, 0.027, 0.029, 0.043, 0.045),
            WireGauge::Kcmil600 => (600000.0, 0.8676, 0.039, 0.048, 0.023, 0.025, 0.036, 0.038),
            WireGauge::Kcmil750 => (750000.0, 1.0496, 0.038, 0.048, 0.019, 0.021, 0.029, 0.031),
            WireGauge::Kcmil1000 => (1000000.0, 1.3478, 0.037, 0.046, 0.015, 0.018, 0.023, 0.025),
        };
        GaugeRow {
            circular_mils: cm,
            thhn_area_in2: a,
            x_pvc: xp,
            x_steel: xs,
            r_cu_pvc: rcp,
            r_cu_steel: rcs,
            r_al_pvc: rap,
            r_al_steel: ras,
        }
    }

    /// Conductor area in circular mils
    pub fn circular_mils(&self) -> f64 {
        self.row().circular_mils
    }

    /// THHN insulated conductor area (in2), for conduit fill
    pub fn thhn_area_in2(&self) -> f64 {
        self.row().thhn_area_in2
    }

    /// NEC Table 9 impedance for the given material and raceway.
    ///
    /// All 21 gauges carry table rows, so this lookup cannot miss; callers
    /// that key by user-entered codes go through [`WireGauge::from_code`],
    /// which is where an unsupported gauge surfaces as a `LookupMiss`.
    pub fn nec_impedance(&self, material: ConductorMaterial, raceway: Raceway) -> Impedance {
        let row = self.row();
        let r = match (material, raceway) {
            (ConductorMaterial::Copper, Raceway::Pvc) => row.r_cu_pvc,
            (ConductorMaterial::Copper, Raceway::Steel) => row.r_cu_steel,
            (ConductorMaterial::Aluminum, Raceway::Pvc) => row.r_al_pvc,
            (ConductorMaterial::Aluminum, Raceway::Steel) => row.r_al_steel,
        };
        let x = match raceway {
            Raceway::Pvc => row.x_pvc,
            Raceway::Steel => row.x_steel,
        };
        Impedance {
            r_ohms_per_kft: r,
            x_ohms_per_kft: x,
        }
    }

    /// Smallest gauge with at least the required circular mils.
    ///
    /// Saturates at 1000 kcmil when the requirement exceeds every entry.
    pub fn at_least_circular_mils(required: f64) -> WireGauge {
        for gauge in Self::ALL.iter() {
            if gauge.circular_mils() >= required {
                return *gauge;
            }
        }
        WireGauge::Kcmil1000
    }
}

impl std::fmt::Display for WireGauge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_ordering_ascending() {
        let mut prev = 0.0;
        for gauge in WireGauge::ALL.iter() {
            assert!(gauge.circular_mils() > prev, "{} out of order", gauge);
            prev = gauge.circular_mils();
        }
    }

    #[test]
    fn test_gauge_code_roundtrip() {
        for gauge in WireGauge::ALL.iter() {
            assert_eq!(WireGauge::from_code(gauge.code()).unwrap(), *gauge);
        }
        assert!(WireGauge::from_code("18").is_err());
    }

    #[test]
    fn test_gauge_serde_uses_codes() {
        let json = serde_json::to_string(&WireGauge::Awg1_0).unwrap();
        assert_eq!(json, "\"1/0\"");
        let back: WireGauge = serde_json::from_str("\"250\"").unwrap();
        assert_eq!(back, WireGauge::Kcmil250);
    }

    #[test]
    fn test_nec_impedance_lookup() {
        let z = WireGauge::Awg12.nec_impedance(ConductorMaterial::Copper, Raceway::Pvc);
        assert_eq!(z.r_ohms_per_kft, 2.0);
        assert_eq!(z.x_ohms_per_kft, 0.054);

        let z = WireGauge::Awg3_0.nec_impedance(ConductorMaterial::Aluminum, Raceway::Steel);
        assert_eq!(z.r_ohms_per_kft, 0.13);
        assert_eq!(z.x_ohms_per_kft, 0.052);
    }

    #[test]
    fn test_effective_impedance_at_unity_pf() {
        let z = Impedance {
            r_ohms_per_kft: 0.5,
            x_ohms_per_kft: 0.05,
        };
        // cos(0) = 1, sin(0) = 0: reactance drops out entirely
        assert!((z.effective(1.0) - 0.5).abs() < 1e-12);
        // At PF 0.85 both terms contribute
        let phi = 0.85_f64.acos();
        let expected = 0.5 * phi.cos() + 0.05 * phi.sin();
        assert!((z.effective(0.85) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_at_least_circular_mils_selection() {
        assert_eq!(WireGauge::at_least_circular_mils(4000.0), WireGauge::Awg14);
        assert_eq!(WireGauge::at_least_circular_mils(4110.0), WireGauge::Awg14);
        assert_eq!(WireGauge::at_least_circular_mils(4111.0), WireGauge::Awg12);
        assert_eq!(
            WireGauge::at_least_circular_mils(9.9e6),
            WireGauge::Kcmil1000
        );
    }

    #[test]
    fn test_material_constants() {
        assert_eq!(ConductorMaterial::Copper.k_circular_mils(), 12.9);
        assert_eq!(ConductorMaterial::Aluminum.k_circular_mils(), 21.2);
        assert_eq!(EarthMaterial::Steel.adiabatic_k(), 52.0);
        assert!(ConductorMaterial::from_code("gold").is_err());
    }
}
