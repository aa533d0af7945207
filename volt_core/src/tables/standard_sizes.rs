//! Standard Equipment Sizes
//!
//! Ascending ladders of commercially available ratings, and the one
//! selection policy shared by every sizing calculator: pick the smallest
//! entry at least as large as the theoretical requirement, saturating at
//! the largest entry when nothing qualifies.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Standard molded-case and air breaker ampere steps (IEC preferred values)
pub const BREAKER_AMP_STEPS: [f64; 29] = [
    6.0, 10.0, 16.0, 20.0, 25.0, 32.0, 40.0, 50.0, 63.0, 80.0, 100.0, 125.0, 160.0, 200.0,
    250.0, 320.0, 400.0, 500.0, 630.0, 800.0, 1000.0, 1250.0, 1600.0, 2000.0, 2500.0, 3200.0,
    4000.0, 5000.0, 6300.0,
];

/// Standard three-phase distribution transformer ratings (kVA)
pub const TRANSFORMER_KVA_RATINGS: [f64; 15] = [
    15.0, 30.0, 45.0, 75.0, 112.5, 150.0, 225.0, 300.0, 500.0, 750.0, 1000.0, 1500.0, 2000.0,
    2500.0, 3000.0,
];

/// Standard diesel genset ratings (kVA)
pub const GENERATOR_KVA_RATINGS: [f64; 21] = [
    10.0, 15.0, 20.0, 30.0, 45.0, 60.0, 80.0, 100.0, 125.0, 150.0, 200.0, 250.0, 300.0, 400.0,
    500.0, 600.0, 750.0, 1000.0, 1250.0, 1500.0, 2000.0,
];

/// Standard UPS frame ratings (kVA)
pub const UPS_KVA_RATINGS: [f64; 16] = [
    1.0, 2.0, 3.0, 5.0, 6.0, 10.0, 15.0, 20.0, 30.0, 40.0, 60.0, 80.0, 100.0, 120.0, 160.0,
    200.0,
];

/// Standard capacitor bank steps (kVAR)
pub const CAPACITOR_KVAR_STEPS: [f64; 19] = [
    2.5, 5.0, 7.5, 10.0, 12.5, 15.0, 20.0, 25.0, 30.0, 40.0, 50.0, 60.0, 75.0, 100.0, 125.0,
    150.0, 200.0, 250.0, 300.0,
];

/// Standard earthing conductor cross-sections (mm2, IEC cable sizes)
pub const EARTH_CONDUCTOR_MM2: [f64; 19] = [
    1.5, 2.5, 4.0, 6.0, 10.0, 16.0, 25.0, 35.0, 50.0, 70.0, 95.0, 120.0, 150.0, 185.0, 240.0,
    300.0, 400.0, 500.0, 630.0,
];

/// Standard sealed lead-acid battery capacities (Ah)
pub const BATTERY_AH: [f64; 12] = [
    7.0, 12.0, 18.0, 26.0, 40.0, 55.0, 65.0, 80.0, 100.0, 120.0, 150.0, 200.0,
];

/// Standard cable tray widths (mm)
pub const TRAY_WIDTHS_MM: [f64; 9] = [
    50.0, 100.0, 150.0, 200.0, 300.0, 450.0, 600.0, 750.0, 900.0,
];

/// Smallest ladder entry >= `required`, saturating at the largest entry.
///
/// Every sizing calculator routes through this, which is what makes
/// selection monotone non-decreasing in the requirement.
pub fn select_at_least(ladder: &[f64], required: f64) -> f64 {
    for entry in ladder {
        if *entry >= required {
            return *entry;
        }
    }
    ladder.last().copied().unwrap_or(required)
}

/// A standard rectangular busbar section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BusbarSection {
    pub width_mm: f64,
    pub thickness_mm: f64,
}

impl BusbarSection {
    /// Cross-sectional area (mm2)
    pub fn area_mm2(&self) -> f64 {
        self.width_mm * self.thickness_mm
    }

    /// Get display name (e.g., "60 x 10 mm")
    pub fn display_name(&self) -> String {
        format!("{} x {} mm", self.width_mm, self.thickness_mm)
    }

    /// Smallest standard section with at least the required area,
    /// saturating at the largest bar.
    pub fn at_least_area(required_mm2: f64) -> BusbarSection {
        for section in BUSBAR_SECTIONS.iter() {
            if section.area_mm2() >= required_mm2 {
                return *section;
            }
        }
        BUSBAR_SECTIONS[BUSBAR_SECTIONS.len() - 1]
    }
}

impl std::fmt::Display for BusbarSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

const fn bar(width_mm: f64, thickness_mm: f64) -> BusbarSection {
    BusbarSection {
        width_mm,
        thickness_mm,
    }
}

/// Standard busbar sections, ascending by area
pub const BUSBAR_SECTIONS: [BusbarSection; 13] = [
    bar(20.0, 5.0),
    bar(25.0, 5.0),
    bar(30.0, 5.0),
    bar(40.0, 5.0),
    bar(50.0, 5.0),
    bar(40.0, 10.0),
    bar(50.0, 10.0),
    bar(60.0, 10.0),
    bar(80.0, 10.0),
    bar(100.0, 10.0),
    bar(120.0, 10.0),
    bar(160.0, 10.0),
    bar(200.0, 10.0),
];

/// An EMT conduit trade size with its internal area (NEC Chapter 9 Table 4).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConduitSize {
    /// Trade-size designation (e.g., "3/4")
    pub designation: &'static str,
    /// Total internal area (in2)
    pub internal_area_in2: f64,
}

/// EMT conduit trade sizes, ascending
pub const CONDUIT_SIZES: [ConduitSize; 10] = [
    ConduitSize {
        designation: "1/2",
        internal_area_in2: 0.304,
    },
    ConduitSize {
        designation: "3/4",
        internal_area_in2: 0.533,
    },
    ConduitSize {
        designation: "1",
        internal_area_in2: 0.864,
    },
    ConduitSize {
        designation: "1-1/4",
        internal_area_in2: 1.496,
    },
    ConduitSize {
        designation: "1-1/2",
        internal_area_in2: 2.036,
    },
    ConduitSize {
        designation: "2",
        internal_area_in2: 3.356,
    },
    ConduitSize {
        designation: "2-1/2",
        internal_area_in2: 5.858,
    },
    ConduitSize {
        designation: "3",
        internal_area_in2: 8.846,
    },
    ConduitSize {
        designation: "3-1/2",
        internal_area_in2: 11.545,
    },
    ConduitSize {
        designation: "4",
        internal_area_in2: 14.753,
    },
];

impl ConduitSize {
    /// Schema option codes for every trade size
    pub fn codes() -> Vec<&'static str> {
        CONDUIT_SIZES.iter().map(|c| c.designation).collect()
    }

    /// Parse from a schema choice value
    pub fn from_code(s: &str) -> CalcResult<Self> {
        CONDUIT_SIZES
            .iter()
            .copied()
            .find(|c| c.designation == s)
            .ok_or_else(|| CalcError::lookup_miss("conduit_size", s))
    }

    /// Smallest trade size whose usable area (internal area times the fill
    /// limit) holds the given conductor area, saturating at 4 inch.
    pub fn at_least_fill(conductor_area_in2: f64, fill_limit: f64) -> ConduitSize {
        for size in CONDUIT_SIZES.iter() {
            if size.internal_area_in2 * fill_limit >= conductor_area_in2 {
                return *size;
            }
        }
        CONDUIT_SIZES[CONDUIT_SIZES.len() - 1]
    }
}

impl std::fmt::Display for ConduitSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\"", self.designation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladders_strictly_ascending() {
        let ladders: [&[f64]; 8] = [
            &BREAKER_AMP_STEPS,
            &TRANSFORMER_KVA_RATINGS,
            &GENERATOR_KVA_RATINGS,
            &UPS_KVA_RATINGS,
            &CAPACITOR_KVAR_STEPS,
            &EARTH_CONDUCTOR_MM2,
            &BATTERY_AH,
            &TRAY_WIDTHS_MM,
        ];
        for ladder in ladders {
            for pair in ladder.windows(2) {
                assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
            }
        }
        for pair in BUSBAR_SECTIONS.windows(2) {
            assert!(pair[0].area_mm2() < pair[1].area_mm2());
        }
        for pair in CONDUIT_SIZES.windows(2) {
            assert!(pair[0].internal_area_in2 < pair[1].internal_area_in2);
        }
    }

    #[test]
    fn test_select_at_least_basic() {
        assert_eq!(select_at_least(&TRANSFORMER_KVA_RATINGS, 432.0), 500.0);
        assert_eq!(select_at_least(&TRANSFORMER_KVA_RATINGS, 500.0), 500.0);
        assert_eq!(select_at_least(&BREAKER_AMP_STEPS, 101.0), 125.0);
        assert_eq!(select_at_least(&BREAKER_AMP_STEPS, 0.0), 6.0);
    }

    #[test]
    fn test_select_saturates_at_ladder_maximum() {
        assert_eq!(select_at_least(&TRANSFORMER_KVA_RATINGS, 1.0e9), 3000.0);
        assert_eq!(select_at_least(&BREAKER_AMP_STEPS, 1.0e9), 6300.0);
        assert_eq!(BusbarSection::at_least_area(1.0e9), bar(200.0, 10.0));
    }

    #[test]
    fn test_selection_is_monotone() {
        // Increasing the requirement never decreases the selected size
        let mut prev = 0.0;
        for step in 0..4000 {
            let required = step as f64;
            let selected = select_at_least(&TRANSFORMER_KVA_RATINGS, required);
            assert!(selected >= prev);
            prev = selected;
        }
    }

    #[test]
    fn test_busbar_selection() {
        // 1000 A copper at 1.2 A/mm2 needs 833 mm2: first bar >= is 100x10
        let section = BusbarSection::at_least_area(833.3);
        assert_eq!(section, bar(100.0, 10.0));
        assert_eq!(section.display_name(), "100 x 10 mm");
    }

    #[test]
    fn test_conduit_selection() {
        // Nine 12 AWG THHN at 40% fill: 9 * 0.0133 = 0.1197 in2 needed,
        // 1/2" offers 0.304 * 0.40 = 0.1216 in2
        let size = ConduitSize::at_least_fill(0.1197, 0.40);
        assert_eq!(size.designation, "1/2");

        let size = ConduitSize::at_least_fill(0.13, 0.40);
        assert_eq!(size.designation, "3/4");

        assert!(ConduitSize::from_code("5").is_err());
        assert_eq!(ConduitSize::from_code("1-1/4").unwrap().designation, "1-1/4");
    }
}
