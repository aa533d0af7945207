//! PPE Category Thresholds (NFPA 70E)
//!
//! Classification of arc-flash incident energy into personal protective
//! equipment tiers. Thresholds are half-open: a value exactly on a
//! boundary belongs to the higher category.

use serde::{Deserialize, Serialize};

/// NFPA 70E personal-protective-equipment tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PpeCategory {
    Category0,
    Category1,
    Category2,
    Category3,
    Category4,
    /// Beyond category 4 - no PPE rating, de-energize before work
    Extreme,
}

impl PpeCategory {
    /// All tiers, lowest energy first
    pub const ALL: [PpeCategory; 6] = [
        PpeCategory::Category0,
        PpeCategory::Category1,
        PpeCategory::Category2,
        PpeCategory::Category3,
        PpeCategory::Category4,
        PpeCategory::Extreme,
    ];

    /// Classify an incident energy (cal/cm2).
    ///
    /// Boundaries are exclusive of the lower category: exactly 1.2 cal/cm2
    /// is Category 1, not Category 0.
    pub fn classify(incident_energy_cal_cm2: f64) -> PpeCategory {
        let e = incident_energy_cal_cm2;
        if e < 1.2 {
            PpeCategory::Category0
        } else if e < 4.0 {
            PpeCategory::Category1
        } else if e < 8.0 {
            PpeCategory::Category2
        } else if e < 25.0 {
            PpeCategory::Category3
        } else if e < 40.0 {
            PpeCategory::Category4
        } else {
            PpeCategory::Extreme
        }
    }

    /// Numeric tier (0-4), or None for the beyond-rating tier
    pub fn number(&self) -> Option<u8> {
        match self {
            PpeCategory::Category0 => Some(0),
            PpeCategory::Category1 => Some(1),
            PpeCategory::Category2 => Some(2),
            PpeCategory::Category3 => Some(3),
            PpeCategory::Category4 => Some(4),
            PpeCategory::Extreme => None,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            PpeCategory::Category0 => "Category 0",
            PpeCategory::Category1 => "Category 1",
            PpeCategory::Category2 => "Category 2",
            PpeCategory::Category3 => "Category 3",
            PpeCategory::Category4 => "Category 4",
            PpeCategory::Extreme => "Above Category 4 - de-energize",
        }
    }

    /// Minimum arc rating of required clothing (cal/cm2)
    pub fn required_arc_rating(&self) -> Option<f64> {
        match self {
            PpeCategory::Category0 => None,
            PpeCategory::Category1 => Some(4.0),
            PpeCategory::Category2 => Some(8.0),
            PpeCategory::Category3 => Some(25.0),
            PpeCategory::Category4 => Some(40.0),
            PpeCategory::Extreme => None,
        }
    }
}

impl std::fmt::Display for PpeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_bands() {
        assert_eq!(PpeCategory::classify(0.5), PpeCategory::Category0);
        assert_eq!(PpeCategory::classify(2.0), PpeCategory::Category1);
        assert_eq!(PpeCategory::classify(6.5), PpeCategory::Category2);
        assert_eq!(PpeCategory::classify(20.0), PpeCategory::Category3);
        assert_eq!(PpeCategory::classify(39.9), PpeCategory::Category4);
        assert_eq!(PpeCategory::classify(120.0), PpeCategory::Extreme);
    }

    #[test]
    fn test_boundaries_belong_to_higher_category() {
        assert_eq!(PpeCategory::classify(1.2), PpeCategory::Category1);
        assert_eq!(PpeCategory::classify(4.0), PpeCategory::Category2);
        assert_eq!(PpeCategory::classify(8.0), PpeCategory::Category3);
        assert_eq!(PpeCategory::classify(25.0), PpeCategory::Category4);
        assert_eq!(PpeCategory::classify(40.0), PpeCategory::Extreme);
    }

    #[test]
    fn test_tiers_are_ordered() {
        for pair in PpeCategory::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(PpeCategory::Category2.number(), Some(2));
        assert_eq!(PpeCategory::Extreme.number(), None);
    }
}
