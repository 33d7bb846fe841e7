//! # Design Settings and Reports
//!
//! `DesignSettings` holds the material constants and detailing choices for a
//! run. `DesignReport` is the root container written at the end of a run:
//! it records who ran it, the settings used, the equations applied, and
//! every member design. Both serialize as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! DesignReport
//! ├── meta: ReportMetadata (version, engineer, job id, timestamp)
//! ├── settings: DesignSettings (materials, stirrup bar)
//! ├── equations: Vec<Equation> (unique, first-use order)
//! └── designs: BTreeMap<u32, MemberDesign>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use calc_core::project::{DesignReport, DesignSettings};
//!
//! let report = DesignReport::new("Jane Engineer", "25-042", DesignSettings::default(), BTreeMap::new());
//!
//! let json = serde_json::to_string_pretty(&report).unwrap();
//! assert!(json.contains("25-042"));
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::MemberDesign;
use crate::equations::registry::{Equation, EquationTracker};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{ConcreteDesignProperties, RebarCatalog};

/// Current schema version for settings and report files
pub const SCHEMA_VERSION: &str = "0.1.0";

fn default_version() -> String {
    SCHEMA_VERSION.to_string()
}

fn default_stirrup_bar() -> u8 {
    3
}

/// Settings for a design run.
///
/// Every field has a default, so a settings file only needs the values it
/// changes.
///
/// ## JSON Example
///
/// ```json
/// {
///   "version": "0.1.0",
///   "materials": { "f_prime_c_psi": 5000.0, "cover_in": 2.0 },
///   "stirrup_bar": 4
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSettings {
    /// Schema version (for migration compatibility)
    #[serde(default = "default_version")]
    pub version: String,

    /// Concrete and steel properties
    #[serde(default)]
    pub materials: ConcreteDesignProperties,

    /// Bar number used for two-legged stirrups
    #[serde(default = "default_stirrup_bar")]
    pub stirrup_bar: u8,
}

impl Default for DesignSettings {
    fn default() -> Self {
        DesignSettings {
            version: default_version(),
            materials: ConcreteDesignProperties::default(),
            stirrup_bar: default_stirrup_bar(),
        }
    }
}

impl DesignSettings {
    /// Validate materials and check that the stirrup bar is in the catalog.
    pub fn validate(&self) -> CalcResult<()> {
        self.materials.validate()?;
        if RebarCatalog::standard().get(self.stirrup_bar).is_none() {
            return Err(CalcError::invalid_input(
                "stirrup_bar",
                self.stirrup_bar.to_string(),
                "Not a bar size in the standard catalog",
            ));
        }
        Ok(())
    }
}

/// Report metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Schema version
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// When the report was generated
    pub created: DateTime<Utc>,
}

/// Root container for the results of a design run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignReport {
    pub meta: ReportMetadata,

    pub settings: DesignSettings,

    /// Equations applied anywhere in the run
    pub equations: Vec<Equation>,

    /// Member designs keyed by member id
    pub designs: BTreeMap<u32, MemberDesign>,
}

impl DesignReport {
    /// Assemble a report and collect the equations used by the designs.
    pub fn new(
        engineer: impl Into<String>,
        job_id: impl Into<String>,
        settings: DesignSettings,
        designs: BTreeMap<u32, MemberDesign>,
    ) -> Self {
        let mut tracker = EquationTracker::new();
        for design in designs.values() {
            design.record_equations(&mut tracker);
        }

        DesignReport {
            meta: ReportMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                created: Utc::now(),
            },
            settings,
            equations: tracker.unique_equations(),
            designs,
        }
    }

    pub fn member_count(&self) -> usize {
        self.designs.len()
    }

    /// Members with at least one design issue.
    pub fn members_needing_review(&self) -> Vec<u32> {
        self.designs
            .values()
            .filter(|design| design.needs_review())
            .map(|design| design.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = DesignSettings::default();
        assert_eq!(settings.version, SCHEMA_VERSION);
        assert_eq!(settings.stirrup_bar, 3);
        assert_eq!(settings.materials.f_prime_c_psi, 4000.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_settings_file() {
        let json = r#"{ "materials": { "f_prime_c_psi": 5000.0 }, "stirrup_bar": 4 }"#;
        let settings: DesignSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.version, SCHEMA_VERSION);
        assert_eq!(settings.stirrup_bar, 4);
        assert_eq!(settings.materials.f_prime_c_psi, 5000.0);
        assert_eq!(settings.materials.f_y_psi, 60000.0);
        assert!((settings.materials.beta_1() - 0.80).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_stirrup_bar() {
        let settings = DesignSettings {
            stirrup_bar: 2,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(CalcError::InvalidInput { ref field, .. }) if field == "stirrup_bar"
        ));
    }

    #[test]
    fn test_report_serialization() {
        let report = DesignReport::new("Jane Engineer", "25-042", DesignSettings::default(), BTreeMap::new());
        let json = serde_json::to_string_pretty(&report).unwrap();

        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("\"stirrup_bar\": 3"));

        let roundtrip: DesignReport = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.job_id, "25-042");
        assert_eq!(roundtrip.member_count(), 0);
        assert!(roundtrip.members_needing_review().is_empty());
    }
}
