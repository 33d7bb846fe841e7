//! # File I/O Module
//!
//! Reads force tables and settings, writes design results:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility of settings and reports
//!
//! ## File Formats
//!
//! - Force tables and results are CSV (see [`crate::loads::forces`] for the
//!   input columns and [`RESULT_COLUMNS`] for the output columns)
//! - Settings and reports are JSON
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::calculations::{design_members, DesignContext};
//! use calc_core::file_io::{load_settings, read_force_table, write_results_csv};
//! use std::path::Path;
//!
//! let settings = load_settings(Path::new("settings.json"))?;
//! let context = DesignContext::new(settings)?;
//!
//! let table = read_force_table(Path::new("forces.csv"))?;
//! let designs = design_members(&table.member_demands(), &context);
//!
//! write_results_csv(&designs, Path::new("output.csv"))?;
//! # Ok::<(), calc_core::errors::CalcError>(())
//! ```

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::calculations::MemberDesign;
use crate::errors::{CalcError, CalcResult};
use crate::loads::{ForceComponents, ForceTable};
use crate::project::{DesignReport, DesignSettings, SCHEMA_VERSION};

/// Column headers of the results CSV, in order.
pub const RESULT_COLUMNS: [&str; 27] = [
    "ID",
    "B",
    "H",
    "MIN FX",
    "MAX FX",
    "MIN FY",
    "MAX FY",
    "MIN FZ",
    "MAX FZ",
    "MIN MX",
    "MAX MX",
    "MIN MY",
    "MAX MY",
    "MIN MZ",
    "MAX MZ",
    "REQUIRED AREA TOP",
    "REQUIRED AREA BOTTOM",
    "STIRRUP SPACING",
    "BAR TYPE TOP",
    "BAR COUNT TOP",
    "PROVIDED AREA TOP",
    "BAR TYPE BOTTOM",
    "BAR COUNT BOTTOM",
    "PROVIDED AREA BOTTOM",
    "EFFICIENCY MIN MY",
    "EFFICIENCY MAX MY",
    "ISSUES",
];

/// Read and parse a force table CSV.
pub fn read_force_table(path: &Path) -> CalcResult<ForceTable> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    let table = ForceTable::from_csv_str(&contents)?;
    info!(path = %path.display(), records = table.len(), "read force table");
    Ok(table)
}

/// Load design settings from a JSON file and validate them.
///
/// Missing fields take their defaults.
pub fn load_settings(path: &Path) -> CalcResult<DesignSettings> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let settings: DesignSettings = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    validate_version(&settings.version)?;
    settings.validate()?;
    Ok(settings)
}

/// Render designs as results CSV text.
///
/// Undefined values (no required area, no stirrup spacing, missing
/// extreme) are empty cells.
pub fn results_csv(designs: &BTreeMap<u32, MemberDesign>) -> String {
    let mut output = RESULT_COLUMNS.join(",");
    output.push('\n');

    for design in designs.values() {
        let demand = &design.demand;
        let mut row: Vec<String> = vec![
            design.id.to_string(),
            demand.width_in.to_string(),
            demand.height_in.to_string(),
        ];

        let component = |forces: Option<ForceComponents>, pick: fn(&ForceComponents) -> f64| {
            optional_cell(forces.as_ref().map(pick))
        };
        let picks: [fn(&ForceComponents) -> f64; 6] = [
            |f| f.fx.0,
            |f| f.fy.0,
            |f| f.fz.0,
            |f| f.mx.0,
            |f| f.my.0,
            |f| f.mz.0,
        ];
        for pick in picks {
            row.push(component(demand.min, pick));
            row.push(component(demand.max, pick));
        }

        row.push(optional_cell(design.required.top_in2));
        row.push(optional_cell(design.required.bottom_in2));
        row.push(optional_cell(design.stirrup_spacing_in()));
        for selection in [&design.top, &design.bottom] {
            row.push(selection.bar_size.to_string());
            row.push(selection.count.to_string());
            row.push(selection.provided_area_in2.to_string());
        }
        row.push(design.efficiency_min_my().to_string());
        row.push(design.efficiency_max_my().to_string());

        let issues: Vec<String> = design.issues.iter().map(|issue| issue.to_string()).collect();
        row.push(quoted_cell(&issues.join("; ")));

        output.push_str(&row.join(","));
        output.push('\n');
    }

    output
}

/// Write designs to a results CSV file atomically.
pub fn write_results_csv(designs: &BTreeMap<u32, MemberDesign>, path: &Path) -> CalcResult<()> {
    write_atomic(path, results_csv(designs).as_bytes())?;
    info!(path = %path.display(), members = designs.len(), "wrote results");
    Ok(())
}

/// Save a design report as pretty JSON, atomically.
///
/// # Example
///
/// ```rust,no_run
/// use std::collections::BTreeMap;
/// use calc_core::file_io::save_report;
/// use calc_core::project::{DesignReport, DesignSettings};
/// use std::path::Path;
///
/// let report = DesignReport::new("Engineer", "25-001", DesignSettings::default(), BTreeMap::new());
/// save_report(&report, Path::new("report.json"))?;
/// # Ok::<(), calc_core::errors::CalcError>(())
/// ```
pub fn save_report(report: &DesignReport, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(report).map_err(|e| CalcError::serialization(e.to_string()))?;
    write_atomic(path, json.as_bytes())
}

/// Load a design report.
///
/// # Returns
///
/// * `Ok(DesignReport)` - Successfully loaded report
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_report(path: &Path) -> CalcResult<DesignReport> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let report: DesignReport = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    validate_version(&report.meta.version)?;
    Ok(report)
}

/// Write to `<path>.tmp`, sync, then rename over `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        // Clean up temp file if rename fails
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

fn optional_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn quoted_cell(text: &str) -> String {
    if text.contains([',', '"', '\n']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    // Parse semver-style versions
    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions, a newer minor version is not readable
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{design_members, DesignContext};
    use crate::loads::{Extremum, MemberDemand};
    use crate::units::{KipFt, Kips};
    use tempfile::tempdir;

    fn sample_designs() -> BTreeMap<u32, MemberDesign> {
        let demand = MemberDemand::new(1, 12.0, 20.0).with_extreme(
            Extremum::Max,
            ForceComponents {
                fz: Kips(8.0),
                my: KipFt(100.0),
                ..Default::default()
            },
        );
        design_members(&[demand], &DesignContext::default())
    }

    #[test]
    fn test_results_csv_layout() {
        let csv = results_csv(&sample_designs());
        let mut lines = csv.lines();

        let header: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(header.len(), RESULT_COLUMNS.len());
        assert_eq!(header[0], "ID");

        let row: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(row[0], "1");
        assert_eq!(row[1], "12");
        // No MIN record: MIN columns are empty, MAX MY carries the demand
        assert_eq!(row[3], "");
        assert_eq!(row[12], "100");
        assert_eq!(row[18], "3");
        assert_eq!(row[24], "1");
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_write_results_is_atomic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.csv");

        write_results_csv(&sample_designs(), &path).unwrap();

        assert!(path.exists());
        assert!(!tmp_path_for(&path).exists());
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("ID,B,H,"));
    }

    #[test]
    fn test_report_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");

        let report = DesignReport::new("Test Engineer", "TEST-001", DesignSettings::default(), sample_designs());
        save_report(&report, &path).unwrap();

        let loaded = load_report(&path).unwrap();
        assert_eq!(loaded.meta.engineer, "Test Engineer");
        assert_eq!(loaded.designs.len(), 1);
        assert_eq!(loaded.designs[&1].bottom, report.designs[&1].bottom);
        assert!(!loaded.equations.is_empty());
    }

    #[test]
    fn test_load_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "version": "0.1.0", "materials": { "cover_in": 2.0 } }"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.materials.cover_in, 2.0);
        assert_eq!(settings.stirrup_bar, 3);

        fs::write(&path, r#"{ "version": "1.0.0" }"#).unwrap();
        assert!(matches!(load_settings(&path), Err(CalcError::VersionMismatch { .. })));

        fs::write(&path, r#"{ "materials": { "f_y_psi": -1.0 } }"#).unwrap();
        assert!(matches!(load_settings(&path), Err(CalcError::InvalidInput { .. })));

        assert!(matches!(
            load_settings(&dir.path().join("missing.json")),
            Err(CalcError::FileError { .. })
        ));
    }

    #[test]
    fn test_quoted_cell() {
        assert_eq!(quoted_cell("plain"), "plain");
        assert_eq!(quoted_cell("a, b"), "\"a, b\"");
        assert_eq!(quoted_cell("say \"hi\", ok"), "\"say \"\"hi\"\", ok\"");
    }

    #[test]
    fn test_version_validation() {
        // Same version should pass
        assert!(validate_version(SCHEMA_VERSION).is_ok());

        // Same major.minor should pass
        assert!(validate_version("0.1.5").is_ok());

        // Different major should fail
        assert!(validate_version("1.0.0").is_err());

        // Newer minor (in 0.x) should fail
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
