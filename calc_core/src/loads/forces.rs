//! # Member Force Tables
//!
//! Parses structural analysis output into per-member demands.
//!
//! ## Input Format
//!
//! One CSV row per (member, extremum). Columns are located by header name;
//! extra columns are ignored.
//!
//! | Column | Content |
//! |--------|---------|
//! | `Bar` | `"<id> / MAX"` or `"<id> / MIN"` |
//! | `Section` | `"<b>x<h>"` in inches |
//! | `FX (kip)`, `FY (kip)`, `FZ (kip)` | Forces |
//! | `MX (kip-ft)`, `MY (kip-ft)`, `MZ (kip-ft)` | Moments |
//!
//! ```text
//! Bar,Section,FX (kip),FY (kip),FZ (kip),MX (kip-ft),MY (kip-ft),MZ (kip-ft)
//! 1 / MAX,12x20,0,0,40,0,100,0
//! 1 / MIN,12x20,0,0,-35,0,-80,0
//! ```
//!
//! ## Reconciliation
//!
//! Rows are grouped by member id into a [`MemberDemand`]. When a member has
//! several rows of the same extremum the first one is kept, and the section
//! of the member's first row is used.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{KipFt, Kips};

static MEMBER_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<id>\d+)\s*/\s*(?P<extremum>MAX|MIN)").expect("valid member label regex"));

static SECTION_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<b>\d+)\s*x\s*(?P<h>\d+)").expect("valid section label regex"));

const FORCE_COLUMNS: [&str; 6] = [
    "FX (kip)",
    "FY (kip)",
    "FZ (kip)",
    "MX (kip-ft)",
    "MY (kip-ft)",
    "MZ (kip-ft)",
];

/// Which envelope a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Extremum {
    #[serde(rename = "MIN")]
    Min,
    #[serde(rename = "MAX")]
    Max,
}

impl Extremum {
    pub fn label(&self) -> &'static str {
        match self {
            Extremum::Min => "MIN",
            Extremum::Max => "MAX",
        }
    }
}

/// Six force and moment components at one envelope extreme.
///
/// `fx` is axial (positive in compression), `fz` is the vertical shear and
/// `my` the major-axis moment (positive for bottom-fiber tension).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ForceComponents {
    pub fx: Kips,
    pub fy: Kips,
    pub fz: Kips,
    pub mx: KipFt,
    pub my: KipFt,
    pub mz: KipFt,
}

/// One parsed row of a force table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceRecord {
    /// 1-based line number in the source text
    pub line: usize,
    pub member_id: u32,
    pub extremum: Extremum,
    pub width_in: f64,
    pub height_in: f64,
    pub forces: ForceComponents,
}

/// Reconciled demand for one member.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": 1,
///   "width_in": 12.0,
///   "height_in": 20.0,
///   "min": { "fx": 0.0, "fy": 0.0, "fz": -35.0, "mx": 0.0, "my": -80.0, "mz": 0.0 },
///   "max": { "fx": 0.0, "fy": 0.0, "fz": 40.0, "mx": 0.0, "my": 100.0, "mz": 0.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDemand {
    pub id: u32,
    pub width_in: f64,
    pub height_in: f64,
    pub min: Option<ForceComponents>,
    pub max: Option<ForceComponents>,
}

impl MemberDemand {
    pub fn new(id: u32, width_in: f64, height_in: f64) -> Self {
        Self {
            id,
            width_in,
            height_in,
            min: None,
            max: None,
        }
    }

    pub fn with_extreme(mut self, extremum: Extremum, forces: ForceComponents) -> Self {
        match extremum {
            Extremum::Min => self.min = Some(forces),
            Extremum::Max => self.max = Some(forces),
        }
        self
    }

    /// Sagging demand: `MAX MY` when it is positive.
    pub fn positive_moment(&self) -> Option<KipFt> {
        self.max.map(|f| f.my).filter(|m| m.0 > 0.0)
    }

    /// Hogging demand as a magnitude: `-MIN MY` when `MIN MY` is negative.
    pub fn negative_moment(&self) -> Option<KipFt> {
        self.min.map(|f| -f.my).filter(|m| m.0 > 0.0)
    }

    /// (axial, shear) pairs at both extremes that are present.
    pub fn shear_cases(&self) -> impl Iterator<Item = (Kips, Kips)> + '_ {
        [self.max, self.min].into_iter().flatten().map(|f| (f.fx, f.fz))
    }
}

/// Parse a member label such as `"12 / MAX"`.
pub fn parse_member_label(label: &str) -> Option<(u32, Extremum)> {
    let caps = MEMBER_LABEL.captures(label)?;
    let id = caps.name("id")?.as_str().parse().ok()?;
    let extremum = match caps.name("extremum")?.as_str() {
        "MAX" => Extremum::Max,
        _ => Extremum::Min,
    };
    Some((id, extremum))
}

/// Parse a section label such as `"12x20"` into (width, height) inches.
pub fn parse_section_label(label: &str) -> Option<(f64, f64)> {
    let caps = SECTION_LABEL.captures(label)?;
    let b = caps.name("b")?.as_str().parse().ok()?;
    let h = caps.name("h")?.as_str().parse().ok()?;
    Some((b, h))
}

/// All rows of a force table, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceTable {
    records: Vec<ForceRecord>,
}

impl ForceTable {
    pub fn new(records: Vec<ForceRecord>) -> Self {
        Self { records }
    }

    /// Parse CSV text with a header row.
    pub fn from_csv_str(text: &str) -> CalcResult<Self> {
        let mut lines = text.lines().enumerate();

        let header_line = lines
            .by_ref()
            .find(|(_, line)| !line.trim().is_empty())
            .map(|(_, line)| line)
            .ok_or_else(|| CalcError::missing_field("header row"))?;

        let headers: Vec<&str> = header_line.split(',').map(clean_cell).collect();
        let col_index = |name: &str| -> CalcResult<usize> {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| CalcError::missing_field(name))
        };

        let bar_idx = col_index("Bar")?;
        let section_idx = col_index("Section")?;
        let force_idx = FORCE_COLUMNS
            .iter()
            .map(|name| col_index(name))
            .collect::<CalcResult<Vec<_>>>()?;

        let mut records = Vec::new();
        for (index, line) in lines {
            let line_num = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(',').map(clean_cell).collect();
            let field = |idx: usize| fields.get(idx).copied().unwrap_or("");

            let bar = field(bar_idx);
            let (member_id, extremum) = parse_member_label(bar).ok_or_else(|| {
                CalcError::malformed_record(line_num, format!("Unrecognized member label '{}'", bar))
            })?;

            let section = field(section_idx);
            let (width_in, height_in) = parse_section_label(section).ok_or_else(|| {
                CalcError::malformed_record(line_num, format!("Unrecognized section label '{}'", section))
            })?;

            let mut values = [0.0; 6];
            for ((value, &idx), name) in values.iter_mut().zip(&force_idx).zip(FORCE_COLUMNS) {
                let cell = field(idx);
                *value = cell.parse::<f64>().map_err(|_| {
                    CalcError::malformed_record(line_num, format!("Non-numeric {} value '{}'", name, cell))
                })?;
            }

            records.push(ForceRecord {
                line: line_num,
                member_id,
                extremum,
                width_in,
                height_in,
                forces: ForceComponents {
                    fx: Kips(values[0]),
                    fy: Kips(values[1]),
                    fz: Kips(values[2]),
                    mx: KipFt(values[3]),
                    my: KipFt(values[4]),
                    mz: KipFt(values[5]),
                },
            });
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[ForceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Reconcile rows into one demand per member, ordered by member id.
    pub fn member_demands(&self) -> Vec<MemberDemand> {
        let mut by_id: BTreeMap<u32, MemberDemand> = BTreeMap::new();

        for record in &self.records {
            let demand = by_id
                .entry(record.member_id)
                .or_insert_with(|| MemberDemand::new(record.member_id, record.width_in, record.height_in));

            let slot = match record.extremum {
                Extremum::Min => &mut demand.min,
                Extremum::Max => &mut demand.max,
            };
            if slot.is_none() {
                *slot = Some(record.forces);
            }
        }

        by_id.into_values().collect()
    }
}

fn clean_cell(cell: &str) -> &str {
    cell.trim().trim_matches('"').trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Bar,Section,FX (kip),FY (kip),FZ (kip),MX (kip-ft),MY (kip-ft),MZ (kip-ft)";

    #[test]
    fn test_parse_labels() {
        assert_eq!(parse_member_label("12 / MAX"), Some((12, Extremum::Max)));
        assert_eq!(parse_member_label("7/MIN"), Some((7, Extremum::Min)));
        assert_eq!(parse_member_label("B7 MID"), None);

        assert_eq!(parse_section_label("12x20"), Some((12.0, 20.0)));
        assert_eq!(parse_section_label("14 x 24"), Some((14.0, 24.0)));
        assert_eq!(parse_section_label("W12x26x"), Some((12.0, 26.0)));
        assert_eq!(parse_section_label("round"), None);
    }

    #[test]
    fn test_from_csv_str() {
        let text = format!(
            "{HEADER}\n1 / MAX,12x20,0,0,40,0,100,0\n1 / MIN,12x20,-5,0,-35,0,-80,0\n\n2 / MAX,\"14x24\",10,0,20,0,50,0\n"
        );
        let table = ForceTable::from_csv_str(&text).unwrap();
        assert_eq!(table.len(), 3);

        let first = &table.records()[0];
        assert_eq!(first.line, 2);
        assert_eq!(first.member_id, 1);
        assert_eq!(first.forces.my, KipFt(100.0));
        assert_eq!(table.records()[2].line, 5);
        assert_eq!(table.records()[2].width_in, 14.0);
    }

    #[test]
    fn test_columns_located_by_header() {
        let text = "Case,MY (kip-ft),Section,Bar,FX (kip),FY (kip),FZ (kip),MX (kip-ft),MZ (kip-ft)\n\
                    LC1,75,12x18,3 / MAX,1,2,3,4,5\n";
        let table = ForceTable::from_csv_str(text).unwrap();
        let forces = table.records()[0].forces;
        assert_eq!(forces.my, KipFt(75.0));
        assert_eq!(forces.fx, Kips(1.0));
        assert_eq!(forces.mz, KipFt(5.0));
    }

    #[test]
    fn test_malformed_records_report_line() {
        let text = format!("{HEADER}\n1 / MAX,12x20,0,0,40,0,100,0\nbeam one,12x20,0,0,40,0,100,0\n");
        match ForceTable::from_csv_str(&text) {
            Err(CalcError::MalformedRecord { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected MalformedRecord, got {:?}", other),
        }

        let text = format!("{HEADER}\n1 / MAX,12x20,0,0,forty,0,100,0\n");
        assert!(matches!(
            ForceTable::from_csv_str(&text),
            Err(CalcError::MalformedRecord { line: 2, .. })
        ));

        let text = format!("{HEADER}\n1 / MAX,circle,0,0,40,0,100,0\n");
        assert!(ForceTable::from_csv_str(&text).is_err());
    }

    #[test]
    fn test_missing_column() {
        let text = "Bar,Section,FX (kip)\n1 / MAX,12x20,0\n";
        assert!(matches!(
            ForceTable::from_csv_str(text),
            Err(CalcError::MissingField { .. })
        ));
        assert!(ForceTable::from_csv_str("").is_err());
    }

    #[test]
    fn test_member_demands_first_record_wins() {
        let text = format!(
            "{HEADER}\n\
             2 / MAX,12x20,0,0,10,0,50,0\n\
             1 / MIN,12x24,0,0,-30,0,-60,0\n\
             1 / MAX,12x20,0,0,40,0,100,0\n\
             1 / MAX,12x20,0,0,99,0,999,0\n"
        );
        let demands = ForceTable::from_csv_str(&text).unwrap().member_demands();

        assert_eq!(demands.len(), 2);
        assert_eq!(demands[0].id, 1);
        assert_eq!(demands[0].height_in, 24.0);
        assert_eq!(demands[0].max.unwrap().my, KipFt(100.0));
        assert_eq!(demands[0].min.unwrap().my, KipFt(-60.0));
        assert_eq!(demands[1].id, 2);
        assert!(demands[1].min.is_none());
    }

    #[test]
    fn test_moment_demands() {
        let forces = |my: f64| ForceComponents { my: KipFt(my), ..Default::default() };
        let demand = MemberDemand::new(1, 12.0, 20.0)
            .with_extreme(Extremum::Max, forces(100.0))
            .with_extreme(Extremum::Min, forces(-80.0));
        assert_eq!(demand.positive_moment(), Some(KipFt(100.0)));
        assert_eq!(demand.negative_moment(), Some(KipFt(80.0)));

        let sagging_only = MemberDemand::new(2, 12.0, 20.0)
            .with_extreme(Extremum::Max, forces(100.0))
            .with_extreme(Extremum::Min, forces(20.0));
        assert_eq!(sagging_only.negative_moment(), None);
        assert_eq!(sagging_only.shear_cases().count(), 2);
    }
}
