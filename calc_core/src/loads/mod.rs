//! Structural analysis demands on beam members
//!
//! Force tables come out of an analysis program as one row per member and
//! envelope extreme. This module parses them and reconciles the rows into
//! one [`MemberDemand`] per member.
//!
//! # Example
//!
//! ```
//! use calc_core::loads::ForceTable;
//!
//! let csv = "Bar,Section,FX (kip),FY (kip),FZ (kip),MX (kip-ft),MY (kip-ft),MZ (kip-ft)\n\
//!            1 / MAX,12x20,0,0,40,0,100,0\n\
//!            1 / MIN,12x20,0,0,-35,0,-80,0\n";
//!
//! let demands = ForceTable::from_csv_str(csv).unwrap().member_demands();
//! assert_eq!(demands.len(), 1);
//! assert_eq!(demands[0].negative_moment().unwrap().0, 80.0);
//! ```

pub mod forces;

pub use forces::{
    parse_member_label,
    parse_section_label,
    Extremum,
    ForceComponents,
    ForceRecord,
    ForceTable,
    MemberDemand,
};
