//! # calc_core - Reinforced Concrete Beam Design Engine
//!
//! `calc_core` designs rectangular reinforced concrete members from a table of
//! analysis forces: required flexural steel, bar layouts on both faces,
//! stirrup spacing, and a capacity check of the chosen layout. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Outcomes as values**: "no equilibrium" and "no layout fits" are
//!   recorded on the design, not raised as errors
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::{design_members, DesignContext};
//! use calc_core::loads::ForceTable;
//!
//! let csv = "\
//! Bar,Section,FX (kip),FY (kip),FZ (kip),MX (kip-ft),MY (kip-ft),MZ (kip-ft)
//! 1 / MAX,12x20,0,0,10,0,120,0
//! 1 / MIN,12x20,0,0,-10,0,-60,0
//! ";
//!
//! let table = ForceTable::from_csv_str(csv).unwrap();
//! let designs = design_members(&table.member_demands(), &DesignContext::default());
//!
//! let member = &designs[&1];
//! assert!(member.bottom.provided_area_in2 >= member.required.bottom_in2.unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`loads`] - Force table parsing and per-member demand envelopes
//! - [`calculations`] - Section solvers and the member design pipeline
//! - [`equations`] - Code equations and the equation registry
//! - [`materials`] - Concrete properties and the rebar catalog
//! - [`project`] - Design settings and the run report
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - CSV/JSON reading and atomic writes

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod loads;
pub mod materials;
pub mod project;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_report, load_settings, read_force_table, save_report, write_results_csv};
pub use project::{DesignReport, DesignSettings, ReportMetadata};
