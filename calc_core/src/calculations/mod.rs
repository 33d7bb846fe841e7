//! # Structural Calculations
//!
//! Section solvers and the member design pipeline built on them. Each solver
//! is a pure function of its inputs and the material properties:
//!
//! - Inputs are plain numbers and small `Copy` structs (JSON-serializable)
//! - Results are typed outcomes; "no solution" is a value, not an error
//!
//! ## Available Calculations
//!
//! - [`flexure`] - Required steel for a moment and capacity check of a layout
//! - [`shear`] - Stirrup spacing for shear with axial force
//! - [`member`] - Full design of one member from its demand
//! - [`batch`] - Parallel design of many members

pub mod batch;
pub mod flexure;
pub mod member;
pub mod shear;

// Re-export commonly used types
pub use batch::design_members;
pub use flexure::{
    check_doubly_reinforced_design, doubly_reinforced_area, CheckSolution, FlexuralCheck,
    ReinforcementRegime, RequiredSteel, SectionGeometry,
};
pub use member::{
    design_member, DesignContext, DesignIssue, Face, MemberDesign, MomentSign, RequiredAreas,
};
pub use shear::{shear_spacing, AxialCondition, SpacingGovernedBy, StirrupDesign};
