//! # Structural Engineering Equations
//!
//! This module contains the closed-form design equations used by the
//! section solvers. Having equations in one place enables:
//! - Easy verification against code references (ACI 318)
//! - Documentation of assumptions and sign conventions
//! - Consistent implementation across calculation types
//!
//! ## Modules
//!
//! - [`flexure`] - Strain compatibility, stress block, φ, quadratic roots
//! - [`shear`] - Concrete and stirrup shear, spacing limits
//! - [`registry`] - Equation metadata and tracking for reports
//!
//! ## Sign Conventions
//!
//! - **Moment**: Positive causes tension on bottom fiber (sagging)
//! - **Axial force**: Positive in compression
//!
//! ## References
//!
//! - ACI 318-19: Building Code Requirements for Structural Concrete

pub mod flexure;
pub mod registry;
pub mod shear;

pub use flexure::{
    compression_steel_strain,
    concrete_compression_force,
    concrete_lever_arm,
    concrete_moment,
    flexural_phi,
    neutral_axis_for_tension_strain,
    real_quadratic_roots,
    singly_reinforced_neutral_axis,
    tension_steel_strain,
};

pub use shear::{
    concrete_shear_with_compression,
    concrete_shear_with_tension,
    crack_control_spacing,
    minimum_bar_spacing,
    stirrup_spacing_for_shear,
    stirrup_stress,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
