//! # Stirrup Spacing
//!
//! Required spacing of two-legged vertical stirrups for a demand shear with
//! a concurrent axial force.
//!
//! ## Procedure
//!
//! 1. `Vc` from the axial-compression expression when `Nu > 0`, otherwise
//!    from the axial-tension expression (zero axial force included)
//! 2. `Vs = Vu/0.75 - Vc`, `s = Av·fy·d / Vs`
//! 3. `s` is used when `min_s < s < max_s`; otherwise the crack-control
//!    maximum `max_s` is returned
//!
//! Forces are taken in kips and converted to pounds. The demand shear is
//! used as a magnitude.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::shear::shear_spacing;
//! use calc_core::materials::{ConcreteDesignProperties, RebarCatalog};
//! use calc_core::units::Kips;
//!
//! let props = ConcreteDesignProperties::default();
//! let stirrup = RebarCatalog::standard().get(3).unwrap();
//!
//! let design = shear_spacing(&props, 12.0, 17.5, 20.0, Kips(0.0), Kips(40.0), stirrup).unwrap();
//! println!("s = {:.2} in ({:?})", design.spacing_in, design.governed_by);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::shear::{
    concrete_shear_with_compression, concrete_shear_with_tension, crack_control_spacing,
    minimum_bar_spacing, stirrup_spacing_for_shear, stirrup_stress,
};
use crate::materials::{ConcreteDesignProperties, RebarSize};
use crate::units::{Kips, Pounds};

/// Strength reduction factor for shear
pub const PHI_SHEAR: f64 = 0.75;

/// Legs per stirrup
pub const STIRRUP_LEGS: f64 = 2.0;

/// Which concrete shear expression applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxialCondition {
    /// Nu > 0
    Compression,
    /// Nu ≤ 0
    Tension,
}

/// What set the returned spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpacingGovernedBy {
    /// Strength spacing fell strictly between the limits
    Strength,
    /// Crack-control maximum returned as the fallback
    MaximumSpacing,
}

/// Stirrup spacing for one shear/axial force pair.
///
/// ## JSON Example
///
/// ```json
/// {
///   "spacing_in": 15.237,
///   "strength_spacing_in": 15.237,
///   "min_spacing_in": 2.667,
///   "max_spacing_in": 18.6,
///   "concrete_shear_lb": 2403.3,
///   "required_steel_shear_lb": 8263.3,
///   "axial": "Tension",
///   "governed_by": "Strength"
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StirrupDesign {
    /// Spacing to detail (in)
    pub spacing_in: f64,
    /// Spacing from strength alone (in); negative when concrete carries the shear
    pub strength_spacing_in: f64,
    pub min_spacing_in: f64,
    pub max_spacing_in: f64,
    /// Vc (lb)
    pub concrete_shear_lb: f64,
    /// Vu/φ - Vc (lb)
    pub required_steel_shear_lb: f64,
    pub axial: AxialCondition,
    pub governed_by: SpacingGovernedBy,
}

impl StirrupDesign {
    /// True when strength asks for a spacing tighter than bars can be placed.
    pub fn strength_spacing_below_minimum(&self) -> bool {
        self.strength_spacing_in > 0.0 && self.strength_spacing_in <= self.min_spacing_in
    }

    /// The detailed spacing cannot be built, or strength could not be met.
    pub fn needs_review(&self) -> bool {
        self.spacing_in < self.min_spacing_in || self.strength_spacing_below_minimum()
    }
}

/// Required stirrup spacing.
///
/// - `b`, `d`, `h` in inches
/// - `f_u` axial force, positive in compression
/// - `v_u` demand shear
///
/// Returns `None` when there is no shear demand (the crack-control bound is
/// undefined at zero stirrup stress) or the inputs are not numeric.
pub fn shear_spacing(
    props: &ConcreteDesignProperties,
    b: f64,
    d: f64,
    h: f64,
    f_u: Kips,
    v_u: Kips,
    stirrup: &RebarSize,
) -> Option<StirrupDesign> {
    let n_u = Pounds::from(f_u).0;
    let v_u = Pounds::from(v_u).0.abs();
    if ![b, d, h, n_u, v_u].iter().all(|x| x.is_finite()) || v_u == 0.0 {
        return None;
    }

    let (axial, v_c) = if n_u > 0.0 {
        (
            AxialCondition::Compression,
            concrete_shear_with_compression(n_u, b, d, h, props.f_prime_c_psi, props.lambda),
        )
    } else {
        (
            AxialCondition::Tension,
            concrete_shear_with_tension(n_u, b, d, h, props.f_prime_c_psi, props.lambda),
        )
    };

    let a_v = STIRRUP_LEGS * stirrup.area_in2;
    let v_s = v_u / PHI_SHEAR - v_c;
    let strength_spacing = stirrup_spacing_for_shear(a_v, props.f_y_psi, d, v_s);

    let min_spacing = minimum_bar_spacing(stirrup.diameter_in, props.aggregate_size_in);
    let f_s = stirrup_stress(v_u, PHI_SHEAR, a_v);
    let max_spacing = crack_control_spacing(f_s, props.cover_in);

    let (spacing, governed_by) = if strength_spacing > min_spacing && strength_spacing < max_spacing {
        (strength_spacing, SpacingGovernedBy::Strength)
    } else {
        (max_spacing, SpacingGovernedBy::MaximumSpacing)
    };

    debug!(
        v_c,
        v_s,
        s = strength_spacing,
        min_s = min_spacing,
        max_s = max_spacing,
        ?governed_by,
        "stirrup spacing"
    );

    spacing.is_finite().then_some(StirrupDesign {
        spacing_in: spacing,
        strength_spacing_in: strength_spacing,
        min_spacing_in: min_spacing,
        max_spacing_in: max_spacing,
        concrete_shear_lb: v_c,
        required_steel_shear_lb: v_s,
        axial,
        governed_by,
    })
}
