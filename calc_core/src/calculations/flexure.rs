//! # Rectangular Section Flexure
//!
//! Sizes tension and compression steel for a demand moment, and checks an
//! as-built layout against that demand.
//!
//! ## Design (`doubly_reinforced_area`)
//!
//! The tension steel strain is fixed at the tension-controlled limit, which
//! fixes the neutral axis depth. What remains is a regime question: does the
//! compression steel sit inside the equivalent stress block (and displace
//! stressed concrete) or outside it? That cannot be known before solving, so
//! the solver walks a small state machine:
//!
//! ```text
//! TryWithinBlock ──(d' < β1·c, areas ≥ 0)──▶ Solved
//!       │
//!       ▼
//! TryOutsideBlock ──(d' ≥ β1·c, c > 0, areas ≥ 0)──▶ Solved
//!       │
//!       ▼
//!   NoSolution
//! ```
//!
//! When the concrete block alone carries the demand at the tension-controlled
//! depth, no compression steel is needed and the tension area comes from the
//! singly reinforced equilibrium instead.
//!
//! ## Check (`check_doubly_reinforced_design`)
//!
//! With areas known, force equilibrium multiplied through by `c` is a
//! quadratic in `c`. The first pass assumes the compression steel is within
//! the block and the tension steel has yielded; any assumption the positive
//! root violates is flipped and the quadratic is re-solved.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::flexure::{
//!     check_doubly_reinforced_design, doubly_reinforced_area, SectionGeometry,
//! };
//! use calc_core::materials::ConcreteDesignProperties;
//! use calc_core::units::KipFt;
//!
//! let props = ConcreteDesignProperties::default();
//! let section = SectionGeometry::from_section(12.0, 20.0, props.cover_in);
//!
//! let steel = doubly_reinforced_area(&props, &section, KipFt(300.0)).unwrap();
//! println!("As = {:.3} in², A's = {:.3} in²", steel.tension_in2, steel.compression_in2);
//!
//! let check = check_doubly_reinforced_design(
//!     &props, &section, steel.tension_in2, steel.compression_in2, KipFt(300.0),
//! );
//! assert!((check.efficiency_ratio() - 1.0).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::flexure::{
    compression_steel_strain, concrete_compression_force, concrete_lever_arm, concrete_moment,
    flexural_phi, neutral_axis_for_tension_strain, real_quadratic_roots,
    singly_reinforced_neutral_axis, tension_steel_strain, PHI_TENSION_CONTROLLED,
    TENSION_CONTROLLED_STRAIN,
};
use crate::errors::{CalcError, CalcResult};
use crate::materials::ConcreteDesignProperties;
use crate::units::{InLb, KipFt};

/// Geometry of a rectangular section for one moment sign.
///
/// ## JSON Example
///
/// ```json
/// {
///   "width_in": 12.0,
///   "effective_depth_in": 17.5,
///   "compression_steel_depth_in": 2.5
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionGeometry {
    /// Section width b (in)
    pub width_in: f64,
    /// Depth from the compression face to the tension steel, d (in)
    pub effective_depth_in: f64,
    /// Depth from the compression face to the compression steel, d' (in)
    pub compression_steel_depth_in: f64,
}

impl SectionGeometry {
    /// Geometry from overall dimensions with the same cover on both faces:
    /// `d = h - cover`, `d' = cover`.
    pub fn from_section(width_in: f64, height_in: f64, cover_in: f64) -> Self {
        Self {
            width_in,
            effective_depth_in: height_in - cover_in,
            compression_steel_depth_in: cover_in,
        }
    }

    /// Check that `b > 0` and `0 < d' < d`.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.width_in.is_finite() || self.width_in <= 0.0 {
            return Err(CalcError::invalid_input(
                "width_in",
                self.width_in.to_string(),
                "Width must be positive",
            ));
        }
        if !self.compression_steel_depth_in.is_finite() || self.compression_steel_depth_in <= 0.0 {
            return Err(CalcError::invalid_input(
                "compression_steel_depth_in",
                self.compression_steel_depth_in.to_string(),
                "Compression steel depth must be positive",
            ));
        }
        if !self.effective_depth_in.is_finite() || self.effective_depth_in <= self.compression_steel_depth_in {
            return Err(CalcError::invalid_input(
                "effective_depth_in",
                self.effective_depth_in.to_string(),
                "Effective depth must exceed the compression steel depth",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Design: required steel areas
// ============================================================================

/// Which equilibrium formulation produced a design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReinforcementRegime {
    /// Concrete alone balances the demand; no compression steel
    SinglyReinforced,
    /// Compression steel inside the stress block (d' < β1·c)
    CompressionSteelWithinBlock,
    /// Compression steel outside the stress block (d' ≥ β1·c)
    CompressionSteelOutsideBlock,
}

/// Steel areas required for one moment sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequiredSteel {
    /// Tension face area As (in²)
    pub tension_in2: f64,
    /// Compression face area A's (in²)
    pub compression_in2: f64,
    /// Neutral axis depth used by the design (in)
    pub neutral_axis_in: f64,
    pub regime: ReinforcementRegime,
}

impl RequiredSteel {
    fn none_required() -> Self {
        Self {
            tension_in2: 0.0,
            compression_in2: 0.0,
            neutral_axis_in: 0.0,
            regime: ReinforcementRegime::SinglyReinforced,
        }
    }
}

enum SolveState {
    TryWithinBlock,
    TryOutsideBlock,
    Solved(RequiredSteel),
    NoSolution,
}

/// Required tension and compression steel for a demand moment.
///
/// `m_u` is the factored demand moment magnitude for this sign. Returns
/// `None` when no regime yields a consistent, non-negative design, or when
/// the geometry breaks `b > 0, 0 < d' < d`; callers substitute minimum
/// reinforcement.
pub fn doubly_reinforced_area(
    props: &ConcreteDesignProperties,
    section: &SectionGeometry,
    m_u: KipFt,
) -> Option<RequiredSteel> {
    if section.validate().is_err() || !m_u.0.is_finite() {
        return None;
    }
    if m_u.0 <= 0.0 {
        return Some(RequiredSteel::none_required());
    }

    let b = section.width_in;
    let d = section.effective_depth_in;
    let d_prime = section.compression_steel_depth_in;
    let beta_1 = props.beta_1();
    let f_c = props.f_prime_c_psi;

    let required_mn = InLb::from(m_u).0 / PHI_TENSION_CONTROLLED;
    let c = neutral_axis_for_tension_strain(d, props.epsilon_cu, TENSION_CONTROLLED_STRAIN);
    let concrete_force = concrete_compression_force(f_c, beta_1, c, b);
    let concrete_mn = concrete_moment(f_c, beta_1, c, b, d);

    if required_mn <= concrete_mn {
        let c_singly = singly_reinforced_neutral_axis(f_c, beta_1, b, d, required_mn)?;
        let steel = RequiredSteel {
            tension_in2: concrete_compression_force(f_c, beta_1, c_singly, b) / props.f_y_psi,
            compression_in2: 0.0,
            neutral_axis_in: c_singly,
            regime: ReinforcementRegime::SinglyReinforced,
        };
        debug!(c = c_singly, a_s = steel.tension_in2, "singly reinforced design");
        return Some(steel);
    }

    let epsilon_s_prime = compression_steel_strain(c, d_prime, props.epsilon_cu);
    let lever_arm = d - d_prime;

    // Compression steel stress, optionally net of the concrete it displaces
    let solve_with_offset = |offset: f64, regime: ReinforcementRegime| -> Option<RequiredSteel> {
        let steel_stress = props.e_s_psi * epsilon_s_prime - offset;
        let a_s_prime = (required_mn - concrete_mn) / (steel_stress * lever_arm);
        let a_s = (concrete_force + steel_stress * a_s_prime) / props.f_y_psi;
        let consistent = a_s_prime.is_finite() && a_s.is_finite() && a_s_prime >= 0.0 && a_s >= 0.0;
        consistent.then_some(RequiredSteel {
            tension_in2: a_s,
            compression_in2: a_s_prime,
            neutral_axis_in: c,
            regime,
        })
    };

    let mut state = SolveState::TryWithinBlock;
    loop {
        state = match state {
            SolveState::TryWithinBlock => {
                let candidate = (d_prime < beta_1 * c)
                    .then(|| {
                        solve_with_offset(
                            props.stress_block_intensity_psi(),
                            ReinforcementRegime::CompressionSteelWithinBlock,
                        )
                    })
                    .flatten();
                match candidate {
                    Some(steel) => SolveState::Solved(steel),
                    None => {
                        debug!(c, d_prime, "compression steel not within stress block");
                        SolveState::TryOutsideBlock
                    }
                }
            }
            SolveState::TryOutsideBlock => {
                let candidate = (d_prime >= beta_1 * c && c > 0.0)
                    .then(|| solve_with_offset(0.0, ReinforcementRegime::CompressionSteelOutsideBlock))
                    .flatten();
                match candidate {
                    Some(steel) => SolveState::Solved(steel),
                    None => SolveState::NoSolution,
                }
            }
            SolveState::Solved(steel) => {
                debug!(
                    c,
                    a_s = steel.tension_in2,
                    a_s_prime = steel.compression_in2,
                    regime = ?steel.regime,
                    "doubly reinforced design"
                );
                return Some(steel);
            }
            SolveState::NoSolution => {
                debug!(c, m_u = m_u.0, "no consistent equilibrium for required steel");
                return None;
            }
        };
    }
}

// ============================================================================
// Check: efficiency of an as-built layout
// ============================================================================

/// Accepted equilibrium state of an as-built section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckSolution {
    /// Neutral axis depth c (in)
    pub neutral_axis_in: f64,
    /// Tension steel strain εs
    pub tension_strain: f64,
    /// Compression steel strain ε's
    pub compression_strain: f64,
    /// d' < β1·c in the accepted formulation
    pub compression_steel_within_block: bool,
    /// Tension steel at yield in the accepted formulation
    pub tension_steel_yielded: bool,
    /// Strength reduction factor φ
    pub phi: f64,
    /// Nominal moment strength Mn (lb-in)
    pub nominal_moment_inlb: f64,
    /// (Mu/φ) / Mn
    pub efficiency: f64,
}

/// Outcome of checking a layout against a demand moment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum FlexuralCheck {
    /// No demand for this moment sign; nothing to check
    NoDemand,
    /// Equilibrium found
    Solved(CheckSolution),
    /// No root satisfies any combination of assumptions
    NoEquilibrium,
}

impl FlexuralCheck {
    /// Demand/capacity ratio: 1.0 for no demand, 0.0 when no equilibrium
    /// exists (undesignable).
    pub fn efficiency_ratio(&self) -> f64 {
        match self {
            FlexuralCheck::NoDemand => 1.0,
            FlexuralCheck::Solved(solution) => solution.efficiency,
            FlexuralCheck::NoEquilibrium => 0.0,
        }
    }

    pub fn solution(&self) -> Option<&CheckSolution> {
        match self {
            FlexuralCheck::Solved(solution) => Some(solution),
            _ => None,
        }
    }
}

/// Force-equilibrium formulation for the check quadratic.
#[derive(Debug, Clone, Copy)]
struct Formulation {
    within_block: bool,
    tension_yielded: bool,
}

/// Verify an as-built layout against a demand moment.
///
/// `a_s` is the tension face area and `a_s_prime` the compression face area
/// for the moment sign being checked.
pub fn check_doubly_reinforced_design(
    props: &ConcreteDesignProperties,
    section: &SectionGeometry,
    a_s: f64,
    a_s_prime: f64,
    m_u: KipFt,
) -> FlexuralCheck {
    if !(m_u.0 > 0.0) {
        return FlexuralCheck::NoDemand;
    }
    if section.validate().is_err() {
        return FlexuralCheck::NoEquilibrium;
    }

    let d = section.effective_depth_in;
    let d_prime = section.compression_steel_depth_in;
    let beta_1 = props.beta_1();
    let epsilon_y = props.epsilon_y();

    let first = Formulation { within_block: true, tension_yielded: true };
    let roots: Vec<f64> = check_roots(props, section, a_s, a_s_prime, first)
        .into_iter()
        .filter(|c| *c > 0.0)
        .collect();

    let mut accepted = roots.iter().copied().find(|&c| {
        d_prime < beta_1 * c && tension_steel_strain(c, d, props.epsilon_cu) >= epsilon_y
    }).map(|c| (c, first));

    if accepted.is_none() {
        if let Some(&c) = roots.first() {
            let flipped = Formulation {
                within_block: d_prime < beta_1 * c,
                tension_yielded: tension_steel_strain(c, d, props.epsilon_cu) >= epsilon_y,
            };
            debug!(c, ?flipped, "re-solving capacity check with flipped assumptions");

            accepted = check_roots(props, section, a_s, a_s_prime, flipped)
                .into_iter()
                .find(|&c| {
                    let block_ok = flipped.within_block || d_prime >= beta_1 * c;
                    let strain_ok =
                        flipped.tension_yielded || tension_steel_strain(c, d, props.epsilon_cu) < epsilon_y;
                    c > 0.0 && block_ok && strain_ok
                })
                .map(|c| (c, flipped));
        }
    }

    let Some((c, formulation)) = accepted else {
        return FlexuralCheck::NoEquilibrium;
    };

    let tension_strain = tension_steel_strain(c, d, props.epsilon_cu);
    let compression_strain = compression_steel_strain(c, d_prime, props.epsilon_cu);
    let phi = flexural_phi(tension_strain);
    let nominal = nominal_moment(props, section, a_s_prime, c, formulation.within_block);
    let efficiency = InLb::from(m_u).0 / phi / nominal;

    if !efficiency.is_finite() || nominal <= 0.0 {
        return FlexuralCheck::NoEquilibrium;
    }

    FlexuralCheck::Solved(CheckSolution {
        neutral_axis_in: c,
        tension_strain,
        compression_strain,
        compression_steel_within_block: formulation.within_block,
        tension_steel_yielded: formulation.tension_yielded,
        phi,
        nominal_moment_inlb: nominal,
        efficiency,
    })
}

/// Roots in `c` of force equilibrium multiplied through by `c`:
///
/// ```text
/// k·c² + ((Es·εcu - off)·A's + γ)·c - Es·εcu·d'·A's - δ = 0
/// ```
///
/// where `k = 0.85·f'c·β1·b`, `off = 0.85·f'c` only when the compression
/// steel is within the block, and `γ = -fy·As, δ = 0` for yielded tension
/// steel or `γ = Es·εcu·As, δ = Es·εcu·d·As` for elastic tension steel.
fn check_roots(
    props: &ConcreteDesignProperties,
    section: &SectionGeometry,
    a_s: f64,
    a_s_prime: f64,
    formulation: Formulation,
) -> Vec<f64> {
    let es_ecu = props.e_s_psi * props.epsilon_cu;
    let k = 0.85 * props.f_prime_c_psi * props.beta_1() * section.width_in;
    let offset = if formulation.within_block { props.stress_block_intensity_psi() } else { 0.0 };
    let (gamma, delta) = if formulation.tension_yielded {
        (-props.f_y_psi * a_s, 0.0)
    } else {
        (es_ecu * a_s, es_ecu * section.effective_depth_in * a_s)
    };

    real_quadratic_roots(
        k,
        (es_ecu - offset) * a_s_prime + gamma,
        -es_ecu * section.compression_steel_depth_in * a_s_prime - delta,
    )
}

/// Mn = Cc·(d - β1·c/2) + (Es·ε's - off)·A's·(d - d')
fn nominal_moment(
    props: &ConcreteDesignProperties,
    section: &SectionGeometry,
    a_s_prime: f64,
    c: f64,
    within_block: bool,
) -> f64 {
    let beta_1 = props.beta_1();
    let d = section.effective_depth_in;
    let d_prime = section.compression_steel_depth_in;
    let offset = if within_block { props.stress_block_intensity_psi() } else { 0.0 };
    let steel_stress = props.e_s_psi * compression_steel_strain(c, d_prime, props.epsilon_cu) - offset;

    concrete_compression_force(props.f_prime_c_psi, beta_1, c, section.width_in) * concrete_lever_arm(d, beta_1, c)
        + steel_stress * a_s_prime * (d - d_prime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn section() -> SectionGeometry {
        SectionGeometry::from_section(12.0, 20.0, 2.5)
    }

    #[test]
    fn test_section_from_overall_dimensions() {
        let s = section();
        assert_eq!(s.effective_depth_in, 17.5);
        assert_eq!(s.compression_steel_depth_in, 2.5);
        assert!(s.validate().is_ok());
        assert!(SectionGeometry::from_section(12.0, 4.0, 2.5).validate().is_err());
    }

    #[test]
    fn test_moderate_moment_is_singly_reinforced() {
        let props = ConcreteDesignProperties::default();
        let steel = doubly_reinforced_area(&props, &section(), KipFt(100.0)).unwrap();

        assert_eq!(steel.regime, ReinforcementRegime::SinglyReinforced);
        assert_eq!(steel.compression_in2, 0.0);
        assert_relative_eq!(steel.neutral_axis_in, 2.3286, epsilon = 1e-3);
        assert_relative_eq!(steel.tension_in2, 1.3460, epsilon = 1e-3);
    }

    #[test]
    fn test_large_moment_needs_compression_steel() {
        let props = ConcreteDesignProperties::default();
        let steel = doubly_reinforced_area(&props, &section(), KipFt(300.0)).unwrap();

        assert_eq!(steel.regime, ReinforcementRegime::CompressionSteelWithinBlock);
        assert_relative_eq!(steel.neutral_axis_in, 6.5625, epsilon = 1e-9);
        assert_relative_eq!(steel.compression_in2, 0.8614, epsilon = 1e-3);
        assert_relative_eq!(steel.tension_in2, 4.5175, epsilon = 1e-3);
    }

    #[test]
    fn test_zero_moment_requires_no_steel() {
        let props = ConcreteDesignProperties::default();
        let steel = doubly_reinforced_area(&props, &section(), KipFt(0.0)).unwrap();
        assert_eq!(steel.tension_in2, 0.0);
        assert_eq!(steel.compression_in2, 0.0);
    }

    #[test]
    fn test_areas_never_negative() {
        let props = ConcreteDesignProperties::default();
        for m in [1.0, 25.0, 50.0, 150.0, 200.0, 250.0, 400.0, 800.0] {
            if let Some(steel) = doubly_reinforced_area(&props, &section(), KipFt(m)) {
                assert!(steel.tension_in2 >= 0.0, "As < 0 at {m} kip-ft");
                assert!(steel.compression_in2 >= 0.0, "A's < 0 at {m} kip-ft");
            }
        }
    }

    #[test]
    fn test_non_numeric_geometry_is_undefined() {
        let props = ConcreteDesignProperties::default();
        let bad = SectionGeometry::from_section(f64::NAN, 20.0, 2.5);
        assert!(doubly_reinforced_area(&props, &bad, KipFt(100.0)).is_none());
    }

    #[test]
    fn test_height_below_cover_is_undefined() {
        let props = ConcreteDesignProperties::default();
        let shallow = SectionGeometry::from_section(12.0, 2.0, 2.5);
        assert!(shallow.validate().is_err());
        assert!(doubly_reinforced_area(&props, &shallow, KipFt(0.01)).is_none());
        assert_eq!(
            check_doubly_reinforced_design(&props, &shallow, 0.22, 0.22, KipFt(0.01)),
            FlexuralCheck::NoEquilibrium
        );
    }

    #[test]
    fn test_zero_width_is_undefined() {
        let props = ConcreteDesignProperties::default();
        let flat = SectionGeometry::from_section(0.0, 20.0, 2.5);
        assert!(doubly_reinforced_area(&props, &flat, KipFt(100.0)).is_none());
        assert!(doubly_reinforced_area(&props, &flat, KipFt(0.0)).is_none());
    }

    #[test]
    fn test_compression_steel_outside_block() {
        // Deep cover relative to c puts d' below β1·c
        let props = ConcreteDesignProperties::default();
        let shallow = SectionGeometry {
            width_in: 12.0,
            effective_depth_in: 8.0,
            compression_steel_depth_in: 2.8,
        };
        // c = 3.0, β1·c = 2.55 ≤ d'
        let steel = doubly_reinforced_area(&props, &shallow, KipFt(60.0)).unwrap();
        assert_eq!(steel.regime, ReinforcementRegime::CompressionSteelOutsideBlock);
        assert!(steel.compression_in2 > 0.0);

        let check = check_doubly_reinforced_design(
            &props,
            &shallow,
            steel.tension_in2,
            steel.compression_in2,
            KipFt(60.0),
        );
        let solution = check.solution().unwrap();
        assert!(!solution.compression_steel_within_block);
        assert_relative_eq!(solution.neutral_axis_in, 3.0, epsilon = 1e-6);
        assert_relative_eq!(solution.efficiency, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_design_is_idempotent() {
        let props = ConcreteDesignProperties::default();
        let a = doubly_reinforced_area(&props, &section(), KipFt(300.0));
        let b = doubly_reinforced_area(&props, &section(), KipFt(300.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_round_trip_efficiency_is_one() {
        let props = ConcreteDesignProperties::default();
        for m in [40.0, 100.0, 180.0, 300.0, 450.0] {
            let steel = doubly_reinforced_area(&props, &section(), KipFt(m)).unwrap();
            let check = check_doubly_reinforced_design(
                &props,
                &section(),
                steel.tension_in2,
                steel.compression_in2,
                KipFt(m),
            );
            assert_relative_eq!(check.efficiency_ratio(), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_doubly_check_state() {
        let props = ConcreteDesignProperties::default();
        let steel = doubly_reinforced_area(&props, &section(), KipFt(300.0)).unwrap();
        let check = check_doubly_reinforced_design(
            &props,
            &section(),
            steel.tension_in2,
            steel.compression_in2,
            KipFt(300.0),
        );
        let solution = check.solution().unwrap();
        assert_relative_eq!(solution.neutral_axis_in, 6.5625, epsilon = 1e-6);
        assert!(solution.compression_steel_within_block);
        assert!(solution.tension_steel_yielded);
        assert_eq!(solution.phi, 0.9);
    }

    #[test]
    fn test_extra_steel_lowers_efficiency() {
        let props = ConcreteDesignProperties::default();
        let check = check_doubly_reinforced_design(&props, &section(), 2.64, 0.62, KipFt(100.0));
        let efficiency = check.efficiency_ratio();
        assert!(efficiency > 0.0 && efficiency < 1.0);
    }

    #[test]
    fn test_over_reinforced_section_uses_elastic_tension() {
        let props = ConcreteDesignProperties::default();
        let check = check_doubly_reinforced_design(&props, &section(), 12.0, 0.4, KipFt(200.0));
        let solution = check.solution().unwrap();
        assert!(!solution.tension_steel_yielded);
        assert!(solution.tension_strain < props.epsilon_y());
        assert_eq!(solution.phi, 0.65);
    }

    #[test]
    fn test_no_demand_and_no_steel() {
        let props = ConcreteDesignProperties::default();
        let none = check_doubly_reinforced_design(&props, &section(), 2.0, 0.4, KipFt(0.0));
        assert_eq!(none, FlexuralCheck::NoDemand);
        assert_eq!(none.efficiency_ratio(), 1.0);

        let bare = check_doubly_reinforced_design(&props, &section(), 0.0, 0.0, KipFt(50.0));
        assert_eq!(bare, FlexuralCheck::NoEquilibrium);
        assert_eq!(bare.efficiency_ratio(), 0.0);
    }
}
