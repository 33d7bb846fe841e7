//! # Member Design
//!
//! Runs the full design of one beam member from its reconciled demand:
//!
//! 1. Required steel for the sagging and hogging demands, combined by
//!    elementwise maximum per face
//! 2. Stirrup spacing at both envelope extremes, tighter one governs
//! 3. Bar layout per face within `b - 2·cover`
//! 4. Capacity check of the provided layout for each moment sign
//!
//! Soft failures never abort the member. They are recorded as
//! [`DesignIssue`]s and the member is marked for review.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::member::{design_member, DesignContext};
//! use calc_core::loads::{Extremum, ForceComponents, MemberDemand};
//! use calc_core::units::{KipFt, Kips};
//!
//! let context = DesignContext::default();
//! let demand = MemberDemand::new(1, 12.0, 20.0).with_extreme(
//!     Extremum::Max,
//!     ForceComponents { fz: Kips(8.0), my: KipFt(100.0), ..Default::default() },
//! );
//!
//! let design = design_member(&demand, &context);
//! println!("bottom: {}", design.bottom.display_name());
//! println!("efficiency: {:.3}", design.efficiency_max_my());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::flexure::{
    check_doubly_reinforced_design, doubly_reinforced_area, FlexuralCheck, ReinforcementRegime,
    RequiredSteel, SectionGeometry,
};
use crate::calculations::shear::{shear_spacing, AxialCondition, StirrupDesign};
use crate::equations::registry::{Equation, EquationTracker};
use crate::errors::{CalcError, CalcResult};
use crate::loads::MemberDemand;
use crate::materials::{BarSelection, ConcreteDesignProperties, RebarCatalog, RebarSize};
use crate::project::DesignSettings;
use crate::units::KipFt;

/// Efficiency above this is reported as overstressed
const EFFICIENCY_TOLERANCE: f64 = 1.0e-6;

/// Immutable inputs shared by every member evaluation in a run.
#[derive(Debug, Clone)]
pub struct DesignContext {
    pub settings: DesignSettings,
    pub catalog: &'static RebarCatalog,
    stirrup: RebarSize,
}

impl DesignContext {
    /// Validate settings and resolve the stirrup bar against the catalog.
    pub fn new(settings: DesignSettings) -> CalcResult<Self> {
        settings.validate()?;
        let catalog = RebarCatalog::standard();
        let stirrup = *catalog.get(settings.stirrup_bar).ok_or_else(|| {
            CalcError::invalid_input(
                "stirrup_bar",
                settings.stirrup_bar.to_string(),
                "Not a bar size in the standard catalog",
            )
        })?;
        Ok(Self {
            settings,
            catalog,
            stirrup,
        })
    }

    pub fn props(&self) -> &ConcreteDesignProperties {
        &self.settings.materials
    }

    pub fn stirrup(&self) -> &RebarSize {
        &self.stirrup
    }
}

impl Default for DesignContext {
    fn default() -> Self {
        let catalog = RebarCatalog::standard();
        Self {
            settings: DesignSettings::default(),
            catalog,
            stirrup: *catalog.smallest(),
        }
    }
}

/// Sense of the bending moment being designed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MomentSign {
    /// Sagging: bottom face in tension (`MAX MY > 0`)
    Positive,
    /// Hogging: top face in tension (`MIN MY < 0`)
    Negative,
}

/// Reinforced face of the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Face {
    Top,
    Bottom,
}

/// A soft failure found while designing a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum DesignIssue {
    /// No regime gave consistent required areas; minimum steel substituted
    UnsolvableEquilibrium { sign: MomentSign },
    /// No bar size fits the face in one layer
    InfeasibleLayout { face: Face },
    /// The provided layout has no equilibrium state (efficiency 0)
    NoCapacityEquilibrium { sign: MomentSign },
    /// Demand exceeds design capacity
    Overstressed { sign: MomentSign, efficiency: f64 },
    /// Stirrup spacing is tighter than bars can be placed
    ShearSpacingBelowMinimum { spacing_in: f64, min_spacing_in: f64 },
    /// Shear demand present but no spacing could be computed
    NoShearSolution,
}

impl fmt::Display for DesignIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesignIssue::UnsolvableEquilibrium { sign } => {
                write!(f, "{:?} moment: no equilibrium for required steel, minimum steel used", sign)
            }
            DesignIssue::InfeasibleLayout { face } => {
                write!(f, "{:?} face: no bar layout fits the section width", face)
            }
            DesignIssue::NoCapacityEquilibrium { sign } => {
                write!(f, "{:?} moment: provided steel has no equilibrium state", sign)
            }
            DesignIssue::Overstressed { sign, efficiency } => {
                write!(f, "{:?} moment: efficiency {:.3} exceeds 1.0", sign, efficiency)
            }
            DesignIssue::ShearSpacingBelowMinimum { spacing_in, min_spacing_in } => {
                write!(f, "stirrup spacing {:.2} in is below the {:.2} in minimum", spacing_in, min_spacing_in)
            }
            DesignIssue::NoShearSolution => write!(f, "no stirrup spacing found"),
        }
    }
}

/// Required area per face. `None` means undefined (equilibrium failed).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RequiredAreas {
    pub top_in2: Option<f64>,
    pub bottom_in2: Option<f64>,
}

/// Complete design of one member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDesign {
    pub id: u32,
    pub demand: MemberDemand,

    /// Steel for sagging demand (tension bottom), when there is one
    pub positive: Option<RequiredSteel>,
    /// Steel for hogging demand (tension top), when there is one
    pub negative: Option<RequiredSteel>,
    /// Envelope of both signs
    pub required: RequiredAreas,

    pub top: BarSelection,
    pub bottom: BarSelection,

    pub stirrups: Option<StirrupDesign>,

    pub positive_check: FlexuralCheck,
    pub negative_check: FlexuralCheck,

    pub issues: Vec<DesignIssue>,
}

impl MemberDesign {
    pub fn stirrup_spacing_in(&self) -> Option<f64> {
        self.stirrups.map(|s| s.spacing_in)
    }

    /// Efficiency for the sagging demand (`MAX MY`)
    pub fn efficiency_max_my(&self) -> f64 {
        self.positive_check.efficiency_ratio()
    }

    /// Efficiency for the hogging demand (`MIN MY`)
    pub fn efficiency_min_my(&self) -> f64 {
        self.negative_check.efficiency_ratio()
    }

    pub fn needs_review(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Record the equations this design relied on.
    pub fn record_equations(&self, tracker: &mut EquationTracker) {
        let label = self.id.to_string();
        let mut record = |equation: Equation, context: &str| {
            tracker.record_for_member(equation, context, label.as_str());
        };

        for (steel, context) in [(self.positive, "Positive moment"), (self.negative, "Negative moment")] {
            let Some(steel) = steel else { continue };
            if steel.tension_in2 == 0.0 && steel.compression_in2 == 0.0 {
                continue;
            }
            record(Equation::TensionControlledNeutralAxis, context);
            record(Equation::StrainCompatibility, context);
            record(Equation::EquivalentStressBlock, context);
            match steel.regime {
                ReinforcementRegime::SinglyReinforced => record(Equation::SinglyReinforcedNeutralAxis, context),
                ReinforcementRegime::CompressionSteelWithinBlock => {
                    record(Equation::ForceEquilibriumEmbedded, context);
                    record(Equation::NominalMomentStrength, context);
                }
                ReinforcementRegime::CompressionSteelOutsideBlock => {
                    record(Equation::ForceEquilibriumOutsideBlock, context);
                    record(Equation::NominalMomentStrength, context);
                }
            }
        }

        if let Some(stirrups) = &self.stirrups {
            let concrete = match stirrups.axial {
                AxialCondition::Compression => Equation::ConcreteShearAxialCompression,
                AxialCondition::Tension => Equation::ConcreteShearAxialTension,
            };
            record(concrete, "Shear");
            record(Equation::StirrupShearStrength, "Shear");
            record(Equation::MinimumBarSpacing, "Shear");
            record(Equation::CrackControlSpacing, "Shear");
        }

        record(Equation::BarCountForArea, "Bar layout");
        record(Equation::BarLayerFit, "Bar layout");

        for (check, context) in [(&self.positive_check, "Positive check"), (&self.negative_check, "Negative check")] {
            let Some(solution) = check.solution() else { continue };
            let equilibrium = if !solution.tension_steel_yielded {
                Equation::ForceEquilibriumElasticTension
            } else if solution.compression_steel_within_block {
                Equation::ForceEquilibriumEmbedded
            } else {
                Equation::ForceEquilibriumOutsideBlock
            };
            record(Equation::StrainCompatibility, context);
            record(equilibrium, context);
            record(Equation::NominalMomentStrength, context);
            record(Equation::FlexuralStrengthReduction, context);
            record(Equation::FlexuralEfficiencyRatio, context);
        }
    }
}

/// Required steel for one sign, or `None` with an issue when unsolvable.
fn required_for_sign(
    props: &ConcreteDesignProperties,
    section: &SectionGeometry,
    moment: Option<KipFt>,
    sign: MomentSign,
    issues: &mut Vec<DesignIssue>,
) -> (Option<RequiredSteel>, bool) {
    let Some(m_u) = moment else {
        return (None, true);
    };
    match doubly_reinforced_area(props, section, m_u) {
        Some(steel) => (Some(steel), true),
        None => {
            issues.push(DesignIssue::UnsolvableEquilibrium { sign });
            (None, false)
        }
    }
}

/// Design one member.
pub fn design_member(demand: &MemberDemand, context: &DesignContext) -> MemberDesign {
    let props = context.props();
    let catalog = context.catalog;
    let section = SectionGeometry::from_section(demand.width_in, demand.height_in, props.cover_in);
    let mut issues = Vec::new();

    debug!(member = demand.id, b = demand.width_in, h = demand.height_in, "designing member");

    // Required areas
    let positive_moment = demand.positive_moment();
    let negative_moment = demand.negative_moment();
    let (positive, positive_ok) =
        required_for_sign(props, &section, positive_moment, MomentSign::Positive, &mut issues);
    let (negative, negative_ok) =
        required_for_sign(props, &section, negative_moment, MomentSign::Negative, &mut issues);

    let required = if positive_ok && negative_ok {
        let (mut top, mut bottom) = (0.0_f64, 0.0_f64);
        if let Some(steel) = positive {
            bottom = bottom.max(steel.tension_in2);
            top = top.max(steel.compression_in2);
        }
        if let Some(steel) = negative {
            top = top.max(steel.tension_in2);
            bottom = bottom.max(steel.compression_in2);
        }
        RequiredAreas {
            top_in2: Some(top),
            bottom_in2: Some(bottom),
        }
    } else {
        RequiredAreas::default()
    };

    // Stirrups
    let stirrups = demand
        .shear_cases()
        .filter_map(|(f_u, v_u)| {
            shear_spacing(props, section.width_in, section.effective_depth_in, demand.height_in, f_u, v_u, context.stirrup())
        })
        .min_by(|a, b| a.spacing_in.total_cmp(&b.spacing_in));

    match &stirrups {
        Some(design) if design.needs_review() => issues.push(DesignIssue::ShearSpacingBelowMinimum {
            spacing_in: design.spacing_in,
            min_spacing_in: design.min_spacing_in,
        }),
        None if demand.shear_cases().any(|(_, v_u)| v_u.0 != 0.0) => issues.push(DesignIssue::NoShearSolution),
        _ => {}
    }

    // Bar layout
    let clear_width = demand.width_in - 2.0 * props.cover_in;
    let (top, bottom) = match (required.top_in2, required.bottom_in2) {
        (Some(top_area), Some(bottom_area)) => (
            catalog.fit_bars(top_area, clear_width, props.aggregate_size_in),
            catalog.fit_bars(bottom_area, clear_width, props.aggregate_size_in),
        ),
        _ => (catalog.minimum_selection(), catalog.minimum_selection()),
    };
    for (selection, face) in [(&top, Face::Top), (&bottom, Face::Bottom)] {
        if !selection.is_feasible() {
            issues.push(DesignIssue::InfeasibleLayout { face });
        }
    }

    // Capacity checks with provided steel
    let positive_check = match positive_moment {
        Some(m_u) => check_doubly_reinforced_design(
            props,
            &section,
            bottom.provided_area_in2,
            top.provided_area_in2,
            m_u,
        ),
        None => FlexuralCheck::NoDemand,
    };
    let negative_check = match negative_moment {
        Some(m_u) => check_doubly_reinforced_design(
            props,
            &section,
            top.provided_area_in2,
            bottom.provided_area_in2,
            m_u,
        ),
        None => FlexuralCheck::NoDemand,
    };
    for (check, sign) in [(&positive_check, MomentSign::Positive), (&negative_check, MomentSign::Negative)] {
        match check {
            FlexuralCheck::NoEquilibrium => issues.push(DesignIssue::NoCapacityEquilibrium { sign }),
            FlexuralCheck::Solved(solution) if solution.efficiency > 1.0 + EFFICIENCY_TOLERANCE => {
                issues.push(DesignIssue::Overstressed {
                    sign,
                    efficiency: solution.efficiency,
                })
            }
            _ => {}
        }
    }

    for issue in &issues {
        warn!(member = demand.id, "{}", issue);
    }

    MemberDesign {
        id: demand.id,
        demand: demand.clone(),
        positive,
        negative,
        required,
        top,
        bottom,
        stirrups,
        positive_check,
        negative_check,
        issues,
    }
}
