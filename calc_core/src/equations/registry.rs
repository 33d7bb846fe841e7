//! # Equation Registry
//!
//! Central registry of all design equations used by the section solvers.
//! Each equation has metadata including code references, formulas, and
//! variable definitions.
//!
//! ## Architecture
//!
//! The registry provides:
//! - Type-safe equation identification via the `Equation` enum
//! - Full metadata for design reports and audit trails
//! - Serialization support for JSON export
//!
//! ## Usage
//!
//! ```rust
//! use calc_core::equations::registry::{Equation, EquationTracker};
//!
//! // Track equation usage during a member design
//! let mut tracker = EquationTracker::new();
//! tracker.record_for_member(Equation::EquivalentStressBlock, "Positive moment", "12");
//!
//! // Get metadata for the report
//! let meta = Equation::EquivalentStressBlock.metadata();
//! println!("Formula: {}", meta.formula_plain);
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

// ============================================================================
// Code References
// ============================================================================

/// Reference to a structural engineering code or standard.
///
/// All equations should cite their source for auditability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CodeReference {
    /// ACI 318 - Building Code Requirements for Structural Concrete
    ACI318 {
        year: u16,
        section: &'static str,
    },
    /// Fundamental mechanics (no specific code reference needed)
    Mechanics,
}

impl CodeReference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::ACI318 { year, section } => {
                format!("ACI 318-{} Section {}", year % 100, section)
            }
            CodeReference::Mechanics => "Fundamental Mechanics".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::ACI318 { .. } => "ACI 318",
            CodeReference::Mechanics => "Mechanics",
        }
    }
}

const ACI_YEAR: u16 = 2019;

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for organizing equations in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Strain compatibility, stress block, equilibrium
    Flexure,
    /// Concrete and stirrup shear strength
    Shear,
    /// Bar counts, spacing and layer fit
    Detailing,
    /// Strength reduction and demand/capacity checks
    DesignChecks,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::Flexure => "Flexure",
            EquationCategory::Shear => "Shear",
            EquationCategory::Detailing => "Detailing",
            EquationCategory::DesignChecks => "Design Checks",
        }
    }

    /// Sort order for reports (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::Flexure => 1,
            EquationCategory::Shear => 2,
            EquationCategory::Detailing => 3,
            EquationCategory::DesignChecks => 4,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "c", "As", "f'c")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "in", "in²", "psi")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for a design equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Code/standard reference
    pub reference: CodeReference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All design equations used in Stratify concrete beam design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Flexure
    // -------------------------------------------------------------------------
    /// c = εcu·d / (εcu + εt)
    TensionControlledNeutralAxis,
    /// εs = εcu(d-c)/c, ε's = εcu(c-d')/c
    StrainCompatibility,
    /// Cc = 0.85 f'c β1 c b
    EquivalentStressBlock,
    /// Cc + (Es ε's - 0.85 f'c) A's = fy As
    ForceEquilibriumEmbedded,
    /// Cc + Es ε's A's = fy As
    ForceEquilibriumOutsideBlock,
    /// Tension steel below yield: fy replaced by Es εs
    ForceEquilibriumElasticTension,
    /// Mn = Cc (d - β1c/2) + f's,eff A's (d - d')
    NominalMomentStrength,
    /// c from Cc (d - β1c/2) = Mu/φ
    SinglyReinforcedNeutralAxis,

    // -------------------------------------------------------------------------
    // Shear
    // -------------------------------------------------------------------------
    /// Vc with axial compression
    ConcreteShearAxialCompression,
    /// Vc with axial tension
    ConcreteShearAxialTension,
    /// Vs = Av fy d / s
    StirrupShearStrength,
    /// s_min = max(1, d_b, 4/3 d_agg)
    MinimumBarSpacing,
    /// s_max from crack control
    CrackControlSpacing,

    // -------------------------------------------------------------------------
    // Detailing
    // -------------------------------------------------------------------------
    /// n = floor(As / Ab) + 1, n ≥ 2
    BarCountForArea,
    /// n d_b + (n-1) d_agg ≤ available width
    BarLayerFit,

    // -------------------------------------------------------------------------
    // Design Checks
    // -------------------------------------------------------------------------
    /// φ interpolated between 0.65 and 0.9
    FlexuralStrengthReduction,
    /// (Mu/φ) / Mn
    FlexuralEfficiencyRatio,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::TensionControlledNeutralAxis => EquationMetadata {
                name: "Tension-Controlled Neutral Axis",
                description: "Neutral axis depth at which the tension steel reaches the target strain",
                formula_plain: "c = εcu·d / (εcu + εt)",
                reference: CodeReference::ACI318 { year: ACI_YEAR, section: "21.2.2" },
                variables: vec![
                    Variable::new("c", "Neutral axis depth", "in"),
                    Variable::new("d", "Effective depth", "in"),
                    Variable::new("εcu", "Maximum usable concrete strain", "-"),
                    Variable::new("εt", "Target tension steel strain (0.005)", "-"),
                ],
                assumptions: vec!["Linear strain distribution", "Tension strain fixed at the tension-controlled limit"],
                category: EquationCategory::Flexure,
                source_module: "equations/flexure.rs",
                source_function: "neutral_axis_for_tension_strain",
            },
            Equation::StrainCompatibility => EquationMetadata {
                name: "Strain Compatibility",
                description: "Steel strains from a linear strain profile with εcu at the compression face",
                formula_plain: "εs = εcu·(d - c)/c, ε's = εcu·(c - d')/c",
                reference: CodeReference::ACI318 { year: ACI_YEAR, section: "22.2.1.2" },
                variables: vec![
                    Variable::new("εs", "Tension steel strain", "-"),
                    Variable::new("ε's", "Compression steel strain", "-"),
                    Variable::new("d'", "Depth to compression steel", "in"),
                ],
                assumptions: vec!["Plane sections remain plane", "Perfect bond"],
                category: EquationCategory::Flexure,
                source_module: "equations/flexure.rs",
                source_function: "tension_steel_strain",
            },
            Equation::EquivalentStressBlock => EquationMetadata {
                name: "Equivalent Rectangular Stress Block",
                description: "Resultant concrete compression force",
                formula_plain: "Cc = 0.85·f'c·β1·c·b",
                reference: CodeReference::ACI318 { year: ACI_YEAR, section: "22.2.2.4.1" },
                variables: vec![
                    Variable::new("Cc", "Concrete compression resultant", "lb"),
                    Variable::new("f'c", "Concrete compressive strength", "psi"),
                    Variable::new("β1", "Stress block depth factor", "-"),
                    Variable::new("b", "Section width", "in"),
                ],
                assumptions: vec!["Concrete tensile strength neglected"],
                category: EquationCategory::Flexure,
                source_module: "equations/flexure.rs",
                source_function: "concrete_compression_force",
            },
            Equation::ForceEquilibriumEmbedded => EquationMetadata {
                name: "Force Equilibrium (Compression Steel Within Stress Block)",
                description: "Horizontal equilibrium when d' < β1·c; compression steel displaces stressed concrete",
                formula_plain: "0.85·f'c·β1·c·b + (Es·ε's - 0.85·f'c)·A's = fy·As",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("A's", "Compression steel area", "in²"),
                    Variable::new("As", "Tension steel area", "in²"),
                    Variable::new("Es", "Steel modulus of elasticity", "psi"),
                    Variable::new("fy", "Steel yield stress", "psi"),
                ],
                assumptions: vec!["d' < β1·c", "Tension steel yielded"],
                category: EquationCategory::Flexure,
                source_module: "calculations/flexure.rs",
                source_function: "doubly_reinforced_area",
            },
            Equation::ForceEquilibriumOutsideBlock => EquationMetadata {
                name: "Force Equilibrium (Compression Steel Outside Stress Block)",
                description: "Horizontal equilibrium when d' ≥ β1·c; no concrete displacement offset",
                formula_plain: "0.85·f'c·β1·c·b + Es·ε's·A's = fy·As",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("A's", "Compression steel area", "in²"),
                    Variable::new("As", "Tension steel area", "in²"),
                ],
                assumptions: vec!["d' ≥ β1·c", "c > 0"],
                category: EquationCategory::Flexure,
                source_module: "calculations/flexure.rs",
                source_function: "doubly_reinforced_area",
            },
            Equation::ForceEquilibriumElasticTension => EquationMetadata {
                name: "Force Equilibrium (Elastic Tension Steel)",
                description: "Horizontal equilibrium when the tension steel has not yielded",
                formula_plain: "0.85·f'c·β1·c·b + f's·A's = Es·εs·As",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("εs", "Tension steel strain", "-"),
                    Variable::new("f's", "Compression steel effective stress", "psi"),
                ],
                assumptions: vec!["εs < εy"],
                category: EquationCategory::Flexure,
                source_module: "calculations/flexure.rs",
                source_function: "check_doubly_reinforced_design",
            },
            Equation::NominalMomentStrength => EquationMetadata {
                name: "Nominal Moment Strength",
                description: "Internal resisting moment taken about the tension steel",
                formula_plain: "Mn = Cc·(d - β1·c/2) + f's·A's·(d - d')",
                reference: CodeReference::ACI318 { year: ACI_YEAR, section: "22.3" },
                variables: vec![
                    Variable::new("Mn", "Nominal moment strength", "lb-in"),
                    Variable::new("f's", "Compression steel effective stress", "psi"),
                ],
                assumptions: vec!["Compression steel stress taken from strain without yield cap"],
                category: EquationCategory::Flexure,
                source_module: "calculations/flexure.rs",
                source_function: "nominal_moment",
            },
            Equation::SinglyReinforcedNeutralAxis => EquationMetadata {
                name: "Singly Reinforced Neutral Axis",
                description: "Neutral axis depth when concrete alone balances the demand moment",
                formula_plain: "c = (d - √(d² - 2·β1·Mn/(0.85·f'c·β1·b))) / β1",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("Mn", "Required nominal moment Mu/0.9", "lb-in"),
                    Variable::new("c", "Neutral axis depth", "in"),
                ],
                assumptions: vec!["No compression steel required", "εt ≥ 0.005"],
                category: EquationCategory::Flexure,
                source_module: "equations/flexure.rs",
                source_function: "singly_reinforced_neutral_axis",
            },
            Equation::ConcreteShearAxialCompression => EquationMetadata {
                name: "Concrete Shear Strength (Axial Compression)",
                description: "One-way shear strength of concrete with concurrent axial compression",
                formula_plain: "Vc = 2·(1 + Nu/(2000·Ag))·λ·√f'c·b·d",
                reference: CodeReference::ACI318 { year: ACI_YEAR, section: "22.5.6.1" },
                variables: vec![
                    Variable::new("Vc", "Concrete shear strength", "lb"),
                    Variable::new("Nu", "Axial force, positive in compression", "lb"),
                    Variable::new("Ag", "Gross area b·h", "in²"),
                    Variable::new("λ", "Lightweight concrete factor", "-"),
                ],
                assumptions: vec!["Nu > 0"],
                category: EquationCategory::Shear,
                source_module: "equations/shear.rs",
                source_function: "concrete_shear_with_compression",
            },
            Equation::ConcreteShearAxialTension => EquationMetadata {
                name: "Concrete Shear Strength (Axial Tension)",
                description: "One-way shear strength of concrete with concurrent axial tension or no axial force",
                formula_plain: "Vc = 2·(1 + Nu/(500·Ag))·λ·√f'c·b·d ≥ 0",
                reference: CodeReference::ACI318 { year: ACI_YEAR, section: "22.5.7.1" },
                variables: vec![
                    Variable::new("Vc", "Concrete shear strength", "lb"),
                    Variable::new("Nu", "Axial force, negative in tension", "lb"),
                ],
                assumptions: vec!["Nu ≤ 0"],
                category: EquationCategory::Shear,
                source_module: "equations/shear.rs",
                source_function: "concrete_shear_with_tension",
            },
            Equation::StirrupShearStrength => EquationMetadata {
                name: "Stirrup Shear Strength",
                description: "Shear carried by vertical stirrups at spacing s",
                formula_plain: "Vs = Av·fy·d / s, with Vs = Vu/0.75 - Vc",
                reference: CodeReference::ACI318 { year: ACI_YEAR, section: "22.5.10.5.3" },
                variables: vec![
                    Variable::new("Av", "Stirrup area (two legs)", "in²"),
                    Variable::new("s", "Stirrup spacing", "in"),
                    Variable::new("Vu", "Demand shear", "lb"),
                ],
                assumptions: vec!["Vertical two-legged stirrups", "φ = 0.75"],
                category: EquationCategory::Shear,
                source_module: "equations/shear.rs",
                source_function: "stirrup_spacing_for_shear",
            },
            Equation::MinimumBarSpacing => EquationMetadata {
                name: "Minimum Bar Spacing",
                description: "Smallest permitted spacing between parallel bars",
                formula_plain: "s_min = max(1 in, d_b, 4/3·d_agg)",
                reference: CodeReference::ACI318 { year: ACI_YEAR, section: "25.2.1" },
                variables: vec![
                    Variable::new("d_b", "Bar diameter", "in"),
                    Variable::new("d_agg", "Maximum aggregate size", "in"),
                ],
                assumptions: vec![],
                category: EquationCategory::Shear,
                source_module: "equations/shear.rs",
                source_function: "minimum_bar_spacing",
            },
            Equation::CrackControlSpacing => EquationMetadata {
                name: "Crack Control Spacing",
                description: "Largest spacing permitted for crack control at the computed steel stress",
                formula_plain: "s_max = min(|15·(40000/fs) - 2.5·cc|, |12·(40000/fs)|)",
                reference: CodeReference::ACI318 { year: ACI_YEAR, section: "24.3.2" },
                variables: vec![
                    Variable::new("fs", "Stress in reinforcement", "psi"),
                    Variable::new("cc", "Clear cover", "in"),
                ],
                assumptions: vec!["fs = Vu/φ/(2·Av)"],
                category: EquationCategory::Shear,
                source_module: "equations/shear.rs",
                source_function: "crack_control_spacing",
            },
            Equation::BarCountForArea => EquationMetadata {
                name: "Bar Count for Required Area",
                description: "Fewest bars of one size whose total area exceeds the requirement",
                formula_plain: "n = max(2, floor(As,req / Ab) + 1)",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("n", "Bar count", "-"),
                    Variable::new("Ab", "Area of one bar", "in²"),
                ],
                assumptions: vec!["At least two bars per face", "Exact multiples receive one extra bar"],
                category: EquationCategory::Detailing,
                source_module: "materials/rebar.rs",
                source_function: "count_for_area",
            },
            Equation::BarLayerFit => EquationMetadata {
                name: "Single Layer Fit",
                description: "Bars and clear spacing must fit within the width inside the cover",
                formula_plain: "n·d_b + (n - 1)·d_agg ≤ b - 2·cc",
                reference: CodeReference::ACI318 { year: ACI_YEAR, section: "25.2.1" },
                variables: vec![
                    Variable::new("n", "Bar count", "-"),
                    Variable::new("d_b", "Bar diameter", "in"),
                    Variable::new("d_agg", "Clear spacing (maximum aggregate size)", "in"),
                ],
                assumptions: vec!["One layer of bars per face"],
                category: EquationCategory::Detailing,
                source_module: "materials/rebar.rs",
                source_function: "fit_bars",
            },
            Equation::FlexuralStrengthReduction => EquationMetadata {
                name: "Flexural Strength Reduction Factor",
                description: "φ interpolated on net tensile strain between compression and tension control",
                formula_plain: "φ = 0.65 + (εt - 0.002)·250/3, 0.65 ≤ φ ≤ 0.9",
                reference: CodeReference::ACI318 { year: ACI_YEAR, section: "Table 21.2.2" },
                variables: vec![
                    Variable::new("φ", "Strength reduction factor", "-"),
                    Variable::new("εt", "Net tensile strain", "-"),
                ],
                assumptions: vec!["Tied transverse reinforcement"],
                category: EquationCategory::DesignChecks,
                source_module: "equations/flexure.rs",
                source_function: "flexural_phi",
            },
            Equation::FlexuralEfficiencyRatio => EquationMetadata {
                name: "Flexural Efficiency Ratio",
                description: "Demand to capacity ratio for the provided reinforcement",
                formula_plain: "η = (Mu/φ) / Mn ≤ 1.0",
                reference: CodeReference::ACI318 { year: ACI_YEAR, section: "9.5.1.1" },
                variables: vec![
                    Variable::new("η", "Efficiency ratio", "-"),
                    Variable::new("Mu", "Demand moment", "lb-in"),
                ],
                assumptions: vec!["η = 0 means no equilibrium state exists"],
                category: EquationCategory::DesignChecks,
                source_module: "calculations/flexure.rs",
                source_function: "check_doubly_reinforced_design",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories in report order
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![Flexure, Shear, Detailing, DesignChecks];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    // Flexure
    Equation::TensionControlledNeutralAxis,
    Equation::StrainCompatibility,
    Equation::EquivalentStressBlock,
    Equation::ForceEquilibriumEmbedded,
    Equation::ForceEquilibriumOutsideBlock,
    Equation::ForceEquilibriumElasticTension,
    Equation::NominalMomentStrength,
    Equation::SinglyReinforcedNeutralAxis,
    // Shear
    Equation::ConcreteShearAxialCompression,
    Equation::ConcreteShearAxialTension,
    Equation::StirrupShearStrength,
    Equation::MinimumBarSpacing,
    Equation::CrackControlSpacing,
    // Detailing
    Equation::BarCountForArea,
    Equation::BarLayerFit,
    // Checks
    Equation::FlexuralStrengthReduction,
    Equation::FlexuralEfficiencyRatio,
];

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation being used in a calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquationUsage {
    /// The equation that was used
    pub equation: Equation,
    /// Context describing where/why it was used (e.g., "Negative moment")
    pub context: String,
    /// Optional: the member label this equation was applied to
    pub member_label: Option<String>,
}

impl EquationUsage {
    /// Create a new equation usage record
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            member_label: None,
        }
    }

    /// Create usage record with member label
    pub fn for_member(equation: Equation, context: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            member_label: Some(label.into()),
        }
    }
}

/// Collector for equation usage during a calculation.
///
/// Pass this to calculation functions to track which equations are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    /// Record equation usage for a specific member
    pub fn record_for_member(&mut self, equation: Equation, context: impl Into<String>, label: impl Into<String>) {
        self.usages.push(EquationUsage::for_member(equation, context, label));
    }

    /// Get all recorded usages
    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Get unique equations used (deduplicated, first use order)
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Group unique equations by category
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut by_cat: HashMap<EquationCategory, Vec<Equation>> = HashMap::new();
        for eq in self.unique_equations() {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }

    /// Merge another tracker into this one
    pub fn merge(&mut self, other: EquationTracker) {
        self.usages.extend(other.usages);
    }
}

// ============================================================================
// Markdown Documentation Generation
// ============================================================================

/// Generate the EQUATIONS.md reference document from the registry.
///
/// ```rust
/// use calc_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Stratify Concrete Design Equations"));
/// assert!(markdown.contains("Flexure"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(r#"# Stratify Concrete Design Equations

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists the formulas used to size and check reinforced concrete
beam sections. Each equation includes its formula, code reference, source
location, and assumptions.

## Sign Conventions

| Quantity | Positive Direction |
|----------|-------------------|
| Bending moment | Tension on bottom fiber (sagging) |
| Axial force | Compression |
| Steel strain | In the sense of the layer's role (tension or compression) |

---

"#);

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}
