//! # Flexural Strength Formulas (ACI 318 Chapter 22)
//!
//! Strain compatibility, the equivalent rectangular stress block and the
//! strength reduction factor for rectangular reinforced concrete sections.
//!
//! ## Notation
//!
//! - `b` = Section width
//! - `d` = Effective depth (compression face to tension steel centroid)
//! - `d'` = Depth to compression steel centroid
//! - `c` = Neutral axis depth
//! - `β1` = Stress block depth factor
//! - `εcu` = Maximum usable concrete strain
//! - `εs`, `ε's` = Tension / compression steel strain
//!
//! ## Sign Conventions
//!
//! - Strains are positive in the sense of the steel layer's role: tension
//!   strain positive for the tension layer, compression strain positive for
//!   the compression layer.
//! - Moments are magnitudes; the caller decides which face is in tension.

// =============================================================================
// STRAIN COMPATIBILITY
// Linear strain distribution with εcu at the extreme compression fiber
// =============================================================================

/// Net tensile strain at the tension-controlled limit (ACI Table 21.2.2)
pub const TENSION_CONTROLLED_STRAIN: f64 = 0.005;

/// Neutral axis depth that produces a target tension steel strain.
///
/// # Formula
/// εcu / c = εt / (d - c)  →  c = εcu·d / (εcu + εt)
///
/// With εt = 0.005 this is the tension-controlled limit (ACI 21.2.2).
#[inline]
pub fn neutral_axis_for_tension_strain(d: f64, epsilon_cu: f64, epsilon_t: f64) -> f64 {
    epsilon_cu * d / (epsilon_cu + epsilon_t)
}

/// Strain in the tension steel layer.
///
/// # Formula
/// εs = εcu·(d - c) / c
#[inline]
pub fn tension_steel_strain(c: f64, d: f64, epsilon_cu: f64) -> f64 {
    epsilon_cu * (d - c) / c
}

/// Strain in the compression steel layer.
///
/// # Formula
/// ε's = εcu·(c - d') / c
///
/// Negative when the compression steel sits below the neutral axis.
#[inline]
pub fn compression_steel_strain(c: f64, d_prime: f64, epsilon_cu: f64) -> f64 {
    epsilon_cu * (c - d_prime) / c
}

// =============================================================================
// EQUIVALENT RECTANGULAR STRESS BLOCK
// ACI 318 22.2.2.4: uniform 0.85 f'c over depth a = β1·c
// =============================================================================

/// Resultant of the concrete stress block.
///
/// # Formula
/// Cc = 0.85·f'c·β1·c·b
#[inline]
pub fn concrete_compression_force(f_prime_c: f64, beta_1: f64, c: f64, b: f64) -> f64 {
    0.85 * f_prime_c * beta_1 * c * b
}

/// Lever arm from the stress block resultant to the tension steel.
///
/// # Formula
/// jd = d - β1·c / 2
#[inline]
pub fn concrete_lever_arm(d: f64, beta_1: f64, c: f64) -> f64 {
    d - beta_1 * c / 2.0
}

/// Moment of the concrete stress block about the tension steel.
///
/// # Formula
/// Mc = 0.85·f'c·β1·c·b·(d - β1·c/2)
#[inline]
pub fn concrete_moment(f_prime_c: f64, beta_1: f64, c: f64, b: f64, d: f64) -> f64 {
    concrete_compression_force(f_prime_c, beta_1, c, b) * concrete_lever_arm(d, beta_1, c)
}

/// Neutral axis depth of a singly reinforced section carrying a moment.
///
/// Solves `0.85·f'c·β1·b·c·(d - β1·c/2) = Mn` for the smaller root:
///
/// ```text
/// c = (d - √(d² - 2·β1·Mn / (0.85·f'c·β1·b))) / β1
/// ```
///
/// Returns `None` when the moment exceeds the largest moment the concrete
/// block can develop (negative discriminant).
pub fn singly_reinforced_neutral_axis(f_prime_c: f64, beta_1: f64, b: f64, d: f64, nominal_moment: f64) -> Option<f64> {
    let k = 0.85 * f_prime_c * beta_1 * b;
    let discriminant = d * d - 2.0 * beta_1 * nominal_moment / k;
    if !(discriminant >= 0.0) {
        return None;
    }
    Some((d - discriminant.sqrt()) / beta_1)
}

// =============================================================================
// STRENGTH REDUCTION
// ACI 318 Table 21.2.2 (transition between compression and tension control)
// =============================================================================

/// Net tensile strain at which the section is compression-controlled
pub const COMPRESSION_CONTROLLED_STRAIN: f64 = 0.002;

/// φ for a compression-controlled section (tied)
pub const PHI_COMPRESSION_CONTROLLED: f64 = 0.65;

/// φ for a tension-controlled section
pub const PHI_TENSION_CONTROLLED: f64 = 0.9;

/// Strength reduction factor for flexure as a function of tension strain.
///
/// # Formula
/// φ = 0.65 + (εt - 0.002)·(250/3), limited to 0.65 ≤ φ ≤ 0.9
#[inline]
pub fn flexural_phi(epsilon_t: f64) -> f64 {
    (PHI_COMPRESSION_CONTROLLED + (epsilon_t - COMPRESSION_CONTROLLED_STRAIN) * 250.0 / 3.0)
        .clamp(PHI_COMPRESSION_CONTROLLED, PHI_TENSION_CONTROLLED)
}

// =============================================================================
// ALGEBRA
// =============================================================================

/// Real roots of `a·x² + b·x + c = 0`, in ascending order.
///
/// Falls back to the linear root when `a` is zero. Uses the cancellation-free
/// form `q = -(b + sign(b)·√disc)/2`, `x = q/a`, `x = c/q`.
pub fn real_quadratic_roots(a: f64, b: f64, c: f64) -> Vec<f64> {
    if a == 0.0 {
        if b == 0.0 {
            return Vec::new();
        }
        return vec![-c / b];
    }

    let discriminant = b * b - 4.0 * a * c;
    if !(discriminant >= 0.0) {
        return Vec::new();
    }

    let q = -0.5 * (b + b.signum() * discriminant.sqrt());
    let mut roots = if q == 0.0 {
        vec![0.0]
    } else {
        vec![q / a, c / q]
    };
    roots.sort_by(f64::total_cmp);
    roots.dedup();
    roots
}
