//! # One-Way Shear Formulas (ACI 318 Chapter 22.5, 24.3, 25.2)
//!
//! Concrete shear strength with concurrent axial force, stirrup spacing for
//! a required steel shear contribution, and the spacing limits applied to
//! stirrups.
//!
//! ## Notation
//!
//! - `Nu` = Axial force concurrent with shear, positive in compression (lb)
//! - `Ag` = Gross area `b·h` (in²)
//! - `Av` = Area of shear reinforcement within spacing s (in²)
//! - `Vc`, `Vs` = Concrete / steel shear contribution (lb)
//! - `fs` = Calculated stress in the reinforcement (psi)

/// Compression-case denominator multiplier on Ag (ACI 22.5.6.1)
const AXIAL_COMPRESSION_FACTOR: f64 = 2000.0;

/// Tension-case denominator multiplier on Ag (ACI 22.5.7.1)
const AXIAL_TENSION_FACTOR: f64 = 500.0;

/// Absolute minimum clear spacing between parallel bars (in)
pub const MIN_CLEAR_SPACING_IN: f64 = 1.0;

/// Concrete shear strength with axial compression.
///
/// # Formula (ACI 22.5.6.1)
/// Vc = 2·(1 + Nu / (2000·Ag))·λ·√f'c·b·d
#[inline]
pub fn concrete_shear_with_compression(nu: f64, b: f64, d: f64, h: f64, f_prime_c: f64, lambda: f64) -> f64 {
    2.0 * (1.0 + nu / (AXIAL_COMPRESSION_FACTOR * b * h)) * lambda * f_prime_c.sqrt() * b * d
}

/// Concrete shear strength with axial tension (or no axial force).
///
/// # Formula (ACI 22.5.7.1)
/// Vc = 2·(1 + Nu / (500·Ag))·λ·√f'c·b·d ≥ 0
///
/// `nu` is negative for tension.
#[inline]
pub fn concrete_shear_with_tension(nu: f64, b: f64, d: f64, h: f64, f_prime_c: f64, lambda: f64) -> f64 {
    (2.0 * (1.0 + nu / (AXIAL_TENSION_FACTOR * b * h)) * lambda * f_prime_c.sqrt() * b * d).max(0.0)
}

/// Stirrup spacing that develops a steel shear contribution.
///
/// # Formula (ACI 22.5.10.5.3)
/// Vs = Av·fy·d / s  →  s = Av·fy·d / Vs
#[inline]
pub fn stirrup_spacing_for_shear(a_v: f64, f_y: f64, d: f64, v_s: f64) -> f64 {
    a_v * f_y * d / v_s
}

/// Stress in each stirrup leg at the demand shear.
///
/// # Formula
/// fs = Vu / φ / (2·Av)
#[inline]
pub fn stirrup_stress(v_u: f64, phi: f64, a_v: f64) -> f64 {
    v_u / phi / 2.0 / a_v
}

/// Minimum spacing between bars.
///
/// # Formula (ACI 25.2.1)
/// s_min = max(1 in, d_b, 4/3·d_agg)
#[inline]
pub fn minimum_bar_spacing(bar_diameter: f64, aggregate_size: f64) -> f64 {
    MIN_CLEAR_SPACING_IN
        .max(bar_diameter)
        .max(aggregate_size * 4.0 / 3.0)
}

/// Maximum spacing from the crack-control provisions.
///
/// # Formula (ACI 24.3.2)
/// s_max = min(|15·(40000/fs) - 2.5·cc|, |12·(40000/fs)|)
#[inline]
pub fn crack_control_spacing(f_s: f64, cover: f64) -> f64 {
    let ratio = 40000.0 / f_s;
    (15.0 * ratio - 2.5 * cover).abs().min((12.0 * ratio).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concrete_shear_without_axial_force() {
        // Vc = 2·√4000·12·17.5 = 26563 lb
        let compression = concrete_shear_with_compression(0.0, 12.0, 17.5, 20.0, 4000.0, 1.0);
        let tension = concrete_shear_with_tension(0.0, 12.0, 17.5, 20.0, 4000.0, 1.0);
        assert!((compression - 26563.1).abs() < 1.0);
        assert_eq!(compression, tension);
    }

    #[test]
    fn test_axial_force_effect() {
        let base = concrete_shear_with_tension(0.0, 12.0, 17.5, 20.0, 4000.0, 1.0);
        let compression = concrete_shear_with_compression(50_000.0, 12.0, 17.5, 20.0, 4000.0, 1.0);
        let tension = concrete_shear_with_tension(-50_000.0, 12.0, 17.5, 20.0, 4000.0, 1.0);
        assert!(compression > base);
        assert!(tension < base);

        // Large tension cannot make Vc negative
        assert_eq!(concrete_shear_with_tension(-1.0e6, 12.0, 17.5, 20.0, 4000.0, 1.0), 0.0);
    }

    #[test]
    fn test_stirrup_spacing() {
        // s = 0.22·60000·17.5 / 23100 = 10.0 in
        let s = stirrup_spacing_for_shear(0.22, 60000.0, 17.5, 23100.0);
        assert!((s - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_minimum_spacing() {
        assert!((minimum_bar_spacing(0.375, 2.0) - 8.0 / 3.0).abs() < 1e-12);
        assert_eq!(minimum_bar_spacing(0.375, 0.5), 1.0);
        assert_eq!(minimum_bar_spacing(1.41, 0.75), 1.41);
    }

    #[test]
    fn test_crack_control_spacing() {
        // fs = 40000 psi: min(15 - 6.25, 12) = 8.75
        assert!((crack_control_spacing(40000.0, 2.5) - 8.75).abs() < 1e-12);
        // fs = 20000 psi: min(30 - 6.25, 24) = 23.75
        assert!((crack_control_spacing(20000.0, 2.5) - 23.75).abs() < 1e-12);
    }
}
