//! Concrete and Reinforcing Steel Design Properties (ACI 318)
//!
//! Material constants used by every section solver. One value is built per
//! run (from defaults or a settings file) and shared read-only by all
//! member evaluations.
//!
//! ## Defaults
//!
//! | Property | Value | Reference |
//! |----------|-------|-----------|
//! | f'c | 4000 psi | Table 19.2.1.1 |
//! | fy | 60000 psi | Grade 60 |
//! | Es | 29,000,000 psi | 20.2.2.2 |
//! | εcu | 0.003 | 22.2.2.1 |
//! | cover | 2.5 in | 20.5.1.3 |
//! | d_agg | 2.0 in | |
//! | λ | 1.0 | Table 19.2.4.2 |

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Concrete compressive strength at which β1 starts to decrease (psi)
const BETA_1_BREAKPOINT_PSI: f64 = 4000.0;

/// Material constants for reinforced concrete beam design.
///
/// ## JSON Example
///
/// ```json
/// {
///   "f_prime_c_psi": 4000.0,
///   "f_y_psi": 60000.0,
///   "e_s_psi": 29000000.0,
///   "epsilon_cu": 0.003,
///   "cover_in": 2.5,
///   "aggregate_size_in": 2.0,
///   "lambda": 1.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcreteDesignProperties {
    /// Specified concrete compressive strength f'c (psi)
    pub f_prime_c_psi: f64,

    /// Reinforcement yield stress fy (psi)
    pub f_y_psi: f64,

    /// Reinforcement modulus of elasticity Es (psi)
    pub e_s_psi: f64,

    /// Maximum usable strain at the extreme concrete compression fiber
    pub epsilon_cu: f64,

    /// Concrete cover to the reinforcement centroid (in)
    pub cover_in: f64,

    /// Maximum aggregate size (in)
    pub aggregate_size_in: f64,

    /// Lightweight concrete modification factor λ
    pub lambda: f64,
}

impl Default for ConcreteDesignProperties {
    fn default() -> Self {
        ConcreteDesignProperties {
            f_prime_c_psi: 4000.0,
            f_y_psi: 60000.0,
            e_s_psi: 29.0e6,
            epsilon_cu: 0.003,
            cover_in: 2.5,
            aggregate_size_in: 2.0,
            lambda: 1.0,
        }
    }
}

impl ConcreteDesignProperties {
    /// Stress block depth factor β1 (ACI 318 Table 22.2.2.4.3).
    ///
    /// 0.85 up to 4000 psi, reduced by 0.05 per 1000 psi above that,
    /// never less than 0.65.
    pub fn beta_1(&self) -> f64 {
        if self.f_prime_c_psi <= BETA_1_BREAKPOINT_PSI {
            0.85
        } else {
            (0.85 - 0.05 * (self.f_prime_c_psi - BETA_1_BREAKPOINT_PSI) / 1000.0).max(0.65)
        }
    }

    /// Yield strain εy = fy / Es
    pub fn epsilon_y(&self) -> f64 {
        self.f_y_psi / self.e_s_psi
    }

    /// Equivalent stress block intensity 0.85·f'c (psi)
    pub fn stress_block_intensity_psi(&self) -> f64 {
        0.85 * self.f_prime_c_psi
    }

    /// Validate that all properties are finite and physically meaningful.
    pub fn validate(&self) -> CalcResult<()> {
        let positive = [
            ("f_prime_c_psi", self.f_prime_c_psi),
            ("f_y_psi", self.f_y_psi),
            ("e_s_psi", self.e_s_psi),
            ("epsilon_cu", self.epsilon_cu),
            ("lambda", self.lambda),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Must be a positive number",
                ));
            }
        }

        let non_negative = [
            ("cover_in", self.cover_in),
            ("aggregate_size_in", self.aggregate_size_in),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Must be a non-negative number",
                ));
            }
        }

        if self.lambda > 1.0 {
            return Err(CalcError::invalid_input(
                "lambda",
                self.lambda.to_string(),
                "Lightweight factor cannot exceed 1.0",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_properties() {
        let props = ConcreteDesignProperties::default();
        assert_eq!(props.beta_1(), 0.85);
        // εy = 60000 / 29e6 = 0.002069
        assert!((props.epsilon_y() - 0.002069).abs() < 1e-6);
        assert!((props.stress_block_intensity_psi() - 3400.0).abs() < 1e-9);
        assert!(props.validate().is_ok());
    }

    #[test]
    fn test_beta_1_reduction() {
        let mut props = ConcreteDesignProperties::default();
        props.f_prime_c_psi = 5000.0;
        assert!((props.beta_1() - 0.80).abs() < 1e-12);

        props.f_prime_c_psi = 10000.0;
        assert_eq!(props.beta_1(), 0.65);

        props.f_prime_c_psi = 3000.0;
        assert_eq!(props.beta_1(), 0.85);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut props = ConcreteDesignProperties::default();
        props.f_y_psi = -60000.0;
        assert!(props.validate().is_err());

        let mut props = ConcreteDesignProperties::default();
        props.cover_in = f64::NAN;
        assert!(props.validate().is_err());

        let mut props = ConcreteDesignProperties::default();
        props.lambda = 1.2;
        assert!(props.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let props: ConcreteDesignProperties =
            serde_json::from_str(r#"{ "f_prime_c_psi": 5000.0 }"#).unwrap();
        assert_eq!(props.f_prime_c_psi, 5000.0);
        assert_eq!(props.f_y_psi, 60000.0);
        assert_eq!(props.cover_in, 2.5);
    }
}
