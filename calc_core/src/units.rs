//! # Unit Types
//!
//! Type-safe wrappers for the force and moment units that cross the
//! boundary between structural analysis output and section design.
//!
//! Analysis tables report forces in kips and moments in kip-feet. The
//! section solvers work in pounds and pound-inches so that stresses come
//! out in psi against section dimensions in inches. These wrappers make
//! that conversion explicit at the point where it happens.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{InLb, KipFt, Kips, Pounds};
//!
//! let moment: InLb = KipFt(100.0).into();
//! assert_eq!(moment.0, 1_200_000.0);
//!
//! let shear: Pounds = Kips(25.0).into();
//! assert_eq!(shear.0, 25_000.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg, Sub};

// ============================================================================
// Force Units
// ============================================================================

/// Force in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

/// Force in kips (1 kip = 1000 pounds)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kips(pub f64);

impl From<Pounds> for Kips {
    fn from(lb: Pounds) -> Self {
        Kips(lb.0 / 1000.0)
    }
}

impl From<Kips> for Pounds {
    fn from(k: Kips) -> Self {
        Pounds(k.0 * 1000.0)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in foot-pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FtLb(pub f64);

/// Moment in kip-feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KipFt(pub f64);

/// Moment in inch-pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InLb(pub f64);

impl From<FtLb> for InLb {
    fn from(ftlb: FtLb) -> Self {
        InLb(ftlb.0 * 12.0)
    }
}

impl From<InLb> for FtLb {
    fn from(inlb: InLb) -> Self {
        FtLb(inlb.0 / 12.0)
    }
}

impl From<FtLb> for KipFt {
    fn from(ftlb: FtLb) -> Self {
        KipFt(ftlb.0 / 1000.0)
    }
}

impl From<KipFt> for FtLb {
    fn from(kipft: KipFt) -> Self {
        FtLb(kipft.0 * 1000.0)
    }
}

impl From<KipFt> for InLb {
    fn from(kipft: KipFt) -> Self {
        InLb::from(FtLb::from(kipft))
    }
}

impl From<InLb> for KipFt {
    fn from(inlb: InLb) -> Self {
        KipFt::from(FtLb::from(inlb))
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Neg for $type {
            type Output = Self;
            fn neg(self) -> Self::Output {
                Self(-self.0)
            }
        }
    };
}

impl_arithmetic!(Pounds);
impl_arithmetic!(Kips);
impl_arithmetic!(FtLb);
impl_arithmetic!(KipFt);
impl_arithmetic!(InLb);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kips_to_pounds() {
        let k = Kips(1.5);
        let lb: Pounds = k.into();
        assert_eq!(lb.0, 1500.0);
    }

    #[test]
    fn test_kipft_to_inlb() {
        let m: InLb = KipFt(100.0).into();
        assert_eq!(m.0, 1_200_000.0);

        let back: KipFt = m.into();
        assert!((back.0 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_arithmetic() {
        let a = KipFt(10.0);
        let b = KipFt(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((-a).0, -10.0);
    }

    #[test]
    fn test_serialization() {
        let m = KipFt(12.5);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "12.5");

        let roundtrip: KipFt = serde_json::from_str(&json).unwrap();
        assert_eq!(m, roundtrip);
    }
}
