//! # Materials Database
//!
//! Material definitions and lookups for reinforced concrete design.
//!
//! ## Contents
//!
//! - **Concrete / steel properties**: f'c, fy, Es, εcu, cover and aggregate
//!   size, plus derived values (β1, εy) per ACI 318
//! - **Rebar catalog**: standard #3-#11 bar sizes and the bar-fitting search
//!
//! ## Example
//!
//! ```rust
//! use calc_core::materials::{ConcreteDesignProperties, RebarCatalog};
//!
//! let props = ConcreteDesignProperties::default();
//! println!("β1 = {}, εy = {:.5}", props.beta_1(), props.epsilon_y());
//!
//! let no5 = RebarCatalog::standard().get(5).unwrap();
//! println!("#5: d = {} in, A = {:.3} in²", no5.diameter_in, no5.area_in2);
//! ```

pub mod concrete;
pub mod rebar;

pub use concrete::ConcreteDesignProperties;
pub use rebar::{fit_bars, BarSelection, RebarCatalog, RebarSize};
