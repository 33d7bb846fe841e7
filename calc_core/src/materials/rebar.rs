//! Standard Reinforcing Bar Catalog (ASTM A615, inch-pound sizes)
//!
//! Provides the discrete bar sizes available for longitudinal reinforcement
//! and the search that maps a continuous required area onto a bar layout.
//!
//! ## Bar Geometry
//!
//! - **#3 through #8**: nominal diameter is `n/8` inch, area is the circle
//!   area `π·d²/4`.
//! - **#9 through #11**: nominal area is `((n-1)/8)²` in² (equivalent to a
//!   square bar of the old size designation), diameter is back-derived as
//!   `2·√(A/π)`.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::materials::rebar::RebarCatalog;
//!
//! let catalog = RebarCatalog::standard();
//! let selection = catalog.fit_bars(2.0, 12.0, 2.0);
//!
//! assert!(selection.is_feasible());
//! assert!(selection.provided_area_in2 >= 2.0);
//! println!("{}", selection.display_name());
//! ```

use std::f64::consts::PI;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Smallest bar number in the standard catalog
pub const MIN_BAR_NUMBER: u8 = 3;

/// Largest bar number in the standard catalog
pub const MAX_BAR_NUMBER: u8 = 11;

/// Largest bar number whose diameter is a direct eighth-of-an-inch value
const LAST_EIGHTHS_BAR_NUMBER: u8 = 8;

/// Minimum number of bars carried by any face of a section
pub const MIN_BARS_PER_FACE: u32 = 2;

static STANDARD_CATALOG: Lazy<RebarCatalog> = Lazy::new(|| {
    let sizes = (MIN_BAR_NUMBER..=MAX_BAR_NUMBER)
        .map(RebarSize::standard)
        .collect();
    RebarCatalog { sizes }
});

/// A single standardized bar size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RebarSize {
    /// Bar designation number (e.g., 5 for a #5 bar)
    pub number: u8,

    /// Nominal diameter (in)
    pub diameter_in: f64,

    /// Nominal cross-sectional area (in²)
    pub area_in2: f64,
}

impl RebarSize {
    /// Nominal geometry for a standard bar number.
    fn standard(number: u8) -> Self {
        let n = f64::from(number);
        if number <= LAST_EIGHTHS_BAR_NUMBER {
            let diameter_in = n / 8.0;
            RebarSize {
                number,
                diameter_in,
                area_in2: PI * diameter_in.powi(2) / 4.0,
            }
        } else {
            let area_in2 = ((n - 1.0) / 8.0).powi(2);
            RebarSize {
                number,
                diameter_in: 2.0 * (area_in2 / PI).sqrt(),
                area_in2,
            }
        }
    }

    /// Number of bars of this size needed to *exceed* a required area.
    ///
    /// This is `floor(required / area) + 1`, so an exact multiple still
    /// gets one extra bar. The result is never below [`MIN_BARS_PER_FACE`].
    pub fn count_for_area(&self, required_area_in2: f64) -> u32 {
        // `as` saturates: NaN and negative ratios become 0
        let whole_bars = (required_area_in2 / self.area_in2).floor() as u32;
        whole_bars.saturating_add(1).max(MIN_BARS_PER_FACE)
    }

    /// Width needed for `count` bars in one layer with one aggregate size of
    /// clear spacing between adjacent bars.
    pub fn layer_width_in(&self, count: u32, aggregate_size_in: f64) -> f64 {
        let count = f64::from(count);
        self.diameter_in * count + aggregate_size_in * (count - 1.0)
    }
}

/// A chosen bar layout for one face of a section.
///
/// A `count` of zero is the infeasible-layout sentinel: no bar size in the
/// catalog fits the available width. Callers must treat it as a failed
/// design, never as "no reinforcement needed".
///
/// ## JSON Example
///
/// ```json
/// { "bar_size": 6, "count": 5, "provided_area_in2": 2.209 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarSelection {
    /// Bar designation number
    pub bar_size: u8,

    /// Number of bars in the layer (0 = infeasible)
    pub count: u32,

    /// Total provided area, `area(bar_size) × count` (in²)
    pub provided_area_in2: f64,
}

impl BarSelection {
    /// Build a selection of `count` bars of the given size.
    pub fn new(size: &RebarSize, count: u32) -> Self {
        BarSelection {
            bar_size: size.number,
            count,
            provided_area_in2: size.area_in2 * f64::from(count),
        }
    }

    /// Check whether this selection describes a buildable layout.
    pub fn is_feasible(&self) -> bool {
        self.count > 0
    }

    /// Short display form (e.g., "5-#6")
    pub fn display_name(&self) -> String {
        format!("{}-#{}", self.count, self.bar_size)
    }
}

/// Read-only table of available bar sizes, in ascending bar-number order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebarCatalog {
    sizes: Vec<RebarSize>,
}

impl RebarCatalog {
    /// The standard #3 through #11 catalog.
    ///
    /// Built once on first use and shared by every caller afterwards.
    pub fn standard() -> &'static RebarCatalog {
        &STANDARD_CATALOG
    }

    /// All sizes in ascending bar-number order.
    pub fn sizes(&self) -> &[RebarSize] {
        &self.sizes
    }

    /// Look up a size by bar number.
    pub fn get(&self, number: u8) -> Option<&RebarSize> {
        self.sizes.iter().find(|size| size.number == number)
    }

    /// Smallest size in the catalog.
    pub fn smallest(&self) -> &RebarSize {
        &self.sizes[0]
    }

    /// Largest size in the catalog.
    pub fn largest(&self) -> &RebarSize {
        &self.sizes[self.sizes.len() - 1]
    }

    /// Minimum reinforcement layout: two bars of the smallest size.
    pub fn minimum_selection(&self) -> BarSelection {
        BarSelection::new(self.smallest(), MIN_BARS_PER_FACE)
    }

    /// Infeasible-layout sentinel: the largest size with zero bars.
    pub fn infeasible_selection(&self) -> BarSelection {
        BarSelection::new(self.largest(), 0)
    }

    /// Choose the layout with the least provided area that meets
    /// `required_area_in2` and fits in one layer.
    ///
    /// For every size the bar count comes from
    /// [`RebarSize::count_for_area`]. A candidate fits when
    /// `available_width_in >= d_b·n + aggregate_size_in·(n-1)` (equality
    /// fits). Among fitting candidates the smallest total area wins; on a
    /// tie the smaller bar number wins.
    ///
    /// Returns [`RebarCatalog::infeasible_selection`] when nothing fits.
    pub fn fit_bars(
        &self,
        required_area_in2: f64,
        available_width_in: f64,
        aggregate_size_in: f64,
    ) -> BarSelection {
        let mut best: Option<BarSelection> = None;

        for size in &self.sizes {
            let count = size.count_for_area(required_area_in2);
            if available_width_in < size.layer_width_in(count, aggregate_size_in) {
                continue;
            }

            let candidate = BarSelection::new(size, count);
            let improves = match &best {
                None => true,
                Some(current) => candidate.provided_area_in2 < current.provided_area_in2,
            };
            if improves {
                best = Some(candidate);
            }
        }

        best.unwrap_or_else(|| self.infeasible_selection())
    }
}

/// Run [`RebarCatalog::fit_bars`] against the standard catalog.
pub fn fit_bars(required_area_in2: f64, available_width_in: f64, aggregate_size_in: f64) -> BarSelection {
    RebarCatalog::standard().fit_bars(required_area_in2, available_width_in, aggregate_size_in)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force_minimum(required: f64, width: f64, aggregate: f64) -> Option<f64> {
        let catalog = RebarCatalog::standard();
        let mut best: Option<f64> = None;
        for size in catalog.sizes() {
            // Fewest bars whose total area strictly exceeds the requirement
            let Some(count) = (MIN_BARS_PER_FACE..500)
                .find(|&n| size.area_in2 * f64::from(n) > required)
            else {
                continue;
            };
            if width < size.layer_width_in(count, aggregate) {
                continue;
            }
            let area = size.area_in2 * f64::from(count);
            if best.map_or(true, |b| area < b) {
                best = Some(area);
            }
        }
        best
    }

    #[test]
    fn test_catalog_geometry() {
        let catalog = RebarCatalog::standard();
        assert_eq!(catalog.sizes().len(), 9);
        assert_eq!(catalog.smallest().number, 3);
        assert_eq!(catalog.largest().number, 11);

        let no3 = catalog.get(3).unwrap();
        assert_eq!(no3.diameter_in, 0.375);
        // A = π(0.375)²/4 = 0.1104
        assert!((no3.area_in2 - 0.11045).abs() < 1e-4);

        let no8 = catalog.get(8).unwrap();
        assert_eq!(no8.diameter_in, 1.0);
        assert!((no8.area_in2 - PI / 4.0).abs() < 1e-12);

        let no9 = catalog.get(9).unwrap();
        assert_eq!(no9.area_in2, 1.0);
        // d = 2√(1/π) = 1.128
        assert!((no9.diameter_in - 1.12838).abs() < 1e-4);

        let no11 = catalog.get(11).unwrap();
        assert_eq!(no11.area_in2, 1.5625);
        assert!((no11.diameter_in - 1.41047).abs() < 1e-4);

        assert!(catalog.get(12).is_none());
    }

    #[test]
    fn test_count_rounds_up_on_exact_multiple() {
        let no9 = RebarCatalog::standard().get(9).unwrap();
        // 2.0 / 1.0 = 2 exactly, still bumped to 3
        assert_eq!(no9.count_for_area(2.0), 3);
        assert_eq!(no9.count_for_area(2.5), 3);
        // Never fewer than two bars
        assert_eq!(no9.count_for_area(0.0), 2);
        assert_eq!(no9.count_for_area(-1.0), 2);
        assert_eq!(no9.count_for_area(f64::NAN), 2);
    }

    #[test]
    fn test_fit_two_square_inches_in_twelve_inches() {
        let selection = fit_bars(2.0, 12.0, 2.0);

        // #6: 5 bars -> 0.75*5 + 2*4 = 11.75 in fits, A = 2.209 in²
        assert!(selection.is_feasible());
        assert_eq!(selection.bar_size, 6);
        assert_eq!(selection.count, 5);
        assert!(selection.provided_area_in2 >= 2.0);

        let expected = brute_force_minimum(2.0, 12.0, 2.0).unwrap();
        assert!((selection.provided_area_in2 - expected).abs() < 1e-12);
    }

    #[test]
    fn test_fit_matches_brute_force_over_range() {
        for i in 0..60 {
            let required = 0.1 * f64::from(i);
            let selection = fit_bars(required, 14.0, 1.5);
            match brute_force_minimum(required, 14.0, 1.5) {
                Some(expected) => {
                    assert!(selection.is_feasible());
                    assert!((selection.provided_area_in2 - expected).abs() < 1e-12);
                }
                None => assert!(!selection.is_feasible()),
            }
        }
    }

    #[test]
    fn test_fit_invariants() {
        let catalog = RebarCatalog::standard();
        for i in 1..40 {
            let required = 0.15 * f64::from(i);
            let selection = catalog.fit_bars(required, 16.0, 2.0);
            if !selection.is_feasible() {
                continue;
            }
            let size = catalog.get(selection.bar_size).unwrap();
            assert!(selection.provided_area_in2 >= required);
            assert!(selection.count >= MIN_BARS_PER_FACE);
            assert!(16.0 >= size.layer_width_in(selection.count, 2.0));
        }
    }

    #[test]
    fn test_fit_boundary_width_is_feasible() {
        // Two #3 bars with 2" clear: 0.375*2 + 2*1 = 2.75 in exactly
        let selection = fit_bars(0.1, 2.75, 2.0);
        assert!(selection.is_feasible());
        assert_eq!(selection.bar_size, 3);
        assert_eq!(selection.count, 2);

        let selection = fit_bars(0.1, 2.74, 2.0);
        assert!(!selection.is_feasible());
    }

    #[test]
    fn test_fit_is_monotonic() {
        let mut previous = 0.0;
        for i in 0..50 {
            let required = 0.1 * f64::from(i);
            let selection = fit_bars(required, 20.0, 2.0);
            if !selection.is_feasible() {
                break;
            }
            assert!(selection.provided_area_in2 >= previous);
            previous = selection.provided_area_in2;
        }
    }

    #[test]
    fn test_infeasible_layout_sentinel() {
        let selection = fit_bars(100.0, 12.0, 2.0);
        assert!(!selection.is_feasible());
        assert_eq!(selection.count, 0);
        assert_eq!(selection.bar_size, MAX_BAR_NUMBER);
        assert_eq!(selection.provided_area_in2, 0.0);
    }

    #[test]
    fn test_fit_is_idempotent() {
        assert_eq!(fit_bars(3.3, 18.0, 1.0), fit_bars(3.3, 18.0, 1.0));
    }

    #[test]
    fn test_minimum_selection() {
        let selection = RebarCatalog::standard().minimum_selection();
        assert_eq!(selection.bar_size, 3);
        assert_eq!(selection.count, 2);
        assert_eq!(selection.display_name(), "2-#3");
    }
}
