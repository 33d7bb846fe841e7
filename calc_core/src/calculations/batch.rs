//! # Batch Design
//!
//! Designs every member of a force table. Members are independent, so they
//! are evaluated on the rayon pool and merged by member id. Individual
//! solver calls stay single-threaded.
//!
//! To bound the number of workers, install a pool before calling:
//!
//! ```rust
//! use calc_core::calculations::{design_members, DesignContext};
//!
//! let pool = rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap();
//! let designs = pool.install(|| design_members(&[], &DesignContext::default()));
//! assert!(designs.is_empty());
//! ```

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::info;

use crate::calculations::member::{design_member, DesignContext, MemberDesign};
use crate::loads::MemberDemand;

/// Design all members in parallel, keyed by member id.
///
/// Demands sharing an id resolve to the design of the last one; callers
/// normally pass the output of [`crate::loads::ForceTable::member_demands`],
/// which has unique ids.
pub fn design_members(demands: &[MemberDemand], context: &DesignContext) -> BTreeMap<u32, MemberDesign> {
    info!(members = demands.len(), "designing members");

    let designs: BTreeMap<u32, MemberDesign> = demands
        .par_iter()
        .map(|demand| (demand.id, design_member(demand, context)))
        .collect();

    let flagged = designs.values().filter(|d| d.needs_review()).count();
    info!(members = designs.len(), flagged, "design complete");
    designs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{Extremum, ForceComponents};
    use crate::units::{KipFt, Kips};

    fn demand(id: u32, my: f64) -> MemberDemand {
        MemberDemand::new(id, 12.0, 20.0).with_extreme(
            Extremum::Max,
            ForceComponents {
                fz: Kips(10.0),
                my: KipFt(my),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let context = DesignContext::default();
        let demands: Vec<_> = (1..=40).rev().map(|id| demand(id, 5.0 * f64::from(id))).collect();

        let designs = design_members(&demands, &context);
        assert_eq!(designs.len(), 40);
        assert_eq!(designs.keys().copied().collect::<Vec<_>>(), (1..=40).collect::<Vec<_>>());

        for d in &demands {
            assert_eq!(designs[&d.id], design_member(d, &context));
        }
    }

    #[test]
    fn test_explicit_pool() {
        let context = DesignContext::default();
        let demands = vec![demand(7, 80.0), demand(3, 120.0)];
        let pool = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();

        let designs = pool.install(|| design_members(&demands, &context));
        assert_eq!(designs.len(), 2);
        assert!(designs.contains_key(&3));
    }
}
