//! Constructive and improving allocators, plus KPI evaluation.
//!
//! # Algorithms
//!
//! - [`GreedyAllocator`]: first-fit-decreasing construction. Produces one
//!   feasible allocation quickly and books the rooms it uses.
//! - [`LocalSearch`]: swap-based hill climbing over an existing allocation.
//!
//! A typical pipeline seats courses greedily and then hands the result to
//! local search. Neither is optimal.
//!
//! # KPI
//!
//! [`AllocationKpi`] summarizes total travel cost, seat utilization, and
//! constraint violations so allocations from different strategies can be
//! compared.
//!
//! # References
//!
//! - Johnson (1973), "Near-optimal bin packing algorithms"
//! - Aarts & Lenstra (2003), "Local Search in Combinatorial Optimization"

mod greedy;
mod kpi;
mod local_search;

use std::collections::HashMap;

pub use greedy::GreedyAllocator;
pub use kpi::AllocationKpi;
pub use local_search::{LocalSearch, LocalSearchResult, DEFAULT_MAX_ITERATIONS};

use crate::cost::{CostEstimator, CostModel};
use crate::error::AllocationResult;
use crate::models::{Allocation, Course, Room, RoomId};

/// Seats every course greedily using the default sampled cost model.
///
/// Books the chosen rooms' time-slots in `rooms`.
pub fn greedy_allocate(courses: &[Course], rooms: &mut [Room]) -> AllocationResult<Allocation> {
    let mut estimator = CostEstimator::from_os_rng(CostModel::default());
    GreedyAllocator::new().allocate(courses, rooms, &mut estimator)
}

/// Improves an allocation with `max_iterations` swap trials using the default
/// sampled cost model.
pub fn local_search(
    allocation: &Allocation,
    courses: &[Course],
    rooms_by_id: &HashMap<RoomId, Room>,
    max_iterations: usize,
) -> AllocationResult<Allocation> {
    let mut estimator = CostEstimator::from_os_rng(CostModel::default());
    let mut rng = rand::rng();
    LocalSearch::new(max_iterations)
        .improve(allocation, courses, rooms_by_id, &mut estimator, &mut rng)
        .map(|result| result.allocation)
}
