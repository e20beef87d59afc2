//! Swap-based hill climbing.
//!
//! # Algorithm
//!
//! Repeat for a fixed number of trials:
//! 1. Sample two distinct courses uniformly at random.
//! 2. Skip unless they meet in the same time-slot (rooms are partitioned by
//!    time-slot, a cross-slot swap is meaningless) and each room seats the
//!    incoming course.
//! 3. Estimate the marginal delta of exchanging their rooms from the four
//!    touched assignments and accept the swap only if `delta < 0`.
//!
//! No equal-or-worse moves are accepted, so the search stalls in the first
//! local optimum it reaches. There is no early stopping either: all trials
//! run even when no improving move is left.
//!
//! Only the allocation mapping is updated. Room occupancy tables are borrowed
//! immutably and will not reflect the swaps.
//!
//! # Reference
//! Aarts & Lenstra (2003), "Local Search in Combinatorial Optimization", Ch. 1

use std::collections::HashMap;

use log::debug;
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cost::{resolve_room, CostEstimator};
use crate::error::AllocationResult;
use crate::models::{Allocation, Course, Room, RoomId};

/// Default number of swap trials.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Swap-based hill-climbing improver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalSearch {
    /// Number of swap trials (not accepted swaps).
    pub max_iterations: usize,
}

impl Default for LocalSearch {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Outcome of a local-search run.
#[derive(Debug, Clone)]
pub struct LocalSearchResult {
    /// Improved mapping.
    pub allocation: Allocation,
    /// Estimated cost of the input allocation.
    pub initial_cost: f64,
    /// Running cost after the last accepted swap.
    pub final_cost: f64,
    /// Trials performed.
    pub iterations: usize,
    /// Number of accepted swaps.
    pub accepted_swaps: usize,
    /// Running cost after each accepted swap.
    pub cost_history: Vec<f64>,
}

impl LocalSearch {
    /// Creates an improver with the given trial budget.
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    /// Sets the trial budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Improves `allocation` and returns a modified copy.
    ///
    /// `estimator` supplies travel costs; `rng` drives course sampling.
    ///
    /// # Errors
    /// [`UnassignedCourse`](crate::error::AllocationError::UnassignedCourse) or
    /// [`UnknownRoom`](crate::error::AllocationError::UnknownRoom) if the input
    /// allocation does not resolve every course to a known room.
    pub fn improve<R: Rng, C: Rng>(
        &self,
        allocation: &Allocation,
        courses: &[Course],
        rooms_by_id: &HashMap<RoomId, Room>,
        estimator: &mut CostEstimator<C>,
        rng: &mut R,
    ) -> AllocationResult<LocalSearchResult> {
        let mut current = allocation.clone();
        let initial_cost = estimator.allocation_cost(&current, courses, rooms_by_id)?;
        let mut current_cost = initial_cost;
        let mut cost_history = Vec::new();

        if courses.len() < 2 {
            return Ok(LocalSearchResult {
                allocation: current,
                initial_cost,
                final_cost: current_cost,
                iterations: 0,
                accepted_swaps: 0,
                cost_history,
            });
        }

        for _ in 0..self.max_iterations {
            let picked = index::sample(rng, courses.len(), 2);
            let (c1, c2) = (&courses[picked.index(0)], &courses[picked.index(1)]);
            if c1.time_slot != c2.time_slot {
                continue;
            }

            let r1 = resolve_room(&current, c1, rooms_by_id)?;
            let r2 = resolve_room(&current, c2, rooms_by_id)?;
            if !r1.fits(c2.size) || !r2.fits(c1.size) {
                continue;
            }

            let delta = estimator.travel_cost(c1, r2) + estimator.travel_cost(c2, r1)
                - estimator.travel_cost(c1, r1)
                - estimator.travel_cost(c2, r2);
            if delta < 0.0 {
                current.swap_rooms(&c1.id, &c2.id);
                current_cost += delta;
                cost_history.push(current_cost);
            }
        }

        debug!(
            "local search: {} trials, {} accepted swaps, cost {initial_cost:.2} -> {current_cost:.2}",
            self.max_iterations,
            cost_history.len()
        );

        Ok(LocalSearchResult {
            allocation: current,
            initial_cost,
            final_cost: current_cost,
            iterations: self.max_iterations,
            accepted_swaps: cost_history.len(),
            cost_history,
        })
    }
}
