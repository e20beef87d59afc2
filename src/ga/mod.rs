//! GA-based allocation search.
//!
//! Searches the allocation space independently of the greedy/local-search
//! pipeline, producing an allocation from scratch.
//!
//! # Encoding
//!
//! One gene per course, indexing into that course's feasible-room list
//! (capacity-checked against the initial occupancy snapshot). The encoding
//! guarantees capacity but not mutual exclusivity among courses sharing a
//! time-slot; use [`check_allocation`](crate::validation::check_allocation)
//! on the result if double booking matters to the caller.
//!
//! # Submodules
//!
//! - [`operators`]: tournament selection, single-point crossover, reassign mutation
//!
//! # Reference
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

mod chromosome;
pub mod operators;
mod problem;
mod runner;

pub use chromosome::AllocationChromosome;
pub use problem::AllocationGaProblem;
pub use runner::{
    GaConfig, GaProblem, GaResult, GaRunner, Individual, DEFAULT_CROSSOVER_RATE,
    DEFAULT_GENERATIONS, DEFAULT_MUTATION_RATE, DEFAULT_POPULATION_SIZE, DEFAULT_SEED,
};

use crate::cost::{CostEstimator, CostModel};
use crate::error::AllocationResult;
use crate::models::{Allocation, Course, Room};

/// Runs the genetic optimizer with the default sampled cost model.
///
/// Operator randomness is seeded with [`DEFAULT_SEED`]; cost sampling draws
/// from operating-system entropy.
///
/// # Errors
/// [`NoFeasibleRoom`](crate::error::AllocationError::NoFeasibleRoom) before
/// any generation runs if some course fits no room, or
/// [`InvalidConfig`](crate::error::AllocationError::InvalidConfig) for bad
/// parameters.
pub fn genetic_allocate(
    courses: &[Course],
    rooms: &[Room],
    population_size: usize,
    generations: usize,
    crossover_rate: f64,
    mutation_rate: f64,
) -> AllocationResult<Allocation> {
    let config = GaConfig::default()
        .with_population_size(population_size)
        .with_generations(generations)
        .with_crossover_rate(crossover_rate)
        .with_mutation_rate(mutation_rate);
    config.validate()?;

    let estimator = CostEstimator::from_os_rng(CostModel::default());
    let mut problem = AllocationGaProblem::new(courses, rooms, estimator)?;
    let result = GaRunner::run_seeded(&mut problem, &config)?;
    problem.decode(&result.best)
}
