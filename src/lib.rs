//! Course-to-room allocation under capacity and time-slot constraints.
//!
//! Seats course sections in rooms while minimizing the estimated distance
//! the teacher and the enrolled students have to travel.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Room`, `Person`, `Point`, `Course`,
//!   `Allocation`, `Violation`
//! - **`cost`**: Travel-cost model with optional student sampling and an
//!   injectable random source (`CostEstimator`)
//! - **`scheduler`**: Greedy first-fit-decreasing allocator, swap-based local
//!   search, and allocation KPIs
//! - **`ga`**: Genetic optimizer (room-choice encoding, tournament selection,
//!   single-point crossover, top-N replacement)
//! - **`validation`**: Input integrity checks and allocation constraint checks
//! - **`error`**: `AllocationError` and `AllocationResult`
//!
//! # Randomness
//!
//! Every strategy takes its random source explicitly. Cost sampling draws
//! from the estimator's own generator, separate from operator randomness, so
//! seeding both makes a run fully reproducible. `CostModel::exact()` removes
//! sampling noise altogether.
//!
//! # Example
//!
//! ```
//! use classroom_alloc::cost::CostEstimator;
//! use classroom_alloc::models::{index_rooms, Course, Person, Room};
//! use classroom_alloc::scheduler::{GreedyAllocator, LocalSearch};
//! use rand::SeedableRng;
//!
//! let mut rooms = vec![Room::new("R1", 50, (0.0, 0.0)), Room::new("R2", 100, (30.0, 0.0))];
//! let courses = vec![
//!     Course::new("C1", 40, Person::new("T1", (0.0, 0.0)), 0),
//!     Course::new("C2", 90, Person::new("T2", (30.0, 0.0)), 0),
//! ];
//!
//! let mut estimator = CostEstimator::exact();
//! let greedy = GreedyAllocator::new().allocate(&courses, &mut rooms, &mut estimator).unwrap();
//!
//! let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
//! let improved = LocalSearch::new(100)
//!     .improve(&greedy, &courses, &index_rooms(&rooms), &mut estimator, &mut rng)
//!     .unwrap();
//! assert!(improved.final_cost <= improved.initial_cost);
//! ```

pub mod cost;
pub mod error;
pub mod ga;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{AllocationError, AllocationResult};
pub use ga::genetic_allocate;
pub use models::{Allocation, Course, Person, Point, Room};
pub use scheduler::{greedy_allocate, local_search};
