//! Allocation GA problem definition.
//!
//! Implements [`GaProblem`] for course-to-room allocation. Bridges the
//! domain models (courses, rooms) and the cost estimator to the generic
//! runner.
//!
//! Feasible-room lists are computed once, up front, from capacity and the
//! occupancy snapshot of the rooms as passed in. They are per course and
//! never revised, so the search does not stop two simultaneous courses from
//! picking the same room.

use rand::rngs::SmallRng;
use rand::Rng;

use super::chromosome::AllocationChromosome;
use super::operators::{reassign_mutation, single_point_crossover};
use super::runner::GaProblem;
use crate::cost::CostEstimator;
use crate::error::{AllocationError, AllocationResult};
use crate::models::{Allocation, Course, Room};

/// GA problem definition for course-to-room allocation.
///
/// Fitness is the total estimated travel cost of the decoded allocation.
///
/// # Example
/// ```
/// use classroom_alloc::cost::CostEstimator;
/// use classroom_alloc::ga::{AllocationGaProblem, GaConfig, GaRunner};
/// use classroom_alloc::models::{Course, Person, Room};
///
/// let rooms = vec![Room::new("R1", 30, (0.0, 0.0)), Room::new("R2", 60, (5.0, 0.0))];
/// let courses = vec![Course::new("C1", 50, Person::new("T1", (1.0, 0.0)), 0)];
///
/// let mut problem = AllocationGaProblem::new(&courses, &rooms, CostEstimator::exact()).unwrap();
/// let config = GaConfig::default().with_population_size(10).with_generations(5);
/// let result = GaRunner::run_seeded(&mut problem, &config).unwrap();
/// assert_eq!(problem.decode(&result.best).unwrap().room_for("C1"), Some("R2"));
/// ```
pub struct AllocationGaProblem<'a, C = SmallRng> {
    courses: &'a [Course],
    rooms: &'a [Room],
    feasible_rooms: Vec<Vec<usize>>,
    estimator: CostEstimator<C>,
}

impl<'a, C: Rng> AllocationGaProblem<'a, C> {
    /// Precomputes feasible rooms per course.
    ///
    /// # Errors
    /// [`AllocationError::NoFeasibleRoom`] for the first course that no room
    /// can seat at its time-slot.
    pub fn new(
        courses: &'a [Course],
        rooms: &'a [Room],
        estimator: CostEstimator<C>,
    ) -> AllocationResult<Self> {
        let mut feasible_rooms = Vec::with_capacity(courses.len());
        for course in courses {
            let candidates: Vec<usize> = rooms
                .iter()
                .enumerate()
                .filter(|(_, room)| room.is_available(course.time_slot, course.size))
                .map(|(idx, _)| idx)
                .collect();
            if candidates.is_empty() {
                return Err(AllocationError::NoFeasibleRoom {
                    course_id: course.id.clone(),
                });
            }
            feasible_rooms.push(candidates);
        }

        Ok(Self {
            courses,
            rooms,
            feasible_rooms,
            estimator,
        })
    }

    /// Feasible room indices per course, in course order.
    pub fn feasible_rooms(&self) -> &[Vec<usize>] {
        &self.feasible_rooms
    }

    /// Decodes a chromosome into a course → room mapping.
    ///
    /// # Errors
    /// [`AllocationError::UnassignedCourse`] for the first course whose gene
    /// is missing or outside its feasible list.
    pub fn decode(&self, chromosome: &AllocationChromosome) -> AllocationResult<Allocation> {
        let mut room_indices = chromosome.room_indices(&self.feasible_rooms);
        let mut allocation = Allocation::new();
        for course in self.courses {
            let Some(idx) = room_indices.next().flatten() else {
                return Err(AllocationError::UnassignedCourse {
                    course_id: course.id.clone(),
                });
            };
            allocation.assign(course.id.clone(), self.rooms[idx].id.clone());
        }
        Ok(allocation)
    }

    /// Total travel cost of a chromosome.
    pub fn total_cost(&mut self, chromosome: &AllocationChromosome) -> f64 {
        let mut total = 0.0;
        for (course, room_idx) in self
            .courses
            .iter()
            .zip(chromosome.room_indices(&self.feasible_rooms))
        {
            total += match room_idx {
                Some(idx) => self.estimator.travel_cost(course, &self.rooms[idx]),
                None => f64::INFINITY,
            };
        }
        total
    }
}

impl<C: Rng> GaProblem for AllocationGaProblem<'_, C> {
    type Individual = AllocationChromosome;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> AllocationChromosome {
        AllocationChromosome::random(&self.feasible_rooms, rng)
    }

    fn evaluate(&mut self, individual: &AllocationChromosome) -> f64 {
        self.total_cost(individual)
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &AllocationChromosome,
        parent2: &AllocationChromosome,
        rng: &mut R,
    ) -> (AllocationChromosome, AllocationChromosome) {
        single_point_crossover(parent1, parent2, rng)
    }

    fn mutate<R: Rng>(&self, individual: &mut AllocationChromosome, rng: &mut R) {
        reassign_mutation(individual, &self.feasible_rooms, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{GaConfig, GaRunner};
    use crate::models::{index_rooms, Person};
    use crate::validation::check_allocation;
    use rand::SeedableRng;

    fn make_test_problem() -> (Vec<Course>, Vec<Room>) {
        let rooms = vec![
            Room::new("small", 20, (0.0, 0.0)),
            Room::new("mid", 50, (10.0, 0.0)),
            Room::new("big", 120, (20.0, 0.0)).with_booking(1, "fixed"),
        ];
        let courses = vec![
            Course::new("C1", 15, Person::new("T1", (0.0, 0.0)), 0)
                .with_student(Person::new("S1", (0.0, 1.0))),
            Course::new("C2", 45, Person::new("T2", (10.0, 0.0)), 1),
            Course::new("C3", 100, Person::new("T3", (20.0, 0.0)), 0)
                .with_student(Person::new("S3", (20.0, 2.0))),
        ];
        (courses, rooms)
    }

    #[test]
    fn test_feasible_rooms_respect_capacity_and_snapshot() {
        let (courses, rooms) = make_test_problem();
        let problem = AllocationGaProblem::new(&courses, &rooms, CostEstimator::exact()).unwrap();

        assert_eq!(problem.feasible_rooms()[0], vec![0, 1, 2]);
        // "big" is booked at slot 1
        assert_eq!(problem.feasible_rooms()[1], vec![1]);
        assert_eq!(problem.feasible_rooms()[2], vec![2]);
    }

    #[test]
    fn test_no_feasible_room_fails_up_front() {
        let rooms = vec![Room::new("R1", 50, (0.0, 0.0)), Room::new("R2", 100, (0.0, 0.0))];
        let courses = vec![Course::new("huge", 150, Person::new("T", (0.0, 0.0)), 0)];

        let err = AllocationGaProblem::new(&courses, &rooms, CostEstimator::exact())
            .err()
            .unwrap();
        assert_eq!(
            err,
            AllocationError::NoFeasibleRoom {
                course_id: "huge".into()
            }
        );
    }

    #[test]
    fn test_decode_and_cost() {
        let (courses, rooms) = make_test_problem();
        let mut problem =
            AllocationGaProblem::new(&courses, &rooms, CostEstimator::exact()).unwrap();

        let ch = AllocationChromosome::new(vec![0, 0, 0]);
        let a = problem.decode(&ch).unwrap();
        assert_eq!(a.room_for("C1"), Some("small"));
        assert_eq!(a.room_for("C2"), Some("mid"));
        assert_eq!(a.room_for("C3"), Some("big"));

        // C1: 0 + 1, C2: 0, C3: 0 + 2
        assert!((problem.evaluate(&ch) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_decode_rejects_out_of_range_genes() {
        let (courses, rooms) = make_test_problem();
        let problem = AllocationGaProblem::new(&courses, &rooms, CostEstimator::exact()).unwrap();

        // C2 has a single feasible room, so gene 1 points past its list.
        let err = problem
            .decode(&AllocationChromosome::new(vec![0, 1, 0]))
            .unwrap_err();
        assert_eq!(
            err,
            AllocationError::UnassignedCourse {
                course_id: "C2".into()
            }
        );

        // Too few genes leaves the last course without a room.
        let err = problem
            .decode(&AllocationChromosome::new(vec![0, 0]))
            .unwrap_err();
        assert_eq!(
            err,
            AllocationError::UnassignedCourse {
                course_id: "C3".into()
            }
        );
    }

    #[test]
    fn test_ga_finds_cheapest_rooms() {
        let (courses, rooms) = make_test_problem();
        let mut problem =
            AllocationGaProblem::new(&courses, &rooms, CostEstimator::exact()).unwrap();
        let config = GaConfig::default().with_population_size(20).with_generations(50);

        let result = GaRunner::run_seeded(&mut problem, &config).unwrap();
        assert!(result.best_fitness <= result.initial_best_fitness);
        assert!((result.best_fitness - 3.0).abs() < 1e-9);

        let a = problem.decode(&result.best).unwrap();
        assert_eq!(a.len(), 3);
        assert!(check_allocation(&a, &courses, &rooms).is_empty());
    }

    #[test]
    fn test_relaxation_allows_shared_room() {
        // Two simultaneous courses, both closest to the same room.
        let rooms = vec![Room::new("near", 50, (0.0, 0.0)), Room::new("far", 50, (100.0, 0.0))];
        let courses = vec![
            Course::new("C1", 10, Person::new("T1", (0.0, 0.0)), 0),
            Course::new("C2", 10, Person::new("T2", (0.0, 0.0)), 0),
        ];
        let mut problem =
            AllocationGaProblem::new(&courses, &rooms, CostEstimator::exact()).unwrap();
        let config = GaConfig::default().with_population_size(10).with_generations(30);

        let result = GaRunner::run_seeded(&mut problem, &config).unwrap();
        let a = problem.decode(&result.best).unwrap();
        assert_eq!(a.room_for("C1"), Some("near"));
        assert_eq!(a.room_for("C2"), Some("near"));
        assert_eq!(result.best_fitness, 0.0);
    }

    #[test]
    fn test_same_seeds_same_allocation() {
        let (courses, rooms) = make_test_problem();
        let config = GaConfig::default().with_population_size(8).with_generations(10);

        let run = || {
            let estimator = CostEstimator::seeded(crate::cost::CostModel::default(), 9);
            let mut problem = AllocationGaProblem::new(&courses, &rooms, estimator).unwrap();
            let mut rng = rand::rngs::SmallRng::seed_from_u64(3);
            let result = GaRunner::run(&mut problem, &config, &mut rng).unwrap();
            (problem.decode(&result.best).unwrap(), result.best_fitness)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_decoded_rooms_always_fit() {
        let (courses, rooms) = make_test_problem();
        let by_id = index_rooms(&rooms);
        let problem = AllocationGaProblem::new(&courses, &rooms, CostEstimator::exact()).unwrap();
        let mut rng = rand::rngs::SmallRng::seed_from_u64(17);

        for _ in 0..30 {
            let ch = problem.create_individual(&mut rng);
            let a = problem.decode(&ch).unwrap();
            for course in &courses {
                let room = &by_id[a.room_for(&course.id).unwrap()];
                assert!(room.fits(course.size));
            }
        }
    }
}
