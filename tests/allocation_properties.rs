use classroom_alloc::cost::{CostEstimator, CostModel};
use classroom_alloc::ga::{AllocationGaProblem, GaConfig, GaRunner};
use classroom_alloc::models::{index_rooms, Allocation, Course, Person, Room};
use classroom_alloc::scheduler::{GreedyAllocator, LocalSearch};
use classroom_alloc::validation::check_allocation;
use classroom_alloc::AllocationError;
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn coordinate() -> impl Strategy<Value = (f64, f64)> {
    (0.0f64..100.0, 0.0f64..100.0)
}

fn rooms_strategy() -> impl Strategy<Value = Vec<Room>> {
    prop::collection::vec((10u32..120, coordinate()), 1..8).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (capacity, at))| Room::new(format!("R{i}"), capacity, at))
            .collect()
    })
}

fn courses_strategy() -> impl Strategy<Value = Vec<Course>> {
    let course = (
        5u32..100,
        0u32..3,
        coordinate(),
        prop::collection::vec(coordinate(), 0..40),
    );
    prop::collection::vec(course, 1..10).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (size, slot, teacher_at, students))| {
                let students = students
                    .into_iter()
                    .enumerate()
                    .map(|(j, at)| Person::new(format!("S{i}_{j}"), at))
                    .collect();
                let teacher = Person::new(format!("T{i}"), teacher_at);
                Course::new(format!("C{i}"), size, teacher, slot).with_students(students)
            })
            .collect()
    })
}

/// Replays first-fit-decreasing on copies of the rooms, returning either the
/// full assignment or the first course that finds no free room large enough.
fn first_fit_decreasing(courses: &[Course], rooms: &[Room]) -> Result<Allocation, String> {
    let model = CostModel::exact();
    let mut rng = SmallRng::seed_from_u64(0);
    let mut taken: Vec<(usize, u32)> = Vec::new();
    let mut order: Vec<&Course> = courses.iter().collect();
    order.sort_by(|a, b| b.size.cmp(&a.size));

    let mut allocation = Allocation::new();
    for course in order {
        let mut best: Option<(usize, f64)> = None;
        for (idx, room) in rooms.iter().enumerate() {
            if room.capacity < course.size || taken.contains(&(idx, course.time_slot)) {
                continue;
            }
            let cost = model.travel_cost(course, room, &mut rng);
            match best {
                Some((_, best_cost)) if cost >= best_cost => {}
                _ => best = Some((idx, cost)),
            }
        }
        let Some((idx, _)) = best else {
            return Err(course.id.clone());
        };
        taken.push((idx, course.time_slot));
        allocation.assign(course.id.clone(), rooms[idx].id.clone());
    }
    Ok(allocation)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn greedy_never_double_books_or_overfills(
        courses in courses_strategy(),
        rooms in rooms_strategy(),
    ) {
        let mut rooms = rooms;
        let mut estimator = CostEstimator::exact();

        match GreedyAllocator::new().allocate(&courses, &mut rooms, &mut estimator) {
            Ok(allocation) => {
                prop_assert_eq!(allocation.len(), courses.len());
                prop_assert!(check_allocation(&allocation, &courses, &rooms).is_empty());
                for course in &courses {
                    let room_id = allocation.room_for(&course.id).unwrap();
                    let room = rooms.iter().find(|r| r.id == room_id).unwrap();
                    prop_assert_eq!(room.occupant(course.time_slot), Some(course.id.as_str()));
                }
            }
            Err(AllocationError::Infeasible { course_id, time_slot }) => {
                let course = courses.iter().find(|c| c.id == course_id).unwrap();
                prop_assert_eq!(course.time_slot, time_slot);
                prop_assert!(rooms.iter().all(|r| r.schedule.is_empty()));
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn oversized_course_is_always_infeasible(
        courses in courses_strategy(),
        rooms in rooms_strategy(),
    ) {
        let max_capacity = rooms.iter().map(|r| r.capacity).max().unwrap();
        let mut courses = courses;
        courses[0].size = max_capacity + 1;
        let mut rooms = rooms;
        let mut estimator = CostEstimator::exact();

        let greedy = GreedyAllocator::new().allocate(&courses, &mut rooms, &mut estimator);
        let greedy_infeasible = matches!(greedy, Err(AllocationError::Infeasible { .. }));
        prop_assert!(greedy_infeasible, "greedy returned {:?}", greedy);

        let ga = AllocationGaProblem::new(&courses, &rooms, CostEstimator::exact());
        let ga_rejected = matches!(ga, Err(AllocationError::NoFeasibleRoom { .. }));
        prop_assert!(ga_rejected, "genetic problem was built for an oversized course");
    }

    #[test]
    fn local_search_keeps_validity_and_descends(
        courses in courses_strategy(),
        rooms in rooms_strategy(),
        seed in any::<u64>(),
    ) {
        let mut rooms = rooms;
        let mut estimator = CostEstimator::exact();
        let greedy = GreedyAllocator::new().allocate(&courses, &mut rooms, &mut estimator);
        let Ok(start) = greedy else {
            return Ok(());
        };

        let by_id = index_rooms(&rooms);
        let mut rng = SmallRng::seed_from_u64(seed);
        let result = LocalSearch::new(500)
            .improve(&start, &courses, &by_id, &mut estimator, &mut rng)
            .unwrap();

        prop_assert!(check_allocation(&result.allocation, &courses, &rooms).is_empty());
        prop_assert!(result.final_cost <= result.initial_cost + 1e-9);
        let mut previous = result.initial_cost;
        for &cost in &result.cost_history {
            prop_assert!(cost < previous);
            previous = cost;
        }
    }

    #[test]
    fn genetic_respects_capacity_and_never_worsens(
        courses in courses_strategy(),
        rooms in rooms_strategy(),
        seed in any::<u64>(),
    ) {
        let problem = AllocationGaProblem::new(&courses, &rooms, CostEstimator::exact());
        let Ok(mut problem) = problem else {
            let max_capacity = rooms.iter().map(|r| r.capacity).max().unwrap();
            prop_assert!(courses.iter().any(|c| c.size > max_capacity));
            return Ok(());
        };

        let config = GaConfig::default()
            .with_population_size(10)
            .with_generations(20)
            .with_seed(seed);
        let result = GaRunner::run_seeded(&mut problem, &config).unwrap();
        prop_assert!(result.best_fitness <= result.initial_best_fitness);

        let allocation = problem.decode(&result.best).unwrap();
        prop_assert_eq!(allocation.len(), courses.len());
        let by_id = index_rooms(&rooms);
        for course in &courses {
            let room = &by_id[allocation.room_for(&course.id).unwrap()];
            prop_assert!(room.fits(course.size));
        }
    }

    #[test]
    fn greedy_fails_exactly_when_first_fit_decreasing_gets_stuck(
        courses in courses_strategy(),
        rooms in rooms_strategy(),
    ) {
        let expected = first_fit_decreasing(&courses, &rooms);
        let mut rooms = rooms;
        let mut estimator = CostEstimator::exact();

        match (GreedyAllocator::new().allocate(&courses, &mut rooms, &mut estimator), expected) {
            (Ok(allocation), Ok(replayed)) => prop_assert_eq!(allocation, replayed),
            (Err(AllocationError::Infeasible { course_id, .. }), Err(stuck)) => {
                prop_assert_eq!(course_id, stuck);
            }
            (actual, replayed) => {
                prop_assert!(false, "greedy {:?}, replay {:?}", actual, replayed);
            }
        }
    }
}
