//! Greedy first-fit-decreasing allocator.
//!
//! # Algorithm
//!
//! 1. Sort courses by size, largest first (stable: ties keep input order).
//! 2. For each course, collect the rooms that are free at its time-slot and
//!    seat at least its size.
//! 3. Seat the course in the feasible room with the lowest travel cost and
//!    mark the room occupied at that time-slot.
//!
//! Seating the largest courses first leaves the flexible small ones for the
//! end, which reduces the chance of running out of large rooms.
//!
//! There is no backtracking: the first course without a feasible room aborts
//! the whole call.
//!
//! # Complexity
//! O(n log n + n · m) cost evaluations, n = courses, m = rooms.
//!
//! # Reference
//! Johnson (1973), "Near-optimal bin packing algorithms" (first-fit decreasing)

use log::{debug, trace};
use rand::Rng;

use crate::cost::CostEstimator;
use crate::error::{AllocationError, AllocationResult};
use crate::models::{Allocation, Course, Room, TimeSlot};

/// Constructive first-fit-decreasing allocator.
///
/// Writes each commitment into the chosen room's occupancy table. On failure
/// the bookings made during the call are rolled back, so the rooms are left
/// as they were passed in.
///
/// # Example
///
/// ```
/// use classroom_alloc::cost::CostEstimator;
/// use classroom_alloc::models::{Course, Person, Room};
/// use classroom_alloc::scheduler::GreedyAllocator;
///
/// let mut rooms = vec![Room::new("R1", 50, (0.0, 0.0)), Room::new("R2", 100, (0.0, 0.0))];
/// let courses = vec![
///     Course::new("C1", 40, Person::new("T1", (0.0, 0.0)), 0),
///     Course::new("C2", 90, Person::new("T2", (0.0, 0.0)), 0),
/// ];
///
/// let mut estimator = CostEstimator::exact();
/// let allocation = GreedyAllocator::new()
///     .allocate(&courses, &mut rooms, &mut estimator)
///     .unwrap();
/// assert_eq!(allocation.room_for("C2"), Some("R2"));
/// assert_eq!(allocation.room_for("C1"), Some("R1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyAllocator;

impl GreedyAllocator {
    /// Creates a greedy allocator.
    pub fn new() -> Self {
        Self
    }

    /// Seats every course, or fails with [`AllocationError::Infeasible`].
    pub fn allocate<C: Rng>(
        &self,
        courses: &[Course],
        rooms: &mut [Room],
        estimator: &mut CostEstimator<C>,
    ) -> AllocationResult<Allocation> {
        let mut committed: Vec<(usize, TimeSlot)> = Vec::with_capacity(courses.len());
        let result = Self::place_all(courses, rooms, estimator, &mut committed);

        if let Err(err) = &result {
            debug!("greedy allocation aborted: {err}; rolling back {} bookings", committed.len());
            for (room_idx, slot) in committed.into_iter().rev() {
                rooms[room_idx].release(slot);
            }
        }
        result
    }

    fn place_all<C: Rng>(
        courses: &[Course],
        rooms: &mut [Room],
        estimator: &mut CostEstimator<C>,
        committed: &mut Vec<(usize, TimeSlot)>,
    ) -> AllocationResult<Allocation> {
        let mut allocation = Allocation::new();

        for course_idx in Self::sort_courses(courses) {
            let course = &courses[course_idx];
            let (room_idx, cost) = Self::best_room(course, rooms, estimator).ok_or_else(|| {
                AllocationError::Infeasible {
                    course_id: course.id.clone(),
                    time_slot: course.time_slot,
                }
            })?;

            let room = &mut rooms[room_idx];
            room.occupy(course.time_slot, &course.id)?;
            committed.push((room_idx, course.time_slot));
            allocation.assign(course.id.clone(), room.id.clone());
            trace!(
                "seated {} (size {}, slot {}) in {} at cost {cost:.2}",
                course.id,
                course.size,
                course.time_slot,
                room.id
            );
        }

        debug!("greedy allocation seated {} courses", allocation.len());
        Ok(allocation)
    }

    /// Course indices by descending size.
    fn sort_courses(courses: &[Course]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..courses.len()).collect();
        order.sort_by(|&a, &b| courses[b].size.cmp(&courses[a].size));
        order
    }

    /// Cheapest available room; the first one wins ties.
    fn best_room<C: Rng>(
        course: &Course,
        rooms: &[Room],
        estimator: &mut CostEstimator<C>,
    ) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, room) in rooms.iter().enumerate() {
            if !room.is_available(course.time_slot, course.size) {
                continue;
            }
            let cost = estimator.travel_cost(course, room);
            match best {
                Some((_, best_cost)) if cost >= best_cost => {}
                _ => best = Some((idx, cost)),
            }
        }
        best
    }
}
