//! Allocation quality metrics (KPIs).
//!
//! Computes comparable indicators for allocations produced by different
//! strategies over the same rooms and courses.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total Cost | Sum of travel costs over all courses |
//! | Cost per Person | Total cost / (teachers + enrolled students) |
//! | Seat Utilization | Mean of course size / room capacity |
//! | Rooms Used | Distinct rooms hosting at least one course |
//! | Violations | Hard-constraint violations (capacity, double booking) |

use std::collections::{HashMap, HashSet};

use rand::Rng;

use crate::cost::{resolve_room, CostEstimator};
use crate::error::AllocationResult;
use crate::models::{index_rooms, Allocation, Course, CourseId, Room};
use crate::validation::check_allocation;

/// Allocation performance indicators.
#[derive(Debug, Clone)]
pub struct AllocationKpi {
    /// Sum of travel costs.
    pub total_cost: f64,
    /// Travel cost per course.
    pub cost_by_course: HashMap<CourseId, f64>,
    /// Total cost divided by the number of travelling people.
    pub cost_per_person: f64,
    /// Mean fraction of seats filled (0.0..=1.0 when capacity holds).
    pub avg_seat_utilization: f64,
    /// Distinct rooms in use.
    pub rooms_used: usize,
    /// Number of hard-constraint violations.
    pub violation_count: usize,
}

impl AllocationKpi {
    /// Computes KPIs for an allocation.
    ///
    /// # Errors
    /// Fails if a course is unassigned or seated in an unknown room.
    pub fn calculate<C: Rng>(
        allocation: &Allocation,
        courses: &[Course],
        rooms: &[Room],
        estimator: &mut CostEstimator<C>,
    ) -> AllocationResult<Self> {
        let rooms_by_id = index_rooms(rooms);
        let mut cost_by_course = HashMap::with_capacity(courses.len());
        let mut total_cost = 0.0;
        let mut utilization_sum = 0.0;
        let mut people = 0usize;
        let mut used = HashSet::new();

        for course in courses {
            let room = resolve_room(allocation, course, &rooms_by_id)?;
            let cost = estimator.travel_cost(course, room);
            total_cost += cost;
            cost_by_course.insert(course.id.clone(), cost);
            people += 1 + course.enrolled();
            if room.capacity > 0 {
                utilization_sum += course.size as f64 / room.capacity as f64;
            }
            used.insert(room.id.as_str());
        }

        let cost_per_person = if people == 0 {
            0.0
        } else {
            total_cost / people as f64
        };
        let avg_seat_utilization = if courses.is_empty() {
            0.0
        } else {
            utilization_sum / courses.len() as f64
        };

        Ok(Self {
            total_cost,
            cost_by_course,
            cost_per_person,
            avg_seat_utilization,
            rooms_used: used.len(),
            violation_count: check_allocation(allocation, courses, rooms).len(),
        })
    }

    /// Whether the allocation is valid and within the given cost budget.
    pub fn meets_thresholds(&self, max_total_cost: f64, min_utilization: f64) -> bool {
        self.violation_count == 0
            && self.total_cost <= max_total_cost
            && self.avg_seat_utilization >= min_utilization
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Person;

    fn sample() -> (Vec<Course>, Vec<Room>) {
        let rooms = vec![Room::new("R1", 50, (0.0, 0.0)), Room::new("R2", 100, (10.0, 0.0))];
        let courses = vec![
            Course::new("C1", 25, Person::new("T1", (0.0, 0.0)), 0)
                .with_student(Person::new("S1", (3.0, 4.0))),
            Course::new("C2", 100, Person::new("T2", (10.0, 0.0)), 0),
        ];
        (courses, rooms)
    }

    #[test]
    fn test_kpi_basic() {
        let (courses, rooms) = sample();
        let mut a = Allocation::new();
        a.assign("C1", "R1");
        a.assign("C2", "R2");

        let mut est = CostEstimator::exact();
        let kpi = AllocationKpi::calculate(&a, &courses, &rooms, &mut est).unwrap();

        assert!((kpi.total_cost - 5.0).abs() < 1e-10);
        assert!((kpi.cost_by_course["C1"] - 5.0).abs() < 1e-10);
        assert!((kpi.cost_by_course["C2"] - 0.0).abs() < 1e-10);
        // 3 people: T1, S1, T2
        assert!((kpi.cost_per_person - 5.0 / 3.0).abs() < 1e-10);
        // (25/50 + 100/100) / 2
        assert!((kpi.avg_seat_utilization - 0.75).abs() < 1e-10);
        assert_eq!(kpi.rooms_used, 2);
        assert_eq!(kpi.violation_count, 0);
        assert!(kpi.meets_thresholds(5.0, 0.5));
        assert!(!kpi.meets_thresholds(4.0, 0.5));
    }

    #[test]
    fn test_kpi_counts_violations() {
        let (courses, rooms) = sample();
        let mut a = Allocation::new();
        a.assign("C1", "R2");
        a.assign("C2", "R2");

        let mut est = CostEstimator::exact();
        let kpi = AllocationKpi::calculate(&a, &courses, &rooms, &mut est).unwrap();
        assert_eq!(kpi.rooms_used, 1);
        assert_eq!(kpi.violation_count, 1);
        assert!(!kpi.meets_thresholds(f64::INFINITY, 0.0));
    }

    #[test]
    fn test_kpi_empty() {
        let mut est = CostEstimator::exact();
        let kpi = AllocationKpi::calculate(&Allocation::new(), &[], &[], &mut est).unwrap();
        assert_eq!(kpi.total_cost, 0.0);
        assert_eq!(kpi.cost_per_person, 0.0);
        assert_eq!(kpi.avg_seat_utilization, 0.0);
        assert_eq!(kpi.rooms_used, 0);
    }

    #[test]
    fn test_kpi_requires_complete_allocation() {
        let (courses, rooms) = sample();
        let mut est = CostEstimator::exact();
        assert!(AllocationKpi::calculate(&Allocation::new(), &courses, &rooms, &mut est).is_err());
    }
}
