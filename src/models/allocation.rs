//! Allocation (solution) model.
//!
//! An allocation maps every course to the room it is seated in. It is the
//! single authoritative output of each strategy: room occupancy tables are
//! only written by the greedy allocator and may lag behind swaps made later.
//!
//! [`Allocation::occupancy`] derives the canonical `(room, time-slot)` table
//! from the mapping, which is what constraint checks read.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Course, CourseId, RoomId, TimeSlot};

/// Course → room mapping.
///
/// Backed by a `BTreeMap` so iteration order (and therefore anything derived
/// from it) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Allocation {
    assignments: BTreeMap<CourseId, RoomId>,
}

/// A constraint violation found in an allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity ID (course or room).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of allocation violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationType {
    /// A course has no room.
    Unassigned,
    /// A course points at a room that does not exist.
    UnknownRoom,
    /// A room seats fewer people than the course needs.
    CapacityExceeded,
    /// Two or more courses share a room in the same time-slot.
    DoubleBooking,
}

impl Violation {
    fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }

    /// Creates an unassigned-course violation.
    pub fn unassigned(course_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::Unassigned, course_id, message)
    }

    /// Creates an unknown-room violation.
    pub fn unknown_room(course_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::UnknownRoom, course_id, message)
    }

    /// Creates a capacity exceeded violation.
    pub fn capacity_exceeded(course_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::CapacityExceeded, course_id, message)
    }

    /// Creates a double booking violation.
    pub fn double_booking(room_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::DoubleBooking, room_id, message)
    }
}

impl Allocation {
    /// Creates an empty allocation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seats a course in a room, returning the previous room if any.
    pub fn assign(
        &mut self,
        course_id: impl Into<CourseId>,
        room_id: impl Into<RoomId>,
    ) -> Option<RoomId> {
        self.assignments.insert(course_id.into(), room_id.into())
    }

    /// Room a course is seated in.
    pub fn room_for(&self, course_id: &str) -> Option<&str> {
        self.assignments.get(course_id).map(|s| s.as_str())
    }

    /// Whether the course has a room.
    pub fn contains(&self, course_id: &str) -> bool {
        self.assignments.contains_key(course_id)
    }

    /// Exchanges the rooms of two assigned courses.
    ///
    /// Returns `false` (and changes nothing) unless both are assigned.
    pub fn swap_rooms(&mut self, first: &str, second: &str) -> bool {
        let (Some(a), Some(b)) = (
            self.assignments.get(first).cloned(),
            self.assignments.get(second).cloned(),
        ) else {
            return false;
        };
        self.assignments.insert(first.to_string(), b);
        self.assignments.insert(second.to_string(), a);
        true
    }

    /// Number of seated courses.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether nothing is seated.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Iterates `(course, room)` pairs in course order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.assignments
            .iter()
            .map(|(c, r)| (c.as_str(), r.as_str()))
    }

    /// Borrow the underlying mapping.
    pub fn as_map(&self) -> &BTreeMap<CourseId, RoomId> {
        &self.assignments
    }

    /// Consumes the allocation into its mapping.
    pub fn into_map(self) -> BTreeMap<CourseId, RoomId> {
        self.assignments
    }

    /// Builds the `(room, time-slot)` → courses table for the given courses.
    ///
    /// Courses without an assignment are skipped. Any entry holding more than
    /// one course is a double booking.
    pub fn occupancy(&self, courses: &[Course]) -> BTreeMap<(RoomId, TimeSlot), Vec<CourseId>> {
        let mut table: BTreeMap<(RoomId, TimeSlot), Vec<CourseId>> = BTreeMap::new();
        for course in courses {
            if let Some(room_id) = self.assignments.get(&course.id) {
                table
                    .entry((room_id.clone(), course.time_slot))
                    .or_default()
                    .push(course.id.clone());
            }
        }
        table
    }
}

impl FromIterator<(CourseId, RoomId)> for Allocation {
    fn from_iter<I: IntoIterator<Item = (CourseId, RoomId)>>(iter: I) -> Self {
        Self {
            assignments: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<CourseId, RoomId>> for Allocation {
    fn from(assignments: BTreeMap<CourseId, RoomId>) -> Self {
        Self { assignments }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Person;

    fn course(id: &str, slot: TimeSlot) -> Course {
        Course::new(id, 10, Person::new("T", (0.0, 0.0)), slot)
    }

    #[test]
    fn test_assign_and_lookup() {
        let mut a = Allocation::new();
        assert!(a.is_empty());
        assert_eq!(a.assign("C1", "R1"), None);
        assert_eq!(a.assign("C1", "R2"), Some("R1".to_string()));
        assert_eq!(a.room_for("C1"), Some("R2"));
        assert_eq!(a.room_for("C2"), None);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_swap_rooms() {
        let mut a: Allocation = [
            ("C1".to_string(), "R1".to_string()),
            ("C2".to_string(), "R2".to_string()),
        ]
        .into_iter()
        .collect();

        assert!(a.swap_rooms("C1", "C2"));
        assert_eq!(a.room_for("C1"), Some("R2"));
        assert_eq!(a.room_for("C2"), Some("R1"));

        assert!(!a.swap_rooms("C1", "C9"));
        assert_eq!(a.room_for("C1"), Some("R2"));
    }

    #[test]
    fn test_occupancy_detects_shared_slot() {
        let courses = vec![course("C1", 0), course("C2", 0), course("C3", 1)];
        let mut a = Allocation::new();
        a.assign("C1", "R1");
        a.assign("C2", "R1");
        a.assign("C3", "R1");

        let table = a.occupancy(&courses);
        assert_eq!(table[&("R1".to_string(), 0)], vec!["C1", "C2"]);
        assert_eq!(table[&("R1".to_string(), 1)], vec!["C3"]);
    }

    #[test]
    fn test_iteration_is_ordered() {
        let mut a = Allocation::new();
        a.assign("C2", "R1");
        a.assign("C1", "R2");
        let ids: Vec<&str> = a.iter().map(|(c, _)| c).collect();
        assert_eq!(ids, vec!["C1", "C2"]);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut a = Allocation::new();
        a.assign("C1", "R1");
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, r#"{"C1":"R1"}"#);
        let back: Allocation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn test_violation_factories() {
        let v = Violation::capacity_exceeded("C1", "R1 seats 10, needs 20");
        assert_eq!(v.violation_type, ViolationType::CapacityExceeded);
        assert_eq!(v.entity_id, "C1");

        let v = Violation::double_booking("R1", "C1, C2 at slot 0");
        assert_eq!(v.violation_type, ViolationType::DoubleBooking);
    }
}
