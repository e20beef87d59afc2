//! Input validation and allocation checks.
//!
//! [`validate_input`] checks structural integrity of rooms and courses
//! before optimizing. Detects:
//! - Duplicate IDs
//! - Non-finite coordinates (they poison every cost comparison)
//! - Rooms without seats
//!
//! [`check_allocation`] verifies a finished allocation against the hard
//! constraints: every course seated, every room known, capacity respected,
//! and no two courses sharing a `(room, time-slot)`.

use crate::models::{Allocation, Course, Room, Violation};
use std::collections::{HashMap, HashSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A room or person has a NaN or infinite coordinate.
    NonFiniteCoordinate,
    /// A room has zero capacity.
    ZeroCapacity,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for an allocation problem.
///
/// Checks:
/// 1. No duplicate room IDs
/// 2. No duplicate course IDs
/// 3. Every room has at least one seat
/// 4. All room, teacher, and student coordinates are finite
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(courses: &[Course], rooms: &[Room]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut room_ids = HashSet::new();
    for room in rooms {
        if !room_ids.insert(room.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room ID: {}", room.id),
            ));
        }
        if room.capacity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroCapacity,
                format!("Room '{}' has no seats", room.id),
            ));
        }
        if !room.location.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFiniteCoordinate,
                format!("Room '{}' has a non-finite location", room.id),
            ));
        }
    }

    let mut course_ids = HashSet::new();
    for course in courses {
        if !course_ids.insert(course.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course ID: {}", course.id),
            ));
        }
        if !course.teacher.location.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFiniteCoordinate,
                format!(
                    "Teacher '{}' of course '{}' has a non-finite location",
                    course.teacher.id, course.id
                ),
            ));
        }
        for student in course.students.iter().filter(|s| !s.location.is_finite()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFiniteCoordinate,
                format!(
                    "Student '{}' of course '{}' has a non-finite location",
                    student.id, course.id
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Lists every hard-constraint violation in an allocation.
///
/// An empty result means the allocation is valid for these courses and rooms.
pub fn check_allocation(
    allocation: &Allocation,
    courses: &[Course],
    rooms: &[Room],
) -> Vec<Violation> {
    let rooms_by_id: HashMap<&str, &Room> = rooms.iter().map(|r| (r.id.as_str(), r)).collect();
    let mut violations = Vec::new();

    for course in courses {
        let Some(room_id) = allocation.room_for(&course.id) else {
            violations.push(Violation::unassigned(
                &course.id,
                format!("Course '{}' has no room", course.id),
            ));
            continue;
        };
        match rooms_by_id.get(room_id) {
            None => violations.push(Violation::unknown_room(
                &course.id,
                format!("Course '{}' is assigned to unknown room '{room_id}'", course.id),
            )),
            Some(room) if !room.fits(course.size) => violations.push(Violation::capacity_exceeded(
                &course.id,
                format!(
                    "Room '{}' seats {} but course '{}' needs {}",
                    room.id, room.capacity, course.id, course.size
                ),
            )),
            Some(_) => {}
        }
    }

    for ((room_id, slot), holders) in allocation.occupancy(courses) {
        if holders.len() > 1 {
            violations.push(Violation::double_booking(
                &room_id,
                format!(
                    "Room '{room_id}' hosts {} at time-slot {slot}",
                    holders.join(", ")
                ),
            ));
        }
    }

    violations
}
