//! Course model.
//!
//! A course section meets in a single time-slot with one teacher and a roster
//! of enrolled students. Courses are read-only inputs to every allocator.

use serde::{Deserialize, Serialize};

use super::{CourseId, Person, TimeSlot};

/// A course section to be seated in a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: CourseId,
    /// Headcount the room must seat.
    pub size: u32,
    /// Teaching person.
    pub teacher: Person,
    /// Enrolled students.
    #[serde(default)]
    pub students: Vec<Person>,
    /// Schedule period the course meets in.
    pub time_slot: TimeSlot,
}

impl Course {
    /// Creates a course with an empty roster.
    pub fn new(id: impl Into<CourseId>, size: u32, teacher: Person, time_slot: TimeSlot) -> Self {
        Self {
            id: id.into(),
            size,
            teacher,
            students: Vec::new(),
            time_slot,
        }
    }

    /// Sets the student roster.
    pub fn with_students(mut self, students: Vec<Person>) -> Self {
        self.students = students;
        self
    }

    /// Adds one student.
    pub fn with_student(mut self, student: Person) -> Self {
        self.students.push(student);
        self
    }

    /// Number of enrolled students.
    #[inline]
    pub fn enrolled(&self) -> usize {
        self.students.len()
    }
}
