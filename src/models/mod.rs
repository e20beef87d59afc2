//! Allocation domain models.
//!
//! Provides the input entities (rooms, people, courses) and the allocation
//! mapping produced by the optimizers.
//!
//! # Domain Mappings
//!
//! | classroom-alloc | Timetabling | Events | Healthcare |
//! |-----------------|-------------|--------|------------|
//! | Room | Lecture hall | Venue | Consulting room |
//! | Course | Section | Session | Clinic |
//! | Person | Teacher/Student | Speaker/Attendee | Doctor/Patient |
//! | Allocation | Room plan | Venue plan | Room roster |

mod allocation;
mod course;
mod person;
mod room;

use std::collections::HashMap;

pub use allocation::{Allocation, Violation, ViolationType};
pub use course::Course;
pub use person::{Person, Point};
pub use room::Room;

/// Course identifier.
pub type CourseId = String;
/// Room identifier.
pub type RoomId = String;
/// Opaque ordinal of a fixed schedule period.
pub type TimeSlot = u32;

/// Indexes rooms by identifier.
///
/// Later duplicates replace earlier ones; run
/// [`validate_input`](crate::validation::validate_input) first if that matters.
pub fn index_rooms(rooms: &[Room]) -> HashMap<RoomId, Room> {
    rooms.iter().map(|r| (r.id.clone(), r.clone())).collect()
}
