//! Allocation error taxonomy.
//!
//! Every failure is local to a single allocator call. Nothing is retried
//! internally and no partial allocation is returned alongside an error.

use std::fmt;

use crate::models::{CourseId, RoomId, TimeSlot};

/// Result alias used by all allocators.
pub type AllocationResult<T> = Result<T, AllocationError>;

/// Errors raised by the allocation strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// Greedy allocation found no room that is free at the course's time-slot
    /// and large enough for it.
    Infeasible {
        /// Course that could not be placed.
        course_id: CourseId,
        /// Time-slot the course meets in.
        time_slot: TimeSlot,
    },
    /// A course has an empty precomputed feasible-room list, so the genetic
    /// search cannot encode it.
    NoFeasibleRoom {
        /// Course without candidates.
        course_id: CourseId,
    },
    /// An allocation or chromosome leaves this course without a room.
    UnassignedCourse {
        /// Missing course.
        course_id: CourseId,
    },
    /// An allocation assigns a course to a room that is not known.
    UnknownRoom {
        /// Course holding the dangling reference.
        course_id: CourseId,
        /// Room that could not be resolved.
        room_id: RoomId,
    },
    /// The room already hosts another course at this time-slot.
    SlotTaken {
        /// Room being occupied.
        room_id: RoomId,
        /// Contested time-slot.
        time_slot: TimeSlot,
        /// Course currently holding the slot.
        occupant: CourseId,
    },
    /// Optimizer parameters are out of range.
    InvalidConfig(String),
}

impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infeasible { course_id, time_slot } => write!(
                f,
                "no room available for course '{course_id}' at time-slot {time_slot}"
            ),
            Self::NoFeasibleRoom { course_id } => {
                write!(
                    f,
                    "course '{course_id}' has no room free at its time-slot with enough capacity"
                )
            }
            Self::UnassignedCourse { course_id } => {
                write!(f, "course '{course_id}' is not assigned to any room")
            }
            Self::UnknownRoom { course_id, room_id } => write!(
                f,
                "course '{course_id}' is assigned to unknown room '{room_id}'"
            ),
            Self::SlotTaken {
                room_id,
                time_slot,
                occupant,
            } => write!(
                f,
                "room '{room_id}' is already occupied by '{occupant}' at time-slot {time_slot}"
            ),
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for AllocationError {}
