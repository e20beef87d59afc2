//! Room model.
//!
//! A room has a seat capacity, a location, and its own occupancy table
//! mapping time-slot to the course holding it. At most one course occupies
//! a room at any time-slot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{CourseId, Point, RoomId, TimeSlot};
use crate::error::{AllocationError, AllocationResult};

/// A physical room that can host courses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: RoomId,
    /// Number of seats.
    pub capacity: u32,
    /// Position on the campus plane.
    pub location: Point,
    /// Occupancy: time-slot → course holding the room.
    #[serde(default)]
    pub schedule: BTreeMap<TimeSlot, CourseId>,
}

impl Room {
    /// Creates an empty room.
    pub fn new(id: impl Into<RoomId>, capacity: u32, location: impl Into<Point>) -> Self {
        Self {
            id: id.into(),
            capacity,
            location: location.into(),
            schedule: BTreeMap::new(),
        }
    }

    /// Marks a slot as already taken (e.g. by a fixed booking).
    pub fn with_booking(mut self, time_slot: TimeSlot, course_id: impl Into<CourseId>) -> Self {
        self.schedule.insert(time_slot, course_id.into());
        self
    }

    /// Whether the room seats at least `size` people.
    #[inline]
    pub fn fits(&self, size: u32) -> bool {
        self.capacity >= size
    }

    /// Whether some course holds the room at `time_slot`.
    #[inline]
    pub fn is_occupied(&self, time_slot: TimeSlot) -> bool {
        self.schedule.contains_key(&time_slot)
    }

    /// Whether a course of `size` can be placed at `time_slot`.
    pub fn is_available(&self, time_slot: TimeSlot, size: u32) -> bool {
        !self.is_occupied(time_slot) && self.fits(size)
    }

    /// Course holding the room at `time_slot`, if any.
    pub fn occupant(&self, time_slot: TimeSlot) -> Option<&str> {
        self.schedule.get(&time_slot).map(|s| s.as_str())
    }

    /// Records that `course_id` holds the room at `time_slot`.
    ///
    /// Re-occupying a slot with the same course is a no-op.
    pub fn occupy(&mut self, time_slot: TimeSlot, course_id: &str) -> AllocationResult<()> {
        match self.schedule.get(&time_slot) {
            Some(occupant) if occupant != course_id => Err(AllocationError::SlotTaken {
                room_id: self.id.clone(),
                time_slot,
                occupant: occupant.clone(),
            }),
            Some(_) => Ok(()),
            None => {
                self.schedule.insert(time_slot, course_id.to_string());
                Ok(())
            }
        }
    }

    /// Frees a slot, returning the course that held it.
    pub fn release(&mut self, time_slot: TimeSlot) -> Option<CourseId> {
        self.schedule.remove(&time_slot)
    }

    /// Removes every booking.
    pub fn clear_schedule(&mut self) {
        self.schedule.clear();
    }
}
