//! Travel-cost model.
//!
//! Estimates how far the teacher and the students of a course have to travel
//! to reach a room. The teacher distance is always exact. The student part
//! is projected from a uniform sample drawn without replacement:
//!
//! ```text
//! student_cost ≈ Σ_{s ∈ sample} d(s, room) · enrolled / |sample|
//! ```
//!
//! which is an unbiased estimator of the full-roster sum. When the sample
//! covers the whole roster the result is exact and no entropy is consumed.
//!
//! [`CostEstimator`] pairs a [`CostModel`] with its own random source, so
//! sampling noise stays independent of each optimizer's operator randomness.

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{AllocationError, AllocationResult};
use crate::models::{Allocation, Course, Point, Room, RoomId};

/// Default upper bound on the number of students sampled per estimate.
pub const DEFAULT_STUDENT_SAMPLE_CAP: usize = 30;

/// Euclidean distance between two coordinates.
#[inline]
pub fn distance(p: &Point, q: &Point) -> f64 {
    p.distance_to(q)
}

/// How the student part of the travel cost is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudentSampling {
    /// Every enrolled student is counted.
    Exact,
    /// At most this many students are sampled. A cap of 0 means exact.
    Capped(usize),
}

impl Default for StudentSampling {
    fn default() -> Self {
        Self::Capped(DEFAULT_STUDENT_SAMPLE_CAP)
    }
}

impl StudentSampling {
    /// Number of students drawn for a roster of `enrolled`.
    pub fn sample_size(&self, enrolled: usize) -> usize {
        match *self {
            Self::Exact | Self::Capped(0) => enrolled,
            Self::Capped(cap) => cap.min(enrolled),
        }
    }
}

/// Travel-cost estimator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
    /// Student sampling mode.
    pub sampling: StudentSampling,
}

impl CostModel {
    /// Creates a model with the given sampling mode.
    pub fn new(sampling: StudentSampling) -> Self {
        Self { sampling }
    }

    /// Deterministic model: every student is counted.
    pub fn exact() -> Self {
        Self::new(StudentSampling::Exact)
    }

    /// Sampled model with a student cap.
    pub fn sampled(cap: usize) -> Self {
        Self::new(StudentSampling::Capped(cap))
    }

    /// Whether estimates for this course are exact (full roster sampled).
    pub fn is_exact_for(&self, course: &Course) -> bool {
        self.sampling.sample_size(course.enrolled()) == course.enrolled()
    }

    /// Distance from the teacher to the room.
    pub fn teacher_cost(&self, course: &Course, room: &Room) -> f64 {
        distance(&course.teacher.location, &room.location)
    }

    /// Estimated aggregate distance from all students to the room.
    pub fn student_cost<R: Rng + ?Sized>(&self, course: &Course, room: &Room, rng: &mut R) -> f64 {
        let enrolled = course.enrolled();
        if enrolled == 0 {
            return 0.0;
        }
        let k = self.sampling.sample_size(enrolled);
        if k >= enrolled {
            return course
                .students
                .iter()
                .map(|s| distance(&s.location, &room.location))
                .sum();
        }

        let sampled: f64 = course
            .students
            .choose_multiple(rng, k)
            .map(|s| distance(&s.location, &room.location))
            .sum();
        sampled * (enrolled as f64 / k as f64)
    }

    /// Teacher distance plus estimated student distance.
    pub fn travel_cost<R: Rng + ?Sized>(&self, course: &Course, room: &Room, rng: &mut R) -> f64 {
        self.teacher_cost(course, room) + self.student_cost(course, room, rng)
    }
}

/// A [`CostModel`] bound to its own random source.
#[derive(Debug, Clone)]
pub struct CostEstimator<R = SmallRng> {
    model: CostModel,
    rng: R,
}

impl<R: Rng> CostEstimator<R> {
    /// Creates an estimator drawing samples from `rng`.
    pub fn new(model: CostModel, rng: R) -> Self {
        Self { model, rng }
    }

    /// The underlying model.
    pub fn model(&self) -> &CostModel {
        &self.model
    }

    /// Estimated travel cost of seating `course` in `room`.
    pub fn travel_cost(&mut self, course: &Course, room: &Room) -> f64 {
        self.model.travel_cost(course, room, &mut self.rng)
    }

    /// Sum of travel costs over a full allocation.
    ///
    /// Fails if a course is unassigned or points at an unknown room.
    pub fn allocation_cost(
        &mut self,
        allocation: &Allocation,
        courses: &[Course],
        rooms_by_id: &HashMap<RoomId, Room>,
    ) -> AllocationResult<f64> {
        let mut total = 0.0;
        for course in courses {
            let room = resolve_room(allocation, course, rooms_by_id)?;
            total += self.travel_cost(course, room);
        }
        Ok(total)
    }
}

impl CostEstimator<SmallRng> {
    /// Estimator with a reproducible sample stream.
    pub fn seeded(model: CostModel, seed: u64) -> Self {
        Self::new(model, SmallRng::seed_from_u64(seed))
    }

    /// Estimator seeded from operating-system entropy.
    pub fn from_os_rng(model: CostModel) -> Self {
        Self::new(model, SmallRng::from_os_rng())
    }

    /// Deterministic estimator; never consumes entropy.
    pub fn exact() -> Self {
        Self::seeded(CostModel::exact(), 0)
    }
}

/// Looks up the room a course is seated in.
pub(crate) fn resolve_room<'a>(
    allocation: &Allocation,
    course: &Course,
    rooms_by_id: &'a HashMap<RoomId, Room>,
) -> AllocationResult<&'a Room> {
    let room_id = allocation
        .room_for(&course.id)
        .ok_or_else(|| AllocationError::UnassignedCourse {
            course_id: course.id.clone(),
        })?;
    rooms_by_id
        .get(room_id)
        .ok_or_else(|| AllocationError::UnknownRoom {
            course_id: course.id.clone(),
            room_id: room_id.to_string(),
        })
}
