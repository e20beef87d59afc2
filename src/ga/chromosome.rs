//! Room-choice chromosome.
//!
//! # Encoding
//!
//! One gene per course, in the fixed order of the course list. Gene `i` is
//! a position in course `i`'s precomputed feasible-room list, so every gene
//! value decodes to a room that seats the course.
//!
//! Genes are independent: two courses sharing a time-slot may decode to the
//! same room. Capacity is guaranteed by construction, mutual exclusivity is
//! not.

use rand::Rng;

use super::runner::Individual;

/// Candidate allocation encoded as one room choice per course.
///
/// Lower fitness = lower total travel cost.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationChromosome {
    /// Gene `i` indexes into the feasible-room list of course `i`.
    pub genes: Vec<usize>,
    /// Fitness value (lower = better).
    pub fitness: f64,
}

impl Individual for AllocationChromosome {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

impl AllocationChromosome {
    /// Wraps genes with an unevaluated fitness.
    pub fn new(genes: Vec<usize>) -> Self {
        Self {
            genes,
            fitness: f64::INFINITY,
        }
    }

    /// Draws every gene uniformly from its feasible-room list.
    ///
    /// # Panics
    /// If any feasible-room list is empty.
    pub fn random<R: Rng>(feasible_rooms: &[Vec<usize>], rng: &mut R) -> Self {
        let genes = feasible_rooms
            .iter()
            .map(|rooms| rng.random_range(0..rooms.len()))
            .collect();
        Self::new(genes)
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the chromosome encodes no course.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Room indices (into the room list) chosen by each gene.
    ///
    /// Genes out of range for their list decode to `None`.
    pub fn room_indices<'a>(
        &'a self,
        feasible_rooms: &'a [Vec<usize>],
    ) -> impl Iterator<Item = Option<usize>> + 'a {
        self.genes
            .iter()
            .zip(feasible_rooms)
            .map(|(&gene, rooms)| rooms.get(gene).copied())
    }

    /// Validates the chromosome against the feasible-room lists.
    pub fn is_valid(&self, feasible_rooms: &[Vec<usize>]) -> bool {
        self.genes.len() == feasible_rooms.len()
            && self
                .genes
                .iter()
                .zip(feasible_rooms)
                .all(|(&gene, rooms)| gene < rooms.len())
    }
}
