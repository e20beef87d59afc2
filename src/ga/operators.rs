//! Genetic operators for the room-choice encoding.
//!
//! - [`tournament_select`]: binary tournament, lower fitness wins.
//! - [`single_point_crossover`]: exchange tails after a random cut.
//! - [`reassign_mutation`]: redraw one gene from its feasible-room list.

use rand::seq::index;
use rand::Rng;

use super::chromosome::AllocationChromosome;
use super::runner::Individual;

/// Samples two distinct individuals uniformly and returns the fitter one.
///
/// A single-member population returns that member; an empty one `None`.
pub fn tournament_select<'a, I: Individual, R: Rng>(
    population: &'a [I],
    rng: &mut R,
) -> Option<&'a I> {
    match population.len() {
        0 => None,
        1 => population.first(),
        len => {
            let picked = index::sample(rng, len, 2);
            let (a, b) = (&population[picked.index(0)], &population[picked.index(1)]);
            Some(if b.fitness() < a.fitness() { b } else { a })
        }
    }
}

/// Single-point crossover.
///
/// Picks a cut in `[1, n - 1]` and swaps the tails: child 1 takes parent 1's
/// head and parent 2's tail, child 2 the reverse. With fewer than two genes
/// there is no valid cut and both parents are cloned.
pub fn single_point_crossover<R: Rng>(
    p1: &AllocationChromosome,
    p2: &AllocationChromosome,
    rng: &mut R,
) -> (AllocationChromosome, AllocationChromosome) {
    let n = p1.len().min(p2.len());
    if n < 2 {
        return (p1.clone(), p2.clone());
    }
    let cut = rng.random_range(1..n);

    let mut g1 = p1.genes[..cut].to_vec();
    g1.extend_from_slice(&p2.genes[cut..]);
    let mut g2 = p2.genes[..cut].to_vec();
    g2.extend_from_slice(&p1.genes[cut..]);

    (AllocationChromosome::new(g1), AllocationChromosome::new(g2))
}

/// Replaces one random gene with a fresh draw from its feasible-room list.
///
/// The new value may equal the old one.
pub fn reassign_mutation<R: Rng>(
    chromosome: &mut AllocationChromosome,
    feasible_rooms: &[Vec<usize>],
    rng: &mut R,
) {
    let len = chromosome.len().min(feasible_rooms.len());
    if len == 0 {
        return;
    }
    let idx = rng.random_range(0..len);
    let choices = feasible_rooms[idx].len();
    if choices > 0 {
        chromosome.genes[idx] = rng.random_range(0..choices);
    }
}
