//! Generational GA driver.
//!
//! The runner owns the evolutionary loop; problems plug in through
//! [`GaProblem`] (encoding, fitness, crossover, mutation).
//!
//! # Loop
//!
//! 1. Create and evaluate `population_size` individuals.
//! 2. Per generation:
//!    - binary tournament selects `population_size` parents,
//!    - consecutive parent pairs are recombined with probability
//!      `crossover_rate`, otherwise cloned,
//!    - each offspring is mutated with probability `mutation_rate`,
//!    - parents and offspring are merged, sorted ascending by fitness, and
//!      truncated back to `population_size` (top-N elitism).
//! 3. Return the best individual after a fixed number of generations.
//!
//! Fitness is evaluated once when an individual is created or altered and
//! cached on it. Selection and replacement compare cached values, so the best
//! fitness in the population never increases from one generation to the next.
//!
//! # Reference
//! Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"

use log::{debug, trace};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::operators::tournament_select;
use crate::error::{AllocationError, AllocationResult};

/// An individual with a cached fitness (lower = better).
pub trait Individual: Clone {
    /// Cached fitness.
    fn fitness(&self) -> f64;

    /// Stores a freshly evaluated fitness.
    fn set_fitness(&mut self, fitness: f64);
}

/// Problem definition driven by [`GaRunner`].
pub trait GaProblem {
    /// Encoded candidate solution.
    type Individual: Individual;

    /// Creates a random individual (fitness not yet evaluated).
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Computes the fitness of an individual (lower = better).
    fn evaluate(&mut self, individual: &Self::Individual) -> f64;

    /// Recombines two parents into two children.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        rng: &mut R,
    ) -> (Self::Individual, Self::Individual);

    /// Mutates an individual in place.
    fn mutate<R: Rng>(&self, individual: &mut Self::Individual, rng: &mut R);
}

/// Default population size.
pub const DEFAULT_POPULATION_SIZE: usize = 50;
/// Default number of generations.
pub const DEFAULT_GENERATIONS: usize = 200;
/// Default crossover probability per parent pair.
pub const DEFAULT_CROSSOVER_RATE: f64 = 0.8;
/// Default mutation probability per offspring.
pub const DEFAULT_MUTATION_RATE: f64 = 0.2;
/// Default seed for the operator random source.
pub const DEFAULT_SEED: u64 = 42;

/// GA parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Individuals kept per generation.
    pub population_size: usize,
    /// Number of generations to run.
    pub generations: usize,
    /// Probability that a parent pair is recombined.
    pub crossover_rate: f64,
    /// Probability that an offspring is mutated.
    pub mutation_rate: f64,
    /// Seed for [`GaRunner::run_seeded`].
    pub seed: u64,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            generations: DEFAULT_GENERATIONS,
            crossover_rate: DEFAULT_CROSSOVER_RATE,
            mutation_rate: DEFAULT_MUTATION_RATE,
            seed: DEFAULT_SEED,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the operator seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks that the parameters are usable.
    pub fn validate(&self) -> AllocationResult<()> {
        if self.population_size == 0 {
            return Err(AllocationError::InvalidConfig(
                "population_size must be positive".into(),
            ));
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(AllocationError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {rate}"
                )));
            }
        }
        Ok(())
    }
}

/// Outcome of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<I> {
    /// Best individual of the final population.
    pub best: I,
    /// Cached fitness of `best`.
    pub best_fitness: f64,
    /// Best fitness in the initial population.
    pub initial_best_fitness: f64,
    /// Generations run.
    pub generations: usize,
    /// Best fitness after each generation.
    pub best_fitness_history: Vec<f64>,
}

/// Generational GA driver.
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with an operator random source seeded from `config.seed`.
    pub fn run_seeded<P: GaProblem>(
        problem: &mut P,
        config: &GaConfig,
    ) -> AllocationResult<GaResult<P::Individual>> {
        let mut rng = SmallRng::seed_from_u64(config.seed);
        Self::run(problem, config, &mut rng)
    }

    /// Runs the GA drawing operator randomness from `rng`.
    ///
    /// # Errors
    /// [`AllocationError::InvalidConfig`] if `config` does not validate.
    pub fn run<P: GaProblem, R: Rng>(
        problem: &mut P,
        config: &GaConfig,
        rng: &mut R,
    ) -> AllocationResult<GaResult<P::Individual>> {
        config.validate()?;
        let size = config.population_size;

        let mut population = Vec::with_capacity(size * 2);
        for _ in 0..size {
            let individual = problem.create_individual(rng);
            population.push(evaluated(problem, individual));
        }
        let initial_best_fitness = best_of(&population)
            .map(|b| b.fitness())
            .unwrap_or(f64::INFINITY);
        debug!(
            "GA start: population {size}, {} generations, initial best {initial_best_fitness:.2}",
            config.generations
        );

        let mut best_fitness_history = Vec::with_capacity(config.generations);
        for generation in 0..config.generations {
            let parents: Vec<P::Individual> = (0..size)
                .filter_map(|_| tournament_select(&population, rng).cloned())
                .collect();

            let mut offspring = Vec::with_capacity(parents.len());
            for pair in parents.chunks(2) {
                match pair {
                    [p1, p2] if rng.random::<f64>() < config.crossover_rate => {
                        let (c1, c2) = problem.crossover(p1, p2, rng);
                        offspring.push(evaluated(problem, c1));
                        offspring.push(evaluated(problem, c2));
                    }
                    _ => offspring.extend(pair.iter().cloned()),
                }
            }

            for child in offspring.iter_mut() {
                if rng.random::<f64>() < config.mutation_rate {
                    problem.mutate(child, rng);
                    let fitness = problem.evaluate(child);
                    child.set_fitness(fitness);
                }
            }

            population.extend(offspring);
            population.sort_by(|a, b| a.fitness().total_cmp(&b.fitness()));
            population.truncate(size);

            let best = population[0].fitness();
            best_fitness_history.push(best);
            trace!("generation {generation}: best {best:.2}");
        }

        let best = best_of(&population)
            .cloned()
            .ok_or_else(|| AllocationError::InvalidConfig("empty population".into()))?;
        let best_fitness = best.fitness();
        debug!("GA done: best {best_fitness:.2} (initial {initial_best_fitness:.2})");

        Ok(GaResult {
            best,
            best_fitness,
            initial_best_fitness,
            generations: config.generations,
            best_fitness_history,
        })
    }
}

fn evaluated<P: GaProblem>(problem: &mut P, mut individual: P::Individual) -> P::Individual {
    let fitness = problem.evaluate(&individual);
    individual.set_fitness(fitness);
    individual
}

fn best_of<I: Individual>(population: &[I]) -> Option<&I> {
    population
        .iter()
        .min_by(|a, b| a.fitness().total_cmp(&b.fitness()))
}
