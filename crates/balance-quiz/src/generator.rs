//! Bounded random generator for globally unique round sets.
//!
//! Each trial draws a base and a target, rejects any value already used by
//! an accepted round, then tries the operators in a shuffled order and keeps
//! the first one whose operand lands in range. A pair with no feasible
//! operator is discarded, never retried. The loop stops after
//! `max_attempts` trials whether or not the set is complete.

use std::collections::HashSet;

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::QuizError;
use crate::round::{Operator, Round, RoundSet, MAX_OPERAND, MAX_VALUE, MIN_VALUE};

/// Source of randomness for the generator
pub trait RandomSource {
    /// Uniform integer in `low..=high`
    fn draw_inclusive(&mut self, low: i32, high: i32) -> i32;

    /// Permute the operators in place
    fn shuffle_operators(&mut self, operators: &mut [Operator]);
}

/// Seeded `StdRng` that remembers its seed so a round set can be replayed
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: StdRng,
    seed: u64,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from the thread-local generator
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededSource {
    fn draw_inclusive(&mut self, low: i32, high: i32) -> i32 {
        self.rng.random_range(low..=high)
    }

    fn shuffle_operators(&mut self, operators: &mut [Operator]) {
        operators.shuffle(&mut self.rng);
    }
}

/// Configuration for the generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of rounds to produce
    pub count: usize,
    /// Maximum candidate trials before giving up
    pub max_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 10,
            max_attempts: 20_000,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.count == 0 {
            return Err(QuizError::InvalidConfig("count must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Operand that makes `base operator operand == target`, if one is in range
pub fn feasible_operand(operator: Operator, base: i32, target: i32) -> Option<i32> {
    let operand = match operator {
        Operator::Add => target - base,
        Operator::Sub => base - target,
        Operator::Mul => {
            if base == 0 || target % base != 0 {
                return None;
            }
            target / base
        }
        Operator::Div => {
            if target == 0 || base % target != 0 {
                return None;
            }
            base / target
        }
    };

    if (operator.min_operand()..=MAX_OPERAND).contains(&operand) {
        Some(operand)
    } else {
        None
    }
}

/// Build a round set of `config.count` rounds with no repeated base or
/// target value, or fail once `config.max_attempts` trials are spent.
pub fn generate_rounds<R: RandomSource + ?Sized>(
    rng: &mut R,
    config: &GeneratorConfig,
) -> Result<RoundSet, QuizError> {
    config.validate()?;

    let mut accepted: Vec<Round> = Vec::with_capacity(config.count);
    let mut used: HashSet<i32> = HashSet::new();
    let mut attempts: usize = 0;

    while accepted.len() < config.count && attempts < config.max_attempts {
        attempts += 1;

        let base = rng.draw_inclusive(MIN_VALUE, MAX_VALUE);
        if used.contains(&base) {
            continue;
        }
        let target = rng.draw_inclusive(MIN_VALUE, MAX_VALUE);
        if target == base || used.contains(&target) {
            continue;
        }

        let mut operators = Operator::ALL;
        rng.shuffle_operators(&mut operators);

        let found = operators.iter().find_map(|&op| {
            feasible_operand(op, base, target).map(|operand| (op, operand))
        });

        if let Some((operator, operand)) = found {
            let round = Round::new(base, operator, operand, target)?;
            trace!(target: "generator", "accepted round {}: {}", accepted.len(), round);
            accepted.push(round);
            used.insert(base);
            used.insert(target);
        }
    }

    if accepted.len() < config.count {
        warn!(
            "round generation exhausted: {}/{} rounds after {} attempts",
            accepted.len(),
            config.count,
            attempts
        );
        return Err(QuizError::GenerationExhausted {
            requested: config.count,
            generated: accepted.len(),
            attempts,
        });
    }

    debug!("generated {} rounds in {} attempts", accepted.len(), attempts);
    Ok(RoundSet::new(accepted, attempts))
}

/// Generate with a seeded source, drawing a fresh seed when none is given.
///
/// Returns the seed alongside the set so the game can be reproduced.
pub fn generate(
    count: usize,
    max_attempts: usize,
    seed: Option<u64>,
) -> Result<(RoundSet, u64), QuizError> {
    let mut source = match seed {
        Some(seed) => SeededSource::new(seed),
        None => SeededSource::from_entropy(),
    };
    debug!(
        "generating {} rounds (max_attempts={}, seed={})",
        count,
        max_attempts,
        source.seed()
    );
    let config = GeneratorConfig {
        count,
        max_attempts,
    };
    let rounds = generate_rounds(&mut source, &config)?;
    Ok((rounds, source.seed()))
}
