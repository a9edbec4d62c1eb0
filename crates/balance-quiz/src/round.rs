//! Round representation types.
//!
//! A round asks the learner to turn `base` into `target` with a single
//! operator and operand. Rounds are only ever built through [`Round::new`],
//! so every value that exists satisfies the range and arithmetic rules.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// Smallest base or target value
pub const MIN_VALUE: i32 = 1;
/// Largest base or target value
pub const MAX_VALUE: i32 = 100;
/// Largest operand for any operator
pub const MAX_OPERAND: i32 = 100;

/// Arithmetic operator - serialized as its symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
        }
    }

    /// Smallest operand this operator accepts
    pub fn min_operand(self) -> i32 {
        match self {
            Operator::Div => 1,
            _ => 0,
        }
    }

    /// Apply under integer arithmetic.
    ///
    /// Returns `None` for division by zero or when the division is not exact,
    /// since such a result can never equal an integer target.
    pub fn apply(self, base: i32, operand: i32) -> Option<i32> {
        match self {
            Operator::Add => base.checked_add(operand),
            Operator::Sub => base.checked_sub(operand),
            Operator::Mul => base.checked_mul(operand),
            Operator::Div => {
                if operand == 0 || base % operand != 0 {
                    None
                } else {
                    Some(base / operand)
                }
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Sub),
            "*" | "x" | "×" => Ok(Operator::Mul),
            "/" | "÷" => Ok(Operator::Div),
            other => Err(QuizError::ParseOperator(other.to_string())),
        }
    }
}

/// A single puzzle: `base operator operand == target`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Round {
    base: i32,
    operator: Operator,
    operand: i32,
    target: i32,
}

impl Round {
    pub fn new(base: i32, operator: Operator, operand: i32, target: i32) -> Result<Self, QuizError> {
        if !(MIN_VALUE..=MAX_VALUE).contains(&base) {
            return Err(QuizError::InvalidRound(format!(
                "base {} outside {}..={}",
                base, MIN_VALUE, MAX_VALUE
            )));
        }
        if !(MIN_VALUE..=MAX_VALUE).contains(&target) {
            return Err(QuizError::InvalidRound(format!(
                "target {} outside {}..={}",
                target, MIN_VALUE, MAX_VALUE
            )));
        }
        if base == target {
            return Err(QuizError::InvalidRound(format!(
                "target equals base ({})",
                base
            )));
        }
        if !(operator.min_operand()..=MAX_OPERAND).contains(&operand) {
            return Err(QuizError::InvalidRound(format!(
                "operand {} outside {}..={} for '{}'",
                operand,
                operator.min_operand(),
                MAX_OPERAND,
                operator
            )));
        }
        if operator.apply(base, operand) != Some(target) {
            return Err(QuizError::InvalidRound(format!(
                "{} {} {} does not equal {}",
                base, operator, operand, target
            )));
        }

        Ok(Self {
            base,
            operator,
            operand,
            target,
        })
    }

    pub fn base(&self) -> i32 {
        self.base
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operand(&self) -> i32 {
        self.operand
    }

    pub fn target(&self) -> i32 {
        self.target
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            self.base, self.operator, self.operand, self.target
        )
    }
}

/// The ordered rounds of one game.
///
/// No value appears twice across all bases and targets. Only the generator
/// builds these, and it enforces uniqueness as it accepts each round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RoundSet {
    rounds: Vec<Round>,
    #[serde(skip)]
    attempts: usize,
}

impl RoundSet {
    pub(crate) fn new(rounds: Vec<Round>, attempts: usize) -> Self {
        Self { rounds, attempts }
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Round> {
        self.rounds.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Round> {
        self.rounds.iter()
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Number of candidate trials the generator spent building this set
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Every base and target value in the set
    pub fn used_values(&self) -> BTreeSet<i32> {
        self.rounds
            .iter()
            .flat_map(|r| [r.base, r.target])
            .collect()
    }

    /// How many rounds use each operator
    pub fn operator_counts(&self) -> BTreeMap<Operator, usize> {
        let mut counts: BTreeMap<Operator, usize> =
            Operator::ALL.iter().map(|&op| (op, 0)).collect();
        for round in &self.rounds {
            *counts.entry(round.operator).or_insert(0) += 1;
        }
        counts
    }
}

impl<'a> IntoIterator for &'a RoundSet {
    type Item = &'a Round;
    type IntoIter = std::slice::Iter<'a, Round>;

    fn into_iter(self) -> Self::IntoIter {
        self.rounds.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_apply() {
        assert_eq!(Operator::Add.apply(40, 2), Some(42));
        assert_eq!(Operator::Sub.apply(40, 2), Some(38));
        assert_eq!(Operator::Mul.apply(40, 2), Some(80));
        assert_eq!(Operator::Div.apply(40, 2), Some(20));
        assert_eq!(Operator::Div.apply(7, 0), None);
        assert_eq!(Operator::Div.apply(7, 2), None);
    }

    #[test]
    fn test_operator_parse_and_display() {
        for op in Operator::ALL {
            assert_eq!(op.symbol().parse::<Operator>().unwrap(), op);
            assert_eq!(op.to_string(), op.symbol());
        }
        assert_eq!("x".parse::<Operator>().unwrap(), Operator::Mul);
        assert!(matches!(
            "%".parse::<Operator>(),
            Err(QuizError::ParseOperator(_))
        ));
    }

    #[test]
    fn test_operator_serializes_as_symbol() {
        assert_eq!(serde_json::to_string(&Operator::Div).unwrap(), "\"/\"");
        let op: Operator = serde_json::from_str("\"*\"").unwrap();
        assert_eq!(op, Operator::Mul);
    }

    #[test]
    fn test_round_new_accepts_valid() {
        let round = Round::new(40, Operator::Mul, 2, 80).unwrap();
        assert_eq!(round.base(), 40);
        assert_eq!(round.target(), 80);
        assert_eq!(round.to_string(), "40 * 2 = 80");
    }

    #[test]
    fn test_round_new_rejects_invalid() {
        // division by zero operand
        assert!(Round::new(7, Operator::Div, 0, 7).is_err());
        // target equals base
        assert!(Round::new(7, Operator::Add, 0, 7).is_err());
        // out of range
        assert!(Round::new(0, Operator::Add, 5, 5).is_err());
        assert!(Round::new(60, Operator::Mul, 2, 120).is_err());
        // arithmetic mismatch
        assert!(Round::new(10, Operator::Sub, 3, 8).is_err());
    }

    #[test]
    fn test_round_set_values_and_counts() {
        let set = RoundSet::new(
            vec![
                Round::new(40, Operator::Mul, 2, 80).unwrap(),
                Round::new(10, Operator::Sub, 3, 7).unwrap(),
            ],
            2,
        );
        assert_eq!(
            set.used_values().into_iter().collect::<Vec<_>>(),
            vec![7, 10, 40, 80]
        );
        let counts = set.operator_counts();
        assert_eq!(counts[&Operator::Mul], 1);
        assert_eq!(counts[&Operator::Sub], 1);
        assert_eq!(counts[&Operator::Add], 0);
        assert_eq!(counts[&Operator::Div], 0);

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[0]["operator"], "*");
    }
}
