//! Answer evaluation and the numbers the scale display needs.
//!
//! Answers are evaluated with real division so a learner who picks an
//! inexact divisor sees the fractional result instead of an error.

use serde::Serialize;

use crate::round::{Operator, Round};

/// Tolerance when comparing an evaluated answer to the target
pub const EPSILON: f64 = 1e-9;

/// Maximum lean of the scale in degrees, either side
pub const MAX_TILT_DEGREES: f64 = 25.0;

/// Degrees of lean per unit of imbalance
const TILT_PER_UNIT: f64 = 2.0;

/// Result of checking a learner's answer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    /// `None` when the answer cannot be evaluated (division by zero)
    pub value: Option<f64>,
    pub correct: bool,
}

/// Evaluate `base operator operand` with real-number division
pub fn evaluate(base: i32, operator: Operator, operand: i32) -> Option<f64> {
    let base = f64::from(base);
    let operand = f64::from(operand);
    match operator {
        Operator::Add => Some(base + operand),
        Operator::Sub => Some(base - operand),
        Operator::Mul => Some(base * operand),
        Operator::Div => {
            if operand == 0.0 {
                None
            } else {
                Some(base / operand)
            }
        }
    }
}

/// Whether an evaluated answer balances against `target`
pub fn is_correct(value: Option<f64>, target: i32) -> bool {
    value.is_some_and(|v| (v - f64::from(target)).abs() < EPSILON)
}

/// Check a learner's operator and operand against a round's target
pub fn check_answer(round: &Round, operator: Operator, operand: i32) -> Evaluation {
    let value = evaluate(round.base(), operator, operand);
    Evaluation {
        value,
        correct: is_correct(value, round.target()),
    }
}

/// How far the scale leans given the target side and the learner's side.
///
/// Positive means the learner's side is heavier. An unevaluable answer
/// leaves the scale level.
pub fn tilt_angle(target: i32, value: Option<f64>) -> f64 {
    match value {
        None => 0.0,
        Some(v) => ((v - f64::from(target)) * TILT_PER_UNIT).clamp(-MAX_TILT_DEGREES, MAX_TILT_DEGREES),
    }
}

/// Label for the learner's side of the scale
pub fn display_value(value: Option<f64>) -> String {
    match value {
        None => "—".to_string(),
        Some(v) if (v - v.trunc()).abs() < EPSILON => format!("{}", v.trunc() as i64),
        Some(v) => format!("{:.2}", v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate() {
        assert_eq!(evaluate(40, Operator::Mul, 2), Some(80.0));
        assert_eq!(evaluate(40, Operator::Sub, 50), Some(-10.0));
        assert_eq!(evaluate(7, Operator::Div, 2), Some(3.5));
        assert_eq!(evaluate(7, Operator::Div, 0), None);
    }

    #[test]
    fn test_check_answer() {
        let round = Round::new(40, Operator::Mul, 2, 80).unwrap();
        assert!(check_answer(&round, Operator::Mul, 2).correct);
        // a different route to the same target is still correct
        assert!(check_answer(&round, Operator::Add, 40).correct);
        assert!(!check_answer(&round, Operator::Mul, 3).correct);

        let unevaluable = check_answer(&round, Operator::Div, 0);
        assert_eq!(unevaluable.value, None);
        assert!(!unevaluable.correct);
    }

    #[test]
    fn test_is_correct_tolerance() {
        assert!(is_correct(Some(80.0), 80));
        assert!(is_correct(Some(80.0 + EPSILON / 2.0), 80));
        assert!(!is_correct(Some(80.0 + 1e-6), 80));
        assert!(!is_correct(Some(3.5), 3));
        assert!(!is_correct(None, 80));
    }

    #[test]
    fn test_tilt_angle() {
        assert_eq!(tilt_angle(50, None), 0.0);
        assert_eq!(tilt_angle(50, Some(50.0)), 0.0);
        assert_eq!(tilt_angle(50, Some(55.0)), 10.0);
        assert_eq!(tilt_angle(50, Some(45.0)), -10.0);
        assert_eq!(tilt_angle(50, Some(100.0)), MAX_TILT_DEGREES);
        assert_eq!(tilt_angle(50, Some(0.0)), -MAX_TILT_DEGREES);
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(None), "—");
        assert_eq!(display_value(Some(80.0)), "80");
        assert_eq!(display_value(Some(-3.0)), "-3");
        assert_eq!(display_value(Some(3.5)), "3.50");
        assert_eq!(display_value(Some(10.0 / 3.0)), "3.33");
    }
}
