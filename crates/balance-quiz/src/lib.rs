//! Balance-scale arithmetic quiz.
//!
//! This crate generates sets of quiz rounds where the learner must pick an
//! operator and operand that turn a base number into a target number. No
//! number is used twice across a set, as either a base or a target.

pub mod error;
pub mod evaluator;
pub mod generator;
pub mod round;
pub mod session;

// Re-export main types
pub use error::QuizError;
pub use evaluator::{
    check_answer, display_value, evaluate, is_correct, tilt_angle, Evaluation, EPSILON,
};
pub use generator::{
    feasible_operand, generate, generate_rounds, GeneratorConfig, RandomSource, SeededSource,
};
pub use round::{Operator, Round, RoundSet, MAX_OPERAND, MAX_VALUE, MIN_VALUE};
pub use session::{apply, Message, SessionEvent, SessionState};
