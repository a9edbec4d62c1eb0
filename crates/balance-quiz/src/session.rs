//! Game session as an explicit state value.
//!
//! Every interaction is a [`SessionEvent`] fed through [`apply`], which
//! returns the next state. Generating a new round set is left to the caller
//! so that `apply` stays free of randomness.

use std::fmt;

use log::debug;

use crate::evaluator::{check_answer, display_value};
use crate::round::{Operator, Round, RoundSet};

/// Feedback for the most recent interaction
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// The answer could not be evaluated (division by zero)
    Unevaluable,
    Correct {
        base: i32,
        operator: Operator,
        operand: i32,
        target: i32,
    },
    /// Wrong answer, with the value the learner produced
    Incorrect { display: String },
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Unevaluable => write!(f, "That answer cannot be calculated."),
            Message::Correct {
                base,
                operator,
                operand,
                target,
            } => write!(f, "Correct: {} {} {} = {}", base, operator, operand, target),
            Message::Incorrect { display } => {
                write!(f, "Not quite. Your result: {}. Try again.", display)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Submit { operator: Operator, operand: i32 },
    Next,
    Reset(RoundSet),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    rounds: RoundSet,
    cursor: usize,
    correct_count: usize,
    solved_current: bool,
    message: Option<Message>,
}

impl SessionState {
    pub fn new(rounds: RoundSet) -> Self {
        Self {
            rounds,
            cursor: 0,
            correct_count: 0,
            solved_current: false,
            message: None,
        }
    }

    pub fn rounds(&self) -> &RoundSet {
        &self.rounds
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn solved_current(&self) -> bool {
        self.solved_current
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.get(self.cursor)
    }

    pub fn is_last_round(&self) -> bool {
        self.cursor + 1 >= self.rounds.len()
    }

    /// Every round has been answered correctly
    pub fn is_complete(&self) -> bool {
        !self.rounds.is_empty() && self.correct_count >= self.rounds.len()
    }

    /// `(round number, total rounds)`, one-based
    pub fn progress(&self) -> (usize, usize) {
        (self.cursor + 1, self.rounds.len())
    }
}

/// Advance the session by one event
pub fn apply(state: SessionState, event: SessionEvent) -> SessionState {
    match event {
        SessionEvent::Submit { operator, operand } => submit(state, operator, operand),
        SessionEvent::Next => {
            if !state.solved_current || state.is_last_round() {
                return state;
            }
            SessionState {
                cursor: state.cursor + 1,
                solved_current: false,
                message: None,
                ..state
            }
        }
        SessionEvent::Reset(rounds) => {
            debug!("session reset with {} rounds", rounds.len());
            SessionState::new(rounds)
        }
    }
}

fn submit(state: SessionState, operator: Operator, operand: i32) -> SessionState {
    if state.solved_current {
        return state;
    }
    let Some(round) = state.current_round().copied() else {
        return state;
    };

    let evaluation = check_answer(&round, operator, operand);
    if evaluation.value.is_none() {
        return SessionState {
            message: Some(Message::Unevaluable),
            ..state
        };
    }

    if evaluation.correct {
        SessionState {
            correct_count: state.correct_count + 1,
            solved_current: true,
            message: Some(Message::Correct {
                base: round.base(),
                operator,
                operand,
                target: round.target(),
            }),
            ..state
        }
    } else {
        SessionState {
            message: Some(Message::Incorrect {
                display: display_value(evaluation.value),
            }),
            ..state
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;

    fn new_session() -> SessionState {
        let (rounds, _) = generate(3, 20_000, Some(11)).unwrap();
        SessionState::new(rounds)
    }

    fn solve_current(state: SessionState) -> SessionState {
        let round = *state.current_round().unwrap();
        apply(
            state,
            SessionEvent::Submit {
                operator: round.operator(),
                operand: round.operand(),
            },
        )
    }

    #[test]
    fn test_correct_submission() {
        let state = solve_current(new_session());
        assert!(state.solved_current());
        assert_eq!(state.correct_count(), 1);
        assert!(matches!(state.message(), Some(Message::Correct { .. })));

        // resubmitting a solved round does not score twice
        let state = solve_current(state);
        assert_eq!(state.correct_count(), 1);
    }

    #[test]
    fn test_wrong_and_unevaluable_submissions() {
        let state = new_session();
        let round = *state.current_round().unwrap();

        let state = apply(
            state,
            SessionEvent::Submit {
                operator: Operator::Div,
                operand: 0,
            },
        );
        assert_eq!(state.message(), Some(&Message::Unevaluable));
        assert!(!state.solved_current());

        // base + 100 overshoots every target in range
        let state = apply(
            state,
            SessionEvent::Submit {
                operator: Operator::Add,
                operand: 100,
            },
        );
        assert_eq!(
            state.message(),
            Some(&Message::Incorrect {
                display: (round.base() + 100).to_string()
            })
        );
        assert_eq!(state.correct_count(), 0);
    }

    #[test]
    fn test_next_requires_solved_round() {
        let state = apply(new_session(), SessionEvent::Next);
        assert_eq!(state.cursor(), 0);

        let state = apply(solve_current(state), SessionEvent::Next);
        assert_eq!(state.cursor(), 1);
        assert!(!state.solved_current());
        assert_eq!(state.message(), None);
        assert_eq!(state.progress(), (2, 3));
    }

    #[test]
    fn test_full_game_and_reset() {
        let mut state = new_session();
        loop {
            state = solve_current(state);
            if state.is_last_round() {
                break;
            }
            state = apply(state, SessionEvent::Next);
        }
        assert!(state.is_complete());
        assert_eq!(state.correct_count(), 3);

        // no round after the last one
        let state = apply(state, SessionEvent::Next);
        assert_eq!(state.cursor(), 2);

        let (rounds, _) = generate(3, 20_000, Some(12)).unwrap();
        let state = apply(state, SessionEvent::Reset(rounds.clone()));
        assert_eq!(state, SessionState::new(rounds));
    }
}
