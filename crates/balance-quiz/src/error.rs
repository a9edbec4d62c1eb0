//! Error type shared by the generator, the round model and the CLI.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    /// The attempt budget ran out before enough unique rounds were accepted.
    #[error(
        "unable to generate {requested} unique rounds (got {generated} after {attempts} attempts); \
         try again or increase max_attempts"
    )]
    GenerationExhausted {
        requested: usize,
        generated: usize,
        attempts: usize,
    },
    #[error("invalid generator config: {0}")]
    InvalidConfig(String),
    #[error("invalid round: {0}")]
    InvalidRound(String),
    #[error("unknown operator '{0}'; expected one of: + - * /")]
    ParseOperator(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl QuizError {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, QuizError::GenerationExhausted { .. })
    }
}
