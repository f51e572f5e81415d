//! Error types for match flow commands.

use crate::error::{ErrorSeverity, GameError};

use super::Phase;

/// Flow commands a [`Match`](super::Match) accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MatchCommand {
    StartMatch,
    Pause,
    Resume,
    RestartRound,
    AdvanceRound,
    QuitToTitle,
}

/// Errors surfaced when a flow command is issued in the wrong phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchError {
    #[error("cannot {command} while {phase}")]
    WrongPhase { command: MatchCommand, phase: Phase },
}

impl GameError for MatchError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::WrongPhase { .. } => "MATCH_WRONG_PHASE",
        }
    }
}
