//! Deterministic two-player fighting combat.
//!
//! `fight-core` defines the canonical rules (move frame data, the fighter state
//! machine, hit resolution and round flow) as pure, fixed-tick logic with no
//! I/O. All state mutation during play flows through [`engine::Match`]; loaders
//! and clients depend on the types re-exported here.
pub mod combat;
pub mod config;
pub mod engine;
pub mod error;
pub mod fighter;
pub mod geometry;
pub mod input;
pub mod moves;
pub mod round;
pub mod side;
pub mod timing;

pub use combat::{HitEvent, HitEvents, HitKind};
pub use config::{
    CombatConfig, ConfigError, FighterConfig, HitConfig, MovementConfig, RoundConfig, StageConfig,
};
pub use engine::{Match, MatchCommand, MatchError, MatchView, Phase, RoundAdvance, TickReport};
pub use error::{ErrorSeverity, GameError};
pub use fighter::{Fighter, FighterState, FighterView, Swing};
pub use geometry::Rect;
pub use input::{InputIntents, InputParseError};
pub use moves::{HitboxAnchor, HitboxSpec, Move, MoveError, MoveKind, MovePhase, MoveTable};
pub use round::{RoundController, RoundOutcome};
pub use side::{Facing, Side};
pub use timing::Countdown;
