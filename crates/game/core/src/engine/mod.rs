//! Match flow and the per-tick driver.
//!
//! The [`Match`] is the authoritative owner of both fighters, the move table,
//! the configuration and the round clock. Each [`Match::step`] runs one tick in
//! a fixed order:
//!
//! 1. both fighters turn toward each other,
//! 2. P1 then P2 resolve input, integrate physics and advance attacks,
//! 3. hitbox contact is resolved in both directions,
//! 4. the round clock burns one tick unless a fighter is in hitstop,
//! 5. the round is judged.
//!
//! Everything outside a tick (starting, pausing, restarting and advancing
//! rounds) goes through flow commands that are only valid in certain phases.

mod errors;

pub use errors::{MatchCommand, MatchError};

use core::fmt;

use crate::combat::{self, HitEvents};
use crate::config::{CombatConfig, ConfigError};
use crate::fighter::{Fighter, FighterView};
use crate::input::InputIntents;
use crate::moves::MoveTable;
use crate::round::{RoundController, RoundOutcome};
use crate::side::Side;
use crate::timing::Countdown;

/// Flow phase of a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Title screen; nothing is simulated.
    #[default]
    NotStarted,
    Playing,
    Paused,
    RoundOver { outcome: RoundOutcome },
    MatchOver { winner: Side },
}

impl Phase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Phase::NotStarted => "not_started",
            Phase::Playing => "playing",
            Phase::Paused => "paused",
            Phase::RoundOver { .. } => "round_over",
            Phase::MatchOver { .. } => "match_over",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    /// Contacts resolved this tick, P1's attack first.
    pub events: HitEvents,
    /// Set only on the tick the round is decided.
    pub outcome: Option<RoundOutcome>,
}

/// Result of [`Match::advance_round`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundAdvance {
    NextRound { round: u32 },
    MatchDecided { winner: Side },
}

/// Everything a renderer or HUD reads after a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchView {
    pub phase: Phase,
    pub round: u32,
    pub rounds_to_win: u32,
    pub timer_frames: u32,
    pub timer_seconds: u32,
    /// Ticks simulated since the match started.
    pub frame: u64,
    pub fighters: [FighterView; 2],
}

/// A two-fighter match.
#[derive(Clone, Debug)]
pub struct Match {
    config: CombatConfig,
    moves: MoveTable,
    fighters: [Fighter; 2],
    rounds: RoundController,
    phase: Phase,
    frame: u64,
}

impl Match {
    /// Builds a match on the title screen. The configuration is validated.
    pub fn new(config: CombatConfig, moves: MoveTable) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::assemble(config, moves))
    }

    /// A match with the default configuration and the standard move table.
    pub fn standard() -> Self {
        Self::assemble(CombatConfig::default(), MoveTable::standard())
    }

    fn assemble(config: CombatConfig, moves: MoveTable) -> Self {
        Self {
            fighters: [
                Fighter::new(Side::P1, &config),
                Fighter::new(Side::P2, &config),
            ],
            rounds: RoundController::new(&config),
            phase: Phase::NotStarted,
            frame: 0,
            config,
            moves,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    #[inline]
    pub fn moves(&self) -> &MoveTable {
        &self.moves
    }

    #[inline]
    pub fn fighters(&self) -> &[Fighter; 2] {
        &self.fighters
    }

    #[inline]
    pub fn fighter(&self, side: Side) -> &Fighter {
        &self.fighters[side.index()]
    }

    /// Mutable access for tooling and tests that need to stage a position.
    #[inline]
    pub fn fighter_mut(&mut self, side: Side) -> &mut Fighter {
        &mut self.fighters[side.index()]
    }

    #[inline]
    pub fn round(&self) -> u32 {
        self.rounds.round()
    }

    #[inline]
    pub fn timer(&self) -> Countdown {
        self.rounds.timer()
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Starts a new match from the title screen or after a decided match.
    pub fn start_match(&mut self) -> Result<(), MatchError> {
        match self.phase {
            Phase::NotStarted | Phase::MatchOver { .. } => {}
            phase => return Err(self.reject(MatchCommand::StartMatch, phase)),
        }

        self.rounds.start_match(&mut self.fighters, &self.config);
        self.frame = 0;
        self.enter(Phase::Playing, MatchCommand::StartMatch);
        Ok(())
    }

    /// Advances the simulation by one tick.
    ///
    /// Outside [`Phase::Playing`] nothing moves and an empty report is returned.
    pub fn step(&mut self, inputs: [InputIntents; 2]) -> TickReport {
        if self.phase != Phase::Playing {
            return TickReport::default();
        }

        combat::update_facing(&mut self.fighters);
        for (fighter, input) in self.fighters.iter_mut().zip(inputs) {
            fighter.tick(input, &self.moves, &self.config);
        }
        let events = combat::resolve_hits(&mut self.fighters, &self.moves, &self.config);
        self.rounds.tick_timer(&self.fighters);
        let outcome = self.rounds.judge(&mut self.fighters);
        self.frame += 1;

        if let Some(outcome) = outcome {
            let next = match self.rounds.match_winner(&self.fighters) {
                Some(winner) => Phase::MatchOver { winner },
                None => Phase::RoundOver { outcome },
            };
            self.phase = next;
            tracing::debug!(frame = self.frame, phase = %next, "round ended");
        }

        TickReport { events, outcome }
    }

    pub fn pause(&mut self) -> Result<(), MatchError> {
        if self.phase != Phase::Playing {
            return Err(self.reject(MatchCommand::Pause, self.phase));
        }
        self.enter(Phase::Paused, MatchCommand::Pause);
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), MatchError> {
        if self.phase != Phase::Paused {
            return Err(self.reject(MatchCommand::Resume, self.phase));
        }
        self.enter(Phase::Playing, MatchCommand::Resume);
        Ok(())
    }

    /// Replays the current round from its start positions.
    ///
    /// Only a round still being fought can be restarted; the score is kept.
    pub fn restart_round(&mut self) -> Result<(), MatchError> {
        match self.phase {
            Phase::Playing | Phase::Paused => {}
            phase => return Err(self.reject(MatchCommand::RestartRound, phase)),
        }

        self.rounds.restart_round(&mut self.fighters, &self.config);
        self.enter(Phase::Playing, MatchCommand::RestartRound);
        Ok(())
    }

    /// Moves past a decided round.
    ///
    /// After a round, the next one starts; after the match, the winner is
    /// reported and the phase stays [`Phase::MatchOver`].
    pub fn advance_round(&mut self) -> Result<RoundAdvance, MatchError> {
        match self.phase {
            Phase::RoundOver { .. } => {
                self.rounds.next_round(&mut self.fighters, &self.config);
                self.enter(Phase::Playing, MatchCommand::AdvanceRound);
                Ok(RoundAdvance::NextRound {
                    round: self.rounds.round(),
                })
            }
            Phase::MatchOver { winner } => Ok(RoundAdvance::MatchDecided { winner }),
            phase => Err(self.reject(MatchCommand::AdvanceRound, phase)),
        }
    }

    /// Abandons the match and returns to the title screen.
    pub fn quit_to_title(&mut self) -> Result<(), MatchError> {
        if self.phase == Phase::NotStarted {
            return Err(self.reject(MatchCommand::QuitToTitle, self.phase));
        }

        self.rounds.start_match(&mut self.fighters, &self.config);
        self.frame = 0;
        self.enter(Phase::NotStarted, MatchCommand::QuitToTitle);
        Ok(())
    }

    pub fn view(&self) -> MatchView {
        let timer = self.rounds.timer();
        MatchView {
            phase: self.phase,
            round: self.rounds.round(),
            rounds_to_win: self.rounds.rounds_to_win(),
            timer_frames: timer.remaining(),
            timer_seconds: timer.seconds_remaining(self.config.round.ticks_per_second),
            frame: self.frame,
            fighters: [self.fighters[0].view(), self.fighters[1].view()],
        }
    }

    fn enter(&mut self, next: Phase, command: MatchCommand) {
        tracing::debug!(%command, from = %self.phase, to = %next, round = self.rounds.round(), "match phase change");
        self.phase = next;
    }

    fn reject(&self, command: MatchCommand, phase: Phase) -> MatchError {
        tracing::debug!(%command, %phase, "flow command rejected");
        MatchError::WrongPhase { command, phase }
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::standard()
    }
}
