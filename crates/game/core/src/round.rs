//! Round clock, round outcomes and win bookkeeping.
//!
//! Outcome priority, checked once per tick after hit resolution:
//!
//! ```text
//! both knocked out        -> draw
//! P1 knocked out          -> P2 wins
//! P2 knocked out          -> P1 wins
//! clock expired           -> higher health wins, equal health draws
//! otherwise               -> round continues
//! ```

use core::fmt;

use crate::config::CombatConfig;
use crate::fighter::Fighter;
use crate::side::Side;
use crate::timing::Countdown;

/// How a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundOutcome {
    Winner(Side),
    Draw,
}

impl RoundOutcome {
    pub const fn winner(self) -> Option<Side> {
        match self {
            RoundOutcome::Winner(side) => Some(side),
            RoundOutcome::Draw => None,
        }
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundOutcome::Winner(side) => write!(f, "{side} wins"),
            RoundOutcome::Draw => f.write_str("draw"),
        }
    }
}

/// Judges a round from both fighters' health and the clock.
pub fn evaluate_round(fighters: &[Fighter; 2], timer: Countdown) -> Option<RoundOutcome> {
    let [p1, p2] = fighters;
    match (p1.is_knocked_out(), p2.is_knocked_out()) {
        (true, true) => Some(RoundOutcome::Draw),
        (true, false) => Some(RoundOutcome::Winner(Side::P2)),
        (false, true) => Some(RoundOutcome::Winner(Side::P1)),
        (false, false) if !timer.is_active() => Some(match p1.health.cmp(&p2.health) {
            core::cmp::Ordering::Greater => RoundOutcome::Winner(Side::P1),
            core::cmp::Ordering::Less => RoundOutcome::Winner(Side::P2),
            core::cmp::Ordering::Equal => RoundOutcome::Draw,
        }),
        (false, false) => None,
    }
}

/// Owns the round clock and the current round's result.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundController {
    timer: Countdown,
    round: u32,
    outcome: Option<RoundOutcome>,
    round_ticks: u32,
    rounds_to_win: u32,
}

impl RoundController {
    pub fn new(config: &CombatConfig) -> Self {
        Self {
            timer: Countdown::new(config.round.round_ticks()),
            round: 1,
            outcome: None,
            round_ticks: config.round.round_ticks(),
            rounds_to_win: config.round.rounds_to_win,
        }
    }

    #[inline]
    pub fn timer(&self) -> Countdown {
        self.timer
    }

    /// 1-based number of the round being fought.
    #[inline]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[inline]
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    #[inline]
    pub fn rounds_to_win(&self) -> u32 {
        self.rounds_to_win
    }

    /// Burns one tick of round time unless either fighter is frozen in hitstop.
    pub fn tick_timer(&mut self, fighters: &[Fighter; 2]) {
        if fighters.iter().any(Fighter::is_frozen) {
            return;
        }
        self.timer.tick();
    }

    /// Checks for a round result and, if there is one, records it.
    ///
    /// Returns the outcome only on the tick it is decided. A winner's
    /// `rounds_won` is incremented; draws credit nobody.
    pub fn judge(&mut self, fighters: &mut [Fighter; 2]) -> Option<RoundOutcome> {
        if self.outcome.is_some() {
            return None;
        }

        let outcome = evaluate_round(fighters, self.timer)?;
        if let Some(winner) = outcome.winner() {
            fighters[winner.index()].rounds_won += 1;
        }
        self.outcome = Some(outcome);

        tracing::debug!(
            round = self.round,
            %outcome,
            p1_health = fighters[0].health,
            p2_health = fighters[1].health,
            timer = self.timer.remaining(),
            "round decided"
        );
        Some(outcome)
    }

    /// The side that has reached the rounds-to-win threshold, if any.
    pub fn match_winner(&self, fighters: &[Fighter; 2]) -> Option<Side> {
        Side::BOTH
            .into_iter()
            .find(|side| fighters[side.index()].rounds_won >= self.rounds_to_win)
    }

    /// Replays the current round from its start, keeping the score.
    pub fn restart_round(&mut self, fighters: &mut [Fighter; 2], config: &CombatConfig) {
        self.reset(fighters, config);
    }

    /// Moves on to the next round, keeping the score.
    pub fn next_round(&mut self, fighters: &mut [Fighter; 2], config: &CombatConfig) {
        self.reset(fighters, config);
        self.round += 1;
    }

    /// Starts a fresh match: zeroes `rounds_won` and returns to round one.
    pub fn start_match(&mut self, fighters: &mut [Fighter; 2], config: &CombatConfig) {
        for fighter in fighters.iter_mut() {
            fighter.reset_for_match(config);
        }
        self.timer.set(self.round_ticks);
        self.outcome = None;
        self.round = 1;
    }

    fn reset(&mut self, fighters: &mut [Fighter; 2], config: &CombatConfig) {
        for fighter in fighters.iter_mut() {
            fighter.reset_for_round(config);
        }
        self.timer.set(self.round_ticks);
        self.outcome = None;
    }
}
