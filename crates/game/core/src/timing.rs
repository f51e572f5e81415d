//! Frame countdowns.
//!
//! Hitstop, hitstun, guard stun, the dash timer and the round clock are all
//! non-negative frame counters that tick down once per simulation step.
//! [`Countdown`] is the single implementation behind them: it saturates at
//! zero, so no counter can ever go negative.
//!
//! Hitstop is a countdown gate rather than a scheduler state: each fighter
//! checks its own hitstop at the top of its update and, while it is active,
//! spends the tick draining it instead of advancing.

use core::fmt;

/// Non-negative frame counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Countdown(u32);

impl Countdown {
    pub const ZERO: Self = Self(0);

    pub const fn new(frames: u32) -> Self {
        Self(frames)
    }

    /// Frames left before the countdown expires.
    #[inline]
    pub const fn remaining(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_active(self) -> bool {
        self.0 > 0
    }

    pub fn set(&mut self, frames: u32) {
        self.0 = frames;
    }

    /// Sets the countdown to `frames`, never above `cap`.
    pub fn set_capped(&mut self, frames: u32, cap: u32) {
        self.0 = frames.min(cap);
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Advances one frame.
    ///
    /// Returns `true` only on the tick the countdown reaches zero; an already
    /// expired countdown stays at zero and returns `false`.
    pub fn tick(&mut self) -> bool {
        if self.0 == 0 {
            return false;
        }
        self.0 -= 1;
        self.0 == 0
    }

    /// Whole seconds remaining at the given tick rate, rounded down.
    pub const fn seconds_remaining(self, ticks_per_second: u32) -> u32 {
        if ticks_per_second == 0 {
            return 0;
        }
        self.0 / ticks_per_second
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}f", self.0)
    }
}
