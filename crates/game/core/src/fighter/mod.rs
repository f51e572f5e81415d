//! Per-combatant state machine.
//!
//! A [`Fighter`] owns one combatant's body, physics, resources and timers.
//! Each tick [`Fighter::tick`] runs, in order:
//!
//! 1. the hitstop gate (a frozen fighter only drains its freeze),
//! 2. input resolution ([`control`]),
//! 3. physics integration and timers ([`physics`]),
//! 4. frame-data progression and hitbox generation ([`attack`]),
//! 5. the guard lock.
//!
//! Hit outcomes are applied from outside by the resolver through
//! [`Fighter::receive_hit`] and [`Fighter::receive_block`].

mod attack;
mod control;
mod physics;

use crate::config::CombatConfig;
use crate::geometry::Rect;
use crate::input::InputIntents;
use crate::moves::{MoveKind, MoveTable};
use crate::side::{Facing, Side};
use crate::timing::Countdown;

/// State tag of a fighter.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum FighterState {
    #[default]
    Idle,
    Walk,
    Jump,
    Fall,
    Crouch,
    Attack,
    Block,
    Hitstun,
    /// Health reached zero. Persists until the next round reset.
    KnockedDown,
    Dash,
}

impl FighterState {
    /// States in which voluntary input is ignored.
    pub const fn is_committed(self) -> bool {
        matches!(
            self,
            FighterState::Hitstun | FighterState::KnockedDown | FighterState::Attack
        )
    }
}

/// The attack currently being performed.
///
/// Present exactly while the owning fighter is in [`FighterState::Attack`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swing {
    pub kind: MoveKind,
    /// Frames elapsed since the move started.
    pub frame: u32,
    /// Set once this swing has landed; no further hitbox is produced for it.
    pub connected: bool,
}

impl Swing {
    pub const fn new(kind: MoveKind) -> Self {
        Self {
            kind,
            frame: 0,
            connected: false,
        }
    }
}

/// One combatant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fighter {
    pub side: Side,
    pub body: Rect,
    /// Vertical velocity in pixels per tick (negative is upward).
    pub vel_y: f32,
    pub grounded: bool,
    pub facing: Facing,
    pub health: u32,
    pub max_health: u32,
    pub stamina: f32,
    pub max_stamina: f32,
    pub state: FighterState,
    pub swing: Option<Swing>,
    /// Live attack box; only during an unconnected swing's active frames.
    pub hitbox: Option<Rect>,
    pub guard_stun: Countdown,
    pub hitstun: Countdown,
    pub hitstop: Countdown,
    pub dash_timer: Countdown,
    /// Rounds taken this match. Survives round resets.
    pub rounds_won: u32,
}

impl Fighter {
    /// Creates a fighter standing at its side's spawn point.
    pub fn new(side: Side, config: &CombatConfig) -> Self {
        let mut fighter = Self {
            side,
            body: Rect::new(
                0,
                0,
                config.fighter.body_width,
                config.fighter.body_height,
            ),
            vel_y: 0.0,
            grounded: true,
            facing: Facing::Right,
            health: config.fighter.max_health,
            max_health: config.fighter.max_health,
            stamina: config.fighter.max_stamina,
            max_stamina: config.fighter.max_stamina,
            state: FighterState::Idle,
            swing: None,
            hitbox: None,
            guard_stun: Countdown::ZERO,
            hitstun: Countdown::ZERO,
            hitstop: Countdown::ZERO,
            dash_timer: Countdown::ZERO,
            rounds_won: 0,
        };
        fighter.reset_for_round(config);
        fighter
    }

    /// Restores the start-of-round condition. `rounds_won` is kept.
    pub fn reset_for_round(&mut self, config: &CombatConfig) {
        let (x, facing) = match self.side {
            Side::P1 => (config.stage.spawn_left_x, Facing::Right),
            Side::P2 => (config.stage.spawn_right_x, Facing::Left),
        };

        self.body = Rect::new(
            x,
            config.stage.ground_y - config.fighter.body_height,
            config.fighter.body_width,
            config.fighter.body_height,
        );
        self.facing = facing;
        self.vel_y = 0.0;
        self.grounded = true;
        self.state = FighterState::Idle;
        self.swing = None;
        self.hitbox = None;
        self.guard_stun.clear();
        self.hitstun.clear();
        self.hitstop.clear();
        self.dash_timer.clear();
        self.max_health = config.fighter.max_health;
        self.health = self.max_health;
        self.max_stamina = config.fighter.max_stamina;
        self.stamina = self.max_stamina;
    }

    /// Restores the start-of-match condition, including `rounds_won`.
    pub fn reset_for_match(&mut self, config: &CombatConfig) {
        self.rounds_won = 0;
        self.reset_for_round(config);
    }

    /// Advances this fighter by one tick.
    pub fn tick(&mut self, input: InputIntents, moves: &MoveTable, config: &CombatConfig) {
        if self.hitstop.is_active() {
            self.hitstop.tick();
        } else {
            let dx = self.resolve_input(input, config);
            self.integrate(dx, config);
            self.advance_attack(moves);
        }

        if self.guard_stun.is_active() {
            self.set_state(FighterState::Block);
        }
    }

    #[inline]
    pub fn is_knocked_out(&self) -> bool {
        self.health == 0
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.hitstop.is_active()
    }

    /// Current attack, if any.
    #[inline]
    pub fn attack(&self) -> Option<MoveKind> {
        self.swing.map(|swing| swing.kind)
    }

    /// Applies a blocked hit: chip damage, guard stun and a small push away
    /// from the attacker.
    pub fn receive_block(&mut self, chip: u32, push: Facing, config: &CombatConfig) {
        self.health = self.health.saturating_sub(chip);
        self.guard_stun.set(config.hit.blockstun);
        self.body
            .shift_x_clamped(push.sign() * config.hit.block_pushback, config.stage.width);
    }

    /// Applies an unblocked hit: full damage, knockback and hitstun (or a
    /// knockdown when health runs out). Interrupts any attack in progress.
    pub fn receive_hit(&mut self, damage: u32, knockback: i32, push: Facing, config: &CombatConfig) {
        self.health = self.health.saturating_sub(damage);
        self.swing = None;
        self.hitbox = None;
        self.guard_stun.clear();
        self.set_state(if self.health > 0 {
            FighterState::Hitstun
        } else {
            FighterState::KnockedDown
        });
        self.body
            .shift_x_clamped(push.sign() * knockback, config.stage.width);

        if self.grounded {
            let stun = if damage >= config.hit.heavy_damage_threshold {
                config.hit.hitstun_heavy
            } else {
                config.hit.hitstun_light
            };
            self.hitstun.set(stun);
        } else {
            self.vel_y = config.hit.juggle_velocity;
            self.hitstun.set(config.hit.juggle_hitstun);
        }
    }

    /// Freezes this fighter for `frames`, capped by the global hitstop limit.
    pub fn enter_hitstop(&mut self, frames: u32, config: &CombatConfig) {
        self.hitstop.set_capped(frames, config.hit.hitstop_max);
    }

    /// Read-only snapshot for renderers and other observers.
    pub fn view(&self) -> FighterView {
        FighterView {
            side: self.side,
            body: self.body,
            facing: self.facing,
            health: self.health,
            max_health: self.max_health,
            stamina: self.stamina,
            max_stamina: self.max_stamina,
            state: self.state,
            attack: self.attack(),
            hitbox: self.hitbox,
            rounds_won: self.rounds_won,
        }
    }

    fn set_state(&mut self, next: FighterState) {
        if self.state != next {
            tracing::trace!(side = %self.side, from = %self.state, to = %next, "state transition");
            self.state = next;
        }
    }

    /// State to settle into when nothing else claims the fighter.
    fn neutral_state(&self) -> FighterState {
        if self.grounded {
            FighterState::Idle
        } else {
            FighterState::Fall
        }
    }
}

/// What an observer may read about a fighter each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FighterView {
    pub side: Side,
    pub body: Rect,
    pub facing: Facing,
    pub health: u32,
    pub max_health: u32,
    pub stamina: f32,
    pub max_stamina: f32,
    pub state: FighterState,
    pub attack: Option<MoveKind>,
    pub hitbox: Option<Rect>,
    pub rounds_won: u32,
}
