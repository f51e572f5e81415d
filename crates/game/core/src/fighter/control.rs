//! Input resolution.
//!
//! Intents are resolved in a fixed precedence: block, crouch, dash, walking,
//! jump, then attack initiation. Committed fighters (attacking, stunned,
//! knocked down or guard-locked) skip this step entirely.

use crate::config::CombatConfig;
use crate::input::InputIntents;
use crate::moves::MoveKind;
use crate::side::Facing;

use super::{Fighter, FighterState, Swing};

impl Fighter {
    /// Applies this tick's voluntary input and returns the horizontal
    /// displacement it requests.
    pub(super) fn resolve_input(&mut self, input: InputIntents, config: &CombatConfig) -> i32 {
        if self.state.is_committed() || self.guard_stun.is_active() {
            return 0;
        }

        let left = input.contains(InputIntents::LEFT);
        let right = input.contains(InputIntents::RIGHT);
        let up = input.contains(InputIntents::UP);
        let down = input.contains(InputIntents::DOWN);
        let light = input.contains(InputIntents::LIGHT);
        let heavy = input.contains(InputIntents::HEAVY);

        let blocking = input.contains(InputIntents::BLOCK) && self.grounded && !down;
        if blocking {
            self.set_state(FighterState::Block);
        } else if self.state == FighterState::Block {
            self.set_state(FighterState::Idle);
        }

        if down && self.grounded && !blocking {
            self.set_state(FighterState::Crouch);
        } else if self.grounded && self.state == FighterState::Crouch {
            self.set_state(FighterState::Idle);
        }

        if input.contains(InputIntents::DASH) && !blocking && self.state != FighterState::Crouch {
            self.try_dash(config);
        }

        let mut dx = 0;
        let free_to_move = !blocking
            && !matches!(self.state, FighterState::Dash | FighterState::Crouch);
        if free_to_move {
            let speed = if self.grounded {
                config.movement.ground_speed
            } else {
                config.movement.air_speed
            };
            dx = input.horizontal() * speed;
            if left {
                self.facing = Facing::Left;
            }
            if right {
                self.facing = Facing::Right;
            }
            if self.grounded {
                if (left || right) && self.state == FighterState::Idle {
                    self.set_state(FighterState::Walk);
                } else if !left && !right && self.state == FighterState::Walk {
                    self.set_state(FighterState::Idle);
                }
            }
        }

        // No double jump: only a grounded fighter can leave the ground.
        if up && self.grounded && !blocking {
            self.vel_y = config.movement.jump_velocity;
            self.grounded = false;
            self.set_state(FighterState::Jump);
        }

        if !blocking && self.state != FighterState::Dash {
            let chosen = if self.grounded {
                if down && light {
                    Some(MoveKind::CrouchLight)
                } else if light {
                    Some(MoveKind::Light)
                } else if heavy {
                    Some(MoveKind::Heavy)
                } else {
                    None
                }
            } else if input.any_attack() {
                Some(MoveKind::JumpLight)
            } else {
                None
            };

            if let Some(kind) = chosen {
                self.start_attack(kind);
            }
        }

        dx
    }

    /// Starts a dash if grounded, affordable and not already dashing.
    ///
    /// Returns whether the dash started. A refused dash leaves state and
    /// stamina untouched.
    pub(super) fn try_dash(&mut self, config: &CombatConfig) -> bool {
        let movement = &config.movement;
        if !self.grounded || self.dash_timer.is_active() || self.stamina < movement.dash_cost {
            return false;
        }

        self.stamina = (self.stamina - movement.dash_cost).max(0.0);
        self.dash_timer.set(movement.dash_duration);
        self.set_state(FighterState::Dash);
        true
    }

    pub(super) fn start_attack(&mut self, kind: MoveKind) {
        self.swing = Some(Swing::new(kind));
        self.hitbox = None;
        self.set_state(FighterState::Attack);
        tracing::trace!(side = %self.side, attack = %kind, "attack started");
    }
}

#[cfg(test)]
mod tests {
    use crate::config::CombatConfig;
    use crate::fighter::{Fighter, FighterState};
    use crate::input::InputIntents;
    use crate::moves::{MoveKind, MoveTable};
    use crate::side::{Facing, Side};

    fn setup() -> (Fighter, MoveTable, CombatConfig) {
        let config = CombatConfig::default();
        (Fighter::new(Side::P1, &config), MoveTable::standard(), config)
    }

    #[test]
    fn walking_moves_and_turns() {
        let (mut p1, moves, config) = setup();
        p1.tick(InputIntents::LEFT, &moves, &config);

        assert_eq!(p1.state, FighterState::Walk);
        assert_eq!(p1.facing, Facing::Left);
        assert_eq!(p1.body.x, 194);

        p1.tick(InputIntents::empty(), &moves, &config);
        assert_eq!(p1.state, FighterState::Idle);
        assert_eq!(p1.body.x, 194);
    }

    #[test]
    fn block_takes_precedence_over_attack() {
        let (mut p1, moves, config) = setup();
        p1.tick(InputIntents::BLOCK | InputIntents::LIGHT, &moves, &config);
        assert_eq!(p1.state, FighterState::Block);
        assert_eq!(p1.swing, None);

        p1.tick(InputIntents::empty(), &moves, &config);
        assert_eq!(p1.state, FighterState::Idle);
    }

    #[test]
    fn down_overrides_block_into_crouch() {
        let (mut p1, moves, config) = setup();
        p1.tick(InputIntents::BLOCK | InputIntents::DOWN, &moves, &config);
        assert_eq!(p1.state, FighterState::Crouch);

        p1.tick(InputIntents::RIGHT, &moves, &config);
        assert_eq!(p1.state, FighterState::Walk);
    }

    #[test]
    fn crouching_light_is_chosen_over_standing_light() {
        let (mut p1, moves, config) = setup();
        p1.tick(InputIntents::DOWN | InputIntents::LIGHT, &moves, &config);
        assert_eq!(p1.state, FighterState::Attack);
        assert_eq!(p1.attack(), Some(MoveKind::CrouchLight));
    }

    #[test]
    fn light_wins_over_heavy() {
        let (mut p1, moves, config) = setup();
        p1.tick(InputIntents::LIGHT | InputIntents::HEAVY, &moves, &config);
        assert_eq!(p1.attack(), Some(MoveKind::Light));
    }

    #[test]
    fn airborne_attack_is_jump_light() {
        let (mut p1, moves, config) = setup();
        p1.tick(InputIntents::UP, &moves, &config);
        assert_eq!(p1.state, FighterState::Jump);
        assert!(!p1.grounded);

        p1.tick(InputIntents::HEAVY, &moves, &config);
        assert_eq!(p1.attack(), Some(MoveKind::JumpLight));
    }

    #[test]
    fn air_control_is_slower_than_walking() {
        let (mut p1, moves, config) = setup();
        p1.tick(InputIntents::UP, &moves, &config);
        assert_eq!(p1.body.x, 200);

        p1.tick(InputIntents::RIGHT, &moves, &config);
        assert!(!p1.grounded);
        assert_eq!(p1.body.x, 200 + config.movement.air_speed);
        assert_eq!(p1.facing, Facing::Right);
        assert_eq!(p1.state, FighterState::Jump);
    }

    #[test]
    fn no_double_jump() {
        let (mut p1, moves, config) = setup();
        p1.tick(InputIntents::UP, &moves, &config);
        let rising = p1.vel_y;
        let height = p1.body.y;

        p1.tick(InputIntents::UP, &moves, &config);
        assert_eq!(p1.vel_y, rising + config.movement.gravity);
        assert_ne!(p1.vel_y, config.movement.jump_velocity);
        assert!(p1.body.y < height);
        assert_eq!(p1.state, FighterState::Jump);
    }

    #[test]
    fn attack_cannot_be_cancelled() {
        let (mut p1, moves, config) = setup();
        p1.tick(InputIntents::HEAVY, &moves, &config);
        p1.tick(InputIntents::BLOCK | InputIntents::LEFT | InputIntents::UP, &moves, &config);

        assert_eq!(p1.state, FighterState::Attack);
        assert_eq!(p1.attack(), Some(MoveKind::Heavy));
        assert_eq!(p1.body.x, 200);
        assert!(p1.grounded);
    }

    #[test]
    fn dash_spends_stamina_and_cannot_retrigger() {
        let (mut p1, moves, config) = setup();
        p1.tick(InputIntents::DASH, &moves, &config);

        assert_eq!(p1.state, FighterState::Dash);
        assert_eq!(p1.stamina, 70.0);
        assert_eq!(p1.dash_timer.remaining(), config.movement.dash_duration - 1);
        assert_eq!(p1.body.x, 211);

        p1.tick(InputIntents::DASH, &moves, &config);
        assert_eq!(p1.stamina, 70.0);
        assert_eq!(p1.body.x, 222);
    }

    #[test]
    fn dash_expires_back_to_idle() {
        let (mut p1, moves, config) = setup();
        p1.tick(InputIntents::DASH, &moves, &config);
        for _ in 1..config.movement.dash_duration {
            p1.tick(InputIntents::empty(), &moves, &config);
        }
        assert_eq!(p1.state, FighterState::Idle);
        assert!(!p1.dash_timer.is_active());
        assert_eq!(p1.body.x, 200 + 11 * config.movement.dash_duration as i32);
    }

    #[test]
    fn dash_refused_without_stamina() {
        let (mut p1, moves, config) = setup();
        p1.stamina = 29.0;
        p1.tick(InputIntents::DASH, &moves, &config);

        assert_eq!(p1.state, FighterState::Idle);
        assert!(!p1.dash_timer.is_active());
        // Regeneration still applies on the refused tick.
        assert_eq!(p1.stamina, 29.5);
    }
}
