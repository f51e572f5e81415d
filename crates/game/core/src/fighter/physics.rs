//! Physics integration and per-tick timers.

use crate::config::CombatConfig;

use super::{Fighter, FighterState};

impl Fighter {
    /// Integrates one tick of motion, then regenerates stamina and drains
    /// stun timers.
    pub(super) fn integrate(&mut self, requested_dx: i32, config: &CombatConfig) {
        let mut dx = requested_dx;

        // The dash timer always drains so an interrupted dash cannot lock out
        // the next one; it only drives motion while still in the Dash state.
        if self.dash_timer.is_active() {
            let expired = self.dash_timer.tick();
            if self.state == FighterState::Dash {
                dx = self.facing.sign() * config.movement.dash_speed;
                if expired {
                    let next = self.neutral_state();
                    self.set_state(next);
                }
            }
        }

        self.body.shift_x_clamped(dx, config.stage.width);

        self.vel_y += config.movement.gravity;
        // Truncate toward zero, matching whole-pixel positions.
        self.body.y += self.vel_y as i32;

        let ground_y = config.stage.ground_y;
        if self.body.bottom() >= ground_y {
            self.body.set_bottom(ground_y);
            self.vel_y = 0.0;
            self.grounded = true;
            if matches!(self.state, FighterState::Jump | FighterState::Fall) {
                self.set_state(FighterState::Idle);
            }
        } else {
            let holds_state = matches!(
                self.state,
                FighterState::Attack
                    | FighterState::Dash
                    | FighterState::Hitstun
                    | FighterState::KnockedDown
            );
            if self.vel_y > 0.0 && !holds_state {
                self.set_state(FighterState::Fall);
            }
            self.grounded = false;
        }

        if self.state != FighterState::Dash {
            self.stamina = (self.stamina + config.fighter.stamina_regen).min(self.max_stamina);
        }

        self.guard_stun.tick();
        if self.hitstun.tick() && self.health > 0 && self.state == FighterState::Hitstun {
            let next = self.neutral_state();
            self.set_state(next);
        }
    }
}
