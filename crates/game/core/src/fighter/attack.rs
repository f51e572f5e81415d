//! Frame-data interpretation.
//!
//! While attacking, the swing's frame counter is classified against the
//! move's startup/active/recovery boundaries once per unfrozen tick. The
//! hitbox is rebuilt from scratch every tick and only exists on active frames
//! of a swing that has not yet connected.

use crate::moves::{MovePhase, MoveTable};

use super::Fighter;

impl Fighter {
    pub(super) fn advance_attack(&mut self, moves: &MoveTable) {
        self.hitbox = None;

        let Some(mut swing) = self.swing else {
            return;
        };

        let data = moves.get(swing.kind);
        match data.phase_at(swing.frame) {
            MovePhase::Finished => {
                self.swing = None;
                let next = self.neutral_state();
                self.set_state(next);
                return;
            }
            MovePhase::Active if !swing.connected => {
                self.hitbox = Some(data.hitbox.place(&self.body, self.facing));
            }
            MovePhase::Startup | MovePhase::Active | MovePhase::Recovery => {}
        }

        swing.frame += 1;
        self.swing = Some(swing);
    }

    /// Marks the current swing as landed and removes its hitbox.
    pub(crate) fn consume_hitbox(&mut self) {
        self.hitbox = None;
        if let Some(swing) = self.swing.as_mut() {
            swing.connected = true;
        }
    }
}
