//! Two-fighter interactions.
//!
//! This module holds the pure functions that look at both fighters at once:
//! facing each other at the top of a tick, and resolving hitbox contact after
//! both have advanced. Fighters never reach into each other; every mutual
//! effect is applied here in a fixed order (P1 attacking, then P2 attacking).
//!
//! # Core Functions
//!
//! - `update_facing`: turn both fighters toward each other
//! - `resolve_hits`: detect contact and apply hit/block outcomes
//! - `is_blocking`: blocking eligibility of a victim against an attacker
//! - `chip_damage`: damage that goes through a successful block

mod resolver;

pub use resolver::{HitEvent, HitEvents, HitKind, chip_damage, is_blocking, resolve_hits};

use crate::fighter::Fighter;
use crate::side::Facing;

/// Turns both fighters toward each other.
///
/// When their centers coincide, P1 faces left and P2 faces right.
pub fn update_facing(fighters: &mut [Fighter; 2]) {
    let [p1, p2] = fighters;
    if p1.body.center_x() < p2.body.center_x() {
        p1.facing = Facing::Right;
        p2.facing = Facing::Left;
    } else {
        p1.facing = Facing::Left;
        p2.facing = Facing::Right;
    }
}
