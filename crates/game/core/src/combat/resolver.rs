//! Hit and block resolution.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::fighter::{Fighter, FighterState};
use crate::moves::{MoveKind, MoveTable};
use crate::side::{Facing, Side};

/// How a connecting attack was received.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum HitKind {
    Hit,
    Blocked,
}

/// One resolved contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitEvent {
    pub attacker: Side,
    pub victim: Side,
    pub attack: MoveKind,
    pub kind: HitKind,
    /// Health actually removed from the victim.
    pub damage: u32,
    /// Victim's health reached zero on this contact.
    pub knockout: bool,
}

/// Contacts resolved in one tick; at most one per direction.
pub type HitEvents = ArrayVec<HitEvent, 2>;

/// Contact detected against the pre-resolution state of both fighters.
#[derive(Clone, Copy, Debug)]
struct Strike {
    attacker: Side,
    attack: MoveKind,
    blocked: bool,
    /// Direction that pushes the victim away from the attacker.
    push: Facing,
}

/// Whether `victim` blocks an attack from `attacker` right now.
///
/// Requires the Block state, being grounded, facing the attacker and not
/// already being in guard stun.
pub fn is_blocking(victim: &Fighter, attacker: &Fighter) -> bool {
    victim.state == FighterState::Block
        && victim.grounded
        && victim.facing == attacker.facing.opposite()
        && !victim.guard_stun.is_active()
}

/// Damage that goes through a successful block, rounded down.
pub fn chip_damage(damage: u32, config: &CombatConfig) -> u32 {
    (damage as f32 * config.hit.chip_ratio).floor() as u32
}

/// Detects and applies every hitbox contact for this tick.
///
/// Both directions are detected before either is applied, so a trade where
/// both fighters connect on the same tick resolves both hits (a double
/// knockout is left for the round controller to judge). Each connecting swing
/// has its hitbox consumed so it can land at most once.
pub fn resolve_hits(
    fighters: &mut [Fighter; 2],
    moves: &MoveTable,
    config: &CombatConfig,
) -> HitEvents {
    let snapshot: &[Fighter; 2] = fighters;
    let strikes: ArrayVec<Strike, 2> = Side::BOTH
        .into_iter()
        .filter_map(|attacker| detect(snapshot, attacker))
        .collect();

    strikes
        .into_iter()
        .map(|strike| apply(fighters, strike, moves, config))
        .collect()
}

fn detect(fighters: &[Fighter; 2], attacker_side: Side) -> Option<Strike> {
    let attacker = &fighters[attacker_side.index()];
    let victim = &fighters[attacker_side.opponent().index()];

    let hitbox = attacker.hitbox?;
    let attack = attacker.attack()?;
    if !hitbox.intersects(&victim.body) {
        return None;
    }

    Some(Strike {
        attacker: attacker_side,
        attack,
        blocked: is_blocking(victim, attacker),
        push: attacker.facing,
    })
}

fn apply(
    fighters: &mut [Fighter; 2],
    strike: Strike,
    moves: &MoveTable,
    config: &CombatConfig,
) -> HitEvent {
    let [p1, p2] = fighters;
    let (attacker, victim) = match strike.attacker {
        Side::P1 => (p1, p2),
        Side::P2 => (p2, p1),
    };
    let data = moves.get(strike.attack);

    let health_before = victim.health;
    let kind = if strike.blocked {
        victim.receive_block(chip_damage(data.damage, config), strike.push, config);
        HitKind::Blocked
    } else {
        victim.receive_hit(data.damage, data.knockback, strike.push, config);
        HitKind::Hit
    };

    victim.enter_hitstop(data.hitstop, config);
    attacker.enter_hitstop(data.hitstop, config);
    attacker.consume_hitbox();

    let event = HitEvent {
        attacker: strike.attacker,
        victim: victim.side,
        attack: strike.attack,
        kind,
        damage: health_before - victim.health,
        knockout: victim.health == 0,
    };

    tracing::debug!(
        attacker = %event.attacker,
        victim = %event.victim,
        attack = %event.attack,
        kind = %event.kind,
        damage = event.damage,
        health = victim.health,
        knockout = event.knockout,
        "contact resolved"
    );

    event
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fighter::Swing;
    use crate::geometry::Rect;

    fn arena() -> ([Fighter; 2], MoveTable, CombatConfig) {
        let config = CombatConfig::default();
        let fighters = [
            Fighter::new(Side::P1, &config),
            Fighter::new(Side::P2, &config),
        ];
        (fighters, MoveTable::standard(), config)
    }

    /// Puts `attacker` mid-swing with a live hitbox overlapping its opponent.
    fn arm(fighters: &mut [Fighter; 2], attacker: Side, kind: MoveKind, moves: &MoveTable) {
        let victim_body = fighters[attacker.opponent().index()].body;
        let fighter = &mut fighters[attacker.index()];
        fighter.state = FighterState::Attack;
        fighter.swing = Some(Swing {
            kind,
            frame: moves.get(kind).startup,
            connected: false,
        });
        fighter.hitbox = Some(Rect::new(
            victim_body.x,
            victim_body.center_y() - 12,
            36,
            24,
        ));
    }

    fn close_in(fighters: &mut [Fighter; 2]) {
        fighters[0].body.x = 400;
        fighters[1].body.x = 470;
        fighters[0].facing = Facing::Right;
        fighters[1].facing = Facing::Left;
    }

    #[test]
    fn unblocked_heavy_deals_full_damage() {
        let (mut fighters, moves, config) = arena();
        close_in(&mut fighters);
        arm(&mut fighters, Side::P1, MoveKind::Heavy, &moves);

        let events = resolve_hits(&mut fighters, &moves, &config);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, HitKind::Hit);
        assert_eq!(events[0].damage, 14);

        let victim = &fighters[1];
        assert_eq!(victim.health, 86);
        assert_eq!(victim.state, FighterState::Hitstun);
        assert_eq!(victim.hitstun.remaining(), config.hit.hitstun_heavy);
        assert_eq!(victim.body.x, 470 + 18);
        assert_eq!(victim.hitstop.remaining(), 9);
        assert_eq!(fighters[0].hitstop.remaining(), 9);
        assert_eq!(fighters[0].hitbox, None);
    }

    #[test]
    fn blocked_light_only_chips() {
        let (mut fighters, moves, config) = arena();
        close_in(&mut fighters);
        fighters[1].state = FighterState::Block;
        arm(&mut fighters, Side::P1, MoveKind::Light, &moves);

        let events = resolve_hits(&mut fighters, &moves, &config);
        assert_eq!(events[0].kind, HitKind::Blocked);
        assert_eq!(events[0].damage, 0);

        let victim = &fighters[1];
        assert_eq!(victim.health, 100);
        assert_eq!(victim.guard_stun.remaining(), config.hit.blockstun);
        assert!(!victim.hitstun.is_active());
        assert_eq!(victim.state, FighterState::Block);
        assert_eq!(victim.body.x, 470 + config.hit.block_pushback);
        assert_eq!(victim.hitstop.remaining(), 6);
    }

    #[test]
    fn blocked_heavy_chips_one() {
        let (mut fighters, moves, config) = arena();
        close_in(&mut fighters);
        fighters[1].state = FighterState::Block;
        arm(&mut fighters, Side::P1, MoveKind::Heavy, &moves);

        resolve_hits(&mut fighters, &moves, &config);
        assert_eq!(fighters[1].health, 99);
    }

    #[test]
    fn block_facing_away_is_not_a_block() {
        let (mut fighters, moves, config) = arena();
        close_in(&mut fighters);
        fighters[1].state = FighterState::Block;
        fighters[1].facing = Facing::Right;
        arm(&mut fighters, Side::P1, MoveKind::Light, &moves);

        let events = resolve_hits(&mut fighters, &moves, &config);
        assert_eq!(events[0].kind, HitKind::Hit);
        assert_eq!(fighters[1].health, 93);
    }

    #[test]
    fn guard_stunned_blocker_is_hit() {
        let (mut fighters, moves, config) = arena();
        close_in(&mut fighters);
        fighters[1].state = FighterState::Block;
        fighters[1].guard_stun.set(4);
        arm(&mut fighters, Side::P1, MoveKind::Light, &moves);

        let events = resolve_hits(&mut fighters, &moves, &config);
        assert_eq!(events[0].kind, HitKind::Hit);
        assert_eq!(fighters[1].state, FighterState::Hitstun);
        assert!(!fighters[1].guard_stun.is_active());
    }

    #[test]
    fn swing_connects_only_once() {
        let (mut fighters, moves, config) = arena();
        close_in(&mut fighters);
        arm(&mut fighters, Side::P1, MoveKind::Light, &moves);

        assert_eq!(resolve_hits(&mut fighters, &moves, &config).len(), 1);
        assert!(resolve_hits(&mut fighters, &moves, &config).is_empty());
        assert!(fighters[0].swing.unwrap().connected);
        assert_eq!(fighters[1].health, 93);
    }

    #[test]
    fn no_contact_without_overlap() {
        let (mut fighters, moves, config) = arena();
        arm(&mut fighters, Side::P1, MoveKind::Light, &moves);
        fighters[0].hitbox = Some(Rect::new(0, 0, 10, 10));

        assert!(resolve_hits(&mut fighters, &moves, &config).is_empty());
        assert_eq!(fighters[1].health, 100);
    }

    #[test]
    fn trade_resolves_both_directions() {
        let (mut fighters, moves, config) = arena();
        close_in(&mut fighters);
        fighters[0].health = 5;
        fighters[1].health = 5;
        arm(&mut fighters, Side::P1, MoveKind::Light, &moves);
        arm(&mut fighters, Side::P2, MoveKind::Heavy, &moves);

        let events = resolve_hits(&mut fighters, &moves, &config);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].attacker, Side::P1);
        assert_eq!(events[1].attacker, Side::P2);
        assert!(events.iter().all(|event| event.knockout));
        assert_eq!(fighters[0].state, FighterState::KnockedDown);
        assert_eq!(fighters[1].state, FighterState::KnockedDown);
    }

    #[test]
    fn chip_rounds_down() {
        let config = CombatConfig::default();
        assert_eq!(chip_damage(7, &config), 0);
        assert_eq!(chip_damage(14, &config), 1);
        assert_eq!(chip_damage(20, &config), 2);
    }
}
