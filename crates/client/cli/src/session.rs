//! Headless fixed-tick driver.
//!
//! Stands in for the real-time scheduler and controllers: feeds scripted
//! intents into [`Match::step`] one tick at a time and records what happened.

use fight_content::InputScript;
use fight_core::{HitKind, Match, MatchView, Phase, RoundAdvance, RoundOutcome, Side};
use serde::Serialize;

/// How one round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RoundRecord {
    pub round: u32,
    pub outcome: RoundOutcome,
    /// Match frame on which the round was decided.
    pub frame: u64,
}

/// Totals for a finished run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSummary {
    pub ticks: u64,
    pub hits: u32,
    pub blocks: u32,
    pub knockouts: u32,
    pub rounds: Vec<RoundRecord>,
    pub winner: Option<Side>,
    pub view: MatchView,
}

/// Limits for a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionLimits {
    pub max_ticks: u64,
    pub full_match: bool,
}

/// Plays `script` into an already started match until the round (or, with
/// `full_match`, the match) is decided or the tick limit is reached.
pub fn run(game: &mut Match, script: &InputScript, limits: SessionLimits) -> SessionSummary {
    let mut ticks = 0;
    let mut hits = 0;
    let mut blocks = 0;
    let mut knockouts = 0;
    let mut rounds = Vec::new();
    let mut winner = None;

    let mut frames = script.frames();
    while ticks < limits.max_ticks {
        let Some(inputs) = frames.next() else {
            break;
        };
        let report = game.step(inputs);
        ticks += 1;

        for event in &report.events {
            match event.kind {
                HitKind::Hit => hits += 1,
                HitKind::Blocked => blocks += 1,
            }
            knockouts += u32::from(event.knockout);
            tracing::info!(
                tick = ticks,
                attacker = %event.attacker,
                attack = %event.attack,
                kind = %event.kind,
                damage = event.damage,
                "contact"
            );
        }

        if let Some(outcome) = report.outcome {
            tracing::info!(round = game.round(), %outcome, tick = ticks, "round over");
            rounds.push(RoundRecord {
                round: game.round(),
                outcome,
                frame: game.frame(),
            });
        }

        match game.phase() {
            Phase::Playing => {}
            Phase::RoundOver { .. } if limits.full_match => match game.advance_round() {
                Ok(RoundAdvance::NextRound { round }) => {
                    tracing::info!(round, "next round");
                }
                Ok(RoundAdvance::MatchDecided { winner: side }) => {
                    winner = Some(side);
                    break;
                }
                Err(err) => {
                    tracing::warn!(%err, "could not advance round");
                    break;
                }
            },
            Phase::MatchOver { winner: side } => {
                tracing::info!(winner = %side, "match over");
                winner = Some(side);
                break;
            }
            _ => break,
        }
    }

    SessionSummary {
        ticks,
        hits,
        blocks,
        knockouts,
        rounds,
        winner,
        view: game.view(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> Match {
        let mut game = Match::standard();
        game.start_match().unwrap();
        game
    }

    #[test]
    fn idle_round_runs_to_time() {
        let mut game = started();
        let round_ticks = u64::from(game.config().round.round_ticks());
        let summary = run(
            &mut game,
            &InputScript::idle(),
            SessionLimits {
                max_ticks: round_ticks * 4,
                full_match: false,
            },
        );

        assert_eq!(summary.ticks, round_ticks);
        assert_eq!(summary.hits, 0);
        assert_eq!(summary.rounds.len(), 1);
        assert_eq!(summary.rounds[0].outcome, RoundOutcome::Draw);
        assert_eq!(summary.winner, None);
    }

    #[test]
    fn tick_limit_stops_early() {
        let mut game = started();
        let summary = run(
            &mut game,
            &InputScript::idle(),
            SessionLimits {
                max_ticks: 10,
                full_match: false,
            },
        );
        assert_eq!(summary.ticks, 10);
        assert!(summary.rounds.is_empty());
        assert_eq!(summary.view.phase, Phase::Playing);
    }

    #[test]
    fn full_match_is_decided_by_the_demo() {
        let mut game = started();
        let script = InputScript::demo().unwrap();
        let summary = run(
            &mut game,
            &script,
            SessionLimits {
                max_ticks: 100_000,
                full_match: true,
            },
        );

        assert_eq!(summary.winner, Some(Side::P1));
        assert_eq!(summary.ticks, 1809);
        assert_eq!(summary.hits, 30);
        assert_eq!(summary.blocks, 1);
        let outcomes: Vec<_> = summary.rounds.iter().map(|r| (r.round, r.outcome)).collect();
        assert_eq!(
            outcomes,
            [
                (1, RoundOutcome::Winner(Side::P1)),
                (2, RoundOutcome::Winner(Side::P1)),
            ]
        );
        assert_eq!(summary.rounds[0].frame, 531);
        assert_eq!(summary.rounds[1].frame, 1809);
        assert_eq!(summary.view.phase, Phase::MatchOver { winner: Side::P1 });
    }

    #[test]
    fn idle_full_match_never_ends_in_a_winner() {
        // Every idle round is a timeout draw, so the match only stops at the limit.
        let mut game = started();
        let round_ticks = u64::from(game.config().round.round_ticks());
        let summary = run(
            &mut game,
            &InputScript::idle(),
            SessionLimits {
                max_ticks: round_ticks * 3,
                full_match: true,
            },
        );
        assert_eq!(summary.ticks, round_ticks * 3);
        assert_eq!(summary.rounds.len(), 3);
        assert_eq!(summary.winner, None);
        assert_eq!(summary.view.round, 4);
    }
}
