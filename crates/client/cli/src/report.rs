//! Final match report rendering.

use std::fmt::Write as _;

use fight_core::{FighterView, Phase};

use crate::config::OutputFormat;
use crate::session::SessionSummary;

pub fn render(summary: &SessionSummary, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
        OutputFormat::Text => Ok(render_text(summary)),
    }
}

fn render_text(summary: &SessionSummary) -> String {
    let view = &summary.view;
    let mut out = String::new();

    let headline = match view.phase {
        Phase::MatchOver { winner } => format!("match over: {winner} wins the match"),
        Phase::RoundOver { outcome } => format!("round {} over: {outcome}", view.round),
        phase => format!("stopped while {phase}"),
    };
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{headline}");
    let _ = writeln!(
        out,
        "round {} | first to {} | timer {}s ({}f) | {} ticks",
        view.round, view.rounds_to_win, view.timer_seconds, view.timer_frames, summary.ticks
    );
    for fighter in &view.fighters {
        let _ = writeln!(out, "{}", fighter_line(fighter));
    }
    let _ = writeln!(
        out,
        "hits {} | blocked {} | knockouts {}",
        summary.hits, summary.blocks, summary.knockouts
    );
    for record in &summary.rounds {
        let _ = writeln!(
            out,
            "  round {}: {} (frame {})",
            record.round, record.outcome, record.frame
        );
    }
    out
}

fn fighter_line(fighter: &FighterView) -> String {
    format!(
        "{} | hp {:>3}/{} | stamina {:>5.1}/{} | {} | rounds won {}",
        fighter.side,
        fighter.health,
        fighter.max_health,
        fighter.stamina,
        fighter.max_stamina,
        fighter.state,
        fighter.rounds_won
    )
}
