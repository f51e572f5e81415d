//! Scripted input timeline loader.
//!
//! A script stands in for live controllers: a list of segments, each holding
//! both players' intents for a number of ticks. Intents are written as token
//! lists understood by [`InputIntents::parse`].
//!
//! ```ron
//! (
//!     segments: [
//!         (ticks: 30, p1: "right", p2: "left"),
//!         (ticks: 1, p1: "light", p2: "block"),
//!     ],
//! )
//! ```
//!
//! Once exhausted, a script keeps repeating its last segment.

use std::path::Path;

use fight_core::InputIntents;
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Script structure for RON files.
#[derive(Debug, Clone, Deserialize)]
struct ScriptRon {
    segments: Vec<SegmentRon>,
}

#[derive(Debug, Clone, Deserialize)]
struct SegmentRon {
    ticks: u32,
    #[serde(default)]
    p1: String,
    #[serde(default)]
    p2: String,
}

/// Both players' intents held for a run of ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScriptSegment {
    pub ticks: u32,
    pub inputs: [InputIntents; 2],
}

/// A parsed input timeline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputScript {
    segments: Vec<ScriptSegment>,
}

impl InputScript {
    /// A script in which nobody touches the controls.
    pub fn idle() -> Self {
        Self::default()
    }

    /// The demo fight shipped with the crate.
    pub fn demo() -> LoadResult<Self> {
        Self::parse(include_str!("../../data/scripts/demo.ron"))
    }

    /// Parse a script from RON text.
    pub fn parse(content: &str) -> LoadResult<Self> {
        let data: ScriptRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse script RON: {}", e))?;

        let segments = data
            .segments
            .into_iter()
            .enumerate()
            .map(|(index, segment)| {
                if segment.ticks == 0 {
                    anyhow::bail!("Script segment {} lasts zero ticks", index);
                }
                let p1 = InputIntents::parse(&segment.p1)
                    .map_err(|e| anyhow::anyhow!("Script segment {} (p1): {}", index, e))?;
                let p2 = InputIntents::parse(&segment.p2)
                    .map_err(|e| anyhow::anyhow!("Script segment {} (p2): {}", index, e))?;
                Ok(ScriptSegment {
                    ticks: segment.ticks,
                    inputs: [p1, p2],
                })
            })
            .collect::<LoadResult<Vec<_>>>()?;

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[ScriptSegment] {
        &self.segments
    }

    /// Ticks covered before the last segment starts repeating.
    pub fn scripted_ticks(&self) -> u64 {
        self.segments.iter().map(|s| u64::from(s.ticks)).sum()
    }

    /// Intents for the given 0-based tick.
    pub fn inputs_at(&self, tick: u64) -> [InputIntents; 2] {
        let mut start = 0u64;
        for segment in &self.segments {
            let end = start + u64::from(segment.ticks);
            if tick < end {
                return segment.inputs;
            }
            start = end;
        }
        self.segments
            .last()
            .map(|segment| segment.inputs)
            .unwrap_or([InputIntents::empty(); 2])
    }

    /// Endless per-tick intents, starting at tick zero.
    pub fn frames(&self) -> impl Iterator<Item = [InputIntents; 2]> + '_ {
        let tail = self
            .segments
            .last()
            .map(|segment| segment.inputs)
            .unwrap_or([InputIntents::empty(); 2]);

        self.segments
            .iter()
            .flat_map(|segment| core::iter::repeat_n(segment.inputs, segment.ticks as usize))
            .chain(core::iter::repeat(tail))
    }
}

/// Loader for input scripts from RON files.
pub struct ScriptLoader;

impl ScriptLoader {
    pub fn load(path: &Path) -> LoadResult<InputScript> {
        let content = read_file(path)?;
        InputScript::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid script {}: {}", path.display(), e))
    }
}
