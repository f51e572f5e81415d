//! Static frame-data registry.
//!
//! Every attack is described by a [`Move`]: how many frames it spends winding
//! up, how long its hitbox is live, how long the attacker stays committed
//! afterwards, and what a connecting hit does. The table is built once and
//! never mutated.
//!
//! Moves are addressed by [`MoveKind`], a closed enum, so the state machine
//! cannot ask for frame data that does not exist. [`MoveTable::by_name`]
//! looks a move up by its table name and rejects unknown names.

use core::str::FromStr;

use crate::error::{ErrorSeverity, GameError};
use crate::geometry::Rect;
use crate::side::Facing;

/// Every attack a fighter can perform.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveKind {
    #[strum(serialize = "light")]
    #[cfg_attr(feature = "serde", serde(rename = "light"))]
    Light,
    #[strum(serialize = "heavy")]
    #[cfg_attr(feature = "serde", serde(rename = "heavy"))]
    Heavy,
    /// The single aerial normal, performed with either attack button.
    #[strum(serialize = "j_light")]
    #[cfg_attr(feature = "serde", serde(rename = "j_light"))]
    JumpLight,
    /// Low-hitting crouching light.
    #[strum(serialize = "c_light")]
    #[cfg_attr(feature = "serde", serde(rename = "c_light"))]
    CrouchLight,
}

impl MoveKind {
    pub const COUNT: usize = 4;

    #[inline]
    const fn index(self) -> usize {
        match self {
            MoveKind::Light => 0,
            MoveKind::Heavy => 1,
            MoveKind::JumpLight => 2,
            MoveKind::CrouchLight => 3,
        }
    }
}

/// Which part of a move a given in-move frame falls in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MovePhase {
    /// Winding up; no hitbox.
    Startup,
    /// Hitbox is live.
    Active,
    /// Committed but harmless.
    Recovery,
    /// Past the last recovery frame; the fighter regains control.
    Finished,
}

/// Vertical placement of a hitbox relative to the attacker's body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitboxAnchor {
    /// Centered on the body's vertical midpoint.
    Centered,
    /// Bottom edge sits `lift` pixels above the attacker's feet.
    Low { lift: i32 },
}

/// Size and placement of the box a move produces during its active frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitboxSpec {
    pub width: i32,
    pub height: i32,
    pub anchor: HitboxAnchor,
}

impl HitboxSpec {
    pub const fn centered(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            anchor: HitboxAnchor::Centered,
        }
    }

    pub const fn low(width: i32, height: i32, lift: i32) -> Self {
        Self {
            width,
            height,
            anchor: HitboxAnchor::Low { lift },
        }
    }

    /// Places the hitbox against the side of `body` the attacker faces.
    pub fn place(&self, body: &Rect, facing: Facing) -> Rect {
        let y = match self.anchor {
            HitboxAnchor::Centered => body.center_y() - self.height / 2,
            HitboxAnchor::Low { lift } => body.bottom() - self.height - lift,
        };
        let x = match facing {
            Facing::Right => body.right(),
            Facing::Left => body.left() - self.width,
        };
        Rect::new(x, y, self.width, self.height)
    }
}

/// Frame data and on-hit properties of a single attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub startup: u32,
    pub active: u32,
    pub recovery: u32,
    pub damage: u32,
    /// Horizontal push on an unblocked hit, in pixels.
    pub knockback: i32,
    /// Requested freeze on contact; capped by `HitConfig::hitstop_max`.
    pub hitstop: u32,
    pub hitbox: HitboxSpec,
}

impl Move {
    /// Total frames from the first startup frame to the end of recovery.
    pub const fn total_frames(&self) -> u32 {
        self.startup + self.active + self.recovery
    }

    /// Classifies an in-move frame counter against the cumulative phase boundaries.
    pub const fn phase_at(&self, frame: u32) -> MovePhase {
        if frame < self.startup {
            MovePhase::Startup
        } else if frame < self.startup + self.active {
            MovePhase::Active
        } else if frame < self.total_frames() {
            MovePhase::Recovery
        } else {
            MovePhase::Finished
        }
    }
}

/// Immutable registry of every move's frame data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveTable {
    moves: [Move; MoveKind::COUNT],
}

impl MoveTable {
    /// The shipped moveset.
    pub const fn standard() -> Self {
        const STANDARD_BOX: HitboxSpec = HitboxSpec::centered(36, 24);

        let mut moves = [Move {
            startup: 0,
            active: 0,
            recovery: 0,
            damage: 0,
            knockback: 0,
            hitstop: 0,
            hitbox: STANDARD_BOX,
        }; MoveKind::COUNT];

        moves[MoveKind::Light.index()] = Move {
            startup: 5,
            active: 6,
            recovery: 10,
            damage: 7,
            knockback: 10,
            hitstop: 6,
            hitbox: STANDARD_BOX,
        };
        moves[MoveKind::Heavy.index()] = Move {
            startup: 9,
            active: 6,
            recovery: 18,
            damage: 14,
            knockback: 18,
            hitstop: 9,
            hitbox: STANDARD_BOX,
        };
        moves[MoveKind::JumpLight.index()] = Move {
            startup: 4,
            active: 8,
            recovery: 8,
            damage: 6,
            knockback: 8,
            hitstop: 6,
            hitbox: STANDARD_BOX,
        };
        moves[MoveKind::CrouchLight.index()] = Move {
            startup: 6,
            active: 6,
            recovery: 12,
            damage: 8,
            knockback: 10,
            hitstop: 6,
            hitbox: HitboxSpec::low(36, 18, 10),
        };

        Self { moves }
    }

    #[inline]
    pub const fn get(&self, kind: MoveKind) -> &Move {
        &self.moves[kind.index()]
    }

    /// Resolves a move by its table name (`"light"`, `"c_light"`, ...).
    pub fn by_name(&self, name: &str) -> Result<(MoveKind, &Move), MoveError> {
        let kind = MoveKind::from_str(name).map_err(|_| MoveError::UnknownMove {
            name: name.to_owned(),
        })?;
        Ok((kind, self.get(kind)))
    }
}

impl Default for MoveTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Errors raised when a move is addressed by name from outside the core.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("unknown move '{name}'")]
    UnknownMove { name: String },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownMove { .. } => "MOVE_UNKNOWN",
        }
    }
}
