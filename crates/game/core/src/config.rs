//! Combat configuration and tunable parameters.
//!
//! [`CombatConfig`] is built once and handed to [`crate::Match::new`]; the
//! simulation never reads tunables from anywhere else. Every section has a
//! `Default` matching the shipped balance, and with the `serde` feature every
//! field falls back to that default so partial config files load cleanly.

use crate::error::{ErrorSeverity, GameError};

/// Stage geometry in pixels. `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StageConfig {
    pub width: i32,
    /// Y coordinate of the ground line; a grounded body's bottom sits here.
    pub ground_y: i32,
    pub spawn_left_x: i32,
    pub spawn_right_x: i32,
}

impl StageConfig {
    pub const DEFAULT_WIDTH: i32 = 960;
    pub const DEFAULT_GROUND_Y: i32 = 540 - 80;
    pub const DEFAULT_SPAWN_LEFT_X: i32 = 200;
    pub const DEFAULT_SPAWN_RIGHT_X: i32 = Self::DEFAULT_WIDTH - 260;
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            ground_y: Self::DEFAULT_GROUND_Y,
            spawn_left_x: Self::DEFAULT_SPAWN_LEFT_X,
            spawn_right_x: Self::DEFAULT_SPAWN_RIGHT_X,
        }
    }
}

/// Body dimensions and resource pools shared by both fighters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FighterConfig {
    pub body_width: i32,
    pub body_height: i32,
    pub max_health: u32,
    pub max_stamina: f32,
    /// Stamina gained per tick while not dashing.
    pub stamina_regen: f32,
}

impl Default for FighterConfig {
    fn default() -> Self {
        Self {
            body_width: 64,
            body_height: 96,
            max_health: 100,
            max_stamina: 100.0,
            stamina_regen: 0.5,
        }
    }
}

/// Locomotion tunables, all expressed per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovementConfig {
    pub gravity: f32,
    pub ground_speed: i32,
    pub air_speed: i32,
    /// Vertical velocity applied on jump (negative is upward).
    pub jump_velocity: f32,
    pub dash_speed: i32,
    pub dash_cost: f32,
    pub dash_duration: u32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            gravity: 1.2,
            ground_speed: 6,
            air_speed: 4,
            jump_velocity: -18.0,
            dash_speed: 11,
            dash_cost: 30.0,
            dash_duration: 12,
        }
    }
}

/// Hit and block outcome tunables.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HitConfig {
    /// Fraction of move damage that goes through a successful block.
    pub chip_ratio: f32,
    pub blockstun: u32,
    pub block_pushback: i32,
    pub hitstun_light: u32,
    pub hitstun_heavy: u32,
    /// Grounded hits at or above this damage use `hitstun_heavy`.
    pub heavy_damage_threshold: u32,
    /// Hitstun for any hit landed on an airborne victim, regardless of damage.
    pub juggle_hitstun: u32,
    /// Vertical velocity given to an airborne victim on hit (negative is upward).
    pub juggle_velocity: f32,
    pub hitstop_max: u32,
}

impl Default for HitConfig {
    fn default() -> Self {
        Self {
            chip_ratio: 0.1,
            blockstun: 12,
            block_pushback: 6,
            hitstun_light: 14,
            hitstun_heavy: 20,
            heavy_damage_threshold: 12,
            juggle_hitstun: 18,
            juggle_velocity: -8.0,
            hitstop_max: 12,
        }
    }
}

/// Round clock and match length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoundConfig {
    /// Logical simulation steps per second.
    pub ticks_per_second: u32,
    pub round_seconds: u32,
    pub rounds_to_win: u32,
}

impl RoundConfig {
    /// Round length expressed in ticks.
    pub const fn round_ticks(&self) -> u32 {
        self.round_seconds.saturating_mul(self.ticks_per_second)
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: 60,
            round_seconds: 60,
            rounds_to_win: 2,
        }
    }
}

/// Complete, immutable configuration for one match.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    pub stage: StageConfig,
    pub fighter: FighterConfig,
    pub movement: MovementConfig,
    pub hit: HitConfig,
    pub round: RoundConfig,
}

impl CombatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks the invariants the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fighter = &self.fighter;
        let stage = &self.stage;

        if self.round.rounds_to_win == 0 {
            return Err(ConfigError::ZeroRoundsToWin);
        }
        if self.round.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if fighter.max_health == 0 {
            return Err(ConfigError::ZeroMaxHealth);
        }
        if fighter.body_width <= 0 || fighter.body_height <= 0 {
            return Err(ConfigError::EmptyBody {
                width: fighter.body_width,
                height: fighter.body_height,
            });
        }
        if stage.width < fighter.body_width {
            return Err(ConfigError::StageTooNarrow {
                stage_width: stage.width,
                body_width: fighter.body_width,
            });
        }
        if stage.ground_y < fighter.body_height {
            return Err(ConfigError::GroundTooHigh {
                ground_y: stage.ground_y,
                body_height: fighter.body_height,
            });
        }
        let max_x = stage.width - fighter.body_width;
        for (field, x) in [
            ("stage.spawn_left_x", stage.spawn_left_x),
            ("stage.spawn_right_x", stage.spawn_right_x),
        ] {
            if !(0..=max_x).contains(&x) {
                return Err(ConfigError::SpawnOffStage { field, x, max_x });
            }
        }

        let velocities = [
            ("movement.jump_velocity", self.movement.jump_velocity),
            ("hit.juggle_velocity", self.hit.juggle_velocity),
        ];
        for (field, value) in velocities {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteVelocity { field, value });
            }
        }

        let rates = [
            ("fighter.max_stamina", fighter.max_stamina),
            ("fighter.stamina_regen", fighter.stamina_regen),
            ("movement.gravity", self.movement.gravity),
            ("movement.dash_cost", self.movement.dash_cost),
            ("hit.chip_ratio", self.hit.chip_ratio),
        ];
        for (field, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidRate { field, value });
            }
        }
        if self.hit.chip_ratio > 1.0 {
            return Err(ConfigError::InvalidRate {
                field: "hit.chip_ratio",
                value: self.hit.chip_ratio,
            });
        }
        if self.movement.dash_cost > fighter.max_stamina {
            return Err(ConfigError::DashUnaffordable {
                dash_cost: self.movement.dash_cost,
                max_stamina: fighter.max_stamina,
            });
        }

        Ok(())
    }
}

/// Rejections produced by [`CombatConfig::validate`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("round.rounds_to_win must be at least 1")]
    ZeroRoundsToWin,

    #[error("round.ticks_per_second must be at least 1")]
    ZeroTickRate,

    #[error("fighter.max_health must be at least 1")]
    ZeroMaxHealth,

    #[error("fighter body must have a positive size (got {width}x{height})")]
    EmptyBody { width: i32, height: i32 },

    #[error("stage width {stage_width} cannot fit a body of width {body_width}")]
    StageTooNarrow { stage_width: i32, body_width: i32 },

    #[error("ground line {ground_y} is above the top of a standing body of height {body_height}")]
    GroundTooHigh { ground_y: i32, body_height: i32 },

    #[error("{field} {x} puts the body off stage (allowed 0..={max_x})")]
    SpawnOffStage {
        field: &'static str,
        x: i32,
        max_x: i32,
    },

    #[error("{field} must be finite (got {value})")]
    NonFiniteVelocity { field: &'static str, value: f32 },

    #[error("{field} must be a finite, non-negative number within range (got {value})")]
    InvalidRate { field: &'static str, value: f32 },

    #[error("movement.dash_cost {dash_cost} exceeds fighter.max_stamina {max_stamina}")]
    DashUnaffordable { dash_cost: f32, max_stamina: f32 },
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroRoundsToWin => "CONFIG_ZERO_ROUNDS_TO_WIN",
            Self::ZeroTickRate => "CONFIG_ZERO_TICK_RATE",
            Self::ZeroMaxHealth => "CONFIG_ZERO_MAX_HEALTH",
            Self::EmptyBody { .. } => "CONFIG_EMPTY_BODY",
            Self::StageTooNarrow { .. } => "CONFIG_STAGE_TOO_NARROW",
            Self::GroundTooHigh { .. } => "CONFIG_GROUND_TOO_HIGH",
            Self::SpawnOffStage { .. } => "CONFIG_SPAWN_OFF_STAGE",
            Self::NonFiniteVelocity { .. } => "CONFIG_NON_FINITE_VELOCITY",
            Self::InvalidRate { .. } => "CONFIG_INVALID_RATE",
            Self::DashUnaffordable { .. } => "CONFIG_DASH_UNAFFORDABLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CombatConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.round.round_ticks(), 3600);
        assert_eq!(config.stage.ground_y, 460);
        assert_eq!(config.stage.spawn_right_x, 700);
    }

    #[test]
    fn zero_rounds_to_win_is_rejected() {
        let mut config = CombatConfig::default();
        config.round.rounds_to_win = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroRoundsToWin));
    }

    #[test]
    fn chip_ratio_above_one_is_rejected() {
        let mut config = CombatConfig::default();
        config.hit.chip_ratio = 1.5;
        let err = config.validate().unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_INVALID_RATE");
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn nan_gravity_is_rejected() {
        let mut config = CombatConfig::default();
        config.movement.gravity = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRate {
                field: "movement.gravity",
                ..
            })
        ));
    }

    #[test]
    fn stage_must_fit_a_body() {
        let mut config = CombatConfig::default();
        config.stage.width = 10;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StageTooNarrow { .. })
        ));
    }

    #[test]
    fn spawn_must_keep_the_body_on_stage() {
        let mut config = CombatConfig::default();
        config.stage.spawn_right_x = 900;
        assert_eq!(
            config.validate(),
            Err(ConfigError::SpawnOffStage {
                field: "stage.spawn_right_x",
                x: 900,
                max_x: 896,
            })
        );

        config.stage.spawn_right_x = 896;
        assert_eq!(config.validate(), Ok(()));

        config.stage.spawn_left_x = -1;
        let err = config.validate().unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_SPAWN_OFF_STAGE");
    }

    #[test]
    fn velocities_must_be_finite() {
        let mut config = CombatConfig::default();
        config.movement.jump_velocity = f32::NEG_INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteVelocity {
                field: "movement.jump_velocity",
                ..
            })
        ));

        let mut config = CombatConfig::default();
        config.hit.juggle_velocity = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteVelocity {
                field: "hit.juggle_velocity",
                ..
            })
        ));
    }

    #[test]
    fn dash_cost_above_max_stamina_is_rejected() {
        let mut config = CombatConfig::default();
        config.movement.dash_cost = 150.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DashUnaffordable { .. })
        ));
    }
}
