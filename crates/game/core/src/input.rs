//! Logical input intents.
//!
//! The core never sees devices. Once per tick an outside sampler hands each
//! fighter an [`InputIntents`] set describing which actions are held.

use bitflags::bitflags;

use crate::error::{ErrorSeverity, GameError};

bitflags! {
    /// Held actions for one fighter during one tick.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct InputIntents: u8 {
        const LEFT  = 1 << 0;
        const RIGHT = 1 << 1;
        const UP    = 1 << 2;
        const DOWN  = 1 << 3;
        const LIGHT = 1 << 4;
        const HEAVY = 1 << 5;
        const BLOCK = 1 << 6;
        const DASH  = 1 << 7;
    }
}

impl InputIntents {
    /// Parses a token list such as `"left|light"` or `"down, block"`.
    ///
    /// Tokens are case-insensitive and may be separated by `|`, `,` or
    /// whitespace. An empty string means no input.
    pub fn parse(text: &str) -> Result<Self, InputParseError> {
        text.split(|c: char| c == '|' || c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .try_fold(Self::empty(), |acc, token| {
                let flag = Self::from_name(&token.to_ascii_uppercase()).ok_or_else(|| {
                    InputParseError::UnknownIntent {
                        token: token.to_owned(),
                    }
                })?;
                Ok(acc | flag)
            })
    }

    /// Horizontal direction held this tick: `-1`, `0` or `+1`.
    ///
    /// Holding both directions cancels out.
    pub fn horizontal(self) -> i32 {
        let left = i32::from(self.contains(Self::LEFT));
        let right = i32::from(self.contains(Self::RIGHT));
        right - left
    }

    /// True if either attack button is held.
    pub fn any_attack(self) -> bool {
        self.intersects(Self::LIGHT | Self::HEAVY)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputParseError {
    #[error("unknown input intent '{token}'")]
    UnknownIntent { token: String },
}

impl GameError for InputParseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "INPUT_UNKNOWN_INTENT"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_token_lists() {
        assert_eq!(
            InputIntents::parse("left|light").unwrap(),
            InputIntents::LEFT | InputIntents::LIGHT
        );
        assert_eq!(
            InputIntents::parse(" Down, BLOCK ").unwrap(),
            InputIntents::DOWN | InputIntents::BLOCK
        );
        assert_eq!(InputIntents::parse("").unwrap(), InputIntents::empty());
    }

    #[test]
    fn rejects_unknown_tokens() {
        assert_eq!(
            InputIntents::parse("left|taunt"),
            Err(InputParseError::UnknownIntent {
                token: "taunt".into()
            })
        );
    }

    #[test]
    fn opposing_directions_cancel() {
        assert_eq!((InputIntents::LEFT | InputIntents::RIGHT).horizontal(), 0);
        assert_eq!(InputIntents::LEFT.horizontal(), -1);
        assert!(InputIntents::HEAVY.any_attack());
        assert!(!InputIntents::DASH.any_attack());
    }
}
