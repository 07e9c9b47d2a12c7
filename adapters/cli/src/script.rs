use std::{error::Error, fmt};

use glyph_chase_core::Direction;

/// Raw key identifier pressed for a scripted step.
///
/// The driver feeds these through the input mapper so scripted runs exercise
/// the same key-recognition path as a real keyboard source.
pub(crate) const fn key_for(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "ArrowUp",
        Direction::Down => "ArrowDown",
        Direction::Left => "ArrowLeft",
        Direction::Right => "ArrowRight",
    }
}

/// Parses an input script into the directions it presses.
///
/// One letter per step: `U`, `D`, `L`, or `R`, case-insensitive. Whitespace
/// separates steps freely and is ignored.
pub(crate) fn parse_script(value: &str) -> Result<Vec<Direction>, ScriptError> {
    let mut steps = Vec::new();
    for letter in value.chars() {
        if letter.is_whitespace() {
            continue;
        }
        let direction = match letter.to_ascii_uppercase() {
            'U' => Direction::Up,
            'D' => Direction::Down,
            'L' => Direction::Left,
            'R' => Direction::Right,
            _ => return Err(ScriptError::UnknownStep(letter)),
        };
        steps.push(direction);
    }
    Ok(steps)
}

/// Errors that can occur while parsing an input script.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ScriptError {
    /// The script contained a letter that is not a direction.
    UnknownStep(char),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownStep(letter) => {
                write!(f, "script step '{letter}' is not one of U, D, L, R")
            }
        }
    }
}

impl Error for ScriptError {}
