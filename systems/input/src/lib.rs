#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Input mapper translating raw key identifiers into movement commands.
//!
//! The mapper owns no gameplay state beyond the set of currently held
//! directional keys. A key-down submits one movement intent immediately, so
//! input latency is one event turn rather than one tick; key repeat is
//! synthesized from [`Event::PlayerStepCompleted`] while a key stays held.

use glyph_chase_core::{Command, Direction, Event};

/// Directions probed when synthesizing key repeat, in fixed priority order.
const REPEAT_PRIORITY: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// Pure system that maps raw key events onto movement commands.
#[derive(Clone, Debug, Default)]
pub struct InputMap {
    held: [bool; 4],
}

impl InputMap {
    /// Creates a new mapper with no keys held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a key press and emits the movement intent it maps to.
    ///
    /// Unrecognized identifiers are ignored entirely.
    pub fn key_down(&mut self, key: &str, out: &mut Vec<Command>) {
        let Some(direction) = map_key(key) else {
            return;
        };
        self.held[slot(direction)] = true;
        out.push(Command::MovePlayer { direction });
    }

    /// Registers a key release.
    pub fn key_up(&mut self, key: &str) {
        if let Some(direction) = map_key(key) {
            self.held[slot(direction)] = false;
        }
    }

    /// Reports whether a directional key is currently held.
    ///
    /// Exposed for boundary UI feedback such as on-screen key highlights.
    #[must_use]
    pub fn is_held(&self, direction: Direction) -> bool {
        self.held[slot(direction)]
    }

    /// Consumes session events to synthesize key repeat.
    ///
    /// When the player settles on a cell while a directional key is still
    /// held, exactly one follow-up intent is emitted for the first held
    /// direction in priority order. The session's idle-only acceptance rule
    /// keeps at most one step queued ahead.
    pub fn handle(&self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if !matches!(event, Event::PlayerStepCompleted { .. }) {
                continue;
            }
            if let Some(direction) = REPEAT_PRIORITY
                .into_iter()
                .find(|direction| self.is_held(*direction))
            {
                out.push(Command::MovePlayer { direction });
            }
        }
    }
}

fn map_key(key: &str) -> Option<Direction> {
    if key.eq_ignore_ascii_case("arrowup") || key.eq_ignore_ascii_case("w") {
        Some(Direction::Up)
    } else if key.eq_ignore_ascii_case("arrowdown") || key.eq_ignore_ascii_case("s") {
        Some(Direction::Down)
    } else if key.eq_ignore_ascii_case("arrowleft") || key.eq_ignore_ascii_case("a") {
        Some(Direction::Left)
    } else if key.eq_ignore_ascii_case("arrowright") || key.eq_ignore_ascii_case("d") {
        Some(Direction::Right)
    } else {
        None
    }
}

const fn slot(direction: Direction) -> usize {
    match direction {
        Direction::Up => 0,
        Direction::Down => 1,
        Direction::Left => 2,
        Direction::Right => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::{map_key, InputMap};
    use glyph_chase_core::{CellCoord, Command, Direction, Event};

    #[test]
    fn arrows_and_wasd_map_to_the_same_directions() {
        assert_eq!(map_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(map_key("w"), Some(Direction::Up));
        assert_eq!(map_key("W"), Some(Direction::Up));
        assert_eq!(map_key("ArrowDown"), Some(Direction::Down));
        assert_eq!(map_key("S"), Some(Direction::Down));
        assert_eq!(map_key("arrowleft"), Some(Direction::Left));
        assert_eq!(map_key("a"), Some(Direction::Left));
        assert_eq!(map_key("ARROWRIGHT"), Some(Direction::Right));
        assert_eq!(map_key("d"), Some(Direction::Right));
    }

    #[test]
    fn unrecognized_keys_are_ignored() {
        assert_eq!(map_key("Space"), None);
        assert_eq!(map_key("Escape"), None);
        assert_eq!(map_key("q"), None);

        let mut input = InputMap::new();
        let mut commands = Vec::new();
        input.key_down("Space", &mut commands);
        assert!(commands.is_empty());
    }

    #[test]
    fn key_down_emits_one_intent_and_tracks_held_state() {
        let mut input = InputMap::new();
        let mut commands = Vec::new();

        input.key_down("d", &mut commands);
        assert_eq!(
            commands,
            vec![Command::MovePlayer {
                direction: Direction::Right
            }]
        );
        assert!(input.is_held(Direction::Right));
        assert!(!input.is_held(Direction::Up));

        input.key_up("D");
        assert!(!input.is_held(Direction::Right));
    }

    #[test]
    fn repeat_fires_once_per_completed_step() {
        let mut input = InputMap::new();
        let mut commands = Vec::new();
        input.key_down("ArrowRight", &mut commands);
        commands.clear();

        input.handle(
            &[Event::PlayerStepCompleted {
                cell: CellCoord::new(1, 0),
            }],
            &mut commands,
        );
        assert_eq!(
            commands,
            vec![Command::MovePlayer {
                direction: Direction::Right
            }]
        );

        // Without a completed step there is nothing to synthesize.
        commands.clear();
        input.handle(&[Event::TickAdvanced { tick: 3 }], &mut commands);
        assert!(commands.is_empty());

        // Releasing the key stops the repeat.
        input.key_up("ArrowRight");
        input.handle(
            &[Event::PlayerStepCompleted {
                cell: CellCoord::new(2, 0),
            }],
            &mut commands,
        );
        assert!(commands.is_empty());
    }

    #[test]
    fn repeat_prefers_up_down_left_right_order() {
        let mut input = InputMap::new();
        let mut commands = Vec::new();
        input.key_down("d", &mut commands);
        input.key_down("s", &mut commands);
        input.key_down("w", &mut commands);
        commands.clear();

        input.handle(
            &[Event::PlayerStepCompleted {
                cell: CellCoord::new(0, 1),
            }],
            &mut commands,
        );
        assert_eq!(
            commands,
            vec![Command::MovePlayer {
                direction: Direction::Up
            }]
        );
    }
}
