#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Glyph Chase adapters.
//!
//! Drivers assemble a [`Scene`] from session queries after every tick and
//! hand it to a [`Presenter`]. The scene is plain data: concrete renderers
//! translate positions into visual element placement, look up icon glyphs by
//! name in their icon library, and draw the terminal overlay when present.

use anyhow::Result as AnyResult;
use glam::Vec2;
use glyph_chase_core::{
    BaddieId, CellCoord, CellRect, Command, Direction, IconId, Phase, Position,
};

/// Converts a core surface position into a render-space vector.
#[must_use]
pub fn surface_point(position: Position) -> Vec2 {
    Vec2::new(position.x(), position.y())
}

/// Complete description of one rendered frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Static board geometry for the frame.
    pub grid: SceneGrid,
    /// Player presentation state.
    pub player: ScenePlayer,
    /// Baddie presentation states in identifier order.
    pub baddies: Vec<SceneBaddie>,
    /// Icon presentation states in identifier order.
    pub icons: Vec<SceneIcon>,
    /// Score to display.
    pub score: u32,
    /// Phase the session is in.
    pub phase: Phase,
    /// Terminal-phase overlay, present only in `Won` or `Lost`.
    pub overlay: Option<Overlay>,
}

/// Board geometry required to lay out a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneGrid {
    /// Number of node columns on the board.
    pub columns: u32,
    /// Number of node rows on the board.
    pub rows: u32,
    /// Play-surface dimensions in surface units.
    pub surface: Vec2,
    /// Static obstacle region, drawn as the central card.
    pub obstacle: CellRect,
}

/// Player state needed to draw its token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScenePlayer {
    /// Continuous surface position of the token center.
    pub position: Vec2,
    /// Facing used to orient the token sprite.
    pub facing: Direction,
    /// Whether a walk animation should play.
    pub moving: bool,
}

/// Baddie state needed to draw its token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneBaddie {
    /// Identifier of the baddie.
    pub id: BaddieId,
    /// Continuous surface position of the token center.
    pub position: Vec2,
    /// Whether a walk animation should play.
    pub moving: bool,
}

/// Icon state needed to draw one board glyph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneIcon {
    /// Identifier of the icon.
    pub id: IconId,
    /// Cell the icon occupies.
    pub cell: CellCoord,
    /// Surface position of the glyph center.
    pub position: Vec2,
    /// Name keying the renderer's icon-glyph library.
    pub glyph: &'static str,
    /// Whether the collect animation (and later removal) applies.
    ///
    /// Removal timing after collection is purely cosmetic and owned by the
    /// renderer; the flag itself never reverts.
    pub collected: bool,
}

/// Message panel shown over the board once the session ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overlay {
    /// Headline announcing the outcome.
    pub headline: &'static str,
    /// Supporting line, including the final score.
    pub detail: String,
}

impl Overlay {
    /// Builds the overlay appropriate for the provided phase, if any.
    #[must_use]
    pub fn for_phase(phase: Phase, score: u32) -> Option<Self> {
        match phase {
            Phase::Won => Some(Self {
                headline: "You Win!",
                detail: format!("Final Score: {score}"),
            }),
            Phase::Lost => Some(Self {
                headline: "Game Over!",
                detail: format!("Score: {score}"),
            }),
            Phase::NotStarted | Phase::Running => None,
        }
    }

    /// Command the renderer must submit when the play-again action fires.
    #[must_use]
    pub fn play_again_command(&self) -> Command {
        Command::Reset
    }
}

/// Surface implemented by concrete renderers.
pub trait Presenter {
    /// Presents the provided scene to the player.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying presentation surface fails.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}
