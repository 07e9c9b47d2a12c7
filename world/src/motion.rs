//! Discrete-to-continuous motion shared by the player and the baddies.

use glyph_chase_core::{CellCoord, GridLayout, Position};

/// Outcome of advancing a body by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Progress {
    /// No step was in flight.
    Idle,
    /// The body moved but has not reached its target yet.
    InTransit,
    /// The body settled on its target cell this tick.
    Arrived,
}

/// A body that travels between cell centers at a fixed per-tick speed.
///
/// While a step is in flight the continuous position lies on the segment
/// between the centers of `cell` and `target`; once settled it equals the
/// center of `cell` exactly.
#[derive(Clone, Debug)]
pub(crate) struct MovingBody {
    cell: CellCoord,
    target: CellCoord,
    position: Position,
    moving: bool,
}

impl MovingBody {
    pub(crate) fn settled_at(cell: CellCoord, grid: &GridLayout) -> Self {
        Self {
            cell,
            target: cell,
            position: grid.cell_center(cell),
            moving: false,
        }
    }

    pub(crate) fn cell(&self) -> CellCoord {
        self.cell
    }

    pub(crate) fn target(&self) -> CellCoord {
        self.target
    }

    pub(crate) fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn moving(&self) -> bool {
        self.moving
    }

    pub(crate) fn begin_step(&mut self, target: CellCoord) {
        self.target = target;
        self.moving = true;
    }

    /// Moves toward the target center by exactly `speed` surface units.
    ///
    /// When the remaining distance is within one tick's travel the body snaps
    /// onto the center and settles, so arrival takes exactly
    /// `ceil(distance / speed)` ticks and never overshoots. A target whose
    /// center coincides with the current position settles immediately.
    pub(crate) fn advance(&mut self, grid: &GridLayout, speed: f32) -> Progress {
        if !self.moving {
            return Progress::Idle;
        }

        let destination = grid.cell_center(self.target);
        let dx = destination.x() - self.position.x();
        let dy = destination.y() - self.position.y();
        let distance = dx.hypot(dy);

        if distance <= speed {
            self.position = destination;
            self.cell = self.target;
            self.moving = false;
            return Progress::Arrived;
        }

        let scale = speed / distance;
        self.position = Position::new(
            self.position.x() + dx * scale,
            self.position.y() + dy * scale,
        );
        Progress::InTransit
    }
}
