#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Glyph Chase engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative session, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the session executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems to react to deterministically. Systems consume event streams,
//! query immutable snapshots, and respond exclusively with new command
//! batches.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Glyph Chase.";

/// Default seed driving the spawn-layout shuffle when none is supplied.
pub const DEFAULT_RNG_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Commands that express all permissible session mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Rebuilds the session from the provided configuration.
    Configure {
        /// Complete configuration the session should adopt.
        config: SessionConfig,
    },
    /// Advances the simulation by one fixed step.
    Tick,
    /// Requests that the player step one cell in the provided direction.
    MovePlayer {
        /// Direction of the requested step.
        direction: Direction,
    },
    /// Requests that an idle baddie begin a step toward an adjacent cell.
    SteerBaddie {
        /// Identifier of the baddie being steered.
        baddie_id: BaddieId,
        /// Direction of travel for the requested step.
        direction: Direction,
    },
    /// Rebuilds the session from its stored configuration.
    Reset,
}

/// Events broadcast by the session after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that the session rebuilt its initial state.
    SessionReset,
    /// Indicates that the simulation advanced by one step.
    TickAdvanced {
        /// Number of steps processed since the session was built.
        tick: u64,
    },
    /// Announces that the session entered a new phase.
    PhaseChanged {
        /// Phase that became active after processing commands.
        phase: Phase,
    },
    /// Reports the player's facing direction after a movement intent.
    PlayerFacingChanged {
        /// Direction the player now faces.
        direction: Direction,
    },
    /// Confirms that the player began a step between two cells.
    PlayerStepStarted {
        /// Cell the player occupied when the step began.
        from: CellCoord,
        /// Cell the player is traveling toward.
        to: CellCoord,
    },
    /// Confirms that the player settled on its target cell.
    PlayerStepCompleted {
        /// Cell the player now occupies.
        cell: CellCoord,
    },
    /// Confirms that a baddie began a step between two cells.
    BaddieStepStarted {
        /// Identifier of the baddie that began moving.
        baddie_id: BaddieId,
        /// Cell the baddie occupied when the step began.
        from: CellCoord,
        /// Cell the baddie is traveling toward.
        to: CellCoord,
    },
    /// Confirms that a baddie settled on its target cell.
    BaddieStepCompleted {
        /// Identifier of the baddie that settled.
        baddie_id: BaddieId,
        /// Cell the baddie now occupies.
        cell: CellCoord,
    },
    /// Reports that a baddie has no step in flight and awaits steering.
    BaddieIdle {
        /// Identifier of the idle baddie.
        baddie_id: BaddieId,
    },
    /// Confirms that the player collected an icon.
    IconCollected {
        /// Identifier of the collected icon.
        icon_id: IconId,
        /// Cell the icon occupies.
        cell: CellCoord,
        /// Session score after awarding the collection increment.
        score: u32,
    },
    /// Reports that a baddie came within the collision radius of the player.
    PlayerCaught {
        /// Identifier of the baddie that caught the player.
        baddie_id: BaddieId,
    },
}

/// Coarse game state of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// The session is built but no movement intent has been accepted yet.
    NotStarted,
    /// The chase is underway.
    Running,
    /// Every icon was collected.
    Won,
    /// A baddie caught the player.
    Lost,
}

impl Phase {
    /// Reports whether the phase is terminal until an explicit reset.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Cardinal movement and facing directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Returns the neighboring cell one step in this direction.
    ///
    /// Steps that would leave the non-negative coordinate space return
    /// `None`; bounds against a concrete grid are the grid's concern.
    #[must_use]
    pub fn step(self, cell: CellCoord) -> Option<CellCoord> {
        match self {
            Self::Up => cell
                .row()
                .checked_sub(1)
                .map(|row| CellCoord::new(cell.column(), row)),
            Self::Down => Some(CellCoord::new(cell.column(), cell.row() + 1)),
            Self::Left => cell
                .column()
                .checked_sub(1)
                .map(|column| CellCoord::new(column, cell.row())),
            Self::Right => Some(CellCoord::new(cell.column() + 1, cell.row())),
        }
    }
}

/// Unique identifier assigned to a baddie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BaddieId(u32);

impl BaddieId {
    /// Creates a new baddie identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IconId(u32);

impl IconId {
    /// Creates a new icon identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Cosmetic glyph tag carried by an icon.
///
/// The tag is opaque to the simulation; renderers key an icon-glyph library
/// off the name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IconGlyph(&'static str);

impl IconGlyph {
    /// Creates a new glyph tag from its library name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Library name identifying the glyph.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row)
    }
}

/// Axis-aligned rectangle of cells used for the static obstacle region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    origin: CellCoord,
    columns: u32,
    rows: u32,
}

impl CellRect {
    /// Constructs a rectangle from its upper-left cell and cell dimensions.
    #[must_use]
    pub const fn new(origin: CellCoord, columns: u32, rows: u32) -> Self {
        Self {
            origin,
            columns,
            rows,
        }
    }

    /// Constructs a rectangle that covers no cells.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(CellCoord::new(0, 0), 0, 0)
    }

    /// Upper-left cell that anchors the rectangle.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Width of the rectangle in cells.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Height of the rectangle in cells.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the provided cell lies within the rectangle.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        let column_end = self.origin.column().saturating_add(self.columns);
        let row_end = self.origin.row().saturating_add(self.rows);
        cell.column() >= self.origin.column()
            && cell.column() < column_end
            && cell.row() >= self.origin.row()
            && cell.row() < row_end
    }
}

/// Continuous position expressed in surface units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    x: f32,
    y: f32,
}

impl Position {
    /// Creates a new position from surface coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal surface coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical surface coordinate.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Computes the Euclidean distance to another position.
    #[must_use]
    pub fn distance_to(self, other: Position) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Describes the discrete node grid laid out on the play surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of node columns laid out on the surface.
    pub columns: u32,
    /// Number of node rows laid out on the surface.
    pub rows: u32,
    /// Total width of the play surface in surface units.
    pub surface_width: f32,
    /// Total height of the play surface in surface units.
    pub surface_height: f32,
    /// Horizontal margin between the surface edge and the outermost nodes.
    pub margin_x: f32,
    /// Vertical margin between the surface edge and the outermost nodes.
    pub margin_y: f32,
    /// Static region of cells that are never traversable.
    pub obstacle: CellRect,
}

impl GridConfig {
    /// Computes the 3x1 obstacle centered on the grid's card cell.
    ///
    /// The region spans the center column plus one neighbor on each side on
    /// the center row, clamped at the left edge for very narrow grids.
    #[must_use]
    pub fn centered_obstacle(columns: u32, rows: u32) -> CellRect {
        if columns == 0 || rows == 0 {
            return CellRect::empty();
        }

        let center_column = columns / 2;
        let center_row = rows / 2;
        let origin_column = center_column.saturating_sub(1);
        let width = if center_column == 0 { 2 } else { 3 };
        CellRect::new(CellCoord::new(origin_column, center_row), width, 1)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 8,
            rows: 5,
            surface_width: 800.0,
            surface_height: 500.0,
            margin_x: 60.0,
            margin_y: 50.0,
            obstacle: Self::centered_obstacle(8, 5),
        }
    }
}

/// Complete configuration required to build a session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Geometry of the node grid.
    pub grid: GridConfig,
    /// Cell the player occupies when the session is built.
    pub player_start: CellCoord,
    /// Distance the player travels per tick, in surface units.
    pub player_speed: f32,
    /// Distance a baddie travels per tick, in surface units.
    pub baddie_speed: f32,
    /// Number of baddies spawned into the session.
    pub baddie_count: u32,
    /// Minimum Manhattan distance between a spawn cell and the player start.
    pub min_baddie_spawn_distance: u32,
    /// Continuous distance below which a baddie catches the player.
    pub collision_radius: f32,
    /// Seed driving the spawn-layout and glyph-assignment shuffles.
    pub rng_seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            player_start: CellCoord::new(0, 0),
            player_speed: 3.0,
            baddie_speed: 2.0,
            baddie_count: 2,
            min_baddie_spawn_distance: 4,
            collision_radius: 25.0,
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

/// Immutable grid geometry derived from a [`GridConfig`].
///
/// The grid is pure: cell centers are an affine function of the coordinate,
/// blocked-set membership is static, and out-of-range queries answer
/// false/blocked rather than failing.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout {
    columns: u32,
    rows: u32,
    surface_width: f32,
    surface_height: f32,
    origin: Position,
    spacing_x: f32,
    spacing_y: f32,
    obstacle: CellRect,
}

impl GridLayout {
    /// Builds the geometry described by the provided configuration.
    ///
    /// Node spacing divides the surface interior between the outermost node
    /// centers; grids with a single column or row collapse that axis to the
    /// margin line.
    #[must_use]
    pub fn new(config: &GridConfig) -> Self {
        let spacing_x = axis_spacing(config.surface_width, config.margin_x, config.columns);
        let spacing_y = axis_spacing(config.surface_height, config.margin_y, config.rows);
        Self {
            columns: config.columns,
            rows: config.rows,
            surface_width: config.surface_width,
            surface_height: config.surface_height,
            origin: Position::new(config.margin_x, config.margin_y),
            spacing_x,
            spacing_y,
            obstacle: config.obstacle,
        }
    }

    /// Number of node columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of node rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total width of the play surface in surface units.
    #[must_use]
    pub const fn surface_width(&self) -> f32 {
        self.surface_width
    }

    /// Total height of the play surface in surface units.
    #[must_use]
    pub const fn surface_height(&self) -> f32 {
        self.surface_height
    }

    /// Static region of cells that are never traversable.
    #[must_use]
    pub const fn obstacle(&self) -> CellRect {
        self.obstacle
    }

    /// Computes the surface-space center of the provided cell.
    ///
    /// The mapping is a pure affine transform and is defined for any
    /// coordinate, including cells outside the grid bounds.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Position {
        Position::new(
            self.origin.x() + cell.column() as f32 * self.spacing_x,
            self.origin.y() + cell.row() as f32 * self.spacing_y,
        )
    }

    /// Reports whether the cell lies within the grid bounds.
    #[must_use]
    pub const fn is_in_bounds(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Reports whether the cell belongs to the static obstacle region.
    #[must_use]
    pub fn is_blocked(&self, cell: CellCoord) -> bool {
        self.obstacle.contains(cell)
    }

    /// Reports whether an entity may occupy the cell.
    #[must_use]
    pub fn is_traversable(&self, cell: CellCoord) -> bool {
        self.is_in_bounds(cell) && !self.is_blocked(cell)
    }
}

fn axis_spacing(surface: f32, margin: f32, count: u32) -> f32 {
    if count > 1 {
        (surface - 2.0 * margin) / (count - 1) as f32
    } else {
        0.0
    }
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Cell the player last settled on.
    pub cell: CellCoord,
    /// Cell the player is traveling toward; equals `cell` when idle.
    pub target: CellCoord,
    /// Continuous surface position of the player.
    pub position: Position,
    /// Direction the player currently faces.
    pub facing: Direction,
    /// Indicates whether a step is in flight.
    pub moving: bool,
}

/// Immutable representation of a single baddie's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BaddieSnapshot {
    /// Unique identifier assigned to the baddie.
    pub id: BaddieId,
    /// Cell the baddie last settled on.
    pub cell: CellCoord,
    /// Cell the baddie is traveling toward; equals `cell` when idle.
    pub target: CellCoord,
    /// Continuous surface position of the baddie.
    pub position: Position,
    /// Indicates whether a step is in flight.
    pub moving: bool,
}

/// Read-only snapshot describing all baddies within the session.
#[derive(Clone, Debug, Default)]
pub struct BaddieView {
    snapshots: Vec<BaddieSnapshot>,
}

impl BaddieView {
    /// Creates a new baddie view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<BaddieSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured baddie snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &BaddieSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<BaddieSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single icon's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IconSnapshot {
    /// Unique identifier assigned to the icon.
    pub id: IconId,
    /// Cell the icon occupies for the whole session.
    pub cell: CellCoord,
    /// Cosmetic glyph tag assigned to the icon.
    pub glyph: IconGlyph,
    /// Indicates whether the player already collected the icon.
    pub collected: bool,
}

/// Read-only snapshot describing all icons within the session.
#[derive(Clone, Debug, Default)]
pub struct IconView {
    snapshots: Vec<IconSnapshot>,
}

impl IconView {
    /// Creates a new icon view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<IconSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured icon snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &IconSnapshot> {
        self.snapshots.iter()
    }

    /// Number of icons the player has not collected yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.snapshots
            .iter()
            .filter(|snapshot| !snapshot.collected)
            .count()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<IconSnapshot> {
        self.snapshots
    }
}
