#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state management for Glyph Chase.
//!
//! The [`Session`] owns every entity for its lifetime and is mutated
//! exclusively through [`apply`]. Systems and adapters observe it through the
//! read-only accessors in [`query`].

mod motion;

use glyph_chase_core::{
    BaddieId, CellCoord, Command, Direction, Event, GridLayout, IconGlyph, IconId, Phase,
    SessionConfig,
};
use motion::{MovingBody, Progress};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Score increment awarded for every collected icon.
const ICON_SCORE: u32 = 10;

/// Glyph names cycled across the icon board, matching the renderer's library.
const ICON_GLYPHS: [IconGlyph; 24] = [
    IconGlyph::new("lock"),
    IconGlyph::new("diamond"),
    IconGlyph::new("coffee"),
    IconGlyph::new("gift"),
    IconGlyph::new("shopping-cart"),
    IconGlyph::new("plane"),
    IconGlyph::new("utensils"),
    IconGlyph::new("music"),
    IconGlyph::new("heart"),
    IconGlyph::new("star"),
    IconGlyph::new("key"),
    IconGlyph::new("home"),
    IconGlyph::new("car"),
    IconGlyph::new("ticket"),
    IconGlyph::new("gamepad-2"),
    IconGlyph::new("shopping-bag"),
    IconGlyph::new("credit-card"),
    IconGlyph::new("smartphone"),
    IconGlyph::new("headphones"),
    IconGlyph::new("pizza"),
    IconGlyph::new("book-open"),
    IconGlyph::new("camera"),
    IconGlyph::new("palette"),
    IconGlyph::new("dumbbell"),
];

/// Represents the authoritative Glyph Chase session state.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    grid: GridLayout,
    phase: Phase,
    score: u32,
    tick: u64,
    player: Player,
    baddies: Vec<Baddie>,
    icons: Vec<Icon>,
}

impl Session {
    /// Creates a new session built from the default configuration.
    #[must_use]
    pub fn new() -> Self {
        let config = SessionConfig::default();
        let grid = GridLayout::new(&config.grid);
        let mut session = Self {
            player: Player::spawned_at(config.player_start, &grid),
            baddies: Vec::new(),
            icons: Vec::new(),
            phase: Phase::NotStarted,
            score: 0,
            tick: 0,
            grid,
            config,
        };
        session.rebuild();
        session
    }

    /// Rebuilds all sub-state from the stored configuration and seed.
    fn rebuild(&mut self) {
        self.grid = GridLayout::new(&self.config.grid);
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.rng_seed);
        self.icons = generate_icons(&self.grid, self.config.player_start, &mut rng);
        self.baddies = generate_baddies(&self.grid, &self.config, &mut rng);
        self.player = Player::spawned_at(self.config.player_start, &self.grid);
        self.phase = Phase::NotStarted;
        self.score = 0;
        self.tick = 0;
    }

    fn step(&mut self, out_events: &mut Vec<Event>) {
        if self.phase != Phase::Running {
            return;
        }

        self.tick = self.tick.saturating_add(1);
        out_events.push(Event::TickAdvanced { tick: self.tick });

        if self.player.body.advance(&self.grid, self.config.player_speed) == Progress::Arrived {
            out_events.push(Event::PlayerStepCompleted {
                cell: self.player.body.cell(),
            });
        }

        for baddie in &mut self.baddies {
            match baddie.body.advance(&self.grid, self.config.baddie_speed) {
                Progress::Arrived => {
                    out_events.push(Event::BaddieStepCompleted {
                        baddie_id: baddie.id,
                        cell: baddie.body.cell(),
                    });
                    out_events.push(Event::BaddieIdle {
                        baddie_id: baddie.id,
                    });
                }
                Progress::Idle => out_events.push(Event::BaddieIdle {
                    baddie_id: baddie.id,
                }),
                Progress::InTransit => {}
            }
        }

        if let Some(baddie_id) = self.catching_baddie() {
            self.phase = Phase::Lost;
            out_events.push(Event::PlayerCaught { baddie_id });
            out_events.push(Event::PhaseChanged { phase: Phase::Lost });
            return;
        }

        self.collect_icons(out_events);

        if !self.icons.is_empty() && self.icons.iter().all(|icon| icon.collected) {
            self.phase = Phase::Won;
            out_events.push(Event::PhaseChanged { phase: Phase::Won });
        }
    }

    fn handle_intent(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if self.phase.is_terminal() {
            return;
        }

        // Facing reflects the intent even when the step itself is refused.
        self.player.facing = direction;
        out_events.push(Event::PlayerFacingChanged { direction });

        if self.player.body.moving() {
            return;
        }

        let from = self.player.body.cell();
        let Some(destination) = direction.step(from) else {
            return;
        };
        if !self.grid.is_traversable(destination) {
            return;
        }

        if self.phase == Phase::NotStarted {
            self.phase = Phase::Running;
            out_events.push(Event::PhaseChanged {
                phase: Phase::Running,
            });
            // The chase engages: every baddie awaits its first steer.
            for baddie in &self.baddies {
                out_events.push(Event::BaddieIdle {
                    baddie_id: baddie.id,
                });
            }
        }

        self.player.body.begin_step(destination);
        out_events.push(Event::PlayerStepStarted {
            from,
            to: destination,
        });
    }

    fn steer_baddie(
        &mut self,
        baddie_id: BaddieId,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) {
        if self.phase != Phase::Running {
            return;
        }

        let Some(index) = self.baddies.iter().position(|baddie| baddie.id == baddie_id) else {
            return;
        };
        if self.baddies[index].body.moving() {
            return;
        }

        let from = self.baddies[index].body.cell();
        let Some(destination) = direction.step(from) else {
            return;
        };
        if !self.grid.is_traversable(destination) {
            return;
        }
        if self.cell_reserved_by_other_baddie(destination, baddie_id) {
            return;
        }

        self.baddies[index].body.begin_step(destination);
        out_events.push(Event::BaddieStepStarted {
            baddie_id,
            from,
            to: destination,
        });
    }

    fn catching_baddie(&self) -> Option<BaddieId> {
        let player_position = self.player.body.position();
        self.baddies
            .iter()
            .find(|baddie| {
                baddie.body.position().distance_to(player_position) < self.config.collision_radius
            })
            .map(|baddie| baddie.id)
    }

    fn collect_icons(&mut self, out_events: &mut Vec<Event>) {
        let cell = self.player.body.cell();
        for icon in &mut self.icons {
            if icon.collected || icon.cell != cell {
                continue;
            }
            icon.collected = true;
            self.score = self.score.saturating_add(ICON_SCORE);
            out_events.push(Event::IconCollected {
                icon_id: icon.id,
                cell: icon.cell,
                score: self.score,
            });
        }
    }

    fn cell_reserved_by_other_baddie(&self, cell: CellCoord, exclude: BaddieId) -> bool {
        self.baddies.iter().any(|baddie| {
            baddie.id != exclude
                && (baddie.body.cell() == cell || baddie.body.target() == cell)
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the session, mutating state deterministically.
pub fn apply(session: &mut Session, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Configure { config } => {
            session.config = config;
            session.rebuild();
            out_events.push(Event::SessionReset);
        }
        Command::Reset => {
            session.rebuild();
            out_events.push(Event::SessionReset);
        }
        Command::Tick => session.step(out_events),
        Command::MovePlayer { direction } => session.handle_intent(direction, out_events),
        Command::SteerBaddie {
            baddie_id,
            direction,
        } => session.steer_baddie(baddie_id, direction, out_events),
    }
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use super::Session;
    use glyph_chase_core::{
        BaddieSnapshot, BaddieView, GridLayout, IconSnapshot, IconView, Phase, PlayerSnapshot,
        SessionConfig,
    };

    /// Provides read-only access to the session's grid geometry.
    #[must_use]
    pub fn grid(session: &Session) -> &GridLayout {
        &session.grid
    }

    /// Provides read-only access to the configuration the session was built from.
    #[must_use]
    pub fn config(session: &Session) -> &SessionConfig {
        &session.config
    }

    /// Retrieves the session's current phase.
    #[must_use]
    pub fn phase(session: &Session) -> Phase {
        session.phase
    }

    /// Retrieves the session's current score.
    #[must_use]
    pub fn score(session: &Session) -> u32 {
        session.score
    }

    /// Retrieves the number of ticks processed since the session was built.
    #[must_use]
    pub fn tick(session: &Session) -> u64 {
        session.tick
    }

    /// Captures an immutable snapshot of the player.
    #[must_use]
    pub fn player(session: &Session) -> PlayerSnapshot {
        PlayerSnapshot {
            cell: session.player.body.cell(),
            target: session.player.body.target(),
            position: session.player.body.position(),
            facing: session.player.facing,
            moving: session.player.body.moving(),
        }
    }

    /// Captures a read-only view of the baddies inhabiting the session.
    #[must_use]
    pub fn baddie_view(session: &Session) -> BaddieView {
        BaddieView::from_snapshots(
            session
                .baddies
                .iter()
                .map(|baddie| BaddieSnapshot {
                    id: baddie.id,
                    cell: baddie.body.cell(),
                    target: baddie.body.target(),
                    position: baddie.body.position(),
                    moving: baddie.body.moving(),
                })
                .collect(),
        )
    }

    /// Captures a read-only view of the icon board.
    #[must_use]
    pub fn icon_view(session: &Session) -> IconView {
        IconView::from_snapshots(
            session
                .icons
                .iter()
                .map(|icon| IconSnapshot {
                    id: icon.id,
                    cell: icon.cell,
                    glyph: icon.glyph,
                    collected: icon.collected,
                })
                .collect(),
        )
    }
}

#[derive(Debug)]
struct Player {
    body: MovingBody,
    facing: Direction,
}

impl Player {
    fn spawned_at(cell: CellCoord, grid: &GridLayout) -> Self {
        Self {
            body: MovingBody::settled_at(cell, grid),
            facing: Direction::Right,
        }
    }
}

#[derive(Debug)]
struct Baddie {
    id: BaddieId,
    body: MovingBody,
}

#[derive(Debug)]
struct Icon {
    id: IconId,
    cell: CellCoord,
    glyph: IconGlyph,
    collected: bool,
}

fn generate_icons(grid: &GridLayout, start: CellCoord, rng: &mut ChaCha8Rng) -> Vec<Icon> {
    let mut glyphs = ICON_GLYPHS.to_vec();
    glyphs.shuffle(rng);

    let mut icons = Vec::new();
    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            let cell = CellCoord::new(column, row);
            if cell == start || !grid.is_traversable(cell) {
                continue;
            }
            let glyph = glyphs[icons.len() % glyphs.len()];
            icons.push(Icon {
                id: IconId::new(icons.len() as u32),
                cell,
                glyph,
                collected: false,
            });
        }
    }
    icons
}

fn generate_baddies(
    grid: &GridLayout,
    config: &SessionConfig,
    rng: &mut ChaCha8Rng,
) -> Vec<Baddie> {
    let mut candidates: Vec<CellCoord> = Vec::new();
    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            let cell = CellCoord::new(column, row);
            if cell == config.player_start || !grid.is_traversable(cell) {
                continue;
            }
            if cell.manhattan_distance(config.player_start) < config.min_baddie_spawn_distance {
                continue;
            }
            candidates.push(cell);
        }
    }
    candidates.shuffle(rng);

    candidates
        .into_iter()
        .take(config.baddie_count as usize)
        .enumerate()
        .map(|(index, cell)| Baddie {
            id: BaddieId::new(index as u32),
            body: MovingBody::settled_at(cell, grid),
        })
        .collect()
}
