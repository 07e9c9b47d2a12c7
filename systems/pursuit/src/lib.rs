#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Stochastic pursuit system that steers idle baddies toward the player.
//!
//! The system is a greedy hill-climb on Manhattan distance rather than a
//! shortest-path search: each idle baddie considers only the single-step
//! moves that shrink its column or row gap to the player, so it can be
//! temporarily out-maneuvered around the obstacle. That is accepted chase
//! behavior, not a defect.

use glyph_chase_core::{
    BaddieId, BaddieSnapshot, BaddieView, CellCoord, Command, Direction, Event, GridLayout,
    PlayerSnapshot,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Probability of taking the top-ranked candidate instead of exploring.
const GREEDY_BIAS: f64 = 0.7;

/// Configuration parameters required to construct the pursuit system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided exploration seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system that reacts to session events and emits steering commands.
#[derive(Debug)]
pub struct Pursuit {
    rng: ChaCha8Rng,
}

impl Pursuit {
    /// Creates a new pursuit system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes session events and immutable views to emit steering commands.
    ///
    /// The session reports every idle baddie once per tick through
    /// [`Event::BaddieIdle`]; the system answers each notification with at
    /// most one steering command. Baddies left without a surviving candidate
    /// simply stay idle and are re-evaluated on the next tick's notification.
    pub fn handle(
        &mut self,
        events: &[Event],
        player: &PlayerSnapshot,
        baddies: &BaddieView,
        grid: &GridLayout,
        out: &mut Vec<Command>,
    ) {
        let snapshots: Vec<&BaddieSnapshot> = baddies.iter().collect();
        let mut claimed: Vec<CellCoord> = Vec::new();

        for event in events {
            let Event::BaddieIdle { baddie_id } = event else {
                continue;
            };
            let Some(baddie) = snapshots
                .iter()
                .find(|snapshot| snapshot.id == *baddie_id)
            else {
                continue;
            };
            if baddie.moving {
                continue;
            }

            let mut open: Vec<Candidate> = chase_candidates(baddie.cell, player.cell)
                .into_iter()
                .filter(|candidate| {
                    grid.is_traversable(candidate.cell)
                        && !claimed.contains(&candidate.cell)
                        && !occupied_by_other(&snapshots, baddie.id, candidate.cell)
                })
                .collect();
            if open.is_empty() {
                continue;
            }

            // Stable sort keeps the horizontal candidate first on equal gaps,
            // matching the enumeration order.
            open.sort_by(|a, b| b.priority.cmp(&a.priority));

            let choice = if self.rng.gen_bool(GREEDY_BIAS) {
                open[0]
            } else {
                open[self.rng.gen_range(0..open.len())]
            };

            claimed.push(choice.cell);
            out.push(Command::SteerBaddie {
                baddie_id: baddie.id,
                direction: choice.direction,
            });
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    cell: CellCoord,
    direction: Direction,
    priority: u32,
}

/// Enumerates the up-to-two axis moves that shrink the gap to the player.
fn chase_candidates(from: CellCoord, player: CellCoord) -> Vec<Candidate> {
    let mut candidates = Vec::with_capacity(2);

    let column_gap = player.column().abs_diff(from.column());
    if column_gap > 0 {
        let direction = if player.column() > from.column() {
            Direction::Right
        } else {
            Direction::Left
        };
        if let Some(cell) = direction.step(from) {
            candidates.push(Candidate {
                cell,
                direction,
                priority: column_gap,
            });
        }
    }

    let row_gap = player.row().abs_diff(from.row());
    if row_gap > 0 {
        let direction = if player.row() > from.row() {
            Direction::Down
        } else {
            Direction::Up
        };
        if let Some(cell) = direction.step(from) {
            candidates.push(Candidate {
                cell,
                direction,
                priority: row_gap,
            });
        }
    }

    candidates
}

fn occupied_by_other(baddies: &[&BaddieSnapshot], exclude: BaddieId, cell: CellCoord) -> bool {
    baddies
        .iter()
        .any(|baddie| baddie.id != exclude && (baddie.cell == cell || baddie.target == cell))
}

#[cfg(test)]
mod tests {
    use super::{chase_candidates, Config, Pursuit};
    use glyph_chase_core::{
        BaddieId, BaddieSnapshot, BaddieView, CellCoord, CellRect, Command, Direction, Event,
        GridConfig, GridLayout, PlayerSnapshot,
    };

    fn open_layout() -> GridLayout {
        GridLayout::new(&GridConfig {
            obstacle: CellRect::empty(),
            ..GridConfig::default()
        })
    }

    fn idle_baddie(id: u32, cell: CellCoord, grid: &GridLayout) -> BaddieSnapshot {
        BaddieSnapshot {
            id: BaddieId::new(id),
            cell,
            target: cell,
            position: grid.cell_center(cell),
            moving: false,
        }
    }

    fn player_at(cell: CellCoord, grid: &GridLayout) -> PlayerSnapshot {
        PlayerSnapshot {
            cell,
            target: cell,
            position: grid.cell_center(cell),
            facing: Direction::Right,
            moving: false,
        }
    }

    #[test]
    fn candidates_shrink_the_larger_gap_first() {
        let candidates = chase_candidates(CellCoord::new(0, 0), CellCoord::new(3, 1));
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].direction, Direction::Right);
        assert_eq!(candidates[0].priority, 3);
        assert_eq!(candidates[1].direction, Direction::Down);
        assert_eq!(candidates[1].priority, 1);
    }

    #[test]
    fn no_candidates_when_sharing_the_player_cell() {
        assert!(chase_candidates(CellCoord::new(2, 2), CellCoord::new(2, 2)).is_empty());
    }

    #[test]
    fn handle_acts_only_on_idle_notifications() {
        let grid = open_layout();
        let player = player_at(CellCoord::new(0, 0), &grid);
        let baddies = BaddieView::from_snapshots(vec![idle_baddie(0, CellCoord::new(4, 0), &grid)]);
        let mut pursuit = Pursuit::new(Config::new(7));

        let mut commands = Vec::new();
        pursuit.handle(
            &[Event::TickAdvanced { tick: 1 }],
            &player,
            &baddies,
            &grid,
            &mut commands,
        );
        assert!(commands.is_empty());

        pursuit.handle(
            &[Event::BaddieIdle {
                baddie_id: BaddieId::new(0),
            }],
            &player,
            &baddies,
            &grid,
            &mut commands,
        );
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn single_candidate_is_always_taken() {
        let grid = open_layout();
        let player = player_at(CellCoord::new(0, 0), &grid);
        // Same row as the player: only the horizontal candidate exists.
        let baddies = BaddieView::from_snapshots(vec![idle_baddie(0, CellCoord::new(5, 0), &grid)]);
        let mut pursuit = Pursuit::new(Config::new(1234));

        for _ in 0..32 {
            let mut commands = Vec::new();
            pursuit.handle(
                &[Event::BaddieIdle {
                    baddie_id: BaddieId::new(0),
                }],
                &player,
                &baddies,
                &grid,
                &mut commands,
            );
            assert_eq!(
                commands,
                vec![Command::SteerBaddie {
                    baddie_id: BaddieId::new(0),
                    direction: Direction::Left,
                }]
            );
        }
    }

    #[test]
    fn moving_baddies_are_left_alone() {
        let grid = open_layout();
        let player = player_at(CellCoord::new(0, 0), &grid);
        let mut in_flight = idle_baddie(0, CellCoord::new(4, 0), &grid);
        in_flight.target = CellCoord::new(3, 0);
        in_flight.moving = true;
        let baddies = BaddieView::from_snapshots(vec![in_flight]);
        let mut pursuit = Pursuit::new(Config::new(7));

        let mut commands = Vec::new();
        pursuit.handle(
            &[Event::BaddieIdle {
                baddie_id: BaddieId::new(0),
            }],
            &player,
            &baddies,
            &grid,
            &mut commands,
        );
        assert!(commands.is_empty());
    }

    #[test]
    fn two_baddies_never_claim_the_same_cell() {
        let grid = open_layout();
        let player = player_at(CellCoord::new(1, 1), &grid);
        // Both flank the player horizontally; each has exactly one candidate,
        // and both candidates are the player's cell.
        let baddies = BaddieView::from_snapshots(vec![
            idle_baddie(0, CellCoord::new(0, 1), &grid),
            idle_baddie(1, CellCoord::new(2, 1), &grid),
        ]);
        let mut pursuit = Pursuit::new(Config::new(99));

        let mut commands = Vec::new();
        pursuit.handle(
            &[
                Event::BaddieIdle {
                    baddie_id: BaddieId::new(0),
                },
                Event::BaddieIdle {
                    baddie_id: BaddieId::new(1),
                },
            ],
            &player,
            &baddies,
            &grid,
            &mut commands,
        );

        assert_eq!(
            commands,
            vec![Command::SteerBaddie {
                baddie_id: BaddieId::new(0),
                direction: Direction::Right,
            }]
        );
    }

    #[test]
    fn occupied_cells_are_filtered_out() {
        let grid = open_layout();
        let player = player_at(CellCoord::new(3, 0), &grid);
        // The pursuing baddie's only useful moves are Right (toward a cell
        // held by another baddie) and nothing else: same row, blocker between.
        let blocker = idle_baddie(1, CellCoord::new(2, 0), &grid);
        let baddies = BaddieView::from_snapshots(vec![
            idle_baddie(0, CellCoord::new(1, 0), &grid),
            blocker,
        ]);
        let mut pursuit = Pursuit::new(Config::new(5));

        let mut commands = Vec::new();
        pursuit.handle(
            &[
                Event::BaddieIdle {
                    baddie_id: BaddieId::new(0),
                },
                Event::BaddieIdle {
                    baddie_id: BaddieId::new(1),
                },
            ],
            &player,
            &baddies,
            &grid,
            &mut commands,
        );

        // Baddie 0 is boxed out; baddie 1 advances onto the player's cell.
        assert_eq!(
            commands,
            vec![Command::SteerBaddie {
                baddie_id: BaddieId::new(1),
                direction: Direction::Right,
            }]
        );
    }

    #[test]
    fn blocked_grid_cells_are_filtered_out() {
        // Default layout blocks (3,2)..(5,2); a baddie at (2,2) chasing a
        // player at (6,2) may not step onto the obstacle.
        let grid = GridLayout::new(&GridConfig::default());
        let player = player_at(CellCoord::new(6, 2), &grid);
        let baddies = BaddieView::from_snapshots(vec![idle_baddie(0, CellCoord::new(2, 2), &grid)]);
        let mut pursuit = Pursuit::new(Config::new(21));

        let mut commands = Vec::new();
        pursuit.handle(
            &[Event::BaddieIdle {
                baddie_id: BaddieId::new(0),
            }],
            &player,
            &baddies,
            &grid,
            &mut commands,
        );
        assert!(commands.is_empty());
    }
}
