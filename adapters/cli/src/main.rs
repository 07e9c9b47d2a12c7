#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line driver that replays scripted input through the simulation.
//!
//! The driver owns the tick cadence: it applies `Command::Tick`, then pumps
//! the pursuit and input systems until no further commands are produced, and
//! finally presents the resulting scene. Scripted key presses travel through
//! the same input mapper a real keyboard source would use.

mod script;

use std::fmt::Write as _;

use anyhow::Result;
use clap::Parser;
use glam::Vec2;
use glyph_chase_core::{
    Command, Event, GridConfig, Phase, SessionConfig, DEFAULT_RNG_SEED, WELCOME_BANNER,
};
use glyph_chase_rendering::{
    surface_point, Overlay, Presenter, Scene, SceneBaddie, SceneGrid, SceneIcon, ScenePlayer,
};
use glyph_chase_system_input::InputMap;
use glyph_chase_system_pursuit::{Config as PursuitConfig, Pursuit};
use glyph_chase_world::{self as world, query, Session};
use serde::Serialize;

/// Arguments accepted by the Glyph Chase driver.
#[derive(Debug, Parser)]
#[command(name = "glyph-chase", about = "Headless Glyph Chase driver")]
struct Args {
    /// Number of node columns on the board.
    #[arg(long, default_value_t = 8)]
    columns: u32,
    /// Number of node rows on the board.
    #[arg(long, default_value_t = 5)]
    rows: u32,
    /// Seed for the spawn layout and chase exploration.
    #[arg(long, default_value_t = DEFAULT_RNG_SEED)]
    seed: u64,
    /// Directions to press, one letter per step (U, D, L, R).
    #[arg(long, default_value = "RRDDRR")]
    script: String,
    /// Upper bound on simulation ticks for the whole run.
    #[arg(long, default_value_t = 5000)]
    max_ticks: u64,
    /// Emit the run summary as JSON instead of presenting the scene.
    #[arg(long)]
    json: bool,
}

/// Final state of a driver run.
#[derive(Debug, Serialize)]
struct RunSummary {
    phase: Phase,
    score: u32,
    ticks: u64,
    icons_remaining: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let summary = run(&args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "finished in phase {:?} with score {} after {} ticks ({} icons left)",
            summary.phase, summary.score, summary.ticks, summary.icons_remaining
        );
    }
    Ok(())
}

fn run(args: &Args) -> Result<RunSummary> {
    if !args.json {
        println!("{WELCOME_BANNER}");
    }

    let config = SessionConfig {
        grid: GridConfig {
            columns: args.columns,
            rows: args.rows,
            obstacle: GridConfig::centered_obstacle(args.columns, args.rows),
            ..GridConfig::default()
        },
        rng_seed: args.seed,
        ..SessionConfig::default()
    };

    let mut session = Session::new();
    let mut events = Vec::new();
    world::apply(&mut session, Command::Configure { config }, &mut events);

    let mut pursuit = Pursuit::new(PursuitConfig::new(args.seed));
    let mut input = InputMap::new();
    let mut steps = script::parse_script(&args.script)?.into_iter();

    let mut ticks = 0;
    while ticks < args.max_ticks && !query::phase(&session).is_terminal() {
        if !query::player(&session).moving {
            if let Some(direction) = steps.next() {
                let key = script::key_for(direction);
                let mut commands = Vec::new();
                input.key_down(key, &mut commands);
                input.key_up(key);

                let mut events = Vec::new();
                for command in commands {
                    world::apply(&mut session, command, &mut events);
                }
                pump(&mut session, &mut pursuit, &input, events);
            }
        }

        let mut events = Vec::new();
        world::apply(&mut session, Command::Tick, &mut events);
        ticks += 1;
        pump(&mut session, &mut pursuit, &input, events);
    }

    if !args.json {
        let scene = compose_scene(&session);
        let mut presenter = TextPresenter;
        presenter.present(&scene)?;
    }

    Ok(RunSummary {
        phase: query::phase(&session),
        score: query::score(&session),
        ticks: query::tick(&session),
        icons_remaining: query::icon_view(&session).remaining(),
    })
}

/// Feeds an event batch through the systems until no commands remain.
fn pump(session: &mut Session, pursuit: &mut Pursuit, input: &InputMap, mut events: Vec<Event>) {
    loop {
        let player = query::player(session);
        let baddies = query::baddie_view(session);
        let grid = query::grid(session).clone();

        let mut commands = Vec::new();
        pursuit.handle(&events, &player, &baddies, &grid, &mut commands);
        input.handle(&events, &mut commands);
        if commands.is_empty() {
            break;
        }

        events.clear();
        for command in commands {
            world::apply(session, command, &mut events);
        }
    }
}

/// Assembles the rendering scene from the session's read-only queries.
fn compose_scene(session: &Session) -> Scene {
    let grid = query::grid(session);
    let player = query::player(session);
    let phase = query::phase(session);
    let score = query::score(session);

    Scene {
        grid: SceneGrid {
            columns: grid.columns(),
            rows: grid.rows(),
            surface: Vec2::new(grid.surface_width(), grid.surface_height()),
            obstacle: grid.obstacle(),
        },
        player: ScenePlayer {
            position: surface_point(player.position),
            facing: player.facing,
            moving: player.moving,
        },
        baddies: query::baddie_view(session)
            .iter()
            .map(|baddie| SceneBaddie {
                id: baddie.id,
                position: surface_point(baddie.position),
                moving: baddie.moving,
            })
            .collect(),
        icons: query::icon_view(session)
            .iter()
            .map(|icon| SceneIcon {
                id: icon.id,
                cell: icon.cell,
                position: surface_point(grid.cell_center(icon.cell)),
                glyph: icon.glyph.name(),
                collected: icon.collected,
            })
            .collect(),
        score,
        phase,
        overlay: Overlay::for_phase(phase, score),
    }
}

/// Presenter that renders scenes as plain text on stdout.
#[derive(Debug)]
struct TextPresenter;

impl Presenter for TextPresenter {
    fn present(&mut self, scene: &Scene) -> Result<()> {
        let mut frame = String::new();
        writeln!(
            frame,
            "phase {:?} | score {} | icons left {}",
            scene.phase,
            scene.score,
            scene.icons.iter().filter(|icon| !icon.collected).count()
        )?;
        writeln!(
            frame,
            "player at ({:.1}, {:.1}) facing {:?}{}",
            scene.player.position.x,
            scene.player.position.y,
            scene.player.facing,
            if scene.player.moving { " (moving)" } else { "" }
        )?;
        for baddie in &scene.baddies {
            writeln!(
                frame,
                "baddie #{} at ({:.1}, {:.1}){}",
                baddie.id.get(),
                baddie.position.x,
                baddie.position.y,
                if baddie.moving { " (moving)" } else { "" }
            )?;
        }
        if let Some(overlay) = &scene.overlay {
            writeln!(frame, "=== {} {} ===", overlay.headline, overlay.detail)?;
        }
        print!("{frame}");
        Ok(())
    }
}
