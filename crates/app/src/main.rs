//! Headless AgroCast runner.
//!
//! Drives the farm simulation in real time (10 Hz) and prints a status
//! board every few seconds. Environment variables:
//!
//! - `AGROCAST_SEED`: u64 seed for the simulation RNG (default 42)
//! - `AGROCAST_JSON=1`: emit JSON snapshots instead of the text board
//! - `AGROCAST_DAYS=N`: exit once the farm clock passes day N

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;

use simulation::irrigation::commands::FarmCommand;
use simulation::observation::FarmObservation;
use simulation::sim_rng::SimRng;
use simulation::SimulationPlugin;

/// Frames between status board prints (~5 seconds at 10 Hz).
const BOARD_INTERVAL_FRAMES: u32 = 50;

fn main() {
    let mut app = App::new();

    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_millis(100))),
    )
    .add_plugins(bevy::log::LogPlugin::default())
    .add_plugins(SimulationPlugin);

    if let Some(seed) = env_u64("AGROCAST_SEED") {
        app.insert_resource(SimRng::from_seed_u64(seed));
    }

    app.insert_resource(StatusBoard {
        frames: 0,
        json: std::env::var("AGROCAST_JSON").is_ok(),
        exit_after_day: env_u64("AGROCAST_DAYS").map(|d| d as u32),
    });

    app.add_systems(Startup, start_irrigation)
        .add_systems(Update, (print_status_board, exit_after_day_limit));

    app.run();
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse::<u64>().ok())
}

#[derive(Resource)]
struct StatusBoard {
    frames: u32,
    json: bool,
    exit_after_day: Option<u32>,
}

/// Queue a system start so the demo farm begins watering immediately.
fn start_irrigation(mut commands: EventWriter<FarmCommand>) {
    commands.send(FarmCommand::StartSystem);
}

/// Print the farm snapshot every [`BOARD_INTERVAL_FRAMES`] frames.
fn print_status_board(world: &mut World) {
    let json = {
        let mut board = world.resource_mut::<StatusBoard>();
        board.frames += 1;
        if !board.frames.is_multiple_of(BOARD_INTERVAL_FRAMES) {
            return;
        }
        board.json
    };

    let observation = FarmObservation::capture(world);
    if json {
        match serde_json::to_string(&observation) {
            Ok(line) => println!("{}", line),
            Err(e) => error!("failed to serialize observation: {}", e),
        }
    } else {
        println!("{}", observation.render_text());
    }
}

/// Exit once the farm clock passes the configured day limit.
fn exit_after_day_limit(
    board: Res<StatusBoard>,
    clock: Res<simulation::farm_clock::FarmClock>,
    mut exit: EventWriter<AppExit>,
) {
    if let Some(limit) = board.exit_after_day {
        if clock.day > limit {
            info!("day limit {} reached, exiting", limit);
            exit.send(AppExit::Success);
        }
    }
}
