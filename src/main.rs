//! Asteroids headless runner
//!
//! Drives the simulation with a simple demo pilot and prints the final world
//! snapshot as JSON. Frame pacing and drawing belong to a front end; this
//! binary only exercises the core.
//!
//! Usage: `asteroids-sim [--config FILE] [--seed N] [--steps N]`

use std::path::PathBuf;
use std::process::ExitCode;

use asteroids_sim::sim::{Contact, GameState, PlayerActions};
use asteroids_sim::{SimConfig, heading, wrapped_delta};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "asteroids-sim", about = "Run the Asteroids simulation headless")]
struct Args {
    /// JSON config file; defaults are used when omitted
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for world placement and asteroid splits
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Maximum number of steps to run
    #[arg(long, default_value_t = 600)]
    steps: u64,
}

/// Demo pilot: turn toward the nearest asteroid, close in, fire when lined up
fn pilot(state: &GameState, player: usize) -> PlayerActions {
    let mut actions = PlayerActions::idle();
    let Some(ship) = state.player_entity(player) else {
        return actions;
    };

    let target = state
        .entities()
        .iter()
        .filter(|e| e.kind.is_asteroid())
        .map(|e| wrapped_delta(ship.pos, e.pos, state.borders()))
        .min_by(|a, b| {
            a.length_squared()
                .partial_cmp(&b.length_squared())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(offset) = target {
        // Positive when the target lies clockwise of the facing, which rotate_left closes
        let turn = offset.angle_to(heading(ship.rotation)).to_degrees();
        let step = state.config().player_rotation_speed;
        if turn > step * 0.5 {
            actions.rotate_left = true;
        } else if turn < -step * 0.5 {
            actions.rotate_right = true;
        }
        actions.shoot = turn.abs() < step;
        actions.accelerate_forward = offset.length() > 250.0 && turn.abs() < 45.0;
    }
    actions
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    let mut state = GameState::try_new(config, args.seed)?;
    log::info!("Running {} steps with seed {}", args.steps, args.seed);

    for _ in 0..args.steps {
        let actions: Vec<_> = (0..state.player_count()).map(|p| pilot(&state, p)).collect();
        let report = state.step(&actions)?;

        for contact in &report.contacts {
            match contact {
                Contact::AsteroidShot { shooter: Some(p), asteroid, .. } => {
                    log::info!("Step {}: player {p} hit asteroid {asteroid}", state.step_count())
                }
                Contact::ShipWrecked { player, .. } | Contact::ShipShot { player, .. } => {
                    log::info!("Step {}: player {player} destroyed", state.step_count())
                }
                _ => {}
            }
        }

        if state.players().iter().all(|p| !p.alive) {
            log::info!("All players down at step {}", state.step_count());
            break;
        }
    }

    println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
