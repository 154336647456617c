use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, error, info};

use intersection_sim::render::{ClassicGlyphs, Flow, Frame, PlainGlyphs, Renderer, TerminalRenderer};
use intersection_sim::simulation::{
    FinishReason, SignalPattern, SimConfig, SimWorld, DEFAULT_CONCURRENT_CARS, MAX_DRAIN_STEPS,
    MAX_STEPS,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PatternArg {
    Simple,
    ProtectedLeft,
}

impl From<PatternArg> for SignalPattern {
    fn from(arg: PatternArg) -> Self {
        match arg {
            PatternArg::Simple => SignalPattern::Simple,
            PatternArg::ProtectedLeft => SignalPattern::ProtectedLeft,
        }
    }
}

#[derive(Parser)]
#[command(name = "intersection_sim")]
#[command(about = "Traffic simulation of a single signalled intersection")]
struct Cli {
    /// Traffic light pattern to simulate
    #[arg(short, long, value_enum, default_value = "simple")]
    pattern: PatternArg,

    /// Total number of cars to simulate
    #[arg(short, long, default_value = "20")]
    cars: usize,

    /// Ratio of cars that turn left (0.0 to 1.0); protected-left pattern only
    #[arg(short, long, default_value = "0.2")]
    turn_ratio: f64,

    /// Distribution of cars across directions (0.0 = one random direction, 1.0 = even)
    #[arg(short, long, default_value = "1.0")]
    distribution: f64,

    /// Keep running after a collision
    #[arg(long)]
    ignore_crashes: bool,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Delay between frames in milliseconds
    #[arg(long, default_value = "250")]
    delay_ms: u64,

    /// Run without drawing to the terminal
    #[arg(long)]
    headless: bool,

    /// Draw with plain ASCII and no colours
    #[arg(long)]
    plain: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.headless { "info" } else { "error" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut config = SimConfig::new(
        DEFAULT_CONCURRENT_CARS.min(cli.cars),
        cli.cars,
        cli.pattern.into(),
    )
    .with_left_turn_ratio(cli.turn_ratio)
    .with_distribution(cli.distribution)
    .with_ignore_crashes(cli.ignore_crashes);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let mut world = SimWorld::new(config).context("Invalid simulation parameters")?;
    world.prime();

    let interrupted = if cli.headless {
        run_headless(&mut world);
        false
    } else {
        let glyphs: Box<dyn Renderer> = if cli.plain {
            Box::new(PlainGlyphs)
        } else {
            Box::new(ClassicGlyphs)
        };
        let mut term = TerminalRenderer::new(glyphs);
        term.enter()?;
        let result = run_interactive(&mut world, &mut term, Duration::from_millis(cli.delay_ms));
        // Always try to restore terminal state.
        after_restore(result, term.exit())?
    };

    report(&world, interrupted);
    Ok(())
}

/// Run the simulation without graphics
fn run_headless(world: &mut SimWorld) {
    info!(
        "Running {} with {} cars",
        world.pattern().name(),
        world.config().goal_cars
    );
    while world.tick() {
        debug!("{}", world.summary());
    }
    if should_drain(world) {
        let mut steps = 0;
        while world.stats().active_cars > 0 && steps < MAX_DRAIN_STEPS {
            world.drain_step();
            steps += 1;
        }
    }
}

/// Run the phase loop, drawing every tick; returns true if the user stopped it
fn run_interactive(world: &mut SimWorld, term: &mut TerminalRenderer, delay: Duration) -> Result<bool> {
    term.draw(&Frame::capture(world), &status_lines(world))?;

    while world.tick() {
        term.draw(&Frame::capture(world), &status_lines(world))?;
        if term.wait(delay)? == Flow::Stop {
            return Ok(true);
        }
    }

    if should_drain(world) {
        let mut steps = 0;
        while world.stats().active_cars > 0 && steps < MAX_DRAIN_STEPS {
            world.drain_step();
            steps += 1;
            term.draw(&Frame::capture(world), &status_lines(world))?;
            if term.wait(delay * 2)? == Flow::Stop {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Hand back the run's result, logging a failed terminal restore
fn after_restore<T>(result: Result<T>, restore: Result<()>) -> Result<T> {
    if let Err(err) = restore {
        error!("Failed to restore the terminal: {:#}", err);
    }
    result
}

/// Cars left on the grid are run out unless the run ended in a crash
fn should_drain(world: &SimWorld) -> bool {
    world.finish_reason() != Some(FinishReason::Crash)
}

fn status_lines(world: &SimWorld) -> Vec<String> {
    let stats = world.stats();
    let goal = world.config().goal_cars;
    vec![
        format!("Running pattern: {}", world.pattern().name()),
        "--------------".to_string(),
        format!("Traffic Simulation v{} (Step: {})", VERSION, stats.steps),
        format!("Cars Started: {}/{}", stats.total_cars_spawned, goal),
        format!("Cars Finished: {}/{}", stats.total_cars_completed, goal),
        format!("Crashes: {}", stats.crashes),
        format!(
            "Phase: {:?} ({} ticks left)",
            world.signals().current_phase().kind,
            world.signals().ticks_remaining()
        ),
        "Press q to quit".to_string(),
    ]
}

fn report(world: &SimWorld, interrupted: bool) {
    let stats = world.stats();
    let goal = world.config().goal_cars;

    let headline = if interrupted {
        "Simulation stopped.".to_string()
    } else {
        match world.finish_reason() {
            Some(FinishReason::StepLimit) => {
                format!("Simulation finished: Reached step limit of {}.", MAX_STEPS)
            }
            Some(FinishReason::Crash) => {
                format!("Simulation stopped: crash detected at step {}.", stats.steps)
            }
            _ => "Simulation finished.".to_string(),
        }
    };

    println!();
    println!("{}", headline);
    println!("Cars Started: {}/{}", stats.total_cars_spawned, goal);
    println!("Cars Finished: {}/{}", stats.total_cars_completed, goal);

    info!("=== SIMULATION COMPLETE ===");
    info!("Steps: {}", stats.steps);
    info!("Total cars spawned: {}", stats.total_cars_spawned);
    info!("Total cars completed: {}", stats.total_cars_completed);
    info!("Active cars: {}", stats.active_cars);
    info!("Crashes: {}", stats.crashes);
    info!("Success rate: {:.1}%", stats.success_rate());
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn failed_restore_keeps_the_run_result() {
        let result = after_restore(Ok(true), Err(anyhow!("tty gone")));
        assert!(result.expect("run result survives"));
    }

    #[test]
    fn run_error_is_still_reported_after_restore() {
        let result: Result<bool> = after_restore(Err(anyhow!("draw failed")), Ok(()));
        let err = result.expect_err("run error propagates");
        assert_eq!(err.to_string(), "draw failed");
    }
}
