//! Bouncing Balls
//!
//! Headless driver: steps the ball world on a fixed timer and reports its
//! state through the logger.

mod presenter;
mod ticker;

use std::time::Duration;

use anyhow::{bail, Context, Result};
use ball_physics::{
    BodyDistribution, DiagonalLayout, VelocitySigns, DEFAULT_BODY_COUNT, DEFAULT_RESTITUTION,
    DEFAULT_TICK_DURATION,
};
use ball_simulation::{Placement, World, WorldParams};
use clap::Parser;
use presenter::TextPresenter;
use ticker::Ticker;

#[derive(Parser, Debug)]
#[command(about = "Balls bouncing and colliding in a square arena")]
struct Args {
    /// Number of balls
    #[arg(short = 'n', long, default_value_t = DEFAULT_BODY_COUNT)]
    bodies: usize,

    /// Seed for the initial placement
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Ticks to run, 0 runs until interrupted
    #[arg(long, default_value_t = 0)]
    ticks: u64,

    /// Wall-clock milliseconds between ticks
    #[arg(long, default_value_t = 100)]
    period_ms: u64,

    /// Simulation time units advanced per tick
    #[arg(long, default_value_t = DEFAULT_TICK_DURATION)]
    tick_duration: f64,

    #[arg(long, default_value_t = DEFAULT_RESTITUTION)]
    restitution: f64,

    /// Enable mutual attraction with this strength
    #[arg(long)]
    attraction: Option<f64>,

    /// Evenly spaced diagonal start instead of random placement
    #[arg(long)]
    diagonal: bool,

    /// Draw only positive initial velocity components
    #[arg(long)]
    positive_velocities: bool,

    /// Body shown in the info box
    #[arg(long, default_value_t = 0)]
    watch: usize,

    /// Ticks between reports
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    report_every: u64,
}

impl Args {
    fn world_params(&self) -> WorldParams {
        let placement = if self.diagonal {
            Placement::Diagonal(DiagonalLayout::default())
        } else {
            let velocity_signs = if self.positive_velocities {
                VelocitySigns::PositiveOnly
            } else {
                VelocitySigns::Either
            };
            Placement::Random(BodyDistribution {
                velocity_signs,
                ..Default::default()
            })
        };

        WorldParams::default()
            .with_body_count(self.bodies)
            .with_seed(self.seed)
            .with_tick_duration(self.tick_duration)
            .with_restitution(self.restitution)
            .with_attraction(self.attraction)
            .with_placement(placement)
    }
}

fn main() -> Result<()> {
    // Initialize logger (RUST_LOG=debug for per-tick output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Starting ball arena simulation...");

    let mut world = World::new(args.world_params()).context("invalid world configuration")?;
    if world.body(args.watch).is_none() {
        bail!(
            "cannot watch body {}: world has {} bodies",
            args.watch,
            world.len()
        );
    }

    log::info!("✓ World ready: {} bodies", world.len());
    log::info!("  First bodies:");
    for (i, body) in world.bodies().iter().take(5).enumerate() {
        log::info!(
            "    [{}] pos=({:.3}, {:.3}) vel=({:.2e}, {:.2e}) mass={:.2} radius={:.3}",
            i,
            body.position.x,
            body.position.y,
            body.velocity.x,
            body.velocity.y,
            body.mass,
            body.radius
        );
    }

    let presenter = TextPresenter::new(args.watch, args.report_every);
    let ticker = Ticker::new(Duration::from_millis(args.period_ms));
    let ticks = (args.ticks > 0).then_some(args.ticks);

    let stats = ticker.run(&mut world, ticks, |w| presenter.present(w));

    log::info!(
        "✓ Finished after {} ticks ({} triggers coalesced)",
        stats.ticks,
        stats.coalesced
    );
    Ok(())
}
