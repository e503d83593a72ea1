use anyhow::Result;
use lightrig_host::timing::Timing;
use lightrig_host::World;
use lightrig_interface::prelude::*;

use std::time::{Duration, Instant};

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "lightrig sim",
    about = "Headless driver for a shared light rig across simulated participants"
)]
struct Opt {
    /// Number of fixtures in the rig
    #[structopt(short, long, default_value = "12")]
    fixtures: u32,

    /// Number of participants sharing the prop
    #[structopt(short, long, default_value = "2")]
    participants: usize,

    /// Delay between chase steps, in milliseconds
    #[structopt(long, default_value = "50")]
    step_delay_ms: u64,

    /// Host tick length, in milliseconds
    #[structopt(long, default_value = "50")]
    tick_ms: u64,

    /// Ticks between simulated "use" interactions by participant 0
    #[structopt(long, default_value = "30")]
    use_every: u64,

    /// Total ticks to run
    #[structopt(long, default_value = "150")]
    ticks: u64,

    /// Sleep to real time between ticks instead of running flat out
    #[structopt(long)]
    realtime: bool,
}

fn main() -> Result<()> {
    let args = Opt::from_args();

    // Set up logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = RigConfig {
        fixture_count: args.fixtures,
        step_delay: Duration::from_millis(args.step_delay_ms),
        ..Default::default()
    };

    let mut world = World::new(cfg, args.participants)?;
    log::info!(
        "Hosting a {}-fixture rig for {} participants",
        args.fixtures,
        args.participants
    );

    let dt = Duration::from_millis(args.tick_ms);
    let mut timing = Timing::init();

    for tick in 0..args.ticks {
        let start = Instant::now();
        timing.frame();

        // Participant 0 periodically uses the prop, cycling the mode
        if tick % args.use_every == 0 {
            world.use_prop(0)?;
            log::info!(
                "t={:.2?} use -> {:?} (owner {:?})",
                timing.elapsed(),
                world.mode(0),
                world.owner()
            );
        }

        world.tick(dt);

        // Watch the rig through the last participant's eyes
        let watcher = args.participants.saturating_sub(1);
        log::info!(
            "[{:?}] {}",
            world.mode(watcher),
            strip(world.fixtures(watcher).states())
        );

        if args.realtime {
            if let Some(wait_time) = dt.checked_sub(start.elapsed()) {
                std::thread::sleep(wait_time);
            }
        }
    }

    Ok(())
}

/// Render fixture states as a one-line strip, one char per fixture
fn strip(states: &[Emissive]) -> String {
    states
        .iter()
        .map(|e| if e.enabled { '#' } else { '.' })
        .collect()
}
