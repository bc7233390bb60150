//! Headless run loop
//!
//! [`run`] drives a world with injected collaborators: any [`Renderer`], any
//! [`TickScheduler`] setting. The windowed app uses the same pieces through
//! the winit event loop instead.

use std::time::{Duration, Instant};

use lifegrid_core::World;
use lifegrid_render::Renderer;

use crate::config::SimulationConfig;
use crate::systems::TickScheduler;

/// Generations between progress log lines
const PROGRESS_INTERVAL: u64 = 100;

/// Totals for one call to [`run`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Generations computed
    pub generations: u64,
    /// Cells born across all generations
    pub births: u64,
    /// Cells that died across all generations
    pub deaths: u64,
    /// Live cells at the end
    pub population: usize,
    /// Wall-clock time spent
    pub elapsed: Duration,
}

/// Repaint once, then tick and render until `config.max_generations`
///
/// Without a generation limit this never returns.
pub fn run<R: Renderer + ?Sized>(
    config: &SimulationConfig,
    world: &mut World,
    renderer: &mut R,
    scheduler: &mut TickScheduler,
) -> RunSummary {
    let start = Instant::now();
    let mut changes = world.change_set();
    let mut summary = RunSummary::default();

    renderer.repaint(world);
    log::info!(
        "Running {}x{} world ({} live) at {} ticks/s",
        world.width(),
        world.height(),
        world.population(),
        scheduler.max_ticks_per_second()
    );

    while config
        .max_generations
        .map_or(true, |max| summary.generations < max)
    {
        let now = Instant::now();
        if !scheduler.poll(now) {
            std::thread::sleep(scheduler.time_until_next(now));
            continue;
        }

        world.tick(&mut changes);
        renderer.render(&changes);

        summary.generations += 1;
        summary.births += changes.births().len() as u64;
        summary.deaths += changes.deaths().len() as u64;

        if summary.generations % PROGRESS_INTERVAL == 0 {
            log::debug!(
                "Generation {}: population {}",
                world.generation(),
                world.population()
            );
        }
    }

    summary.population = world.population();
    summary.elapsed = start.elapsed();
    summary
}
