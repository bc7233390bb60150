//! Simulation system
//!
//! Owns the world and drives it:
//! - Rate-limited ticking through the [`TickScheduler`]
//! - Pause, single-step, and speed control
//! - Reseeding with a fresh random world
//! - Forwarding each tick's changes to a renderer

use std::time::Instant;

use lifegrid_core::{ChangeSet, World, WorldError};
use lifegrid_render::Renderer;

use crate::config::SimulationConfig;
use super::scheduler::{TickScheduler, MAX_TICKS_PER_SECOND};

/// Result of a simulation update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationResult {
    /// Whether a generation was computed (and rendered)
    pub ticked: bool,
}

/// Manages the simulation loop
pub struct SimulationSystem {
    world: World,
    changes: ChangeSet,
    scheduler: TickScheduler,
    paused: bool,
    step_requested: bool,
    density: f64,
    seed: Option<u64>,
    reseeds: u64,
}

impl SimulationSystem {
    /// Wrap an existing world
    pub fn new(world: World, scheduler: TickScheduler) -> Self {
        Self {
            changes: world.change_set(),
            world,
            scheduler,
            paused: false,
            step_requested: false,
            density: lifegrid_core::DEFAULT_DENSITY,
            seed: None,
            reseeds: 0,
        }
    }

    /// Build a random `width × height` world from config
    pub fn from_config(
        config: &SimulationConfig,
        width: usize,
        height: usize,
    ) -> Result<Self, WorldError> {
        let world = World::random(width, height, config.density, config.seed)?;
        let mut system = Self::new(world, TickScheduler::new(config.max_ticks_per_second));
        system.paused = config.start_paused;
        system.density = config.density;
        system.seed = config.seed;
        Ok(system)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Changes from the most recent tick
    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn ticks_per_second(&self) -> u32 {
        self.scheduler.max_ticks_per_second()
    }

    /// Pause or resume; returns the new paused state
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.step_requested = false;
        if !self.paused {
            self.scheduler.reset();
        }
        self.paused
    }

    /// Run exactly one generation on the next update (only while paused)
    pub fn request_step(&mut self) {
        if self.paused {
            self.step_requested = true;
        }
    }

    /// Double the tick cap; returns the new rate
    pub fn speed_up(&mut self) -> u32 {
        let tps = self.scheduler.max_ticks_per_second();
        if tps > 0 {
            self.scheduler
                .set_max_ticks_per_second(tps.saturating_mul(2).min(MAX_TICKS_PER_SECOND));
        }
        self.scheduler.max_ticks_per_second()
    }

    /// Halve the tick cap (not below 1); returns the new rate
    pub fn slow_down(&mut self) -> u32 {
        let tps = self.scheduler.max_ticks_per_second();
        if tps > 0 {
            self.scheduler.set_max_ticks_per_second((tps / 2).max(1));
        }
        self.scheduler.max_ticks_per_second()
    }

    /// Replace the world with a fresh random fill of the same size and repaint
    ///
    /// A configured seed is offset per reseed so each fill differs but the
    /// sequence stays reproducible.
    pub fn reseed<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> Result<(), WorldError> {
        self.reseeds += 1;
        let seed = self.seed.map(|s| s.wrapping_add(self.reseeds));
        self.world = World::random(self.world.width(), self.world.height(), self.density, seed)?;
        self.changes.clear();
        self.scheduler.reset();
        renderer.repaint(&self.world);
        log::info!("Reseeded world: {} live cells", self.world.population());
        Ok(())
    }

    /// Tick if due and hand the changes to `renderer`
    pub fn update<R: Renderer + ?Sized>(&mut self, now: Instant, renderer: &mut R) -> SimulationResult {
        let due = if self.paused {
            std::mem::take(&mut self.step_requested)
        } else {
            self.scheduler.poll(now)
        };
        if !due {
            return SimulationResult { ticked: false };
        }

        self.world.tick(&mut self.changes);
        renderer.render(&self.changes);
        SimulationResult { ticked: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifegrid_core::Cell;

    /// Counts calls instead of drawing
    #[derive(Default)]
    struct CountingRenderer {
        repaints: usize,
        renders: usize,
        changed_cells: usize,
    }

    impl Renderer for CountingRenderer {
        fn repaint(&mut self, _world: &World) {
            self.repaints += 1;
        }

        fn render(&mut self, changes: &ChangeSet) {
            self.renders += 1;
            self.changed_cells += changes.len();
        }
    }

    fn blinker_system(tps: u32) -> SimulationSystem {
        let cells = [Cell::new(1, 2), Cell::new(2, 2), Cell::new(3, 2)];
        let world = World::from_live_cells(5, 5, &cells).unwrap();
        SimulationSystem::new(world, TickScheduler::new(tps))
    }

    #[test]
    fn test_update_ticks_and_renders() {
        let mut sim = blinker_system(0);
        let mut renderer = CountingRenderer::default();
        let result = sim.update(Instant::now(), &mut renderer);
        assert!(result.ticked);
        assert_eq!(sim.world().generation(), 1);
        assert_eq!(renderer.renders, 1);
        assert_eq!(renderer.changed_cells, 4);
        assert_eq!(sim.changes().len(), 4);
    }

    #[test]
    fn test_rate_limit_respected() {
        let t0 = Instant::now();
        let mut sim = blinker_system(10);
        let mut renderer = CountingRenderer::default();
        assert!(sim.update(t0, &mut renderer).ticked);
        assert!(!sim.update(t0 + std::time::Duration::from_millis(20), &mut renderer).ticked);
        assert_eq!(renderer.renders, 1);
    }

    #[test]
    fn test_paused_only_steps_on_request() {
        let mut sim = blinker_system(0);
        let mut renderer = CountingRenderer::default();
        assert!(sim.toggle_pause());

        assert!(!sim.update(Instant::now(), &mut renderer).ticked);
        sim.request_step();
        assert!(sim.update(Instant::now(), &mut renderer).ticked);
        assert!(!sim.update(Instant::now(), &mut renderer).ticked);
        assert_eq!(sim.world().generation(), 1);

        assert!(!sim.toggle_pause());
        assert!(sim.update(Instant::now(), &mut renderer).ticked);
    }

    #[test]
    fn test_step_ignored_while_running() {
        let mut sim = blinker_system(1);
        let mut renderer = CountingRenderer::default();
        let t0 = Instant::now();
        sim.update(t0, &mut renderer);
        sim.request_step();
        assert!(!sim.update(t0, &mut renderer).ticked);
    }

    #[test]
    fn test_speed_controls() {
        let mut sim = blinker_system(30);
        assert_eq!(sim.speed_up(), 60);
        assert_eq!(sim.slow_down(), 30);
        for _ in 0..10 {
            sim.slow_down();
        }
        assert_eq!(sim.ticks_per_second(), 1);
        for _ in 0..20 {
            sim.speed_up();
        }
        assert_eq!(sim.ticks_per_second(), MAX_TICKS_PER_SECOND);
    }

    #[test]
    fn test_uncapped_speed_unchanged() {
        let mut sim = blinker_system(0);
        assert_eq!(sim.speed_up(), 0);
        assert_eq!(sim.slow_down(), 0);
    }

    #[test]
    fn test_reseed_replaces_world_and_repaints() {
        let config = SimulationConfig {
            density: 0.5,
            seed: Some(9),
            ..SimulationConfig::default()
        };
        let mut sim = SimulationSystem::from_config(&config, 20, 10).unwrap();
        let before: Vec<Cell> = sim.world().live_cells().collect();

        let mut renderer = CountingRenderer::default();
        sim.reseed(&mut renderer).unwrap();

        let after: Vec<Cell> = sim.world().live_cells().collect();
        assert_eq!(renderer.repaints, 1);
        assert_eq!((sim.world().width(), sim.world().height()), (20, 10));
        assert_eq!(sim.world().generation(), 0);
        assert_ne!(before, after);
    }

    #[test]
    fn test_from_config_honours_start_paused() {
        let config = SimulationConfig {
            start_paused: true,
            seed: Some(1),
            ..SimulationConfig::default()
        };
        let sim = SimulationSystem::from_config(&config, 8, 8).unwrap();
        assert!(sim.is_paused());
    }

    #[test]
    fn test_from_config_rejects_empty_grid() {
        let config = SimulationConfig::default();
        assert!(SimulationSystem::from_config(&config, 0, 8).is_err());
    }
}
