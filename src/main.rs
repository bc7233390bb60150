//! lifegrid - Conway's Game of Life
//!
//! Simulates B3/S23 on a fixed grid and redraws only the cells that change.

use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use lifegrid::config::AppConfig;
use lifegrid::input::{InputAction, InputMapper};
use lifegrid::systems::{RenderError, RenderSystem, SimulationSystem, TickScheduler, WindowSystem};
use lifegrid_core::{World, WorldError};
use lifegrid_render::{FrameBuffer, Renderer};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    simulation: SimulationSystem,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
}

impl App {
    fn new(config: AppConfig) -> Result<Self, WorldError> {
        let (width, height) = config.grid_size();
        let simulation = SimulationSystem::from_config(&config.simulation, width, height)?;
        log::info!(
            "Created {}x{} grid with {} live cells",
            width,
            height,
            simulation.world().population()
        );

        Ok(Self {
            config,
            simulation,
            window: None,
            render: None,
        })
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::TogglePause => {
                let paused = self.simulation.toggle_pause();
                log::info!("Simulation {}", if paused { "paused" } else { "running" });
            }
            InputAction::Step => self.simulation.request_step(),
            InputAction::Reseed => {
                if let Some(render) = &mut self.render {
                    if let Err(e) = self.simulation.reseed(render) {
                        log::error!("Reseed failed: {}", e);
                    }
                }
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::SpeedUp => {
                log::info!("Tick rate: {}/s", self.simulation.speed_up());
            }
            InputAction::SlowDown => {
                log::info!("Tick rate: {}/s", self.simulation.slow_down());
            }
        }
    }

    fn generation_limit_reached(&self) -> bool {
        self.config
            .simulation
            .max_generations
            .is_some_and(|max| self.simulation.world().generation() >= max)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let world = self.simulation.world();
        let mut render = match RenderSystem::new(
            window.window().clone(),
            &self.config.rendering,
            (world.width(), world.height()),
            self.config.world.cell_size,
            self.config.window.vsync,
        ) {
            Ok(render) => render,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        render.repaint(world);
        window.request_redraw();

        self.window = Some(window);
        self.render = Some(render);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render {
                    render.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                        self.handle_action(action, event_loop);
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(render) = &mut self.render else {
                    return;
                };

                self.simulation.update(Instant::now(), render);

                match render.render_frame() {
                    Ok(()) => {}
                    Err(RenderError::SurfaceLost) => log::debug!("Surface lost, reconfigured"),
                    Err(RenderError::OutOfMemory) => {
                        log::error!("GPU out of memory");
                        event_loop.exit();
                        return;
                    }
                    Err(e) => log::warn!("{}", e),
                }

                if self.generation_limit_reached() {
                    log::info!(
                        "Reached generation {}, exiting",
                        self.simulation.world().generation()
                    );
                    event_loop.exit();
                    return;
                }

                if let Some(window) = &self.window {
                    let world = self.simulation.world();
                    window.update_title(
                        world.generation(),
                        world.population(),
                        self.simulation.ticks_per_second(),
                        self.simulation.is_paused(),
                    );
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

/// Run without a window, rendering into an in-memory bitmap
fn run_headless(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (width, height) = config.grid_size();
    if FrameBuffer::pixel_size(width, height, config.world.cell_size).is_none() {
        return Err(format!(
            "{}x{} cells at {}px do not fit in a frame",
            width, height, config.world.cell_size
        )
        .into());
    }
    let mut world = World::random(width, height, config.simulation.density, config.simulation.seed)?;
    let mut frame = FrameBuffer::new(width, height, config.world.cell_size, config.rendering.palette());
    let mut scheduler = TickScheduler::new(config.simulation.max_ticks_per_second);

    if config.simulation.max_generations.is_none() {
        log::warn!("Headless run without simulation.max_generations will not stop on its own");
    }

    let summary = lifegrid::run(&config.simulation, &mut world, &mut frame, &mut scheduler);
    log::info!(
        "Finished {} generations in {:.2?}: {} births, {} deaths, population {}",
        summary.generations,
        summary.elapsed,
        summary.births,
        summary.deaths,
        summary.population
    );
    Ok(())
}

fn main() {
    let loaded = AppConfig::load();

    // Initialize logging (RUST_LOG overrides the configured level)
    let log_level = loaded
        .as_ref()
        .map(|config| config.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });
    log::info!("Starting lifegrid");

    if config.debug.headless {
        if let Err(e) = run_headless(&config) {
            log::error!("{}", e);
            std::process::exit(1);
        }
        return;
    }

    let mut app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    // Create event loop
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app).expect("Event loop error");
}
