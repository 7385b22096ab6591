//! Falling boxes demo
//!
//! Drops a box onto a static platform, spawns a few more from scripted
//! pointer presses, then quits. Frames are reported through the log.
//!
//! Usage: `boxfall [config.toml|config.ron]`

use boxfall_engine::config::Config;
use boxfall_engine::core::ApplicationConfig;
use boxfall_engine::events::ScriptedEventSource;
use boxfall_engine::foundation::logging;
use boxfall_engine::input::InputEvent;
use boxfall_engine::physics::{BodyHandle, BodyKind, RectangleBodyDesc};
use boxfall_engine::render::LogPresenter;
use boxfall_engine::{AppError, Application, Engine, EngineError};
use thiserror::Error;

/// Frame on which the scripted run asks to quit
const QUIT_FRAME: u64 = 240;

#[derive(Error, Debug)]
enum DemoError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] boxfall_engine::config::ConfigError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

struct BoxfallDemo {
    width: f32,
    height: f32,
    platform: Option<BodyHandle>,
    first_box: Option<BodyHandle>,
}

impl BoxfallDemo {
    fn new(config: &ApplicationConfig) -> Self {
        Self {
            width: config.display.width as f32,
            height: config.display.height as f32,
            platform: None,
            first_box: None,
        }
    }
}

impl Application for BoxfallDemo {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let platform = RectangleBodyDesc::new(
            self.width / 2.0,
            self.height - 50.0,
            self.width,
            30.0,
            BodyKind::Static,
        );
        self.platform = Some(engine.world_mut().add_rectangle_body(platform)?);
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, frame: u64) -> Result<(), AppError> {
        if frame == 0 {
            let first = RectangleBodyDesc::new(100.0, 100.0, 20.0, 20.0, BodyKind::Dynamic);
            self.first_box = Some(engine.world_mut().add_rectangle_body(first)?);
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        let world = engine.world();
        let scale = world.scale();
        for (name, handle) in [("platform", self.platform), ("first box", self.first_box)] {
            if let Some(body) = handle.and_then(|h| world.body(h)) {
                let position = scale.point_to_display(body.position());
                log::info!(
                    "Final {name}: ({:.1}, {:.1})px, {:.3} rad",
                    position.x,
                    position.y,
                    body.angle()
                );
            }
        }
    }
}

fn scripted_input(config: &ApplicationConfig) -> ScriptedEventSource {
    let width = config.display.width as f32;
    ScriptedEventSource::new()
        .with_event_at(30, InputEvent::PointerDown { x: width * 0.25, y: 60.0 })
        .with_event_at(60, InputEvent::PointerDown { x: width * 0.5, y: 40.0 })
        .with_event_at(90, InputEvent::PointerDown { x: width * 0.5 + 8.0, y: 0.0 })
        .with_event_at(QUIT_FRAME, InputEvent::Quit)
}

fn run() -> Result<(), DemoError> {
    let config = match std::env::args().nth(1) {
        Some(path) => ApplicationConfig::load_from_file(&path)?,
        None => ApplicationConfig::default(),
    };
    logging::init_with_level(&config.engine.log_level);
    log::info!("Starting boxfall demo at {}x{}", config.display.width, config.display.height);

    let engine = Engine::from_config(
        &config,
        Box::new(scripted_input(&config)),
        Box::new(LogPresenter::new()),
    )?;
    let mut demo = BoxfallDemo::new(&config);
    let summary = engine.run(&mut demo)?;

    log::info!(
        "Finished: {} frames, {} steps, {} bodies in {:.1}s, {:.1} fps average",
        summary.frames,
        summary.steps,
        summary.bodies,
        summary.elapsed_seconds,
        summary.average_fps
    );
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("boxfall: {e}");
        std::process::exit(1);
    }
}
