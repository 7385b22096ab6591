//! Scenario tests for the driver, the snapshot bridge and the main loop

use std::cell::Cell;
use std::f32::consts::FRAC_PI_4;
use std::rc::Rc;

use approx::assert_relative_eq;

use crate::application::{AppError, Application};
use crate::engine::Engine;
use crate::events::ScriptedEventSource;
use crate::foundation::math::{Pose, Vec2};
use crate::foundation::time::ManualClock;
use crate::input::{InputEvent, InputRouter, KeyCode};
use crate::physics::{
    BackendFault, BodyDefinition, BodyKind, PhysicsBackend, PhysicsError, PhysicsWorld,
    RectangleBodyDesc, WorldSettings,
};
use crate::render::{capture_snapshot, RecordingPresenter, Snapshot};
use crate::core::config::InputConfig;
use super::{DriverState, SimulationDriver};

/// Backend that moves dynamic bodies in a straight line and can be told to fail
struct ScriptedBackend {
    bodies: Vec<(BodyKind, Pose)>,
    gravity: Vec2,
    spin_per_step: f32,
    fail_on_step: Option<u64>,
    lose_body_on_step: Option<u64>,
    steps: Rc<Cell<u64>>,
}

impl ScriptedBackend {
    fn new(gravity: Vec2, steps: Rc<Cell<u64>>) -> Self {
        Self {
            bodies: Vec::new(),
            gravity,
            spin_per_step: 0.0,
            fail_on_step: None,
            lose_body_on_step: None,
            steps,
        }
    }

    /// The most recent body vanishes once `lose_body_on_step` is reached
    fn is_lost(&self, body: usize) -> bool {
        body + 1 == self.bodies.len() && self.lose_body_on_step.is_some_and(|step| self.steps.get() >= step)
    }
}

impl PhysicsBackend for ScriptedBackend {
    type BodyRef = usize;

    fn create_body(&mut self, definition: &BodyDefinition) -> usize {
        self.bodies.push((definition.kind, Pose::new(definition.position, 0.0)));
        self.bodies.len() - 1
    }

    fn step(&mut self, dt: f32, _velocity_iterations: usize, _position_iterations: usize) -> Result<(), BackendFault> {
        let step = self.steps.get() + 1;
        self.steps.set(step);
        if self.fail_on_step == Some(step) {
            return Err(BackendFault("solver diverged".to_string()));
        }
        for (kind, pose) in &mut self.bodies {
            if *kind == BodyKind::Dynamic {
                pose.position += self.gravity * dt;
                pose.angle += self.spin_per_step;
            }
        }
        Ok(())
    }

    fn bodies(&self) -> Vec<usize> {
        (0..self.bodies.len()).filter(|&body| !self.is_lost(body)).collect()
    }

    fn pose(&self, body: usize) -> Option<Pose> {
        if self.is_lost(body) {
            return None;
        }
        self.bodies.get(body).map(|(_, pose)| *pose)
    }

    fn gravity(&self) -> Vec2 {
        self.gravity
    }
}

fn scripted_world(configure: impl FnOnce(&mut ScriptedBackend)) -> (PhysicsWorld<ScriptedBackend>, Rc<Cell<u64>>) {
    let steps = Rc::new(Cell::new(0));
    let counter = Rc::clone(&steps);
    let world = PhysicsWorld::with_backend(WorldSettings::default(), move |gravity| {
        let mut backend = ScriptedBackend::new(gravity, counter);
        configure(&mut backend);
        backend
    })
    .unwrap();
    (world, steps)
}

fn demo_scene<B: PhysicsBackend>(world: &mut PhysicsWorld<B>) {
    world
        .add_rectangle_body(RectangleBodyDesc::new(320.0, 430.0, 640.0, 30.0, BodyKind::Static))
        .unwrap();
    world
        .add_rectangle_body(RectangleBodyDesc::new(100.0, 100.0, 20.0, 20.0, BodyKind::Dynamic))
        .unwrap();
}

#[test]
fn test_one_step_drops_dynamic_and_keeps_static() {
    let settings = WorldSettings {
        gravity: Vec2::new(0.0, 9.81),
        step_seconds: 1.0 / 30.0,
        ..WorldSettings::default()
    };
    let mut world = PhysicsWorld::create(settings).unwrap();
    demo_scene(&mut world);
    let platform = world.list_bodies()[0];
    let falling = world.list_bodies()[1];
    let platform_before = world.body(platform).unwrap().position();
    let falling_before = world.body(falling).unwrap().position();

    let mut driver = SimulationDriver::new(world);
    driver.tick().unwrap();

    let world = driver.world();
    assert!(world.body(falling).unwrap().position().y > falling_before.y);
    assert_relative_eq!(world.body(platform).unwrap().position(), platform_before);
    assert_eq!(driver.steps_taken(), 1);
    assert_eq!(driver.state(), DriverState::Idle);
}

#[test]
fn test_identical_runs_produce_identical_snapshots() {
    fn run(steps: u64) -> Vec<Snapshot> {
        let mut world = PhysicsWorld::create(WorldSettings::default()).unwrap();
        demo_scene(&mut world);
        for x in [300.0, 310.0, 500.0] {
            world
                .add_rectangle_body(RectangleBodyDesc::new(x, 380.0, 20.0, 20.0, BodyKind::Dynamic))
                .unwrap();
        }

        let mut driver = SimulationDriver::new(world);
        (0..steps)
            .map(|frame| {
                driver.tick().unwrap();
                capture_snapshot(driver.world(), frame)
            })
            .collect()
    }

    let first = run(90);
    let second = run(90);
    assert_eq!(first.len(), 90);
    assert_eq!(first, second);
}

#[test]
fn test_snapshot_is_stable_between_steps() {
    let mut world = PhysicsWorld::create(WorldSettings::default()).unwrap();
    demo_scene(&mut world);
    let mut driver = SimulationDriver::new(world);
    for _ in 0..5 {
        driver.tick().unwrap();
    }

    let a = capture_snapshot(driver.world(), 5);
    let b = capture_snapshot(driver.world(), 5);
    assert_eq!(a, b);
}

#[test]
fn test_rotated_corners_follow_orientation() {
    let (mut world, _) = scripted_world(|backend| backend.spin_per_step = FRAC_PI_4);
    world
        .add_rectangle_body(RectangleBodyDesc::new(100.0, 100.0, 40.0, 20.0, BodyKind::Dynamic))
        .unwrap();
    let mut driver = SimulationDriver::new(world);
    driver.tick().unwrap();

    let snapshot = capture_snapshot(driver.world(), 0);
    let body = &snapshot.bodies()[0];
    assert_relative_eq!(body.angle, FRAC_PI_4);

    let half_diagonal = Vec2::new(20.0, 10.0).norm();
    for corner in body.corners {
        assert_relative_eq!((corner - body.center).norm(), half_diagonal, epsilon = 1e-3);
    }
    // A quarter-turn of the +x half-width lands on the diagonal
    let edge_midpoint = (body.corners[1] + body.corners[2]) / 2.0 - body.center;
    assert_relative_eq!(edge_midpoint, Vec2::new(20.0, 20.0) / 2.0_f32.sqrt(), epsilon = 1e-3);
}

#[test]
fn test_fault_halts_driver() {
    let (mut world, steps) = scripted_world(|backend| backend.fail_on_step = Some(3));
    demo_scene(&mut world);
    let mut driver = SimulationDriver::new(world);

    driver.tick().unwrap();
    driver.tick().unwrap();
    assert!(matches!(driver.tick(), Err(PhysicsError::SimulationFault(_))));
    assert_eq!(driver.state(), DriverState::Faulted);

    assert_eq!(driver.tick(), Err(PhysicsError::SimulationHalted));
    assert_eq!(driver.tick(), Err(PhysicsError::SimulationHalted));
    assert_eq!(steps.get(), 3);
    assert_eq!(driver.steps_taken(), 2);
}

#[test]
fn test_lost_body_is_a_fault() {
    let (mut world, steps) = scripted_world(|backend| backend.lose_body_on_step = Some(2));
    demo_scene(&mut world);
    let mut driver = SimulationDriver::new(world);

    driver.tick().unwrap();
    let fault = driver.tick();

    assert!(matches!(fault, Err(PhysicsError::SimulationFault(ref message)) if message.contains("reports 1 bodies")));
    assert_eq!(driver.state(), DriverState::Faulted);
    assert_eq!(driver.tick(), Err(PhysicsError::SimulationHalted));
    assert_eq!(steps.get(), 2);

    // The lost body is left out of snapshots
    let snapshot = capture_snapshot(driver.world(), 2);
    assert_eq!(snapshot.len(), 1);
    assert_eq!(driver.world().list_bodies().len(), 2);
}

#[test]
fn test_stopped_driver_never_steps() {
    let (world, steps) = scripted_world(|_| {});
    let mut driver = SimulationDriver::new(world);
    driver.tick().unwrap();
    driver.stop();

    assert_eq!(driver.state(), DriverState::Stopped);
    assert_eq!(driver.tick(), Err(PhysicsError::SimulationHalted));
    assert_eq!(steps.get(), 1);
    assert_eq!(driver.shutdown(), 1);
}

/// The demo scene: platform at start, first box on the first frame
#[derive(Default)]
struct DemoScene {
    cleaned_up: bool,
}

impl<B: PhysicsBackend> Application<B> for DemoScene {
    fn initialize(&mut self, engine: &mut Engine<B>) -> Result<(), AppError> {
        engine
            .world_mut()
            .add_rectangle_body(RectangleBodyDesc::new(320.0, 430.0, 640.0, 30.0, BodyKind::Static))?;
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine<B>, frame: u64) -> Result<(), AppError> {
        if frame == 0 {
            engine
                .world_mut()
                .add_rectangle_body(RectangleBodyDesc::new(100.0, 100.0, 20.0, 20.0, BodyKind::Dynamic))?;
        }
        Ok(())
    }

    fn cleanup(&mut self, _engine: &mut Engine<B>) {
        self.cleaned_up = true;
    }
}

fn scripted_engine(
    events: ScriptedEventSource,
    input: InputConfig,
) -> (Engine<ScriptedBackend>, Rc<Cell<u64>>, RecordingPresenter) {
    let (world, steps) = scripted_world(|_| {});
    let frames = RecordingPresenter::new();
    let engine = Engine::new(
        SimulationDriver::new(world),
        InputRouter::new(input),
        Box::new(events),
        Box::new(frames.handle()),
        Box::new(ManualClock::new()),
    );
    (engine, steps, frames)
}

#[test]
fn test_quit_stops_stepping() {
    let events = ScriptedEventSource::new()
        .with_event_at(3, InputEvent::Quit)
        .with_event_at(3, InputEvent::PointerDown { x: 50.0, y: 50.0 })
        .with_event_at(6, InputEvent::PointerDown { x: 60.0, y: 60.0 });
    let (engine, steps, frames) = scripted_engine(events, InputConfig::default());
    let mut app = DemoScene::default();

    let summary = engine.with_frame_limit(100).run(&mut app).unwrap();

    assert_eq!(steps.get(), 3);
    assert_eq!(summary.steps, 3);
    assert_eq!(summary.frames, 3);
    assert_eq!(summary.bodies, 2);
    assert_eq!(frames.frame_count(), 3);
    assert!(app.cleaned_up);
}

#[test]
fn test_escape_quits_and_pointer_spawns() {
    let events = ScriptedEventSource::new()
        .with_event_at(1, InputEvent::PointerDown { x: 200.0, y: 40.0 })
        .with_event_at(2, InputEvent::KeyDown(KeyCode::Space))
        .with_event_at(4, InputEvent::KeyDown(KeyCode::Escape));
    let (engine, steps, frames) = scripted_engine(events, InputConfig::default());

    let summary = engine.run(&mut DemoScene::default()).unwrap();

    assert_eq!(steps.get(), 4);
    assert_eq!(summary.bodies, 3);
    let frames = frames.frames();
    assert_eq!(frames[0].len(), 2);
    assert_eq!(frames[1].len(), 3);
    assert_eq!(frames[3].len(), 3);
    // Each frame is captured after its step
    assert_relative_eq!(frames[1].bodies()[2].center.y, 40.0 + 9.81 * 20.0 / 30.0, epsilon = 1e-3);
}

#[test]
fn test_first_frame_click_lands_after_scene_box() {
    let events = ScriptedEventSource::new()
        .with_event_at(0, InputEvent::PointerDown { x: 500.0, y: 20.0 })
        .with_event_at(1, InputEvent::Quit);
    let (engine, _, frames) = scripted_engine(events, InputConfig::default());

    engine.run(&mut DemoScene::default()).unwrap();

    let recorded = frames.frames();
    let first = &recorded[0];
    assert_eq!(first.len(), 3);
    assert_relative_eq!(first.bodies()[1].center.x, 100.0, epsilon = 1e-3);
    assert_relative_eq!(first.bodies()[2].center.x, 500.0, epsilon = 1e-3);
}

#[test]
fn test_invalid_spawn_does_not_end_run() {
    let events = ScriptedEventSource::new()
        .with_event_at(0, InputEvent::PointerDown { x: 10.0, y: 10.0 })
        .with_event_at(2, InputEvent::Quit);
    let input = InputConfig {
        spawn_height: -1.0,
        ..InputConfig::default()
    };
    let (engine, steps, _) = scripted_engine(events, input);

    let summary = engine.run(&mut DemoScene::default()).unwrap();

    assert_eq!(steps.get(), 2);
    assert_eq!(summary.bodies, 2);
}

#[test]
fn test_fault_ends_run_with_error() {
    let (world, steps) = scripted_world(|backend| backend.fail_on_step = Some(2));
    let engine = Engine::new(
        SimulationDriver::new(world),
        InputRouter::default(),
        Box::new(ScriptedEventSource::new()),
        Box::new(RecordingPresenter::new()),
        Box::new(ManualClock::new()),
    )
    .with_frame_limit(10);

    let result = engine.run(&mut DemoScene::default());

    assert!(matches!(
        result,
        Err(crate::engine::EngineError::Physics(PhysicsError::SimulationFault(_)))
    ));
    assert_eq!(steps.get(), 2);
}

#[test]
fn test_frame_limit_ends_run() {
    let (engine, steps, frames) = scripted_engine(ScriptedEventSource::new(), InputConfig::default());
    let summary = engine.with_frame_limit(5).run(&mut DemoScene::default()).unwrap();

    assert_eq!(summary.frames, 5);
    assert_eq!(steps.get(), 5);
    assert_eq!(frames.frames().last().map(Snapshot::frame), Some(4));
}
