//! Frame loop: input polling, physics stepping and rendering.

use glam::Vec2;
use rand::rngs::StdRng;
use sfml::graphics::{Color, FloatRect};

use crate::backend::BackendSelection;
use crate::clock::{Clock, Counter, MonotonicCounter};
use crate::config::{AppConfig, FloorConfig};
use crate::entity::{Circle, FrameReport, draw_all};
use crate::error::Result;
use crate::options::LaunchOptions;
use crate::platform::{InputEvent, Platform, PresentMode};
use crate::world::World;

const CLEAR_COLOR: Color = Color::BLACK;
const FLOOR_COLOR: Color = Color::RED;
const FPS_COLOR: Color = Color::CYAN;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoopState {
    Polling,
    Handling(InputEvent),
    Rendering,
    Terminated,
}

/// Screen rectangle covering the top half of the floor segment.
pub fn floor_rect(floor: &FloorConfig) -> FloatRect {
    FloatRect::new(
        floor.a.x,
        floor.a.y - floor.radius,
        floor.b.x - floor.a.x,
        floor.radius,
    )
}

pub struct App<P: Platform, C: Counter = MonotonicCounter> {
    platform: P,
    world: World,
    circles: Vec<Circle>,
    clock: Clock<C>,
    rng: StdRng,
    floor_rect: FloatRect,
    show_background: bool,
    allow_async_flip: bool,
    state: LoopState,
    frames: u64,
}

impl<P: Platform, C: Counter> App<P, C> {
    pub fn new(
        platform: P,
        config: &AppConfig,
        options: &LaunchOptions,
        backend: &BackendSelection,
        clock: Clock<C>,
        rng: StdRng,
    ) -> Self {
        let mut world = World::new(config.gravity);
        world.set_floor(&config.floor);

        Self {
            platform,
            world,
            circles: Vec::new(),
            clock,
            rng,
            floor_rect: floor_rect(&config.floor),
            show_background: !options.no_background,
            allow_async_flip: backend.allow_async_flip,
            state: LoopState::Polling,
            frames: 0,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[cfg(test)]
    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    #[cfg(test)]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub fn platform(&self) -> &P {
        &self.platform
    }

    #[cfg(test)]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn present_mode(&self) -> PresentMode {
        if self.allow_async_flip {
            PresentMode::Async
        } else {
            PresentMode::Sync
        }
    }

    /// Runs until a quit event is handled.
    pub fn run(&mut self) -> Result<()> {
        while self.advance()? != LoopState::Terminated {}
        Ok(())
    }

    /// Performs the work of the current state and moves to the next one.
    pub fn advance(&mut self) -> Result<LoopState> {
        self.state = match self.state {
            LoopState::Polling => match self.platform.poll_event() {
                Some(event) => LoopState::Handling(event),
                None => LoopState::Rendering,
            },
            LoopState::Handling(event) => self.handle(event),
            LoopState::Rendering => {
                self.render()?;
                LoopState::Polling
            }
            LoopState::Terminated => LoopState::Terminated,
        };

        Ok(self.state)
    }

    fn handle(&mut self, event: InputEvent) -> LoopState {
        match event {
            InputEvent::MouseDown { x, y } => {
                let circle =
                    Circle::spawn(&mut self.world, &mut self.circles, &mut self.rng, x, y);
                log::debug!(
                    "spawned circle at ({x}, {y}), radius {}, mass {:.2}",
                    circle.shape.radius,
                    circle.material.mass
                );
                LoopState::Polling
            }
            InputEvent::Quit => {
                self.shutdown();
                LoopState::Terminated
            }
            InputEvent::Other => LoopState::Polling,
        }
    }

    fn render(&mut self) -> Result<FrameReport> {
        let dt = self.clock.tick();
        self.world.step(dt);

        if self.show_background {
            self.platform.draw_background()?;
        } else {
            self.platform.clear(CLEAR_COLOR)?;
        }

        let report = draw_all(&mut self.circles, &mut self.world, &mut self.platform)?;

        self.platform.fill_rect(self.floor_rect, FLOOR_COLOR)?;
        self.platform.draw_text(
            &format!("FPS: {}", self.clock.get_fps()),
            Vec2::ZERO,
            FPS_COLOR,
        )?;
        self.platform.present(self.present_mode())?;

        self.frames += 1;
        log::trace!(
            "frame {}: dt {dt:.4}s, visited {}, drawn {}, skipped {}, removed {}",
            self.frames,
            report.total(),
            report.drawn,
            report.skipped,
            report.removed
        );

        Ok(report)
    }

    /// Releases every physics object, then the platform.
    fn shutdown(&mut self) {
        let alive = self.circles.len();
        log::debug!(
            "releasing {} bodies and {} colliders",
            self.world.body_count(),
            self.world.collider_count()
        );
        for circle in self.circles.drain(..) {
            self.world.remove_circle(circle.handle);
        }
        self.world.remove_floor();
        self.platform.shutdown();

        log::info!(
            "shut down after {} frames with {alive} circles alive",
            self.frames
        );
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::backend;
    use crate::clock::tests::ManualCounter;
    use crate::platform::tests::{DrawCall, FakePlatform};

    fn app_with(
        events: impl IntoIterator<Item = InputEvent>,
        options: &LaunchOptions,
        backend: &BackendSelection,
    ) -> (App<FakePlatform, ManualCounter>, ManualCounter) {
        let counter = ManualCounter::new(1_000);
        let app = App::new(
            FakePlatform::with_events(events),
            &AppConfig::default(),
            options,
            backend,
            Clock::new(counter.clone()),
            StdRng::seed_from_u64(42),
        );
        (app, counter)
    }

    fn opengl() -> BackendSelection {
        backend::select(&["opengl"], None)
    }

    #[test]
    fn floor_rect_matches_segment() {
        assert_eq!(
            floor_rect(&AppConfig::default().floor),
            FloatRect::new(100.0, 780.0, 952.0, 20.0)
        );
    }

    #[test]
    fn polls_until_empty_then_renders() {
        let (mut app, _) = app_with(
            [
                InputEvent::MouseDown { x: 10.0, y: 20.0 },
                InputEvent::Other,
            ],
            &LaunchOptions::default(),
            &opengl(),
        );

        assert_eq!(
            app.advance().unwrap(),
            LoopState::Handling(InputEvent::MouseDown { x: 10.0, y: 20.0 })
        );
        assert_eq!(app.advance().unwrap(), LoopState::Polling);
        assert_eq!(app.circles().len(), 1);
        assert_eq!(app.advance().unwrap(), LoopState::Handling(InputEvent::Other));
        assert_eq!(app.advance().unwrap(), LoopState::Polling);
        assert_eq!(app.advance().unwrap(), LoopState::Rendering);
        assert!(app.platform().calls.is_empty());
        assert_eq!(app.advance().unwrap(), LoopState::Polling);
        assert_eq!(app.frames(), 1);
    }

    #[test]
    fn frame_draws_in_order() {
        let (mut app, counter) = app_with(
            [InputEvent::MouseDown { x: 500.0, y: 100.0 }],
            &LaunchOptions::default(),
            &opengl(),
        );
        counter.set(20);

        for _ in 0..4 {
            app.advance().unwrap();
        }

        let calls = &app.platform().calls;
        assert_eq!(calls.len(), 5);
        assert_eq!(calls[0], DrawCall::Background);
        assert!(matches!(calls[1], DrawCall::Circle { .. }));
        assert_eq!(
            calls[2],
            DrawCall::Rect(FloatRect::new(100.0, 780.0, 952.0, 20.0), FLOOR_COLOR)
        );
        assert_eq!(calls[3], DrawCall::Text("FPS: 50".to_owned()));
        assert_eq!(calls[4], DrawCall::Present(PresentMode::Sync));
    }

    #[test]
    fn no_background_clears_and_async_backend_flips_async() {
        let options = LaunchOptions::parse(["--no-background"]);
        let (mut app, _) = app_with(Vec::new(), &options, &backend::select(&["software"], None));

        app.advance().unwrap();
        app.advance().unwrap();

        let calls = &app.platform().calls;
        assert_eq!(calls[0], DrawCall::Clear(CLEAR_COLOR));
        assert_eq!(calls.last(), Some(&DrawCall::Present(PresentMode::Async)));
    }

    #[test]
    fn quit_releases_everything_and_terminates() {
        let (mut app, _) = app_with(
            [
                InputEvent::MouseDown { x: 300.0, y: 100.0 },
                InputEvent::MouseDown { x: 600.0, y: 100.0 },
                InputEvent::Quit,
                InputEvent::MouseDown { x: 900.0, y: 100.0 },
            ],
            &LaunchOptions::default(),
            &opengl(),
        );

        app.run().unwrap();

        assert_eq!(app.state(), LoopState::Terminated);
        assert!(app.platform().shut_down);
        assert!(app.circles().is_empty());
        assert_eq!(app.world().body_count(), 0);
        assert_eq!(app.world().collider_count(), 0);
        assert_eq!(app.advance().unwrap(), LoopState::Terminated);
        assert_eq!(app.platform().events.len(), 1);
    }

    #[test]
    fn falling_circle_is_removed_with_its_body() {
        let (mut app, counter) = app_with(
            [
                InputEvent::MouseDown { x: 400.0, y: 100.0 },
                InputEvent::MouseDown { x: 700.0, y: 100.0 },
                // misses the floor
                InputEvent::MouseDown { x: -500.0, y: 100.0 },
            ],
            &LaunchOptions::default(),
            &opengl(),
        );

        while app.advance().unwrap() != LoopState::Rendering {}
        assert_eq!(app.circles().len(), 3);
        assert_eq!(app.world().body_count(), 3);

        let mut now = 0;
        for _ in 0..600 {
            now += 16;
            counter.set(now);
            app.advance().unwrap();
            app.advance().unwrap();
            if app.circles().len() < 3 {
                break;
            }
        }

        assert_eq!(app.circles().len(), 2);
        assert_eq!(app.world().body_count(), 2);
        assert_eq!(app.world().collider_count(), 3);
    }
}
