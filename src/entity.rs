//! Circles dropped into the world and their per-frame lifecycle.

use glam::Vec2;
use rand::Rng;
use sfml::graphics::Color;

use crate::components::{Material, ShapeInfo};
use crate::error::Result;
use crate::platform::Canvas;
use crate::world::{CircleDesc, CircleHandle, World};

/// Below this height a circle is gone for good.
pub const FALL_THROUGH_Y: f32 = 1000.0;
pub const TOP_Y: f32 = -1000.0;
pub const LEFT_X: f32 = -1000.0;
pub const RIGHT_X: f32 = 1252.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fate {
    Removed,
    /// Out of view but still simulated.
    Skipped,
    Drawn,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    pub shape: ShapeInfo,
    pub material: Material,
    pub handle: CircleHandle,
}

impl Circle {
    /// Creates a random circle at `(x, y)`, registers it in `world` and
    /// appends it to `circles`.
    pub fn spawn<'a>(
        world: &mut World,
        circles: &'a mut Vec<Circle>,
        rng: &mut impl Rng,
        x: f32,
        y: f32,
    ) -> &'a Circle {
        let material = Material::random(rng);
        let shape = ShapeInfo::random(rng);

        let handle = world.add_circle(&CircleDesc {
            position: Vec2::new(x, y),
            radius: shape.radius as f32,
            mass: material.mass,
            elasticity: material.elasticity,
            friction: material.friction,
        });

        circles.push(Circle {
            shape,
            material,
            handle,
        });
        &circles[circles.len() - 1]
    }

    pub fn fate_at(position: Vec2) -> Fate {
        if position.y > FALL_THROUGH_Y {
            Fate::Removed
        } else if position.y < TOP_Y || position.x < LEFT_X || position.x > RIGHT_X {
            Fate::Skipped
        } else {
            Fate::Drawn
        }
    }

    pub fn color(&self) -> Color {
        Color::rgba(self.shape.color.r, self.shape.color.g, self.shape.color.b, 255)
    }

    /// Handles the circle at `index` for this frame and returns how far the
    /// caller should advance: 0 when the circle removed itself (the next one
    /// has moved into `index`), 1 otherwise.
    pub fn draw(
        index: usize,
        circles: &mut Vec<Circle>,
        world: &mut World,
        canvas: &mut impl Canvas,
    ) -> Result<(usize, Fate)> {
        let circle = &circles[index];
        // a circle without a body has nothing left to simulate
        let position = world
            .position(circle.handle)
            .unwrap_or(Vec2::new(0.0, f32::INFINITY));

        match Self::fate_at(position) {
            Fate::Removed => {
                let circle = circles.remove(index);
                world.remove_circle(circle.handle);
                log::debug!("circle fell through at {position}");
                Ok((0, Fate::Removed))
            }
            Fate::Skipped => Ok((1, Fate::Skipped)),
            Fate::Drawn => {
                canvas.fill_circle(position, circle.shape.radius as f32, circle.color())?;
                Ok((1, Fate::Drawn))
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub drawn: usize,
    pub skipped: usize,
    pub removed: usize,
}

impl FrameReport {
    pub fn total(&self) -> usize {
        self.drawn + self.skipped + self.removed
    }
}

/// Single forward pass over `circles`, removing fallen ones in place.
pub fn draw_all(
    circles: &mut Vec<Circle>,
    world: &mut World,
    canvas: &mut impl Canvas,
) -> Result<FrameReport> {
    let mut report = FrameReport::default();
    let mut i = 0;

    while i < circles.len() {
        let (step, fate) = Circle::draw(i, circles, world, canvas)?;
        match fate {
            Fate::Removed => report.removed += 1,
            Fate::Skipped => report.skipped += 1,
            Fate::Drawn => report.drawn += 1,
        }
        i += step;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::platform::tests::{DrawCall, FakePlatform};

    fn world() -> World {
        World::new(Vec2::ZERO)
    }

    #[test]
    fn fate_depends_on_position_only() {
        assert_eq!(Circle::fate_at(Vec2::new(500.0, 1000.5)), Fate::Removed);
        assert_eq!(Circle::fate_at(Vec2::new(-5000.0, 2000.0)), Fate::Removed);
        assert_eq!(Circle::fate_at(Vec2::new(500.0, 1000.0)), Fate::Drawn);
        assert_eq!(Circle::fate_at(Vec2::new(500.0, -1000.5)), Fate::Skipped);
        assert_eq!(Circle::fate_at(Vec2::new(-1000.5, 0.0)), Fate::Skipped);
        assert_eq!(Circle::fate_at(Vec2::new(1252.5, 0.0)), Fate::Skipped);
        assert_eq!(Circle::fate_at(Vec2::new(1252.0, -1000.0)), Fate::Drawn);
        assert_eq!(Circle::fate_at(Vec2::new(-1000.0, 0.0)), Fate::Drawn);
    }

    #[test]
    fn spawn_registers_and_appends() {
        let mut world = world();
        let mut circles = Vec::new();
        let mut rng = StdRng::seed_from_u64(1);

        let circle = Circle::spawn(&mut world, &mut circles, &mut rng, 12.0, 34.0).clone();

        assert_eq!(circles, vec![circle.clone()]);
        assert!(world.contains(circle.handle));
        assert_eq!(world.position(circle.handle), Some(Vec2::new(12.0, 34.0)));
        assert!((5..=100).contains(&circle.shape.radius));
    }

    #[test]
    fn visible_circle_is_drawn_opaque() {
        let mut world = world();
        let mut circles = Vec::new();
        let mut rng = StdRng::seed_from_u64(2);
        let circle = Circle::spawn(&mut world, &mut circles, &mut rng, 300.0, 200.0).clone();
        let mut canvas = FakePlatform::default();

        let report = draw_all(&mut circles, &mut world, &mut canvas).unwrap();

        assert_eq!(report.drawn, 1);
        assert_eq!(
            canvas.calls,
            vec![DrawCall::Circle {
                center: Vec2::new(300.0, 200.0),
                radius: circle.shape.radius as f32,
                color: Color::rgba(
                    circle.shape.color.r,
                    circle.shape.color.g,
                    circle.shape.color.b,
                    255
                ),
            }]
        );
    }

    #[test]
    fn compaction_visits_every_circle_once() {
        let mut world = world();
        let mut circles = Vec::new();
        let mut rng = StdRng::seed_from_u64(3);

        // removed, removed, drawn, skipped, removed, drawn
        for (x, y) in [
            (0.0, 1500.0),
            (10.0, 1200.0),
            (20.0, 100.0),
            (-2000.0, 100.0),
            (30.0, 1001.0),
            (40.0, 0.0),
        ] {
            Circle::spawn(&mut world, &mut circles, &mut rng, x, y);
        }
        let kept: Vec<_> = [2, 3, 5].iter().map(|&i| circles[i].handle).collect();
        let mut canvas = FakePlatform::default();

        let report = draw_all(&mut circles, &mut world, &mut canvas).unwrap();

        assert_eq!(
            report,
            FrameReport {
                drawn: 2,
                skipped: 1,
                removed: 3
            }
        );
        assert_eq!(report.total(), 6);
        assert_eq!(circles.iter().map(|c| c.handle).collect::<Vec<_>>(), kept);
        assert_eq!(world.body_count(), 3);
        assert_eq!(world.collider_count(), 3);
        assert_eq!(canvas.circles(), 2);
    }

    #[test]
    fn removal_deregisters_body_and_collider() {
        let mut world = world();
        let mut circles = Vec::new();
        let mut rng = StdRng::seed_from_u64(4);
        let handle = Circle::spawn(&mut world, &mut circles, &mut rng, 0.0, 1000.1).handle;
        let mut canvas = FakePlatform::default();

        let (step, fate) = Circle::draw(0, &mut circles, &mut world, &mut canvas).unwrap();

        assert_eq!((step, fate), (0, Fate::Removed));
        assert!(circles.is_empty());
        assert!(!world.contains(handle));
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.collider_count(), 0);
        assert!(canvas.calls.is_empty());
    }

    #[test]
    fn skipped_circle_stays_simulated() {
        let mut world = world();
        let mut circles = Vec::new();
        let mut rng = StdRng::seed_from_u64(5);
        let handle = Circle::spawn(&mut world, &mut circles, &mut rng, 5000.0, 0.0).handle;
        let mut canvas = FakePlatform::default();

        let report = draw_all(&mut circles, &mut world, &mut canvas).unwrap();

        assert_eq!(report.skipped, 1);
        assert_eq!(circles.len(), 1);
        assert!(world.contains(handle));
        assert!(canvas.calls.is_empty());
    }
}
