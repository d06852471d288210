use rand::Rng;
use sfml::graphics::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeInfo {
    pub radius: u32,
    pub color: Color,
}

impl ShapeInfo {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            radius: rng.gen_range(5..=100),
            color: Color::rgb(
                rng.gen_range(0..=255),
                rng.gen_range(0..=255),
                rng.gen_range(0..=255),
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub mass: f32,
    pub elasticity: f32,
    pub friction: f32,
}

impl Material {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            mass: rng.gen_range(0.2..1.75),
            elasticity: rng.gen_range(0.0..1.2),
            friction: rng.gen_range(0.0..2.0),
        }
    }
}
