use glam::Vec2;

pub const BACKGROUND_ENV: &str = "CIRCLE_DROP_BACKGROUND";
pub const FONT_ENV: &str = "CIRCLE_DROP_FONT";

/// Static floor segment: two endpoints and a thickness (capsule radius).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloorConfig {
    pub a: Vec2,
    pub b: Vec2,
    pub radius: f32,
    pub elasticity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub window_size: (u32, u32),
    pub title: String,
    pub background_path: String,
    pub font_path: String,
    pub font_size: u32,
    pub gravity: Vec2,
    pub floor: FloorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_size: (1152, 864),
            title: "Circle Drop".to_owned(),
            background_path: "background.png".to_owned(),
            font_path: "segoeuib.ttf".to_owned(),
            font_size: 48,
            gravity: Vec2::new(0.0, 1750.0),
            floor: FloorConfig {
                a: Vec2::new(100.0, 800.0),
                b: Vec2::new(1052.0, 800.0),
                radius: 20.0,
                elasticity: 0.8,
            },
        }
    }
}

impl AppConfig {
    /// Defaults with resource paths overridden from the environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(BACKGROUND_ENV) {
            self.background_path = path;
        }
        if let Some(path) = lookup(FONT_ENV) {
            self.font_path = path;
        }
    }

    pub fn window_title(&self, backend: &str) -> String {
        format!("{} ({backend})", self.title)
    }
}
