//! SFML window and drawing primitives behind the [`Platform`] traits.

use glam::Vec2;
use sfml::cpp::FBox;
use sfml::graphics::*;
use sfml::system::Vector2i;
use sfml::window::*;

use crate::backend::BackendSelection;
use crate::config::AppConfig;
use crate::error::{Error, Result, StartupError};
use crate::options::LaunchOptions;
use crate::platform::{Canvas, EventSource, InputEvent, Platform, PresentMode};

pub struct SfmlRenderer {
    window: FBox<RenderWindow>,
    font: FBox<Font>,
    font_size: u32,
    background: Option<FBox<Texture>>,
    circle: CircleShape<'static>,
    rect: RectangleShape<'static>,
    /// Vertical sync requested at launch.
    vsync: bool,
    vsync_active: bool,
}

impl SfmlRenderer {
    /// SFML draws everything through an OpenGL context.
    pub fn available_backends() -> Vec<String> {
        vec!["opengl".to_owned()]
    }

    pub fn open(
        config: &AppConfig,
        backend: &BackendSelection,
        options: &LaunchOptions,
    ) -> Result<Self> {
        if !backend.is_selected() {
            log::warn!("no preferred rendering backend is available, using SFML's default context");
        }

        let (width, height) = config.window_size;
        let title = config.window_title(&backend.name);
        let mut window = RenderWindow::new(
            (width, height),
            title.as_str(),
            Style::CLOSE,
            &ContextSettings::default(),
        )
        .map_err(|_| StartupError::Window)?;

        let desktop = VideoMode::desktop_mode();
        window.set_position(Vector2i::new(
            (desktop.width.saturating_sub(width) / 2) as i32,
            (desktop.height.saturating_sub(height) / 2) as i32,
        ));

        let vsync = !options.no_vsync;
        window.set_vertical_sync_enabled(vsync);

        let mut font = Font::from_file(&config.font_path)
            .map_err(|_| StartupError::Font(config.font_path.clone()))?;
        font.set_smooth(true);

        let background = if options.no_background {
            None
        } else {
            let texture = Texture::from_file(&config.background_path)
                .map_err(|_| StartupError::Texture(config.background_path.clone()))?;
            Some(texture)
        };

        log::info!("opened {width}x{height} window, vsync {vsync}");

        Ok(Self {
            window,
            font,
            font_size: config.font_size,
            background,
            circle: CircleShape::new(0.0, 64),
            rect: RectangleShape::new(),
            vsync,
            vsync_active: vsync,
        })
    }

    fn ensure_open(&self) -> Result<()> {
        if self.window.is_open() {
            Ok(())
        } else {
            Err(Error::Runtime("window is closed".to_owned()))
        }
    }
}

impl Canvas for SfmlRenderer {
    fn clear(&mut self, color: Color) -> Result<()> {
        self.ensure_open()?;
        self.window.clear(color);
        Ok(())
    }

    fn draw_background(&mut self) -> Result<()> {
        self.ensure_open()?;

        let Some(texture) = &self.background else {
            self.window.clear(Color::BLACK);
            return Ok(());
        };

        let target = self.window.size();
        let source = texture.size();
        let mut sprite = Sprite::with_texture(texture);
        sprite.set_scale((
            target.x as f32 / source.x.max(1) as f32,
            target.y as f32 / source.y.max(1) as f32,
        ));

        self.window.draw(&sprite);
        Ok(())
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) -> Result<()> {
        self.ensure_open()?;

        self.circle.set_radius(radius);
        self.circle.set_origin((radius, radius));
        self.circle.set_position((center.x, center.y));
        self.circle.set_fill_color(color);

        self.window.draw(&self.circle);
        Ok(())
    }

    fn fill_rect(&mut self, rect: FloatRect, color: Color) -> Result<()> {
        self.ensure_open()?;

        self.rect.set_size((rect.width, rect.height));
        self.rect.set_position((rect.left, rect.top));
        self.rect.set_fill_color(color);

        self.window.draw(&self.rect);
        Ok(())
    }

    fn draw_text(&mut self, string: &str, position: Vec2, color: Color) -> Result<()> {
        self.ensure_open()?;

        let mut text = Text::new(string, &self.font, self.font_size);
        text.set_fill_color(color);

        // glyph bounds start below the line top; align the visible pixels instead
        let bounds = text.local_bounds();
        text.set_origin((bounds.left, bounds.top));
        text.set_position((position.x, position.y));

        self.window.draw(&text);
        Ok(())
    }

    fn present(&mut self, mode: PresentMode) -> Result<()> {
        self.ensure_open()?;

        // only "opengl" is available here, so backend selection always asks for Sync
        let vsync = self.vsync && mode == PresentMode::Sync;
        if vsync != self.vsync_active {
            self.window.set_vertical_sync_enabled(vsync);
            self.vsync_active = vsync;
        }

        self.window.display();
        Ok(())
    }
}

impl EventSource for SfmlRenderer {
    fn poll_event(&mut self) -> Option<InputEvent> {
        self.window.poll_event().map(|event| match event {
            Event::Closed => InputEvent::Quit,
            Event::MouseButtonPressed { x, y, .. } => InputEvent::MouseDown {
                x: x as f32,
                y: y as f32,
            },
            _ => InputEvent::Other,
        })
    }
}

impl Platform for SfmlRenderer {
    fn shutdown(&mut self) {
        self.window.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend;

    #[test]
    fn opengl_only_backend_presents_synchronously() {
        let selection = backend::select(&SfmlRenderer::available_backends(), None);

        assert_eq!(selection.name, "opengl");
        assert_eq!(selection.index, 0);
        assert!(!selection.allow_async_flip);
    }
}
