use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::StdRng;

mod app;
mod backend;
mod clock;
mod components;
mod config;
mod entity;
mod error;
mod options;
mod platform;
mod renderer;
mod world;

use app::App;
use clock::{Clock, MonotonicCounter};
use config::AppConfig;
use options::LaunchOptions;
use renderer::SfmlRenderer;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let options = LaunchOptions::parse(std::env::args().skip(1));
    let config = AppConfig::from_env();

    let backend = backend::select(
        &SfmlRenderer::available_backends(),
        options.renderer.as_deref(),
    );
    log::info!(
        "rendering backend `{}` (index {}), async flip {}",
        backend.name,
        backend.index,
        backend.allow_async_flip
    );

    let renderer =
        SfmlRenderer::open(&config, &backend, &options).context("failed to set up the renderer")?;

    let mut app = App::new(
        renderer,
        &config,
        &options,
        &backend,
        Clock::new(MonotonicCounter::new()),
        StdRng::from_entropy(),
    );
    log::info!("ready, click to drop circles");

    app.run().context("frame loop aborted")?;
    Ok(())
}
