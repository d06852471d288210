use thiserror::Error;

/// Failures raised while acquiring the window, renderer or physics resources.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to create the window")]
    Window,

    #[error("failed to load font `{0}`")]
    Font(String),

    #[error("failed to load texture `{0}`")]
    Texture(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("start-up failed: {0}")]
    Startup(#[from] StartupError),

    /// A draw or present call failed; the renderer cannot continue.
    #[error("renderer failed: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, Error>;
