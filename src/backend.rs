//! Start-up choice of the rendering backend.

pub const DEFAULT_PREFERENCE: [&str; 7] = [
    "direct3d12",
    "direct3d11",
    "direct3d",
    "opengl",
    "opengles2",
    "opengles",
    "software",
];

/// Backends with this prefix cannot present asynchronously.
const OPENGL_PREFIX: &str = "opengl";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendSelection {
    /// Index into the available backend list, `-1` when nothing matched.
    pub index: i32,
    pub name: String,
    pub allow_async_flip: bool,
}

impl BackendSelection {
    pub fn none() -> Self {
        Self {
            index: -1,
            name: "none".to_owned(),
            allow_async_flip: true,
        }
    }

    pub fn is_selected(&self) -> bool {
        self.index >= 0
    }
}

/// Default preference order, with `requested` tried first when given.
pub fn preference_order(requested: Option<&str>) -> Vec<&str> {
    requested
        .into_iter()
        .chain(DEFAULT_PREFERENCE.iter().copied())
        .collect()
}

/// Picks the first preferred backend that is available.
pub fn select<S: AsRef<str>>(available: &[S], requested: Option<&str>) -> BackendSelection {
    for preferred in preference_order(requested) {
        let Some(index) = available.iter().position(|name| name.as_ref() == preferred) else {
            continue;
        };

        return BackendSelection {
            index: index as i32,
            name: preferred.to_owned(),
            allow_async_flip: !preferred.starts_with(OPENGL_PREFIX),
        };
    }

    BackendSelection::none()
}
