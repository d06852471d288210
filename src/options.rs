//! Launch arguments, parsed once at start-up.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    pub no_vsync: bool,
    pub no_background: bool,
    /// Backend name tried before the default preference order.
    pub renderer: Option<String>,
}

impl LaunchOptions {
    /// Parses arguments without the program name. Flags count wherever they
    /// appear; only the first `--renderer` takes a value.
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let has = |flag: &str| args.iter().any(|arg| arg == flag);

        let renderer_at = args.iter().position(|arg| arg == "--renderer");
        let renderer = match renderer_at.map(|at| args.get(at + 1)) {
            Some(Some(name)) if !name.starts_with("--") => Some(name.clone()),
            Some(_) => {
                log::warn!("`--renderer` given without a backend name, ignoring");
                None
            }
            None => None,
        };

        for (at, arg) in args.iter().enumerate() {
            let known = matches!(arg.as_str(), "--no-vsync" | "--no-background" | "--renderer");
            let renderer_value = renderer.is_some() && renderer_at.map(|r| r + 1) == Some(at);
            if !known && !renderer_value {
                log::debug!("ignoring unknown argument `{arg}`");
            }
        }

        Self {
            no_vsync: has("--no-vsync"),
            no_background: has("--no-background"),
            renderer,
        }
    }
}
