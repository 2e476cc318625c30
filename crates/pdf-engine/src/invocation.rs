use std::path::PathBuf;

use crate::RenderError;

/// First argument of every invocation, standing in for the program path.
pub const PROGRAM_PLACEHOLDER: &str = "executable path";

/// One page request, expressed as the argument list a renderer consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub page: u32,
    pub scale: Option<f32>,
    pub file: PathBuf,
}

impl Invocation {
    pub fn new(file: impl Into<PathBuf>, page: u32) -> Self {
        Self { page, scale: None, file: file.into() }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    /// `[placeholder, --pages=<N>, (--scale=<F>), file]`
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(4);
        args.push(PROGRAM_PLACEHOLDER.to_owned());
        args.push(format!("--pages={}", self.page));
        if let Some(scale) = self.scale {
            args.push(format!("--scale={scale}"));
        }
        args.push(self.file.to_string_lossy().into_owned());
        args
    }

    /// Parses an argument list produced by [`Invocation::to_args`].
    ///
    /// The first argument is the program placeholder and is ignored.
    pub fn parse(args: &[String]) -> Result<Self, RenderError> {
        let mut page = 0;
        let mut scale = None;
        let mut file: Option<PathBuf> = None;

        for arg in args.iter().skip(1) {
            if let Some(value) = arg.strip_prefix("--pages=") {
                page = value.parse::<u32>().map_err(|_| {
                    RenderError::InvalidArguments(format!("bad page selector: {arg}"))
                })?;
            } else if let Some(value) = arg.strip_prefix("--scale=") {
                let parsed = value
                    .parse::<f32>()
                    .ok()
                    .filter(|scale| scale.is_finite() && *scale > 0.0)
                    .ok_or_else(|| RenderError::InvalidArguments(format!("bad scale: {arg}")))?;
                scale = Some(parsed);
            } else if arg.starts_with("--") {
                return Err(RenderError::InvalidArguments(format!("unknown flag: {arg}")));
            } else if file.is_some() {
                return Err(RenderError::InvalidArguments(format!(
                    "only one file may be rendered per run, got extra {arg}"
                )));
            } else {
                file = Some(PathBuf::from(arg));
            }
        }

        let file = file.ok_or_else(|| RenderError::InvalidArguments("no file given".to_owned()))?;

        Ok(Self { page, scale, file })
    }
}
