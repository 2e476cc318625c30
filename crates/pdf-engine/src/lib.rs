//! Page rasterization contract shared by the PDF backends.
//!
//! A renderer is driven like a command-line tool: it receives an argument
//! list built by [`Invocation`], renders a single page and exposes the
//! resulting 4-byte-per-pixel B,G,R,x bitmap until the next run.

mod bitmap;
#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;
mod invocation;
mod lopdf_backend;
#[cfg(feature = "pdfium")]
pub mod pdfium_backend;

pub use bitmap::{
    bgrx_to_rgb, Bitmap, BitmapError, RenderedPage, RGB_BYTES_PER_PIXEL, SOURCE_BYTES_PER_PIXEL,
};
pub use invocation::{Invocation, PROGRAM_PLACEHOLDER};
pub use lopdf_backend::LopdfRenderer;

/// Status reported by a renderer run that produced no page.
pub const STATUS_NO_OUTPUT: i32 = 1;

/// Largest page raster a backend allocates, in pixels.
pub const MAX_RASTER_PIXELS: u64 = 1 << 26;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF parse error: {0}")]
    Parse(#[from] lopdf::Error),
    #[error("encrypted PDFs are not supported by the outline backend")]
    EncryptedUnsupported,
    #[error("page {page} out of range (page_count={page_count})")]
    PageOutOfRange { page: u32, page_count: u32 },
    #[error("raster {width}x{height} exceeds {limit} pixels")]
    RasterTooLarge { width: u32, height: u32, limit: u64 },
    #[error("backend error: {0}")]
    Backend(String),
}

impl RenderError {
    /// Raw status code in the renderer's own convention.
    ///
    /// Every failure the bundled backends report means no page was produced.
    pub fn status(&self) -> i32 {
        STATUS_NO_OUTPUT
    }
}

/// Pixel size of a `width_pt` x `height_pt` page rendered at `scale`.
///
/// Each side is at least one pixel. Rasters above [`MAX_RASTER_PIXELS`] are
/// rejected before anything is allocated.
pub fn raster_size(width_pt: f32, height_pt: f32, scale: f32) -> Result<(u32, u32), RenderError> {
    let side = |pt: f32| (pt * scale).round().max(1.0).min(u32::MAX as f32) as u32;
    let (width, height) = (side(width_pt), side(height_pt));

    if u64::from(width) * u64::from(height) > MAX_RASTER_PIXELS {
        return Err(RenderError::RasterTooLarge { width, height, limit: MAX_RASTER_PIXELS });
    }

    Ok((width, height))
}

/// A synchronous single-page rasterizer.
pub trait PageRenderer {
    /// Short backend name used in log output.
    fn name(&self) -> &'static str;

    /// Renders the page selected by `args` (see [`Invocation::to_args`]).
    ///
    /// The returned page borrows the renderer's retained bitmap.
    fn run(&mut self, args: &[String]) -> Result<RenderedPage<'_>, RenderError>;
}

/// Picks the best renderer available in this build.
///
/// With the `pdfium` feature the PDFium library is tried first; when it
/// cannot be bound the outline backend is used instead.
pub fn default_renderer() -> Box<dyn PageRenderer> {
    #[cfg(feature = "pdfium")]
    match pdfium_backend::PdfiumRenderer::bind() {
        Ok(renderer) => return Box::new(renderer),
        Err(err) => log::warn!("falling back to outline renderer: {err}"),
    }

    Box::new(LopdfRenderer::new())
}
