//! PDFium renderer via `pdfium-render`.

use std::sync::OnceLock;

use pdfium_render::prelude::*;

use crate::{
    raster_size, Bitmap, Invocation, PageRenderer, RenderError, RenderedPage, SOURCE_BYTES_PER_PIXEL,
};

/// PDFium may only be initialised once per process; every renderer shares it.
///
/// The outcome of the first bind is kept, so a missing library is not retried.
static PDFIUM: OnceLock<Result<Pdfium, String>> = OnceLock::new();

/// Binds the PDFium shared library.
///
/// Search order:
/// 1. Executable's directory
/// 2. Current working directory
/// 3. System library paths
fn bind_library() -> Result<Pdfium, PdfiumError> {
    let exe_dir = std::env::current_exe().ok().and_then(|p| p.parent().map(|p| p.to_path_buf()));

    if let Some(ref dir) = exe_dir {
        if let Ok(bindings) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
        {
            return Ok(Pdfium::new(bindings));
        }
    }

    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())?;
    Ok(Pdfium::new(bindings))
}

fn shared_pdfium() -> Result<&'static Pdfium, RenderError> {
    PDFIUM
        .get_or_init(|| {
            bind_library().map_err(|err| format!("failed to bind pdfium library: {err}"))
        })
        .as_ref()
        .map_err(|err| RenderError::Backend(err.clone()))
}

pub struct PdfiumRenderer {
    pdfium: &'static Pdfium,
    width: u32,
    height: u32,
    stride: usize,
    page_count: u32,
    buffer: Vec<u8>,
}

impl PdfiumRenderer {
    pub fn bind() -> Result<Self, RenderError> {
        Ok(Self {
            pdfium: shared_pdfium()?,
            width: 0,
            height: 0,
            stride: 0,
            page_count: 0,
            buffer: Vec::new(),
        })
    }

    fn backend(err: PdfiumError) -> RenderError {
        RenderError::Backend(err.to_string())
    }
}

impl PageRenderer for PdfiumRenderer {
    fn name(&self) -> &'static str {
        "pdfium"
    }

    fn run(&mut self, args: &[String]) -> Result<RenderedPage<'_>, RenderError> {
        let invocation = Invocation::parse(args)?;
        let document =
            self.pdfium.load_pdf_from_file(&invocation.file, None).map_err(Self::backend)?;

        let pages = document.pages();
        let page_count = u32::from(pages.len());
        let index = u16::try_from(invocation.page)
            .ok()
            .filter(|index| *index < pages.len())
            .ok_or(RenderError::PageOutOfRange { page: invocation.page, page_count })?;
        let page = pages.get(index).map_err(Self::backend)?;

        let scale = invocation.scale.unwrap_or(1.0);
        let (width, height) = raster_size(page.width().value, page.height().value, scale)?;

        // Within the raster cap both sides fit in i32.
        let config = PdfRenderConfig::new()
            .set_target_width(width as i32)
            .set_target_height(height as i32)
            .set_clear_color(PdfColor::WHITE);

        let bitmap = page.render_with_config(&config).map_err(Self::backend)?;
        let bytes = bitmap.as_raw_bytes().to_vec();
        let width = bitmap.width() as u32;
        let height = bitmap.height() as u32;
        let stride = if height == 0 {
            width as usize * SOURCE_BYTES_PER_PIXEL
        } else {
            bytes.len() / height as usize
        };

        log::debug!(
            "{}: page {}/{} of {} at {width}x{height}, stride {stride}",
            self.name(),
            invocation.page,
            page_count,
            invocation.file.display()
        );

        self.buffer = bytes;
        self.width = width;
        self.height = height;
        self.stride = stride;
        self.page_count = page_count;

        Ok(RenderedPage {
            bitmap: Bitmap {
                width: self.width,
                height: self.height,
                stride: self.stride,
                data: &self.buffer,
            },
            page_count: self.page_count,
        })
    }
}
