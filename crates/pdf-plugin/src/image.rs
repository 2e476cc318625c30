use std::path::{Path, PathBuf};

use pagetex_db::{
    AllocationMode, BoxError, DataType, Image, ImageError, Origin, PagedImage, PixelFormat,
};
use pagetex_engine::{bgrx_to_rgb, BitmapError, Invocation, PageRenderer, RenderError};

#[derive(Debug, thiserror::Error)]
pub enum PdfImageError {
    #[error("no file is open")]
    NotOpen,
    #[error("{renderer} produced no page {page} (status {status})")]
    Render {
        renderer: &'static str,
        page: u32,
        status: i32,
        #[source]
        source: RenderError,
    },
    #[error("renderer returned an unusable bitmap for page {page}")]
    Bitmap {
        page: u32,
        #[source]
        source: BitmapError,
    },
    #[error(transparent)]
    Image(#[from] ImageError),
}

/// One page of one PDF file, held as a packed RGB image.
///
/// Owns its renderer; the renderer is released when the image is dropped.
pub struct PdfImage {
    renderer: Box<dyn PageRenderer>,
    file_name: Option<PathBuf>,
    scale: Option<f32>,
    page_count: u32,
    current_page: u32,
    image: Image,
}

impl PdfImage {
    pub fn new(renderer: Box<dyn PageRenderer>) -> Self {
        Self {
            renderer,
            file_name: None,
            scale: None,
            page_count: 0,
            current_page: 0,
            image: Image::new(),
        }
    }

    /// Renders pages at `scale` times their size in points.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Records `path` and rasterizes its first page.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<(), PdfImageError> {
        self.file_name = Some(path.as_ref().to_path_buf());
        self.page_count = 0;
        self.rasterize(0)
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Rasterizes page `index` of the open file.
    ///
    /// Nothing is changed unless the whole page converts.
    pub fn rasterize(&mut self, index: u32) -> Result<(), PdfImageError> {
        let file = self.file_name.as_ref().ok_or(PdfImageError::NotOpen)?;
        let mut invocation = Invocation::new(file, index);
        invocation.scale = self.scale;
        let args = invocation.to_args();

        let renderer_name = self.renderer.name();
        let rendered = self.renderer.run(&args).map_err(|source| PdfImageError::Render {
            renderer: renderer_name,
            page: index,
            status: source.status(),
            source,
        })?;

        let bitmap = rendered.bitmap;
        let (width, height) = (bitmap.width, bitmap.height);
        let page_count = rendered.page_count;
        let rgb = bgrx_to_rgb(&bitmap)
            .map_err(|source| PdfImageError::Bitmap { page: index, source })?;

        log::debug!(
            "rasterized page {index}/{page_count} at {width}x{height} (stride {})",
            bitmap.stride
        );

        self.image.set_image(
            width,
            height,
            1,
            PixelFormat::Rgb,
            PixelFormat::Rgb,
            DataType::UnsignedByte,
            rgb,
            AllocationMode::NoDelete,
        )?;
        self.image.set_origin(Origin::TopLeft);
        self.page_count = page_count;
        self.current_page = index;
        Ok(())
    }
}

impl PagedImage for PdfImage {
    fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn current_page(&self) -> u32 {
        self.current_page
    }

    fn page(&mut self, index: u32) -> Result<(), BoxError> {
        Ok(self.rasterize(index)?)
    }

    fn image(&self) -> &Image {
        &self.image
    }
}

impl std::fmt::Debug for PdfImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfImage")
            .field("renderer", &self.renderer.name())
            .field("file_name", &self.file_name)
            .field("page", &self.current_page)
            .field("page_count", &self.page_count)
            .finish()
    }
}
