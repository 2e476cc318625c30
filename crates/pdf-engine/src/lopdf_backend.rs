//! Outline renderer built on `lopdf`.
//!
//! It does not interpret page content. Each page comes out as a white sheet
//! of the MediaBox size with a thin grey frame, which is enough to drive the
//! image pipeline when no PDFium library is installed.

use std::fs;
use std::path::Path;

use lopdf::Document;

use crate::{
    raster_size, Bitmap, Invocation, PageRenderer, RenderError, RenderedPage, MAX_RASTER_PIXELS,
    SOURCE_BYTES_PER_PIXEL,
};

const LETTER_PT: (f32, f32) = (612.0, 792.0);
const PAPER: [u8; 4] = [255, 255, 255, 255];
const FRAME: [u8; 4] = [220, 220, 220, 255];

#[derive(Debug, Clone, Copy, PartialEq)]
struct PageSize {
    width_pt: f32,
    height_pt: f32,
}

#[derive(Debug, Default)]
pub struct LopdfRenderer {
    width: u32,
    height: u32,
    page_count: u32,
    buffer: Vec<u8>,
}

impl LopdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn parse_sizes(bytes: &[u8]) -> Result<Vec<PageSize>, RenderError> {
        if bytes.windows("/Encrypt".len()).any(|window| window == b"/Encrypt") {
            return Err(RenderError::EncryptedUnsupported);
        }

        let doc = Document::load_mem(bytes)?;
        let pages = doc.get_pages();
        let mut sizes = Vec::with_capacity(pages.len());

        for (_, object_id) in pages {
            let dict = doc.get_dictionary(object_id)?;
            let size = dict
                .get(b"MediaBox")
                .ok()
                .and_then(|obj| obj.as_array().ok())
                .and_then(|array| {
                    if array.len() != 4 {
                        return None;
                    }
                    let x0 = array[0].as_float().ok()?;
                    let y0 = array[1].as_float().ok()?;
                    let x1 = array[2].as_float().ok()?;
                    let y1 = array[3].as_float().ok()?;
                    Some(PageSize { width_pt: (x1 - x0).abs(), height_pt: (y1 - y0).abs() })
                })
                .unwrap_or(PageSize { width_pt: LETTER_PT.0, height_pt: LETTER_PT.1 });

            sizes.push(size);
        }

        Ok(sizes)
    }

    fn paint(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        let too_large = || RenderError::RasterTooLarge { width, height, limit: MAX_RASTER_PIXELS };
        let stride = (width as usize)
            .checked_mul(SOURCE_BYTES_PER_PIXEL)
            .filter(|stride| *stride > 0)
            .ok_or_else(too_large)?;
        let len = stride.checked_mul(height as usize).ok_or_else(too_large)?;
        self.buffer.clear();
        self.buffer.resize(len, 0);

        let framed = width >= 4 && height >= 4;
        for (y, line) in self.buffer.chunks_exact_mut(stride).enumerate() {
            let edge_row = y == 0 || y + 1 == height as usize;
            for (x, pixel) in line.chunks_exact_mut(SOURCE_BYTES_PER_PIXEL).enumerate() {
                let edge = edge_row || x == 0 || x + 1 == width as usize;
                pixel.copy_from_slice(if framed && edge { &FRAME } else { &PAPER });
            }
        }

        self.width = width;
        self.height = height;
        Ok(())
    }

    fn load(path: &Path) -> Result<Vec<PageSize>, RenderError> {
        let bytes = fs::read(path)?;
        Self::parse_sizes(&bytes)
    }
}

impl PageRenderer for LopdfRenderer {
    fn name(&self) -> &'static str {
        "lopdf-outline"
    }

    fn run(&mut self, args: &[String]) -> Result<RenderedPage<'_>, RenderError> {
        let invocation = Invocation::parse(args)?;
        let sizes = Self::load(&invocation.file)?;
        let page_count = sizes.len() as u32;

        let size = sizes
            .get(invocation.page as usize)
            .copied()
            .ok_or(RenderError::PageOutOfRange { page: invocation.page, page_count })?;

        let scale = invocation.scale.unwrap_or(1.0);
        let (width, height) = raster_size(size.width_pt, size.height_pt, scale)?;

        log::debug!(
            "{}: page {}/{} of {} at {width}x{height}",
            self.name(),
            invocation.page,
            page_count,
            invocation.file.display()
        );

        self.paint(width, height)?;
        self.page_count = page_count;

        Ok(RenderedPage {
            bitmap: Bitmap {
                width: self.width,
                height: self.height,
                stride: self.width as usize * SOURCE_BYTES_PER_PIXEL,
                data: &self.buffer,
            },
            page_count: self.page_count,
        })
    }
}
