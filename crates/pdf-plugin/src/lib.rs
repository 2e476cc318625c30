//! `.pdf` reader/writer plugin
//!
//! Loads one page of a PDF at a time as a packed RGB image, rasterized by a
//! [`pagetex_engine::PageRenderer`].

mod image;
mod reader_writer;

use std::sync::Arc;

use pagetex_db::Registry;

pub use image::{PdfImage, PdfImageError};
pub use reader_writer::{ReaderWriterPdf, RendererFactory, PLUGIN_NAME};

/// Registers the plugin with the best renderer this build offers.
pub fn register(registry: &mut Registry) {
    registry.register(Arc::new(ReaderWriterPdf::new()));
}

/// Registers the plugin with a caller-supplied renderer.
pub fn register_with_renderer(registry: &mut Registry, renderers: RendererFactory) {
    registry.register(Arc::new(ReaderWriterPdf::with_renderer(renderers)));
}
