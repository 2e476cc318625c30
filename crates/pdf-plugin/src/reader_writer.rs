use std::path::Path;
use std::sync::Arc;

use pagetex_db::{
    find_data_file, lower_case_file_extension, GeometryHints, Node, Object, Options, PagedImage,
    PdfReader, ReadError, ReadResult, ReaderWriter,
};
use pagetex_engine::{default_renderer, PageRenderer};

use crate::PdfImage;

pub const PLUGIN_NAME: &str = "PDFium PDF plugin";

const EXTENSIONS: &[(&str, &str)] = &[("pdf", PLUGIN_NAME)];

/// Builds a fresh renderer for every image the plugin reads.
pub type RendererFactory = Arc<dyn Fn() -> Box<dyn PageRenderer> + Send + Sync>;

#[derive(Clone)]
pub struct ReaderWriterPdf {
    renderers: RendererFactory,
}

impl Default for ReaderWriterPdf {
    fn default() -> Self {
        Self::new()
    }
}

impl ReaderWriterPdf {
    pub fn new() -> Self {
        Self::with_renderer(Arc::new(default_renderer))
    }

    pub fn with_renderer(renderers: RendererFactory) -> Self {
        Self { renderers }
    }

    fn scale(path: &Path, options: &Options) -> ReadResult<Option<f32>> {
        let Some(value) = options.option_value("scale") else {
            return Ok(None);
        };

        value
            .parse::<f32>()
            .ok()
            .filter(|scale| scale.is_finite() && *scale > 0.0)
            .map(Some)
            .ok_or_else(|| ReadError::reading(path, format!("invalid scale option: {value}")))
    }

    fn open(&self, path: &Path, options: &Options) -> ReadResult<PdfImage> {
        if !self.accepts_extension(&lower_case_file_extension(path)) {
            return Err(ReadError::FileNotHandled);
        }

        let resolved =
            find_data_file(path, options).ok_or_else(|| ReadError::FileNotFound(path.into()))?;

        let mut image = PdfImage::new((self.renderers)());
        if let Some(scale) = Self::scale(path, options)? {
            image = image.with_scale(scale);
        }

        image.open(&resolved).map_err(|err| {
            log::warn!("failed to read {}: {err}", resolved.display());
            ReadError::reading(&resolved, err)
        })?;

        Ok(image)
    }
}

impl ReaderWriter for ReaderWriterPdf {
    fn class_name(&self) -> &str {
        PLUGIN_NAME
    }

    fn supported_extensions(&self) -> &[(&'static str, &'static str)] {
        EXTENSIONS
    }

    fn read_object(&self, path: &Path, options: &Options) -> ReadResult<Object> {
        self.read_image(path, options).map(Object::Image)
    }

    fn read_image(&self, path: &Path, options: &Options) -> ReadResult<Box<dyn PagedImage>> {
        Ok(Box::new(self.open(path, options)?))
    }

    fn read_node(&self, path: &Path, options: &Options) -> ReadResult<Box<dyn Node>> {
        let image = self.read_image(path, options)?;

        let mut reader = PdfReader::new();
        match reader.assign(image, GeometryHints::default()) {
            Ok(()) => Ok(Box::new(reader)),
            Err(err) => {
                log::warn!("cannot display {}: {err}", path.display());
                Err(ReadError::FileNotHandled)
            }
        }
    }
}

impl std::fmt::Debug for ReaderWriterPdf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReaderWriterPdf").finish_non_exhaustive()
    }
}
