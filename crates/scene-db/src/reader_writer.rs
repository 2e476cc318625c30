use std::path::Path;

use crate::{Node, Object, Options, PagedImage, ReadError, ReadResult};

/// A file-format plugin.
///
/// Every read entry point defaults to [`ReadError::FileNotHandled`] so a
/// plugin only implements what its format supports.
pub trait ReaderWriter: Send + Sync {
    /// Human-readable plugin name.
    fn class_name(&self) -> &str;

    /// `(extension, description)` pairs, extensions lower-case without dot.
    fn supported_extensions(&self) -> &[(&'static str, &'static str)];

    fn accepts_extension(&self, extension: &str) -> bool {
        self.supported_extensions().iter().any(|(ext, _)| ext.eq_ignore_ascii_case(extension))
    }

    fn read_object(&self, _path: &Path, _options: &Options) -> ReadResult<Object> {
        Err(ReadError::FileNotHandled)
    }

    fn read_image(&self, _path: &Path, _options: &Options) -> ReadResult<Box<dyn PagedImage>> {
        Err(ReadError::FileNotHandled)
    }

    fn read_node(&self, _path: &Path, _options: &Options) -> ReadResult<Box<dyn Node>> {
        Err(ReadError::FileNotHandled)
    }
}
