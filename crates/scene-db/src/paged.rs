use std::path::Path;

use crate::Image;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An image whose pixels come from one page of a multi-page source.
///
/// Display nodes hold a `PagedImage` and drive page turns through it.
pub trait PagedImage {
    /// Path of the open document, if any.
    fn file_name(&self) -> Option<&Path>;

    /// Number of pages reported by the last successful page load.
    fn page_count(&self) -> u32;

    /// Index of the page currently held in [`PagedImage::image`].
    fn current_page(&self) -> u32;

    /// Replaces the held pixels with page `index`.
    ///
    /// On error the previously held page stays in place.
    fn page(&mut self, index: u32) -> Result<(), BoxError>;

    fn image(&self) -> &Image;
}

impl std::fmt::Debug for dyn PagedImage + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedImage")
            .field("file_name", &self.file_name())
            .field("page", &self.current_page())
            .field("page_count", &self.page_count())
            .finish()
    }
}
