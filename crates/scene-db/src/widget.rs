//! Displayable node for paged images.
//!
//! `PdfReader` wraps a [`PagedImage`] in a textured quad and turns pages on
//! request. The image is held by composition; any paged source works.

use std::any::Any;

use crate::{BoxError, Image, Node, Origin, PagedImage};

pub type Vec3 = [f32; 3];

/// Placement of the quad in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryHints {
    pub position: Vec3,
    pub width_vec: Vec3,
    /// Scaled by the image aspect ratio (t / s).
    pub height_vec: Vec3,
}

impl Default for GeometryHints {
    fn default() -> Self {
        Self { position: [0.0, 0.0, 0.0], width_vec: [1.0, 0.0, 0.0], height_vec: [0.0, 0.0, 1.0] }
    }
}

/// Corners run bottom-left, bottom-right, top-right, top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexturedQuad {
    pub corners: [Vec3; 4],
    pub tex_coords: [[f32; 2]; 4],
}

impl TexturedQuad {
    fn for_image(image: &Image, hints: &GeometryHints) -> Self {
        let aspect = image.t() as f32 / image.s() as f32;
        let height_vec = hints.height_vec.map(|c| c * aspect);
        let add = |a: Vec3, b: Vec3| [a[0] + b[0], a[1] + b[1], a[2] + b[2]];

        let bottom_left = hints.position;
        let bottom_right = add(bottom_left, hints.width_vec);
        let top_right = add(bottom_right, height_vec);
        let top_left = add(bottom_left, height_vec);

        // Row 0 of a top-left image is the top edge, so t runs downwards.
        let (bottom_t, top_t) = match image.origin() {
            Origin::BottomLeft => (0.0, 1.0),
            Origin::TopLeft => (1.0, 0.0),
        };

        Self {
            corners: [bottom_left, bottom_right, top_right, top_left],
            tex_coords: [[0.0, bottom_t], [1.0, bottom_t], [1.0, top_t], [0.0, top_t]],
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssignError {
    #[error("image has no pixels")]
    EmptyImage,
    #[error("no image assigned")]
    NoImage,
    #[error("page {page} out of range (page_count={page_count})")]
    PageOutOfRange { page: u32, page_count: u32 },
    #[error("page turn failed")]
    Page(#[source] BoxError),
}

#[derive(Debug, Default)]
pub struct PdfReader {
    image: Option<Box<dyn PagedImage>>,
    hints: GeometryHints,
    quad: Option<TexturedQuad>,
}

impl PdfReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `image` and builds its quad.
    pub fn assign(
        &mut self,
        image: Box<dyn PagedImage>,
        hints: GeometryHints,
    ) -> Result<(), AssignError> {
        if image.image().is_empty() || image.image().s() == 0 {
            return Err(AssignError::EmptyImage);
        }

        self.quad = Some(TexturedQuad::for_image(image.image(), &hints));
        self.hints = hints;
        self.image = Some(image);
        Ok(())
    }

    pub fn image(&self) -> Option<&dyn PagedImage> {
        self.image.as_deref()
    }

    pub fn quad(&self) -> Option<&TexturedQuad> {
        self.quad.as_ref()
    }

    /// Shows page `index`, re-rasterizing it through the image.
    pub fn page(&mut self, index: u32) -> Result<(), AssignError> {
        let image = self.image.as_mut().ok_or(AssignError::NoImage)?;
        let page_count = image.page_count();
        if index >= page_count {
            return Err(AssignError::PageOutOfRange { page: index, page_count });
        }

        image.page(index).map_err(AssignError::Page)?;
        self.quad = Some(TexturedQuad::for_image(image.image(), &self.hints));
        Ok(())
    }

    pub fn next(&mut self) -> bool {
        match self.image.as_ref().map(|image| image.current_page()) {
            Some(current) => self.turn_to(current.saturating_add(1)),
            None => false,
        }
    }

    pub fn previous(&mut self) -> bool {
        match self.image.as_ref().map(|image| image.current_page()) {
            Some(current) if current > 0 => self.turn_to(current - 1),
            _ => false,
        }
    }

    fn turn_to(&mut self, index: u32) -> bool {
        match self.page(index) {
            Ok(()) => true,
            Err(AssignError::PageOutOfRange { .. }) => false,
            Err(err) => {
                log::warn!("page turn to {index} failed: {err}");
                false
            }
        }
    }
}

impl Node for PdfReader {
    fn name(&self) -> &str {
        "PdfReader"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AllocationMode, DataType, PixelFormat};
    use std::path::Path;

    /// Pages are `width x (index + 1)` pixels so turns are observable.
    struct StripPages {
        pages: u32,
        current: u32,
        origin: Origin,
        image: Image,
    }

    impl StripPages {
        fn boxed(pages: u32, origin: Origin) -> Box<dyn PagedImage> {
            let mut strip = Self { pages, current: 0, origin, image: Image::new() };
            strip.page(0).expect("first page exists");
            Box::new(strip)
        }
    }

    impl PagedImage for StripPages {
        fn file_name(&self) -> Option<&Path> {
            None
        }

        fn page_count(&self) -> u32 {
            self.pages
        }

        fn current_page(&self) -> u32 {
            self.current
        }

        fn page(&mut self, index: u32) -> Result<(), BoxError> {
            if index >= self.pages {
                return Err("no such page".into());
            }
            let t = index + 1;
            self.image.set_image(
                2,
                t,
                1,
                PixelFormat::Rgb,
                PixelFormat::Rgb,
                DataType::UnsignedByte,
                vec![0; 2 * t as usize * 3],
                AllocationMode::NoDelete,
            )?;
            self.image.set_origin(self.origin);
            self.current = index;
            Ok(())
        }

        fn image(&self) -> &Image {
            &self.image
        }
    }

    struct Blank(Image);

    impl PagedImage for Blank {
        fn file_name(&self) -> Option<&Path> {
            None
        }

        fn page_count(&self) -> u32 {
            0
        }

        fn current_page(&self) -> u32 {
            0
        }

        fn page(&mut self, _index: u32) -> Result<(), BoxError> {
            Err("blank".into())
        }

        fn image(&self) -> &Image {
            &self.0
        }
    }

    #[test]
    fn quad_keeps_aspect_and_flips_top_left_images() {
        let mut reader = PdfReader::new();
        let mut strip = StripPages::boxed(3, Origin::TopLeft);
        strip.page(1).expect("second page exists");

        reader.assign(strip, GeometryHints::default()).expect("image has pixels");
        let quad = reader.quad().expect("quad is built");

        // 2x2 page: square quad.
        assert_eq!(quad.corners[2], [1.0, 0.0, 1.0]);
        assert_eq!(quad.tex_coords[0], [0.0, 1.0]);
        assert_eq!(quad.tex_coords[3], [0.0, 0.0]);
    }

    #[test]
    fn bottom_left_images_are_not_flipped() {
        let mut reader = PdfReader::new();

        reader.assign(StripPages::boxed(1, Origin::BottomLeft), GeometryHints::default()).unwrap();

        assert_eq!(reader.quad().unwrap().tex_coords[0], [0.0, 0.0]);
    }

    #[test]
    fn rejects_empty_images() {
        let mut reader = PdfReader::new();

        let err = reader.assign(Box::new(Blank(Image::new())), GeometryHints::default());

        assert!(matches!(err, Err(AssignError::EmptyImage)));
        assert!(reader.image().is_none());
    }

    #[test]
    fn next_and_previous_stop_at_the_ends() {
        let mut reader = PdfReader::new();
        reader.assign(StripPages::boxed(2, Origin::TopLeft), GeometryHints::default()).unwrap();

        assert!(!reader.previous());
        assert!(reader.next());
        assert_eq!(reader.image().unwrap().current_page(), 1);
        assert_eq!(reader.quad().unwrap().corners[3], [0.0, 0.0, 1.0]);

        assert!(!reader.next());
        assert_eq!(reader.image().unwrap().current_page(), 1);

        assert!(reader.previous());
        assert_eq!(reader.image().unwrap().current_page(), 0);
    }

    #[test]
    fn page_without_image_fails() {
        assert!(matches!(PdfReader::new().page(0), Err(AssignError::NoImage)));
        assert!(!PdfReader::new().next());
    }
}
