use std::fs;
use std::path::Path;
use std::sync::Arc;

use pagetex_db::{Options, Origin, PagedImage, PdfReader, ReadError, ReaderWriter, Registry};
use pagetex_engine::fixtures::write_pdf;
use pagetex_engine::{Bitmap, LopdfRenderer, PageRenderer, RenderError, RenderedPage};
use pagetex_pdf::{register, register_with_renderer, ReaderWriterPdf, PLUGIN_NAME};

fn outline() -> Box<dyn PageRenderer> {
    Box::new(LopdfRenderer::new())
}

fn empty() -> Box<dyn PageRenderer> {
    Box::new(Empty)
}

fn outline_registry() -> Registry {
    let mut registry = Registry::new();
    register_with_renderer(&mut registry, Arc::new(outline));
    registry
}

/// Always renders an empty bitmap.
struct Empty;

impl PageRenderer for Empty {
    fn name(&self) -> &'static str {
        "empty"
    }

    fn run(&mut self, _args: &[String]) -> Result<RenderedPage<'_>, RenderError> {
        Ok(RenderedPage {
            bitmap: Bitmap { width: 0, height: 0, stride: 0, data: &[] },
            page_count: 1,
        })
    }
}

#[test]
fn single_page_pdf_reads_as_top_left_rgb_image() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let path = write_pdf(temp.path(), "single.pdf", &[(200, 100)])
        .expect("fixture PDF should be written");

    let image = outline_registry().read_image(&path, &Options::new()).expect("pdf should load");

    assert!(image.page_count() >= 1);
    assert_eq!(image.file_name(), Some(path.as_path()));
    let pixels = image.image();
    assert_eq!((pixels.s(), pixels.t()), (200, 100));
    assert_eq!(pixels.data().len(), 200 * 100 * 3);
    assert_eq!(pixels.origin(), Origin::TopLeft);
}

#[test]
fn every_rasterized_page_is_top_left_and_exactly_sized() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let path = write_pdf(temp.path(), "three.pdf", &[(30, 40), (41, 17), (8, 8)])
        .expect("fixture PDF should be written");
    let mut image = outline_registry().read_image(&path, &Options::new()).expect("pdf should load");

    for index in 0..image.page_count() {
        image.page(index).expect("page should rasterize");
        let pixels = image.image();
        assert_eq!(pixels.data().len(), pixels.s() as usize * pixels.t() as usize * 3);
        assert_eq!(pixels.origin(), Origin::TopLeft);
    }
    assert_eq!(image.image().s(), 8);
}

#[test]
fn out_of_range_page_keeps_previous_state() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let path = write_pdf(temp.path(), "single.pdf", &[(20, 10)])
        .expect("fixture PDF should be written");
    let mut image = outline_registry().read_image(&path, &Options::new()).expect("pdf should load");
    let before = image.image().clone();

    assert!(image.page(9).is_err());

    assert_eq!(image.page_count(), 1);
    assert_eq!(image.current_page(), 0);
    assert_eq!(image.image(), &before);
}

#[test]
fn nonexistent_path_is_not_found() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    let err = outline_registry()
        .read_image(&temp.path().join("missing.pdf"), &Options::new())
        .expect_err("file does not exist");

    assert!(err.is_not_found(), "{err}");
}

#[test]
fn other_extensions_are_not_handled_by_the_plugin() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let png = temp.path().join("picture.png");
    fs::write(&png, b"not looked at").expect("file should be written");
    let plugin = ReaderWriterPdf::new();

    let err = plugin.read_image(&png, &Options::new()).expect_err("png is not a pdf");
    assert!(err.is_not_handled());

    let err = plugin
        .read_image(Path::new("/definitely/not/here.png"), &Options::new())
        .expect_err("extension is checked before resolution");
    assert!(err.is_not_handled());
}

#[test]
fn corrupt_pdf_is_an_error_in_reading() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let path = temp.path().join("broken.pdf");
    fs::write(&path, b"%PDF-1.4 truncated").expect("file should be written");

    let err = outline_registry().read_image(&path, &Options::new()).expect_err("pdf is corrupt");

    assert!(matches!(err, ReadError::ErrorInReadingFile { .. }), "{err}");
}

#[test]
fn resolves_relative_names_through_search_paths() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    write_pdf(temp.path(), "found.pdf", &[(10, 10)]).expect("fixture PDF should be written");
    let options = Options::new().with_search_path(temp.path());

    let image =
        outline_registry().read_image(Path::new("found.pdf"), &options).expect("pdf should load");

    assert_eq!(image.file_name(), Some(temp.path().join("found.pdf").as_path()));
}

#[test]
fn scale_option_changes_raster_size() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let path = write_pdf(temp.path(), "single.pdf", &[(200, 100)])
        .expect("fixture PDF should be written");
    let options = Options::new().with_option_string("scale=0.5").expect("options are valid");

    let image = outline_registry().read_image(&path, &options).expect("pdf should load");

    assert_eq!((image.image().s(), image.image().t()), (100, 50));
}

#[test]
fn bad_scale_option_is_an_error_in_reading() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let path = write_pdf(temp.path(), "single.pdf", &[(200, 100)])
        .expect("fixture PDF should be written");
    let options = Options::new().with_option_string("scale=-2").expect("options are valid");

    let err = outline_registry().read_image(&path, &options).expect_err("scale is negative");

    assert!(err.is_error_in_reading());
}

#[test]
fn huge_scale_is_an_error_in_reading() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let path = write_pdf(temp.path(), "letter.pdf", &[(612, 792)])
        .expect("fixture PDF should be written");

    for scale in ["scale=1e30", "scale=100"] {
        let options = Options::new().with_option_string(scale).expect("options are valid");

        let err = outline_registry().read_image(&path, &options).expect_err("raster is too large");

        assert!(err.is_error_in_reading(), "{scale}: {err}");
    }
}

#[test]
fn read_object_is_read_image() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let path = write_pdf(temp.path(), "single.pdf", &[(12, 34)])
        .expect("fixture PDF should be written");

    let object = outline_registry().read_object(&path, &Options::new()).expect("pdf should load");
    let image = object.into_image().expect("object is an image");

    assert_eq!(image.image().t(), 34);
}

#[test]
fn read_node_wraps_image_in_pdf_reader() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let path = write_pdf(temp.path(), "two.pdf", &[(100, 50), (100, 100)])
        .expect("fixture PDF should be written");

    let node = outline_registry().read_node(&path, &Options::new()).expect("pdf should load");
    let reader = node.as_any().downcast_ref::<PdfReader>().expect("node is a PdfReader");

    assert_eq!(node.name(), "PdfReader");
    assert_eq!(reader.image().map(|image| image.page_count()), Some(2));
    let quad = reader.quad().expect("quad is built");
    assert_eq!(quad.corners[2], [1.0, 0.0, 0.5]);
    assert_eq!(quad.tex_coords[0], [0.0, 1.0]);
}

#[test]
fn read_node_falls_back_to_not_handled_when_image_cannot_be_shown() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let path = temp.path().join("anything.pdf");
    fs::write(&path, b"ignored by the renderer").expect("file should be written");
    let mut registry = Registry::new();
    register_with_renderer(&mut registry, Arc::new(empty));

    let err = registry.read_node(&path, &Options::new()).expect_err("empty image cannot be shown");

    assert!(err.is_not_handled());
}

#[test]
fn register_advertises_pdf_extension() {
    let mut registry = Registry::new();
    register(&mut registry);

    let extensions = registry.extensions();

    assert_eq!(extensions.len(), 1);
    assert_eq!(extensions[0].extension, "pdf");
    assert_eq!(extensions[0].plugin, PLUGIN_NAME);
    assert!(registry.reader_for(Path::new("Report.PDF")).is_some());
}
