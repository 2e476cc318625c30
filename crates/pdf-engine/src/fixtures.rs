//! Generated PDFs for tests across the workspace.
//!
//! Enabled for other crates through the `test-fixtures` feature.

use std::path::{Path, PathBuf};

use lopdf::{dictionary, Document, Object, Stream};

use crate::RenderError;

/// Writes `dir/name` with one empty page per `(width, height)` MediaBox.
pub fn write_pdf(
    dir: &Path,
    name: &str,
    media_boxes: &[(i64, i64)],
) -> Result<PathBuf, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = media_boxes
        .iter()
        .map(|&(width, height)| {
            let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
                "Contents" => content_id,
            })
            .into()
        })
        .collect();

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! { "Type" => "Pages", "Kids" => kids, "Count" => count }),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    let path = dir.join(name);
    doc.save(&path)?;
    Ok(path)
}
