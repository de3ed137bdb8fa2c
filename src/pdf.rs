use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{xobject, Document, Object, ObjectId};
use thiserror::Error;

/// Stamp rectangle on the template, in PDF points.
pub const QR_RECT_WIDTH: f32 = 50.0;
pub const QR_RECT_HEIGHT: f32 = 60.0;

const XOBJECT_NAME: &[u8] = b"QRstamp";

#[derive(Debug, Error)]
pub enum StampError {
    #[error("load template {path}")]
    Template {
        path: String,
        #[source]
        source: lopdf::Error,
    },
    #[error("template {path} has no page index {page}")]
    PageOutOfRange { path: String, page: u32 },
    #[error("embed qr image {path}")]
    Image {
        path: String,
        #[source]
        source: lopdf::Error,
    },
    #[error("write stamped pdf {path}")]
    Save {
        path: String,
        #[source]
        source: lopdf::Error,
    },
    #[error(transparent)]
    Pdf(#[from] lopdf::Error),
}

/// Overlays the QR PNG at a fixed rectangle of the template page and writes
/// the result to `out`. `offset` is (x, y) from the page's top-left corner,
/// matching the layout coordinates the template was designed with.
pub fn stamp_qr(
    template: &Path,
    qr_png: &Path,
    out: &Path,
    page_index: u32,
    offset: (f32, f32),
) -> Result<(), StampError> {
    let mut doc = Document::load(template).map_err(|e| StampError::Template {
        path: template.display().to_string(),
        source: e,
    })?;

    // get_pages keys are 1-based page numbers
    let page_id = *doc
        .get_pages()
        .get(&(page_index + 1))
        .ok_or_else(|| StampError::PageOutOfRange {
            path: template.display().to_string(),
            page: page_index,
        })?;
    let height = page_height(&doc, page_id);

    let img = xobject::image(qr_png).map_err(|e| StampError::Image {
        path: qr_png.display().to_string(),
        source: e,
    })?;
    let img_id = doc.add_object(img);
    doc.add_xobject(page_id, XOBJECT_NAME.to_vec(), img_id)?;

    // PDF user space has a bottom-left origin
    let (x, y_from_top) = offset;
    let y = height - y_from_top - QR_RECT_HEIGHT;
    let ops = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    QR_RECT_WIDTH.into(),
                    0f32.into(),
                    0f32.into(),
                    QR_RECT_HEIGHT.into(),
                    x.into(),
                    y.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(XOBJECT_NAME.to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    doc.add_to_page_content(page_id, ops)?;

    doc.save(out).map_err(|e| StampError::Save {
        path: out.display().to_string(),
        source: e.into(),
    })?;
    Ok(())
}

/// MediaBox height of the page, falling back to the pages-tree root when the
/// page inherits its box, then to A4.
fn page_height(doc: &Document, page_id: ObjectId) -> f32 {
    if let Some(h) = media_box_height(doc, doc.get_dictionary(page_id).ok()) {
        return h;
    }
    let root = doc
        .catalog()
        .ok()
        .and_then(|c| c.get(b"Pages").ok())
        .and_then(|o| o.as_reference().ok())
        .and_then(|id| doc.get_dictionary(id).ok());
    media_box_height(doc, root).unwrap_or(842.0)
}

fn media_box_height(doc: &Document, dict: Option<&lopdf::Dictionary>) -> Option<f32> {
    let media_box = dict?.get(b"MediaBox").ok()?;
    let media_box = match media_box {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    let coords = media_box.as_array().ok()?;
    match coords.get(3)? {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn write_blank_template(path: &Path, width: i64, height: i64) {
    use lopdf::{dictionary, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        Content {
            operations: vec![],
        }
        .encode()
        .unwrap(),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr;

    #[test]
    fn stamps_qr_onto_template_page() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("pass.pdf");
        let png = dir.path().join("qr.png");
        let out = dir.path().join("out.pdf");

        write_blank_template(&template, 595, 842);
        qr::render_qr_png("https://example.com/pass/abc", 4, &png).unwrap();

        stamp_qr(&template, &png, &out, 0, (540.0, 80.0)).unwrap();

        let doc = Document::load(&out).unwrap();
        let page_id = *doc.get_pages().get(&1).unwrap();

        let page_dict = doc.get_dictionary(page_id).unwrap();
        let resources = match page_dict.get(b"Resources").unwrap() {
            Object::Reference(id) => doc.get_dictionary(*id).unwrap(),
            Object::Dictionary(d) => d,
            other => panic!("unexpected resources object: {:?}", other),
        };
        let xobjects = resources.get(b"XObject").and_then(|o| o.as_dict()).unwrap();
        assert!(xobjects.has(XOBJECT_NAME));

        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        assert!(content.operations.iter().any(|op| op.operator == "Do"));
    }

    #[test]
    fn missing_page_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("pass.pdf");
        let png = dir.path().join("qr.png");

        write_blank_template(&template, 595, 842);
        qr::render_qr_png("https://example.com/pass/abc", 4, &png).unwrap();

        let err = stamp_qr(&template, &png, &dir.path().join("out.pdf"), 3, (0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, StampError::PageOutOfRange { page: 3, .. }));
    }

    #[test]
    fn unreadable_template_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("qr.png");
        qr::render_qr_png("https://example.com/pass/abc", 4, &png).unwrap();

        let err = stamp_qr(
            &dir.path().join("nope.pdf"),
            &png,
            &dir.path().join("out.pdf"),
            0,
            (0.0, 0.0),
        )
        .unwrap_err();
        assert!(matches!(err, StampError::Template { .. }));
    }
}
