//! Page geometry read straight from PDF bytes
//!
//! Used by the headless render surface to report the same events a browser
//! renderer would: the page count and each page's unscaled width.

use lopdf::{Dictionary, Document, Object};

use crate::error::{Result, ReviewError};

/// US Letter, used when a page declares no MediaBox anywhere in its tree.
const DEFAULT_MEDIA_BOX: [f64; 4] = [0.0, 0.0, 612.0, 792.0];

/// Geometry of one page, in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// 1-based page number
    pub page: u32,
    pub width: f64,
    pub height: f64,
}

/// Parse `bytes` and return the geometry of every page in order.
pub fn page_geometry(bytes: &[u8]) -> Result<Vec<PageGeometry>> {
    if bytes.len() < 8 || !bytes.starts_with(b"%PDF-") {
        return Err(ReviewError::PdfParse("missing %PDF- header".to_string()));
    }

    let doc = Document::load_mem(bytes).map_err(|e| ReviewError::PdfParse(e.to_string()))?;

    let mut pages = Vec::new();
    for (page, page_id) in doc.get_pages() {
        let dict = doc
            .get_object(page_id)
            .and_then(Object::as_dict)
            .map_err(|e| ReviewError::PdfParse(format!("page {}: {}", page, e)))?;
        let [_, _, width, height] = media_box(&doc, dict)?;
        pages.push(PageGeometry {
            page,
            width,
            height,
        });
    }

    if pages.is_empty() {
        return Err(ReviewError::EmptyDocument);
    }
    Ok(pages)
}

/// MediaBox as [x, y, width, height], inherited through `Parent` links.
fn media_box(doc: &Document, page: &Dictionary) -> Result<[f64; 4]> {
    let mut current = Some(page);
    // Page trees are shallow; the bound guards against reference cycles.
    for _ in 0..32 {
        let Some(dict) = current else { break };
        if let Ok(obj) = dict.get(b"MediaBox") {
            return parse_rect(doc, obj);
        }
        current = dict
            .get(b"Parent")
            .and_then(Object::as_reference)
            .and_then(|id| doc.get_object(id))
            .and_then(Object::as_dict)
            .ok();
    }
    Ok(DEFAULT_MEDIA_BOX)
}

fn parse_rect(doc: &Document, obj: &Object) -> Result<[f64; 4]> {
    let arr = match obj {
        Object::Array(a) => a,
        Object::Reference(id) => doc
            .get_object(*id)
            .and_then(Object::as_array)
            .map_err(|e| ReviewError::PdfParse(format!("MediaBox reference: {}", e)))?,
        _ => return Err(ReviewError::PdfParse("MediaBox is not an array".to_string())),
    };

    if arr.len() != 4 {
        return Err(ReviewError::PdfParse(format!(
            "MediaBox has {} elements, expected 4",
            arr.len()
        )));
    }

    let mut values = [0.0f64; 4];
    for (slot, obj) in values.iter_mut().zip(arr) {
        *slot = number(doc, obj)?;
    }

    Ok([
        values[0],
        values[1],
        (values[2] - values[0]).abs(),
        (values[3] - values[1]).abs(),
    ])
}

fn number(doc: &Document, obj: &Object) -> Result<f64> {
    match obj {
        Object::Integer(i) => Ok(*i as f64),
        Object::Real(r) => Ok(*r as f64),
        Object::Reference(id) => {
            let resolved = doc
                .get_object(*id)
                .map_err(|e| ReviewError::PdfParse(e.to_string()))?;
            number(doc, resolved)
        }
        _ => Err(ReviewError::PdfParse(
            "Expected number in rectangle".to_string(),
        )),
    }
}

#[cfg(test)]
pub(crate) mod test_pdf {
    use lopdf::{dictionary, Document, Object};

    /// Build a PDF whose pages have the given (width, height) MediaBoxes.
    pub(crate) fn with_pages(sizes: &[(i64, i64)]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut kids = Vec::new();
        for &(w, h) in sizes {
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), w.into(), h.into()],
            });
            kids.push(Object::Reference(page_id));
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => sizes.len() as i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    /// Pages without their own MediaBox, inheriting one from the page tree.
    pub(crate) fn with_inherited_box(pages: usize, width: i64, height: i64) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let kids: Vec<Object> = (0..pages)
            .map(|_| {
                Object::Reference(doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                }))
            })
            .collect();

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => pages as i64,
                "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }
}
