//! Output sheet rendering
//!
//! Builds one output PDF page from content that has already been embedded
//! as XObjects and placed by the layout module.

use crate::layout::PagePlacement;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// How an embedded XObject maps onto its placement rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum XObjectKind {
    /// Form XObject whose BBox starts at the given origin
    Form { origin: (f32, f32) },
    /// Image XObject drawn in the unit square
    Image,
}

/// An embedded XObject placed on a sheet
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedXObject {
    pub xobject_id: ObjectId,
    pub kind: XObjectKind,
    pub placement: PagePlacement,
}

/// Render an output sheet with its placed content.
///
/// An empty `placed` slice yields a blank sheet of the given size.
pub fn render_sheet_page(
    output: &mut Document,
    parent_pages_id: ObjectId,
    sheet_width_pt: f32,
    sheet_height_pt: f32,
    placed: &[PlacedXObject],
) -> ObjectId {
    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(sheet_width_pt),
            Object::Real(sheet_height_pt),
        ]),
    );

    let mut content_ops = Vec::new();
    let mut xobjects = Dictionary::new();

    for (idx, item) in placed.iter().enumerate() {
        let xobject_name = format!("P{}", idx);
        xobjects.set(xobject_name.as_bytes(), Object::Reference(item.xobject_id));
        content_ops.push(generate_placement_command(&xobject_name, item));
    }

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content = content_ops.join("");
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    output.add_object(page_dict)
}

/// Generate the PDF content stream command to place an XObject.
fn generate_placement_command(xobject_name: &str, item: &PlacedXObject) -> String {
    let rect = &item.placement.content_rect;
    match item.kind {
        XObjectKind::Form { origin } => {
            let scale = item.placement.scale;
            format!(
                "q {} 0 0 {} {} {} cm /{} Do Q\n",
                scale,
                scale,
                rect.x - origin.0 * scale,
                rect.y - origin.1 * scale,
                xobject_name
            )
        }
        XObjectKind::Image => format!(
            "q {} 0 0 {} {} {} cm /{} Do Q\n",
            rect.width, rect.height, rect.x, rect.y, xobject_name
        ),
    }
}
