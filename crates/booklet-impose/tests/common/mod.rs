#![allow(dead_code)]

use booklet_impose::*;
use image::{ImageFormat, Rgba, RgbaImage};
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::io::Cursor;

pub fn create_test_pdf(num_pages: usize) -> Document {
    create_sized_pdf(num_pages, 612, 792)
}

/// A document whose pages all have a `width` x `height` MediaBox
pub fn create_sized_pdf(num_pages: usize, width: i64, height: i64) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    // Create pages array
    let mut kids = Vec::new();
    for _ in 0..num_pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(width),
                    Object::Integer(height),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    // Create pages dict
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    // Create catalog
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

pub fn pdf_bytes(mut doc: Document) -> Vec<u8> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    writer
}

/// PNG bytes of a solid image; `opaque = false` gives it half alpha
pub fn png_bytes(width: u32, height: u32, opaque: bool) -> Vec<u8> {
    let alpha = if opaque { 255 } else { 128 };
    let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, alpha]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([10, 120, 200]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Jpeg).unwrap();
    out.into_inner()
}

/// Working set holding one PDF source of `num_pages` US Letter pages
pub fn pdf_working_set(num_pages: usize) -> WorkingSet {
    let mut working_set = WorkingSet::new();
    let unit = SourceUnit::from_bytes(pdf_bytes(create_test_pdf(num_pages)), None).unwrap();
    working_set.ingest(unit).unwrap();
    working_set
}

pub fn load_output(composition: &Composition) -> Document {
    Document::load_mem(&composition.bytes).unwrap()
}

/// Output pages in order
pub fn output_pages(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// The six `cm` operands of each placement on a page, in drawing order
pub fn placements(doc: &Document, page_id: ObjectId) -> Vec<[f32; 6]> {
    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
    content
        .operations
        .iter()
        .filter(|op| op.operator == "cm")
        .map(|op| {
            let mut matrix = [0.0; 6];
            for (slot, operand) in matrix.iter_mut().zip(&op.operands) {
                *slot = operand.as_float().unwrap();
            }
            matrix
        })
        .collect()
}

/// Output sheet (width, height) from its MediaBox
pub fn media_size(doc: &Document, page_id: ObjectId) -> (f32, f32) {
    let page = doc.get_dictionary(page_id).unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
    (
        media_box[2].as_float().unwrap() - media_box[0].as_float().unwrap(),
        media_box[3].as_float().unwrap() - media_box[1].as_float().unwrap(),
    )
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}
