use pdf_stamp::{pagesize, stamp_document, Document, Font, Page, SearchRegion, StampRequest};
use std::collections::HashMap;

fn main() {
    let font_path = std::env::args()
        .nth(1)
        .expect("usage: form-request <font.ttf> [output.pdf]");
    let out_path = std::env::args()
        .nth(2)
        .unwrap_or_else(|| "stamped.pdf".to_string());

    let font = Font::load(std::fs::read(font_path).expect("can read font file"))
        .expect("can parse font");

    let mut doc = Document::default();
    let font_index = doc.add_font(font);
    doc.add_page(Page::new(pagesize::A4, None));
    doc.add_page(Page::new(pagesize::A4, None));

    // the same loosely-typed fields a web form would post
    let mut fields: HashMap<String, String> = HashMap::new();
    fields.insert("pages".into(), "-1".into());
    fields.insert("size".into(), "160,48".into());
    fields.insert("color".into(), "blue".into());
    fields.insert("rotation".into(), "0".into());
    fields.insert("frame".into(), "true".into());
    fields.insert("stamp_elements".into(), "h2,h1".into());
    fields.insert("h1".into(), "2026-08-06".into());
    fields.insert("h2".into(), "RECEIVED".into());

    let request = StampRequest::from_fields(&fields).expect("fields are valid");
    let placed = stamp_document(
        &mut doc,
        &request.pages,
        request.size,
        &SearchRegion::default(),
        &request.spec,
        font_index,
    )
    .expect("every page has free space in its top region");
    println!("stamped {} page(s)", placed.len());

    let out = std::fs::File::create(&out_path).expect("can create output file");
    doc.write(out).expect("can write PDF");
    println!("wrote {out_path}");
}
