use pdf_stamp::{
    colours, pagesize, stamp_document, Document, Font, Info, Margins, Page, PageSelection, Pt,
    Rotation, SearchRegion, SpanFont, StampSpec,
};

fn main() {
    let font_path = std::env::args()
        .nth(1)
        .expect("usage: stamp <font.ttf> [output.pdf]");
    let out_path = std::env::args()
        .nth(2)
        .unwrap_or_else(|| "stamped.pdf".to_string());

    let font = Font::load(std::fs::read(font_path).expect("can read font file"))
        .expect("can parse font");

    let mut doc = Document::default();
    let font_index = doc.add_font(font);
    doc.set_info(Info::new().title("Stamped report").author("pdf-stamp demo"));

    // two pages of body text, leaving the top margin open for the stamp
    for _ in 0..2 {
        let mut page = Page::new(pagesize::LETTER, Some(Margins::all(Pt(72.0))));
        let body = SpanFont {
            index: font_index,
            size: Pt(11.0),
        };
        let (x, mut y) = page.baseline_start(&doc.fonts[font_index], body.size);
        let text = lipsum::lipsum(120);
        let words: Vec<&str> = text.split_whitespace().collect();
        for line in words.chunks(9) {
            page.add_text(&doc.fonts, (x, y), line.join(" "), body, colours::BLACK);
            y -= doc.fonts[font_index].line_height(body.size);
        }
        doc.add_page(page);
    }

    let spec = StampSpec::new(
        vec!["CONFIDENTIAL".into(), "do not distribute".into()],
        colours::RED,
        Rotation::R0,
        true,
    )
    .expect("stamp spec is non-empty");

    let placed = stamp_document(
        &mut doc,
        &PageSelection::All,
        (Pt(170.0), Pt(40.0)),
        &SearchRegion::default(),
        &spec,
        font_index,
    )
    .expect("every page has free space in its top region");

    for (page_index, rect) in placed.iter() {
        println!(
            "stamped page {page_index} at ({}, {})..({}, {})",
            rect.x1, rect.y1, rect.x2, rect.y2
        );
    }

    let out = std::fs::File::create(&out_path).expect("can create output file");
    doc.write(out).expect("can write PDF");
    println!("wrote {out_path}");
}
