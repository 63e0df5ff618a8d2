//! Rendering text stamps into page rectangles, and stamping whole documents.

use crate::colour::Colour;
use crate::document::Document;
use crate::error::StampError;
use crate::options::PageSelection;
use crate::page::{Page, Rotation, SpanFont, TextBoxLayout};
use crate::rect::Rect;
use crate::scan::{find_free_rect, SearchRegion};
use crate::units::Pt;
use log::info;
use pdf_writer::Content;
use std::collections::HashMap;

/// Stamp text is always set at 12 points
pub const STAMP_FONT_SIZE: Pt = Pt(12.0);
/// Width of the optional frame stroke, in points
pub const FRAME_LINE_WIDTH: f32 = 1.0;

/// What to stamp: ordered text lines, a colour, a quarter-turn rotation, and
/// whether to stroke a frame around the stamped rectangle.
///
/// The joined text must be non-empty after trimming; both constructors
/// enforce this, so a freshly built spec is always stampable.
#[derive(Debug, Clone, PartialEq)]
pub struct StampSpec {
    pub lines: Vec<String>,
    pub colour: Colour,
    pub rotation: Rotation,
    pub frame: bool,
}

impl StampSpec {
    pub fn new(
        lines: Vec<String>,
        colour: Colour,
        rotation: Rotation,
        frame: bool,
    ) -> Result<StampSpec, StampError> {
        let spec = StampSpec {
            lines,
            colour,
            rotation,
            frame,
        };
        if spec.content().is_empty() {
            return Err(StampError::EmptyStamp);
        }
        Ok(spec)
    }

    /// Assemble a spec from named elements and an order key such as
    /// `"h3,h1"`: each key in the order names an element whose value becomes
    /// one stamp line. Keys missing from the map and keys with empty values
    /// are skipped; the order of the keys is the order of the lines.
    pub fn from_elements(
        elements: &HashMap<String, String>,
        order: &str,
        colour: Colour,
        rotation: Rotation,
        frame: bool,
    ) -> Result<StampSpec, StampError> {
        let lines = order
            .split(',')
            .map(str::trim)
            .filter_map(|key| elements.get(key))
            .filter(|value| !value.is_empty())
            .cloned()
            .collect();
        StampSpec::new(lines, colour, rotation, frame)
    }

    /// The text that will be stamped: lines joined with newlines, trimmed of
    /// surrounding whitespace
    pub fn content(&self) -> String {
        self.lines.join("\n").trim().to_string()
    }
}

/// Render a stamp into the given rectangle of a page: the spec's text as an
/// anchored text box, then, if requested, the rectangle outline stroked in
/// the same colour. The outline is never filled, so the frame cannot
/// obscure the text.
pub fn apply_stamp(
    page: &mut Page,
    rect: Rect,
    spec: &StampSpec,
    font_index: usize,
) -> Result<(), StampError> {
    let content = spec.content();
    if content.is_empty() {
        return Err(StampError::EmptyStamp);
    }

    page.add_text_box(TextBoxLayout {
        lines: content.lines().map(str::to_string).collect(),
        font: SpanFont {
            index: font_index,
            size: STAMP_FONT_SIZE,
        },
        colour: spec.colour,
        rect,
        rotation: spec.rotation,
    });

    if spec.frame {
        let mut ops = Content::new();
        match spec.colour {
            Colour::RGB { r, g, b } => ops.set_stroke_rgb(r, g, b),
            Colour::CMYK { c, m, y, k } => ops.set_stroke_cmyk(c, m, y, k),
            Colour::Grey { g } => ops.set_stroke_gray(g),
        };
        ops.set_line_width(FRAME_LINE_WIDTH);
        ops.rect(
            rect.x1.into(),
            rect.y1.into(),
            rect.width().into(),
            rect.height().into(),
        );
        ops.stroke();
        page.add_content(ops);
    }

    Ok(())
}

/// Stamp the selected pages of a document, searching each page's top region
/// for free space and rendering the spec into it.
///
/// Pages are processed strictly in selection order and the first failure
/// aborts the batch: pages already stamped stay stamped, pages after the
/// failing one are left untouched. A page without free space fails with
/// [NoFreeSpace](StampError::NoFreeSpace).
///
/// Returns the stamped rectangle for every processed page.
pub fn stamp_document(
    doc: &mut Document,
    selection: &PageSelection,
    size: (Pt, Pt),
    region: &SearchRegion,
    spec: &StampSpec,
    font_index: usize,
) -> Result<Vec<(usize, Rect)>, StampError> {
    let indices = selection.resolve(doc.page_count())?;
    let mut placed = Vec::with_capacity(indices.len());

    for page_index in indices {
        let page = doc.page_mut(page_index).ok_or(StampError::PageMissing)?;
        let rect =
            find_free_rect(page, size, region).ok_or(StampError::NoFreeSpace { page_index })?;
        apply_stamp(page, rect, spec, font_index)?;
        info!(
            "stamped page {page_index} at ({}, {})..({}, {})",
            rect.x1, rect.y1, rect.x2, rect.y2
        );
        placed.push((page_index, rect));
    }

    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::page::{PageContents, TextLayout};
    use crate::pagesize;

    fn spec(lines: &[&str]) -> StampSpec {
        StampSpec::new(
            lines.iter().map(|s| s.to_string()).collect(),
            colours::BLACK,
            Rotation::R0,
            false,
        )
        .unwrap()
    }

    fn blocker(x1: f32, y1: f32, x2: f32, y2: f32) -> TextLayout {
        TextLayout {
            text: "blocker".into(),
            font: SpanFont {
                index: 0,
                size: Pt(12.0),
            },
            colour: colours::BLACK,
            origin: (Pt(x1), Pt(y1)),
            extent: Rect::new(Pt(x1), Pt(y1), Pt(x2), Pt(y2)),
        }
    }

    #[test]
    fn content_joins_lines_and_trims() {
        let spec = spec(&["one", "two"]);
        assert_eq!(spec.content(), "one\ntwo");

        let padded = StampSpec::new(
            vec!["  padded  ".into()],
            colours::BLACK,
            Rotation::R0,
            false,
        )
        .unwrap();
        assert_eq!(padded.content(), "padded");
    }

    #[test]
    fn blank_specs_are_rejected() {
        assert!(matches!(
            StampSpec::new(vec![], colours::BLACK, Rotation::R0, false),
            Err(StampError::EmptyStamp)
        ));
        assert!(matches!(
            StampSpec::new(
                vec!["  ".into(), "\n".into()],
                colours::BLACK,
                Rotation::R0,
                false
            ),
            Err(StampError::EmptyStamp)
        ));
    }

    #[test]
    fn elements_follow_the_order_key() {
        let mut elements = HashMap::new();
        elements.insert("h1".to_string(), "A".to_string());
        elements.insert("h2".to_string(), "B".to_string());
        elements.insert("h3".to_string(), "C".to_string());

        let spec = StampSpec::from_elements(
            &elements,
            "h3,h1",
            colours::BLACK,
            Rotation::R0,
            false,
        )
        .unwrap();
        assert_eq!(spec.content(), "C\nA");
    }

    #[test]
    fn empty_and_unknown_elements_are_skipped() {
        let mut elements = HashMap::new();
        elements.insert("h1".to_string(), "A".to_string());
        elements.insert("h2".to_string(), "".to_string());

        let spec = StampSpec::from_elements(
            &elements,
            "h2,missing,h1",
            colours::BLACK,
            Rotation::R0,
            false,
        )
        .unwrap();
        assert_eq!(spec.content(), "A");

        assert!(matches!(
            StampSpec::from_elements(&elements, "h2,missing", colours::BLACK, Rotation::R0, false),
            Err(StampError::EmptyStamp)
        ));
    }

    #[test]
    fn stamped_text_lands_in_the_claimed_rectangle() {
        let mut page = Page::new(pagesize::LETTER, None);
        let rect = Rect::new(Pt(0.0), Pt(712.0), Pt(120.0), Pt(792.0));

        apply_stamp(&mut page, rect, &spec(&["DRAFT", "v2"]), 0).unwrap();
        assert_eq!(page.text_in(rect), "DRAFT\nv2");
    }

    #[test]
    fn frame_adds_a_single_stroke_outline() {
        let mut page = Page::new(pagesize::LETTER, None);
        let rect = Rect::new(Pt(10.0), Pt(700.0), Pt(90.0), Pt(780.0));
        let framed = StampSpec::new(
            vec!["COPY".into()],
            colours::RED,
            Rotation::R0,
            true,
        )
        .unwrap();

        apply_stamp(&mut page, rect, &framed, 0).unwrap();
        let strokes: Vec<&Vec<u8>> = page
            .contents
            .iter()
            .filter_map(|c| match c {
                PageContents::Raw(ops) => Some(ops),
                _ => None,
            })
            .collect();
        assert_eq!(strokes.len(), 1);
        let ops = String::from_utf8(strokes[0].to_vec()).unwrap();
        assert!(ops.contains("10 700 80 80 re"));
        assert!(ops.contains('S'));
        assert!(!ops.contains('f'), "frame must stroke, not fill: {ops}");
    }

    #[test]
    fn repeated_framing_produces_identical_outlines() {
        let rect = Rect::new(Pt(10.0), Pt(700.0), Pt(90.0), Pt(780.0));
        let framed = StampSpec::new(
            vec!["COPY".into()],
            colours::BLUE,
            Rotation::R0,
            true,
        )
        .unwrap();

        let outline_of = |page: &Page, skip: usize| -> Vec<u8> {
            page.contents
                .iter()
                .skip(skip)
                .find_map(|c| match c {
                    PageContents::Raw(ops) => Some(ops.clone()),
                    _ => None,
                })
                .unwrap()
        };

        let mut page = Page::new(pagesize::LETTER, None);
        apply_stamp(&mut page, rect, &framed, 0).unwrap();
        let first = outline_of(&page, 0);
        apply_stamp(&mut page, rect, &framed, 0).unwrap();
        let second = outline_of(&page, 2);
        assert_eq!(first, second);
    }

    #[test]
    fn stamping_a_document_hits_every_selected_page() {
        let mut doc = Document::default();
        doc.add_page(Page::new(pagesize::LETTER, None));
        doc.add_page(Page::new(pagesize::LETTER, None));
        doc.add_page(Page::new(pagesize::LETTER, None));

        let placed = stamp_document(
            &mut doc,
            &PageSelection::All,
            (Pt(80.0), Pt(40.0)),
            &SearchRegion::default(),
            &spec(&["FILED"]),
            0,
        )
        .unwrap();

        assert_eq!(placed.len(), 3);
        for (page_index, rect) in placed {
            assert_eq!(doc.page(page_index).unwrap().text_in(rect), "FILED");
        }
    }

    #[test]
    fn a_full_page_aborts_the_batch_but_keeps_earlier_stamps() {
        let mut doc = Document::default();
        doc.add_page(Page::new(pagesize::LETTER, None));
        let mut full = Page::new(pagesize::LETTER, None);
        full.add_span(blocker(0.0, 554.0, 612.0, 792.0));
        doc.add_page(full);
        doc.add_page(Page::new(pagesize::LETTER, None));

        let result = stamp_document(
            &mut doc,
            &PageSelection::All,
            (Pt(80.0), Pt(40.0)),
            &SearchRegion::default(),
            &spec(&["FILED"]),
            0,
        );

        assert!(matches!(
            result,
            Err(StampError::NoFreeSpace { page_index: 1 })
        ));
        // page 0 was stamped before the failure and stays stamped
        assert!(doc
            .page(0)
            .unwrap()
            .contents
            .iter()
            .any(|c| matches!(c, PageContents::TextBox(_))));
        // page 2 was never reached
        assert!(doc.page(2).unwrap().contents.is_empty());
    }

    #[test]
    fn out_of_range_pages_fail_before_any_stamping() {
        let mut doc = Document::default();
        doc.add_page(Page::new(pagesize::LETTER, None));

        let result = stamp_document(
            &mut doc,
            &PageSelection::Pages(vec![0, 4]),
            (Pt(80.0), Pt(40.0)),
            &SearchRegion::default(),
            &spec(&["FILED"]),
            0,
        );

        assert!(matches!(
            result,
            Err(StampError::PageOutOfRange { index: 4, count: 1 })
        ));
        assert!(doc.page(0).unwrap().contents.is_empty());
    }
}
