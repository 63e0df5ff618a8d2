//! Content stream rendering: turns page contents into PDF operators.

use crate::colour::Colour;
use crate::font::Font;
use crate::page::{PageContents, Rotation, SpanFont, TextBoxLayout, TextLayout};
use crate::rect::Rect;
use crate::transform::Transform;
use crate::units::Pt;
use std::io::Write;

/// Renders page contents to a PDF content stream, converting the high-level
/// content items into low-level PDF operators.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &[Font],
) -> Result<Vec<u8>, std::io::Error> {
    if contents.is_empty() {
        return Ok(Vec::default());
    }

    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(span) => render_span(&mut content, span, fonts)?,
            PageContents::TextBox(text_box) => render_text_box(&mut content, text_box, fonts)?,
            PageContents::Raw(ops) => {
                write!(&mut content, "q\n")?;
                content.write_all(ops.as_slice())?;
                write!(&mut content, "\nQ\n")?;
            }
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_span(
    content: &mut Vec<u8>,
    span: &TextLayout,
    fonts: &[Font],
) -> Result<(), std::io::Error> {
    write!(content, "q\n")?;
    write_font(content, span.font)?;
    write_fill_colour(content, span.colour)?;
    write!(content, "BT\n")?;
    write!(content, "{} {} Td\n", span.origin.0, span.origin.1)?;
    write_glyphs(content, &span.text, &fonts[span.font.index])?;
    write!(content, "ET\n")?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_text_box(
    content: &mut Vec<u8>,
    text_box: &TextBoxLayout,
    fonts: &[Font],
) -> Result<(), std::io::Error> {
    if text_box.lines.is_empty() {
        return Ok(());
    }

    let font = &fonts[text_box.font.index];
    let size = text_box.font.size;
    let (transform, _, local_height) = box_frame(text_box.rotation, text_box.rect);

    write!(content, "q\n")?;
    write!(
        content,
        "{} {} {} {} {} {} cm\n",
        transform.a, transform.b, transform.c, transform.d, transform.e, transform.f
    )?;
    write_font(content, text_box.font)?;
    write_fill_colour(content, text_box.colour)?;

    // first baseline sits one ascent below the top of the (rotated) box;
    // overflowing lines are written anyway, matching the scanner's
    // permissive treatment of page bounds
    let mut baseline = local_height - font.ascent(size);
    for line in text_box.lines.iter() {
        write!(content, "BT\n")?;
        write!(content, "0 {} Td\n", baseline)?;
        write_glyphs(content, line, font)?;
        write!(content, "ET\n")?;
        baseline -= font.line_height(size);
    }

    write!(content, "Q\n")?;
    Ok(())
}

/// The transform placing a text box's local frame onto the page, along with
/// the local frame's width and height. The local frame has its origin at the
/// bottom-left of the rotated box, with x running along the reading
/// direction; for quarter-turn rotations the local width and height are the
/// rectangle's swapped.
pub(crate) fn box_frame(rotation: Rotation, rect: Rect) -> (Transform, Pt, Pt) {
    let turns = Transform::quarter_turns(rotation.quarter_turns());
    match rotation {
        Rotation::R0 => (
            turns.with_translate(rect.x1, rect.y1),
            rect.width(),
            rect.height(),
        ),
        Rotation::R90 => (
            turns.with_translate(rect.x2, rect.y1),
            rect.height(),
            rect.width(),
        ),
        Rotation::R180 => (
            turns.with_translate(rect.x2, rect.y2),
            rect.width(),
            rect.height(),
        ),
        Rotation::R270 => (
            turns.with_translate(rect.x1, rect.y2),
            rect.height(),
            rect.width(),
        ),
    }
}

#[allow(clippy::write_with_newline)]
fn write_font(content: &mut Vec<u8>, font: SpanFont) -> Result<(), std::io::Error> {
    write!(content, "/F{} {} Tf\n", font.index, font.size)
}

#[allow(clippy::write_with_newline)]
fn write_fill_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
        Colour::CMYK { c, m, y, k } => write!(content, "{c} {m} {y} {k} k\n"),
        Colour::Grey { g } => write!(content, "{g} g\n"),
    }
}

#[allow(clippy::write_with_newline)]
fn write_glyphs(content: &mut Vec<u8>, text: &str, font: &Font) -> Result<(), std::io::Error> {
    write!(content, "<")?;
    for ch in text.chars() {
        write!(
            content,
            "{:04x}",
            font.glyph_id(ch).unwrap_or_else(|| font
                .replacement_glyph_id()
                .unwrap_or_else(|| font.glyph_id('?').expect("font has '?' glyph")))
        )?;
    }
    write!(content, "> Tj\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rect {
        Rect::new(Pt(100.0), Pt(600.0), Pt(220.0), Pt(680.0))
    }

    #[test]
    fn unrotated_frame_anchors_at_the_lower_left() {
        let (t, w, h) = box_frame(Rotation::R0, rect());
        assert_eq!(t.apply(0.0, 0.0), (100.0, 600.0));
        assert_eq!(w, Pt(120.0));
        assert_eq!(h, Pt(80.0));
    }

    #[test]
    fn quarter_turn_frames_cover_the_same_rectangle() {
        for rotation in [Rotation::R90, Rotation::R180, Rotation::R270] {
            let (t, w, h) = box_frame(rotation, rect());
            let corners = [
                t.apply(0.0, 0.0),
                t.apply(*w, 0.0),
                t.apply(0.0, *h),
                t.apply(*w, *h),
            ];
            let min_x = corners.iter().map(|c| c.0).fold(f32::INFINITY, f32::min);
            let max_x = corners.iter().map(|c| c.0).fold(f32::NEG_INFINITY, f32::max);
            let min_y = corners.iter().map(|c| c.1).fold(f32::INFINITY, f32::min);
            let max_y = corners.iter().map(|c| c.1).fold(f32::NEG_INFINITY, f32::max);
            assert_eq!((min_x, min_y, max_x, max_y), (100.0, 600.0, 220.0, 680.0));
        }
    }

    #[test]
    fn rotated_reading_direction_follows_the_turn() {
        // 90 degrees: reading direction runs up the page
        let (t, _, _) = box_frame(Rotation::R90, rect());
        let origin = t.apply(0.0, 0.0);
        let along = t.apply(10.0, 0.0);
        assert_eq!(along.0, origin.0);
        assert_eq!(along.1 - origin.1, 10.0);

        // 270 degrees: reading direction runs down the page
        let (t, _, _) = box_frame(Rotation::R270, rect());
        let origin = t.apply(0.0, 0.0);
        let along = t.apply(10.0, 0.0);
        assert_eq!(along.0, origin.0);
        assert_eq!(along.1 - origin.1, -10.0);
    }
}
