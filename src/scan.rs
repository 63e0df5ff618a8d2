//! Grid search for text-free space in the top region of a page.

use crate::error::StampError;
use crate::page::Page;
use crate::rect::Rect;
use crate::units::Pt;
use log::debug;

/// How far down the page the search may reach, by default the top 30%
pub const DEFAULT_REGION_FRACTION: f32 = 0.30;
/// Grid resolution of the search, in points
pub const DEFAULT_STEP: Pt = Pt(5.0);

/// The searchable sub-area of a page: the top `fraction` of the page height
/// at full page width, scanned on a fixed grid of `step` points.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRegion {
    pub fraction: f32,
    pub step: Pt,
}

impl Default for SearchRegion {
    fn default() -> Self {
        SearchRegion {
            fraction: DEFAULT_REGION_FRACTION,
            step: DEFAULT_STEP,
        }
    }
}

impl SearchRegion {
    /// Create a search region, validating that `fraction` lies within (0, 1]
    /// and `step` is positive
    pub fn new(fraction: f32, step: Pt) -> Result<SearchRegion, StampError> {
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(StampError::InvalidRegionFraction { fraction });
        }
        if !(*step > 0.0) {
            return Err(StampError::InvalidStep { step: *step });
        }
        Ok(SearchRegion { fraction, step })
    }
}

/// Search the top region of `page` for a rectangle of the given size that
/// contains no text.
///
/// The grid is walked row-major from the top of the page down, left to
/// right, so the topmost free slot wins, and within a row the leftmost. The
/// first candidate whose [text_in](Page::text_in) query comes back blank is
/// returned; `None` means the region is exhausted, which callers should
/// treat as an expected outcome rather than a failure.
///
/// Candidates are not clipped: a size larger than the page yields
/// rectangles overhanging the page edge, and only the text-emptiness check
/// decides their fate.
///
/// ```
/// use pdf_stamp::{find_free_rect, pagesize, Page, Pt, SearchRegion};
///
/// let page = Page::new(pagesize::LETTER, None);
/// let rect = find_free_rect(&page, (Pt(80.0), Pt(80.0)), &SearchRegion::default()).unwrap();
/// assert_eq!(rect.x1, Pt(0.0));
/// assert_eq!(rect.y2, page.height());
/// ```
pub fn find_free_rect(page: &Page, size: (Pt, Pt), region: &SearchRegion) -> Option<Rect> {
    let (width, height) = size;
    let page_height = *page.height();
    let y_limit = (page_height * region.fraction).floor();
    let x_limit = (*page.width()).floor();
    let step = *region.step;

    // offsets are measured downwards from the top edge of the page and
    // converted to page coordinates per candidate
    let mut y = 0.0f32;
    while y < y_limit {
        let mut x = 0.0f32;
        while x < x_limit {
            let candidate = Rect {
                x1: Pt(x),
                y1: Pt(page_height - y - *height),
                x2: Pt(x + *width),
                y2: Pt(page_height - y),
            };
            if page.text_in(candidate).trim().is_empty() {
                debug!(
                    "found free {}x{} rect at ({}, {}) from page top",
                    width, height, x, y
                );
                return Some(candidate);
            }
            x += step;
        }
        y += step;
    }

    debug!(
        "no free {}x{} rect within the top {} of the page",
        width, height, region.fraction
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::page::{SpanFont, TextLayout};
    use crate::pagesize;

    fn span(text: &str, x1: f32, y1: f32, x2: f32, y2: f32) -> TextLayout {
        TextLayout {
            text: text.into(),
            font: SpanFont {
                index: 0,
                size: Pt(12.0),
            },
            colour: colours::BLACK,
            origin: (Pt(x1), Pt(y1)),
            extent: Rect::new(Pt(x1), Pt(y1), Pt(x2), Pt(y2)),
        }
    }

    // LETTER: 612 x 792 pt, so the top 30% spans page y in [554.4, 792)
    fn letter() -> Page {
        Page::new(pagesize::LETTER, None)
    }

    #[test]
    fn empty_page_yields_the_top_left_slot() {
        let page = letter();
        let rect = find_free_rect(&page, (Pt(80.0), Pt(40.0)), &SearchRegion::default()).unwrap();
        assert_eq!(rect, Rect::new(Pt(0.0), Pt(752.0), Pt(80.0), Pt(792.0)));
    }

    #[test]
    fn scan_is_deterministic() {
        let mut page = letter();
        page.add_span(span("header", 0.0, 740.0, 200.0, 792.0));

        let region = SearchRegion::default();
        let first = find_free_rect(&page, (Pt(80.0), Pt(40.0)), &region);
        let second = find_free_rect(&page, (Pt(80.0), Pt(40.0)), &region);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn topmost_row_wins_over_leftmost_column() {
        let mut page = letter();
        // block the top-left corner only; x = 50 in the top row is still
        // free and must win over dropping a row down to x = 0
        page.add_span(span("corner", 0.0, 742.0, 50.0, 792.0));

        let rect = find_free_rect(&page, (Pt(40.0), Pt(40.0)), &SearchRegion::default()).unwrap();
        assert_eq!(rect.x1, Pt(50.0));
        assert_eq!(rect.y2, Pt(792.0));
    }

    #[test]
    fn returned_rect_never_starts_below_the_region() {
        let mut page = letter();
        // cover the full width of all rows except the very last one in the
        // region; the scanner must still place the rect with its top edge
        // inside the region, even though its body hangs below
        page.add_span(span("wall", 0.0, 562.0, 612.0, 792.0));

        let rect = find_free_rect(&page, (Pt(80.0), Pt(40.0)), &SearchRegion::default()).unwrap();
        let offset_from_top = *page.height() - *rect.y2;
        assert!(offset_from_top < (*page.height() * 0.30).floor());
        assert!(*rect.y1 < 562.0);
    }

    #[test]
    fn returned_rect_contains_no_text() {
        let mut page = letter();
        page.add_span(span("title", 100.0, 700.0, 400.0, 730.0));
        page.add_span(span("subtitle", 100.0, 660.0, 350.0, 680.0));

        let rect = find_free_rect(&page, (Pt(120.0), Pt(60.0)), &SearchRegion::default()).unwrap();
        assert_eq!(page.text_in(rect).trim(), "");
    }

    #[test]
    fn fully_covered_region_is_exhausted() {
        let mut page = letter();
        // one span blanketing the whole top 30%
        page.add_span(span("wall", 0.0, 554.0, 612.0, 792.0));

        let rect = find_free_rect(&page, (Pt(80.0), Pt(40.0)), &SearchRegion::default());
        assert_eq!(rect, None);
    }

    #[test]
    fn whitespace_only_text_counts_as_free() {
        let mut page = letter();
        page.add_span(span("   \n  ", 0.0, 752.0, 612.0, 792.0));

        let rect = find_free_rect(&page, (Pt(80.0), Pt(40.0)), &SearchRegion::default()).unwrap();
        assert_eq!(rect.x1, Pt(0.0));
    }

    #[test]
    fn oversized_requests_overhang_the_page_unclipped() {
        let page = letter();
        let width = *page.width() * 2.0;
        let rect =
            find_free_rect(&page, (Pt(width), Pt(40.0)), &SearchRegion::default()).unwrap();
        assert_eq!(rect.x1, Pt(0.0));
        assert!(*rect.x2 > *page.width());
    }

    #[test]
    fn region_parameters_are_validated() {
        assert!(SearchRegion::new(0.30, Pt(5.0)).is_ok());
        assert!(SearchRegion::new(1.0, Pt(1.0)).is_ok());
        assert!(matches!(
            SearchRegion::new(0.0, Pt(5.0)),
            Err(StampError::InvalidRegionFraction { .. })
        ));
        assert!(matches!(
            SearchRegion::new(1.5, Pt(5.0)),
            Err(StampError::InvalidRegionFraction { .. })
        ));
        assert!(matches!(
            SearchRegion::new(0.30, Pt(0.0)),
            Err(StampError::InvalidStep { .. })
        ));
        assert!(matches!(
            SearchRegion::new(0.30, Pt(-2.0)),
            Err(StampError::InvalidStep { .. })
        ));
    }

    #[test]
    fn narrower_fraction_shrinks_the_reachable_rows() {
        let mut page = letter();
        // free space exists only below the top 10% of the page
        page.add_span(span("banner", 0.0, 712.0, 612.0, 792.0));

        let narrow = SearchRegion::new(0.10, Pt(5.0)).unwrap();
        assert_eq!(find_free_rect(&page, (Pt(80.0), Pt(40.0)), &narrow), None);

        let wide = SearchRegion::default();
        assert!(find_free_rect(&page, (Pt(80.0), Pt(40.0)), &wide).is_some());
    }
}
