use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::Font;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::*;
use pdf_writer::{Finish, Name, Pdf};

/// Which document font a piece of text is set in, and at what size
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    /// Index of the font in [Document::fonts](crate::Document::fonts)
    pub index: usize,
    pub size: Pt,
}

/// A positioned run of text. `origin` is the baseline start; `extent` is the
/// area the run occupies on the page and is what free-space queries test
/// against.
#[derive(Clone, PartialEq, Debug)]
pub struct TextLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub origin: (Pt, Pt),
    pub extent: Rect,
}

/// A quarter-turn rotation applied to a text box within its rectangle
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// Parse a rotation given in degrees; only the four axis-aligned values
    /// are accepted
    pub fn from_degrees(degrees: i64) -> Option<Rotation> {
        match degrees {
            0 => Some(Rotation::R0),
            90 => Some(Rotation::R90),
            180 => Some(Rotation::R180),
            270 => Some(Rotation::R270),
            _ => None,
        }
    }

    pub fn degrees(self) -> i64 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }

    pub(crate) fn quarter_turns(self) -> u8 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 1,
            Rotation::R180 => 2,
            Rotation::R270 => 3,
        }
    }
}

/// Multiple lines of text anchored inside a rectangle, optionally rotated by
/// quarter turns. Lines are laid out top to bottom in the rotated frame,
/// left-aligned, and are never wrapped or shrunk to fit.
#[derive(Clone, PartialEq, Debug)]
pub struct TextBoxLayout {
    pub lines: Vec<String>,
    pub font: SpanFont,
    pub colour: Colour,
    pub rect: Rect,
    pub rotation: Rotation,
}

/// Everything that a page can contain
#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    /// A positioned run of text
    Text(TextLayout),
    /// An anchored, optionally rotated text box
    TextBox(TextBoxLayout),
    /// Raw content stream operations
    Raw(Vec<u8>),
}

impl PageContents {
    /// The text carried by this content item, if any
    pub fn text(&self) -> Option<String> {
        match self {
            PageContents::Text(span) => Some(span.text.clone()),
            PageContents::TextBox(text_box) => Some(text_box.lines.join("\n")),
            PageContents::Raw(_) => None,
        }
    }

    /// The area this content item occupies, if it is known. Raw content is
    /// opaque to geometry queries.
    pub fn extent(&self) -> Option<Rect> {
        match self {
            PageContents::Text(span) => Some(span.extent),
            PageContents::TextBox(text_box) => Some(text_box.rect),
            PageContents::Raw(_) => None,
        }
    }
}

/// Page margins, used to derive the content box from the page size. Nothing
/// prevents content from overflowing the margins; they act as guidelines and
/// become the `ArtBox` of the generated page.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise
    /// fashion starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all(value: Pt) -> Margins {
        Margins {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create margins with different vertical (top and bottom) and horizontal
    /// (left and right) values
    pub fn symmetric(vertical: Pt, horizontal: Pt) -> Margins {
        Margins {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Create margins where all values are 0
    pub fn empty() -> Margins {
        Margins::default()
    }
}

/// A single page of a document: its geometry plus an ordered list of
/// contents. Pages are owned by the [Document](crate::Document); stamping
/// operations borrow one page at a time.
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content should live, i.e. within the margins
    pub content_box: Rect,
    /// The page contents, in insertion order
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let margins = margins.unwrap_or_default();
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: size.0,
                y2: size.1,
            },
            content_box: Rect {
                x1: margins.left,
                y1: margins.bottom,
                x2: size.0 - margins.right,
                y2: size.1 - margins.top,
            },
            contents: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.x2 - self.media_box.x1
    }

    pub fn height(&self) -> Pt {
        self.media_box.y2 - self.media_box.y1
    }

    /// Add an already laid-out text run to the page
    pub fn add_span(&mut self, span: TextLayout) {
        self.contents.push(PageContents::Text(span));
    }

    /// Lay out a single run of text starting at the given baseline origin,
    /// computing its extent from the font metrics, and add it to the page
    pub fn add_text<S: ToString>(
        &mut self,
        fonts: &[Font],
        origin: (Pt, Pt),
        text: S,
        font: SpanFont,
        colour: Colour,
    ) {
        let text = text.to_string();
        let face = &fonts[font.index];
        let extent = Rect {
            x1: origin.0,
            y1: origin.1 + face.descent(font.size),
            x2: origin.0 + face.width_of(&text, font.size),
            y2: origin.1 + face.ascent(font.size),
        };
        self.add_span(TextLayout {
            text,
            font,
            colour,
            origin,
            extent,
        });
    }

    /// Add an anchored text box to the page
    pub fn add_text_box(&mut self, text_box: TextBoxLayout) {
        self.contents.push(PageContents::TextBox(text_box));
    }

    /// Add raw content stream operations to the page
    pub fn add_content(&mut self, content: pdf_writer::Content) {
        self.contents.push(PageContents::Raw(content.finish()));
    }

    /// All text intersecting the given rectangle, in insertion order, joined
    /// with newlines. Only strict (positive-area) overlap counts; content
    /// that merely touches the rectangle's edge is excluded.
    pub fn text_in(&self, rect: Rect) -> String {
        self.contents
            .iter()
            .filter(|content| {
                content
                    .extent()
                    .map(|extent| extent.intersects(&rect))
                    .unwrap_or(false)
            })
            .filter_map(PageContents::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Calculates the coordinates of where text can start on the page to be
    /// just within the top left margin, taking into account the ascending
    /// height of the font at the given size
    pub fn baseline_start(&self, font: &Font, size: Pt) -> (Pt, Pt) {
        let x = self.content_box.x1;
        let y = self.content_box.y2 - font.ascent(size);
        (x, y)
    }

    pub(crate) fn render(&self, fonts: &[Font]) -> Result<Vec<u8>, std::io::Error> {
        render_contents(&self.contents, fonts)
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &[Font],
        writer: &mut Pdf,
    ) -> Result<(), std::io::Error> {
        let id = refs
            .get(RefType::Page(page_index))
            .expect("page ref was pre-generated");
        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(refs.get(RefType::PageTree).expect("page tree ref exists"));

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (i, _) in fonts.iter().enumerate() {
            resource_fonts.pair(
                Name(format!("F{i}").as_bytes()),
                refs.get(RefType::Font(i)).expect("font refs exist"),
            );
        }
        resource_fonts.finish();
        resources.finish();

        let content_id = refs.gen(RefType::ContentForPage(page_index));
        page.contents(content_id);
        page.finish();

        let rendered = self.render(fonts)?;
        writer.stream(content_id, rendered.as_slice());
        Ok(())
    }
}
