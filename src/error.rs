use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum StampError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    /// The stamp text was empty after trimming whitespace
    #[error("stamp has no text content")]
    EmptyStamp,

    /// A colour name outside the palette was requested
    #[error("unknown colour name: {name:?}")]
    UnknownColour { name: String },

    /// A rotation other than 0, 90, 180, or 270 degrees was requested
    #[error("invalid rotation {value:?}: expected 0, 90, 180, or 270")]
    InvalidRotation { value: String },

    /// A stamp size could not be parsed or was not positive
    #[error("invalid size {value:?}: expected \"width,height\" in points")]
    InvalidSize { value: String },

    /// The search grid step must be positive
    #[error("search step must be positive, got {step}")]
    InvalidStep { step: f32 },

    /// The searchable portion of the page height must be within (0, 1]
    #[error("region fraction must be within (0, 1], got {fraction}")]
    InvalidRegionFraction { fraction: f32 },

    /// A page index referred to a page the document does not have
    #[error("page {index} out of range: document has {count} page(s)")]
    PageOutOfRange { index: usize, count: usize },

    /// A page id resolved to nothing in the document
    #[error("page missing from document")]
    PageMissing,

    /// The scan exhausted the top region of a page without finding room
    #[error("no free space in the top region of page {page_index}")]
    NoFreeSpace { page_index: usize },
}
