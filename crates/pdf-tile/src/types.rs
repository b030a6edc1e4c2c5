use crate::constants::{A4_DIMENSIONS_PT, LETTER_DIMENSIONS_PT};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TileError {
    #[error("The source PDF has no pages")]
    EmptySource,
    #[error("The source is not a readable PDF: {0}")]
    MalformedSource(String),
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
    #[error("Failed to compose the output PDF: {0}")]
    CompositionFailure(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, TileError>;

// Document-model failures after the source has been parsed happen while
// embedding, drawing or serializing the output.
impl From<lopdf::Error> for TileError {
    fn from(err: lopdf::Error) -> Self {
        TileError::CompositionFailure(err.to_string())
    }
}

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: dimensions as listed in the catalog
    #[default]
    Portrait,
    /// Landscape: width and height swapped
    Landscape,
}

/// Output paper sizes, in points (1/72 inch)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    Letter,
    A4,
    Custom { width_pt: f64, height_pt: f64 },
}

impl PaperSize {
    /// Get base dimensions (portrait)
    pub fn dimensions_pt(self) -> (f64, f64) {
        match self {
            PaperSize::Letter => LETTER_DIMENSIONS_PT,
            PaperSize::A4 => A4_DIMENSIONS_PT,
            PaperSize::Custom {
                width_pt,
                height_pt,
            } => (width_pt, height_pt),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f64, f64) {
        let (w, h) = self.dimensions_pt();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// Size of an output page in points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageFormat {
    pub width: f64,
    pub height: f64,
}

impl PageFormat {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn from_paper(paper: PaperSize, orientation: Orientation) -> Self {
        let (width, height) = paper.dimensions_with_orientation(orientation);
        Self { width, height }
    }
}

/// The page formats offered to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageLayout {
    #[default]
    LetterPortrait,
    LetterLandscape,
    A4Portrait,
    A4Landscape,
}

impl PageLayout {
    pub fn paper_size(self) -> PaperSize {
        match self {
            PageLayout::LetterPortrait | PageLayout::LetterLandscape => PaperSize::Letter,
            PageLayout::A4Portrait | PageLayout::A4Landscape => PaperSize::A4,
        }
    }

    pub fn orientation(self) -> Orientation {
        match self {
            PageLayout::LetterPortrait | PageLayout::A4Portrait => Orientation::Portrait,
            PageLayout::LetterLandscape | PageLayout::A4Landscape => Orientation::Landscape,
        }
    }

    /// Resolve the output page dimensions, swapped for landscape variants
    pub fn format(self) -> PageFormat {
        PageFormat::from_paper(self.paper_size(), self.orientation())
    }
}

/// Columns x rows arrangement of tiles on one output page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridShape {
    pub columns: usize,
    pub rows: usize,
}

impl GridShape {
    /// Create a grid shape; both dimensions must be at least 1
    pub fn new(columns: usize, rows: usize) -> Result<Self> {
        if columns == 0 || rows == 0 {
            return Err(TileError::InvalidLayout(format!(
                "grid must have at least one column and one row (got {}x{})",
                columns, rows
            )));
        }
        Ok(Self { columns, rows })
    }

    /// Total number of tiles on the page
    pub fn tile_count(&self) -> usize {
        self.columns * self.rows
    }
}

impl Default for GridShape {
    fn default() -> Self {
        CopiesPerPage::default().grid_shape()
    }
}

/// Copies-per-page selections offered to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopiesPerPage {
    One,
    Four,
    #[default]
    Eight,
    Nine,
}

impl CopiesPerPage {
    pub fn count(self) -> usize {
        match self {
            CopiesPerPage::One => 1,
            CopiesPerPage::Four => 4,
            CopiesPerPage::Eight => 8,
            CopiesPerPage::Nine => 9,
        }
    }

    pub fn grid_shape(self) -> GridShape {
        let (columns, rows) = match self {
            CopiesPerPage::One => (1, 1),
            CopiesPerPage::Four => (2, 2),
            CopiesPerPage::Eight => (2, 4),
            CopiesPerPage::Nine => (3, 3),
        };
        GridShape { columns, rows }
    }
}

impl TryFrom<u32> for CopiesPerPage {
    type Error = TileError;

    fn try_from(count: u32) -> Result<Self> {
        match count {
            1 => Ok(CopiesPerPage::One),
            4 => Ok(CopiesPerPage::Four),
            8 => Ok(CopiesPerPage::Eight),
            9 => Ok(CopiesPerPage::Nine),
            other => Err(TileError::Config(format!(
                "{} copies per page is not supported (choose 1, 4, 8 or 9)",
                other
            ))),
        }
    }
}
