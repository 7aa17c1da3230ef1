//! The document backend seam.
//!
//! The pipeline talks to a paged document only through the [`Document`]
//! trait: extract text, locate word occurrences, place highlight
//! annotations, and save. The `hilite` CLI provides the real PDF backend;
//! tests use an in-memory fake.

use camino::Utf8Path;

pub use crate::error::{EngineError, EngineResult};
use crate::palette::Color;

/// Axis-aligned rectangle in page space (PDF points, origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x0: f64,
    /// Bottom edge.
    pub y0: f64,
    /// Right edge.
    pub x1: f64,
    /// Top edge.
    pub y1: f64,
}

impl Rect {
    /// Width of the rectangle.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// One located occurrence of a word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSpan {
    /// Zero-based page index.
    pub page: usize,
    /// Bounding box of the occurrence on that page.
    pub rect: Rect,
}

/// An open paged document.
///
/// Page indices are zero-based and valid in `0..page_count()`.
pub trait Document {
    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Plain text extracted from one page.
    fn page_text(&self, page: usize) -> EngineResult<String>;

    /// Every occurrence of `word` across all pages, in page order.
    ///
    /// Matching is case-insensitive and substring-based, like a viewer's
    /// text search.
    fn search(&self, word: &str) -> EngineResult<Vec<TextSpan>>;

    /// Place a highlight annotation over `span`, stroked with `color`.
    fn highlight(&mut self, span: &TextSpan, color: Color) -> EngineResult<()>;

    /// Remove every annotation from the document. Returns how many were removed.
    fn clear_annotations(&mut self) -> EngineResult<usize>;

    /// Write the document to `path`.
    fn save(&mut self, path: &Utf8Path) -> EngineResult<()>;
}
