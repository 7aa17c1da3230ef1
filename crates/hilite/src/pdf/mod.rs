//! The lopdf-backed document engine.
//!
//! Implements [`hilite_core::engine::Document`] over `lopdf`: text
//! extraction, viewer-style word search, highlight annotations, and save.

mod engine;
mod locate;

pub use engine::PdfDocument;
