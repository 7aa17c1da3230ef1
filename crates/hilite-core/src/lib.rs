//! Core library for hilite.
//!
//! This crate provides the salience pipeline used by the `hilite` CLI and any
//! downstream consumers: tokenization, frequency counting, stop-word and
//! duplicate filtering, top-K podium selection, and highlight palette
//! generation. The document backend is abstracted behind the
//! [`engine::Document`] trait so the pipeline never depends on a concrete
//! PDF library.
//!
//! # Modules
//!
//! - [`text`] - Tokenization of extracted page text
//! - [`frequency`] - Word frequency accumulation
//! - [`salience`] - Filtering and podium selection
//! - [`palette`] - Highlight color generation
//! - [`stopwords`] - Per-language stop-word sets
//! - [`engine`] - The document backend seam
//! - [`pipeline`] - End-to-end orchestration
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use hilite_core::frequency::FrequencyTable;
//! use hilite_core::salience::{self, SalienceOptions};
//! use hilite_core::text;
//!
//! let mut table = FrequencyTable::new();
//! table.extend(text::tokenize("Ferris the crab, Ferris the mascot."));
//!
//! let opts = SalienceOptions {
//!     threshold_occurrence: 1,
//!     ..SalienceOptions::default()
//! };
//! let salient = salience::salient_words(&table, &opts);
//! assert_eq!(salient[0].word, "ferris");
//! ```
#![deny(unsafe_code)]

pub mod config;

pub mod engine;

pub mod error;

pub mod frequency;

pub mod palette;

pub mod pipeline;

pub mod salience;

pub mod stopwords;

pub mod text;

pub use config::{Config, ConfigLoader, LogLevel};

pub use engine::{Document, Rect, TextSpan};

pub use error::{ConfigError, ConfigResult, EngineError, EngineResult};

pub use palette::Color;

pub use pipeline::PodiumEntry;

pub use salience::{SalienceOptions, SalientWord};

pub use stopwords::Language;
