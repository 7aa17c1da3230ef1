//! Tokenization of extracted page text.
//!
//! Raw page text goes through three normalization steps before splitting:
//! non-word and digit characters become spaces, runs of spaces collapse to
//! one, and the whole string is lowercased. The split keeps empty fragments
//! produced by adjacent delimiters; [`crate::frequency::FrequencyTable`]
//! discards them during counting.

use regex::Regex;
use std::sync::LazyLock;

/// Regex for characters that never belong to a word: anything non-word, plus digits.
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W|\d").expect("valid regex"));

/// Regex for runs of two or more spaces.
static MULTI_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ ]{2,}").expect("valid regex"));

/// Regex for token delimiters.
static DELIMITERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s()\n\[\],.]").expect("valid regex"));

/// Split a page's raw text into normalized word tokens.
///
/// Empty tokens are preserved in the output so the counting stage owns the
/// "discard, do not increment" decision.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn tokenize(text: &str) -> Vec<String> {
    let scrubbed = NON_WORD.replace_all(text, " ");
    let collapsed = MULTI_SPACE.replace_all(&scrubbed, " ");
    let lowered = collapsed.to_lowercase();
    DELIMITERS.split(&lowered).map(str::to_string).collect()
}
