//! End-to-end orchestration over an open document.
//!
//! Data flows strictly forward: tokenize → count → filter → rank → color →
//! highlight. No stage re-enters an earlier one, and a document that yields
//! zero salient words is not an error; the podium is simply empty and the
//! driver places zero annotations.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::engine::{Document, EngineResult};
use crate::frequency::FrequencyTable;
use crate::palette::{self, Color};
use crate::salience::{self, SalienceOptions};
use crate::text;

/// A podium word with its count and assigned highlight color.
#[derive(Debug, Clone, Serialize)]
pub struct PodiumEntry {
    /// The normalized token.
    pub word: String,
    /// Total occurrences across all pages.
    pub count: u64,
    /// The color its highlights are stroked with.
    pub color: Color,
}

/// Count word occurrences across every page of a document.
///
/// Each page is counted into its own table and folded in, so page order
/// cannot affect the totals.
#[instrument(skip_all, fields(pages = doc.page_count()))]
pub fn count_words<D: Document + ?Sized>(doc: &D) -> EngineResult<FrequencyTable> {
    let mut table = FrequencyTable::new();
    for page in 0..doc.page_count() {
        let mut page_table = FrequencyTable::new();
        page_table.extend(text::tokenize(&doc.page_text(page)?));
        table.merge(page_table);
    }
    debug!(unique = table.len(), tokens = table.total(), "words counted");
    Ok(table)
}

/// Run the salience pipeline: count, filter, rank, and assign colors.
///
/// Colors come from `rng`, one per podium entry, zipped positionally; pass
/// a seeded RNG for a reproducible palette.
#[instrument(skip_all)]
pub fn analyze<D, R>(doc: &D, opts: &SalienceOptions, rng: &mut R) -> EngineResult<Vec<PodiumEntry>>
where
    D: Document + ?Sized,
    R: Rng + ?Sized,
{
    let table = count_words(doc)?;
    let salient = salience::salient_words(&table, opts);
    let podium = salience::podium(salient, opts.threshold_podium);
    let colors = palette::generate(podium.len(), rng);

    debug!(selected = podium.len(), "podium selected");
    Ok(podium
        .into_iter()
        .zip(colors)
        .map(|(sw, color)| PodiumEntry {
            word: sw.word,
            count: sw.count,
            color,
        })
        .collect())
}

/// Highlight every occurrence of one podium word. Returns the number of
/// annotations placed.
pub fn highlight_word<D: Document + ?Sized>(
    doc: &mut D,
    word: &str,
    color: Color,
) -> EngineResult<usize> {
    let spans = doc.search(word)?;
    for span in &spans {
        doc.highlight(span, color)?;
    }
    Ok(spans.len())
}

/// Fan the whole podium out as highlight annotations, in podium order.
///
/// Pure fan-out: no filtering or ranking happens here.
#[instrument(skip_all, fields(words = podium.len()))]
pub fn highlight_podium<D: Document + ?Sized>(
    doc: &mut D,
    podium: &[PodiumEntry],
) -> EngineResult<usize> {
    let mut total = 0;
    for entry in podium {
        let placed = highlight_word(doc, &entry.word, entry.color)?;
        debug!(word = %entry.word, placed, "word highlighted");
        total += placed;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Rect, TextSpan};
    use crate::error::EngineError;
    use crate::stopwords::Language;
    use camino::Utf8Path;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// In-memory document: one string per page, highlights recorded.
    struct FakeDocument {
        pages: Vec<String>,
        highlights: Vec<(TextSpan, Color)>,
    }

    impl FakeDocument {
        fn new(pages: &[&str]) -> Self {
            Self {
                pages: pages.iter().map(|p| (*p).to_string()).collect(),
                highlights: Vec::new(),
            }
        }
    }

    impl Document for FakeDocument {
        fn page_count(&self) -> usize {
            self.pages.len()
        }

        fn page_text(&self, page: usize) -> EngineResult<String> {
            self.pages
                .get(page)
                .cloned()
                .ok_or(EngineError::PageOutOfRange(page))
        }

        fn search(&self, word: &str) -> EngineResult<Vec<TextSpan>> {
            let needle = word.to_lowercase();
            let mut spans = Vec::new();
            for (page, text) in self.pages.iter().enumerate() {
                let haystack = text.to_lowercase();
                for (offset, _) in haystack.match_indices(&needle) {
                    spans.push(TextSpan {
                        page,
                        rect: Rect {
                            x0: offset as f64,
                            y0: 0.0,
                            x1: (offset + needle.len()) as f64,
                            y1: 10.0,
                        },
                    });
                }
            }
            Ok(spans)
        }

        fn highlight(&mut self, span: &TextSpan, color: Color) -> EngineResult<()> {
            self.highlights.push((*span, color));
            Ok(())
        }

        fn clear_annotations(&mut self) -> EngineResult<usize> {
            let n = self.highlights.len();
            self.highlights.clear();
            Ok(n)
        }

        fn save(&mut self, _path: &Utf8Path) -> EngineResult<()> {
            Ok(())
        }
    }

    fn opts(occurrence: u64, podium: usize) -> SalienceOptions {
        SalienceOptions {
            threshold_occurrence: occurrence,
            threshold_podium: podium,
            language: Language::English,
        }
    }

    #[test]
    fn counts_span_all_pages() {
        let doc = FakeDocument::new(&["word word", "word other"]);
        let table = count_words(&doc).unwrap();
        assert_eq!(table.get("word"), 3);
        assert_eq!(table.get("other"), 1);
    }

    #[test]
    fn cat_dog_bird_ends_with_empty_podium() {
        let doc = FakeDocument::new(&["cat cat cat cat cat cat dog dog dog dog dog dog bird"]);
        let mut rng = StdRng::seed_from_u64(0);
        let podium = analyze(&doc, &opts(5, 2), &mut rng).unwrap();
        assert!(podium.is_empty());
    }

    #[test]
    fn empty_podium_places_zero_highlights() {
        let mut doc = FakeDocument::new(&["too short"]);
        let placed = highlight_podium(&mut doc, &[]).unwrap();
        assert_eq!(placed, 0);
        assert!(doc.highlights.is_empty());
    }

    #[test]
    fn one_color_per_podium_entry() {
        let page = "palette palette palette palette palette palette \
                    podium podium podium podium podium podium podium";
        let doc = FakeDocument::new(&[page]);
        let mut rng = StdRng::seed_from_u64(3);
        let podium = analyze(&doc, &opts(5, 15), &mut rng).unwrap();
        assert_eq!(podium.len(), 2);
        // count descending: podium (7) before palette (6)
        assert_eq!(podium[0].word, "podium");
        assert_eq!(podium[0].count, 7);
        assert_eq!(podium[1].word, "palette");
        assert_eq!(podium[1].count, 6);
    }

    #[test]
    fn driver_places_one_annotation_per_occurrence() {
        let mut doc = FakeDocument::new(&["alpha beta alpha", "beta alpha"]);
        let entries = vec![
            PodiumEntry {
                word: "alpha".into(),
                count: 3,
                color: Color {
                    r: 1.0,
                    g: 0.5,
                    b: 0.5,
                },
            },
            PodiumEntry {
                word: "beta".into(),
                count: 2,
                color: Color {
                    r: 0.5,
                    g: 1.0,
                    b: 0.5,
                },
            },
        ];
        let placed = highlight_podium(&mut doc, &entries).unwrap();
        assert_eq!(placed, 5);
        assert_eq!(doc.highlights.len(), 5);
        // podium order: all alpha highlights come before any beta highlight
        let alpha_color = entries[0].color;
        assert!(
            doc.highlights[..3]
                .iter()
                .all(|(_, color)| *color == alpha_color)
        );
    }

    #[test]
    fn analyze_end_to_end_collapses_duplicates() {
        let page = "feature feature feature feature feature feature feature feature feature feature \
                    features features features features features features features features \
                    testing testing testing testing testing testing";
        let doc = FakeDocument::new(&[page]);
        let mut rng = StdRng::seed_from_u64(11);
        let podium = analyze(&doc, &opts(5, 15), &mut rng).unwrap();
        let words: Vec<&str> = podium.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["feature", "testing"]);
    }
}
