//! Salience filtering and podium selection.
//!
//! Turns a raw [`FrequencyTable`] into the short list of words worth
//! highlighting: stop words out, short words out, rare words out,
//! morphological near-duplicates collapsed, then the top-K by count.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::frequency::FrequencyTable;
use crate::stopwords::{self, Language};

/// Tunables for the salience filter.
#[derive(Debug, Clone, Copy)]
pub struct SalienceOptions {
    /// A word must occur strictly more often than this to survive.
    pub threshold_occurrence: u64,
    /// How many top words to keep for highlighting.
    pub threshold_podium: usize,
    /// Stop-word corpus to apply.
    pub language: Language,
}

impl Default for SalienceOptions {
    fn default() -> Self {
        Self {
            threshold_occurrence: 5,
            threshold_podium: 15,
            language: Language::English,
        }
    }
}

/// A word that survived filtering, with its document-wide count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalientWord {
    /// The normalized token.
    pub word: String,
    /// Total occurrences across all pages.
    pub count: u64,
}

/// Apply the salience filter: stop words, minimum length, minimum count,
/// then duplicate collapsing.
///
/// The steps run in that order, each over the previous step's output. The
/// result keeps the table's first-encounter order, never contains a word
/// together with a strict superstring of it, and leaves counts untouched.
#[tracing::instrument(skip_all, fields(unique = table.len()))]
pub fn salient_words(table: &FrequencyTable, opts: &SalienceOptions) -> Vec<SalientWord> {
    let stop = stopwords::for_language(opts.language);

    let kept: Vec<SalientWord> = table
        .iter()
        .filter(|(word, _)| !stop.contains(word))
        .filter(|(word, _)| word.chars().count() > 3)
        .filter(|(_, count)| *count > opts.threshold_occurrence)
        .map(|(word, count)| SalientWord {
            word: word.to_string(),
            count,
        })
        .collect();

    let dropped = collapse_duplicates(&kept);
    let survivors: Vec<SalientWord> = kept
        .into_iter()
        .filter(|sw| !dropped.contains(sw.word.as_str()))
        .collect();

    debug!(
        survivors = survivors.len(),
        collapsed = dropped.len(),
        "salience filter applied"
    );
    survivors
}

/// Collect the longer members of every mutually-substring group.
///
/// For each surviving word `w`, its group is every survivor that contains
/// `w` as a substring (including `w` itself). If the group has more than
/// one member, everything longer than the group's minimum length is marked
/// for removal. Distinct equal-length strings cannot contain one another,
/// so `w` is always the unique minimum of its own group and all words of
/// minimal length survive.
///
/// Removals are gathered in a single pass over the snapshot and applied by
/// the caller at the end, so no group is recomputed mid-collapse.
fn collapse_duplicates(words: &[SalientWord]) -> HashSet<String> {
    let mut dropped = HashSet::new();
    for seed in words {
        let group: Vec<&SalientWord> = words
            .iter()
            .filter(|other| other.word.contains(&seed.word))
            .collect();
        if group.len() <= 1 {
            continue;
        }
        let min_len = group
            .iter()
            .map(|sw| sw.word.chars().count())
            .min()
            .unwrap_or(0);
        for member in group {
            if member.word.chars().count() != min_len {
                dropped.insert(member.word.clone());
            }
        }
    }
    dropped
}

/// Keep the top `limit` words by count.
///
/// The sort is stable and descending, so equal counts preserve the filter's
/// output order. Returns `min(limit, |words|)` entries.
pub fn podium(mut words: Vec<SalientWord>, limit: usize) -> Vec<SalientWord> {
    words.sort_by(|a, b| b.count.cmp(&a.count));
    words.truncate(limit);
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::tokenize;

    fn table_of(pairs: &[(&str, u64)]) -> FrequencyTable {
        let mut table = FrequencyTable::new();
        for (word, count) in pairs {
            for _ in 0..*count {
                table.add(word);
            }
        }
        table
    }

    fn names(words: &[SalientWord]) -> Vec<&str> {
        words.iter().map(|sw| sw.word.as_str()).collect()
    }

    #[test]
    fn stop_words_are_removed_first() {
        let table = table_of(&[("there", 20), ("salience", 20)]);
        let opts = SalienceOptions {
            threshold_occurrence: 5,
            ..SalienceOptions::default()
        };
        assert_eq!(names(&salient_words(&table, &opts)), vec!["salience"]);
    }

    #[test]
    fn short_words_are_removed() {
        // "cats" is four characters and passes; "cat" is three and does not.
        let table = table_of(&[("cat", 20), ("cats", 20)]);
        let opts = SalienceOptions::default();
        assert_eq!(names(&salient_words(&table, &opts)), vec!["cats"]);
    }

    #[test]
    fn occurrence_threshold_is_strictly_greater() {
        let table = table_of(&[("exactly", 5), ("above", 6)]);
        let opts = SalienceOptions {
            threshold_occurrence: 5,
            ..SalienceOptions::default()
        };
        assert_eq!(names(&salient_words(&table, &opts)), vec!["above"]);
    }

    #[test]
    fn collapses_morphological_variants() {
        // "features" collapses into "feature"; "testing" is unrelated.
        let table = table_of(&[("feature", 10), ("features", 8), ("testing", 6)]);
        let opts = SalienceOptions {
            threshold_occurrence: 5,
            ..SalienceOptions::default()
        };
        let result = salient_words(&table, &opts);
        assert_eq!(names(&result), vec!["feature", "testing"]);
        assert_eq!(result[0].count, 10);
        assert_eq!(result[1].count, 6);
    }

    #[test]
    fn collapse_handles_chains() {
        // "high" is a substring of both longer forms; both are removed.
        let table = table_of(&[("high", 10), ("highlight", 9), ("highlighting", 8)]);
        let opts = SalienceOptions {
            threshold_occurrence: 5,
            ..SalienceOptions::default()
        };
        assert_eq!(names(&salient_words(&table, &opts)), vec!["high"]);
    }

    #[test]
    fn no_output_contains_a_strict_superstring() {
        let table = table_of(&[
            ("test", 10),
            ("tests", 9),
            ("testing", 8),
            ("contest", 7),
            ("word", 11),
        ]);
        let opts = SalienceOptions {
            threshold_occurrence: 5,
            ..SalienceOptions::default()
        };
        let result = salient_words(&table, &opts);
        for a in &result {
            for b in &result {
                assert!(
                    a.word == b.word || !b.word.contains(&a.word),
                    "{} survived alongside superstring {}",
                    a.word,
                    b.word
                );
            }
        }
    }

    #[test]
    fn collapse_is_idempotent() {
        let table = table_of(&[("feature", 10), ("features", 8), ("testing", 6)]);
        let opts = SalienceOptions {
            threshold_occurrence: 5,
            ..SalienceOptions::default()
        };
        let first = salient_words(&table, &opts);
        assert!(collapse_duplicates(&first).is_empty());
    }

    #[test]
    fn counts_are_unchanged_by_filtering() {
        let table = table_of(&[("podium", 12), ("palette", 7)]);
        let opts = SalienceOptions {
            threshold_occurrence: 5,
            ..SalienceOptions::default()
        };
        let result = salient_words(&table, &opts);
        assert_eq!(result.iter().map(|sw| sw.count).sum::<u64>(), 19);
    }

    #[test]
    fn podium_sorts_descending_and_truncates() {
        let words = vec![
            SalientWord {
                word: "low".into(),
                count: 6,
            },
            SalientWord {
                word: "high".into(),
                count: 20,
            },
            SalientWord {
                word: "mid".into(),
                count: 10,
            },
        ];
        let top = podium(words, 2);
        assert_eq!(names(&top), vec!["high", "mid"]);
    }

    #[test]
    fn podium_is_stable_for_ties() {
        let words = vec![
            SalientWord {
                word: "alpha".into(),
                count: 8,
            },
            SalientWord {
                word: "beta".into(),
                count: 8,
            },
            SalientWord {
                word: "gamma".into(),
                count: 8,
            },
        ];
        assert_eq!(names(&podium(words, 10)), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn podium_smaller_than_limit_keeps_everything() {
        let words = vec![SalientWord {
            word: "only".into(),
            count: 9,
        }];
        assert_eq!(podium(words, 15).len(), 1);
    }

    #[test]
    fn cat_dog_bird_scenario_yields_empty_set() {
        // Short words fail the length filter and "bird" fails the occurrence
        // threshold, so nothing survives.
        let text = "cat cat cat cat cat cat dog dog dog dog dog dog bird";
        let mut table = FrequencyTable::new();
        table.extend(tokenize(text));
        assert_eq!(table.get("cat"), 6);
        assert_eq!(table.get("dog"), 6);
        assert_eq!(table.get("bird"), 1);

        let opts = SalienceOptions {
            threshold_occurrence: 5,
            threshold_podium: 2,
            language: Language::English,
        };
        let salient = salient_words(&table, &opts);
        assert!(salient.is_empty());
        assert!(podium(salient, opts.threshold_podium).is_empty());
    }
}
