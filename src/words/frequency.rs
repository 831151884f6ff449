// Word-frequency aggregation over free-text bodies.
//
// Tokens are whitespace-separated and compared case-insensitively. The
// spelling shown for a word is the one it first appeared with. Every token
// counts toward the total, including words that fall outside the top N.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::models::Comment;

/// How many words a result keeps unless told otherwise.
pub const DEFAULT_TOP_N: usize = 10;

/// One word and how many times it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

impl WordCount {
    /// This word's share of `total`, as a percentage rounded to one decimal.
    ///
    /// Returns 0.0 when `total` is zero.
    pub fn percent_of(&self, total: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        let percent = self.count as f64 / total as f64 * 100.0;
        (percent * 10.0).round() / 10.0
    }

    /// Length of this word's histogram bar relative to the longest, in [0, 1].
    ///
    /// Returns 0.0 when `highest` is zero.
    pub fn bar_ratio(&self, highest: usize) -> f64 {
        if highest == 0 {
            return 0.0;
        }
        (self.count as f64 / highest as f64).min(1.0)
    }
}

/// The most frequent words in a set of texts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequency {
    /// Number of tokens across all texts, not just the ones listed.
    pub total_word_count: usize,
    /// Most frequent words first. Ties keep first-occurrence order.
    pub sorted_and_counted_words: Vec<WordCount>,
    /// Count of the most frequent word, or 0 when there are no words.
    pub highest_count: usize,
}

impl WordFrequency {
    pub fn is_empty(&self) -> bool {
        self.sorted_and_counted_words.is_empty()
    }
}

/// Counts words and keeps the `top_n` most frequent.
#[derive(Debug, Clone)]
pub struct WordFrequencyCounter {
    pub top_n: usize,
}

impl Default for WordFrequencyCounter {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl WordFrequencyCounter {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Count the words in `texts`.
    pub fn count<S: AsRef<str>>(&self, texts: &[S]) -> WordFrequency {
        // Position of each lowercased word in `counted`, which stays in
        // first-occurrence order until the sort below.
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut counted: Vec<WordCount> = Vec::new();
        let mut total_word_count = 0;

        for text in texts {
            for word in text.as_ref().split_whitespace() {
                total_word_count += 1;
                match index.entry(word.to_lowercase()) {
                    Entry::Occupied(slot) => counted[*slot.get()].count += 1,
                    Entry::Vacant(slot) => {
                        slot.insert(counted.len());
                        counted.push(WordCount {
                            word: word.to_string(),
                            count: 1,
                        });
                    }
                }
            }
        }

        let distinct = counted.len();

        // Stable, so equal counts stay in first-occurrence order.
        counted.sort_by(|a, b| b.count.cmp(&a.count));
        counted.truncate(self.top_n);

        let highest_count = counted.first().map(|w| w.count).unwrap_or(0);

        debug!(
            texts = texts.len(),
            total_words = total_word_count,
            distinct_words = distinct,
            highest_count = highest_count,
            "Counted word frequencies"
        );

        WordFrequency {
            total_word_count,
            sorted_and_counted_words: counted,
            highest_count,
        }
    }

    /// Count the words in the bodies of `comments`.
    pub fn count_comments(&self, comments: &[Comment]) -> WordFrequency {
        let bodies: Vec<&str> = comments.iter().map(|c| c.body.as_str()).collect();
        self.count(&bodies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_basic() {
        let counter = WordFrequencyCounter::default();
        let result = counter.count(&["the cat and the hat", "The end"]);

        assert_eq!(result.total_word_count, 7);
        assert_eq!(result.highest_count, 3);
        assert_eq!(
            result.sorted_and_counted_words[0],
            WordCount {
                word: "the".to_string(),
                count: 3
            }
        );
    }

    #[test]
    fn test_count_empty_does_not_panic() {
        let counter = WordFrequencyCounter::default();
        let result = counter.count::<&str>(&[]);
        assert_eq!(result, WordFrequency::default());
        assert!(result.is_empty());
    }

    #[test]
    fn test_count_whitespace_only_bodies() {
        let counter = WordFrequencyCounter::default();
        let result = counter.count(&["   ", "\n\t"]);
        assert_eq!(result.total_word_count, 0);
        assert_eq!(result.highest_count, 0);
    }

    #[test]
    fn test_percent_of() {
        let w = WordCount {
            word: "a".to_string(),
            count: 1,
        };
        assert_eq!(w.percent_of(3), 33.3);
        assert_eq!(w.percent_of(0), 0.0);
    }

    #[test]
    fn test_bar_ratio() {
        let w = WordCount {
            word: "a".to_string(),
            count: 2,
        };
        assert_eq!(w.bar_ratio(4), 0.5);
        assert_eq!(w.bar_ratio(0), 0.0);
    }
}
