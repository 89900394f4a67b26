//! Text metrics engine.
//!
//! Pure functions mapping an input string to a [`TextMetrics`] record:
//! word, character, sentence and paragraph counts plus an estimated reading
//! time. Every counter is total over `&str` and has no hidden state.
//!
//! # Examples
//!
//! ```
//! use wordtally_core::compute;
//!
//! let m = compute("Hello world.");
//! assert_eq!(m.word_count, 2);
//! assert_eq!(m.sentence_count, 1);
//! assert_eq!(m.char_count, 12);
//! assert_eq!(m.char_count_no_space, 11);
//! ```

use serde::{Deserialize, Serialize};

/// Average silent reading speed used for the reading-time estimate.
pub const DEFAULT_WORDS_PER_MINUTE: usize = 200;

/// Characters that terminate a sentence.
const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

// =============================================================================
// MetricField
// =============================================================================

/// One of the six displayed metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricField {
    /// Whitespace-delimited tokens
    Words,
    /// Characters including whitespace
    Characters,
    /// Characters excluding whitespace
    CharactersNoSpace,
    /// Runs of sentence terminators
    Sentences,
    /// Blank-line separated blocks
    Paragraphs,
    /// Estimated minutes to read
    ReadingTime,
}

impl MetricField {
    /// All fields, in display order.
    pub const ALL: [Self; 6] = [
        Self::Words,
        Self::Characters,
        Self::CharactersNoSpace,
        Self::Sentences,
        Self::Paragraphs,
        Self::ReadingTime,
    ];

    /// Position of this field in [`MetricField::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Words => 0,
            Self::Characters => 1,
            Self::CharactersNoSpace => 2,
            Self::Sentences => 3,
            Self::Paragraphs => 4,
            Self::ReadingTime => 5,
        }
    }

    /// DOM element id the widget page uses for this field.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Words => "wordCount",
            Self::Characters => "charCount",
            Self::CharactersNoSpace => "charCountNoSpace",
            Self::Sentences => "sentenceCount",
            Self::Paragraphs => "paragraphCount",
            Self::ReadingTime => "readingTime",
        }
    }
}

// =============================================================================
// TextMetrics
// =============================================================================

/// Statistics for one snapshot of the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextMetrics {
    /// Number of whitespace-delimited tokens
    pub word_count: usize,
    /// Length of the text including whitespace
    pub char_count: usize,
    /// Length of the text with every whitespace character removed
    pub char_count_no_space: usize,
    /// Number of maximal `.`/`!`/`?` runs
    pub sentence_count: usize,
    /// Number of non-blank blocks separated by two or more line breaks
    pub paragraph_count: usize,
    /// `ceil(word_count / words_per_minute)`
    pub reading_time_minutes: usize,
}

impl TextMetrics {
    /// All counts zero, as shown before any input arrives.
    pub const ZERO: Self = Self {
        word_count: 0,
        char_count: 0,
        char_count_no_space: 0,
        sentence_count: 0,
        paragraph_count: 0,
        reading_time_minutes: 0,
    };

    /// Value of a single field.
    #[must_use]
    pub const fn get(&self, field: MetricField) -> usize {
        match field {
            MetricField::Words => self.word_count,
            MetricField::Characters => self.char_count,
            MetricField::CharactersNoSpace => self.char_count_no_space,
            MetricField::Sentences => self.sentence_count,
            MetricField::Paragraphs => self.paragraph_count,
            MetricField::ReadingTime => self.reading_time_minutes,
        }
    }
}

// =============================================================================
// MetricsEngine
// =============================================================================

/// Computes [`TextMetrics`] with a configurable reading speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsEngine {
    words_per_minute: usize,
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS_PER_MINUTE)
    }
}

impl MetricsEngine {
    /// Create an engine with the given reading speed.
    ///
    /// A speed of zero is clamped to one word per minute.
    #[must_use]
    pub fn new(words_per_minute: usize) -> Self {
        Self {
            words_per_minute: words_per_minute.max(1),
        }
    }

    /// Reading speed in words per minute.
    #[must_use]
    pub const fn words_per_minute(&self) -> usize {
        self.words_per_minute
    }

    /// Compute every metric for `text`.
    #[must_use]
    pub fn compute(&self, text: &str) -> TextMetrics {
        let word_count = count_words(text);
        let metrics = TextMetrics {
            word_count,
            char_count: count_characters(text),
            char_count_no_space: count_characters_no_whitespace(text),
            sentence_count: count_sentences(text),
            paragraph_count: count_paragraphs(text),
            reading_time_minutes: reading_time_minutes(word_count, self.words_per_minute),
        };
        tracing::trace!(
            words = metrics.word_count,
            chars = metrics.char_count,
            sentences = metrics.sentence_count,
            paragraphs = metrics.paragraph_count,
            "computed text metrics"
        );
        metrics
    }
}

/// Compute every metric for `text` at the default 200 words per minute.
#[must_use]
pub fn compute(text: &str) -> TextMetrics {
    MetricsEngine::default().compute(text)
}

// =============================================================================
// Counters
// =============================================================================

/// Count whitespace-delimited tokens. Runs of spaces, tabs and line breaks
/// act as a single separator.
#[must_use]
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Count characters including whitespace, in UTF-16 code units.
///
/// This is the length a browser reports for the same text, so a character
/// outside the Basic Multilingual Plane counts as two.
#[must_use]
pub fn count_characters(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Count UTF-16 code units after removing every whitespace character.
///
/// Whitespace is Unicode `White_Space` as [`char::is_whitespace`] defines it:
/// U+0085 is removed and U+FEFF is kept.
#[must_use]
pub fn count_characters_no_whitespace(text: &str) -> usize {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(char::len_utf16)
        .sum()
}

/// Count maximal runs of `.`, `!` and `?`.
///
/// `"Wow!!! Really?"` has two runs, so two sentences.
#[must_use]
pub fn count_sentences(text: &str) -> usize {
    if text.trim().is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut in_run = false;
    for c in text.chars() {
        let terminator = SENTENCE_TERMINATORS.contains(&c);
        if terminator && !in_run {
            count += 1;
        }
        in_run = terminator;
    }
    count
}

/// Count non-blank blocks separated by two or more consecutive line breaks.
///
/// `\r\n` and a lone `\r` each count as one line break. Any other character
/// between two breaks, including a space, keeps them from forming a
/// separator.
#[must_use]
pub fn count_paragraphs(text: &str) -> usize {
    if text.trim().is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut has_content = false;
    let mut breaks = 0usize;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\n' => breaks += 1,
            '\r' => {
                chars.next_if_eq(&'\n');
                breaks += 1;
            }
            _ => {
                if breaks >= 2 {
                    if has_content {
                        count += 1;
                    }
                    has_content = false;
                }
                breaks = 0;
                if !c.is_whitespace() {
                    has_content = true;
                }
            }
        }
    }

    if has_content {
        count += 1;
    }
    count
}

/// Minutes needed to read `word_count` words, rounded up.
///
/// Zero words take zero minutes. A `words_per_minute` of zero is treated as
/// one.
#[must_use]
pub fn reading_time_minutes(word_count: usize, words_per_minute: usize) -> usize {
    word_count.div_ceil(words_per_minute.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    // -------------------------------------------------------------------------
    // compute
    // -------------------------------------------------------------------------

    #[test]
    fn test_empty_string_is_all_zero() {
        assert_eq!(compute(""), TextMetrics::ZERO);
    }

    #[test]
    fn test_whitespace_only() {
        let m = compute("  \t\n\n  ");
        assert_eq!(m.word_count, 0);
        assert_eq!(m.sentence_count, 0);
        assert_eq!(m.paragraph_count, 0);
        assert_eq!(m.reading_time_minutes, 0);
        assert_eq!(m.char_count, 7);
        assert_eq!(m.char_count_no_space, 0);
    }

    #[test]
    fn test_hello_world() {
        let m = compute("Hello world.");
        assert_eq!(m.word_count, 2);
        assert_eq!(m.sentence_count, 1);
        assert_eq!(m.char_count, 12);
        assert_eq!(m.char_count_no_space, 11);
        assert_eq!(m.paragraph_count, 1);
        assert_eq!(m.reading_time_minutes, 1);
    }

    #[test]
    fn test_punctuation_only() {
        let m = compute("...");
        assert_eq!(m.word_count, 1);
        assert_eq!(m.sentence_count, 1);
    }

    #[test]
    fn test_get_matches_fields() {
        let m = compute("One two.\n\nThree!");
        assert_eq!(m.get(MetricField::Words), m.word_count);
        assert_eq!(m.get(MetricField::Characters), m.char_count);
        assert_eq!(m.get(MetricField::CharactersNoSpace), m.char_count_no_space);
        assert_eq!(m.get(MetricField::Sentences), m.sentence_count);
        assert_eq!(m.get(MetricField::Paragraphs), m.paragraph_count);
        assert_eq!(m.get(MetricField::ReadingTime), m.reading_time_minutes);
    }

    #[test]
    fn test_metric_field_index_matches_all_order() {
        for (i, field) in MetricField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn test_element_ids_are_distinct() {
        let mut ids: Vec<_> = MetricField::ALL.iter().map(|f| f.element_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_text_metrics_serializes_snake_case() {
        let json = serde_json::to_string(&compute("hi")).unwrap();
        assert!(json.contains("\"word_count\":1"));
        assert!(json.contains("\"reading_time_minutes\":1"));
    }

    // -------------------------------------------------------------------------
    // words
    // -------------------------------------------------------------------------

    #[test]
    fn test_words_collapse_mixed_whitespace() {
        assert_eq!(count_words("a  b\t\tc\n\nd"), 4);
        assert_eq!(count_words("   leading and trailing   "), 3);
    }

    #[test]
    fn test_words_split_only_on_whitespace() {
        assert_eq!(count_words("well-known e.g. don't"), 3);
    }

    // -------------------------------------------------------------------------
    // characters
    // -------------------------------------------------------------------------

    #[test]
    fn test_characters_count_utf16_units() {
        assert_eq!(count_characters("héllo"), 5);
        assert_eq!(count_characters_no_whitespace("h é l"), 3);

        let m = compute("hi 😀");
        assert_eq!(m.char_count, 5);
        assert_eq!(m.char_count_no_space, 4);
        assert_eq!(m.word_count, 2);
    }

    #[test]
    fn test_characters_no_whitespace_removes_every_kind() {
        assert_eq!(count_characters_no_whitespace("a \t\r\nb\u{a0}c"), 3);
    }

    #[test]
    fn test_whitespace_is_unicode_white_space() {
        // U+FEFF is not White_Space: it stays in the count and joins words
        assert_eq!(count_characters_no_whitespace("a\u{feff}b"), 3);
        assert_eq!(count_words("a\u{feff}b"), 1);
        // U+0085 is White_Space: it is removed and separates words
        assert_eq!(count_characters_no_whitespace("a\u{85}b"), 2);
        assert_eq!(count_words("a\u{85}b"), 2);
    }

    // -------------------------------------------------------------------------
    // sentences
    // -------------------------------------------------------------------------

    #[test]
    fn test_sentence_runs_count_once() {
        assert_eq!(count_sentences("Wow!!! Really?"), 2);
        assert_eq!(count_sentences("Wait...what?!"), 2);
    }

    #[test]
    fn test_sentences_without_terminators() {
        assert_eq!(count_sentences("no punctuation here"), 0);
    }

    #[test]
    fn test_sentences_separated_by_space_are_distinct_runs() {
        assert_eq!(count_sentences(". . ."), 3);
    }

    // -------------------------------------------------------------------------
    // paragraphs
    // -------------------------------------------------------------------------

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        assert_eq!(count_paragraphs("para one\n\npara two\n\n\npara three"), 3);
    }

    #[test]
    fn test_single_line_break_does_not_split() {
        assert_eq!(count_paragraphs("line one\nline two"), 1);
    }

    #[test]
    fn test_paragraphs_ignore_blank_segments() {
        assert_eq!(count_paragraphs("\n\n\nfirst\n\n   \n\nsecond\n\n"), 2);
    }

    #[test]
    fn test_paragraphs_space_between_breaks_is_not_separator() {
        assert_eq!(count_paragraphs("one\n \ntwo"), 1);
    }

    #[test]
    fn test_paragraphs_crlf() {
        assert_eq!(count_paragraphs("one\r\n\r\ntwo\r\nstill two"), 2);
        assert_eq!(count_paragraphs("one\r\rtwo"), 2);
    }

    // -------------------------------------------------------------------------
    // reading time
    // -------------------------------------------------------------------------

    #[test]
    fn test_reading_time_boundaries() {
        assert_eq!(compute(&words(200)).reading_time_minutes, 1);
        assert_eq!(compute(&words(201)).reading_time_minutes, 2);
        assert_eq!(compute(&words(1)).reading_time_minutes, 1);
    }

    #[test]
    fn test_reading_time_zero_words_is_zero() {
        assert_eq!(reading_time_minutes(0, DEFAULT_WORDS_PER_MINUTE), 0);
    }

    #[test]
    fn test_engine_custom_speed() {
        let engine = MetricsEngine::new(100);
        assert_eq!(engine.compute(&words(201)).reading_time_minutes, 3);
        assert_eq!(engine.words_per_minute(), 100);
    }

    #[test]
    fn test_engine_zero_speed_is_clamped() {
        assert_eq!(MetricsEngine::new(0).words_per_minute(), 1);
        assert_eq!(reading_time_minutes(5, 0), 5);
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    proptest! {
        #[test]
        fn prop_no_space_never_exceeds_total(s in "\\PC*") {
            let m = compute(&s);
            prop_assert!(m.char_count_no_space <= m.char_count);
        }

        #[test]
        fn prop_zero_words_iff_blank(s in "[ a-z.\\t\\n]{0,40}") {
            let m = compute(&s);
            prop_assert_eq!(m.word_count == 0, s.trim().is_empty());
        }

        #[test]
        fn prop_blank_text_has_no_structure(s in "[ \\t\\r\\n]{0,20}") {
            let m = compute(&s);
            prop_assert_eq!(m.sentence_count, 0);
            prop_assert_eq!(m.paragraph_count, 0);
            prop_assert_eq!(m.char_count_no_space, 0);
        }

        #[test]
        fn prop_compute_is_deterministic(s in "\\PC*") {
            prop_assert_eq!(compute(&s), compute(&s));
        }

        #[test]
        fn prop_appending_token_never_decreases_words(
            s in "[ a-z.!?\\n]{0,40}",
            token in "[a-z.!?]{1,8}",
            separate in any::<bool>(),
        ) {
            let before = compute(&s).word_count;
            let appended = if separate { format!("{s} {token}") } else { format!("{s}{token}") };
            prop_assert!(compute(&appended).word_count >= before);
        }

        #[test]
        fn prop_reading_time_matches_ceiling(n in 0usize..2000) {
            let expected = (n + DEFAULT_WORDS_PER_MINUTE - 1) / DEFAULT_WORDS_PER_MINUTE;
            prop_assert_eq!(reading_time_minutes(n, DEFAULT_WORDS_PER_MINUTE), expected);
        }
    }
}
