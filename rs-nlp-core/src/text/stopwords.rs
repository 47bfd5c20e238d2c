use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

/// Trims the punctuation glued to a whitespace-separated word.
///
/// Example: `"(hello),"` → `"hello"`
pub(crate) fn bare_word(word: &str) -> &str {
	word.trim_matches(|c: char| !c.is_alphanumeric())
}

/// English stopword filter.
///
/// The list comes from the `stop-words` crate. Matching is case-insensitive
/// and ignores punctuation attached to a word, so `"The,"` is a stopword.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
	/// Lowercase stopwords.
	stopwords: HashSet<String>,
}

impl Default for StopwordFilter {
	fn default() -> Self {
		Self::english()
	}
}

impl StopwordFilter {
	/// Loads the English stopword list.
	pub fn english() -> Self {
		let stopwords = get(LANGUAGE::English)
			.iter()
			.map(|word| word.to_lowercase())
			.collect();
		Self { stopwords }
	}

	/// Builds a filter from a custom list.
	pub fn from_list(words: &[&str]) -> Self {
		Self { stopwords: words.iter().map(|w| w.to_lowercase()).collect() }
	}

	/// Checks whether `word` is a stopword.
	pub fn is_stopword(&self, word: &str) -> bool {
		let word = bare_word(word);
		!word.is_empty() && self.stopwords.contains(&word.to_lowercase())
	}

	/// Returns the stopwords found in `text`, in order of appearance.
	///
	/// Duplicates are kept and the original casing is preserved,
	/// punctuation around the word is not.
	pub fn extract(&self, text: &str) -> Vec<String> {
		text.split_whitespace()
			.filter(|word| self.is_stopword(word))
			.map(|word| bare_word(word).to_owned())
			.collect()
	}

	/// Returns `text` without its stopwords.
	///
	/// Remaining words keep their punctuation and are joined by single spaces.
	pub fn remove(&self, text: &str) -> String {
		text.split_whitespace()
			.filter(|word| !self.is_stopword(word))
			.collect::<Vec<_>>()
			.join(" ")
	}
}
