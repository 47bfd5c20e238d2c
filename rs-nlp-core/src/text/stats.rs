use serde::{Deserialize, Serialize};

use super::stopwords::StopwordFilter;

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

/// Basic statistics shown in the "Basic Info" panel.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TextStats {
	/// Length of the text, in characters.
	pub length: usize,
	/// Number of ASCII vowels (`aeiou`, any case).
	pub num_vowels: usize,
	/// Number of ASCII letters that are not vowels.
	pub num_consonants: usize,
	/// Number of whitespace-separated words that are stopwords.
	pub num_stopwords: usize,
}

impl TextStats {
	/// Computes the statistics of `text`.
	pub fn compute(text: &str, filter: &StopwordFilter) -> Self {
		let mut num_vowels = 0;
		let mut num_consonants = 0;
		for c in text.chars().filter(char::is_ascii_alphabetic) {
			if VOWELS.contains(&c.to_ascii_lowercase()) {
				num_vowels += 1;
			} else {
				num_consonants += 1;
			}
		}

		Self {
			length: text.chars().count(),
			num_vowels,
			num_consonants,
			num_stopwords: filter.extract(text).len(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn counts_letters_and_stopwords() {
		let filter = StopwordFilter::from_list(&["the", "on"]);
		let stats = TextStats::compute("The cat sat on the mat!", &filter);
		assert_eq!(
			stats,
			TextStats { length: 23, num_vowels: 6, num_consonants: 11, num_stopwords: 3 }
		);
	}

	#[test]
	fn length_counts_characters_not_bytes() {
		let filter = StopwordFilter::from_list(&[]);
		let stats = TextStats::compute("été", &filter);
		assert_eq!(stats.length, 3);
		assert_eq!(stats.num_vowels, 0);
		assert_eq!(stats.num_consonants, 1);
	}

	#[test]
	fn empty_text_has_zero_stats() {
		let stats = TextStats::compute("", &StopwordFilter::default());
		assert_eq!(stats.length, 0);
		assert_eq!(stats.num_stopwords, 0);
	}
}
