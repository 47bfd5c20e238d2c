use std::collections::HashMap;

/// Number of words returned by `summarize` when the caller has no preference.
pub const DEFAULT_SUMMARY_WORDS: usize = 5;

/// Replaces every character outside `[A-Za-z]` with a space and lowercases the rest.
fn normalize(text: &str) -> String {
	text.chars()
		.map(|c| if c.is_ascii_alphabetic() { c.to_ascii_lowercase() } else { ' ' })
		.collect()
}

/// Builds the ranked frequency table of `text`.
///
/// Words are maximal runs of ASCII letters, compared case-insensitively.
/// The table is sorted by descending count. The sort is stable over the
/// order of first appearance, so on equal counts the word seen first wins.
///
/// Example:
/// `"b a b a c"` → `[("b", 2), ("a", 2), ("c", 1)]`
pub fn word_frequencies(text: &str) -> Vec<(String, usize)> {
	let normalized = normalize(text);

	// Position of each word in `table`, which keeps first-seen order
	let mut index: HashMap<&str, usize> = HashMap::new();
	let mut table: Vec<(String, usize)> = Vec::new();

	for word in normalized.split_whitespace() {
		match index.get(word) {
			Some(&position) => table[position].1 += 1,
			None => {
				index.insert(word, table.len());
				table.push((word.to_owned(), 1));
			}
		}
	}

	table.sort_by(|a, b| b.1.cmp(&a.1));
	table
}

/// Returns the `count` most frequent words of `text`, joined by single spaces.
///
/// This is a keyword extract, not a grammatical summary:
/// - every returned word is lowercase and purely alphabetic
/// - fewer than `count` words are returned if the text has fewer distinct words
/// - `count == 0` or an empty text yields an empty string
///
/// Pure function, never fails.
pub fn summarize(text: &str, count: usize) -> String {
	word_frequencies(text)
		.into_iter()
		.take(count)
		.map(|(word, _)| word)
		.collect::<Vec<_>>()
		.join(" ")
}
