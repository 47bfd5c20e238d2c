use super::stopwords::StopwordFilter;

/// Punctuation marks removed by `remove_puncts`.
const PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '"', '\'', '`', '(', ')', '[', ']'];

/// Removes common punctuation marks, keeping every other character.
pub fn remove_puncts(text: &str) -> String {
	text.chars().filter(|c| !PUNCTUATION.contains(c)).collect()
}

/// Keeps only alphanumeric characters and whitespace.
pub fn remove_special_characters(text: &str) -> String {
	text.chars().filter(|c| c.is_alphanumeric() || c.is_whitespace()).collect()
}

/// Collapses every whitespace run into a single space and trims both ends.
pub fn normalize_whitespace(text: &str) -> String {
	text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Prepares raw text for the tokens & lemmas view.
///
/// Stopwords are removed first, then punctuation, then any remaining
/// special character.
pub fn prepare_for_tokens(text: &str, filter: &StopwordFilter) -> String {
	let without_stopwords = filter.remove(text);
	let without_puncts = remove_puncts(&without_stopwords);
	normalize_whitespace(&remove_special_characters(&without_puncts))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn puncts_are_removed() {
		assert_eq!(remove_puncts("Hello, world! (yes)"), "Hello world yes");
		assert_eq!(remove_puncts("a-b #c"), "a-b #c");
	}

	#[test]
	fn special_characters_are_removed() {
		assert_eq!(remove_special_characters("a-b #c 42%"), "ab c 42");
		assert_eq!(remove_special_characters("naïve café"), "naïve café");
	}

	#[test]
	fn whitespace_is_collapsed() {
		assert_eq!(normalize_whitespace("  a \n\t b  "), "a b");
	}

	#[test]
	fn token_preparation_chains_all_steps() {
		let filter = StopwordFilter::from_list(&["the", "is"]);
		assert_eq!(
			prepare_for_tokens("The weather is #great, isn't it?", &filter),
			"weather great isnt it"
		);
	}
}
