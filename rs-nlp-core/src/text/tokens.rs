use std::collections::{HashMap, VecDeque};
use std::fmt;

use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};

/// Irregular English forms the stemmer cannot reduce.
const IRREGULAR_LEMMAS: &[(&str, &str)] = &[
	("am", "be"), ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"), ("been", "be"), ("being", "be"),
	("has", "have"), ("had", "have"), ("does", "do"), ("did", "do"), ("done", "do"),
	("went", "go"), ("gone", "go"), ("goes", "go"),
	("ran", "run"), ("ate", "eat"), ("eaten", "eat"), ("saw", "see"), ("seen", "see"),
	("made", "make"), ("took", "take"), ("taken", "take"), ("gave", "give"), ("given", "give"),
	("came", "come"), ("got", "get"), ("said", "say"), ("knew", "know"), ("known", "know"),
	("thought", "think"), ("told", "tell"), ("found", "find"), ("left", "leave"), ("felt", "feel"),
	("better", "good"), ("best", "good"), ("worse", "bad"), ("worst", "bad"),
	("children", "child"), ("men", "man"), ("women", "woman"), ("people", "person"),
	("mice", "mouse"), ("feet", "foot"), ("teeth", "tooth"),
];

/// Returns true for characters that can start or continue a word.
fn is_word_char(c: char) -> bool {
	c.is_alphanumeric()
}

/// Splits text into word and punctuation tokens.
///
/// - Words are alphanumeric runs; an apostrophe or hyphen between two
///   alphanumeric characters stays inside the word (`don't`, `well-known`).
/// - Every other non-whitespace character is a token on its own.
/// - Whitespace only separates tokens.
pub fn tokenize(text: &str) -> Vec<String> {
	let chars: Vec<char> = text.chars().collect();
	let mut tokens = Vec::new();
	let mut current = String::new();

	for (i, &c) in chars.iter().enumerate() {
		if is_word_char(c) {
			current.push(c);
			continue;
		}

		let joins_word = (c == '\'' || c == '-')
			&& !current.is_empty()
			&& chars.get(i + 1).is_some_and(|next| is_word_char(*next));
		if joins_word {
			current.push(c);
			continue;
		}

		if !current.is_empty() {
			tokens.push(std::mem::take(&mut current));
		}
		if !c.is_whitespace() {
			tokens.push(c.to_string());
		}
	}

	if !current.is_empty() {
		tokens.push(current);
	}

	tokens
}

/// Produces the dictionary base form of a token.
///
/// This is the seam for the linguistic collaborator: the server only
/// depends on this trait, so a model-backed implementation can replace
/// the default one.
pub trait Lemmatizer {
	fn lemma(&self, token: &str) -> String;
}

/// Default lemmatizer: irregular-form table, then the Snowball English stemmer.
///
/// Tokens containing no letter (numbers, punctuation) are their own lemma.
pub struct SnowballLemmatizer {
	stemmer: Stemmer,
	irregular: HashMap<&'static str, &'static str>,
}

impl Default for SnowballLemmatizer {
	fn default() -> Self {
		Self {
			stemmer: Stemmer::create(Algorithm::English),
			irregular: IRREGULAR_LEMMAS.iter().copied().collect(),
		}
	}
}

impl Lemmatizer for SnowballLemmatizer {
	fn lemma(&self, token: &str) -> String {
		if !token.chars().any(char::is_alphabetic) {
			return token.to_owned();
		}

		let lower = token.to_lowercase();
		if let Some(lemma) = self.irregular.get(lower.as_str()) {
			return (*lemma).to_owned();
		}

		self.stemmer.stem(&lower).into_owned()
	}
}

/// A token and its lemma.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TokenLemma {
	pub token: String,
	pub lemma: String,
}

impl fmt::Display for TokenLemma {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "\"Token\":{}, \"Lemma\":{}", self.token, self.lemma)
	}
}

/// Tokenizes text and attaches a lemma to every token.
pub struct TokenAnalyzer<L: Lemmatizer = SnowballLemmatizer> {
	lemmatizer: L,
}

impl Default for TokenAnalyzer<SnowballLemmatizer> {
	fn default() -> Self {
		Self::new(SnowballLemmatizer::default())
	}
}

impl<L: Lemmatizer> TokenAnalyzer<L> {
	pub fn new(lemmatizer: L) -> Self {
		Self { lemmatizer }
	}

	/// Returns every token of `text` with its lemma, in order.
	pub fn analyze(&self, text: &str) -> Vec<TokenLemma> {
		tokenize(text)
			.into_iter()
			.map(|token| {
				let lemma = self.lemmatizer.lemma(&token);
				TokenLemma { token, lemma }
			})
			.collect()
	}
}

/// Bounded memoization of token analyses, keyed by input text.
///
/// When full, the oldest entry is evicted first.
/// A capacity of 0 disables caching.
///
/// ## Invariants
/// - `order` holds exactly the keys of `entries`, oldest first
/// - `entries.len() <= capacity`
#[derive(Debug, Default)]
pub struct TokenCache {
	capacity: usize,
	entries: HashMap<String, Vec<TokenLemma>>,
	order: VecDeque<String>,
}

impl TokenCache {
	pub fn new(capacity: usize) -> Self {
		Self { capacity, entries: HashMap::new(), order: VecDeque::new() }
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns the cached analysis of `text`, computing it with `compute` on a miss.
	pub fn get_or_insert_with<F>(&mut self, text: &str, compute: F) -> Vec<TokenLemma>
	where
		F: FnOnce(&str) -> Vec<TokenLemma>,
	{
		if let Some(tokens) = self.entries.get(text) {
			log::debug!("Token cache hit ({} bytes)", text.len());
			return tokens.clone();
		}

		let tokens = compute(text);
		if self.capacity == 0 {
			return tokens;
		}

		while self.entries.len() >= self.capacity {
			match self.order.pop_front() {
				Some(oldest) => {
					self.entries.remove(&oldest);
				}
				None => break,
			}
		}
		self.order.push_back(text.to_owned());
		self.entries.insert(text.to_owned(), tokens.clone());
		tokens
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tokenize_splits_words_and_punctuation() {
		assert_eq!(
			tokenize("Hello, world! It's well-known."),
			vec!["Hello", ",", "world", "!", "It's", "well-known", "."]
		);
	}

	#[test]
	fn tokenize_handles_edges() {
		assert!(tokenize("").is_empty());
		assert!(tokenize("   \n").is_empty());
		assert_eq!(tokenize("'quoted' -dash"), vec!["'", "quoted", "'", "-", "dash"]);
		assert_eq!(tokenize("42 cats"), vec!["42", "cats"]);
	}

	#[test]
	fn lemmas_use_irregular_table_then_stemmer() {
		let lemmatizer = SnowballLemmatizer::default();
		assert_eq!(lemmatizer.lemma("Was"), "be");
		assert_eq!(lemmatizer.lemma("went"), "go");
		assert_eq!(lemmatizer.lemma("running"), "run");
		assert_eq!(lemmatizer.lemma("cats"), "cat");
		assert_eq!(lemmatizer.lemma("42"), "42");
		assert_eq!(lemmatizer.lemma("!"), "!");
	}

	#[test]
	fn analyzer_pairs_tokens_with_lemmas() {
		let analyzer = TokenAnalyzer::default();
		let tokens = analyzer.analyze("Dogs were running.");
		let lemmas: Vec<&str> = tokens.iter().map(|t| t.lemma.as_str()).collect();
		assert_eq!(lemmas, vec!["dog", "be", "run", "."]);
		assert_eq!(tokens[0].to_string(), "\"Token\":Dogs, \"Lemma\":dog");
	}

	struct UpperLemmatizer;

	impl Lemmatizer for UpperLemmatizer {
		fn lemma(&self, token: &str) -> String {
			token.to_uppercase()
		}
	}

	#[test]
	fn analyzer_accepts_custom_lemmatizer() {
		let analyzer = TokenAnalyzer::new(UpperLemmatizer);
		assert_eq!(analyzer.analyze("hi")[0].lemma, "HI");
	}

	#[test]
	fn cache_memoizes_by_input() {
		let analyzer = TokenAnalyzer::default();
		let mut cache = TokenCache::new(4);
		let mut calls = 0;

		let first = cache.get_or_insert_with("cats run", |t| {
			calls += 1;
			analyzer.analyze(t)
		});
		let second = cache.get_or_insert_with("cats run", |t| {
			calls += 1;
			analyzer.analyze(t)
		});

		assert_eq!(first, second);
		assert_eq!(calls, 1);
		assert_eq!(cache.len(), 1);
	}

	#[test]
	fn cache_evicts_oldest_entry() {
		let analyzer = TokenAnalyzer::default();
		let mut cache = TokenCache::new(2);
		for text in ["a", "b", "c"] {
			cache.get_or_insert_with(text, |t| analyzer.analyze(t));
		}
		assert_eq!(cache.len(), 2);

		let mut recomputed = false;
		cache.get_or_insert_with("a", |t| {
			recomputed = true;
			analyzer.analyze(t)
		});
		assert!(recomputed);
	}

	#[test]
	fn zero_capacity_disables_cache() {
		let mut cache = TokenCache::new(0);
		cache.get_or_insert_with("text", |_| Vec::new());
		assert!(cache.is_empty());
	}
}
