use serde::{Deserialize, Serialize};

use crate::text::cleaning::prepare_for_tokens;
use crate::text::stats::TextStats;
use crate::text::stopwords::StopwordFilter;
use crate::text::summarizer::summarize;
use crate::text::tokens::{Lemmatizer, SnowballLemmatizer, TokenAnalyzer, TokenCache, TokenLemma};
use crate::wordcloud::{WordCloud, WordCloudLayout};

/// Message shown when "Analyze" is pressed on an empty text.
pub const ANALYZE_WARNING: &str = "Enter a text...";

/// Everything displayed by the "Text Analysis" mode.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TextAnalysis {
	/// "Basic Info" panel.
	pub stats: TextStats,
	/// Stopwords found in the text, in order.
	pub stopwords: Vec<String>,
	/// Text without its stopwords.
	pub processed_text: String,
	/// Word cloud of `processed_text`, `None` when it has no plottable word.
	pub word_cloud: Option<WordCloudLayout>,
	/// Tokens and lemmas of the cleaned text.
	pub tokens: Vec<TokenLemma>,
	/// Most frequent words of the raw text.
	pub summary: String,
}

/// Runs the full text analysis.
///
/// Holds the immutable collaborators; the token cache is passed per call
/// so the caller decides how it is shared.
pub struct TextAnalyzer<L: Lemmatizer = SnowballLemmatizer> {
	stopwords: StopwordFilter,
	tokens: TokenAnalyzer<L>,
	word_cloud: WordCloud,
}

impl Default for TextAnalyzer<SnowballLemmatizer> {
	fn default() -> Self {
		Self::new(StopwordFilter::default(), TokenAnalyzer::default(), WordCloud::default())
	}
}

impl<L: Lemmatizer> TextAnalyzer<L> {
	pub fn new(stopwords: StopwordFilter, tokens: TokenAnalyzer<L>, word_cloud: WordCloud) -> Self {
		Self { stopwords, tokens, word_cloud }
	}

	pub fn word_cloud(&self) -> &WordCloud {
		&self.word_cloud
	}

	/// Tokens and lemmas of `text` after cleaning, memoized in `cache`.
	pub fn tokens(&self, text: &str, cache: &mut TokenCache) -> Vec<TokenLemma> {
		let prepared = prepare_for_tokens(text, &self.stopwords);
		cache.get_or_insert_with(&prepared, |t| self.tokens.analyze(t))
	}

	/// Analyzes `text`, summarizing it with `summary_words` words.
	///
	/// # Errors
	/// Returns `ANALYZE_WARNING` if the text is empty or blank.
	pub fn analyze(&self, text: &str, summary_words: usize, cache: &mut TokenCache) -> Result<TextAnalysis, String> {
		if text.trim().is_empty() {
			return Err(ANALYZE_WARNING.to_owned());
		}
		self.analyze_with_tokens(text, summary_words, self.tokens(text, cache))
	}

	/// Same as [`analyze`](Self::analyze), with tokens computed beforehand.
	///
	/// Lets a caller sharing the token cache release it before the
	/// word-cloud layout runs.
	///
	/// # Errors
	/// Returns `ANALYZE_WARNING` if the text is empty or blank.
	pub fn analyze_with_tokens(
		&self,
		text: &str,
		summary_words: usize,
		tokens: Vec<TokenLemma>,
	) -> Result<TextAnalysis, String> {
		if text.trim().is_empty() {
			return Err(ANALYZE_WARNING.to_owned());
		}

		let processed_text = self.stopwords.remove(text);
		let word_cloud = match self.word_cloud.generate(&processed_text) {
			Ok(layout) => Some(layout),
			Err(e) => {
				log::debug!("Word cloud skipped: {e}");
				None
			}
		};

		Ok(TextAnalysis {
			stats: TextStats::compute(text, &self.stopwords),
			stopwords: self.stopwords.extract(text),
			summary: summarize(text, summary_words),
			processed_text,
			word_cloud,
			tokens,
		})
	}
}
