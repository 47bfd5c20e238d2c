use std::sync::Mutex;
use std::time::Duration;

use rs_nlp_core::analysis::TextAnalyzer;
use rs_nlp_core::sentiment::SentimentAnalyzer;
use rs_nlp_core::text::tokens::TokenCache;

use crate::config::Config;
use crate::translate::Translator;

/// Data shared by every request.
///
/// Only the token cache is mutable; everything else is read-only after startup.
pub struct AppState {
	pub analyzer: TextAnalyzer,
	pub sentiment: SentimentAnalyzer,
	pub token_cache: Mutex<TokenCache>,
	pub translator: Translator,
}

impl AppState {
	pub fn new(config: &Config) -> reqwest::Result<Self> {
		Ok(Self {
			analyzer: TextAnalyzer::default(),
			sentiment: SentimentAnalyzer::default(),
			token_cache: Mutex::new(TokenCache::new(config.cache_size)),
			translator: Translator::new(&config.translate_url, Duration::from_secs(config.timeout_secs))?,
		})
	}
}
