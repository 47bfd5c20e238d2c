use clap::Parser;

use rs_nlp_core::translation::DEFAULT_TRANSLATE_URL;

/// Server configuration, read from the command line.
#[derive(Parser, Debug, Clone)]
#[command(name = "rs-nlp-server", about = "NLP web app: text analysis, translation and sentiment analysis")]
pub struct Config {
	/// Bind address
	#[arg(long, default_value = "127.0.0.1")]
	pub host: String,
	/// HTTP port
	#[arg(long, default_value_t = 5000)]
	pub port: u16,
	/// Translation endpoint
	#[arg(long, default_value = DEFAULT_TRANSLATE_URL)]
	pub translate_url: String,
	/// Timeout of translation requests, in seconds
	#[arg(long, default_value_t = 5)]
	pub timeout_secs: u64,
	/// Number of token analyses kept in memory (0 disables the cache)
	#[arg(long, default_value_t = 64)]
	pub cache_size: usize,
	/// Log level, overridden by RUST_LOG
	#[arg(long, default_value = "info")]
	pub log_level: String,
}
