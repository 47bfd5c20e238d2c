//! Translation protocol.
//!
//! The translation itself is delegated to Google's public translate
//! endpoint. This module holds everything but the HTTP call: target
//! languages, input validation, chunking and response parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default translation endpoint.
pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// The endpoint rejects longer queries.
pub const MAX_CHUNK_CHARS: usize = 5000;

/// Shortest text accepted for translation, in characters.
pub const MIN_TEXT_CHARS: usize = 3;

/// Message shown when the text is too short.
pub const TRANSLATION_WARNING: &str = "Please, provide a text with at least 3 characters...";

/// Supported target languages.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "String")]
pub enum Language {
	French,
	Spanish,
	German,
	Italian,
	Portuguese,
	Polish,
	Lithuanian,
}

impl Language {
	/// Every language, in menu order.
	pub const ALL: [Language; 7] = [
		Language::French,
		Language::Spanish,
		Language::German,
		Language::Italian,
		Language::Portuguese,
		Language::Polish,
		Language::Lithuanian,
	];

	/// Two-letter code consumed by the translation service.
	pub fn code(&self) -> &'static str {
		match self {
			Language::French => "fr",
			Language::Spanish => "es",
			Language::German => "de",
			Language::Italian => "it",
			Language::Portuguese => "pt",
			Language::Polish => "pl",
			Language::Lithuanian => "lt",
		}
	}

	/// English name shown in menus.
	pub fn name(&self) -> &'static str {
		match self {
			Language::French => "French",
			Language::Spanish => "Spanish",
			Language::German => "German",
			Language::Italian => "Italian",
			Language::Portuguese => "Portuguese",
			Language::Polish => "Polish",
			Language::Lithuanian => "Lithuanian",
		}
	}
}

impl fmt::Display for Language {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Language {
	type Err = String;

	/// Accepts a name or a code, case-insensitive.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let wanted = s.trim();
		Language::ALL
			.into_iter()
			.find(|lang| lang.name().eq_ignore_ascii_case(wanted) || lang.code().eq_ignore_ascii_case(wanted))
			.ok_or_else(|| format!("Unsupported target language: {wanted}"))
	}
}

impl TryFrom<String> for Language {
	type Error = String;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

/// Splits `text` into chunks of at most `max_chars` characters.
///
/// A text within the limit is kept whole. Longer texts are cut after the
/// last whitespace that fits, or inside a word longer than `max_chars`.
/// The chunks concatenate back to `text`.
fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
	let mut chunks = Vec::new();
	let mut rest = text;

	while rest.chars().count() > max_chars {
		let limit = rest.char_indices().nth(max_chars).map_or(rest.len(), |(i, _)| i);
		let next_is_space = rest[limit..].starts_with(char::is_whitespace);
		let cut = if next_is_space {
			limit
		} else {
			rest[..limit]
				.char_indices()
				.rev()
				.find(|(_, c)| c.is_whitespace())
				.map_or(limit, |(i, c)| i + c.len_utf8())
		};
		chunks.push(rest[..cut].to_owned());
		rest = &rest[cut..];
	}

	if !rest.is_empty() {
		chunks.push(rest.to_owned());
	}

	chunks
}

/// A validated translation request, split into service-sized chunks.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
	target: Language,
	chunks: Vec<String>,
}

impl TranslationRequest {
	/// Validates `text` and prepares the chunks to send.
	///
	/// # Errors
	/// Returns `TRANSLATION_WARNING` if the trimmed text is shorter than
	/// `MIN_TEXT_CHARS` characters.
	pub fn new(text: &str, target: Language) -> Result<Self, String> {
		if text.trim().chars().count() < MIN_TEXT_CHARS {
			return Err(TRANSLATION_WARNING.to_owned());
		}
		Ok(Self { target, chunks: chunk_text(text, MAX_CHUNK_CHARS) })
	}

	pub fn target(&self) -> Language {
		self.target
	}

	pub fn chunks(&self) -> &[String] {
		&self.chunks
	}

	/// Joins the translations of every chunk, in order.
	///
	/// The service trims its output, so each translation gets back the
	/// leading and trailing whitespace of its chunk.
	pub fn join(&self, parts: &[String]) -> String {
		self.chunks
			.iter()
			.zip(parts)
			.map(|(chunk, part)| {
				if chunk.trim().is_empty() {
					return chunk.clone();
				}
				let lead = &chunk[..chunk.len() - chunk.trim_start().len()];
				let trail = &chunk[chunk.trim_end().len()..];
				format!("{lead}{}{trail}", part.trim())
			})
			.collect()
	}

	/// Query parameters for one chunk. The source language is auto-detected.
	pub fn query<'a>(&self, chunk: &'a str) -> [(&'static str, &'a str); 5] {
		[
			("client", "gtx"),
			("sl", "auto"),
			("tl", self.target.code()),
			("dt", "t"),
			("q", chunk),
		]
	}
}

/// Extracts the translated text from a translate endpoint response.
///
/// The body is a JSON array whose first element lists the translated
/// segments as `[translated, original, ...]`.
///
/// # Errors
/// Returns an error if the body is not JSON or has an unexpected shape.
pub fn parse_response(body: &str) -> Result<String, String> {
	let value: Value = serde_json::from_str(body).map_err(|e| format!("Invalid translation response: {e}"))?;

	let segments = value
		.get(0)
		.and_then(Value::as_array)
		.ok_or_else(|| "Unexpected translation response".to_owned())?;

	Ok(segments
		.iter()
		.filter_map(|segment| segment.get(0).and_then(Value::as_str))
		.collect())
}

/// Service-independent result sent back to clients.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Translation {
	pub target: Language,
	pub translated: String,
}
