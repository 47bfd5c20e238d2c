//! Text analysis library behind the NLP web app.
//!
//! This crate provides every computation the web app exposes:
//! - Word-frequency summarization
//! - Text statistics, stopword extraction and text cleaning
//! - Tokenization with lemmas
//! - Lexicon-based sentiment scoring
//! - Word-cloud layout and SVG rendering
//! - The request/response protocol of the translation service
//!
//! The HTTP client itself lives in the server; this crate stays free of I/O.

/// Word-level text processing (summarizer, stopwords, cleaning, stats, tokens).
pub mod text;

/// Polarity / subjectivity scoring.
pub mod sentiment;

/// Word-cloud layout and rendering.
pub mod wordcloud;

/// Target languages and translation protocol helpers.
pub mod translation;

/// Full "Text Analysis" report combining the other modules.
pub mod analysis;
