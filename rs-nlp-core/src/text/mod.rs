//! Word-level text processing.
//!
//! - Frequency summarizer (`summarizer`)
//! - Stopword list and filtering (`stopwords`)
//! - Punctuation / special character cleaning (`cleaning`)
//! - Basic statistics (`stats`)
//! - Tokens and lemmas, with a memoization cache (`tokens`)

/// Keyword extract made of the most frequent words.
pub mod summarizer;

/// English stopword filter.
pub mod stopwords;

/// Cleaning helpers applied before tokenization.
pub mod cleaning;

/// Length, vowels, consonants and stopword counts.
pub mod stats;

/// Tokenizer, lemmatizer seam and token cache.
pub mod tokens;
