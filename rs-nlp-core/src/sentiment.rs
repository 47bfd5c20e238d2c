//! Lexicon-based sentiment scoring.
//!
//! Every word of the lexicon carries a polarity in `[-1, 1]` and a
//! subjectivity in `[0, 1]`. The score of a text is the mean over the
//! lexicon words it contains, after two local adjustments:
//! - an intensifier right before a word scales both of its scores
//! - a negation right before the word (or before its intensifier)
//!   flips and halves its polarity

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// `(word, polarity, subjectivity)`
const LEXICON: &[(&str, f32, f32)] = &[
	("good", 0.7, 0.6), ("great", 0.8, 0.75), ("excellent", 1.0, 1.0), ("amazing", 0.6, 0.9),
	("awesome", 1.0, 1.0), ("wonderful", 1.0, 1.0), ("fantastic", 0.4, 0.9), ("perfect", 1.0, 1.0),
	("nice", 0.6, 1.0), ("happy", 0.8, 1.0), ("glad", 0.5, 1.0), ("love", 0.5, 0.6),
	("loved", 0.7, 0.8), ("like", 0.2, 0.4), ("liked", 0.6, 0.8), ("best", 1.0, 0.3),
	("better", 0.5, 0.5), ("beautiful", 0.85, 1.0), ("pleasant", 0.73, 0.97), ("fun", 0.3, 0.2),
	("interesting", 0.5, 0.5), ("helpful", 0.5, 0.6), ("easy", 0.43, 0.83), ("fast", 0.2, 0.6),
	("clean", 0.37, 0.69), ("fine", 0.42, 0.5), ("positive", 0.23, 0.55), ("success", 0.3, 0.4),
	("successful", 0.75, 0.95), ("brilliant", 0.9, 1.0), ("enjoy", 0.4, 0.5), ("enjoyed", 0.5, 0.6),
	("bad", -0.7, 0.67), ("terrible", -1.0, 1.0), ("awful", -1.0, 1.0), ("horrible", -1.0, 1.0),
	("worst", -1.0, 1.0), ("worse", -0.4, 0.6), ("poor", -0.4, 0.6), ("sad", -0.5, 1.0),
	("angry", -0.5, 1.0), ("hate", -0.8, 0.9), ("hated", -0.9, 0.7), ("boring", -1.0, 1.0),
	("ugly", -0.7, 1.0), ("slow", -0.3, 0.39), ("difficult", -0.5, 1.0), ("hard", -0.29, 0.54),
	("wrong", -0.5, 0.9), ("broken", -0.4, 0.4), ("negative", -0.3, 0.4), ("failure", -0.32, 0.3),
	("disappointing", -0.6, 0.7), ("annoying", -0.8, 0.9), ("stupid", -0.8, 1.0), ("useless", -0.5, 0.2),
	("dirty", -0.6, 0.8), ("painful", -0.7, 0.9), ("nasty", -1.0, 1.0), ("dangerous", -0.6, 0.9),
];

/// `(word, multiplier)`
const INTENSIFIERS: &[(&str, f32)] = &[
	("very", 1.3), ("really", 1.3), ("extremely", 1.5), ("incredibly", 1.5), ("so", 1.2),
	("too", 1.2), ("quite", 1.1), ("pretty", 1.1), ("absolutely", 1.4), ("slightly", 0.7),
	("somewhat", 0.8), ("barely", 0.5),
];

const NEGATIONS: &[&str] = &["not", "no", "never", "nor", "neither", "nothing", "without", "cannot"];

/// Message shown when "Evaluate" is pressed on an empty text.
pub const SENTIMENT_WARNING: &str = "Please, provide some text...";

/// Polarity is flipped and scaled by this factor when negated.
const NEGATION_FACTOR: f32 = -0.5;

/// Sentiment of a text.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Sentiment {
	/// Negative (-1.0) to positive (1.0) tone.
	pub polarity: f32,
	/// Factual (0.0) to opinionated (1.0).
	pub subjectivity: f32,
}

impl fmt::Display for Sentiment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Sentiment(polarity={}, subjectivity={})", self.polarity, self.subjectivity)
	}
}

#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
	lexicon: HashMap<&'static str, (f32, f32)>,
	intensifiers: HashMap<&'static str, f32>,
}

impl Default for SentimentAnalyzer {
	fn default() -> Self {
		Self {
			lexicon: LEXICON.iter().map(|&(w, p, s)| (w, (p, s))).collect(),
			intensifiers: INTENSIFIERS.iter().copied().collect(),
		}
	}
}

fn is_negation(word: &str) -> bool {
	NEGATIONS.contains(&word) || word.ends_with("n't")
}

impl SentimentAnalyzer {
	/// Scores `text`.
	///
	/// Returns `(0.0, 0.0)` when no lexicon word is found.
	pub fn analyze(&self, text: &str) -> Sentiment {
		let lower = text.to_lowercase();
		let words: Vec<&str> = lower
			.split(|c: char| !(c.is_alphanumeric() || c == '\''))
			.map(|w| w.trim_matches('\''))
			.filter(|w| !w.is_empty())
			.collect();

		let mut polarity_sum = 0.0;
		let mut subjectivity_sum = 0.0;
		let mut hits = 0;

		for (i, word) in words.iter().enumerate() {
			let Some(&(mut polarity, mut subjectivity)) = self.lexicon.get(*word) else {
				continue;
			};

			// Index of the word that may hold a negation
			let mut before = i.checked_sub(1);
			if let Some(multiplier) = before.and_then(|j| self.intensifiers.get(words[j])) {
				polarity *= multiplier;
				subjectivity *= multiplier;
				before = before.and_then(|j| j.checked_sub(1));
			}
			if before.is_some_and(|j| is_negation(words[j])) {
				polarity *= NEGATION_FACTOR;
			}

			polarity_sum += polarity.clamp(-1.0, 1.0);
			subjectivity_sum += subjectivity.clamp(0.0, 1.0);
			hits += 1;
		}

		if hits == 0 {
			return Sentiment::default();
		}

		Sentiment {
			polarity: (polarity_sum / hits as f32).clamp(-1.0, 1.0),
			subjectivity: (subjectivity_sum / hits as f32).clamp(0.0, 1.0),
		}
	}
}
