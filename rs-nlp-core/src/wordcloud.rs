//! Word-cloud layout and SVG rendering.
//!
//! Words are placed by decreasing frequency. Each word walks an
//! archimedean spiral from a point near the center of the canvas until its
//! bounding box neither leaves the canvas nor overlaps a placed word.
//! When no position fits, the font shrinks by `FONT_STEP` and the walk
//! starts again; a word that does not fit at `min_font_size` ends the
//! layout.
//!
//! Text extents are estimated from the font size (no font rasterization),
//! which is enough for SVG and egui rendering.

use std::f32::consts::TAU;
use std::fmt::Write;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::text::stopwords::StopwordFilter;
use crate::text::summarizer::word_frequencies;

/// Average glyph width relative to the font size.
const GLYPH_WIDTH_RATIO: f32 = 0.6;
/// Baseline offset from the top of the box, relative to the font size.
const ASCENT_RATIO: f32 = 0.8;
/// Font size decrement when a word does not fit.
const FONT_STEP: f32 = 4.0;
/// Distance between two spiral turns, in pixels.
const SPIRAL_SPACING: f32 = 3.0;
/// Arc length between two tested positions, in pixels.
const SPIRAL_STEP: f32 = 5.0;
/// Empty space kept around each word.
const MARGIN: f32 = 2.0;
/// Canvas color, black.
const BACKGROUND: &str = "#000000";

/// Sampled viridis colormap, used for word colors.
const PALETTE: &[&str] = &[
	"#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779", "#6ece58",
	"#b5de2b", "#fde725",
];

/// A word placed on the canvas.
///
/// `x`/`y` is the top-left corner of the word's bounding box.
/// For vertical words the box is rotated: `width` is the line height and
/// `height` the text length.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PlacedWord {
	pub word: String,
	pub count: usize,
	pub font_size: f32,
	pub x: f32,
	pub y: f32,
	pub width: f32,
	pub height: f32,
	pub vertical: bool,
	pub color: String,
}

impl PlacedWord {
	fn overlaps(&self, x: f32, y: f32, width: f32, height: f32) -> bool {
		x < self.x + self.width + MARGIN
			&& self.x < x + width + MARGIN
			&& y < self.y + self.height + MARGIN
			&& self.y < y + height + MARGIN
	}
}

/// Result of a word-cloud generation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WordCloudLayout {
	pub width: u32,
	pub height: u32,
	pub background: String,
	pub words: Vec<PlacedWord>,
}

impl WordCloudLayout {
	/// Renders the layout as a standalone SVG document.
	pub fn to_svg(&self) -> String {
		let mut svg = String::new();
		// Writing into a String cannot fail
		let _ = write!(
			svg,
			"<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
			w = self.width,
			h = self.height
		);
		let _ = write!(svg, "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>", self.background);

		for placed in &self.words {
			if placed.vertical {
				// Rotated around the bottom-left corner of the box
				let x = placed.x + placed.font_size * ASCENT_RATIO;
				let y = placed.y + placed.height;
				let _ = write!(
					svg,
					"<text x=\"{x:.1}\" y=\"{y:.1}\" font-size=\"{:.1}\" fill=\"{}\" font-family=\"sans-serif\" transform=\"rotate(-90 {x:.1} {y:.1})\">{}</text>",
					placed.font_size, placed.color, placed.word
				);
			} else {
				let _ = write!(
					svg,
					"<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"{:.1}\" fill=\"{}\" font-family=\"sans-serif\">{}</text>",
					placed.x,
					placed.y + placed.font_size * ASCENT_RATIO,
					placed.font_size,
					placed.color,
					placed.word
				);
			}
		}

		svg.push_str("</svg>");
		svg
	}
}

/// Word-cloud generator.
///
/// Defaults: 700x500 canvas, black background, fonts between 4 and 110,
/// 200 words at most, 90% horizontal words, `random_state` 21.
#[derive(Debug, Clone)]
pub struct WordCloud {
	width: u32,
	height: u32,
	max_font_size: f32,
	min_font_size: f32,
	max_words: usize,
	prefer_horizontal: f32,
	relative_scaling: f32,
	random_state: u64,
	stopwords: StopwordFilter,
}

impl Default for WordCloud {
	fn default() -> Self {
		Self {
			width: 700,
			height: 500,
			max_font_size: 110.0,
			min_font_size: 4.0,
			max_words: 200,
			prefer_horizontal: 0.9,
			relative_scaling: 0.5,
			random_state: 21,
			stopwords: StopwordFilter::default(),
		}
	}
}

impl WordCloud {
	/// Sets the canvas size.
	///
	/// # Errors
	/// Returns an error if a dimension is zero.
	pub fn with_size(mut self, width: u32, height: u32) -> Result<Self, String> {
		if width == 0 || height == 0 {
			return Err("Word cloud size must be strictly positive".to_owned());
		}
		self.width = width;
		self.height = height;
		Ok(self)
	}

	/// Sets the font size range.
	///
	/// # Errors
	/// Returns an error if `min` is not positive or greater than `max`.
	pub fn with_font_sizes(mut self, min: f32, max: f32) -> Result<Self, String> {
		if min <= 0.0 || min > max {
			return Err(format!("Invalid font size range {min}..{max}"));
		}
		self.min_font_size = min;
		self.max_font_size = max;
		Ok(self)
	}

	pub fn with_max_words(mut self, max_words: usize) -> Self {
		self.max_words = max_words;
		self
	}

	/// Sets the share of words laid out horizontally.
	///
	/// # Errors
	/// Returns an error if the value is outside `[0.0, 1.0]`.
	pub fn with_prefer_horizontal(mut self, prefer_horizontal: f32) -> Result<Self, String> {
		if !(0.0..=1.0).contains(&prefer_horizontal) {
			return Err("prefer_horizontal must be between 0.0 and 1.0".to_owned());
		}
		self.prefer_horizontal = prefer_horizontal;
		Ok(self)
	}

	pub fn with_random_state(mut self, random_state: u64) -> Self {
		self.random_state = random_state;
		self
	}

	pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
		self.stopwords = stopwords;
		self
	}

	/// Lays out the words of `text`.
	///
	/// Single letters and stopwords are ignored.
	///
	/// # Errors
	/// Returns an error if no word is left to plot.
	pub fn generate(&self, text: &str) -> Result<WordCloudLayout, String> {
		let frequencies: Vec<(String, usize)> = word_frequencies(text)
			.into_iter()
			.filter(|(word, _)| word.len() > 1 && !self.stopwords.is_stopword(word))
			.take(self.max_words)
			.collect();

		let Some(&(_, max_count)) = frequencies.first() else {
			return Err("No words to plot".to_owned());
		};

		let mut rng = StdRng::seed_from_u64(self.random_state);
		let mut words: Vec<PlacedWord> = Vec::with_capacity(frequencies.len());
		let mut font_size = self.max_font_size;
		let mut last_count = max_count;

		for (word, count) in frequencies {
			// Size relative to the previous word, as the frequency ratio
			// damped by `relative_scaling`
			let ratio = count as f32 / last_count as f32;
			font_size = (font_size * (self.relative_scaling * ratio + (1.0 - self.relative_scaling)))
				.max(self.min_font_size);
			last_count = count;

			let vertical = rng.random::<f32>() > self.prefer_horizontal;
			let Some(placed) = self.place(&word, count, font_size, vertical, &words, &mut rng) else {
				log::debug!("Word cloud full after {} words", words.len());
				break;
			};
			font_size = placed.font_size;
			words.push(placed);
		}

		Ok(WordCloudLayout {
			width: self.width,
			height: self.height,
			background: BACKGROUND.to_owned(),
			words,
		})
	}

	/// Finds a free position for `word`, shrinking it until it fits.
	fn place(
		&self,
		word: &str,
		count: usize,
		start_font_size: f32,
		vertical: bool,
		placed: &[PlacedWord],
		rng: &mut StdRng,
	) -> Option<PlacedWord> {
		let canvas_w = self.width as f32;
		let canvas_h = self.height as f32;
		let max_radius = (canvas_w * canvas_w + canvas_h * canvas_h).sqrt() / 2.0;
		let mut font_size = start_font_size;

		while font_size >= self.min_font_size {
			let text_len = word.chars().count() as f32 * font_size * GLYPH_WIDTH_RATIO;
			let (width, height) = if vertical { (font_size, text_len) } else { (text_len, font_size) };

			if width <= canvas_w && height <= canvas_h {
				let phase = rng.random_range(0.0..TAU);
				let center_x = canvas_w / 2.0 + rng.random_range(-0.1f32..=0.1) * canvas_w;
				let center_y = canvas_h / 2.0 + rng.random_range(-0.1f32..=0.1) * canvas_h;

				let mut theta: f32 = 0.0;
				loop {
					let radius = SPIRAL_SPACING * theta;
					if radius > max_radius {
						break;
					}
					let x = center_x + radius * (theta + phase).cos() - width / 2.0;
					let y = center_y + radius * (theta + phase).sin() - height / 2.0;

					let inside = x >= 0.0 && y >= 0.0 && x + width <= canvas_w && y + height <= canvas_h;
					if inside && !placed.iter().any(|p| p.overlaps(x, y, width, height)) {
						return Some(PlacedWord {
							word: word.to_owned(),
							count,
							font_size,
							x,
							y,
							width,
							height,
							vertical,
							color: PALETTE[rng.random_range(0..PALETTE.len())].to_owned(),
						});
					}

					theta += SPIRAL_STEP / radius.max(SPIRAL_STEP);
				}
			}

			font_size -= FONT_STEP;
		}

		None
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const TEXT: &str = "rust rust rust rust cargo cargo cargo crate crate borrow \
		trait trait lifetime ownership ownership ownership compiler";

	fn cloud() -> WordCloud {
		WordCloud::default().with_stopwords(StopwordFilter::from_list(&[]))
	}

	#[test]
	fn empty_text_cannot_be_plotted() {
		let cloud = WordCloud::default();
		assert_eq!(cloud.generate(""), Err("No words to plot".to_owned()));
		assert!(cloud.generate("the a of").is_err());
	}

	#[test]
	fn most_frequent_word_gets_largest_font() {
		let layout = cloud().generate(TEXT).unwrap();
		assert_eq!(layout.words[0].word, "rust");
		assert_eq!(layout.words[0].font_size, 110.0);
		for pair in layout.words.windows(2) {
			assert!(pair[0].font_size >= pair[1].font_size);
		}
	}

	#[test]
	fn words_stay_inside_canvas_without_overlap() {
		let layout = cloud().generate(TEXT).unwrap();
		assert_eq!(layout.words.len(), 8);
		for (i, a) in layout.words.iter().enumerate() {
			assert!(a.x >= 0.0 && a.y >= 0.0);
			assert!(a.x + a.width <= 700.0 && a.y + a.height <= 500.0);
			for b in &layout.words[i + 1..] {
				assert!(!a.overlaps(b.x, b.y, b.width, b.height), "{} overlaps {}", a.word, b.word);
			}
		}
	}

	#[test]
	fn layout_is_deterministic_for_a_random_state() {
		let cloud = cloud().with_random_state(7);
		assert_eq!(cloud.generate(TEXT), cloud.generate(TEXT));
	}

	#[test]
	fn invalid_settings_are_rejected() {
		assert!(WordCloud::default().with_size(0, 10).is_err());
		assert!(WordCloud::default().with_font_sizes(20.0, 10.0).is_err());
		assert!(WordCloud::default().with_prefer_horizontal(1.5).is_err());
	}

	#[test]
	fn max_words_limits_the_layout() {
		let layout = cloud().with_max_words(2).generate(TEXT).unwrap();
		let words: Vec<&str> = layout.words.iter().map(|w| w.word.as_str()).collect();
		assert_eq!(words, vec!["rust", "cargo"]);
	}

	#[test]
	fn svg_contains_every_word() {
		let layout = cloud()
			.with_prefer_horizontal(1.0)
			.unwrap()
			.generate(TEXT)
			.unwrap();
		let svg = layout.to_svg();
		assert!(svg.starts_with("<svg"));
		assert!(svg.ends_with("</svg>"));
		assert!(svg.contains("viewBox=\"0 0 700 500\""));
		assert_eq!(layout.background, "#000000");
		assert!(svg.contains("<rect width=\"100%\" height=\"100%\" fill=\"#000000\"/>"));
		for placed in &layout.words {
			assert!(svg.contains(&format!(">{}</text>", placed.word)));
			assert!(!placed.vertical);
		}
	}
}
