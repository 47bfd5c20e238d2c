use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use clap::Parser;
use eframe::{egui, Frame};
use egui::{Color32, Context, FontId, Sense};
use reqwest::blocking::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use rs_nlp_core::analysis::TextAnalysis;
use rs_nlp_core::sentiment::Sentiment;
use rs_nlp_core::translation::{Language, Translation};
use rs_nlp_core::wordcloud::WordCloudLayout;

/// Desktop client of the NLP web app server.
#[derive(Parser)]
#[command(name = "rs-nlp-ui")]
struct Cli {
    /// Base URL of the server
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server: String,
}

/// Menu entries, one per page.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    TextAnalysis,
    Translation,
    Sentiment,
    About,
}

impl Mode {
    const ALL: [Mode; 4] = [Mode::TextAnalysis, Mode::Translation, Mode::Sentiment, Mode::About];

    fn label(&self) -> &'static str {
        match self {
            Mode::TextAnalysis => "Text Analysis",
            Mode::Translation => "Translation",
            Mode::Sentiment => "Sentiment Analysis",
            Mode::About => "About",
        }
    }
}

#[derive(Serialize)]
struct TextBody<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct TranslateBody<'a> {
    text: &'a str,
    target: &'a str,
}

/// 400 and 5xx bodies sent by the server.
#[derive(Deserialize)]
struct ServerMessage {
    warning: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct About {
    name: String,
    version: String,
    description: String,
}

/// Outcome of a request, as shown to the user.
enum Outcome<T> {
    Done(T),
    Warning(String),
    Error(String),
}

/// REST context holding a reusable blocking HTTP client.
struct RESTContext {
    client: Client,
    base_url: String,
}

impl RESTContext {
    /// Creates a new REST context with a timeout.
    fn new(base_url: &str) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::new(10, 0))
            .build()?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    /// Sends a JSON POST request and decodes the answer.
    ///
    /// Warnings (400) and server errors keep their message.
    fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Outcome<T> {
        let response = match self.client.post(format!("{}{}", self.base_url, path)).json(body).send() {
            Ok(r) => r,
            Err(e) => return Outcome::Error(format!("Error: {e}")),
        };

        if response.status().is_success() {
            return match response.json::<T>() {
                Ok(value) => Outcome::Done(value),
                Err(e) => Outcome::Error(format!("Error: {e}")),
            };
        }

        let status = response.status();
        match response.json::<ServerMessage>() {
            Ok(ServerMessage { warning: Some(w), .. }) => Outcome::Warning(w),
            Ok(ServerMessage { error: Some(e), .. }) => Outcome::Error(e),
            _ => Outcome::Error(format!("Error: server answered {status}")),
        }
    }

    /// Sends a GET request to `/v1/about`.
    fn get_about(&self) -> reqwest::Result<About> {
        self.client
            .get(format!("{}/v1/about", self.base_url))
            .send()?
            .error_for_status()?
            .json()
    }
}

/// Global UI state (MUST persist between frames in egui).
struct NlpUI {
    rest: RESTContext,
    mode: Mode,

    analysis_text: String,
    analysis: Option<Outcome<TextAnalysis>>,

    translation_text: String,
    target: Language,
    translation: Option<Outcome<Translation>>,

    sentiment_text: String,
    sentiment: Option<Outcome<Sentiment>>,

    about: Option<String>,
}

impl NlpUI {
    /// Initializes the UI with the same placeholders as the web page.
    fn new(base_url: &str) -> reqwest::Result<Self> {
        let mut ui = Self {
            rest: RESTContext::new(base_url)?,
            mode: Mode::TextAnalysis,

            analysis_text: "Enter a text in English...".to_owned(),
            analysis: None,

            translation_text: "Write something to be translated...".to_owned(),
            target: Language::French,
            translation: None,

            sentiment_text: "Enter a text here...".to_owned(),
            sentiment: None,

            about: None,
        };
        ui.get_about();
        Ok(ui)
    }

    fn post_analyze(&mut self) {
        self.analysis = Some(self.rest.post("/v1/analyze", &TextBody { text: &self.analysis_text }));
    }

    fn post_translate(&mut self) {
        let body = TranslateBody { text: &self.translation_text, target: self.target.code() };
        self.translation = Some(self.rest.post("/v1/translate", &body));
    }

    fn post_sentiment(&mut self) {
        self.sentiment = Some(self.rest.post("/v1/sentiment", &TextBody { text: &self.sentiment_text }));
    }

    fn get_about(&mut self) {
        self.about = Some(match self.rest.get_about() {
            Ok(about) => format!("{} {}\n\n{}", about.name, about.version, about.description),
            Err(e) => format!("Error: {e}"),
        });
    }

    fn text_analysis_page(&mut self, ui: &mut egui::Ui) {
        ui.add(egui::TextEdit::multiline(&mut self.analysis_text).desired_rows(8).desired_width(f32::INFINITY));
        if ui.button("Analyze").clicked() {
            self.post_analyze();
        }

        let Some(outcome) = &self.analysis else { return };
        let Some(report) = show_outcome(ui, outcome) else { return };

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.collapsing("Basic Info", |ui| {
                egui::Grid::new("stats_grid").num_columns(2).striped(true).show(ui, |ui| {
                    let rows = [
                        ("Length of Text", report.stats.length),
                        ("Num of Vowels", report.stats.num_vowels),
                        ("Num of Consonants", report.stats.num_consonants),
                        ("Num of Stopwords", report.stats.num_stopwords),
                    ];
                    for (label, value) in rows {
                        ui.label(label);
                        ui.label(value.to_string());
                        ui.end_row();
                    }
                });
            });

            ui.collapsing("Stopwords", |ui| {
                ui.colored_label(Color32::LIGHT_RED, report.stopwords.join(", "));
            });

            ui.collapsing("Processing Text", |ui| {
                ui.label(report.processed_text.as_str());
            });

            ui.collapsing("Plot Word Cloud", |ui| match &report.word_cloud {
                Some(layout) => paint_word_cloud(ui, layout),
                None => {
                    ui.label("No words to plot");
                }
            });

            ui.collapsing("Tokens & Lemmas", |ui| {
                for token in &report.tokens {
                    ui.monospace(token.to_string());
                }
            });

            ui.collapsing("Summarize", |ui| {
                ui.colored_label(Color32::LIGHT_GREEN, report.summary.as_str());
            });
        });
    }

    fn translation_page(&mut self, ui: &mut egui::Ui) {
        ui.add(egui::TextEdit::multiline(&mut self.translation_text).desired_rows(8).desired_width(f32::INFINITY));

        ui.horizontal(|ui| {
            ui.label("Target Language");
            egui::ComboBox::from_id_salt("target_language")
                .selected_text(self.target.name())
                .show_ui(ui, |ui| {
                    for lang in Language::ALL {
                        ui.selectable_value(&mut self.target, lang, lang.name());
                    }
                });
        });

        if ui.button("Translate").clicked() {
            self.post_translate();
        }

        if let Some(outcome) = &self.translation {
            if let Some(translation) = show_outcome(ui, outcome) {
                ui.label(translation.translated.as_str());
            }
        }
    }

    fn sentiment_page(&mut self, ui: &mut egui::Ui) {
        ui.add(egui::TextEdit::multiline(&mut self.sentiment_text).desired_rows(8).desired_width(f32::INFINITY));
        if ui.button("Evaluate").clicked() {
            self.post_sentiment();
        }

        if let Some(outcome) = &self.sentiment {
            if let Some(sentiment) = show_outcome(ui, outcome) {
                ui.label(sentiment.to_string());
            }
        }
    }
}

/// Shows warnings and errors, returns the value on success.
fn show_outcome<'a, T>(ui: &mut egui::Ui, outcome: &'a Outcome<T>) -> Option<&'a T> {
    match outcome {
        Outcome::Done(value) => Some(value),
        Outcome::Warning(w) => {
            ui.colored_label(Color32::YELLOW, w.as_str());
            None
        }
        Outcome::Error(e) => {
            ui.colored_label(Color32::RED, e.as_str());
            None
        }
    }
}

/// Canvas color of a layout, black when it is not a hex color.
fn background_color(layout: &WordCloudLayout) -> Color32 {
    Color32::from_hex(&layout.background).unwrap_or(Color32::BLACK)
}

/// Paints a word-cloud layout scaled to the available width.
fn paint_word_cloud(ui: &mut egui::Ui, layout: &WordCloudLayout) {
    let scale = (ui.available_width() / layout.width as f32).min(1.0);
    let size = egui::vec2(layout.width as f32 * scale, layout.height as f32 * scale);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min;

    painter.rect_filled(response.rect, 0.0, background_color(layout));

    for placed in &layout.words {
        let color = Color32::from_hex(&placed.color).unwrap_or(Color32::WHITE);
        let font = FontId::proportional(placed.font_size * scale);
        let galley = painter.layout_no_wrap(placed.word.clone(), font, color);

        if placed.vertical {
            // Rotated around the bottom-left corner of the box
            let pos = origin + egui::vec2(placed.x * scale, (placed.y + placed.height) * scale);
            let shape = egui::epaint::TextShape::new(pos, galley, color).with_angle(-FRAC_PI_2);
            painter.add(shape);
        } else {
            let pos = origin + egui::vec2(placed.x * scale, placed.y * scale);
            painter.galley(pos, galley, color);
        }
    }
}

impl eframe::App for NlpUI {
    /// UI update loop (called every frame).
    fn update(&mut self, ctx: &Context, _: &mut Frame) {
        egui::SidePanel::left("menu").show(ctx, |ui| {
            ui.heading("Menu");
            for mode in Mode::ALL {
                ui.selectable_value(&mut self.mode, mode, mode.label());
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("NLP Web App");
            ui.separator();
            ui.label(egui::RichText::new(self.mode.label()).strong());

            match self.mode {
                Mode::TextAnalysis => self.text_analysis_page(ui),
                Mode::Translation => self.translation_page(ui),
                Mode::Sentiment => self.sentiment_page(ui),
                Mode::About => {
                    ui.label(self.about.as_deref().unwrap_or("Loading..."));
                }
            }
        });
    }
}

/// Application entry point.
fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 640.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "rs-nlp",
        options,
        Box::new(move |_| Ok(Box::new(NlpUI::new(&cli.server)?))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rs_nlp_core::wordcloud::WordCloud;

    #[test]
    fn painted_background_follows_layout() {
        let mut layout = WordCloud::default().generate("rust cargo rust").unwrap();
        assert_eq!(background_color(&layout), Color32::from_rgb(0, 0, 0));

        layout.background = "#ffffff".to_owned();
        assert_eq!(background_color(&layout), Color32::WHITE);
        layout.background = "white".to_owned();
        assert_eq!(background_color(&layout), Color32::BLACK);
    }
}
