use actix_web::error::InternalError;
use actix_web::http::header::ContentType;
use actix_web::{get, post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use rs_nlp_core::analysis::{TextAnalysis, ANALYZE_WARNING};
use rs_nlp_core::sentiment::SENTIMENT_WARNING;
use rs_nlp_core::text::summarizer::{summarize, DEFAULT_SUMMARY_WORDS};
use rs_nlp_core::translation::{Language, Translation, TranslationRequest};

use crate::state::AppState;

const INDEX_PAGE: &str = include_str!("../static/index.html");

/// Largest accepted JSON body.
const JSON_LIMIT: usize = 1 << 20;

/// Body of a 400 response: a message the user can act on.
#[derive(Serialize)]
struct Warning {
	warning: String,
}

/// Body of a 5xx response.
#[derive(Serialize)]
struct Failure {
	error: String,
}

#[derive(Deserialize)]
struct TextParams {
	text: String,
}

#[derive(Deserialize)]
struct AnalyzeParams {
	text: String,
	summary_words: Option<usize>,
}

#[derive(Deserialize)]
struct SummarizeParams {
	text: String,
	count: Option<usize>,
}

#[derive(Deserialize)]
struct TranslateParams {
	text: String,
	target: Language,
}

/// Analysis report with its word cloud already rendered for the page.
#[derive(Serialize)]
struct AnalyzeReport {
	#[serde(flatten)]
	report: TextAnalysis,
	word_cloud_svg: Option<String>,
}

#[derive(Serialize)]
struct Summary {
	summary: String,
}

#[derive(Serialize)]
struct LanguageEntry {
	name: &'static str,
	code: &'static str,
}

#[derive(Serialize)]
struct About {
	name: &'static str,
	version: &'static str,
	description: &'static str,
	modes: [&'static str; 4],
}

fn warning(message: &str) -> HttpResponse {
	HttpResponse::BadRequest().json(Warning { warning: message.to_owned() })
}

fn internal_error(message: String) -> HttpResponse {
	log::error!("{message}");
	HttpResponse::InternalServerError().json(Failure { error: message })
}

/// Malformed JSON bodies (missing field, unknown language, negative count...)
/// are reported as warnings instead of plain-text errors.
fn json_config() -> web::JsonConfig {
	web::JsonConfig::default()
		.limit(JSON_LIMIT)
		.error_handler(|err, _req| {
			let response = warning(&err.to_string());
			InternalError::from_response(err, response).into()
		})
}

/// Registers every route.
pub fn configure(cfg: &mut web::ServiceConfig) {
	cfg.app_data(json_config())
		.service(index)
		.service(post_analyze)
		.service(post_summarize)
		.service(post_wordcloud)
		.service(post_tokens)
		.service(post_sentiment)
		.service(post_translate)
		.service(get_languages)
		.service(get_about);
}

/// HTTP GET endpoint `/`
///
/// Serves the single-page UI.
#[get("/")]
async fn index() -> impl Responder {
	HttpResponse::Ok().content_type(ContentType::html()).body(INDEX_PAGE)
}

/// HTTP POST endpoint `/v1/analyze`
///
/// Runs the full text analysis: stats, stopwords, processed text,
/// word cloud (layout and SVG), tokens & lemmas and summary.
#[post("/v1/analyze")]
async fn post_analyze(data: web::Data<AppState>, body: web::Json<AnalyzeParams>) -> impl Responder {
	let AnalyzeParams { text, summary_words } = body.into_inner();
	if text.trim().is_empty() {
		return warning(ANALYZE_WARNING);
	}
	let summary_words = summary_words.unwrap_or(DEFAULT_SUMMARY_WORDS);

	// Word-cloud layout is CPU-bound, keep it off the async workers
	let result = web::block(move || -> Result<AnalyzeReport, String> {
		// The cache is only locked while the tokens are computed
		let tokens = {
			let mut cache = data.token_cache.lock().map_err(|_| "Token cache lock failed".to_owned())?;
			data.analyzer.tokens(&text, &mut cache)
		};
		let report = data.analyzer.analyze_with_tokens(&text, summary_words, tokens)?;
		let word_cloud_svg = report.word_cloud.as_ref().map(|layout| layout.to_svg());
		Ok(AnalyzeReport { report, word_cloud_svg })
	})
	.await;

	match result {
		Ok(Ok(report)) => HttpResponse::Ok().json(report),
		Ok(Err(e)) => internal_error(e),
		Err(e) => internal_error(format!("Analysis failed: {e}")),
	}
}

/// HTTP POST endpoint `/v1/summarize`
///
/// Returns the `count` (default 5) most frequent words. An empty text
/// gives an empty summary.
#[post("/v1/summarize")]
async fn post_summarize(body: web::Json<SummarizeParams>) -> impl Responder {
	let count = body.count.unwrap_or(DEFAULT_SUMMARY_WORDS);
	HttpResponse::Ok().json(Summary { summary: summarize(&body.text, count) })
}

/// HTTP POST endpoint `/v1/wordcloud`
///
/// Renders the word cloud of the text as SVG.
#[post("/v1/wordcloud")]
async fn post_wordcloud(data: web::Data<AppState>, body: web::Json<TextParams>) -> impl Responder {
	let text = body.into_inner().text;
	let result = web::block(move || data.analyzer.word_cloud().generate(&text)).await;

	match result {
		Ok(Ok(layout)) => HttpResponse::Ok().content_type("image/svg+xml").body(layout.to_svg()),
		Ok(Err(e)) => warning(&e),
		Err(e) => internal_error(format!("Word cloud failed: {e}")),
	}
}

/// HTTP POST endpoint `/v1/tokens`
///
/// Tokens and lemmas of the cleaned text, memoized by input.
#[post("/v1/tokens")]
async fn post_tokens(data: web::Data<AppState>, body: web::Json<TextParams>) -> impl Responder {
	if body.text.trim().is_empty() {
		return warning(ANALYZE_WARNING);
	}

	let mut cache = match data.token_cache.lock() {
		Ok(c) => c,
		Err(_) => return internal_error("Token cache lock failed".to_owned()),
	};
	HttpResponse::Ok().json(data.analyzer.tokens(&body.text, &mut cache))
}

/// HTTP POST endpoint `/v1/sentiment`
#[post("/v1/sentiment")]
async fn post_sentiment(data: web::Data<AppState>, body: web::Json<TextParams>) -> impl Responder {
	if body.text.trim().is_empty() {
		return warning(SENTIMENT_WARNING);
	}
	HttpResponse::Ok().json(data.sentiment.analyze(&body.text))
}

/// HTTP POST endpoint `/v1/translate`
///
/// Translates the text through the translation service. Service failures
/// are logged and reported with a 502.
#[post("/v1/translate")]
async fn post_translate(data: web::Data<AppState>, body: web::Json<TranslateParams>) -> impl Responder {
	let request = match TranslationRequest::new(&body.text, body.target) {
		Ok(r) => r,
		Err(e) => return warning(&e),
	};

	match data.translator.translate(&request).await {
		Ok(translated) => HttpResponse::Ok().json(Translation { target: request.target(), translated }),
		Err(e) => {
			log::error!("Translation to {} failed: {e}", request.target().code());
			HttpResponse::BadGateway().json(Failure { error: format!("Translation failed: {e}") })
		}
	}
}

/// HTTP GET endpoint `/v1/languages`
#[get("/v1/languages")]
async fn get_languages() -> impl Responder {
	let languages: Vec<LanguageEntry> = Language::ALL
		.iter()
		.map(|lang| LanguageEntry { name: lang.name(), code: lang.code() })
		.collect();
	HttpResponse::Ok().json(languages)
}

/// HTTP GET endpoint `/v1/about`
#[get("/v1/about")]
async fn get_about() -> impl Responder {
	HttpResponse::Ok().json(About {
		name: "NLP Web App",
		version: env!("CARGO_PKG_VERSION"),
		description: "Paste a text to analyse it, translate it or evaluate its sentiment.",
		modes: ["Text Analysis", "Translation", "Sentiment Analysis", "About"],
	})
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use actix_web::{test, App, HttpServer};
	use clap::Parser;
	use serde_json::{json, Value};

	use super::*;
	use crate::config::Config;

	fn state() -> web::Data<AppState> {
		state_with(&[])
	}

	fn state_with(args: &[&str]) -> web::Data<AppState> {
		let config = Config::parse_from(std::iter::once("rs-nlp-server").chain(args.iter().copied()));
		web::Data::new(AppState::new(&config).expect("state"))
	}

	/// Answers like the translate endpoint, echoing the target and the query.
	async fn fake_translate(query: web::Query<HashMap<String, String>>) -> HttpResponse {
		let param = |key: &str| query.get(key).map(String::as_str).unwrap_or_default();
		if param("client") != "gtx" || param("sl") != "auto" || param("dt") != "t" {
			return HttpResponse::BadRequest().finish();
		}
		let echo = format!("[{}:{}]", param("tl"), param("q"));
		HttpResponse::Ok().json(json!([[["Bonjour ", "Hello "], [echo, param("q")]], null, "en"]))
	}

	macro_rules! app {
		() => {
			test::init_service(App::new().app_data(state()).configure(configure)).await
		};
	}

	#[actix_web::test]
	async fn index_serves_mode_selector() {
		let app = app!();
		let req = test::TestRequest::get().uri("/").to_request();
		let body = test::call_and_read_body(&app, req).await;
		let html = std::str::from_utf8(&body).unwrap();
		for mode in ["Text Analysis", "Translation", "Sentiment Analysis", "About"] {
			assert!(html.contains(mode), "missing mode {mode}");
		}
	}

	#[actix_web::test]
	async fn empty_analysis_is_a_warning() {
		let app = app!();
		let req = test::TestRequest::post().uri("/v1/analyze").set_json(json!({ "text": "" })).to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status().as_u16(), 400);
		let body: Value = test::read_body_json(resp).await;
		assert_eq!(body["warning"], ANALYZE_WARNING);
	}

	#[actix_web::test]
	async fn analysis_returns_every_panel() {
		let app = app!();
		let req = test::TestRequest::post()
			.uri("/v1/analyze")
			.set_json(json!({ "text": "the cat sat on the mat the cat ran", "summary_words": 2 }))
			.to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body["summary"], "the cat");
		assert_eq!(body["stats"]["length"], 34);
		assert!(body["stopwords"].as_array().is_some_and(|s| !s.is_empty()));
		assert!(body["tokens"].is_array());
		assert!(body["word_cloud"]["words"].is_array());
		assert!(body["word_cloud_svg"].as_str().is_some_and(|svg| svg.starts_with("<svg")));
	}

	#[actix_web::test]
	async fn summarize_defaults_and_limits() {
		let app = app!();
		let req = test::TestRequest::post()
			.uri("/v1/summarize")
			.set_json(json!({ "text": "cat, cat! dog?", "count": 2 }))
			.to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body["summary"], "cat dog");

		let req = test::TestRequest::post().uri("/v1/summarize").set_json(json!({ "text": "" })).to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body["summary"], "");
	}

	#[actix_web::test]
	async fn negative_count_is_rejected() {
		let app = app!();
		let req = test::TestRequest::post()
			.uri("/v1/summarize")
			.set_json(json!({ "text": "cat", "count": -1 }))
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status().as_u16(), 400);
	}

	#[actix_web::test]
	async fn sentiment_scores_text() {
		let app = app!();
		let req = test::TestRequest::post().uri("/v1/sentiment").set_json(json!({ "text": "very good" })).to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		let polarity = body["polarity"].as_f64().unwrap();
		assert!((polarity - 0.91).abs() < 1e-4);

		let req = test::TestRequest::post().uri("/v1/sentiment").set_json(json!({ "text": "" })).to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status().as_u16(), 400);
	}

	#[actix_web::test]
	async fn short_translation_is_a_warning() {
		let app = app!();
		let req = test::TestRequest::post()
			.uri("/v1/translate")
			.set_json(json!({ "text": "hi", "target": "French" }))
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status().as_u16(), 400);
		let body: Value = test::read_body_json(resp).await;
		assert_eq!(body["warning"], rs_nlp_core::translation::TRANSLATION_WARNING);
	}

	#[actix_web::test]
	async fn translation_joins_service_segments() {
		let server = HttpServer::new(|| App::new().route("/translate", web::get().to(fake_translate)))
			.workers(1)
			.bind(("127.0.0.1", 0))
			.unwrap();
		let addr = server.addrs()[0];
		actix_web::rt::spawn(server.run());

		let url = format!("http://{addr}/translate");
		let app = test::init_service(App::new().app_data(state_with(&["--translate-url", url.as_str()])).configure(configure)).await;
		let req = test::TestRequest::post()
			.uri("/v1/translate")
			.set_json(json!({ "text": "Hello world", "target": "fr" }))
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert!(resp.status().is_success());
		let body: Value = test::read_body_json(resp).await;
		assert_eq!(body["translated"], "Bonjour [fr:Hello world]");
		assert_eq!(body["target"], "French");
	}

	#[actix_web::test]
	async fn unreachable_translation_service_is_a_bad_gateway() {
		let state = state_with(&["--translate-url", "http://127.0.0.1:1/x", "--timeout-secs", "1"]);
		let app = test::init_service(App::new().app_data(state).configure(configure)).await;
		let req = test::TestRequest::post()
			.uri("/v1/translate")
			.set_json(json!({ "text": "Hello world", "target": "fr" }))
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status().as_u16(), 502);
		let body: Value = test::read_body_json(resp).await;
		let error = body["error"].as_str().unwrap();
		assert!(error.starts_with("Translation failed:"), "{error}");
	}

	#[actix_web::test]
	async fn unknown_language_is_rejected() {
		let app = app!();
		let req = test::TestRequest::post()
			.uri("/v1/translate")
			.set_json(json!({ "text": "Hello world", "target": "Klingon" }))
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status().as_u16(), 400);
	}

	#[actix_web::test]
	async fn languages_are_listed_in_menu_order() {
		let app = app!();
		let req = test::TestRequest::get().uri("/v1/languages").to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		let codes: Vec<&str> = body.as_array().unwrap().iter().filter_map(|l| l["code"].as_str()).collect();
		assert_eq!(codes, vec!["fr", "es", "de", "it", "pt", "pl", "lt"]);
	}

	#[actix_web::test]
	async fn wordcloud_is_svg() {
		let app = app!();
		let req = test::TestRequest::post()
			.uri("/v1/wordcloud")
			.set_json(json!({ "text": "rust cargo rust crate" }))
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert!(resp.status().is_success());
		assert_eq!(resp.headers().get("content-type").unwrap(), "image/svg+xml");
		let body = test::read_body(resp).await;
		assert!(body.starts_with(b"<svg"));
	}

	#[actix_web::test]
	async fn tokens_are_memoized() {
		let data = state();
		let app = test::init_service(App::new().app_data(data.clone()).configure(configure)).await;
		for _ in 0..2 {
			let req = test::TestRequest::post().uri("/v1/tokens").set_json(json!({ "text": "Cats were running" })).to_request();
			let body: Value = test::call_and_read_body_json(&app, req).await;
			assert!(body.is_array());
		}
		assert_eq!(data.token_cache.lock().unwrap().len(), 1);
	}
}
