use std::time::Duration;

use reqwest::Client;

use rs_nlp_core::translation::{parse_response, TranslationRequest};

/// HTTP client of the translation service.
pub struct Translator {
	client: Client,
	url: String,
}

impl Translator {
	/// Creates a translator with a request timeout.
	pub fn new(url: &str, timeout: Duration) -> reqwest::Result<Self> {
		let client = Client::builder()
			.timeout(timeout)
			.build()?;
		Ok(Self { client, url: url.to_owned() })
	}

	/// Translates every chunk of `request` and joins the results.
	///
	/// # Errors
	/// Returns an error if a request fails, times out, gets a non-success
	/// status or an unreadable body. No retry is attempted.
	pub async fn translate(&self, request: &TranslationRequest) -> Result<String, String> {
		let mut parts = Vec::with_capacity(request.chunks().len());

		for chunk in request.chunks() {
			let response = self.client
				.get(&self.url)
				.query(&request.query(chunk))
				.send()
				.await
				.and_then(|r| r.error_for_status())
				.map_err(|e| format!("Request to translation service failed: {e}"))?;

			let body = response
				.text()
				.await
				.map_err(|e| format!("Failed to read translation response: {e}"))?;

			parts.push(parse_response(&body)?);
		}

		log::debug!("Translated {} chunk(s) to {}", parts.len(), request.target().code());
		Ok(request.join(&parts))
	}
}
