mod config;
mod handlers;
mod state;
mod translate;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use clap::Parser;

use config::Config;
use state::AppState;

/// Main entry point for the server.
///
/// Builds the shared analyzers and the translation client, then starts an
/// Actix-web HTTP server serving the web page and the JSON API.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	let config = Config::parse();

	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level)).init();

	let state = AppState::new(&config).map_err(std::io::Error::other)?;
	let shared_state = web::Data::new(state);

	log::info!("Listening on http://{}:{}", config.host, config.port);

	HttpServer::new(move || {
		let cors = Cors::default()
			.allow_any_origin()
			.allowed_methods(vec!["GET", "POST"])
			.allow_any_header()
			.max_age(3600);

		App::new()
			.app_data(shared_state.clone())
			.wrap(cors)
			.wrap(Logger::default())
			.configure(handlers::configure)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}
