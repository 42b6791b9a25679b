mod handlers;
mod state;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::config::AppConfig;
use crate::error::IrrigationError;
use state::AppState;

pub async fn start_server(port: u16, config: AppConfig) -> Result<(), IrrigationError> {
    let data = web::Data::new(AppState::new(config)?);

    println!("Starting avocado irrigation API on http://localhost:{port}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header();

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(data.clone())
            .route("/api/estimate", web::post().to(handlers::estimate))
            .route("/api/eto", web::get().to(handlers::eto))
            .route("/api/log", web::get().to(handlers::log_entries))
            .route("/api/coefficients", web::get().to(handlers::coefficients))
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await?;

    Ok(())
}
