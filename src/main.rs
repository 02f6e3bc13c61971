#[macro_use]
extern crate log;
extern crate pretty_env_logger;

use actix_web::{web, App, HttpServer};
use dotenvy::dotenv;
use tableside::auth::SessionLayer;
use tableside::{api, services, AppState};
use utoipa_actix_web::AppExt;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = dotenv() {
        eprintln!("Failed to load .env file: {}", e);
    }

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    info!("Initializing database connection pool...");
    let state = AppState::new(&database_url);

    tokio::spawn(services::run_session_cleanup(state.sessions.clone()));

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);

    info!("Starting server at http://{}:{}", host, port);

    HttpServer::new(move || {
        let (app, openapi) = App::new()
            .into_utoipa_app()
            .map(|app| {
                app.app_data(web::JsonConfig::default().error_handler(api::default_error_handler))
            })
            .configure(|cfg| api::configure(cfg, &state))
            .split_for_parts();

        app.wrap(SessionLayer::new(state.sessions.clone())).service(
            SwaggerUi::new("/api-docs/{_:.*}").url("/api-docs/openapi.json", openapi),
        )
    })
    .bind((host, port))?
    .run()
    .await
}
