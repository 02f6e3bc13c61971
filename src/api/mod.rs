pub mod auth;
pub mod customers;
mod errors;
pub mod restaurants;

use crate::AppState;
use actix_web::{get, HttpResponse, Responder};
pub use errors::default_error_handler;
use utoipa_actix_web::service_config::ServiceConfig;

#[utoipa::path(
    responses(
        (status = 200, description = "Server up")
    )
)]
#[get("/")]
async fn root_endpoint() -> impl Responder {
    HttpResponse::Ok().body("Server up!")
}

pub fn configure(cfg: &mut ServiceConfig, state: &AppState) {
    cfg.service(root_endpoint)
        .configure(|cfg| auth::config(cfg, state))
        .configure(|cfg| customers::config(cfg, state))
        .configure(|cfg| restaurants::config(cfg, state));
}
