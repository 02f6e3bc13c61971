use actix_web::error::JsonPayloadError;
use actix_web::{Error, HttpRequest, HttpResponse};
use serde_json::json;

pub fn default_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    error!("Error in request: {} \n Error: {}", req.full_url(), err);
    let body = HttpResponse::BadRequest().json(json!({
        "status": "error",
        "error": "Malformed request body"
    }));
    actix_web::error::InternalError::from_response("", body).into()
}
