use crate::auth::session::Principal;
use crate::models::user::Role;
use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, HttpResponse};
use futures::future::{ready, Ready};
use serde_json::json;

fn authentication_required() -> Error {
    InternalError::from_response(
        "authentication required",
        HttpResponse::Unauthorized().json(json!({
            "status": "error",
            "error": "Authentication required"
        })),
    )
    .into()
}

fn role_denied(required: Role) -> Error {
    InternalError::from_response(
        "wrong role",
        HttpResponse::Forbidden().json(json!({
            "status": "error",
            "error": format!("{} access required", capitalize(required.as_str()))
        })),
    )
    .into()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Any authenticated caller, regardless of role.
pub struct AnySession(pub Principal);

impl FromRequest for AnySession {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(p) = req.extensions().get::<Principal>() {
            return ready(Ok(AnySession(*p)));
        }
        ready(Err(authentication_required()))
    }
}

pub struct CustomerSession {
    user_id: i32,
}

impl CustomerSession {
    pub fn user_id(&self) -> i32 {
        self.user_id
    }
}

impl FromRequest for CustomerSession {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(p) = req.extensions().get::<Principal>() {
            if p.role == Role::Customer {
                return ready(Ok(CustomerSession { user_id: p.user_id }));
            }
            return ready(Err(role_denied(Role::Customer)));
        }
        ready(Err(authentication_required()))
    }
}

pub struct RestaurantSession {
    user_id: i32,
}

impl RestaurantSession {
    pub fn user_id(&self) -> i32 {
        self.user_id
    }
}

impl FromRequest for RestaurantSession {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(p) = req.extensions().get::<Principal>() {
            if p.role == Role::Restaurant {
                return ready(Ok(RestaurantSession { user_id: p.user_id }));
            }
            return ready(Err(role_denied(Role::Restaurant)));
        }
        ready(Err(authentication_required()))
    }
}
