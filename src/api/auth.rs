use crate::auth::{
    password, removal_cookie, session_cookie, AnySession, SessionConfig, SessionStore,
    SESSION_COOKIE,
};
use crate::db::{RepositoryError, UserOperations};
use crate::enums::auth::{AuthResp, LoginReq, MessageResp, SignupReq, UpdateProfileReq};
use crate::models::user::{NewUser, Role, UpdateUser};
use actix_web::middleware::NormalizePath;
use actix_web::{get, post, put, web, HttpRequest, HttpResponse, Responder};
use utoipa_actix_web::{scope, service_config::ServiceConfig};

pub fn config(cfg: &mut ServiceConfig, state: &crate::AppState) {
    cfg.service(
        scope::scope("/api/auth")
            .app_data(web::Data::new(state.user_ops.clone()))
            .app_data(web::Data::new(state.sessions.clone()))
            .app_data(web::Data::new(state.session_cfg.clone()))
            .wrap(NormalizePath::trim())
            .service(signup)
            .service(login)
            .service(logout)
            .service(get_profile)
            .service(update_profile),
    );
}

/// Restaurant accounts must come with the storefront fields the customer
/// views render; the schema keeps them nullable but the API does not.
fn validate_signup(req: &SignupReq) -> Result<(), String> {
    if req.name.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Err("Name, email and password are required".to_string());
    }
    if req.role == Role::Restaurant {
        let missing = [
            ("location", &req.location),
            ("description", &req.description),
            ("contact_info", &req.contact_info),
            ("timings", &req.timings),
        ]
        .iter()
        .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
        .map(|(field, _)| *field)
        .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(format!(
                "Restaurant accounts require: {}",
                missing.join(", ")
            ));
        }
    }
    Ok(())
}

#[utoipa::path(
    tag = "Auth",
    request_body = SignupReq,
    responses(
        (status = 201, description = "Account created, session established", body = AuthResp),
        (status = 400, description = "Missing or malformed fields", body = AuthResp),
        (status = 409, description = "Email already registered", body = AuthResp)
    ),
    summary = "Register a new account and start a session"
)]
#[post("/signup")]
pub(super) async fn signup(
    user_ops: web::Data<UserOperations>,
    sessions: web::Data<SessionStore>,
    session_cfg: web::Data<SessionConfig>,
    req_data: web::Json<SignupReq>,
) -> impl Responder {
    let req = req_data.into_inner();
    if let Err(msg) = validate_signup(&req) {
        return HttpResponse::BadRequest().json(AuthResp {
            status: "error".to_string(),
            user: None,
            error: Some(msg),
        });
    }

    let password_hash = match password::hash_password(&req.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("signup: failed to hash password for '{}': {}", req.email, e);
            return HttpResponse::InternalServerError().json(AuthResp {
                status: "error".to_string(),
                user: None,
                error: Some("Internal server error".to_string()),
            });
        }
    };

    let email = req.email.clone();
    let new_user = NewUser {
        name: req.name,
        email: req.email,
        password_hash,
        role: req.role,
        profile_picture: req.profile_picture,
        country: req.country,
        state: req.state,
        location: req.location,
        description: req.description,
        contact_info: req.contact_info,
        timings: req.timings,
    };

    match user_ops.create_user(new_user) {
        Ok(user) => {
            info!("signup: account created for '{}' as {}", email, user.role);
            let token = sessions.create(user.id, user.role);
            HttpResponse::Created()
                .cookie(session_cookie(token, &session_cfg))
                .json(AuthResp {
                    status: "ok".to_string(),
                    user: Some(user.into()),
                    error: None,
                })
        }
        Err(e) => {
            error!("signup: failed to create account for '{}': {}", email, e);
            HttpResponse::build(e.status()).json(AuthResp {
                status: "error".to_string(),
                user: None,
                error: Some(e.public_message()),
            })
        }
    }
}

#[utoipa::path(
    tag = "Auth",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Session established", body = AuthResp),
        (status = 401, description = "Invalid credentials", body = AuthResp)
    ),
    summary = "Authenticate and start a session"
)]
#[post("/login")]
pub(super) async fn login(
    user_ops: web::Data<UserOperations>,
    sessions: web::Data<SessionStore>,
    session_cfg: web::Data<SessionConfig>,
    req_data: web::Json<LoginReq>,
) -> impl Responder {
    let req = req_data.into_inner();

    // Unknown email, wrong role and bad password all collapse into the
    // same response so nothing is revealed about which part failed.
    let invalid_credentials = || {
        HttpResponse::Unauthorized().json(AuthResp {
            status: "error".to_string(),
            user: None,
            error: Some("Invalid credentials".to_string()),
        })
    };

    match user_ops.get_user_by_email_and_role(&req.email, req.role) {
        Ok(user) => {
            if !password::verify_password(&req.password, &user.password_hash) {
                debug!("login: password mismatch for '{}'", req.email);
                return invalid_credentials();
            }
            debug!("login: session established for '{}'", req.email);
            let token = sessions.create(user.id, user.role);
            HttpResponse::Ok()
                .cookie(session_cookie(token, &session_cfg))
                .json(AuthResp {
                    status: "ok".to_string(),
                    user: Some(user.into()),
                    error: None,
                })
        }
        Err(RepositoryError::NotFound(_)) => {
            debug!("login: no {} account for '{}'", req.role, req.email);
            invalid_credentials()
        }
        Err(e) => {
            error!("login: lookup failed for '{}': {}", req.email, e);
            HttpResponse::build(e.status()).json(AuthResp {
                status: "error".to_string(),
                user: None,
                error: Some(e.public_message()),
            })
        }
    }
}

#[utoipa::path(
    tag = "Auth",
    responses(
        (status = 200, description = "Session destroyed (idempotent)", body = MessageResp)
    ),
    summary = "End the current session"
)]
#[post("/logout")]
pub(super) async fn logout(
    sessions: web::Data<SessionStore>,
    req: HttpRequest,
) -> impl Responder {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        sessions.destroy(cookie.value());
    }
    HttpResponse::Ok().cookie(removal_cookie()).json(MessageResp {
        status: "ok".to_string(),
        error: None,
    })
}

#[utoipa::path(
    tag = "Auth",
    responses(
        (status = 200, description = "Own profile", body = AuthResp),
        (status = 401, description = "No active session", body = AuthResp),
        (status = 404, description = "Account no longer exists", body = AuthResp)
    ),
    summary = "Fetch the authenticated user's profile"
)]
#[get("/profile")]
pub(super) async fn get_profile(
    user_ops: web::Data<UserOperations>,
    session: AnySession,
) -> impl Responder {
    match user_ops.get_user_by_id(session.0.user_id) {
        Ok(user) => HttpResponse::Ok().json(AuthResp {
            status: "ok".to_string(),
            user: Some(user.into()),
            error: None,
        }),
        Err(e) => {
            error!(
                "get_profile: failed for user {}: {}",
                session.0.user_id, e
            );
            HttpResponse::build(e.status()).json(AuthResp {
                status: "error".to_string(),
                user: None,
                error: Some(e.public_message()),
            })
        }
    }
}

#[utoipa::path(
    tag = "Auth",
    request_body = UpdateProfileReq,
    responses(
        (status = 200, description = "Profile updated", body = AuthResp),
        (status = 401, description = "No active session", body = AuthResp),
        (status = 404, description = "Account no longer exists", body = AuthResp)
    ),
    summary = "Partially update the authenticated user's profile"
)]
#[put("/profile")]
pub(super) async fn update_profile(
    user_ops: web::Data<UserOperations>,
    session: AnySession,
    req_data: web::Json<UpdateProfileReq>,
) -> impl Responder {
    let req = req_data.into_inner();

    let password_hash = match req.password.as_deref() {
        Some(plain) if plain.is_empty() => {
            return HttpResponse::BadRequest().json(AuthResp {
                status: "error".to_string(),
                user: None,
                error: Some("Password may not be empty".to_string()),
            });
        }
        Some(plain) => match password::hash_password(plain) {
            Ok(hash) => Some(hash),
            Err(e) => {
                error!(
                    "update_profile: failed to hash password for user {}: {}",
                    session.0.user_id, e
                );
                return HttpResponse::InternalServerError().json(AuthResp {
                    status: "error".to_string(),
                    user: None,
                    error: Some("Internal server error".to_string()),
                });
            }
        },
        None => None,
    };

    let changes = UpdateUser {
        name: req.name,
        password_hash,
        profile_picture: req.profile_picture,
        country: req.country,
        state: req.state,
        location: req.location,
        description: req.description,
        contact_info: req.contact_info,
        timings: req.timings,
    };

    match user_ops.update_profile(session.0.user_id, changes) {
        Ok(user) => {
            debug!("update_profile: user {} updated", session.0.user_id);
            HttpResponse::Ok().json(AuthResp {
                status: "ok".to_string(),
                user: Some(user.into()),
                error: None,
            })
        }
        Err(e) => {
            error!(
                "update_profile: failed for user {}: {}",
                session.0.user_id, e
            );
            HttpResponse::build(e.status()).json(AuthResp {
                status: "error".to_string(),
                user: None,
                error: Some(e.public_message()),
            })
        }
    }
}
