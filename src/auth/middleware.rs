use std::future::{ready, Ready};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};

use crate::auth::session::{SessionStore, SESSION_COOKIE};

/// Resolves the session cookie on every request and, when it maps to a
/// live session, inserts a `Principal` into the request extensions.
/// Requests without a valid session pass through untouched; the route
/// extractors decide whether that is acceptable.
#[derive(Clone)]
pub struct SessionLayer {
    sessions: SessionStore,
}

impl SessionLayer {
    pub fn new(sessions: SessionStore) -> Self {
        Self { sessions }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddleware {
            service,
            sessions: self.sessions.clone(),
        }))
    }
}

pub struct SessionMiddleware<S> {
    service: S,
    sessions: SessionStore,
}

impl<S, B> Service<ServiceRequest> for SessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(cookie) = req.cookie(SESSION_COOKIE) {
            if let Some(principal) = self.sessions.resolve(cookie.value()) {
                req.extensions_mut().insert(principal);
            }
        }
        self.service.call(req)
    }
}
