use crate::auth::config::SessionConfig;
use crate::models::user::Role;
use actix_web::cookie::{time, Cookie, SameSite};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "sid";

/// Resolved identity of the caller, inserted into request extensions by
/// the session middleware.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i32,
    pub role: Role,
}

#[derive(Clone, Copy, Debug)]
struct SessionEntry {
    user_id: i32,
    role: Role,
    expires_at: Instant,
}

/// Server-held session state: opaque token -> {user id, role}, with
/// TTL-based expiry. Tokens are uuid v4 strings handed to clients as an
/// httpOnly cookie; nothing about the user is stored client-side.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, SessionEntry>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Mints a fresh session token bound to the given identity.
    pub fn create(&self, user_id: i32, role: Role) -> String {
        let token = Uuid::new_v4().to_string();
        let entry = SessionEntry {
            user_id,
            role,
            expires_at: Instant::now() + self.ttl,
        };
        self.inner
            .write()
            .expect("session store lock poisoned")
            .insert(token.clone(), entry);
        token
    }

    /// Looks up a token, dropping it when expired. An expired token
    /// behaves exactly like an unknown one.
    pub fn resolve(&self, token: &str) -> Option<Principal> {
        let now = Instant::now();
        {
            let sessions = self.inner.read().expect("session store lock poisoned");
            match sessions.get(token) {
                Some(entry) if entry.expires_at > now => {
                    return Some(Principal {
                        user_id: entry.user_id,
                        role: entry.role,
                    });
                }
                Some(_) => {}
                None => return None,
            }
        }
        self.inner
            .write()
            .expect("session store lock poisoned")
            .remove(token);
        None
    }

    /// Idempotent: destroying an unknown token is a no-op.
    pub fn destroy(&self, token: &str) {
        self.inner
            .write()
            .expect("session store lock poisoned")
            .remove(token);
    }

    /// Drops every expired entry; returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.inner.write().expect("session store lock poisoned");
        let before = sessions.len();
        sessions.retain(|_, entry| entry.expires_at > now);
        before - sessions.len()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// Session cookie handed out on signup/login: httpOnly so scripts cannot
/// read it, SameSite=Lax, Secure per deployment config.
pub fn session_cookie(token: String, cfg: &SessionConfig) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cfg.cookie_secure)
        .max_age(time::Duration::seconds(cfg.ttl_secs as i64))
        .finish()
}

/// Expired replacement cookie sent on logout.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();
    cookie
}
