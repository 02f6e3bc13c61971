use dotenvy::var;
use std::time::Duration;

#[derive(Clone)]
pub struct SessionConfig {
    pub ttl_secs: u64,
    pub cookie_secure: bool,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        // 24 hours, matching the cookie lifetime the web clients expect
        let ttl_secs = var("SESSION_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(24 * 60 * 60);
        let cookie_secure = var("SESSION_COOKIE_SECURE")
            .ok()
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);
        Self {
            ttl_secs,
            cookie_secure,
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}
