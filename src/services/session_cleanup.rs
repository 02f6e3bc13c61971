use crate::auth::SessionStore;
use tokio::time::{interval, Duration};

/// Sessions expire lazily on access; this sweep reclaims the ones nobody
/// comes back for.
pub async fn run_session_cleanup(sessions: SessionStore) {
    let mut tick = interval(Duration::from_secs(60));
    loop {
        tick.tick().await;
        let purged = sessions.purge_expired();
        if purged > 0 {
            info!("Background cleanup: dropped {} expired sessions", purged);
        }
    }
}
