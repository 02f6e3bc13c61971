mod session_cleanup;

pub use session_cleanup::run_session_cleanup;
