use std::env;
use std::path::PathBuf;

/// Runtime configuration, read once at startup.
///
/// The original screens each hardcoded their own backend address (and did not
/// agree on it); the base URL now comes from a single place.
pub struct Config {
    pub api_base_url: String,
    pub session_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8081".to_string())
            .trim_end_matches('/')
            .to_string();
        let session_file = env::var("SESSION_FILE")
            .unwrap_or_else(|_| ".taskdeck/session.json".to_string());

        Self {
            api_base_url,
            session_file: PathBuf::from(session_file),
        }
    }
}
