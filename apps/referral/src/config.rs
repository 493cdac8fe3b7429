use std::path::PathBuf;

/// Application configuration loaded from environment variables.
/// Every variable is optional; defaults reproduce the stock `./profiles` layout.
#[derive(Debug, Clone)]
pub struct Config {
    pub profiles_dir: PathBuf,
    pub candidate_profile: String,
    pub receiver_profile: String,
    pub ollama_host: String,
    pub rust_log: String,
}

pub const DEFAULT_PROFILES_DIR: &str = "./profiles";
pub const DEFAULT_CANDIDATE_PROFILE: &str = "profile2.txt";
pub const DEFAULT_RECEIVER_PROFILE: &str = "profile1.txt";
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Config {
            profiles_dir: PathBuf::from(var("PROFILES_DIR", DEFAULT_PROFILES_DIR)),
            candidate_profile: var("CANDIDATE_PROFILE", DEFAULT_CANDIDATE_PROFILE),
            receiver_profile: var("RECEIVER_PROFILE", DEFAULT_RECEIVER_PROFILE),
            ollama_host: var("OLLAMA_HOST", DEFAULT_OLLAMA_HOST),
            rust_log: var("RUST_LOG", "info"),
        }
    }
}
