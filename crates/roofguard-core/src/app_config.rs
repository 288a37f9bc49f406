use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Provider credential. `None` is allowed at startup; gateway calls then
    /// fail with a missing-credential error.
    pub api_key: Option<String>,
    pub api_base_url: String,
    /// Model used for map-grounded calls (dispatch chat, estimates).
    pub grounded_model: String,
    /// Model used for text and structured-output calls.
    pub text_model: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub store_path: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("api_base_url", &self.api_base_url)
            .field("grounded_model", &self.grounded_model)
            .field("text_model", &self.text_model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("store_path", &self.store_path)
            .finish()
    }
}
