use std::env;
use std::path::PathBuf;

/// Runtime configuration, read from the environment (a `.env` file is loaded
/// by the binaries before this runs). Missing sink credentials are allowed
/// here; the sink surfaces `NotConfigured` when it is actually built.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_key: String,
    pub draft_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            supabase_url: env::var("SUPABASE_URL").unwrap_or_default(),
            supabase_key: env::var("SUPABASE_ANON_KEY").unwrap_or_default(),
            draft_path: env::var("SURVEY_DRAFT_PATH")
                .unwrap_or_else(|_| "ht_survey_draft.json".to_string())
                .into(),
        }
    }
}
