use std::sync::Arc;

use crate::config::Config;
use crate::letter::refiner::RefineOptions;
use crate::llm_client::CompletionBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Production: `LlmClient`. Tests swap in a scripted backend.
    pub llm: Arc<dyn CompletionBackend>,
    /// Loop defaults built from config; requests may override threshold and tries.
    pub refine_options: RefineOptions,
}

impl AppState {
    pub fn new(llm: Arc<dyn CompletionBackend>, config: &Config) -> Self {
        let refine_options = RefineOptions {
            model: config.llm_model.clone(),
            score_threshold: config.score_threshold,
            max_outer_tries: config.max_refine_tries,
            ..RefineOptions::default()
        };
        Self {
            llm,
            refine_options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedBackend;

    #[test]
    fn test_refine_options_come_from_config() {
        let config = Config::from_lookup(|key| match key {
            "MISTRAL_API_KEY" => Some("secret".to_string()),
            "LLM_MODEL" => Some("mistral-large-latest".to_string()),
            "SCORE_THRESHOLD" => Some("7".to_string()),
            "MAX_REFINE_TRIES" => Some("5".to_string()),
            _ => None,
        })
        .unwrap();
        let state = AppState::new(Arc::new(ScriptedBackend::new(vec![])), &config);

        assert_eq!(state.refine_options.model, "mistral-large-latest");
        assert_eq!(state.refine_options.score_threshold, 7.0);
        assert_eq!(state.refine_options.max_outer_tries, 5);
        assert_eq!(state.refine_options.review, RefineOptions::default().review);
    }
}
