
use focusgate_storage::AiConfig;
use serde::{Deserialize, Serialize};

use crate::ai_provider::{create_provider, AiProviderTrait};
use crate::heuristic::fallback_relevance;
use crate::prompt::{build_relevance_prompt, parse_verdict};

/// Which path produced a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMethod {
    /// The remote model answered
    Remote,
    /// No remote model configured, or nothing to ask it
    Fallback,
    /// The remote call failed and the heuristic answered instead
    ErrorFallback,
}

impl EvaluationMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Fallback => "fallback",
            Self::ErrorFallback => "error_fallback",
        }
    }
}

/// Relevance verdict plus its provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub is_relevant: bool,
    pub method: EvaluationMethod,
}

/// Single yes/no relevance gate: remote model first, keyword heuristic otherwise
pub struct RelevanceEvaluator {
    provider: Option<Box<dyn AiProviderTrait>>,
}

impl RelevanceEvaluator {
    #[must_use]
    pub fn new(provider: Option<Box<dyn AiProviderTrait>>) -> Self {
        Self { provider }
    }

    /// Evaluator that never leaves the machine
    #[must_use]
    pub fn fallback_only() -> Self {
        Self { provider: None }
    }

    /// Build from stored settings. A disabled config or a missing credential
    /// yields a heuristic-only evaluator.
    #[must_use]
    pub fn from_config(config: &AiConfig) -> Self {
        if !config.enabled {
            log::info!("Remote relevance evaluation disabled, using keyword heuristic");
            return Self::fallback_only();
        }
        match create_provider(config) {
            Ok(provider) => {
                log::info!(
                    "Remote relevance evaluation via {} ({})",
                    config.provider,
                    provider.model_name()
                );
                Self::new(Some(provider))
            }
            Err(e) => {
                log::warn!("Remote relevance evaluation unavailable, using keyword heuristic: {e:#}");
                Self::fallback_only()
            }
        }
    }

    #[must_use]
    pub fn has_remote(&self) -> bool {
        self.provider.is_some()
    }

    /// Decide whether `content` supports the given focus areas. Never fails.
    pub async fn evaluate(&self, content: &str, focus_areas: &[String]) -> Evaluation {
        let fallback = |method| Evaluation {
            is_relevant: fallback_relevance(content, focus_areas),
            method,
        };

        let Some(provider) = &self.provider else {
            return fallback(EvaluationMethod::Fallback);
        };

        if content.trim().is_empty() || focus_areas.is_empty() {
            return fallback(EvaluationMethod::Fallback);
        }

        let prompt = build_relevance_prompt(content, focus_areas);
        match provider.generate(&prompt).await {
            Ok(answer) => {
                let is_relevant = parse_verdict(&answer);
                log::debug!("Remote verdict '{}' -> relevant={is_relevant}", answer.trim());
                Evaluation {
                    is_relevant,
                    method: EvaluationMethod::Remote,
                }
            }
            Err(e) => {
                log::warn!("Remote relevance evaluation failed, using keyword heuristic: {e:#}");
                fallback(EvaluationMethod::ErrorFallback)
            }
        }
    }
}
