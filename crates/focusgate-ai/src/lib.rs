pub mod ai_provider;
pub mod evaluator;
pub mod heuristic;
pub mod http;
pub mod prompt;
pub mod providers;

pub use ai_provider::{create_provider, AiProviderTrait};
pub use evaluator::{Evaluation, EvaluationMethod, RelevanceEvaluator};
pub use heuristic::{fallback_relevance, EDUCATIONAL_KEYWORDS};
pub use prompt::{build_relevance_prompt, parse_verdict};
