//! Strict-contract answer generation.
//!
//! Builds the final prompt (profile + context + question + output contract),
//! calls the model, then sanitizes and validates the response. The caller
//! always gets parsed JSON or an explicit error carrying the raw text —
//! never free text.

mod analysis;

use std::sync::Arc;

use serde_json::Value;

use crate::core::errors::PipelineError;
use crate::llm::LlmClient;
use crate::profile::profile_prompt_block;

pub use analysis::{AnalysisAspect, ANALYSIS_ASPECTS};

/// Hard constraints appended to every prompt, after the caller's own
/// output contract.
const HARD_CONSTRAINTS: &str = "IMPORTANT: Return ONLY valid JSON without any additional text, \
markdown, or explanations. Do not provide an answer for items that are not \
food or health products. When a nutritional value is absent from the \
context, infer it from general nutrition knowledge instead of omitting it.";

/// Stateless between calls; the only side effect is the model call itself.
pub struct AnswerGenerator {
    llm: Arc<dyn LlmClient>,
}

impl AnswerGenerator {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Generates a JSON answer for `query` grounded in `context`.
    ///
    /// `contract` describes the JSON shape the caller expects; it goes into
    /// the prompt verbatim. Empty context or query fails with
    /// `MissingInput` before any model call.
    pub async fn answer(
        &self,
        profile: Option<&Value>,
        context: &str,
        query: &str,
        contract: &str,
    ) -> Result<Value, PipelineError> {
        if context.trim().is_empty() {
            return Err(PipelineError::MissingInput("context is empty".into()));
        }
        if query.trim().is_empty() {
            return Err(PipelineError::MissingInput("query is empty".into()));
        }

        let prompt = build_prompt(profile, context, query, contract);
        let raw = self.llm.generate(&prompt).await?;
        parse_answer(&raw)
    }
}

fn build_prompt(profile: Option<&Value>, context: &str, query: &str, contract: &str) -> String {
    let mut prompt = String::new();

    if let Some(profile) = profile {
        let block = profile_prompt_block(profile);
        if !block.is_empty() {
            prompt.push_str(&block);
            prompt.push_str("\n\n");
        }
    }

    prompt.push_str("Context:\n");
    prompt.push_str(context);
    prompt.push_str("\n\nQuestion: ");
    prompt.push_str(query);
    if !contract.trim().is_empty() {
        prompt.push_str("\n\n");
        prompt.push_str(contract);
    }
    prompt.push_str("\n\n");
    prompt.push_str(HARD_CONSTRAINTS);
    prompt
}

/// Strips markdown fences the model was told not to emit but sometimes
/// emits anyway. Each fence is removed on its own evidence: a leading
/// opener (with or without a language tag) and a trailing closer are
/// handled independently, not as a pair.
pub fn sanitize_model_json(raw: &str) -> String {
    let mut text = raw.trim();

    if text.starts_with("```") {
        text = match text.find('\n') {
            Some(newline) => &text[newline + 1..],
            None => "",
        };
    }
    if let Some(stripped) = text.trim_end().strip_suffix("```") {
        text = stripped;
    }

    text.trim().to_string()
}

fn parse_answer(raw: &str) -> Result<Value, PipelineError> {
    let clean = sanitize_model_json(raw);
    serde_json::from_str(&clean).map_err(|e| PipelineError::InvalidResponse {
        message: e.to_string(),
        raw: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockLlm;
    use serde_json::json;

    #[test]
    fn test_sanitize_fenced_with_language_tag() {
        assert_eq!(
            sanitize_model_json("```json\n{\"a\":1}\n```"),
            "{\"a\":1}"
        );
    }

    #[test]
    fn test_sanitize_unfenced_passthrough() {
        assert_eq!(sanitize_model_json("{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_sanitize_fences_stripped_independently() {
        // Leading fence only
        assert_eq!(sanitize_model_json("```\n{\"a\":1}"), "{\"a\":1}");
        // Trailing fence only
        assert_eq!(sanitize_model_json("{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[tokio::test]
    async fn test_answer_parses_fenced_json() {
        let llm = Arc::new(MockLlm::with_responses(vec!["```json\n{\"grade\":\"B\"}\n```"]));
        let generator = AnswerGenerator::new(llm);

        let answer = generator
            .answer(None, "oat bar, 400 kcal", "grade this product", "")
            .await
            .unwrap();
        assert_eq!(answer, json!({"grade": "B"}));
    }

    #[tokio::test]
    async fn test_non_json_response_carries_raw_text() {
        let llm = Arc::new(MockLlm::with_responses(vec!["The answer is 42"]));
        let generator = AnswerGenerator::new(llm);

        let err = generator
            .answer(None, "some context", "some query", "")
            .await
            .unwrap_err();
        match err {
            PipelineError::InvalidResponse { raw, .. } => {
                assert_eq!(raw, "The answer is 42");
            }
            other => panic!("expected InvalidResponse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_inputs_fail_before_model_call() {
        let llm = Arc::new(MockLlm::default());
        let generator = AnswerGenerator::new(llm.clone());

        let err = generator.answer(None, "", "query", "").await.unwrap_err();
        assert_eq!(err.kind(), "missing_input");

        let err = generator
            .answer(None, "context", "   ", "")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "missing_input");

        assert_eq!(llm.generate_calls(), 0);
    }

    #[tokio::test]
    async fn test_prompt_includes_profile_context_and_contract() {
        let llm = Arc::new(MockLlm::with_responses(vec!["{}"]));
        let generator = AnswerGenerator::new(llm.clone());

        let profile = json!({"allergiesMedications": "peanuts"});
        generator
            .answer(
                Some(&profile),
                "peanut butter bar",
                "is this safe?",
                "Return JSON with a 'safe' boolean.",
            )
            .await
            .unwrap();

        let prompt = llm.last_prompt().unwrap();
        assert!(prompt.contains("peanuts"));
        assert!(prompt.contains("peanut butter bar"));
        assert!(prompt.contains("is this safe?"));
        assert!(prompt.contains("'safe' boolean"));
        assert!(prompt.contains("ONLY valid JSON"));
    }
}
