//! Working-context governance.
//!
//! The backend keeps exactly one block of extracted text per process — the
//! "working context" — which the answer generator reads. The governor
//! replaces it wholesale on every extraction, and compresses it with one
//! summarization pass when it grows past the word ceiling.
//!
//! Concurrency note: readers and writers share a `RwLock`, so access is
//! memory-safe, but there is no versioning — a `set` racing in-flight reads
//! is last-write-wins, and a reader may observe the context of a different
//! URL than it expects. Acceptable for the single-operator use this backend
//! targets; documented here rather than papered over.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::core::errors::PipelineError;
use crate::llm::LlmClient;

/// Fixed model output that marks content as not food/health related.
/// Consumers must treat it as "refuse to answer", never as literal context.
pub const OFF_DOMAIN_SENTINEL: &str = "Product not valid text";

/// The single current block of extracted or summarized text.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkingContext {
    pub text: String,
    pub size_words: usize,
}

impl WorkingContext {
    fn from_text(text: String) -> Self {
        let size_words = count_words(&text);
        Self { text, size_words }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn is_off_domain(&self) -> bool {
        self.text.trim() == OFF_DOMAIN_SENTINEL
    }
}

fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Owns the process-wide working context and its size ceiling.
pub struct ContextGovernor {
    llm: Arc<dyn LlmClient>,
    max_words: usize,
    inner: RwLock<WorkingContext>,
}

impl ContextGovernor {
    pub fn new(llm: Arc<dyn LlmClient>, max_words: usize) -> Self {
        Self {
            llm,
            max_words,
            inner: RwLock::new(WorkingContext::default()),
        }
    }

    /// Replaces the working context unconditionally. Last writer wins.
    pub async fn set_context(&self, text: String) {
        let mut guard = self.inner.write().await;
        *guard = WorkingContext::from_text(text);
        tracing::debug!("Working context replaced ({} words)", guard.size_words);
    }

    pub async fn working_context(&self) -> WorkingContext {
        self.inner.read().await.clone()
    }

    /// Compresses the context with a single summarization pass when it
    /// exceeds the word ceiling. At or under the ceiling this is a no-op
    /// and makes no model call. Never loops: one pass per call, even if
    /// the model's output is still oversized.
    pub async fn ensure_bounded(&self) -> Result<(), PipelineError> {
        let oversized = {
            let guard = self.inner.read().await;
            guard.size_words > self.max_words
        };
        if !oversized {
            return Ok(());
        }

        // Re-read inside the write lock so a racing set_context cannot be
        // clobbered with a summary of stale text.
        let mut guard = self.inner.write().await;
        if guard.size_words <= self.max_words {
            return Ok(());
        }

        let prompt = summarization_prompt(&guard.text);
        let summary = self.llm.generate(&prompt).await?;
        *guard = WorkingContext::from_text(summary);
        tracing::info!(
            "Working context summarized down to {} words",
            guard.size_words
        );
        Ok(())
    }
}

fn summarization_prompt(text: &str) -> String {
    format!(
        "Compress the following page text, keeping only content relevant to \
         health, nutrition, ingredients, dietary properties, and caloric \
         facts. If multiple products appear, keep only the single most \
         substantial product and discard the rest. If the content is not \
         about a food or health product, respond with exactly \
         \"{OFF_DOMAIN_SENTINEL}\" and nothing else.\n\nPage text:\n{text}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockLlm;

    #[tokio::test]
    async fn test_set_replaces_wholesale() {
        let governor = ContextGovernor::new(Arc::new(MockLlm::default()), 2500);

        governor.set_context("one two three".to_string()).await;
        governor.set_context("four five".to_string()).await;

        let ctx = governor.working_context().await;
        assert_eq!(ctx.text, "four five");
        assert_eq!(ctx.size_words, 2);
    }

    #[tokio::test]
    async fn test_under_threshold_is_a_noop() {
        let llm = Arc::new(MockLlm::default());
        let governor = ContextGovernor::new(llm.clone(), 2500);

        let text = "word ".repeat(2500).trim_end().to_string();
        governor.set_context(text.clone()).await;
        governor.ensure_bounded().await.unwrap();

        let ctx = governor.working_context().await;
        assert_eq!(ctx.text, text);
        assert_eq!(llm.generate_calls(), 0);
    }

    #[tokio::test]
    async fn test_over_threshold_triggers_exactly_one_pass() {
        let llm = Arc::new(MockLlm::with_responses(vec![
            "oats sugar 400 kcal per serving",
        ]));
        let governor = ContextGovernor::new(llm.clone(), 2500);

        governor.set_context("word ".repeat(3000)).await;
        governor.ensure_bounded().await.unwrap();

        let ctx = governor.working_context().await;
        assert_eq!(ctx.text, "oats sugar 400 kcal per serving");
        assert_eq!(ctx.size_words, 6);
        assert_eq!(llm.generate_calls(), 1);
    }

    #[tokio::test]
    async fn test_no_recheck_loop_when_summary_still_oversized() {
        let oversized_summary = "still ".repeat(50).trim_end().to_string();
        let llm = Arc::new(MockLlm::with_responses(vec![&oversized_summary]));
        let governor = ContextGovernor::new(llm.clone(), 10);

        governor.set_context("word ".repeat(20)).await;
        governor.ensure_bounded().await.unwrap();

        let ctx = governor.working_context().await;
        assert_eq!(ctx.size_words, 50);
        assert_eq!(llm.generate_calls(), 1);
    }

    #[tokio::test]
    async fn test_sentinel_detected_as_off_domain() {
        let llm = Arc::new(MockLlm::with_responses(vec![OFF_DOMAIN_SENTINEL]));
        let governor = ContextGovernor::new(llm.clone(), 10);

        governor.set_context("word ".repeat(20)).await;
        governor.ensure_bounded().await.unwrap();

        let ctx = governor.working_context().await;
        assert!(ctx.is_off_domain());
    }

    #[tokio::test]
    async fn test_empty_context_reports_empty() {
        let governor = ContextGovernor::new(Arc::new(MockLlm::default()), 2500);
        assert!(governor.working_context().await.is_empty());
    }
}
