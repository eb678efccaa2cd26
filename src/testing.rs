//! In-memory collaborator doubles for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::browser::{BrowserDriver, PageHandle};
use crate::core::errors::PipelineError;
use crate::llm::LlmClient;
use crate::vector::{ChunkMatch, ChunkRecord, VectorStore};

/// Deterministic toy embedding: folds bytes into 8 dimensions and
/// normalizes, so equal texts embed equally and cosine scores are stable.
pub fn toy_embedding(text: &str) -> Vec<f32> {
    let mut v = [0f32; 8];
    for (i, b) in text.bytes().enumerate() {
        v[i % 8] += f32::from(b) / 255.0;
    }
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut v {
            *x /= norm;
        }
    }
    v.to_vec()
}

pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    (dot / (na * nb)).clamp(0.0, 1.0)
}

#[derive(Default)]
pub struct MockLlm {
    fail_embed: bool,
    responses: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
    generate_count: AtomicUsize,
}

impl MockLlm {
    pub fn failing() -> Self {
        Self {
            fail_embed: true,
            ..Self::default()
        }
    }

    /// Queue of canned generate() responses; falls back to `"{}"` when
    /// the queue runs dry.
    pub fn with_responses(responses: Vec<&str>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(String::from).collect()),
            ..Self::default()
        }
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_count.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, PipelineError> {
        if self.fail_embed {
            return Err(PipelineError::Internal(
                "embedding backend unavailable".into(),
            ));
        }
        Ok(toy_embedding(text))
    }

    async fn generate(&self, prompt: &str) -> Result<String, PipelineError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.generate_count.fetch_add(1, Ordering::SeqCst);
        let response = self.responses.lock().unwrap().pop_front();
        Ok(response.unwrap_or_else(|| "{}".to_string()))
    }
}

#[derive(Default)]
pub struct MockVectorStore {
    fail: bool,
    records: Mutex<HashMap<String, ChunkRecord>>,
    upsert_count: AtomicUsize,
}

impl MockVectorStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.records.lock().unwrap().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn records(&self) -> Vec<ChunkRecord> {
        self.records.lock().unwrap().values().cloned().collect()
    }

    pub fn upsert_calls(&self) -> usize {
        self.upsert_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VectorStore for MockVectorStore {
    async fn upsert(&self, records: Vec<ChunkRecord>) -> Result<(), PipelineError> {
        if self.fail {
            return Err(PipelineError::Internal("vector store unavailable".into()));
        }
        self.upsert_count.fetch_add(1, Ordering::SeqCst);
        let mut map = self.records.lock().unwrap();
        for record in records {
            map.insert(record.id.clone(), record);
        }
        Ok(())
    }

    async fn query(&self, values: &[f32], top_k: usize) -> Result<Vec<ChunkMatch>, PipelineError> {
        if self.fail {
            return Err(PipelineError::Internal("vector store unavailable".into()));
        }
        let mut matches: Vec<ChunkMatch> = self
            .records
            .lock()
            .unwrap()
            .values()
            .map(|record| ChunkMatch {
                id: record.id.clone(),
                score: cosine(values, &record.values),
                text: record.text.clone(),
            })
            .collect();
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(top_k);
        Ok(matches)
    }
}

#[derive(Default)]
pub struct MockBrowser {
    fail_navigate: bool,
    texts: Mutex<HashMap<String, String>>,
    navigation_count: AtomicUsize,
}

impl MockBrowser {
    pub fn failing() -> Self {
        Self {
            fail_navigate: true,
            ..Self::default()
        }
    }

    /// Registers visible text for a selector; a registered selector also
    /// reports as existing.
    pub fn with_text(self, selector: &str, text: &str) -> Self {
        self.set_text(selector, text);
        self
    }

    pub fn set_text(&self, selector: &str, text: &str) {
        self.texts
            .lock()
            .unwrap()
            .insert(selector.to_string(), text.to_string());
    }

    pub fn navigations(&self) -> usize {
        self.navigation_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowserDriver for MockBrowser {
    async fn navigate(&self, _url: &str) -> Result<PageHandle, PipelineError> {
        if self.fail_navigate {
            return Err(PipelineError::Extraction("navigation timed out".into()));
        }
        self.navigation_count.fetch_add(1, Ordering::SeqCst);
        Ok(PageHandle("page-0".to_string()))
    }

    async fn visible_text(
        &self,
        _page: &PageHandle,
        selector: &str,
    ) -> Result<String, PipelineError> {
        Ok(self
            .texts
            .lock()
            .unwrap()
            .get(selector)
            .cloned()
            .unwrap_or_default())
    }

    async fn element_exists(
        &self,
        _page: &PageHandle,
        selector: &str,
    ) -> Result<bool, PipelineError> {
        Ok(self.texts.lock().unwrap().contains_key(selector))
    }
}
