use std::sync::Arc;

use crate::answer::AnswerGenerator;
use crate::browser::{BrowserDriver, RemoteBrowser};
use crate::context::ContextGovernor;
use crate::core::config::{AppConfig, AppPaths};
use crate::core::errors::PipelineError;
use crate::extract::Extractor;
use crate::llm::{GeminiClient, LlmClient};
use crate::profile::{HttpProfileStore, ProfileStore};
use crate::rag::{Indexer, Retriever};
use crate::vector::{PineconeStore, VectorStore};

/// Application state shared across all routes.
///
/// Holds one instance of each pipeline stage plus the collaborator
/// clients they are wired to. The governor inside carries the single
/// process-wide working context.
pub struct AppState {
    pub paths: Arc<AppPaths>,
    pub config: AppConfig,
    pub extractor: Extractor,
    pub indexer: Indexer,
    pub retriever: Retriever,
    pub governor: ContextGovernor,
    pub generator: AnswerGenerator,
    pub profiles: Arc<dyn ProfileStore>,
}

impl AppState {
    /// Wires up the production collaborators from config and environment.
    pub fn initialize(paths: Arc<AppPaths>, config: AppConfig) -> Result<Arc<Self>, PipelineError> {
        let llm: Arc<dyn LlmClient> = Arc::new(GeminiClient::new(&config.llm)?);
        let store: Arc<dyn VectorStore> = Arc::new(PineconeStore::new(&config.vector)?);
        let browser: Arc<dyn BrowserDriver> = Arc::new(RemoteBrowser::new(&config.browser));
        let profiles: Arc<dyn ProfileStore> = Arc::new(HttpProfileStore::new(&config.profile));

        Ok(Self::with_collaborators(
            paths, config, llm, store, browser, profiles,
        ))
    }

    /// Wires up the pipeline around caller-supplied collaborators.
    /// Production goes through `initialize`; tests inject doubles here.
    pub fn with_collaborators(
        paths: Arc<AppPaths>,
        config: AppConfig,
        llm: Arc<dyn LlmClient>,
        store: Arc<dyn VectorStore>,
        browser: Arc<dyn BrowserDriver>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Arc<Self> {
        let extractor = Extractor::new(browser, paths.snapshot_path.clone());
        let indexer = Indexer::new(llm.clone(), store.clone(), config.rag.clone());
        let retriever = Retriever::new(llm.clone(), store);
        let governor = ContextGovernor::new(llm.clone(), config.context.max_words);
        let generator = AnswerGenerator::new(llm);

        Arc::new(AppState {
            paths,
            config,
            extractor,
            indexer,
            retriever,
            governor,
            generator,
            profiles,
        })
    }
}
