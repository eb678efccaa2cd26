use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Filesystem layout for the backend.
///
/// The snapshot path is a single fixed slot: every extraction overwrites it,
/// so the file always holds the text of the last extracted page.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub documents_dir: PathBuf,
    pub snapshot_path: PathBuf,
    pub config_path: PathBuf,
}

impl AppPaths {
    pub fn new() -> Self {
        Self::rooted(discover_data_dir())
    }

    /// Lays out the directory tree under an explicit root, bypassing
    /// environment discovery.
    pub fn rooted(data_dir: PathBuf) -> Self {
        let log_dir = data_dir.join("logs");
        let documents_dir = data_dir.join("documents");
        let snapshot_path = documents_dir.join("page_content.txt");
        let config_path = data_dir.join("config.toml");

        for dir in [&data_dir, &log_dir, &documents_dir] {
            let _ = fs::create_dir_all(dir);
        }

        AppPaths {
            data_dir,
            log_dir,
            documents_dir,
            snapshot_path,
            config_path,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

fn discover_data_dir() -> PathBuf {
    if let Ok(dir) = env::var("HEALTHWISE_DATA_DIR") {
        return PathBuf::from(dir);
    }
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Backend configuration, loaded from `config.toml` under the data dir.
///
/// Every section has defaults so a missing file yields a working local setup;
/// API keys come from the environment, never from the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub browser: BrowserConfig,
    pub llm: LlmConfig,
    pub vector: VectorConfig,
    pub rag: RagConfig,
    pub context: ContextConfig,
    pub profile: ProfileConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            browser: BrowserConfig::default(),
            llm: LlmConfig::default(),
            vector: VectorConfig::default(),
            rag: RagConfig::default(),
            context: ContextConfig::default(),
            profile: ProfileConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config file if present, falling back to defaults otherwise.
    pub fn load(paths: &AppPaths) -> Self {
        let config = match fs::read_to_string(&paths.config_path) {
            Ok(raw) => match toml::from_str(&raw) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!(
                        "Failed to parse {}: {}; using defaults",
                        paths.config_path.display(),
                        err
                    );
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };
        config.validated()
    }

    /// Replaces invalid chunking settings with defaults. The chunker
    /// requires `0 < overlap < size`; anything else from a hand-edited
    /// file gets the same warn-and-fallback treatment as a parse error.
    fn validated(mut self) -> Self {
        if self.rag.chunk_overlap == 0 || self.rag.chunk_overlap >= self.rag.chunk_size {
            let defaults = RagConfig::default();
            tracing::warn!(
                "Invalid chunking config (size {}, overlap {}); using {}/{}",
                self.rag.chunk_size,
                self.rag.chunk_overlap,
                defaults.chunk_size,
                defaults.chunk_overlap
            );
            self.rag.chunk_size = defaults.chunk_size;
            self.rag.chunk_overlap = defaults.chunk_overlap;
        }
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Base URL of the headless rendering sidecar.
    pub endpoint: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:9222".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub generation_model: String,
    pub embedding_model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            generation_model: "gemini-2.5-flash".to_string(),
            embedding_model: "text-embedding-004".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorConfig {
    /// Index host, e.g. `https://<index>-<project>.svc.<region>.pinecone.io`.
    pub index_host: String,
    pub api_key_env: String,
    /// Embedding dimensionality the index was created with.
    pub dimension: usize,
    pub namespace: Option<String>,
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            index_host: "http://127.0.0.1:5081".to_string(),
            api_key_env: "PINECONE_API_KEY".to_string(),
            dimension: 768,
            namespace: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    /// Concurrency cap for per-chunk embedding calls during ingest.
    pub embed_concurrency: usize,
    /// Default top-k for retrieval when the request omits it.
    pub default_top_k: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_overlap: 50,
            embed_concurrency: 8,
            default_top_k: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Word-count ceiling before a summarization pass is triggered.
    pub max_words: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self { max_words: 2500 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Base URL of the user-profile service.
    pub endpoint: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000".to_string(),
        }
    }
}
