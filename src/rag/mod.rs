//! RAG ingestion and retrieval.
//!
//! - `chunker`: splits documents into overlapping windows
//! - `Indexer`: embeds chunks and upserts them into the vector store
//! - `Retriever`: embeds a query and assembles context from the top matches

pub mod chunker;
mod indexer;
mod retriever;

pub use indexer::Indexer;
pub use retriever::{build_context, Retriever, NO_INFORMATION_ANSWER};
