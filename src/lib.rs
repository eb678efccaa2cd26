//! HealthWise backend: product-page text extraction and a RAG pipeline for
//! answering health/nutrition questions about the extracted product.
//!
//! The pipeline stages live in their own modules; everything that touches
//! the outside world (browser, LLM, vector store, profile service) sits
//! behind a trait so the stages can be tested against in-memory doubles.

pub mod answer;
pub mod browser;
pub mod context;
pub mod core;
pub mod extract;
pub mod llm;
pub mod profile;
pub mod rag;
pub mod server;
pub mod state;
pub mod vector;

#[cfg(test)]
pub mod testing;
