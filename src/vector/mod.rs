//! Vector-store collaborator interface.
//!
//! The store owns chunks after upsert; the pipeline only keeps the
//! deterministic ids. `PineconeStore` is the production implementation.

mod pinecone;
mod store;

pub use pinecone::PineconeStore;
pub use store::{ChunkMatch, ChunkRecord, VectorStore};
