pub mod analyze;
pub mod answer;
pub mod context;
pub mod extract;
pub mod health;
pub mod rag;
