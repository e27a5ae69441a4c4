//! Core data model for the EDL (Edit Description Language) engine: positions,
//! ranges, selections, documents, and the shared error taxonomy.
//!
//! This crate has no I/O and no async — it is the dependency-free foundation
//! that the parser and executor crates build on.

/// A single in-memory document: path, current text, and mutation bookkeeping.
pub mod document;
/// The batch-edit primitive used to shift and collapse selections under a mutation.
pub mod edit;
/// The shared error taxonomy for the parser, executor, and commit phase.
pub mod error;
/// One-indexed-on-display (row, column) positions within a document.
pub mod position;
/// Half-open `[start, end)` intervals of Unicode scalar offsets.
pub mod range;
/// Ordered, non-overlapping sets of ranges within a single document.
pub mod selection;

pub use document::Document;
pub use edit::Edit;
pub use error::{EdlError, Severity};
pub use position::Position;
pub use range::{CharIdx, Range};
pub use ropey::{Rope, RopeSlice};
pub use selection::Selection;
