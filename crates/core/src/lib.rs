//! stepform-core: questionnaire document parser core library.
//!
//! Turns questionnaire markdown -- prose interleaved with `<!-- ... -->`
//! directive markers -- into a typed [`Document`] and an interchange JSON
//! value consumed by the multi-step form UI.
//!
//! # Public API
//!
//! Key entry points are re-exported at the crate root for convenience:
//!
//! - [`parse()`] -- run the full four-stage pipeline on in-memory text
//! - [`validate()`] -- opt-in integrity pass over a parsed [`Document`]
//! - [`serialize()`] -- canonical interchange JSON for a [`Document`]
//! - [`ParseError`] -- structural parse error type
//! - Model types: [`Document`], [`Question`], [`QuestionType`], [`Provenance`]
//!
//! Individual stage functions are also exported for selective pipeline
//! execution. The core does no I/O: callers hand in text already read
//! into memory and receive the document back.

pub mod assemble;
pub mod ast;
pub mod body;
pub mod error;
pub mod header;
pub mod parse;
pub mod serialize;
pub mod split;
pub mod validate;

// ── Convenience re-exports: key types ────────────────────────────────

pub use ast::{Document, Provenance, Question, QuestionType};
pub use error::ParseError;
pub use parse::parse;
pub use serialize::serialize;
pub use validate::{validate, Finding, IntegrityCheck};
