//! Core front end for the EDL entity-modeling toolchain.
//!
//! This crate provides the two non-trivial stages of the pipeline:
//!
//!   source .edl
//!     -> lexer      (tokens, via the token catalog)
//!     -> (external parser)
//!     -> document   (already-parsed syntax tree)
//!     -> assembler  (validated, cross-referenced domain model)
//!     -> (external code generator)
//!
//! The grammar/parser and the code generator are external
//! collaborators; their boundaries are the [`document::Document`]
//! input shape and the serialized [`model::Model`] output. Higher
//! level tools (CLI, editors, etc.) should depend on this crate
//! rather than reimplementing the pipeline.

// ---------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------

pub mod error;

// ---------------------------------------------------------------------
// Front-end: token catalog and lexing
// ---------------------------------------------------------------------

pub mod lexer;
pub mod token;

// ---------------------------------------------------------------------
// Semantic layer: document shape, domain model, assembly
// ---------------------------------------------------------------------

pub mod assembler;
pub mod document;
pub mod model;

// ---------------------------------------------------------------------
// Source-set collection
// ---------------------------------------------------------------------

pub mod sources;

// ---------------------------------------------------------------------
// Public API re-exports
// ---------------------------------------------------------------------

pub use assembler::assemble;
pub use error::CoreError;
pub use lexer::{LexOutput, lex};
pub use model::{ApplicationType, Model};
