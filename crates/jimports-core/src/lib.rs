//! Core data types for jimports.
//!
//! This crate defines the vocabulary shared by the analyzer, the candidate
//! providers, and the fixer: identifiers, selectors, imports, candidates,
//! and the pluggable environment contract.
//!
//! This crate is intentionally free of I/O.

pub mod candidate;
pub mod environment;
pub mod import;
pub mod selector;

pub use candidate::{BestCandidates, Candidate, Candidates, Source};
pub use environment::Environment;
pub use import::Import;
pub use selector::{Identifier, Selector};
