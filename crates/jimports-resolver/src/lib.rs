//! Candidate resolution for jimports.
//!
//! Collects import candidates from sibling files, the bundled
//! standard-library index, and a pluggable external environment, ranks
//! them under a deterministic relevance ordering, and drives the whole
//! lookup to a final set of import fixes.

pub mod fixer;
pub mod registry;
pub mod selection;
pub mod stdlib;

pub use fixer::{FixResult, Fixer};
pub use registry::{CandidateProvider, CandidateRegistry};
pub use selection::BasicSelectionStrategy;
pub use stdlib::StdlibProvider;
