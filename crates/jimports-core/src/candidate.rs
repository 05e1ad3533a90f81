use std::collections::BTreeMap;

use crate::import::Import;
use crate::selector::Identifier;

/// Where a candidate import was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// A sibling source file in the same package.
    Sibling,
    /// The bundled standard-library index.
    Stdlib,
    /// An external environment such as the Maven classpath.
    External,
}

impl Source {
    /// Relevance rank; lower is preferred.
    pub fn rank(self) -> u8 {
        match self {
            Source::Sibling => 0,
            Source::Stdlib => 1,
            Source::External => 2,
        }
    }
}

/// A possible import for an identifier, tagged with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub import: Import,
    pub source: Source,
}

impl Candidate {
    pub fn new(import: Import, source: Source) -> Self {
        Self { import, source }
    }
}

/// Candidates for a batch of identifiers, keyed by the identifier to be
/// resolved.
///
/// Within one identifier, candidates keep the order their source produced
/// them in; no ordering is guaranteed across sources.
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    by_identifier: BTreeMap<Identifier, Vec<Candidate>>,
}

impl Candidates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, identifier: Identifier, candidate: Candidate) {
        self.by_identifier
            .entry(identifier)
            .or_default()
            .push(candidate);
    }

    /// Concatenate another candidate map into this one, preserving
    /// per-identifier candidate order.
    pub fn merge(&mut self, other: Candidates) {
        for (identifier, candidates) in other.by_identifier {
            self.by_identifier
                .entry(identifier)
                .or_default()
                .extend(candidates);
        }
    }

    pub fn get(&self, identifier: &Identifier) -> &[Candidate] {
        self.by_identifier
            .get(identifier)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.by_identifier.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Identifier, &[Candidate])> {
        self.by_identifier
            .iter()
            .map(|(id, c)| (id, c.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.by_identifier.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_identifier.len()
    }
}

/// The selection output: at most one winning import per identifier.
pub type BestCandidates = BTreeMap<Identifier, Import>;
