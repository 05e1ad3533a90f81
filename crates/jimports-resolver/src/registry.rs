//! Candidate registry: a uniform front over heterogeneous candidate
//! sources.
//!
//! Each contributor answers the same `find(identifiers)` contract; the
//! registry concatenates their answers per identifier, preserving each
//! source's own candidate order.

use std::collections::BTreeSet;
use std::sync::Arc;

use jimports_core::{
    Candidate, Candidates, Environment, Identifier, Import, Selector, Source,
};
use jimports_parser::ParsedFile;

/// A source of import candidates.
pub trait CandidateProvider {
    fn find(&self, identifiers: &[Identifier]) -> Candidates;
}

/// Aggregates providers and merges their candidates.
#[derive(Default)]
pub struct CandidateRegistry {
    providers: Vec<Box<dyn CandidateProvider>>,
}

impl CandidateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_provider(&mut self, provider: Box<dyn CandidateProvider>) {
        self.providers.push(provider);
    }

    /// Candidates for every given identifier, across all providers.
    pub fn find(&self, identifiers: &[Identifier]) -> Candidates {
        let mut merged = Candidates::new();
        for provider in &self.providers {
            merged.merge(provider.find(identifiers));
        }
        merged
    }
}

/// Candidates from sibling files of the same package: every top-level
/// declaration provides its simple name at `package ⊕ name`.
pub struct SiblingProvider {
    package: Option<Selector>,
    declared: BTreeSet<Identifier>,
}

impl SiblingProvider {
    pub fn new(package: Option<Selector>, siblings: &[ParsedFile]) -> Self {
        let declared = siblings
            .iter()
            .filter(|sibling| sibling.package == package)
            .flat_map(|sibling| sibling.declarations.iter().map(|d| d.name.clone()))
            .collect();
        Self { package, declared }
    }
}

impl CandidateProvider for SiblingProvider {
    fn find(&self, identifiers: &[Identifier]) -> Candidates {
        let mut candidates = Candidates::new();
        let Some(package) = &self.package else {
            // default-package siblings are addressable without imports
            return candidates;
        };
        for identifier in identifiers {
            if self.declared.contains(identifier) {
                let import = Import::new(package.join(identifier.clone()));
                candidates.add(identifier.clone(), Candidate::new(import, Source::Sibling));
            }
        }
        candidates
    }
}

/// Adapter exposing an [`Environment`] as a candidate provider.
pub struct EnvironmentProvider {
    environment: Arc<dyn Environment>,
}

impl EnvironmentProvider {
    pub fn new(environment: Arc<dyn Environment>) -> Self {
        Self { environment }
    }
}

impl CandidateProvider for EnvironmentProvider {
    fn find(&self, identifiers: &[Identifier]) -> Candidates {
        let mut candidates = Candidates::new();
        for (identifier, imports) in self.environment.find(identifiers) {
            for import in imports {
                candidates.add(identifier.clone(), Candidate::new(import, Source::External));
            }
        }
        candidates
    }
}
