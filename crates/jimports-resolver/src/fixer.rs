//! The fixer driver: alternates load and fix phases over one parsed file.
//!
//! The caller starts with `try_to_fix`, and on an incomplete result feeds
//! in more context (sibling files, then an external environment) before
//! retrying; `last_try_to_fix` forces a final answer even if orphan
//! classes could never be closed.

use std::collections::BTreeSet;
use std::sync::Arc;

use jimports_core::{Environment, Identifier, Import};
use jimports_parser::{OrphanClass, ParsedFile};

use crate::registry::{
    CandidateRegistry, EnvironmentProvider, SiblingProvider,
};
use crate::selection::BasicSelectionStrategy;
use crate::stdlib::{self, StdlibProvider};

/// Outcome of a fix attempt.
#[derive(Debug, Clone)]
pub struct FixResult {
    complete: bool,
    fixes: Vec<Import>,
}

impl FixResult {
    fn complete(fixes: Vec<Import>) -> Self {
        Self {
            complete: true,
            fixes,
        }
    }

    fn incomplete(fixes: Vec<Import>) -> Self {
        Self {
            complete: false,
            fixes,
        }
    }

    /// Whether every unresolved identifier found a winning import.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn fixes(&self) -> &[Import] {
        &self.fixes
    }

    pub fn into_fixes(self) -> Vec<Import> {
        self.fixes
    }
}

/// Drives candidate lookup and selection for a single file.
pub struct Fixer {
    file: ParsedFile,
    /// Orphans not yet closed by sibling context.
    orphans: Vec<OrphanClass>,
    /// Identifiers freed from orphan pending sets when a sibling closed
    /// the orphan but could not provide the member.
    extra_unresolved: BTreeSet<Identifier>,
    siblings: Vec<ParsedFile>,
    environment: Option<Arc<dyn Environment>>,
}

impl Fixer {
    pub fn new(file: ParsedFile) -> Self {
        let orphans = file.orphans.clone();
        Self {
            file,
            orphans,
            extra_unresolved: BTreeSet::new(),
            siblings: Vec::new(),
            environment: None,
        }
    }

    /// Add sibling files; only those sharing the file's package
    /// contribute. Orphans whose superclass a sibling declares are closed
    /// here, inheriting the sibling's member set.
    pub fn add_siblings(&mut self, siblings: Vec<ParsedFile>) {
        self.siblings.extend(
            siblings
                .into_iter()
                .filter(|s| s.package == self.file.package),
        );

        let orphans = std::mem::take(&mut self.orphans);
        for orphan in orphans {
            if let Some(closed) = self.close_against_siblings(&orphan) {
                tracing::debug!(
                    class = %orphan.name,
                    superclass = %orphan.superclass,
                    "closed orphan against a sibling"
                );
                self.extra_unresolved.extend(closed);
            } else {
                self.orphans.push(orphan);
            }
        }
    }

    /// Returns the orphan's leftover pending identifiers when a sibling
    /// declares its superclass, or `None` when no sibling does. Only
    /// single-segment superclass selectors can match a sibling's top-level
    /// declaration.
    fn close_against_siblings(&self, orphan: &OrphanClass) -> Option<Vec<Identifier>> {
        if orphan.superclass.size() != 1 {
            return None;
        }
        let name = orphan.superclass.leftmost();
        let parent = self
            .siblings
            .iter()
            .flat_map(|s| s.declarations.iter())
            .find(|d| &d.name == name)?;
        Some(
            orphan
                .pending
                .iter()
                .filter(|id| !parent.members.contains(id))
                .cloned()
                .collect(),
        )
    }

    pub fn set_environment(&mut self, environment: Arc<dyn Environment>) {
        self.environment = Some(environment);
    }

    pub fn try_to_fix(&self) -> FixResult {
        self.fix(false)
    }

    pub fn last_try_to_fix(&self) -> FixResult {
        self.fix(true)
    }

    fn fix(&self, last_try: bool) -> FixResult {
        let identifiers = self.unresolved_identifiers();
        if identifiers.is_empty() && self.orphans.is_empty() {
            return FixResult::complete(Vec::new());
        }
        if !self.orphans.is_empty() && !last_try {
            tracing::debug!(
                orphans = self.orphans.len(),
                "orphan classes remain, waiting for more context"
            );
            return FixResult::incomplete(Vec::new());
        }

        let registry = self.build_registry();
        let candidates = registry.find(&identifiers);
        let strategy = BasicSelectionStrategy::new(self.file.package.clone());
        let best = strategy.select(&candidates);

        let complete = identifiers.iter().all(|id| best.contains_key(id));
        let fixes: Vec<Import> = best.into_values().collect();
        if complete {
            FixResult::complete(fixes)
        } else {
            FixResult::incomplete(fixes)
        }
    }

    /// Every identifier an import could still satisfy: the file-level
    /// unresolved set, identifiers freed from closed orphans, and for each
    /// remaining orphan its pending set plus the head of its superclass
    /// selector. Identifiers an existing import already introduces, and
    /// `java.lang` types, need nothing.
    fn unresolved_identifiers(&self) -> Vec<Identifier> {
        let mut set: BTreeSet<Identifier> = self
            .file
            .unresolved
            .iter()
            .chain(self.extra_unresolved.iter())
            .cloned()
            .collect();
        for orphan in &self.orphans {
            set.extend(orphan.pending.iter().cloned());
            set.insert(orphan.superclass.leftmost().clone());
        }
        set.into_iter()
            .filter(|id| !self.file.already_imported(id))
            .filter(|id| !stdlib::is_java_lang(id))
            .collect()
    }

    fn build_registry(&self) -> CandidateRegistry {
        let mut registry = CandidateRegistry::new();
        registry.add_provider(Box::new(SiblingProvider::new(
            self.file.package.clone(),
            &self.siblings,
        )));
        registry.add_provider(Box::new(StdlibProvider::new()));
        if let Some(environment) = &self.environment {
            registry.add_provider(Box::new(EnvironmentProvider::new(environment.clone())));
        }
        registry
    }
}
