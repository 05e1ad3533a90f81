//! Candidate selection: rank the candidates of each identifier and pick
//! a single winner.
//!
//! Ranking, in descending priority: source class (sibling, stdlib,
//! external), same-package affinity with other identifiers' winners,
//! stdlib- and external-specific subpriorities, and a total lexicographic
//! fallback so the result never depends on the order candidates arrived
//! from the registry.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::OnceLock;

use jimports_core::{BestCandidates, Candidate, Candidates, Import, Selector, Source};

fn java_util() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::of(["java", "util"]))
}

/// The default relevance ordering.
#[derive(Debug, Clone)]
pub struct BasicSelectionStrategy {
    file_package: Option<Selector>,
}

impl BasicSelectionStrategy {
    pub fn new(file_package: Option<Selector>) -> Self {
        Self { file_package }
    }

    /// Pick the best candidate for every identifier that has at least one.
    ///
    /// Runs in two passes: the first ranks each identifier in isolation,
    /// the second prefers candidates sharing a package with another
    /// identifier's first-pass winner, so imports from one library cluster
    /// together.
    pub fn select(&self, candidates: &Candidates) -> BestCandidates {
        let mut first_pass = BestCandidates::new();
        for (identifier, options) in candidates.iter() {
            if let Some(best) = options.iter().min_by(|a, b| self.compare(a, b)) {
                first_pass.insert(identifier.clone(), best.import.clone());
            }
        }

        let mut best = BestCandidates::new();
        for (identifier, options) in candidates.iter() {
            if options.is_empty() {
                continue;
            }
            let peer_packages: HashSet<Selector> = first_pass
                .iter()
                .filter(|&(other, _)| other != identifier)
                .filter_map(|(_, import)| import.selector.package())
                .collect();
            let top_rank = options
                .iter()
                .map(|c| c.source.rank())
                .min()
                .expect("options is non-empty");
            let winner = options
                .iter()
                .filter(|c| c.source.rank() == top_rank)
                .min_by(|a, b| {
                    Self::affinity(a, &peer_packages)
                        .cmp(&Self::affinity(b, &peer_packages))
                        .then_with(|| self.compare(a, b))
                })
                .expect("at least one candidate has the top rank");
            best.insert(identifier.clone(), winner.import.clone());
        }
        best
    }

    /// `false` sorts first, so affine candidates win.
    fn affinity(candidate: &Candidate, peer_packages: &HashSet<Selector>) -> bool {
        !candidate
            .import
            .selector
            .package()
            .map(|p| peer_packages.contains(&p))
            .unwrap_or(false)
    }

    fn compare(&self, a: &Candidate, b: &Candidate) -> Ordering {
        a.source
            .rank()
            .cmp(&b.source.rank())
            .then_with(|| match (a.source, b.source) {
                (Source::Stdlib, Source::Stdlib) => {
                    stdlib_priority(&a.import).cmp(&stdlib_priority(&b.import))
                }
                (Source::External, Source::External) => self
                    .external_priority(&b.import)
                    .cmp(&self.external_priority(&a.import)),
                _ => Ordering::Equal,
            })
            .then_with(|| lexical_key(&a.import).cmp(&lexical_key(&b.import)))
    }

    /// Deeper shared prefix with the file's own package ranks higher.
    fn external_priority(&self, import: &Import) -> usize {
        self.file_package
            .as_ref()
            .map(|pkg| import.selector.common_prefix_len(pkg))
            .unwrap_or(0)
    }
}

/// `java.util` beats any other stdlib package; then fewer segments win.
fn stdlib_priority(import: &Import) -> (bool, usize) {
    let in_util = import
        .selector
        .package()
        .map(|p| &p == java_util())
        .unwrap_or(false);
    (!in_util, import.selector.size())
}

/// Total, stable fallback ordering.
fn lexical_key(import: &Import) -> (String, bool) {
    (import.selector.to_string(), import.is_static)
}
