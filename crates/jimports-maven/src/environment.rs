//! The Maven implementation of the external environment contract.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jimports_core::{Environment, Identifier, Import};
use jimports_util::fs::find_ancestor_with;

use crate::finder::find_module_dependencies;
use crate::index::ClasspathIndex;
use crate::repository::LocalRepository;

/// Looks up class names in the jars of the enclosing Maven module's
/// resolved dependencies.
///
/// The index is built on the first `find` call; concurrent callers block
/// on the same initialization and later calls are plain lookups.
pub struct MavenClassEnvironment {
    module_root: PathBuf,
    repository: LocalRepository,
    index: OnceLock<ClasspathIndex>,
}

impl MavenClassEnvironment {
    pub fn new(module_root: impl Into<PathBuf>, repository: LocalRepository) -> Self {
        Self {
            module_root: module_root.into(),
            repository,
            index: OnceLock::new(),
        }
    }

    /// Locate the module enclosing a source file by walking up to the
    /// nearest `pom.xml`. `None` when the file is not inside a Maven
    /// module.
    pub fn for_source_file(source: &Path, repository: LocalRepository) -> Option<Self> {
        let start = source.parent()?;
        let module_root = find_ancestor_with(start, "pom.xml")?;
        tracing::debug!(module = %module_root.display(), "found enclosing maven module");
        Some(Self::new(module_root, repository))
    }

    fn index(&self) -> &ClasspathIndex {
        self.index.get_or_init(|| {
            let module = match find_module_dependencies(&self.module_root) {
                Ok(module) => module,
                Err(error) => {
                    tracing::debug!(%error, "module pom did not load, empty classpath");
                    return ClasspathIndex::empty();
                }
            };
            for error in &module.errors {
                tracing::debug!(
                    path = %error.path.display(),
                    message = %error.message,
                    "pom load error along the parent chain"
                );
            }
            let jars: Vec<PathBuf> = module
                .dependencies
                .iter()
                .filter_map(|coordinate| {
                    let jar = self.repository.jar_path(coordinate);
                    if jar.is_none() {
                        tracing::debug!(%coordinate, "no jar in the local repository");
                    }
                    jar
                })
                .collect();
            tracing::debug!(jars = jars.len(), "building classpath index");
            ClasspathIndex::scan(&jars)
        })
    }
}

impl Environment for MavenClassEnvironment {
    fn find(&self, identifiers: &[Identifier]) -> HashMap<Identifier, Vec<Import>> {
        self.index().find(identifiers)
    }
}
