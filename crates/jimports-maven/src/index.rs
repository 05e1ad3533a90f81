//! Classpath index: simple class name → importable selectors, built from
//! jar entry names.
//!
//! Only entry names are read; bytecode is never decoded. Jars are scanned
//! in parallel, and a jar that cannot be opened is skipped with a debug
//! log — a missing artifact just means fewer candidates.

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use jimports_core::{Identifier, Import, Selector};
use jimports_util::errors::JimportsError;

/// Class lookup over a set of jars.
#[derive(Debug, Default)]
pub struct ClasspathIndex {
    by_simple_name: HashMap<Identifier, Vec<Import>>,
}

impl ClasspathIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Scan the given jars, indexing every top-level class entry by its
    /// simple name.
    pub fn scan(jars: &[PathBuf]) -> Self {
        let per_jar: Vec<Vec<Import>> = jars
            .par_iter()
            .map(|jar| match list_classes(jar) {
                Ok(imports) => imports,
                Err(error) => {
                    tracing::debug!(jar = %jar.display(), %error, "skipping unreadable jar");
                    Vec::new()
                }
            })
            .collect();

        let mut by_simple_name: HashMap<Identifier, Vec<Import>> = HashMap::new();
        for imports in per_jar {
            for import in imports {
                by_simple_name
                    .entry(import.identifier().clone())
                    .or_default()
                    .push(import);
            }
        }
        Self { by_simple_name }
    }

    pub fn find(&self, identifiers: &[Identifier]) -> HashMap<Identifier, Vec<Import>> {
        identifiers
            .iter()
            .filter_map(|identifier| {
                self.by_simple_name
                    .get(identifier)
                    .map(|imports| (identifier.clone(), imports.clone()))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_simple_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_simple_name.is_empty()
    }
}

/// List importable classes in one jar from its entry names.
fn list_classes(jar: &Path) -> Result<Vec<Import>, JimportsError> {
    let file = File::open(jar)?;
    let archive = zip::ZipArchive::new(file).map_err(|e| JimportsError::Jar {
        message: format!("{}: {e}", jar.display()),
    })?;

    let mut imports = Vec::new();
    for name in archive.file_names() {
        if let Some(selector) = class_entry_selector(name) {
            imports.push(Import::new(selector));
        }
    }
    // entry order inside a jar is arbitrary; sort for determinism
    imports.sort();
    Ok(imports)
}

/// Convert a jar entry name to an import selector, rejecting everything
/// that is not a top-level class.
fn class_entry_selector(entry: &str) -> Option<Selector> {
    let path = entry.strip_suffix(".class")?;
    if path.contains('$') || path.starts_with("META-INF/") {
        return None;
    }
    let simple_name = path.rsplit('/').next()?;
    if simple_name == "module-info" || simple_name == "package-info" {
        return None;
    }
    Selector::parse(&path.replace('/', "."))
}
