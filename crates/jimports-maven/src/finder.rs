//! Parent-chain walk: load a module's POM and merge parents until the
//! flattened POM is well-defined or the chain runs out.
//!
//! Loader failures along the chain accumulate into the result instead of
//! aborting; only a broken module POM itself is fatal.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use jimports_util::errors::{JimportsError, JimportsResult};
use jimports_util::fs::normalize_path;

use crate::coordinate::MavenCoordinate;
use crate::flat_pom::FlatPom;
use crate::pom;

/// The module's dependency list, with whatever went wrong on the way.
#[derive(Debug)]
pub struct ModuleDependencies {
    pub dependencies: Vec<MavenCoordinate>,
    pub errors: Vec<PomLoadError>,
}

/// A POM along the parent chain that could not be loaded.
#[derive(Debug)]
pub struct PomLoadError {
    pub path: PathBuf,
    pub message: String,
}

/// Walk the parent chain starting at `<module_root>/pom.xml`.
pub fn find_module_dependencies(module_root: &Path) -> JimportsResult<ModuleDependencies> {
    let root_path = module_root.join("pom.xml");
    let mut flat = load_flat_pom(&root_path).map_err(|e| JimportsError::Pom {
        path: root_path.display().to_string(),
        message: e.message,
    })?;

    let mut current_dir = module_root.to_path_buf();
    let mut errors = Vec::new();
    let mut visited: HashSet<PathBuf> = HashSet::new();
    visited.insert(normalize_path(&root_path));

    while let Some(relative) = flat.maybe_parent().map(Path::to_path_buf) {
        if flat.is_well_defined() {
            break;
        }
        let parent_path = resolve_parent_path(&current_dir, &relative);
        if !visited.insert(parent_path.clone()) {
            tracing::debug!(path = %parent_path.display(), "parent chain loops, stopping");
            break;
        }
        match load_flat_pom(&parent_path) {
            Ok(parent) => {
                tracing::debug!(path = %parent_path.display(), "merging parent pom");
                current_dir = parent_path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_default();
                flat.merge(parent);
            }
            Err(error) => {
                errors.push(error);
                break;
            }
        }
    }

    Ok(ModuleDependencies {
        dependencies: flat.dependencies().to_vec(),
        errors,
    })
}

/// Resolve a parent `relativePath` against the directory of the POM that
/// declared it: append `pom.xml` to directory paths and collapse `..`
/// segments.
fn resolve_parent_path(current_dir: &Path, relative: &Path) -> PathBuf {
    let mut path = current_dir.join(relative);
    if path.file_name().map(|n| n != "pom.xml").unwrap_or(true) {
        path.push("pom.xml");
    }
    normalize_path(&path)
}

fn load_flat_pom(path: &Path) -> Result<FlatPom, PomLoadError> {
    let xml = fs::read_to_string(path).map_err(|e| PomLoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let pom = pom::parse_pom(&xml).map_err(|e| PomLoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    if let Some(parent) = &pom.parent {
        tracing::debug!(
            group = %parent.group_id,
            artifact = %parent.artifact_id,
            version = %parent.version,
            "pom declares a parent"
        );
    }
    Ok(FlatPom::from_pom(pom))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_path_resolution_appends_pom_xml_to_directories() {
        assert_eq!(
            resolve_parent_path(Path::new("/repo/module"), Path::new("..")),
            PathBuf::from("/repo/pom.xml")
        );
        assert_eq!(
            resolve_parent_path(Path::new("/repo/module"), Path::new("../parent/pom.xml")),
            PathBuf::from("/repo/parent/pom.xml")
        );
        assert_eq!(
            resolve_parent_path(Path::new("/repo/a/b"), Path::new("../../shared")),
            PathBuf::from("/repo/shared/pom.xml")
        );
    }
}
