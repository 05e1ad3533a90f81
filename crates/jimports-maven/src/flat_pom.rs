//! Flattened POM: declared dependencies with versions settled through
//! dependency management and property substitution, plus parent-chain
//! merging.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::coordinate::MavenCoordinate;
use crate::pom::Pom;

/// An in-memory projection of a POM, reduced to what dependency
/// resolution needs.
///
/// Well-defined means every declared dependency carries a literal,
/// placeholder-free version; only then can the parent-chain walk stop.
#[derive(Debug, Clone, Default)]
pub struct FlatPom {
    dependencies: Vec<MavenCoordinate>,
    managed_dependencies: Vec<MavenCoordinate>,
    properties: BTreeMap<String, String>,
    maybe_parent: Option<PathBuf>,
}

impl FlatPom {
    pub fn builder() -> FlatPomBuilder {
        FlatPomBuilder::default()
    }

    /// Project a raw POM, deriving the parent path per the Maven rules:
    /// explicit `relativePath`, empty string for "no parent", or the
    /// implicit `../pom.xml` when the element is absent.
    pub fn from_pom(pom: Pom) -> Self {
        let maybe_parent = pom.parent.as_ref().and_then(|parent| {
            match parent.relative_path.as_deref() {
                Some("") => None,
                Some(path) => Some(PathBuf::from(path)),
                None => Some(PathBuf::from("../pom.xml")),
            }
        });
        Self::builder()
            .dependencies(pom.dependencies)
            .managed_dependencies(pom.dependency_management)
            .properties(pom.properties)
            .maybe_parent(maybe_parent)
            .build()
    }

    pub fn dependencies(&self) -> &[MavenCoordinate] {
        &self.dependencies
    }

    pub fn maybe_parent(&self) -> Option<&Path> {
        self.maybe_parent.as_deref()
    }

    pub fn is_well_defined(&self) -> bool {
        self.dependencies.iter().all(MavenCoordinate::is_resolved)
    }

    /// Merge a parent POM into this one.
    ///
    /// A no-op when this POM is already well-defined. Otherwise the
    /// parent's declarations append after the child's own, properties
    /// union with the child winning, versions are re-settled, and the
    /// parent path advances one level up the chain.
    pub fn merge(&mut self, other: FlatPom) {
        if self.is_well_defined() {
            return;
        }
        self.dependencies.extend(other.dependencies);
        self.managed_dependencies.extend(other.managed_dependencies);
        for (key, value) in other.properties {
            self.properties.entry(key).or_insert(value);
        }
        self.enrich();
        self.substitute();
        self.maybe_parent = other.maybe_parent;
    }

    /// Copy versions from matching managed dependencies onto declared
    /// dependencies that still lack a literal one.
    fn enrich(&mut self) {
        for dep in &mut self.dependencies {
            if dep.is_resolved() {
                continue;
            }
            let managed_version = self
                .managed_dependencies
                .iter()
                .find(|managed| managed.management_key() == dep.management_key())
                .and_then(|managed| managed.version.clone());
            if let Some(version) = managed_version {
                dep.version = Some(version);
            }
        }
    }

    /// Replace whole-version `${name}` placeholders from the property
    /// map; unknown properties leave the placeholder in place.
    fn substitute(&mut self) {
        for dep in &mut self.dependencies {
            let Some(version) = dep.version.as_deref() else {
                continue;
            };
            let Some(name) = version
                .strip_prefix("${")
                .and_then(|rest| rest.strip_suffix('}'))
            else {
                continue;
            };
            if let Some(value) = self.properties.get(name) {
                dep.version = Some(value.clone());
            }
        }
    }
}

/// Collects the four optional inputs of a [`FlatPom`] and settles
/// versions on build.
#[derive(Debug, Default)]
pub struct FlatPomBuilder {
    dependencies: Vec<MavenCoordinate>,
    managed_dependencies: Vec<MavenCoordinate>,
    properties: BTreeMap<String, String>,
    maybe_parent: Option<PathBuf>,
}

impl FlatPomBuilder {
    pub fn dependencies(mut self, dependencies: Vec<MavenCoordinate>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn managed_dependencies(mut self, managed: Vec<MavenCoordinate>) -> Self {
        self.managed_dependencies = managed;
        self
    }

    pub fn properties(mut self, properties: BTreeMap<String, String>) -> Self {
        self.properties = properties;
        self
    }

    pub fn maybe_parent(mut self, parent: Option<PathBuf>) -> Self {
        self.maybe_parent = parent;
        self
    }

    pub fn build(self) -> FlatPom {
        let mut pom = FlatPom {
            dependencies: self.dependencies,
            managed_dependencies: self.managed_dependencies,
            properties: self.properties,
            maybe_parent: self.maybe_parent,
        };
        pom.enrich();
        pom.substitute();
        pom
    }
}
