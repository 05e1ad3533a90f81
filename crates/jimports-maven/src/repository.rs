//! Local Maven repository layout.

use std::path::{Path, PathBuf};

use crate::coordinate::MavenCoordinate;

/// A local Maven repository, `~/.m2/repository` by default.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    root: PathBuf,
}

impl LocalRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The conventional per-user repository, if a home directory exists.
    pub fn default_location() -> Option<Self> {
        dirs::home_dir().map(|home| Self::new(home.join(".m2").join("repository")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the jar for a coordinate, or `None` when the coordinate is
    /// unresolved, not a jar, or absent from the repository.
    pub fn jar_path(&self, coordinate: &MavenCoordinate) -> Option<PathBuf> {
        if !coordinate.is_resolved() || coordinate.type_ != "jar" {
            return None;
        }
        let version = coordinate.version.as_deref()?;
        let filename = match coordinate.classifier.as_deref() {
            Some(classifier) => {
                format!("{}-{}-{}.jar", coordinate.artifact_id, version, classifier)
            }
            None => format!("{}-{}.jar", coordinate.artifact_id, version),
        };
        let path = self
            .root
            .join(coordinate.group_id.replace('.', "/"))
            .join(&coordinate.artifact_id)
            .join(version)
            .join(filename);
        path.is_file().then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn jar_path_follows_the_repository_layout() {
        let tmp = tempfile::TempDir::new().unwrap();
        let jar_dir = tmp.path().join("com/google/guava/guava/28.0-jre");
        fs::create_dir_all(&jar_dir).unwrap();
        fs::write(jar_dir.join("guava-28.0-jre.jar"), b"stub").unwrap();

        let repo = LocalRepository::new(tmp.path());
        let coordinate =
            MavenCoordinate::new("com.google.guava", "guava").with_version("28.0-jre");
        assert_eq!(
            repo.jar_path(&coordinate),
            Some(jar_dir.join("guava-28.0-jre.jar"))
        );
    }

    #[test]
    fn unresolved_or_non_jar_coordinates_have_no_path() {
        let repo = LocalRepository::new("/nowhere");
        let unresolved = MavenCoordinate::new("a", "b");
        assert!(repo.jar_path(&unresolved).is_none());

        let mut pom_type = MavenCoordinate::new("a", "b").with_version("1.0");
        pom_type.type_ = "pom".to_string();
        assert!(repo.jar_path(&pom_type).is_none());
    }
}
