use std::fmt;

/// A Maven dependency coordinate as declared in a POM.
///
/// `version` stays `None` or a `${…}` placeholder until enrichment and
/// property substitution settle it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenCoordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub type_: String,
    pub classifier: Option<String>,
    pub scope: String,
    pub optional: bool,
}

impl MavenCoordinate {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: None,
            type_: "jar".to_string(),
            classifier: None,
            scope: "compile".to_string(),
            optional: false,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// A coordinate is resolved once it has a literal, placeholder-free
    /// version.
    pub fn is_resolved(&self) -> bool {
        self.version
            .as_deref()
            .map(|v| !v.contains("${"))
            .unwrap_or(false)
    }

    /// The identity used to match against managed dependencies.
    pub fn management_key(&self) -> (&str, &str, &str, Option<&str>) {
        (
            &self.group_id,
            &self.artifact_id,
            &self.type_,
            self.classifier.as_deref(),
        )
    }
}

impl fmt::Display for MavenCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.group_id,
            self.artifact_id,
            self.version.as_deref().unwrap_or("?")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_requires_a_literal_version() {
        let bare = MavenCoordinate::new("com.google.guava", "guava");
        assert!(!bare.is_resolved());

        let placeholder = bare.clone().with_version("${guava.version}");
        assert!(!placeholder.is_resolved());

        let literal = bare.with_version("28.0-jre");
        assert!(literal.is_resolved());
        assert_eq!(literal.to_string(), "com.google.guava:guava:28.0-jre");
    }
}
