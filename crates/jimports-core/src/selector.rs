use std::fmt;

/// A single Java identifier token.
///
/// Equality is plain string equality; no normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered, non-empty sequence of identifier segments, such as
/// `java.util.List` or a package path.
///
/// Selectors are immutable; all combining operations return new values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Selector {
    segments: Vec<Identifier>,
}

impl Selector {
    /// Build a selector from identifier segments. Returns `None` when the
    /// sequence is empty.
    pub fn new(segments: Vec<Identifier>) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    /// Build a selector from string segments, e.g. `Selector::of(["java", "util"])`.
    ///
    /// Panics on an empty sequence; callers pass literal segment lists.
    pub fn of<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<Identifier> = segments
            .into_iter()
            .map(|s| Identifier::new(s))
            .collect();
        Self::new(segments).expect("selector segments must be non-empty")
    }

    /// Parse a dotted path such as `"com.example.Foo"`. Returns `None` for
    /// an empty string or empty segments.
    pub fn parse(dotted: &str) -> Option<Self> {
        if dotted.is_empty() || dotted.split('.').any(str::is_empty) {
            return None;
        }
        Self::new(dotted.split('.').map(Identifier::from).collect())
    }

    /// Concatenate `other` onto the end of this selector.
    pub fn combine(&self, other: &Selector) -> Selector {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Selector { segments }
    }

    /// Append a single identifier.
    pub fn join(&self, identifier: Identifier) -> Selector {
        let mut segments = self.segments.clone();
        segments.push(identifier);
        Selector { segments }
    }

    /// Number of segments.
    pub fn size(&self) -> usize {
        self.segments.len()
    }

    /// The last segment: the identifier this selector introduces.
    pub fn rightmost(&self) -> &Identifier {
        self.segments.last().expect("selector is non-empty")
    }

    /// The first segment.
    pub fn leftmost(&self) -> &Identifier {
        self.segments.first().expect("selector is non-empty")
    }

    pub fn segments(&self) -> &[Identifier] {
        &self.segments
    }

    /// Whether this selector begins with all of `prefix`'s segments.
    pub fn starts_with(&self, prefix: &Selector) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }

    /// Everything but the last segment, or `None` for a single-segment
    /// selector. For an import selector this is the package.
    pub fn package(&self) -> Option<Selector> {
        if self.segments.len() < 2 {
            return None;
        }
        Self::new(self.segments[..self.segments.len() - 1].to_vec())
    }

    /// Length of the longest common segment prefix with `other`.
    pub fn common_prefix_len(&self, other: &Selector) -> usize {
        self.segments
            .iter()
            .zip(other.segments.iter())
            .take_while(|(a, b)| a == b)
            .count()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_round_trip() {
        let sel = Selector::parse("java.util.List").unwrap();
        assert_eq!(sel.size(), 3);
        assert_eq!(sel.rightmost().as_str(), "List");
        assert_eq!(sel.leftmost().as_str(), "java");
        assert_eq!(sel.to_string(), "java.util.List");
    }

    #[test]
    fn parse_rejects_empty_segments() {
        assert!(Selector::parse("").is_none());
        assert!(Selector::parse("a..b").is_none());
        assert!(Selector::parse(".a").is_none());
    }

    #[test]
    fn combine_concatenates() {
        let pkg = Selector::of(["com", "example"]);
        let name = Selector::of(["Foo"]);
        let combined = pkg.combine(&name);
        assert_eq!(combined.to_string(), "com.example.Foo");
        // operands unchanged
        assert_eq!(pkg.size(), 2);
        assert_eq!(name.size(), 1);
    }

    #[test]
    fn starts_with_prefix() {
        let sel = Selector::parse("java.util.concurrent.ConcurrentMap").unwrap();
        assert!(sel.starts_with(&Selector::of(["java", "util"])));
        assert!(!sel.starts_with(&Selector::of(["java", "io"])));
        assert!(!Selector::of(["java"]).starts_with(&sel));
    }

    #[test]
    fn package_drops_last_segment() {
        let sel = Selector::parse("com.example.Foo").unwrap();
        assert_eq!(sel.package().unwrap().to_string(), "com.example");
        assert!(Selector::of(["Foo"]).package().is_none());
    }

    #[test]
    fn common_prefix_counts_shared_segments() {
        let a = Selector::parse("com.example.util.A").unwrap();
        let b = Selector::parse("com.example.net.B").unwrap();
        assert_eq!(a.common_prefix_len(&b), 2);
        assert_eq!(a.common_prefix_len(&a), 4);
    }
}
