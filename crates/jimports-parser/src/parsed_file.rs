use std::collections::BTreeSet;

use jimports_core::{Identifier, Import, Selector};

/// The analysis result for one compilation unit.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    /// The file's own package, if declared.
    pub package: Option<Selector>,
    /// Existing single-type import declarations (wildcard imports are not
    /// retained; they introduce no identifier).
    pub imports: Vec<Import>,
    /// Identifiers used but never resolved against any scope in the file.
    pub unresolved: BTreeSet<Identifier>,
    /// Classes whose declared superclass was not found in any enclosing
    /// scope, with the identifiers still awaiting the missing ancestors.
    pub orphans: Vec<OrphanClass>,
    /// Top-level type declarations, for sibling-file candidate lookup and
    /// orphan closing.
    pub declarations: Vec<TopLevelClass>,
    /// Byte offset at which new import declarations are spliced in: end of
    /// the last existing import, else end of the package declaration, else
    /// the start of the file.
    pub insert_offset: usize,
}

impl ParsedFile {
    /// Whether the simple name `identifier` is already introduced by one of
    /// the file's existing imports.
    pub fn already_imported(&self, identifier: &Identifier) -> bool {
        self.imports.iter().any(|i| i.identifier() == identifier)
    }
}

/// A class whose superclass could not be found within the file.
#[derive(Debug, Clone)]
pub struct OrphanClass {
    pub name: Identifier,
    pub superclass: Selector,
    /// Identifiers used in the class body that only an ancestor could
    /// still provide.
    pub pending: BTreeSet<Identifier>,
}

/// A top-level type declaration: its simple name and directly declared
/// member identifiers.
#[derive(Debug, Clone)]
pub struct TopLevelClass {
    pub name: Identifier,
    pub members: BTreeSet<Identifier>,
}
