//! Lexical scopes and class entities.
//!
//! Scopes form a stack during traversal; class entities live in an arena
//! and refer to each other by id. A class's superclass is held as a
//! selector rather than a direct reference, so resolution order is
//! decoupled from traversal order and the entity graph stays acyclic.

use std::collections::{BTreeSet, HashMap, HashSet};

use jimports_core::{Identifier, Selector};

/// Index of a class entity in the per-file arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ClassId(usize);

/// A class-like declaration (class, interface, enum, record, annotation).
#[derive(Debug)]
pub(crate) struct ClassEntity {
    pub name: Identifier,
    /// Superclass selector, cleared once extension succeeds. `None` means
    /// the entity is closed (no superclass, or already extended).
    pub superclass: Option<Selector>,
    /// Identifiers declared directly in the class body.
    pub members: BTreeSet<Identifier>,
    /// Member classes, for walking dotted superclass selectors.
    pub inner_classes: HashMap<Identifier, ClassId>,
    /// Identifiers used in the body but not resolved against the class's
    /// own scope nor any ancestor scope observed so far.
    pub pending: BTreeSet<Identifier>,
    /// Resolved parent entity, set when the superclass selector is found.
    pub parent: Option<ClassId>,
    /// The superclass selector named something that is not a class; the
    /// entity is abandoned without diagnostics.
    pub dropped: bool,
}

impl ClassEntity {
    fn new(name: Identifier, superclass: Option<Selector>) -> Self {
        Self {
            name,
            superclass,
            members: BTreeSet::new(),
            inner_classes: HashMap::new(),
            pending: BTreeSet::new(),
            parent: None,
            dropped: false,
        }
    }
}

/// Arena of all class entities seen in one compilation unit.
#[derive(Debug, Default)]
pub(crate) struct ClassArena {
    entities: Vec<ClassEntity>,
}

impl ClassArena {
    pub fn alloc(&mut self, name: Identifier, superclass: Option<Selector>) -> ClassId {
        let id = ClassId(self.entities.len());
        self.entities.push(ClassEntity::new(name, superclass));
        id
    }

    pub fn get(&self, id: ClassId) -> &ClassEntity {
        &self.entities[id.0]
    }

    pub fn get_mut(&mut self, id: ClassId) -> &mut ClassEntity {
        &mut self.entities[id.0]
    }

    /// Members of `id`'s class plus everything inherited along resolved
    /// parent links. Guarded against cycles introduced by mutually
    /// extending classes.
    pub fn transitive_members(&self, id: ClassId) -> BTreeSet<Identifier> {
        let mut members = BTreeSet::new();
        let mut seen = HashSet::new();
        let mut current = Some(id);
        while let Some(cid) = current {
            if !seen.insert(cid) {
                break;
            }
            let entity = self.get(cid);
            members.extend(entity.members.iter().cloned());
            current = entity.parent;
        }
        members
    }
}

/// What an identifier is bound to within a scope.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Binding {
    Class(ClassId),
    Method,
    Variable,
    TypeParameter,
}

impl Binding {
    pub fn class_id(self) -> Option<ClassId> {
        match self {
            Binding::Class(id) => Some(id),
            _ => None,
        }
    }
}

/// One node of the scope stack.
#[derive(Debug, Default)]
pub(crate) struct Scope {
    pub bindings: HashMap<Identifier, Binding>,
    /// Identifiers used here that no enclosing scope had a binding for at
    /// the time of use.
    pub not_yet_resolved: BTreeSet<Identifier>,
    /// Classes declared in this scope whose superclass lookup is deferred
    /// to scope close.
    pub not_yet_extended: Vec<ClassId>,
    /// The class entity whose body this scope is, if any.
    pub class: Option<ClassId>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_class(class: ClassId) -> Self {
        Self {
            class: Some(class),
            ..Self::default()
        }
    }
}
