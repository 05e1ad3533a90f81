//! Source-order walk of a Java syntax tree.
//!
//! The walker keeps a stack of lexical scopes. Declarations bind into the
//! current scope, identifier uses resolve upward through the stack, and
//! everything still open when a scope ends goes through the close
//! procedure: orphan class extension, class-boundary resolution retry,
//! and bubbling into the enclosing scope.

use std::collections::BTreeSet;

use jimports_core::{Identifier, Import, Selector};
use tree_sitter::Node;

use crate::parsed_file::{OrphanClass, ParsedFile, TopLevelClass};
use crate::scope::{Binding, ClassArena, ClassId, Scope};

// Node kinds from the tree-sitter-java grammar.
const NODE_CLASS: &str = "class_declaration";
const NODE_INTERFACE: &str = "interface_declaration";
const NODE_ENUM: &str = "enum_declaration";
const NODE_RECORD: &str = "record_declaration";
const NODE_ANNOTATION_TYPE: &str = "annotation_type_declaration";

pub(crate) struct Analyzer<'s> {
    source: &'s str,
    arena: ClassArena,
    scopes: Vec<Scope>,
    package: Option<Selector>,
    imports: Vec<Import>,
    insert_offset: usize,
}

impl<'s> Analyzer<'s> {
    pub fn analyze(source: &'s str, root: Node) -> ParsedFile {
        let mut analyzer = Analyzer {
            source,
            arena: ClassArena::default(),
            scopes: vec![Scope::new()],
            package: None,
            imports: Vec::new(),
            insert_offset: 0,
        };
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            analyzer.visit(child);
        }
        analyzer.finish()
    }

    fn text(&self, node: Node) -> &'s str {
        &self.source[node.byte_range()]
    }

    fn bind(&mut self, name: &str, binding: Binding) {
        self.scopes
            .last_mut()
            .expect("scope stack is never empty during traversal")
            .bindings
            .insert(Identifier::from(name), binding);
    }

    /// Resolve an identifier use against the scope stack, or defer it into
    /// the current scope's not-yet-resolved set.
    fn reference(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        let identifier = Identifier::from(name);
        if self
            .scopes
            .iter()
            .any(|scope| scope.bindings.contains_key(&identifier))
        {
            return;
        }
        self.scopes
            .last_mut()
            .expect("scope stack is never empty during traversal")
            .not_yet_resolved
            .insert(identifier);
    }

    fn visit_children(&mut self, node: Node) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.visit(child);
        }
    }

    fn visit_in_new_scope(&mut self, node: Node) {
        self.scopes.push(Scope::new());
        self.visit_children(node);
        self.close_scope();
    }

    fn visit(&mut self, node: Node) {
        match node.kind() {
            "package_declaration" => self.handle_package(node),
            "import_declaration" => self.handle_import(node),
            NODE_CLASS | NODE_INTERFACE | NODE_ENUM | NODE_RECORD | NODE_ANNOTATION_TYPE => {
                self.handle_type_declaration(node)
            }
            "method_declaration"
            | "constructor_declaration"
            | "compact_constructor_declaration" => self.handle_method(node),
            "field_declaration" | "local_variable_declaration" => {
                self.handle_variable_declaration(node)
            }
            "formal_parameter" | "spread_parameter" | "catch_formal_parameter" => {
                self.handle_parameter(node)
            }
            "resource" => self.handle_resource(node),
            "type_parameter" => self.handle_type_parameter(node),
            "enum_constant" => self.handle_enum_constant(node),
            "annotation_type_element_declaration" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.bind(self.text(name), Binding::Method);
                }
                if let Some(ty) = node.child_by_field_name("type") {
                    self.visit(ty);
                }
            }
            "block" | "constructor_body" | "switch_block" => self.visit_in_new_scope(node),
            "for_statement" | "try_with_resources_statement" | "catch_clause" => {
                self.visit_in_new_scope(node)
            }
            "enhanced_for_statement" => self.handle_enhanced_for(node),
            "lambda_expression" => self.handle_lambda(node),
            // Anonymous class bodies; named type bodies are walked from
            // handle_type_declaration and never reach here.
            "class_body" => self.visit_in_new_scope(node),
            "identifier" => self.reference(self.text(node)),
            "type_identifier" => {
                let text = self.text(node);
                if text != "var" {
                    self.reference(text);
                }
            }
            "field_access" => {
                if let Some(object) = node.child_by_field_name("object") {
                    self.visit(object);
                }
            }
            "method_invocation" => self.handle_invocation(node),
            "method_reference" | "scoped_identifier" | "scoped_type_identifier" => {
                if let Some(first) = node.named_child(0) {
                    self.visit(first);
                }
            }
            "annotation" | "marker_annotation" => self.handle_annotation(node),
            "labeled_statement" => {
                // skip the label identifier
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor).skip(1) {
                    self.visit(child);
                }
            }
            "break_statement" | "continue_statement" => {}
            "switch_label" => {
                // Bare identifiers in case labels are enum constants or
                // constant fields of the selector type, never imports.
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    if child.kind() != "identifier" {
                        self.visit(child);
                    }
                }
            }
            _ => self.visit_children(node),
        }
    }

    fn handle_package(&mut self, node: Node) {
        if let Some(path) = node.named_child(0) {
            self.package = Selector::parse(self.text(path));
        }
        self.insert_offset = node.end_byte();
    }

    fn handle_import(&mut self, node: Node) {
        let mut is_static = false;
        let mut wildcard = false;
        let mut path = None;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "static" => is_static = true,
                "asterisk" => wildcard = true,
                "identifier" | "scoped_identifier" => path = Some(child),
                _ => {}
            }
        }
        if !wildcard {
            if let Some(selector) = path.and_then(|p| Selector::parse(self.text(p))) {
                self.imports.push(Import {
                    selector,
                    is_static,
                });
            }
        }
        self.insert_offset = node.end_byte();
    }

    fn handle_type_declaration(&mut self, node: Node) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = self.text(name_node);

        // Only a class's `extends` clause participates in deferred
        // extension; it is not scanned for identifier references.
        let superclass = if node.kind() == NODE_CLASS {
            node.child_by_field_name("superclass")
                .and_then(|clause| clause.named_child(0))
                .and_then(|ty| self.type_selector(ty))
        } else {
            None
        };

        let class_id = self.arena.alloc(Identifier::from(name), superclass.clone());
        self.bind(name, Binding::Class(class_id));
        if superclass.is_some() {
            self.scopes
                .last_mut()
                .expect("scope stack is never empty during traversal")
                .not_yet_extended
                .push(class_id);
        }

        self.scopes.push(Scope::for_class(class_id));
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "superclass" => {}
                "class_body" | "interface_body" | "enum_body" | "annotation_type_body" => {
                    self.visit_children(child);
                }
                _ if child == name_node => {}
                _ => self.visit(child),
            }
        }
        self.close_scope();
    }

    /// Extract a dotted selector from a superclass type node, stripping
    /// generic arguments (`Base<T>` extends `Base`).
    fn type_selector(&self, node: Node) -> Option<Selector> {
        match node.kind() {
            "type_identifier" | "scoped_type_identifier" => Selector::parse(self.text(node)),
            "generic_type" => node.named_child(0).and_then(|n| self.type_selector(n)),
            _ => None,
        }
    }

    fn handle_method(&mut self, node: Node) {
        let name_node = node.child_by_field_name("name");
        if let Some(name) = name_node {
            self.bind(self.text(name), Binding::Method);
        }
        self.scopes.push(Scope::new());
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if Some(child) == name_node {
                continue;
            }
            self.visit(child);
        }
        self.close_scope();
    }

    fn handle_variable_declaration(&mut self, node: Node) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "variable_declarator" {
                if let Some(name) = child.child_by_field_name("name") {
                    self.bind(self.text(name), Binding::Variable);
                }
                if let Some(value) = child.child_by_field_name("value") {
                    self.visit(value);
                }
            } else {
                self.visit(child);
            }
        }
    }

    fn handle_parameter(&mut self, node: Node) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "identifier" => self.bind(self.text(child), Binding::Variable),
                "variable_declarator" => {
                    if let Some(name) = child.child_by_field_name("name") {
                        self.bind(self.text(name), Binding::Variable);
                    }
                }
                _ => self.visit(child),
            }
        }
    }

    fn handle_resource(&mut self, node: Node) {
        if let Some(ty) = node.child_by_field_name("type") {
            self.visit(ty);
        }
        if let Some(name) = node.child_by_field_name("name") {
            self.bind(self.text(name), Binding::Variable);
        }
        if let Some(value) = node.child_by_field_name("value") {
            self.visit(value);
        }
    }

    fn handle_type_parameter(&mut self, node: Node) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "type_identifier" | "identifier" => {
                    self.bind(self.text(child), Binding::TypeParameter)
                }
                _ => self.visit(child),
            }
        }
    }

    fn handle_enum_constant(&mut self, node: Node) {
        if let Some(name) = node.child_by_field_name("name") {
            self.bind(self.text(name), Binding::Variable);
        }
        if let Some(arguments) = node.child_by_field_name("arguments") {
            self.visit(arguments);
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.visit(body);
        }
    }

    fn handle_enhanced_for(&mut self, node: Node) {
        self.scopes.push(Scope::new());
        if let Some(ty) = node.child_by_field_name("type") {
            self.visit(ty);
        }
        if let Some(name) = node.child_by_field_name("name") {
            self.bind(self.text(name), Binding::Variable);
        }
        if let Some(value) = node.child_by_field_name("value") {
            self.visit(value);
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.visit(body);
        }
        self.close_scope();
    }

    fn handle_lambda(&mut self, node: Node) {
        self.scopes.push(Scope::new());
        if let Some(parameters) = node.child_by_field_name("parameters") {
            match parameters.kind() {
                "identifier" => self.bind(self.text(parameters), Binding::Variable),
                "inferred_parameters" => {
                    let mut cursor = parameters.walk();
                    for child in parameters.named_children(&mut cursor) {
                        if child.kind() == "identifier" {
                            self.bind(self.text(child), Binding::Variable);
                        }
                    }
                }
                _ => self.visit(parameters),
            }
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.visit(body);
        }
        self.close_scope();
    }

    fn handle_invocation(&mut self, node: Node) {
        if let Some(object) = node.child_by_field_name("object") {
            self.visit(object);
        } else if let Some(name) = node.child_by_field_name("name") {
            self.reference(self.text(name));
        }
        if let Some(type_arguments) = node.child_by_field_name("type_arguments") {
            self.visit(type_arguments);
        }
        if let Some(arguments) = node.child_by_field_name("arguments") {
            self.visit(arguments);
        }
    }

    fn handle_annotation(&mut self, node: Node) {
        if let Some(name) = node.child_by_field_name("name") {
            match name.kind() {
                "identifier" => self.reference(self.text(name)),
                _ => self.visit(name),
            }
        }
        if let Some(arguments) = node.child_by_field_name("arguments") {
            self.visit(arguments);
        }
    }

    // ------------------------------------------------------------------
    // Scope close
    // ------------------------------------------------------------------

    /// Run the orphan-extension fixpoint against a closing scope.
    ///
    /// Returns identifiers left over from the pending sets of classes that
    /// were successfully extended; the caller bubbles them to the parent.
    fn extend_orphans(&mut self, scope: &mut Scope) -> Vec<Identifier> {
        let mut extended = Vec::new();
        loop {
            let mut progress = false;
            for &class_id in &scope.not_yet_extended {
                let entity = self.arena.get(class_id);
                if entity.dropped || entity.superclass.is_none() {
                    continue;
                }
                let selector = entity.superclass.clone().expect("checked above");
                let Some(binding) = scope.bindings.get(selector.leftmost()) else {
                    // the parent scope may still introduce this name
                    continue;
                };
                match binding.class_id() {
                    // bound to something that is not a class: the file will
                    // not compile, abandon silently
                    None => self.arena.get_mut(class_id).dropped = true,
                    Some(start) => {
                        let mut parent = start;
                        let mut found = true;
                        for segment in &selector.segments()[1..] {
                            match self.arena.get(parent).inner_classes.get(segment).copied() {
                                Some(next) => parent = next,
                                None => {
                                    found = false;
                                    break;
                                }
                            }
                        }
                        if !found || parent == class_id {
                            self.arena.get_mut(class_id).dropped = true;
                        } else {
                            let entity = self.arena.get_mut(class_id);
                            entity.parent = Some(parent);
                            entity.superclass = None;
                            extended.push(class_id);
                            progress = true;
                        }
                    }
                }
            }
            if !progress {
                break;
            }
        }

        // Reduce pendings only after the fixpoint, so chains resolved in
        // this same scope contribute their full member closure.
        let mut remainder = Vec::new();
        for class_id in extended {
            let parent = self
                .arena
                .get(class_id)
                .parent
                .expect("extended class has a parent");
            let inherited = self.arena.transitive_members(parent);
            let entity = self.arena.get_mut(class_id);
            let pending = std::mem::take(&mut entity.pending);
            remainder.extend(pending.into_iter().filter(|id| !inherited.contains(id)));
        }
        remainder
    }

    /// Collect the orphans that survive this scope. In order-independent
    /// regions (class bodies, the compilation unit itself) their pending
    /// sets first shed anything this scope's bindings can resolve.
    fn surviving_orphans(&mut self, scope: &mut Scope, retry_pending: bool) -> Vec<ClassId> {
        let mut survivors = Vec::new();
        for class_id in scope.not_yet_extended.drain(..) {
            let entity = self.arena.get(class_id);
            if entity.dropped || entity.superclass.is_none() {
                continue;
            }
            if retry_pending {
                let resolvable: Vec<Identifier> = entity
                    .pending
                    .iter()
                    .filter(|id| scope.bindings.contains_key(*id))
                    .cloned()
                    .collect();
                let entity = self.arena.get_mut(class_id);
                for id in &resolvable {
                    entity.pending.remove(id);
                }
            }
            survivors.push(class_id);
        }
        survivors
    }

    fn close_scope(&mut self) {
        let mut scope = self.scopes.pop().expect("scope stack underflow");
        debug_assert!(
            !self.scopes.is_empty(),
            "the top scope is closed by finish()"
        );

        // The body just ended: record the class's declared members.
        if let Some(class_id) = scope.class {
            let bound: Vec<(Identifier, Option<ClassId>)> = scope
                .bindings
                .iter()
                .map(|(name, binding)| (name.clone(), binding.class_id()))
                .collect();
            let entity = self.arena.get_mut(class_id);
            for (name, inner) in bound {
                entity.members.insert(name.clone());
                if let Some(inner) = inner {
                    entity.inner_classes.insert(name, inner);
                }
            }
        }

        let remainder = self.extend_orphans(&mut scope);
        let is_class_scope = scope.class.is_some();
        let survivors = self.surviving_orphans(&mut scope, is_class_scope);

        let awaiting_extension = scope
            .class
            .map(|class_id| {
                let entity = self.arena.get(class_id);
                entity.superclass.is_some() && !entity.dropped
            })
            .unwrap_or(false);

        // Class bodies are order-independent, so members declared after a
        // use become visible at close; other scopes bubble unconditionally.
        let mut leftover = Vec::new();
        for identifier in std::mem::take(&mut scope.not_yet_resolved) {
            if is_class_scope && scope.bindings.contains_key(&identifier) {
                continue;
            }
            leftover.push(identifier);
        }

        if awaiting_extension {
            let class_id = scope.class.expect("awaiting scope has a class");
            self.arena.get_mut(class_id).pending.extend(leftover);
            leftover = Vec::new();
        }

        let parent = self
            .scopes
            .last_mut()
            .expect("non-top scope has a parent");
        parent.not_yet_resolved.extend(remainder);
        parent.not_yet_resolved.extend(leftover);
        parent.not_yet_extended.extend(survivors);
    }

    /// Close the compilation-unit scope and assemble the analysis result.
    fn finish(mut self) -> ParsedFile {
        let mut scope = self.scopes.pop().expect("top scope");
        debug_assert!(self.scopes.is_empty());

        let remainder = self.extend_orphans(&mut scope);
        let survivors = self.surviving_orphans(&mut scope, true);

        // Top-level types are order-independent just like class members:
        // retry before declaring anything unresolved.
        let mut unresolved = BTreeSet::new();
        for identifier in scope.not_yet_resolved.iter().chain(remainder.iter()) {
            if !scope.bindings.contains_key(identifier) {
                unresolved.insert(identifier.clone());
            }
        }

        let orphans: Vec<OrphanClass> = survivors
            .into_iter()
            .map(|class_id| {
                let entity = self.arena.get(class_id);
                OrphanClass {
                    name: entity.name.clone(),
                    superclass: entity
                        .superclass
                        .clone()
                        .expect("surviving orphan has a superclass selector"),
                    pending: entity.pending.clone(),
                }
            })
            .collect();

        let mut declarations: Vec<TopLevelClass> = scope
            .bindings
            .iter()
            .filter_map(|(name, binding)| {
                binding.class_id().map(|class_id| TopLevelClass {
                    name: name.clone(),
                    members: self.arena.get(class_id).members.clone(),
                })
            })
            .collect();
        declarations.sort_by(|a, b| a.name.cmp(&b.name));

        tracing::debug!(
            unresolved = unresolved.len(),
            orphans = orphans.len(),
            "analysis finished"
        );

        ParsedFile {
            package: self.package,
            imports: self.imports,
            unresolved,
            orphans,
            declarations,
            insert_offset: self.insert_offset,
        }
    }
}
