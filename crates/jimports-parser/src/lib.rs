//! Java source analysis for jimports.
//!
//! Parses a compilation unit with tree-sitter and computes the set of
//! identifiers used but not declared anywhere in the file, along with the
//! orphan classes whose superclass the file never introduces. Parsing
//! failures are fatal; semantic oddities never are — the analyzer only
//! ever leaves identifiers unresolved.

mod analyzer;
mod parsed_file;
mod scope;

use std::fmt;

use thiserror::Error;
use tree_sitter::{Node, Parser};

pub use parsed_file::{OrphanClass, ParsedFile, TopLevelClass};

/// A single parse diagnostic, rendered as `line:column: error: message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: error: {}", self.line, self.column, self.message)
    }
}

/// Why a source file could not be analyzed.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to load the Java grammar: {message}")]
    Grammar { message: String },
    #[error("the file contains syntax errors")]
    Syntax { diagnostics: Vec<Diagnostic> },
}

/// Parse and analyze one Java source file.
pub fn parse_java(source: &str) -> Result<ParsedFile, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .map_err(|e| ParseError::Grammar {
            message: e.to_string(),
        })?;
    let tree = parser.parse(source, None).ok_or_else(|| ParseError::Grammar {
        message: "parser produced no tree".to_string(),
    })?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(ParseError::Syntax {
            diagnostics: collect_diagnostics(root),
        });
    }
    Ok(analyzer::Analyzer::analyze(source, root))
}

fn collect_diagnostics(root: Node) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    collect_error_nodes(root, &mut diagnostics);
    if diagnostics.is_empty() {
        // has_error() was true but no individual node carried it; report
        // the root so the caller still sees a location
        let start = root.start_position();
        diagnostics.push(Diagnostic {
            line: start.row + 1,
            column: start.column + 1,
            message: "syntax error".to_string(),
        });
    }
    diagnostics
}

fn collect_error_nodes(node: Node, out: &mut Vec<Diagnostic>) {
    if node.is_error() || node.is_missing() {
        let start = node.start_position();
        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            "syntax error".to_string()
        };
        out.push(Diagnostic {
            line: start.row + 1,
            column: start.column + 1,
            message,
        });
        return;
    }
    if !node.has_error() {
        return;
    }
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            collect_error_nodes(child, out);
        }
    }
}
