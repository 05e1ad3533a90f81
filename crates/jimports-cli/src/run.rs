//! The fix pipeline: parse, try to fix, widen the context, rewrite.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use miette::Result;

use jimports_maven::{LocalRepository, MavenClassEnvironment};
use jimports_parser::{parse_java, ParseError, ParsedFile};
use jimports_resolver::Fixer;
use jimports_util::errors::JimportsError;

use crate::cli::{self, Cli};
use crate::rewrite;

pub fn exec(args: Cli) -> Result<()> {
    let Some(path) = args.file else {
        cli::print_usage();
        return Ok(());
    };

    let source = fs::read_to_string(&path).map_err(JimportsError::Io)?;
    let parsed = match parse_java(&source) {
        Ok(parsed) => parsed,
        Err(ParseError::Syntax { diagnostics }) => {
            for diagnostic in diagnostics {
                eprintln!("{diagnostic}");
            }
            std::process::exit(1);
        }
        Err(error) => {
            return Err(JimportsError::Parse {
                message: error.to_string(),
            }
            .into());
        }
    };

    // the rewriter needs these after the fixer takes ownership
    let anchor = parsed.insert_offset;
    let existing = parsed.imports.clone();

    let mut fixer = Fixer::new(parsed);
    let mut result = fixer.try_to_fix();

    if !result.is_complete() {
        let siblings = load_siblings(&path);
        if !siblings.is_empty() {
            tracing::debug!(count = siblings.len(), "retrying with sibling files");
            fixer.add_siblings(siblings);
            result = fixer.try_to_fix();
        }
    }

    if !result.is_complete() {
        let repository = args
            .repository
            .map(LocalRepository::new)
            .or_else(LocalRepository::default_location);
        if let Some(repository) = repository {
            if let Some(environment) =
                MavenClassEnvironment::for_source_file(&path, repository)
            {
                fixer.set_environment(Arc::new(environment));
            }
        }
        result = fixer.last_try_to_fix();
    }

    if !result.is_complete() {
        tracing::debug!("some identifiers have no import candidate");
    }

    let output = rewrite::insert_imports(&source, anchor, &existing, result.fixes());
    if args.replace {
        fs::write(&path, output).map_err(JimportsError::Io)?;
    } else {
        print!("{output}");
    }
    Ok(())
}

/// Parse every other `.java` file in the directory of `path`. Files that
/// fail to parse are skipped; a broken neighbor should never stop the fix.
fn load_siblings(path: &Path) -> Vec<ParsedFile> {
    let dir = match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
        None => return Vec::new(),
    };
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let own = fs::canonicalize(path).ok();

    let mut siblings = Vec::new();
    for entry in entries.flatten() {
        let candidate = entry.path();
        if candidate.extension().map(|e| e != "java").unwrap_or(true) {
            continue;
        }
        if own.is_some() && fs::canonicalize(&candidate).ok() == own {
            continue;
        }
        let Ok(source) = fs::read_to_string(&candidate) else {
            continue;
        };
        match parse_java(&source) {
            Ok(parsed) => siblings.push(parsed),
            Err(error) => {
                tracing::debug!(file = %candidate.display(), %error, "skipping sibling");
            }
        }
    }
    siblings
}
