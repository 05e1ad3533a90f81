use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all jimports operations.
#[derive(Debug, Error, Diagnostic)]
pub enum JimportsError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The Java source could not be parsed into a syntax tree at all.
    #[error("Parse error: {message}")]
    #[diagnostic(help("Check that the file is valid Java source"))]
    Parse { message: String },

    /// A POM file could not be loaded or parsed.
    #[error("POM error in {path}: {message}")]
    Pom { path: String, message: String },

    /// A jar archive could not be opened or listed.
    #[error("Jar error: {message}")]
    Jar { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type JimportsResult<T> = miette::Result<T>;
