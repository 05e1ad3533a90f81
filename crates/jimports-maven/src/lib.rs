//! Maven environment for jimports.
//!
//! Discovers the Maven module enclosing a source file, flattens its POM
//! through the parent chain (dependency management, property
//! substitution, inheritance merging), and indexes the classes of the
//! resolved dependencies' jars so identifiers can be looked up by simple
//! name.

pub mod coordinate;
pub mod environment;
pub mod finder;
pub mod flat_pom;
pub mod index;
pub mod pom;
pub mod repository;

pub use coordinate::MavenCoordinate;
pub use environment::MavenClassEnvironment;
pub use finder::{find_module_dependencies, ModuleDependencies, PomLoadError};
pub use flat_pom::{FlatPom, FlatPomBuilder};
pub use index::ClasspathIndex;
pub use repository::LocalRepository;
