use std::fmt;

use crate::selector::{Identifier, Selector};

/// A single import declaration: a selector plus the `static` modifier.
///
/// The rightmost segment of the selector is the identifier the import
/// introduces into scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Import {
    pub selector: Selector,
    pub is_static: bool,
}

impl Import {
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            is_static: false,
        }
    }

    pub fn new_static(selector: Selector) -> Self {
        Self {
            selector,
            is_static: true,
        }
    }

    /// The identifier this import makes available.
    pub fn identifier(&self) -> &Identifier {
        self.selector.rightmost()
    }

    /// Render as a Java import statement, `import [static] a.b.C;`.
    pub fn statement(&self) -> String {
        if self.is_static {
            format!("import static {};", self.selector)
        } else {
            format!("import {};", self.selector)
        }
    }
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.statement())
    }
}
