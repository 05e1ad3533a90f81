//! Splices chosen imports into the original source text.
//!
//! Everything outside the import region is preserved byte-for-byte. New
//! imports land right after the anchor the parser recorded: the end of
//! the last existing import, else the end of the package declaration,
//! else the very start of the file.

use jimports_core::Import;

pub fn insert_imports(
    source: &str,
    anchor: usize,
    existing: &[Import],
    fixes: &[Import],
) -> String {
    let mut additions: Vec<&Import> = fixes
        .iter()
        .filter(|fix| !existing.contains(fix))
        .collect();
    if additions.is_empty() {
        return source.to_string();
    }
    // static imports first, then lexicographic
    additions.sort_by_key(|import| (!import.is_static, import.selector.to_string()));
    additions.dedup();

    let mut out = String::with_capacity(source.len() + additions.len() * 40);
    if anchor == 0 {
        for import in &additions {
            out.push_str(&import.statement());
            out.push('\n');
        }
        out.push('\n');
        out.push_str(source);
    } else {
        out.push_str(&source[..anchor]);
        for import in &additions {
            out.push('\n');
            out.push_str(&import.statement());
        }
        out.push_str(&source[anchor..]);
    }
    out
}
