//! Lexical path resolution.
//!
//! Resolution turns a user-supplied path plus the current working directory
//! into a canonical absolute path without ever consulting the tree. Lookup
//! against the tree is a separate step ([`VfsTree::lookup`]).
//!
//! [`VfsTree::lookup`]: crate::vfs::VfsTree::lookup

/// Resolve a user path against the rendered working directory.
///
/// Backslash separators are normalized to `/`, an absolute input stands
/// alone, a relative input is joined to `cwd`, and duplicate slashes are
/// collapsed. Total: any input string yields a canonical absolute path.
///
/// Resolution is purely lexical. A literal `..` segment inside the input
/// is NOT a "go up" token here; it survives as an ordinary segment and is
/// later looked up as a literal child name (only the bare `cd ..` verb
/// pops the working directory).
pub fn resolve(input: &str, cwd: &str) -> String {
    let path = input.replace('\\', "/");
    let joined = if path.starts_with('/') {
        path
    } else {
        format!("{}/{}", cwd.trim_end_matches('/'), path)
    };

    let segments: Vec<&str> = joined.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}
