//! Tree builder and lookup.

use super::node::Node;

/// The virtual directory tree.
///
/// Built once from the archive entry sequence, before the interactive loop
/// starts. Lookups are read-only walks from the root; the only mutable
/// access is `lookup_mut`, which `chown` uses to set a node's owner.
#[derive(Debug, Clone)]
pub struct VfsTree {
    root: Node,
}

impl Default for VfsTree {
    fn default() -> Self {
        Self::new()
    }
}

impl VfsTree {
    /// Create an empty tree: a root directory named `/` with no children.
    pub fn new() -> Self {
        Self {
            root: Node::directory("/"),
        }
    }

    /// Build a tree from `(relative_path, is_dir)` pairs.
    ///
    /// Sources should yield directories before their contents. If they do
    /// not, intermediate segments are still created as directories on
    /// demand, and the final segment's file/directory flag is
    /// first-writer-wins: a path that appears twice keeps the kind from
    /// its first appearance.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: AsRef<str>,
    {
        let mut tree = Self::new();
        for (path, is_dir) in entries {
            tree.insert(path.as_ref(), is_dir);
        }
        tree
    }

    /// Insert one entry. Empty or separator-only paths are skipped.
    pub fn insert(&mut self, relative_path: &str, is_dir: bool) {
        let path = relative_path.replace('\\', "/");
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let Some((last, intermediate)) = parts.split_last() else {
            return;
        };

        let mut current = &mut self.root;
        for part in intermediate {
            // Intermediate segments are always directories.
            let children = current.ensure_dir_children();
            current = children
                .entry((*part).to_string())
                .or_insert_with(|| Node::directory(*part));
        }

        let children = current.ensure_dir_children();
        children.entry((*last).to_string()).or_insert_with(|| {
            if is_dir {
                Node::directory(*last)
            } else {
                Node::file(*last)
            }
        });
    }

    /// The synthetic root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Walk from the root following the segments of a canonical path.
    ///
    /// Bare `/` resolves directly to the root. A missing child or a file
    /// in non-final position yields `None`; this never panics for any
    /// input string.
    pub fn lookup(&self, canonical: &str) -> Option<&Node> {
        let mut current = &self.root;
        for segment in canonical.split('/').filter(|s| !s.is_empty()) {
            current = current.child(segment)?;
        }
        Some(current)
    }

    /// Mutable variant of [`lookup`](Self::lookup), for `chown`.
    pub fn lookup_mut(&mut self, canonical: &str) -> Option<&mut Node> {
        let mut current = &mut self.root;
        for segment in canonical.split('/').filter(|s| !s.is_empty()) {
            current = current.child_mut(segment)?;
        }
        Some(current)
    }
}
