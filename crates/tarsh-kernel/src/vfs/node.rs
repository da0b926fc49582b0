//! A single entry in the virtual tree.

use std::collections::BTreeMap;

/// Default owner assigned to every node at creation.
pub const DEFAULT_OWNER: &str = "root";

/// Kind of a node. Children exist only for directories, so the children
/// container lives inside the variant rather than as an optional field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Regular file. No children.
    File,
    /// Directory with an owned child mapping, keyed by child name.
    ///
    /// `BTreeMap` keeps children in lexicographic order, which is the
    /// listing order `ls` requires.
    Directory { children: BTreeMap<String, Node> },
}

/// One entry (file or directory) in the virtual tree.
///
/// `name` is the entry's own segment, not a full path. Each node is owned
/// by exactly one parent; there are no parent back references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// The entry's own path segment.
    pub name: String,
    /// Cosmetic ownership metadata, mutated by `chown`.
    pub owner: String,
    /// File or directory, fixed at creation.
    pub kind: NodeKind,
}

impl Node {
    /// Create a file node.
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: DEFAULT_OWNER.to_string(),
            kind: NodeKind::File,
        }
    }

    /// Create an empty directory node.
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: DEFAULT_OWNER.to_string(),
            kind: NodeKind::Directory {
                children: BTreeMap::new(),
            },
        }
    }

    /// True if this node is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    /// Child mapping, present only for directories.
    pub fn children(&self) -> Option<&BTreeMap<String, Node>> {
        match &self.kind {
            NodeKind::Directory { children } => Some(children),
            NodeKind::File => None,
        }
    }

    /// Look up a direct child by name. Always `None` for files.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children().and_then(|c| c.get(name))
    }

    /// Mutable child lookup, used by the tree walker for `chown`.
    pub(crate) fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        match &mut self.kind {
            NodeKind::Directory { children } => children.get_mut(name),
            NodeKind::File => None,
        }
    }

    /// Force this node to be a directory and return its child mapping.
    ///
    /// Intermediate path segments are always directories; a file node that
    /// later appears in intermediate position is retyped to an empty
    /// directory. The final segment of an entry is never retyped
    /// (first-writer-wins, enforced by the tree builder).
    pub(crate) fn ensure_dir_children(&mut self) -> &mut BTreeMap<String, Node> {
        if let NodeKind::File = self.kind {
            self.kind = NodeKind::Directory {
                children: BTreeMap::new(),
            };
        }
        let NodeKind::Directory { children } = &mut self.kind else {
            unreachable!("just retyped to directory")
        };
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_nodes_are_owned_by_root() {
        assert_eq!(Node::file("a.txt").owner, "root");
        assert_eq!(Node::directory("d").owner, "root");
    }

    #[test]
    fn files_have_no_children() {
        let file = Node::file("a.txt");
        assert!(!file.is_dir());
        assert!(file.children().is_none());
        assert!(file.child("anything").is_none());
    }

    #[test]
    fn ensure_dir_children_retypes_a_file() {
        let mut node = Node::file("was-a-file");
        node.ensure_dir_children();
        assert!(node.is_dir());
        assert_eq!(node.children().map(|c| c.len()), Some(0));
    }
}
