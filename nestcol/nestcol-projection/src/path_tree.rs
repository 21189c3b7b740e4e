use std::collections::BTreeMap;

/// Requested field paths merged into a tree of field names.
///
/// Each dotted path contributes one node per segment; shared prefixes are
/// merged. A node without children marks a requested leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTree {
    children: BTreeMap<String, PathTree>,
}

impl PathTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = Self::new();
        for path in paths {
            tree.insert(path.as_ref());
        }
        tree
    }

    /// Insert one dotted path, splitting it on `.`.
    pub fn insert(&mut self, path: &str) {
        let mut node = self;
        for segment in path.split('.') {
            node = node.children.entry(segment.to_string()).or_default();
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&PathTree> {
        self.children.get(name)
    }

    /// Direct children, ordered by name.
    pub fn children(&self) -> impl Iterator<Item = (&str, &PathTree)> {
        self.children.iter().map(|(name, child)| (name.as_str(), child))
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Number of distinct requested leaves below this node.
    pub fn leaf_count(&self) -> usize {
        self.children
            .values()
            .map(|child| if child.is_leaf() { 1 } else { child.leaf_count() })
            .sum()
    }
}
