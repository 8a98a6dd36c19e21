//! Path-indexed description of the fields a selective decode extracts.
//!
//! ```
//! use nbt_select::{Kind, SelectionTree, Selector};
//!
//! let tree = SelectionTree::new([
//!     Selector::new(["Data"], "LevelName", Kind::String),
//!     Selector::new(["Data", "Player"], "Health", Kind::Float),
//!     Selector::new(["Data", "Player"], "Pos", Kind::List),
//! ]);
//!
//! let data = tree.root().child("Data").unwrap();
//! assert!(data.is_wanted(1, "LevelName", Kind::String));
//! assert!(!data.is_wanted(1, "LevelName", Kind::Int));
//! assert_eq!(tree.len(), 3);
//! ```

use rustc_hash::FxHashMap;

use crate::Kind;

/// One field to extract: the compound path leading to it, its name, and
/// the kind it must have.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Selector {
    pub path: Vec<String>,
    pub name: String,
    pub kind: Kind,
}

impl Selector {
    pub fn new<P, S>(path: P, name: impl Into<String>, kind: Kind) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            name: name.into(),
            kind,
        }
    }

    /// A selector for an entry of the root compound.
    pub fn root(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            path: Vec::new(),
            name: name.into(),
            kind,
        }
    }
}

/// A node of the selection tree: the compound reached by following
/// `depth` path segments from the root.
#[derive(Clone, Debug, Default)]
pub struct SelectionNode {
    depth: usize,
    children: FxHashMap<String, SelectionNode>,
    wanted: FxHashMap<String, Vec<Kind>>,
    total: usize,
}

impl SelectionNode {
    fn with_depth(depth: usize) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }

    /// Walks `selector.path` from `self`, creating nodes as needed, and
    /// records the leaf at the node where the path runs out.
    fn insert(&mut self, selector: &Selector) {
        let mut node = self;
        for segment in &selector.path {
            let depth = node.depth + 1;
            node = node
                .children
                .entry(segment.clone())
                .or_insert_with(|| SelectionNode::with_depth(depth));
        }
        let kinds = node.wanted.entry(selector.name.clone()).or_default();
        if !kinds.contains(&selector.kind) {
            kinds.push(selector.kind);
        }
    }

    /// Number of path segments between the root and this node.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The node reached through the compound entry `name`, if any selector
    /// continues through it.
    #[inline]
    pub fn child(&self, name: &str) -> Option<&SelectionNode> {
        self.children.get(name)
    }

    /// Returns `true` if this node sits at `depth` and wants the leaf `name`
    /// of kind `kind`.
    pub fn is_wanted(&self, depth: usize, name: &str, kind: Kind) -> bool {
        self.depth == depth
            && self
                .wanted
                .get(name)
                .is_some_and(|kinds| kinds.contains(&kind))
    }

    /// Number of distinct selectors at or below this node.
    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Leaves wanted directly at this node, as `(name, kind)` pairs.
    pub fn wanted(&self) -> impl Iterator<Item = (&str, Kind)> {
        self.wanted
            .iter()
            .flat_map(|(name, kinds)| kinds.iter().map(move |kind| (name.as_str(), *kind)))
    }

    fn count(&mut self) -> usize {
        let own: usize = self.wanted.values().map(Vec::len).sum();
        let below: usize = self.children.values_mut().map(SelectionNode::count).sum();
        self.total = own + below;
        self.total
    }
}

/// The selectors of one selective decode, grouped by shared path prefix.
///
/// Built once from a flat selector list and immutable afterwards.
/// Duplicate selectors collapse into one.
#[derive(Clone, Debug, Default)]
pub struct SelectionTree {
    root: SelectionNode,
}

impl SelectionTree {
    pub fn new(selectors: impl IntoIterator<Item = Selector>) -> Self {
        let mut root = SelectionNode::with_depth(0);
        for selector in selectors {
            root.insert(&selector);
        }
        root.count();
        Self { root }
    }

    #[inline]
    pub fn root(&self) -> &SelectionNode {
        &self.root
    }

    /// Number of distinct selectors.
    #[inline]
    pub fn len(&self) -> usize {
        self.root.total
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.total == 0
    }

    /// Follows `path` from the root.
    pub fn node(&self, path: &[&str]) -> Option<&SelectionNode> {
        path.iter()
            .try_fold(&self.root, |node, segment| node.child(segment))
    }
}

impl FromIterator<Selector> for SelectionTree {
    fn from_iter<I: IntoIterator<Item = Selector>>(iter: I) -> Self {
        Self::new(iter)
    }
}
