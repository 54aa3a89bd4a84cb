//! The owned configuration tree.

use std::fmt;

use larch_scan::is_valid_name;

/// One configuration entry: a name, an optional value, and an ordered
/// list of children.
///
/// Sibling names may repeat (two `bind` entries under one parent are two
/// independent nodes); nothing deduplicates or reorders the child list.
/// A node owns its whole subtree, so dropping it releases every
/// descendant along with their name and value buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    /// `None` is "key with no value", observably different from
    /// `Some("")`.
    value: Option<String>,
    children: Vec<Node>,
}

impl Node {
    /// Create a standalone root node.
    ///
    /// Every other node enters a tree through [`Node::add`] or
    /// [`Node::add_with_value`].
    pub fn new(name: impl Into<String>) -> Result<Self, NameError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(NameError { name });
        }
        Ok(Self::unchecked(name))
    }

    /// Construct without validation. Callers have already validated the
    /// name (or are naming the implicit root).
    pub(crate) fn unchecked(name: impl Into<String>) -> Self {
        Node {
            name: name.into(),
            value: None,
            children: Vec::new(),
        }
    }

    /// The key name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value, if one is currently assigned.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Assign a value, replacing any previous one.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    /// Remove the value, returning the node to the "no value" state.
    pub fn clear_value(&mut self) -> Option<String> {
        self.value.take()
    }

    /// Append a new child with the given name and return it.
    ///
    /// The child goes to the end of the list; arrival order among
    /// siblings is preserved even when names repeat.
    pub fn add(&mut self, name: impl Into<String>) -> Result<&mut Node, NameError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(NameError { name });
        }
        self.children.push(Node::unchecked(name));
        let last = self.children.len() - 1;
        Ok(&mut self.children[last])
    }

    /// Append a child and assign its value in one step.
    pub fn add_with_value(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Node, NameError> {
        let child = self.add(name)?;
        child.set_value(value);
        Ok(child)
    }

    /// Append an already-built child. Parser use only; names were
    /// validated when the child was made.
    pub(crate) fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// First direct child, if any.
    pub fn first_child(&self) -> Option<&Node> {
        self.children.first()
    }

    /// First direct child with the given name, in insertion order.
    /// Direct children only; nothing recurses.
    pub fn child_by_name(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Mutable variant of [`Node::child_by_name`].
    pub fn child_by_name_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// Iterate over direct children in insertion order.
    pub fn children(&self) -> std::slice::Iter<'_, Node> {
        self.children.iter()
    }

    /// Iterate over the direct children named `name`, in insertion order.
    /// This is how repeated keys are read back.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Check if this node has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Resolve a `/`-separated path relative to this node.
    ///
    /// Empty segments (leading, trailing, or doubled slashes) are skipped
    /// and consume no resolution step. Each remaining segment resolves
    /// through [`Node::child_by_name`].
    pub fn locate(&self, path: &str) -> Result<&Node, LocateError> {
        let mut current = self;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = current
                .child_by_name(segment)
                .ok_or_else(|| LocateError::new(path, segment))?;
        }
        Ok(current)
    }

    /// Mutable variant of [`Node::locate`].
    pub fn locate_mut(&mut self, path: &str) -> Result<&mut Node, LocateError> {
        let mut current = self;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = match current.child_by_name_mut(segment) {
                Some(child) => child,
                None => return Err(LocateError::new(path, segment)),
            };
        }
        Ok(current)
    }
}

/// A key name containing characters outside the permitted set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameError {
    name: String,
}

impl NameError {
    /// The rejected name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid key name {:?}", self.name)
    }
}

impl std::error::Error for NameError {}

/// A path segment that did not resolve during [`Node::locate`].
///
/// A miss is a normal outcome for exploratory lookups; it carries no
/// partial state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocateError {
    path: String,
    segment: String,
}

impl LocateError {
    fn new(path: &str, segment: &str) -> Self {
        Self {
            path: path.to_string(),
            segment: segment.to_string(),
        }
    }

    /// The full path that was being resolved.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The segment that had no matching child.
    pub fn segment(&self) -> &str {
        &self.segment
    }
}

impl fmt::Display for LocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no child named {:?} while resolving {:?}",
            self.segment, self.path
        )
    }
}

impl std::error::Error for LocateError {}
