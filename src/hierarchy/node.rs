//! Nodes of the command hierarchy.

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Case-fold a command name the way case-insensitive groups compare names.
pub fn fold_case(name: &str) -> Cow<'_, str> {
    if name.chars().any(char::is_uppercase) {
        Cow::Owned(name.to_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}

/// Whether a node is a plain command or a group with children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Leaf,
    Group,
}

/// A registered command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandNode {
    name: String,
    qualified_name: String,
    kind: NodeKind,
}

/// Leaf commands carry nothing; groups carry their children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Leaf,
    Group(CommandGroup),
}

impl CommandNode {
    /// Create a leaf command.
    pub fn leaf(name: impl Into<String>, qualified_name: impl Into<String>) -> Self {
        CommandNode {
            name: name.into(),
            qualified_name: qualified_name.into(),
            kind: NodeKind::Leaf,
        }
    }

    /// Create an empty group.
    pub fn group(
        name: impl Into<String>,
        qualified_name: impl Into<String>,
        case_insensitive: bool,
    ) -> Self {
        CommandNode {
            name: name.into(),
            qualified_name: qualified_name.into(),
            kind: NodeKind::Group(CommandGroup::new(case_insensitive)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Space separated path from the root; empty for the root itself.
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn kind(&self) -> CommandKind {
        match self.kind {
            NodeKind::Leaf => CommandKind::Leaf,
            NodeKind::Group(_) => CommandKind::Group,
        }
    }

    pub fn node_kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group(_))
    }

    /// The group data, or `None` for a leaf.
    pub fn as_group(&self) -> Option<&CommandGroup> {
        match &self.kind {
            NodeKind::Group(group) => Some(group),
            NodeKind::Leaf => None,
        }
    }

    pub(crate) fn as_group_mut(&mut self) -> Option<&mut CommandGroup> {
        match &mut self.kind {
            NodeKind::Group(group) => Some(group),
            NodeKind::Leaf => None,
        }
    }

    /// Resolve a direct child by name. Leaves have no children.
    pub fn child(&self, name: &str) -> Option<&CommandNode> {
        self.as_group().and_then(|group| group.child(name))
    }

    /// Whether child lookups ignore case. Always false for leaves.
    pub fn case_insensitive(&self) -> bool {
        self.as_group().is_some_and(CommandGroup::case_insensitive)
    }

    /// Names of the direct children in registration order.
    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.as_group()
            .into_iter()
            .flat_map(|group| group.children().iter().map(CommandNode::name))
    }
}

/// Children of a group command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandGroup {
    children: Vec<CommandNode>,
    /// Lookup key (case-folded when case-insensitive) to position in `children`.
    index: HashMap<String, usize>,
    case_insensitive: bool,
}

impl CommandGroup {
    pub fn new(case_insensitive: bool) -> Self {
        CommandGroup {
            children: Vec::new(),
            index: HashMap::new(),
            case_insensitive,
        }
    }

    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn children(&self) -> &[CommandNode] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn lookup_key<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if self.case_insensitive {
            fold_case(name)
        } else {
            Cow::Borrowed(name)
        }
    }

    /// Resolve a child by name, honoring the group's case policy.
    pub fn child(&self, name: &str) -> Option<&CommandNode> {
        let key = self.lookup_key(name);
        self.index.get(key.as_ref()).map(|&i| &self.children[i])
    }

    pub(crate) fn child_mut(&mut self, name: &str) -> Option<&mut CommandNode> {
        let key = self.lookup_key(name);
        match self.index.get(key.as_ref()) {
            Some(&i) => self.children.get_mut(i),
            None => None,
        }
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.index.contains_key(self.lookup_key(name).as_ref())
    }

    /// Append a child. The caller has already checked for duplicates.
    pub(crate) fn push(&mut self, node: CommandNode) {
        let key = self.lookup_key(node.name()).into_owned();
        self.index.insert(key, self.children.len());
        self.children.push(node);
    }

    /// Remove a child, keeping the others in registration order.
    pub(crate) fn remove(&mut self, name: &str) -> Option<CommandNode> {
        let key = self.lookup_key(name).into_owned();
        let position = self.index.remove(&key)?;
        let node = self.children.remove(position);

        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_case() {
        assert!(matches!(fold_case("play"), Cow::Borrowed("play")));
        assert_eq!(fold_case("PlAy"), "play");
        assert_eq!(fold_case("ÉCOUTE"), "écoute");
    }

    #[test]
    fn test_case_sensitive_lookup() {
        let mut group = CommandGroup::new(false);
        group.push(CommandNode::leaf("Play", "Play"));

        assert!(group.child("Play").is_some());
        assert!(group.child("play").is_none());
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let mut group = CommandGroup::new(true);
        group.push(CommandNode::leaf("Play", "Play"));

        let child = group.child("pLAY").unwrap();
        assert_eq!(child.name(), "Play");
        assert!(group.contains("PLAY"));
    }

    #[test]
    fn test_remove_keeps_order_and_index() {
        let mut group = CommandGroup::new(false);
        for name in ["a", "b", "c", "d"] {
            group.push(CommandNode::leaf(name, name));
        }

        assert!(group.remove("b").is_some());
        assert!(group.remove("b").is_none());

        let names: Vec<&str> = group.children().iter().map(CommandNode::name).collect();
        assert_eq!(names, vec!["a", "c", "d"]);
        assert_eq!(group.child("d").unwrap().name(), "d");
        assert_eq!(group.child("c").unwrap().name(), "c");
    }

    #[test]
    fn test_leaf_has_no_children() {
        let leaf = CommandNode::leaf("ping", "ping");

        assert_eq!(leaf.kind(), CommandKind::Leaf);
        assert!(leaf.child("anything").is_none());
        assert_eq!(leaf.child_names().count(), 0);
        assert!(!leaf.case_insensitive());
    }
}
