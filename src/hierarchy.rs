//! The command hierarchy typo suggestions are computed against.
//!
//! A [`CommandTree`] is owned by the command dispatcher. The typo engine only
//! ever reads it, through a shared [`SharedCommandTree`] handle, so the
//! dispatcher stays free to register or drop commands while suggestions are
//! being computed.

pub mod builder;
pub mod node;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TypoError};

pub use builder::CommandTreeBuilder;
pub use node::{CommandGroup, CommandKind, CommandNode, NodeKind, fold_case};

/// A command tree shared between the dispatcher and the typo engine.
pub type SharedCommandTree = Arc<RwLock<CommandTree>>;

/// Root of the command hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTree {
    root: CommandNode,
}

impl Default for CommandTree {
    fn default() -> Self {
        CommandTree::new(false)
    }
}

impl CommandTree {
    /// Create an empty tree whose top-level lookups follow `case_insensitive`.
    pub fn new(case_insensitive: bool) -> Self {
        CommandTree {
            root: CommandNode::group("", "", case_insensitive),
        }
    }

    /// Wrap the tree for sharing with a [`crate::typo::TypoEngine`].
    pub fn into_shared(self) -> SharedCommandTree {
        Arc::new(RwLock::new(self))
    }

    /// The root scope. Its qualified name is empty.
    pub fn root(&self) -> &CommandNode {
        &self.root
    }

    /// Find a node by its qualified name. The empty name is the root.
    pub fn scope(&self, qualified_name: &str) -> Option<&CommandNode> {
        qualified_name
            .split_whitespace()
            .try_fold(&self.root, |node, part| node.child(part))
    }

    /// Resolve a path of names from the root.
    pub fn get(&self, path: &[&str]) -> Option<&CommandNode> {
        path.iter()
            .try_fold(&self.root, |node, part| node.child(part))
    }

    fn group_mut(&mut self, path: &[&str]) -> Result<&mut CommandGroup> {
        let mut node = &mut self.root;
        for part in path {
            let group = node.as_group_mut().ok_or_else(|| {
                TypoError::hierarchy(format!("'{}' is not a group", path.join(" ")))
            })?;
            node = group.child_mut(part).ok_or_else(|| {
                TypoError::hierarchy(format!("no command '{}'", path.join(" ")))
            })?;
        }

        node.as_group_mut()
            .ok_or_else(|| TypoError::hierarchy(format!("'{}' is not a group", path.join(" "))))
    }

    fn insert(
        &mut self,
        parent: &[&str],
        name: &str,
        node_for: impl FnOnce(String, bool) -> CommandNode,
    ) -> Result<()> {
        validate_name(name)?;
        let group = self.group_mut(parent)?;

        if group.contains(name) {
            return Err(TypoError::hierarchy(format!(
                "duplicate command '{}'",
                qualify(parent, name)
            )));
        }

        let inherited = group.case_insensitive();
        group.push(node_for(qualify(parent, name), inherited));
        Ok(())
    }

    /// Register a leaf command under the group at `parent`.
    pub fn add_command(&mut self, parent: &[&str], name: &str) -> Result<()> {
        self.insert(parent, name, |qualified, _| CommandNode::leaf(name, qualified))
    }

    /// Register a group under the group at `parent`.
    ///
    /// `case_insensitive` defaults to the parent's policy.
    pub fn add_group(
        &mut self,
        parent: &[&str],
        name: &str,
        case_insensitive: Option<bool>,
    ) -> Result<()> {
        self.insert(parent, name, |qualified, inherited| {
            CommandNode::group(name, qualified, case_insensitive.unwrap_or(inherited))
        })
    }

    /// Unregister a command (and its children) from the group at `parent`.
    pub fn remove_command(&mut self, parent: &[&str], name: &str) -> Option<CommandNode> {
        self.group_mut(parent).ok()?.remove(name)
    }

    /// Parse a tree from its JSON description.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let spec: TreeSpec = serde_json::from_str(json)?;
        spec.build()
    }

    /// Load a tree from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Describe the tree as its JSON document model.
    pub fn to_spec(&self) -> TreeSpec {
        TreeSpec {
            case_insensitive: self.root.case_insensitive(),
            commands: self
                .root
                .as_group()
                .map(|group| group.children().iter().map(CommandSpec::from_node).collect())
                .unwrap_or_default(),
        }
    }
}

fn qualify(parent: &[&str], name: &str) -> String {
    let mut parts = parent.to_vec();
    parts.push(name);
    parts.join(" ")
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(TypoError::hierarchy("command name must not be empty"));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(TypoError::hierarchy(format!(
            "command name '{name}' must not contain whitespace"
        )));
    }
    Ok(())
}

/// JSON document describing a command tree.
///
/// ```json
/// { "case_insensitive": true,
///   "commands": [
///     { "name": "play" },
///     { "name": "queue", "children": [{ "name": "add" }, { "name": "clear" }] }
///   ] }
/// ```
///
/// An entry with a `children` array (even an empty one) is a group. Groups
/// inherit `case_insensitive` from their parent unless they set it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeSpec {
    #[serde(default)]
    pub case_insensitive: bool,
    #[serde(default)]
    pub commands: Vec<CommandSpec>,
}

/// One command entry of a [`TreeSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_insensitive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<CommandSpec>>,
}

impl CommandSpec {
    fn from_node(node: &CommandNode) -> Self {
        CommandSpec {
            name: node.name().to_string(),
            case_insensitive: node.as_group().map(CommandGroup::case_insensitive),
            children: node
                .as_group()
                .map(|group| group.children().iter().map(CommandSpec::from_node).collect()),
        }
    }
}

impl TreeSpec {
    /// Build the tree, rejecting duplicate or malformed names.
    pub fn build(&self) -> Result<CommandTree> {
        let mut tree = CommandTree::new(self.case_insensitive);
        let mut path = Vec::new();
        add_specs(&mut tree, &mut path, &self.commands)?;
        Ok(tree)
    }
}

fn add_specs<'a>(
    tree: &mut CommandTree,
    path: &mut Vec<&'a str>,
    specs: &'a [CommandSpec],
) -> Result<()> {
    for spec in specs {
        match &spec.children {
            None => tree.add_command(path, &spec.name)?,
            Some(children) => {
                tree.add_group(path, &spec.name, spec.case_insensitive)?;
                path.push(&spec.name);
                add_specs(tree, path, children)?;
                path.pop();
            }
        }
    }
    Ok(())
}
