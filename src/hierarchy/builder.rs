//! Fluent construction of command trees.

use crate::error::Result;
use crate::hierarchy::{CommandSpec, CommandTree, TreeSpec};

/// Builder for [`CommandTree`].
///
/// ```
/// use typosuggest::hierarchy::CommandTreeBuilder;
///
/// let tree = CommandTreeBuilder::new()
///     .command("play")
///     .group("queue", |queue| queue.command("add").command("clear"))
///     .build()
///     .unwrap();
///
/// assert!(tree.scope("queue clear").is_some());
/// ```
#[derive(Debug, Default)]
pub struct CommandTreeBuilder {
    case_insensitive: bool,
    commands: Vec<CommandSpec>,
}

impl CommandTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make top-level lookups (and groups that don't say otherwise) ignore case.
    pub fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Add a top-level leaf command.
    pub fn command(mut self, name: impl Into<String>) -> Self {
        self.commands.push(leaf_spec(name));
        self
    }

    /// Add a top-level group populated by `children`.
    pub fn group<F>(mut self, name: impl Into<String>, children: F) -> Self
    where
        F: FnOnce(GroupBuilder) -> GroupBuilder,
    {
        self.commands.push(children(GroupBuilder::new(name)).into_spec());
        self
    }

    /// Build the tree. Duplicate or malformed names are reported here.
    pub fn build(self) -> Result<CommandTree> {
        TreeSpec {
            case_insensitive: self.case_insensitive,
            commands: self.commands,
        }
        .build()
    }
}

/// Builder for the children of one group.
#[derive(Debug)]
pub struct GroupBuilder {
    name: String,
    case_insensitive: Option<bool>,
    children: Vec<CommandSpec>,
}

impl GroupBuilder {
    fn new(name: impl Into<String>) -> Self {
        GroupBuilder {
            name: name.into(),
            case_insensitive: None,
            children: Vec::new(),
        }
    }

    /// Override the case policy inherited from the parent.
    pub fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = Some(case_insensitive);
        self
    }

    pub fn command(mut self, name: impl Into<String>) -> Self {
        self.children.push(leaf_spec(name));
        self
    }

    pub fn group<F>(mut self, name: impl Into<String>, children: F) -> Self
    where
        F: FnOnce(GroupBuilder) -> GroupBuilder,
    {
        self.children.push(children(GroupBuilder::new(name)).into_spec());
        self
    }

    fn into_spec(self) -> CommandSpec {
        CommandSpec {
            name: self.name,
            case_insensitive: self.case_insensitive,
            children: Some(self.children),
        }
    }
}

fn leaf_spec(name: impl Into<String>) -> CommandSpec {
    CommandSpec {
        name: name.into(),
        case_insensitive: None,
        children: None,
    }
}
