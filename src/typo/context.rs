//! What the dispatcher knows about one invocation.

use crate::hierarchy::{CommandKind, CommandNode, CommandTree};

/// The command the dispatcher ended up on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedCommand {
    pub qualified_name: String,
    pub kind: CommandKind,
}

impl From<&CommandNode> for MatchedCommand {
    fn from(node: &CommandNode) -> Self {
        MatchedCommand {
            qualified_name: node.qualified_name().to_string(),
            kind: node.kind(),
        }
    }
}

/// Dispatcher state for one invocation, handed to the typo engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationContext {
    /// The prefix that triggered the invocation, `None` if no prefix was used.
    pub prefix: Option<String>,
    /// The token the deepest matched command was invoked with.
    pub invoked_with: Option<String>,
    /// The deepest command matched, `None` when the first token matched nothing.
    pub command: Option<MatchedCommand>,
    /// Qualified name of the subcommand a group resolved and invoked.
    pub invoked_subcommand: Option<String>,
    /// The token given after a group, whether or not it matched.
    pub subcommand_passed: Option<String>,
    /// Tokens of the groups traversed on the way down.
    pub invoked_parents: Vec<String>,
}

impl InvocationContext {
    /// Context for an invocation whose first token matched no command.
    pub fn unknown_command(prefix: impl Into<String>, invoked_with: impl Into<String>) -> Self {
        InvocationContext {
            prefix: Some(prefix.into()),
            invoked_with: Some(invoked_with.into()),
            ..Default::default()
        }
    }

    /// Match prefix-stripped tokens against `tree` the way a greedy dispatcher would.
    ///
    /// The first token selects a top-level command. Each group then consumes
    /// one more token: if it names a child the dispatcher descends, otherwise
    /// the token is recorded as `subcommand_passed` and matching stops. A leaf
    /// consumes the remaining tokens as its arguments. When a group is reached
    /// with no tokens left, the values recorded by its parent are kept.
    pub fn from_tokens<S: AsRef<str>>(
        tree: &CommandTree,
        prefix: Option<&str>,
        tokens: &[S],
    ) -> Self {
        let mut ctx = InvocationContext {
            prefix: prefix.map(str::to_string),
            ..Default::default()
        };
        if ctx.prefix.is_none() {
            return ctx;
        }

        let mut tokens = tokens.iter().map(S::as_ref);
        let Some(first) = tokens.next() else {
            return ctx;
        };
        ctx.invoked_with = Some(first.to_string());

        let Some(mut node) = tree.root().child(first) else {
            return ctx;
        };
        ctx.command = Some(MatchedCommand::from(node));

        while node.is_group() {
            let trigger = tokens.next();
            let child = trigger.and_then(|trigger| node.child(trigger));

            if let Some(trigger) = trigger {
                ctx.subcommand_passed = Some(trigger.to_string());
                ctx.invoked_subcommand = child.map(|child| child.qualified_name().to_string());
            }
            if let Some(invoked_with) = ctx.invoked_with.clone() {
                ctx.invoked_parents.push(invoked_with);
            }

            match (trigger, child) {
                (Some(trigger), Some(child)) => {
                    ctx.invoked_with = Some(trigger.to_string());
                    ctx.command = Some(MatchedCommand::from(child));
                    node = child;
                }
                _ => break,
            }
        }

        ctx
    }

    pub fn used_prefix(&self) -> bool {
        self.prefix.as_deref().is_some_and(|prefix| !prefix.is_empty())
    }
}
