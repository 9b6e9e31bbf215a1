//! Dispatcher-facing hooks that report typos to a sink.
//!
//! The dispatcher owns a [`TypoListener`] and calls it when a command fails
//! or completes. The listener runs the engine and forwards every actionable
//! suggestion to a [`TypoSink`]; presenting it is up to the sink.

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, warn};

use crate::typo::context::InvocationContext;
use crate::typo::engine::TypoEngine;
use crate::typo::suggestion::Suggestion;

/// Why the dispatcher could not run a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchErrorKind {
    /// The invoked top-level name matched nothing.
    CommandNotFound,
    DisabledCommand,
    CheckFailure,
    /// The command ran and failed.
    InvokeError(String),
}

/// A dispatch failure as reported to the listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchError {
    pub kind: DispatchErrorKind,
    /// Set once some other handler has dealt with the error.
    pub handled: bool,
}

impl DispatchError {
    pub fn new(kind: DispatchErrorKind) -> Self {
        DispatchError {
            kind,
            handled: false,
        }
    }

    pub fn not_found() -> Self {
        Self::new(DispatchErrorKind::CommandNotFound)
    }
}

/// Receives actionable typo suggestions.
pub trait TypoSink: Send + Sync {
    fn command_typo(&self, ctx: &InvocationContext, suggestion: &Suggestion);
}

impl<F> TypoSink for F
where
    F: Fn(&InvocationContext, &Suggestion) + Send + Sync,
{
    fn command_typo(&self, ctx: &InvocationContext, suggestion: &Suggestion) {
        self(ctx, suggestion)
    }
}

/// A reported typo.
#[derive(Debug, Clone)]
pub struct TypoEvent {
    pub context: InvocationContext,
    pub suggestion: Suggestion,
}

/// Sink forwarding every suggestion over a channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<TypoEvent>,
}

impl ChannelSink {
    /// Create a sink and the receiving end of its channel.
    pub fn new() -> (Self, Receiver<TypoEvent>) {
        let (sender, receiver) = unbounded();
        (ChannelSink { sender }, receiver)
    }

    pub fn from_sender(sender: Sender<TypoEvent>) -> Self {
        ChannelSink { sender }
    }
}

impl TypoSink for ChannelSink {
    fn command_typo(&self, ctx: &InvocationContext, suggestion: &Suggestion) {
        let event = TypoEvent {
            context: ctx.clone(),
            suggestion: suggestion.clone(),
        };
        if self.sender.send(event).is_err() {
            warn!("typo event dropped, receiver disconnected");
        }
    }
}

/// Runs the engine on dispatcher events and reports what it finds.
pub struct TypoListener {
    engine: Arc<TypoEngine>,
    sink: Arc<dyn TypoSink>,
    detect_subcommand_typos: bool,
}

impl TypoListener {
    pub fn new(engine: Arc<TypoEngine>, sink: Arc<dyn TypoSink>) -> Self {
        TypoListener {
            engine,
            sink,
            detect_subcommand_typos: false,
        }
    }

    /// Also look for subcommand typos after commands that completed.
    ///
    /// A group invoked with an unknown subcommand still runs its own body,
    /// so the dispatcher reports completion rather than an error.
    pub fn detect_subcommand_typos(mut self, enabled: bool) -> Self {
        self.detect_subcommand_typos = enabled;
        self
    }

    pub fn engine(&self) -> &Arc<TypoEngine> {
        &self.engine
    }

    /// Handle a failed dispatch. Returns whether a typo was reported.
    pub fn on_command_error(&self, ctx: &InvocationContext, error: &DispatchError) -> bool {
        if error.handled {
            return false;
        }

        match error.kind {
            DispatchErrorKind::CommandNotFound => self.process(ctx),
            _ => false,
        }
    }

    /// Handle a completed dispatch. Returns whether a typo was reported.
    pub fn on_command_completion(&self, ctx: &InvocationContext) -> bool {
        self.detect_subcommand_typos && self.process(ctx)
    }

    fn process(&self, ctx: &InvocationContext) -> bool {
        let Some(suggestion) = self.engine.resolve(ctx) else {
            return false;
        };
        if !suggestion.is_actionable() {
            debug!("{suggestion} is not actionable");
            return false;
        }

        self.sink.command_typo(ctx, &suggestion);
        true
    }
}

/// Whether the closest candidate is within `max_distance`.
///
/// Sinks use this to skip typos too far from anything registered.
pub fn within_threshold(suggestion: &Suggestion, max_distance: usize) -> bool {
    suggestion
        .get_best()
        .is_some_and(|best| best.distance <= max_distance)
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::hierarchy::CommandTreeBuilder;
    use crate::typo::suggestion::Candidate;

    fn engine() -> Arc<TypoEngine> {
        let tree = CommandTreeBuilder::new()
            .command("play")
            .command("pause")
            .group("queue", |queue| queue.command("add").command("clear"))
            .build()
            .unwrap();
        Arc::new(TypoEngine::new(tree.into_shared()))
    }

    #[test]
    fn test_not_found_reports_typo() {
        let (sink, events) = ChannelSink::new();
        let listener = TypoListener::new(engine(), Arc::new(sink));

        let ctx = InvocationContext::unknown_command("!", "ply");
        assert!(listener.on_command_error(&ctx, &DispatchError::not_found()));

        let event = events.try_recv().unwrap();
        assert_eq!(event.context, ctx);
        assert_eq!(event.suggestion.get_best(), Some(&Candidate::new(1, "play")));
    }

    #[test]
    fn test_handled_and_other_errors_are_ignored() {
        let (sink, events) = ChannelSink::new();
        let listener = TypoListener::new(engine(), Arc::new(sink));
        let ctx = InvocationContext::unknown_command("!", "ply");

        let mut handled = DispatchError::not_found();
        handled.handled = true;
        assert!(!listener.on_command_error(&ctx, &handled));

        let disabled = DispatchError::new(DispatchErrorKind::DisabledCommand);
        assert!(!listener.on_command_error(&ctx, &disabled));

        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_completion_only_when_enabled() {
        let tree_engine = engine();
        let tree = tree_engine.tree().read().clone();
        let ctx = InvocationContext::from_tokens(&tree, Some("!"), &["queue", "ad"]);

        let (sink, events) = ChannelSink::new();
        let listener = TypoListener::new(Arc::clone(&tree_engine), Arc::new(sink));
        assert!(!listener.on_command_completion(&ctx));

        let listener = listener.detect_subcommand_typos(true);
        assert!(listener.on_command_completion(&ctx));
        assert_eq!(events.try_recv().unwrap().suggestion.invocation(), "queue ad");
    }

    #[test]
    fn test_non_actionable_not_reported() {
        let tree_engine = engine();
        let tree = tree_engine.tree().read().clone();
        // Group called bare: nothing to suggest against.
        let bare = InvocationContext::from_tokens(&tree, Some("!"), &["queue"]);

        let reported = Arc::new(Mutex::new(Vec::new()));
        let sink_reported = Arc::clone(&reported);
        let sink = move |_: &InvocationContext, suggestion: &Suggestion| {
            sink_reported.lock().push(suggestion.clone());
        };
        let listener =
            TypoListener::new(tree_engine, Arc::new(sink)).detect_subcommand_typos(true);

        assert!(!listener.on_command_completion(&bare));
        assert!(reported.lock().is_empty());
    }

    #[test]
    fn test_disconnected_channel_does_not_panic() {
        let (sink, events) = ChannelSink::new();
        drop(events);
        let listener = TypoListener::new(engine(), Arc::new(sink));

        let ctx = InvocationContext::unknown_command("!", "ply");
        assert!(listener.on_command_error(&ctx, &DispatchError::not_found()));
    }

    #[test]
    fn test_within_threshold() {
        let suggestion = engine()
            .resolve(&InvocationContext::unknown_command("!", "ply"))
            .unwrap();

        assert!(within_threshold(&suggestion, 1));
        assert!(!within_threshold(&suggestion, 0));
        assert!(!within_threshold(&Suggestion::new(None, "x", Vec::new()), 10));
    }
}
