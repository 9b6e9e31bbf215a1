//! Typo resolution for mistyped commands.
//!
//! [`TypoEngine`] resolves an [`InvocationContext`] into a [`Suggestion`]
//! and [`TypoListener`] wires it to dispatcher events.

pub mod config;
pub mod context;
pub mod engine;
pub mod listener;
pub mod suggestion;

pub use config::{DEFAULT_CACHE_CAPACITY, EngineConfig};
pub use context::{InvocationContext, MatchedCommand};
pub use engine::{CacheKey, CandidateCache, Resolution, TypoEngine};
pub use listener::{
    ChannelSink, DispatchError, DispatchErrorKind, TypoEvent, TypoListener, TypoSink,
    within_threshold,
};
pub use suggestion::{Candidate, ScopeRef, Suggestion};
