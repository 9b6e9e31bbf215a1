//! # typosuggest
//!
//! "Did you mean" suggestions for mistyped commands in a hierarchical
//! command system.
//!
//! ## Features
//!
//! - Resolution of the mistyped token against the deepest matching group
//! - Levenshtein ranking with an optional distance bound
//! - Thread-safe bounded LRU memoization of computed candidates
//! - Dispatcher hooks reporting typos to a pluggable sink
//!
//! ```
//! use typosuggest::hierarchy::CommandTreeBuilder;
//! use typosuggest::typo::{InvocationContext, TypoEngine};
//!
//! let tree = CommandTreeBuilder::new()
//!     .command("play")
//!     .command("pause")
//!     .build()
//!     .unwrap();
//! let engine = TypoEngine::new(tree.into_shared());
//!
//! let suggestion = engine
//!     .resolve(&InvocationContext::unknown_command("!", "ply"))
//!     .unwrap();
//! assert_eq!(suggestion.get_best().unwrap().name, "play");
//! ```

pub mod cache;
pub mod cli;
pub mod error;
pub mod hierarchy;
pub mod typo;
pub mod util;

pub mod prelude {
    pub use crate::cache::{CacheStats, LruCache, TypoCache};
    pub use crate::error::{Result, TypoError};
    pub use crate::hierarchy::{CommandTree, CommandTreeBuilder, SharedCommandTree};
    pub use crate::typo::{
        Candidate, EngineConfig, InvocationContext, Suggestion, TypoEngine, TypoListener,
        TypoSink,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
