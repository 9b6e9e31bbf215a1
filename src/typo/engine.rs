//! Typo resolution: Parse → Walk → Lookup-or-Compute → Rank.
//!
//! The engine turns an [`InvocationContext`] for an invocation the dispatcher
//! could not fully match into a [`Suggestion`]:
//!
//! 1. [`parse_content`](TypoEngine::parse_content) extracts the locator, the
//!    tokens leading to the unmatched one.
//! 2. [`resolve_max`](TypoEngine::resolve_max) walks the locator down the
//!    hierarchy to the deepest scope that resolves.
//! 3. [`generate_suggestions`](TypoEngine::generate_suggestions) measures the
//!    typo against every child of that scope, memoized per `(scope, typo)`.
//! 4. The caller ranks the result through the [`Suggestion`] accessors.
//!
//! The only state shared between resolutions is the cache. Concurrent
//! resolutions of the same `(scope, typo)` may both compute and both write;
//! results are deterministic so the last write wins harmlessly.

use std::sync::Arc;

use log::{debug, trace, warn};
use rayon::prelude::*;

use crate::cache::{CacheStats, LruCache, TypoCache};
use crate::hierarchy::{CommandKind, NodeKind, SharedCommandTree, fold_case};
use crate::typo::config::EngineConfig;
use crate::typo::context::InvocationContext;
use crate::typo::suggestion::{Candidate, ScopeRef, Suggestion};
use crate::util::levenshtein::LevenshteinMatcher;

/// Cache key: qualified scope name and the typo as typed.
pub type CacheKey = (String, String);

/// Store for computed candidate lists.
pub type CandidateCache = dyn TypoCache<CacheKey, Vec<Candidate>>;

/// Outcome of walking a locator down the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The deepest scope reached.
    pub scope: ScopeRef,
    /// The token that failed to resolve in `scope`; `None` when every token
    /// resolved and `scope` is the command the last token named.
    pub typo: Option<String>,
}

/// Finds the registered commands closest to a mistyped one.
pub struct TypoEngine {
    tree: SharedCommandTree,
    config: EngineConfig,
    cache: Option<Arc<CandidateCache>>,
}

impl std::fmt::Debug for TypoEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypoEngine")
            .field("config", &self.config)
            .field("cache_stats", &self.cache_stats())
            .finish()
    }
}

impl TypoEngine {
    /// Create an engine with the default configuration.
    pub fn new(tree: SharedCommandTree) -> Self {
        Self::with_config(tree, EngineConfig::default())
    }

    /// Create an engine; the cache is an [`LruCache`] sized from `config`.
    pub fn with_config(tree: SharedCommandTree, config: EngineConfig) -> Self {
        let cache = config.enable_cache.then(|| {
            let cache: LruCache<CacheKey, Vec<Candidate>> =
                LruCache::with_capacity(config.cache_capacity);
            Arc::new(cache) as Arc<CandidateCache>
        });

        TypoEngine {
            tree,
            config,
            cache,
        }
    }

    /// Create an engine backed by a caller-provided cache.
    ///
    /// `enable_cache` and `cache_capacity` in `config` are ignored.
    pub fn with_cache(
        tree: SharedCommandTree,
        config: EngineConfig,
        cache: Arc<CandidateCache>,
    ) -> Self {
        TypoEngine {
            tree,
            config,
            cache: Some(cache),
        }
    }

    pub fn tree(&self) -> &SharedCommandTree {
        &self.tree
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Counters of the cache, if there is one and it keeps them.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().and_then(|cache| cache.stats())
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    /// Extract the locator of a possible typo from the dispatcher's context.
    ///
    /// Returns `None` when there is nothing to suggest against: no prefix, no
    /// invoked token, a leaf that matched, a group that already dispatched to
    /// a subcommand, or a group called without any subcommand token.
    pub fn parse_content(ctx: &InvocationContext) -> Option<Vec<String>> {
        if !ctx.used_prefix() {
            return None;
        }
        let invoked_with = ctx.invoked_with.as_ref()?;

        let Some(command) = &ctx.command else {
            return Some(vec![invoked_with.clone()]);
        };

        match command.kind {
            CommandKind::Leaf => None,
            CommandKind::Group => {
                if ctx.invoked_subcommand.is_some() {
                    return None;
                }
                let passed = ctx.subcommand_passed.as_ref()?;

                let mut locator = ctx.invoked_parents.clone();
                locator.push(passed.clone());
                Some(locator)
            }
        }
    }

    /// Walk `locator` from the root to the deepest scope that resolves.
    ///
    /// All tokens but the last are used to descend; the first one that does
    /// not resolve becomes the typo. The final lookup happens in the scope
    /// reached: if it fails the result carries the typo, if it succeeds the
    /// result names the matched command and carries no typo.
    pub fn resolve_max(&self, locator: &[String]) -> Option<Resolution> {
        let (last, parents) = locator.split_last()?;
        let tree = self.tree.read();

        let mut scope = tree.root();
        let mut target = last.as_str();
        for token in parents {
            let next = match scope.node_kind() {
                NodeKind::Group(group) => group.child(token),
                NodeKind::Leaf => None,
            };
            match next {
                Some(child) => scope = child,
                None => {
                    target = token.as_str();
                    break;
                }
            }
        }

        let resolution = match scope.child(target) {
            None => Resolution {
                scope: ScopeRef::from(scope),
                typo: Some(target.to_string()),
            },
            Some(command) => Resolution {
                scope: ScopeRef::from(command),
                typo: None,
            },
        };
        debug!(
            "resolved locator {:?} to scope '{}' typo {:?}",
            locator, resolution.scope.qualified_name, resolution.typo
        );
        Some(resolution)
    }

    /// Distances from `typo` to every child of the scope named `scope`.
    ///
    /// Returns an empty list for an empty typo and for scopes that are
    /// unknown or have no children. The returned list is always a copy.
    pub fn generate_suggestions(&self, scope: &str, typo: &str) -> Vec<Candidate> {
        if typo.is_empty() {
            return Vec::new();
        }

        let Some(cache) = &self.cache else {
            return self.compute_candidates(scope, typo);
        };

        let key = (scope.to_string(), typo.to_string());
        if let Some(cached) = cache.get(&key) {
            debug!("cache hit for '{scope}' / '{typo}'");
            return cached;
        }

        let candidates = self.compute_candidates(scope, typo);
        debug!(
            "cache miss for '{scope}' / '{typo}', computed {} candidates",
            candidates.len()
        );
        self.store(cache, key, candidates.clone());
        candidates
    }

    fn compute_candidates(&self, scope: &str, typo: &str) -> Vec<Candidate> {
        let tree = self.tree.read();

        let group = match tree.scope(scope).map(|node| node.node_kind()) {
            Some(NodeKind::Group(group)) => group,
            Some(NodeKind::Leaf) | None => {
                debug!("scope '{scope}' has no children to compare against");
                return Vec::new();
            }
        };

        let case_insensitive = group.case_insensitive();
        let query = if case_insensitive {
            fold_case(typo).into_owned()
        } else {
            typo.to_string()
        };
        let matcher = LevenshteinMatcher::new(query, self.config.metric);

        group
            .children()
            .iter()
            .map(|child| {
                let distance = if case_insensitive {
                    matcher.distance(&fold_case(child.name()))
                } else {
                    matcher.distance(child.name())
                };
                trace!("'{}' -> '{}': {distance}", matcher.query(), child.name());
                Candidate::new(distance, child.name())
            })
            .collect()
    }

    fn store(&self, cache: &Arc<CandidateCache>, key: CacheKey, candidates: Vec<Candidate>) {
        if self.config.detached_cache_writes {
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                let cache = Arc::clone(cache);
                handle.spawn(async move {
                    cache.put(key, candidates);
                });
                return;
            }
            warn!("no async runtime available, writing cache entry inline");
        }

        cache.put(key, candidates);
    }

    /// Resolve one invocation into a suggestion.
    ///
    /// `None` means there was nothing to suggest against. A returned
    /// suggestion may still be non-actionable (for example when every token
    /// named an existing command); check [`Suggestion::is_actionable`].
    pub fn resolve(&self, ctx: &InvocationContext) -> Option<Suggestion> {
        let locator = Self::parse_content(ctx)?;
        let Resolution { scope, typo } = self.resolve_max(&locator)?;

        let candidates = match &typo {
            Some(typo) => self.generate_suggestions(&scope.qualified_name, typo),
            None => Vec::new(),
        };

        Some(Suggestion::new(
            Some(scope),
            typo.unwrap_or_default(),
            candidates,
        ))
    }

    /// Resolve many invocations in parallel, sharing the cache.
    pub fn resolve_batch(&self, contexts: &[InvocationContext]) -> Vec<Option<Suggestion>> {
        contexts.par_iter().map(|ctx| self.resolve(ctx)).collect()
    }
}
