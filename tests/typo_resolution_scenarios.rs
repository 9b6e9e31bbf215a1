use std::sync::Arc;
use std::thread;

use typosuggest::cache::LruCache;
use typosuggest::error::Result;
use typosuggest::hierarchy::{CommandTree, CommandTreeBuilder};
use typosuggest::typo::{Candidate, EngineConfig, InvocationContext, TypoEngine};
use typosuggest::util::levenshtein::{DistanceMetric, levenshtein_distance};

fn build_music_tree() -> Result<CommandTree> {
    CommandTreeBuilder::new()
        .command("play")
        .command("pause")
        .command("skip")
        .group("queue", |queue| {
            queue
                .command("add")
                .command("remove")
                .group("history", |history| history.command("show").command("clear"))
        })
        .build()
}

fn exact_engine(tree: CommandTree) -> TypoEngine {
    let config = EngineConfig::default().with_threshold(None);
    TypoEngine::with_config(tree.into_shared(), config)
}

#[test]
fn top_level_typo_ranks_closest_command_first() -> Result<()> {
    let tree = CommandTreeBuilder::new()
        .command("play")
        .command("pause")
        .command("skip")
        .build()?;
    let engine = exact_engine(tree);

    let suggestion = engine
        .resolve(&InvocationContext::unknown_command("!", "ply"))
        .expect("unknown command yields a suggestion");

    assert!(suggestion.scope().expect("scope").is_root());
    assert_eq!(suggestion.typo(), "ply");
    assert_eq!(
        suggestion.candidates(),
        &[
            Candidate::new(1, "play"),
            Candidate::new(4, "pause"),
            Candidate::new(4, "skip"),
        ]
    );
    assert_eq!(suggestion.get_best(), Some(&Candidate::new(1, "play")));
    Ok(())
}

#[test]
fn nested_typo_resolves_against_deepest_group() -> Result<()> {
    let tree = build_music_tree()?;
    let ctx = InvocationContext::from_tokens(&tree, Some("!"), &["queue", "history", "shw"]);
    let engine = exact_engine(tree);

    let suggestion = engine.resolve(&ctx).expect("subcommand typo");

    assert_eq!(suggestion.scope().expect("scope").qualified_name, "queue history");
    assert_eq!(suggestion.invocation(), "queue history shw");
    assert_eq!(suggestion.get_best(), Some(&Candidate::new(1, "show")));
    assert!(suggestion.is_actionable());
    Ok(())
}

#[test]
fn nothing_to_suggest_returns_none() -> Result<()> {
    let tree = build_music_tree()?;
    let matched = InvocationContext::from_tokens(&tree, Some("!"), &["play", "anything"]);
    let bare_group = InvocationContext::from_tokens(&tree, Some("!"), &["queue"]);
    let no_prefix = InvocationContext::from_tokens(&tree, None, &["ply"]);
    let engine = exact_engine(tree);

    assert!(engine.resolve(&matched).is_none());
    assert!(engine.resolve(&bare_group).is_none());
    assert!(engine.resolve(&no_prefix).is_none());
    assert!(engine.resolve_max(&[]).is_none());
    Ok(())
}

#[test]
fn top_within_threshold_respects_both_limits() -> Result<()> {
    let engine = exact_engine(build_music_tree()?);
    let suggestion = engine
        .resolve(&InvocationContext::unknown_command("!", "pase"))
        .expect("suggestion");

    for threshold in 0..6 {
        for n in 0..5 {
            let top: Vec<&Candidate> = suggestion.get_top_within_threshold(threshold, n).collect();
            assert!(top.len() <= n);
            assert!(top.iter().all(|c| c.distance <= threshold));
        }
    }
    Ok(())
}

#[test]
fn capacity_one_cache_keeps_only_latest_entry() {
    let cache: LruCache<&str, i32> = LruCache::new(1);
    cache.put("a", 1);
    cache.put("b", 2);

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&"b"), Some(2));
    assert_eq!(cache.get(&"a"), None);
}

#[test]
fn evicted_results_recompute_identically() -> Result<()> {
    let config = EngineConfig {
        cache_capacity: Some(2),
        ..EngineConfig::default()
    };
    let engine = TypoEngine::with_config(build_music_tree()?.into_shared(), config);

    let original = engine.generate_suggestions("", "ply");
    for typo in ["skp", "paus", "que"] {
        engine.generate_suggestions("", typo);
    }
    let stats = engine.cache_stats().expect("lru cache keeps stats");
    assert_eq!(stats.entries, 2);
    assert!(stats.evictions >= 2);

    assert_eq!(engine.generate_suggestions("", "ply"), original);
    Ok(())
}

#[test]
fn custom_cache_is_shared_between_engines() -> Result<()> {
    let tree = build_music_tree()?.into_shared();
    let cache: Arc<LruCache<(String, String), Vec<Candidate>>> = Arc::new(LruCache::new(8));

    let first = TypoEngine::with_cache(Arc::clone(&tree), EngineConfig::default(), cache.clone());
    let second = TypoEngine::with_cache(tree, EngineConfig::default(), cache.clone());

    first.generate_suggestions("queue", "ad");
    second.generate_suggestions("queue", "ad");

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    Ok(())
}

#[test]
fn concurrent_resolutions_agree() -> Result<()> {
    let config = EngineConfig {
        cache_capacity: Some(4),
        ..EngineConfig::default()
    };
    let engine = Arc::new(TypoEngine::with_config(
        build_music_tree()?.into_shared(),
        config,
    ));
    let typos = ["ply", "pase", "skp", "que", "paly", "sip"];
    let expected: Vec<Vec<Candidate>> = typos
        .iter()
        .map(|typo| engine.generate_suggestions("", typo))
        .collect();

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let engine = Arc::clone(&engine);
            let expected = expected.clone();
            thread::spawn(move || {
                for round in 0..200 {
                    let index = (worker + round) % typos.len();
                    assert_eq!(
                        engine.generate_suggestions("", typos[index]),
                        expected[index]
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }

    let stats = engine.cache_stats().expect("stats");
    assert!(stats.entries <= 4);
    Ok(())
}

#[test]
fn hierarchy_changes_are_visible_to_later_resolutions() -> Result<()> {
    let tree = build_music_tree()?.into_shared();
    let config = EngineConfig {
        enable_cache: false,
        ..EngineConfig::default()
    };
    let engine = TypoEngine::with_config(Arc::clone(&tree), config);

    tree.write().add_command(&[], "playlist")?;

    let suggestion = engine
        .resolve(&InvocationContext::unknown_command("!", "playlst"))
        .expect("suggestion");
    assert_eq!(suggestion.get_best(), Some(&Candidate::new(1, "playlist")));
    Ok(())
}

#[test]
fn tree_loaded_from_json_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("commands.json");
    std::fs::write(
        &path,
        r#"{ "case_insensitive": true, "commands": [
            { "name": "Play" },
            { "name": "queue", "case_insensitive": false, "children": [{ "name": "add" }] }
        ] }"#,
    )?;

    let tree = CommandTree::from_json_file(&path)?;
    let engine = exact_engine(tree);

    // Top level folds case, the queue group does not.
    assert_eq!(
        engine.generate_suggestions("", "PLY")[0],
        Candidate::new(1, "Play")
    );
    assert_eq!(
        engine.generate_suggestions("queue", "ADD")[0],
        Candidate::new(3, "add")
    );
    Ok(())
}

#[test]
fn distance_properties_hold() {
    let words = ["", "a", "play", "pause", "skip", "queue", "kitten", "sitting", "ünïcödé"];

    for a in words {
        assert_eq!(levenshtein_distance(a, a), 0);
        for b in words {
            let d = levenshtein_distance(a, b);
            assert_eq!(d, levenshtein_distance(b, a));
            assert!(d >= a.chars().count().abs_diff(b.chars().count()));

            let bounded = DistanceMetric::BoundedLevenshtein { max: 3 }.distance(a, b);
            assert_eq!(bounded, d.min(4));
        }
    }
}
