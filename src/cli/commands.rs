//! Command implementations for the typosuggest CLI.

use std::path::Path;

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, TypoError};
use crate::hierarchy::{CommandNode, CommandTree};
use crate::typo::{EngineConfig, InvocationContext, TypoEngine, within_threshold};
use crate::util::levenshtein::DistanceMetric;

/// Execute a CLI command.
pub fn execute_command(args: TypoSuggestArgs) -> Result<()> {
    let config = load_config(&args)?;

    match &args.command {
        Command::Suggest(suggest_args) => {
            let result = suggest(suggest_args, config)?;
            output_result(&result, &args)
        }
        Command::Distance(distance_args) => output_result(&distance(distance_args), &args),
        Command::Tree(tree_args) => {
            let result = show_tree(tree_args)?;
            output_result(&result, &args)
        }
    }
}

fn load_config(args: &TypoSuggestArgs) -> Result<EngineConfig> {
    match &args.config {
        Some(path) => {
            info!("Loading engine configuration from {}", path.display());
            EngineConfig::from_json_file(path)
        }
        None => Ok(EngineConfig::default()),
    }
}

fn load_tree(path: &Path) -> Result<CommandTree> {
    if !path.exists() {
        return Err(TypoError::not_found(format!(
            "command file {}",
            path.display()
        )));
    }
    info!("Loading commands from {}", path.display());
    CommandTree::from_json_file(path)
}

/// Resolve the tokens of a mistyped invocation against a command file.
pub fn suggest(args: &SuggestArgs, config: EngineConfig) -> Result<SuggestResult> {
    if args.top == 0 {
        return Err(TypoError::invalid_argument("--top must be at least 1"));
    }
    let tree = load_tree(&args.commands)?;
    let config = match args.threshold {
        Some(threshold) => config.with_threshold(Some(threshold)),
        None => config,
    };
    let threshold = config.metric.threshold();

    let prefix = Some(args.prefix.as_str()).filter(|prefix| !prefix.is_empty());
    let ctx = InvocationContext::from_tokens(&tree, prefix, args.tokens.as_slice());
    debug!("matched invocation: {ctx:?}");

    let engine = TypoEngine::with_config(tree.into_shared(), config);
    let suggestion = engine.resolve(&ctx).filter(|s| s.is_actionable());

    let Some(suggestion) = suggestion else {
        return Ok(SuggestResult {
            invocation: None,
            scope: None,
            typo: None,
            best: None,
            within_threshold: false,
            suggestions: Vec::new(),
        });
    };

    let close_enough = threshold.is_none_or(|max| within_threshold(&suggestion, max));
    let suggestions = match threshold {
        Some(max) => suggestion
            .get_top_within_threshold(max, args.top)
            .cloned()
            .collect(),
        None => suggestion.get_top(args.top).cloned().collect(),
    };

    Ok(SuggestResult {
        invocation: Some(suggestion.invocation()),
        scope: suggestion.scope().map(|scope| scope.qualified_name.clone()),
        typo: Some(suggestion.typo().to_string()),
        best: suggestion.get_best().cloned(),
        within_threshold: close_enough,
        suggestions,
    })
}

/// Measure the distance between two words.
pub fn distance(args: &DistanceArgs) -> DistanceResult {
    let metric = DistanceMetric::from_threshold(args.max);
    let distance = metric.distance(&args.source, &args.target);

    DistanceResult {
        source: args.source.clone(),
        target: args.target.clone(),
        metric: metric.name().to_string(),
        distance,
        exceeded: metric.threshold().is_some_and(|max| distance > max),
    }
}

/// Flatten a command file into a depth-first listing.
pub fn show_tree(args: &TreeArgs) -> Result<TreeResult> {
    let tree = load_tree(&args.commands)?;

    let mut commands = Vec::new();
    for child in tree.root().as_group().into_iter().flat_map(|g| g.children()) {
        collect_entries(child, 0, &mut commands);
    }

    Ok(TreeResult {
        case_insensitive: tree.root().case_insensitive(),
        commands,
    })
}

fn collect_entries(node: &CommandNode, depth: usize, entries: &mut Vec<TreeEntry>) {
    entries.push(TreeEntry {
        qualified_name: node.qualified_name().to_string(),
        kind: node.kind(),
        depth,
        case_insensitive: node.case_insensitive(),
    });

    if let Some(group) = node.as_group() {
        for child in group.children() {
            collect_entries(child, depth + 1, entries);
        }
    }
}
