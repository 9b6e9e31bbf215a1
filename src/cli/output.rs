//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, TypoSuggestArgs};
use crate::error::Result;
use crate::hierarchy::CommandKind;
use crate::typo::Candidate;

/// Results that know how to print themselves for a person.
pub trait HumanOutput {
    fn write_human(&self, out: &mut dyn Write, verbosity: u8) -> io::Result<()>;
}

/// Result of the `suggest` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestResult {
    /// The mistyped invocation, `None` when nothing was mistyped.
    pub invocation: Option<String>,
    /// Qualified name of the scope searched.
    pub scope: Option<String>,
    pub typo: Option<String>,
    pub best: Option<Candidate>,
    /// Whether the best candidate is close enough to suggest.
    pub within_threshold: bool,
    pub suggestions: Vec<Candidate>,
}

impl HumanOutput for SuggestResult {
    fn write_human(&self, out: &mut dyn Write, verbosity: u8) -> io::Result<()> {
        let Some(invocation) = &self.invocation else {
            return writeln!(out, "No typo detected.");
        };

        if !self.within_threshold || self.suggestions.is_empty() {
            writeln!(out, "No command close to '{invocation}'.")?;
            if verbosity > 1
                && let Some(best) = &self.best
            {
                writeln!(out, "Closest: {} (distance {})", best.name, best.distance)?;
            }
            return Ok(());
        }

        let scope = self.scope.as_deref().unwrap_or_default();
        writeln!(out, "Unknown command '{invocation}'. Did you mean:")?;
        for candidate in &self.suggestions {
            let full_name = if scope.is_empty() {
                candidate.name.clone()
            } else {
                format!("{scope} {}", candidate.name)
            };
            if verbosity > 1 {
                writeln!(out, "  {full_name} (distance {})", candidate.distance)?;
            } else {
                writeln!(out, "  {full_name}")?;
            }
        }
        Ok(())
    }
}

/// Result of the `distance` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceResult {
    pub source: String,
    pub target: String,
    pub metric: String,
    pub distance: usize,
    /// Set when the distance exceeded the bound and is a sentinel.
    pub exceeded: bool,
}

impl HumanOutput for DistanceResult {
    fn write_human(&self, out: &mut dyn Write, verbosity: u8) -> io::Result<()> {
        if verbosity > 1 {
            writeln!(out, "Metric: {}", self.metric)?;
        }
        if self.exceeded {
            writeln!(
                out,
                "'{}' -> '{}': more than {}",
                self.source,
                self.target,
                self.distance.saturating_sub(1)
            )
        } else {
            writeln!(
                out,
                "'{}' -> '{}': {}",
                self.source, self.target, self.distance
            )
        }
    }
}

/// One entry of the `tree` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub qualified_name: String,
    pub kind: CommandKind,
    pub depth: usize,
    pub case_insensitive: bool,
}

/// Result of the `tree` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeResult {
    pub case_insensitive: bool,
    pub commands: Vec<TreeEntry>,
}

impl HumanOutput for TreeResult {
    fn write_human(&self, out: &mut dyn Write, verbosity: u8) -> io::Result<()> {
        if verbosity > 1 {
            writeln!(
                out,
                "{} commands (top level case {})",
                self.commands.len(),
                if self.case_insensitive {
                    "insensitive"
                } else {
                    "sensitive"
                }
            )?;
        }

        for entry in &self.commands {
            let indent = "  ".repeat(entry.depth);
            let name = entry
                .qualified_name
                .rsplit(' ')
                .next()
                .unwrap_or(&entry.qualified_name);
            match entry.kind {
                CommandKind::Leaf => writeln!(out, "{indent}{name}")?,
                CommandKind::Group if entry.case_insensitive => {
                    writeln!(out, "{indent}{name}/ (case insensitive)")?
                }
                CommandKind::Group => writeln!(out, "{indent}{name}/")?,
            }
        }
        Ok(())
    }
}

/// Output a result in the requested format.
pub fn output_result<T>(result: &T, args: &TypoSuggestArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, result, args.output_format, args.pretty, args.verbosity())
}

/// Write a result to `out` in the given format.
pub fn write_result<T: Serialize + HumanOutput>(
    out: &mut dyn Write,
    result: &T,
    format: OutputFormat,
    pretty: bool,
    verbosity: u8,
) -> Result<()> {
    match format {
        OutputFormat::Human => result.write_human(out, verbosity)?,
        OutputFormat::Json => {
            let json = if pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}
