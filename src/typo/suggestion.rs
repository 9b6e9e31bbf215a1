//! Result of one typo resolution.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::hierarchy::{CommandKind, CommandNode};

/// A candidate command name and its distance from the typo.
///
/// Ordering compares the distance first and the name second.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub distance: usize,
    pub name: String,
}

impl Candidate {
    pub fn new(distance: usize, name: impl Into<String>) -> Self {
        Candidate {
            distance,
            name: name.into(),
        }
    }
}

impl From<(usize, &str)> for Candidate {
    fn from((distance, name): (usize, &str)) -> Self {
        Candidate::new(distance, name)
    }
}

/// The scope a typo was resolved against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeRef {
    /// Qualified name; empty for the root.
    pub qualified_name: String,
    pub kind: CommandKind,
}

impl ScopeRef {
    pub fn is_root(&self) -> bool {
        self.qualified_name.is_empty()
    }
}

impl From<&CommandNode> for ScopeRef {
    fn from(node: &CommandNode) -> Self {
        ScopeRef {
            qualified_name: node.qualified_name().to_string(),
            kind: node.kind(),
        }
    }
}

/// Ranked candidates for a mistyped command.
///
/// Two suggestions are equal when they share scope and typo, whatever their
/// candidates. A suggestion is only worth presenting when
/// [`is_actionable`](Suggestion::is_actionable) holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    scope: Option<ScopeRef>,
    typo: String,
    candidates: Vec<Candidate>,
}

impl Suggestion {
    pub fn new(
        scope: Option<ScopeRef>,
        typo: impl Into<String>,
        candidates: Vec<Candidate>,
    ) -> Self {
        Suggestion {
            scope,
            typo: typo.into(),
            candidates,
        }
    }

    pub fn scope(&self) -> Option<&ScopeRef> {
        self.scope.as_ref()
    }

    /// The unmatched token; empty when nothing was mistyped.
    pub fn typo(&self) -> &str {
        &self.typo
    }

    /// Candidates in computation order (or sorted, after [`sort`](Suggestion::sort)).
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    /// Whether this suggestion names a real typo with at least one candidate.
    pub fn is_actionable(&self) -> bool {
        self.scope.is_some() && !self.typo.is_empty() && !self.candidates.is_empty()
    }

    /// Sort candidates in place by `(distance, name)`.
    pub fn sort(&mut self) {
        self.candidates.sort();
    }

    /// The closest candidate; ties go to the first one encountered.
    pub fn get_best(&self) -> Option<&Candidate> {
        self.candidates.iter().min_by_key(|candidate| candidate.distance)
    }

    fn ranked(&self) -> Vec<&Candidate> {
        let mut ranked: Vec<&Candidate> = self.candidates.iter().collect();
        ranked.sort();
        ranked
    }

    /// The `n` closest candidates by `(distance, name)`.
    pub fn get_top(&self, n: usize) -> impl Iterator<Item = &Candidate> {
        self.ranked().into_iter().take(n)
    }

    /// At most `n` of the closest candidates whose distance is within `threshold`.
    pub fn get_top_within_threshold(
        &self,
        threshold: usize,
        n: usize,
    ) -> impl Iterator<Item = &Candidate> {
        self.ranked()
            .into_iter()
            .take_while(move |candidate| candidate.distance <= threshold)
            .take(n)
    }

    /// The mistyped invocation as the user wrote it, e.g. `queue ad`.
    pub fn invocation(&self) -> String {
        match &self.scope {
            Some(scope) if !scope.is_root() => {
                format!("{} {}", scope.qualified_name, self.typo)
            }
            _ => self.typo.clone(),
        }
    }
}

impl PartialEq for Suggestion {
    fn eq(&self, other: &Self) -> bool {
        self.scope == other.scope && self.typo == other.typo
    }
}

impl Eq for Suggestion {}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "typo suggestion for '{}'", self.invocation())
    }
}

impl Index<usize> for Suggestion {
    type Output = Candidate;

    fn index(&self, index: usize) -> &Candidate {
        &self.candidates[index]
    }
}

impl<'a> IntoIterator for &'a Suggestion {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}
