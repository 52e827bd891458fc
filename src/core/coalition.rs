//! Coalitions: non-empty sets of agents, stored in canonical form.
//!
//! A coalition's canonical form is its agents sorted and deduplicated.
//! Two coalitions are equal iff their canonical forms coincide; we enforce
//! this at construction time so `Coalition::agents` is always already
//! canonical (mirroring the teacher's sort-and-dedup idiom in
//! `simp_expr!`, adapted from expression children to coalition members).

use std::fmt;

use crate::error::TableauError;

/// A non-empty, canonically-ordered set of agents.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coalition {
    agents: Vec<crate::core::agent::Agent>,
}

use crate::core::agent::Agent;

impl Coalition {
    /// Builds a coalition in canonical form from the given agents.
    ///
    /// Fails with [`TableauError::InvariantViolation`] if `agents` is empty.
    pub fn new(mut agents: Vec<Agent>) -> Result<Self, TableauError> {
        if agents.is_empty() {
            return Err(TableauError::InvariantViolation(
                "a coalition must contain at least one agent".to_string(),
            ));
        }
        agents.sort();
        agents.dedup();
        Ok(Coalition { agents })
    }

    /// Builds a singleton coalition `{a}`.
    pub fn singleton(a: Agent) -> Self {
        Coalition { agents: vec![a] }
    }

    /// The agents of this coalition, in canonical (sorted, deduplicated) order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_subset_of(&self, other: &Coalition) -> bool {
        self.agents.iter().all(|a| other.agents.binary_search(a).is_ok())
    }

    pub fn intersects(&self, other: &Coalition) -> bool {
        self.agents.iter().any(|a| other.agents.binary_search(a).is_ok())
    }

    /// A deterministic textual key, used when embedding a coalition in a
    /// formula's canonical key.
    pub fn key(&self) -> String {
        self.agents
            .iter()
            .map(|a| a.name())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Coalition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.key())
    }
}
