//! Agents: opaque, totally ordered, equality-comparable identifiers.

use std::fmt;

/// An agent participating in the epistemic logic.
///
/// Agents are compared and ordered by name; the name itself carries no
/// further meaning to the engine.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Agent(String);

impl Agent {
    /// Creates a new agent with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Agent(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Agent {
    fn from(name: &str) -> Self {
        Agent::new(name)
    }
}

impl From<String> for Agent {
    fn from(name: String) -> Self {
        Agent::new(name)
    }
}
