//! A tableau decision procedure for satisfiability in a multiagent
//! epistemic logic with common knowledge (`C_A`) and distributed knowledge
//! (`D_A`) operators over coalitions of agents.
//!
//! The crate is a pure library: it consumes an already-built [`Formula`]
//! and produces a [`TableauResult`]. Parsing, printing, and any interactive
//! host are left to collaborators.
//!
//! Start with [`decide`] for the end-to-end procedure, or use the
//! individual stages — [`classify`], [`closure`], [`extended_closure`],
//! [`subformulas`], [`expand`] — directly.

mod classify;
mod closure;
pub mod core;
mod decide;
mod error;
mod expand;
mod options;
mod result;
mod tableau;

pub use classify::{classify, Classification};
pub use closure::{closure, extended_closure, subformulas};
pub use core::{Agent, Coalition, Formula, FormulaSet};
pub use decide::decide;
pub use error::{Result, TableauError};
pub use expand::expand;
pub use options::{DecideOptions, ExpandOptions, ProgressFn, ProgressStage};
pub use result::TableauResult;
pub use tableau::{
    EdgeLabel, EliminationRecord, EliminationRule, NodeId, Prestate, Pretableau, State, Tableau,
};
