//! Phase 2 — prestate elimination, rule PR (§4.4).

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::tableau::node::{NodeId, Pretableau, Tableau};

/// Collapses every prestate into direct state→state edges, discarding
/// prestates and dashed edges. The initial tableau's state set equals the
/// pretableau's state set; only edges change.
pub fn eliminate_prestates(pretableau: &Pretableau) -> Tableau {
    let mut successors_of_prestate: FxHashMap<NodeId, Vec<NodeId>> = FxHashMap::default();
    for (prestate, state) in &pretableau.dashed_edges {
        successors_of_prestate.entry(*prestate).or_default().push(*state);
    }

    let mut edges = Vec::new();
    for (from, prestate, label) in &pretableau.solid_edges {
        // A prestate whose expansion was empty has no dashed successors;
        // correctly, it contributes no edges (§4.4 Phase 2).
        match successors_of_prestate.get(prestate) {
            Some(successors) => {
                for to in successors {
                    trace!(from = %from, to = %to, label = %label, "rule PR: collapsing prestate edge");
                    edges.push((*from, *to, label.clone()));
                }
            }
            None => {
                trace!(prestate = %prestate, "rule PR: prestate has no surviving states, dropping edge");
            }
        }
    }

    debug!(
        states = pretableau.states.len(),
        edges = edges.len(),
        "prestate elimination finished"
    );

    Tableau {
        states: pretableau.states.clone(),
        edges,
    }
}
