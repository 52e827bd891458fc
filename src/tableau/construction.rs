//! Phase 1 — pretableau construction, rules SR and DR (§4.4).

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::core::formula::Formula;
use crate::core::set::FormulaSet;
use crate::expand::expand;
use crate::options::ExpandOptions;
use crate::tableau::node::{NodeId, NodeIdGenerator, Prestate, Pretableau, State};

struct Builder {
    prestate_by_key: FxHashMap<String, NodeId>,
    state_by_key: FxHashMap<String, NodeId>,
    prestates: FxHashMap<NodeId, Prestate>,
    states: FxHashMap<NodeId, State>,
    dashed_edges: Vec<(NodeId, NodeId)>,
    solid_edges: Vec<(NodeId, NodeId, Formula)>,
    ids: NodeIdGenerator,
}

impl Builder {
    fn new() -> Self {
        Builder {
            prestate_by_key: FxHashMap::default(),
            state_by_key: FxHashMap::default(),
            prestates: FxHashMap::default(),
            states: FxHashMap::default(),
            dashed_edges: Vec::new(),
            solid_edges: Vec::new(),
            ids: NodeIdGenerator::default(),
        }
    }

    /// Reuses a prestate with the same canonical key, or mints a new one.
    /// Returns the id and whether it is newly minted.
    fn mint_prestate(&mut self, formulas: FormulaSet) -> (NodeId, bool) {
        let key = formulas.key();
        if let Some(&id) = self.prestate_by_key.get(&key) {
            return (id, false);
        }
        let id = self.ids.fresh();
        self.prestate_by_key.insert(key, id);
        self.prestates.insert(id, Prestate { id, formulas });
        (id, true)
    }

    /// Reuses a state with the same canonical key, or mints a new one.
    /// Returns the id and whether it is newly minted.
    fn mint_state(&mut self, formulas: FormulaSet) -> (NodeId, bool) {
        let key = formulas.key();
        if let Some(&id) = self.state_by_key.get(&key) {
            return (id, false);
        }
        let id = self.ids.fresh();
        self.state_by_key.insert(key, id);
        self.states.insert(id, State { id, formulas });
        (id, true)
    }
}

/// Builds the pretableau for `theta`, seeding with `Γ₀ = {θ}` and
/// alternating rules SR and DR until both queues are empty.
pub fn construct(theta: &Formula, expand_options: ExpandOptions) -> Pretableau {
    let mut builder = Builder::new();
    let mut prestates_to_sr: VecDeque<NodeId> = VecDeque::new();
    let mut states_to_dr: VecDeque<(NodeId, Formula)> = VecDeque::new();
    let mut dr_processed: FxHashSet<(NodeId, String)> = FxHashSet::default();

    let gamma0 = FormulaSet::singleton(theta.clone());
    let (root, _) = builder.mint_prestate(gamma0);
    prestates_to_sr.push_back(root);

    loop {
        let mut advanced = false;

        while let Some(prestate_id) = prestates_to_sr.pop_front() {
            advanced = true;
            apply_sr(&mut builder, prestate_id, expand_options, &mut states_to_dr);
        }

        while let Some((state_id, diamond)) = states_to_dr.pop_front() {
            advanced = true;
            let site = (state_id, diamond.key().to_string());
            if !dr_processed.insert(site) {
                continue;
            }
            apply_dr(&mut builder, state_id, &diamond, &mut prestates_to_sr);
        }

        if !advanced {
            break;
        }
    }

    Pretableau {
        prestates: builder.prestates,
        states: builder.states,
        dashed_edges: builder.dashed_edges,
        solid_edges: builder.solid_edges,
    }
}

/// Rule SR: expand a prestate into its cut-saturated family of states,
/// adding a dashed edge to each and enqueuing new states' diamonds for DR.
fn apply_sr(
    builder: &mut Builder,
    prestate_id: NodeId,
    expand_options: ExpandOptions,
    states_to_dr: &mut VecDeque<(NodeId, Formula)>,
) {
    let formulas = builder.prestates[&prestate_id].formulas.clone();
    trace!(prestate = %prestate_id, size = formulas.len(), "rule SR: expanding prestate");

    for delta in expand(&formulas, expand_options) {
        let (state_id, is_new) = builder.mint_state(delta.clone());
        builder.dashed_edges.push((prestate_id, state_id));
        if is_new {
            for diamond in delta.iter().filter(|f| f.is_diamond()) {
                states_to_dr.push_back((state_id, diamond.clone()));
            }
        }
    }
}

/// Rule DR: for a state and one of its diamond formulas `¬D_A φ`, build the
/// successor prestate and add a solid edge labeled by that diamond.
fn apply_dr(
    builder: &mut Builder,
    state_id: NodeId,
    diamond: &Formula,
    prestates_to_sr: &mut VecDeque<NodeId>,
) {
    let Some((a, phi)) = diamond.as_diamond() else {
        unreachable!("DR queue only ever holds diamond formulas");
    };
    let delta = builder.states[&state_id].formulas.clone();
    debug!(state = %state_id, diamond = %diamond, "rule DR: building successor prestate");

    let mut gamma = FormulaSet::singleton(phi.negate());
    for f in delta.iter() {
        if let Some((a_prime, _)) = f.as_box() {
            if a_prime.is_subset_of(a) {
                gamma.insert(f.clone());
            }
        } else if let Some((a_prime, _)) = f.as_diamond() {
            if a_prime.is_subset_of(a) && f.key() != diamond.key() {
                gamma.insert(f.clone());
            }
        } else if let Some((a_prime, _)) = f.as_eventuality() {
            if a_prime.intersects(a) {
                gamma.insert(f.clone());
            }
        }
    }

    let (prestate_id, is_new) = builder.mint_prestate(gamma);
    builder.solid_edges.push((state_id, prestate_id, diamond.clone()));
    if is_new {
        prestates_to_sr.push_back(prestate_id);
    }
}
