//! Phase 3 — state elimination, rules E1 and E2 dovetailed to a fixpoint
//! (§4.4).

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::core::formula::Formula;
use crate::tableau::node::{EliminationRecord, EliminationRule, NodeId, Tableau};

/// Runs E1/E2 on a mutable copy of `initial` until a full pass removes
/// nothing, returning the final tableau and the elimination trace in
/// removal order.
pub fn eliminate_states(initial: &Tableau) -> (Tableau, Vec<EliminationRecord>) {
    let mut tableau = initial.clone();
    let mut trace = Vec::new();

    apply_e1_to_fixpoint(&mut tableau, &mut trace);

    let mut pass = 0u32;
    loop {
        pass += 1;
        let mut removed_this_pass = false;

        let mut eventualities = collect_eventualities(&tableau);
        eventualities.sort_by(|a, b| a.key().cmp(b.key()));
        trace!(pass, eventualities = eventualities.len(), "dovetailing pass");
        for eventuality in &eventualities {
            if apply_e2(&mut tableau, eventuality, &mut trace) {
                removed_this_pass = true;
            }
            if apply_e1_to_fixpoint(&mut tableau, &mut trace) {
                removed_this_pass = true;
            }
        }

        if !removed_this_pass {
            break;
        }
    }

    debug!(
        pass,
        removed = trace.len(),
        states_remaining = tableau.states.len(),
        "state elimination reached fixpoint"
    );

    (tableau, trace)
}

/// Distinct eventuality formulas appearing in any surviving state, in a
/// stable order by canonical key (§5 ordering guarantee vi).
fn collect_eventualities(tableau: &Tableau) -> Vec<Formula> {
    let mut seen = FxHashSet::default();
    let mut out = Vec::new();
    for state in tableau.states.values() {
        for f in state.formulas.iter() {
            if f.is_eventuality() && seen.insert(f.key().to_string()) {
                out.push(f.clone());
            }
        }
    }
    out
}

/// E1: remove any state with a diamond formula that has no surviving solid
/// successor edge carrying that exact label. Applied to fixpoint since a
/// removal can strip another state's only successor.
fn apply_e1_to_fixpoint(tableau: &mut Tableau, trace: &mut Vec<EliminationRecord>) -> bool {
    let mut any_removed = false;
    loop {
        let defective = find_defective_states(tableau);
        if defective.is_empty() {
            break;
        }
        for (state_id, diamond) in defective {
            if let Some(state) = tableau.states.get(&state_id) {
                trace!(state = %state_id, diamond = %diamond, "rule E1: removing state with missing successor");
                trace.push(EliminationRecord {
                    state_id,
                    rule: EliminationRule::E1,
                    formula: diamond,
                    snapshot: state.formulas.clone(),
                });
                tableau.remove_state(state_id);
                any_removed = true;
            }
        }
    }
    any_removed
}

fn find_defective_states(tableau: &Tableau) -> Vec<(NodeId, Formula)> {
    let mut defective = Vec::new();
    for state in tableau.states.values() {
        for diamond in state.formulas.iter().filter(|f| f.is_diamond()) {
            let has_successor = tableau
                .edges
                .iter()
                .any(|(from, _, label)| *from == state.id && label.key() == diamond.key());
            if !has_successor {
                defective.push((state.id, diamond.clone()));
                break;
            }
        }
    }
    defective
}

/// E2 for one eventuality `ζ = ¬C_A φ`: mark every state with `¬φ`, then
/// propagate marking across edges `Δ →^{¬D_B ψ} Δ′` with `Δ′` marked and
/// `B ∩ A ≠ ∅`, to fixpoint; finally remove every unmarked state containing
/// `ζ`. Returns whether any state was removed.
fn apply_e2(tableau: &mut Tableau, zeta: &Formula, trace: &mut Vec<EliminationRecord>) -> bool {
    let Some((a, phi)) = zeta.as_eventuality() else {
        unreachable!("collect_eventualities only yields eventualities");
    };
    let not_phi = phi.negate();
    trace!(eventuality = %zeta, "rule E2: marking seeds for eventuality");

    let mut marked: FxHashSet<NodeId> = tableau
        .states
        .values()
        .filter(|s| s.formulas.contains(&not_phi))
        .map(|s| s.id)
        .collect();

    loop {
        let mut newly_marked = Vec::new();
        for state in tableau.states.values() {
            if marked.contains(&state.id) || !state.formulas.contains(zeta) {
                continue;
            }
            let propagates = tableau.edges.iter().any(|(from, to, label)| {
                *from == state.id
                    && marked.contains(to)
                    && label.as_diamond().map(|(b, _)| b.intersects(a)).unwrap_or(false)
            });
            if propagates {
                newly_marked.push(state.id);
            }
        }
        if newly_marked.is_empty() {
            break;
        }
        marked.extend(newly_marked);
    }

    let to_remove: Vec<NodeId> = tableau
        .states
        .values()
        .filter(|s| !marked.contains(&s.id) && s.formulas.contains(zeta))
        .map(|s| s.id)
        .collect();

    debug!(
        eventuality = %zeta,
        marked = marked.len(),
        removed = to_remove.len(),
        "rule E2: marking fixpoint reached"
    );

    for state_id in &to_remove {
        if let Some(state) = tableau.states.get(state_id) {
            trace!(state = %state_id, eventuality = %zeta, "rule E2: removing unmarked state");
            trace.push(EliminationRecord {
                state_id: *state_id,
                rule: EliminationRule::E2,
                formula: zeta.clone(),
                snapshot: state.formulas.clone(),
            });
        }
        tableau.remove_state(*state_id);
    }

    !to_remove.is_empty()
}
