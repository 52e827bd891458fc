//! The expansion engine (§4.3, C4): fixpoint saturation of a formula set
//! into a family of fully-expanded, non-patently-inconsistent sets, with an
//! optional analytic cut rule restricted by coalition side-conditions.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::classify::{classify, Classification};
use crate::closure::subformulas;
use crate::core::coalition::Coalition;
use crate::core::formula::{Formula, FormulaKind};
use crate::core::set::FormulaSet;
use crate::options::ExpandOptions;

/// Runs the expansion rules of §4.3 on `gamma` to a fixpoint, returning the
/// resulting family of fully-expanded sets (empty if `gamma` is patently
/// inconsistent).
pub fn expand(gamma: &FormulaSet, options: ExpandOptions) -> Vec<FormulaSet> {
    if gamma.is_patently_inconsistent() {
        return Vec::new();
    }

    let original = gamma.clone();
    let mut rule3_fired: FxHashSet<(String, String)> = FxHashSet::default();
    let mut current: FxHashMap<String, FormulaSet> = FxHashMap::default();
    current.insert(gamma.key(), gamma.clone());

    loop {
        let mut next: FxHashMap<String, FormulaSet> = FxHashMap::default();
        let mut changed = false;

        for (_, delta) in current.drain() {
            let outputs = step(&delta, &original, &options, &mut rule3_fired);
            let stable = outputs.len() == 1 && outputs[0].key() == delta.key();
            if stable {
                next.entry(delta.key()).or_insert(delta);
            } else {
                changed = true;
                for output in outputs {
                    if !output.is_patently_inconsistent() {
                        next.entry(output.key()).or_insert(output);
                    }
                }
            }
        }

        current = next;
        if !changed {
            break;
        }
    }

    current.into_values().collect()
}

/// Applies the first applicable rule to `delta`, in the priority order
/// α, β, rule 3, cut (§4.3). Returns `[delta]` unchanged if no rule applies.
fn step(
    delta: &FormulaSet,
    original: &FormulaSet,
    options: &ExpandOptions,
    rule3_fired: &mut FxHashSet<(String, String)>,
) -> Vec<FormulaSet> {
    if let Some(new_delta) = apply_alpha_rule(delta, original) {
        return vec![new_delta];
    }

    if let Some(branches) = apply_beta_rule(delta) {
        return branches;
    }

    if let Some(branches) = apply_rule_3(delta, rule3_fired) {
        return branches;
    }

    if options.enable_cuts {
        if let Some(branches) = apply_cut_rule(delta, options.restricted_cuts) {
            return branches;
        }
    }

    vec![delta.clone()]
}

/// Rule 1: adds the missing components of every incomplete α-formula in one
/// sweep, prioritizing α-formulas that come from eventualities present in
/// the original Γ (§5 ordering guarantee iv).
fn apply_alpha_rule(delta: &FormulaSet, original: &FormulaSet) -> Option<FormulaSet> {
    let mut incomplete: Vec<(bool, Vec<Formula>)> = Vec::new();
    for formula in delta.iter() {
        if let Classification::Alpha(components) = classify(formula) {
            if !components.iter().all(|c| delta.contains(c)) {
                let from_original = original.contains(formula);
                incomplete.push((!from_original, components));
            }
        }
    }
    if incomplete.is_empty() {
        return None;
    }
    incomplete.sort_by_key(|(not_original, _)| *not_original);

    let mut new_delta = delta.clone();
    for (_, components) in incomplete {
        for component in components {
            new_delta.insert(component);
        }
    }
    Some(new_delta)
}

/// Rule 2: branches on the first β-formula none of whose components are
/// present.
fn apply_beta_rule(delta: &FormulaSet) -> Option<Vec<FormulaSet>> {
    for formula in delta.iter() {
        if let Classification::Beta(components) = classify(formula) {
            if !components.iter().any(|c| delta.contains(c)) {
                return Some(components.iter().map(|c| delta.with(c.clone())).collect());
            }
        }
    }
    None
}

/// Rule 3: for `¬C_A ψ ∈ Δ` with `¬ψ ∉ Δ` but some other β-component
/// present, additionally produces `Δ ∪ {¬ψ}` as a sibling (Δ itself kept).
/// Memoized on `(set key, formula key)` to guarantee termination (§9).
fn apply_rule_3(
    delta: &FormulaSet,
    rule3_fired: &mut FxHashSet<(String, String)>,
) -> Option<Vec<FormulaSet>> {
    for formula in delta.iter() {
        let Some((_, psi)) = formula.as_eventuality() else {
            continue;
        };
        let site = (delta.key(), formula.key().to_string());
        if rule3_fired.contains(&site) {
            continue;
        }
        let not_psi = psi.negate();
        if delta.contains(&not_psi) {
            continue;
        }
        let Classification::Beta(components) = classify(formula) else {
            unreachable!("eventualities classify as beta");
        };
        let other_component_present = components.iter().skip(1).any(|c| delta.contains(c));
        if other_component_present {
            rule3_fired.insert(site);
            return Some(vec![delta.clone(), delta.with(not_psi)]);
        }
    }
    None
}

/// Rule 4 (optional): branches on the first eligible cut candidate.
fn apply_cut_rule(delta: &FormulaSet, restricted: bool) -> Option<Vec<FormulaSet>> {
    let (chi, _witness) = find_cut_candidate(delta, restricted)?;
    let not_chi = chi.negate();
    Some(vec![delta.with(chi), delta.with(not_chi)])
}

/// Finds the first `(χ, ψ)` pair satisfying the cut rule's preconditions:
/// `ψ ∈ Δ`, `χ` a sub-formula of `ψ` of shape `D_A φ` or `C_A φ`, neither
/// `χ` nor `¬χ` in `Δ`, and (if `restricted`) the applicable side-condition.
fn find_cut_candidate(delta: &FormulaSet, restricted: bool) -> Option<(Formula, Formula)> {
    for psi in delta.iter() {
        for chi in subformulas(psi).iter() {
            let is_cut_shape = matches!(chi.kind(), FormulaKind::D(_, _) | FormulaKind::C(_, _));
            if !is_cut_shape {
                continue;
            }
            if delta.contains(chi) || delta.contains(&chi.negate()) {
                continue;
            }
            if !restricted || cut_enabled(chi, psi, delta) {
                return Some((chi.clone(), psi.clone()));
            }
        }
    }
    None
}

/// Extracts `B` if `ambient` is `D_B δ` or `¬D_B δ`.
fn as_box_or_diamond_coalition(ambient: &Formula) -> Option<&Coalition> {
    ambient
        .as_box()
        .or_else(|| ambient.as_diamond())
        .map(|(coalition, _)| coalition)
}

/// The coalition side-conditions C11/C12/C21/C22 of §4.3.
fn cut_enabled(chi: &Formula, witness: &Formula, delta: &FormulaSet) -> bool {
    match chi.kind() {
        FormulaKind::D(a, _) => {
            if let Some(b) = as_box_or_diamond_coalition(witness) {
                // C11
                return exists_diamond(delta, |e| a.is_subset_of(e) && b.is_subset_of(e));
            }
            if let Some((b, _)) = witness.as_eventuality() {
                // C12
                return exists_diamond(delta, |e| a.is_subset_of(e) && b.intersects(e));
            }
            false
        }
        FormulaKind::C(a, _) => {
            if let Some(b) = as_box_or_diamond_coalition(witness) {
                // C21
                return exists_diamond(delta, |e| b.is_subset_of(e) && a.intersects(e));
            }
            if let Some((b, _)) = witness.as_eventuality() {
                // C22
                return exists_diamond(delta, |e| a.intersects(e) && b.intersects(e));
            }
            false
        }
        _ => false,
    }
}

fn exists_diamond(delta: &FormulaSet, predicate: impl Fn(&Coalition) -> bool) -> bool {
    delta
        .iter()
        .filter_map(|f| f.as_diamond())
        .any(|(e, _)| predicate(e))
}
