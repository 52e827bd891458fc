//! Subformulas and closure (§4.2, C2).

use crate::core::formula::{Formula, FormulaKind};
use crate::core::set::FormulaSet;

/// `Sub(φ)`: all nodes of the formula's syntax tree, including φ itself.
pub fn subformulas(formula: &Formula) -> FormulaSet {
    let mut set = FormulaSet::new();
    collect_subformulas(formula, &mut set);
    set
}

fn collect_subformulas(formula: &Formula, into: &mut FormulaSet) {
    if !into.insert(formula.clone()) {
        return;
    }
    match formula.kind() {
        FormulaKind::Atom(_) => {}
        FormulaKind::Not(sub) => collect_subformulas(sub, into),
        FormulaKind::And(l, r) => {
            collect_subformulas(l, into);
            collect_subformulas(r, into);
        }
        FormulaKind::D(_, sub) | FormulaKind::C(_, sub) => collect_subformulas(sub, into),
    }
}

/// `cl(φ)`: least set containing φ, closed under α/β-components, and such
/// that if `¬D_A ψ ∈ cl(φ)` then `¬ψ ∈ cl(φ)`.
pub fn closure(formula: &Formula) -> FormulaSet {
    let mut set = FormulaSet::singleton(formula.clone());
    let mut frontier = vec![formula.clone()];
    while let Some(current) = frontier.pop() {
        let mut newly_added = Vec::new();
        let mut push_new = |f: Formula, set: &mut FormulaSet| {
            if set.insert(f.clone()) {
                newly_added.push(f);
            }
        };

        match crate::classify::classify(&current) {
            crate::classify::Classification::Elementary => {}
            crate::classify::Classification::Alpha(components)
            | crate::classify::Classification::Beta(components) => {
                for component in components {
                    push_new(component, &mut set);
                }
            }
        }

        if let Some((_, psi)) = current.as_diamond() {
            push_new(psi.negate(), &mut set);
        }

        frontier.extend(newly_added);
    }
    set
}

/// `ecl(φ) = { ψ, ¬ψ : ψ ∈ cl(φ) }`.
pub fn extended_closure(formula: &Formula) -> FormulaSet {
    let cl = closure(formula);
    let mut ecl = FormulaSet::new();
    for psi in cl.iter() {
        ecl.insert(psi.clone());
        ecl.insert(psi.negate());
    }
    ecl
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::agent::Agent;
    use crate::core::coalition::Coalition;

    #[test]
    fn subformulas_of_atom() {
        let p = Formula::atom("p");
        let sub = subformulas(&p);
        assert_eq!(sub.len(), 1);
        assert!(sub.contains(&p));
    }

    #[test]
    fn subformulas_of_conjunction() {
        let p = Formula::atom("p");
        let q = Formula::atom("q");
        let conj = Formula::and(p.clone(), q.clone());
        let sub = subformulas(&conj);
        assert_eq!(sub.len(), 3);
        assert!(sub.contains(&p));
        assert!(sub.contains(&q));
        assert!(sub.contains(&conj));
    }

    #[test]
    fn closure_contains_self_and_is_subset_of_extended_closure() {
        let a = Agent::new("a");
        let p = Formula::atom("p");
        let phi = Formula::and(Formula::k(a, p.clone()), p.negate());
        let cl = closure(&phi);
        let ecl = extended_closure(&phi);
        assert!(cl.contains(&phi));
        assert!(cl.is_subset_of(&ecl));
    }

    #[test]
    fn closure_unfolds_common_knowledge() {
        let a = Agent::new("a");
        let b = Agent::new("b");
        let coalition = Coalition::new(vec![a.clone(), b.clone()]).unwrap();
        let p = Formula::atom("p");
        let c_ab_p = Formula::c(coalition, p.clone());
        let cl = closure(&c_ab_p);
        assert!(cl.contains(&p));
        assert!(cl.contains(&Formula::d(Coalition::singleton(a), c_ab_p.clone())));
        assert!(cl.contains(&Formula::d(Coalition::singleton(b), c_ab_p)));
    }

    #[test]
    fn closure_propagates_diamond_negation() {
        let a = Agent::new("a");
        let p = Formula::atom("p");
        let diamond = Formula::not(Formula::k(a, p.clone()));
        let cl = closure(&diamond);
        assert!(cl.contains(&p.negate()));
    }
}
