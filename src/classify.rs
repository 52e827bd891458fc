//! α/β/elementary classification of formulas (§4.1, C3).
//!
//! Components are listed in a deterministic order: it matters for the
//! reproducibility of traces and tests (§5), not for correctness of the
//! verdict.

use crate::core::coalition::Coalition;
use crate::core::formula::{Formula, FormulaKind};

/// The classification of a formula, carrying its components in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// No components; the formula is a literal as far as the tableau rules
    /// are concerned (atoms, negated atoms, diamonds `¬D_A φ`).
    Elementary,
    /// A conjunctive formula: all components must hold.
    Alpha(Vec<Formula>),
    /// A disjunctive formula: at least one component must hold.
    Beta(Vec<Formula>),
}

/// Components of `C_A φ`: `φ`, then `D_{a} C_A φ` for each `a ∈ A` in
/// canonical order (§4.1, §9 "α-component ordering for C_A").
fn common_knowledge_alpha_components(coalition: &Coalition, phi: &Formula, whole: &Formula) -> Vec<Formula> {
    let mut components = Vec::with_capacity(1 + coalition.len());
    components.push(phi.clone());
    for agent in coalition.agents() {
        components.push(Formula::d(Coalition::singleton(agent.clone()), whole.clone()));
    }
    components
}

/// Components of `¬C_A φ`: `¬φ`, then `¬D_{a} C_A φ` for each `a ∈ A` in
/// canonical order.
fn common_knowledge_beta_components(coalition: &Coalition, phi: &Formula, c_whole: &Formula) -> Vec<Formula> {
    let mut components = Vec::with_capacity(1 + coalition.len());
    components.push(phi.negate());
    for agent in coalition.agents() {
        components.push(Formula::d(Coalition::singleton(agent.clone()), c_whole.clone()).negate());
    }
    components
}

/// Classifies a formula per the table in §4.1.
pub fn classify(formula: &Formula) -> Classification {
    match formula.kind() {
        FormulaKind::Atom(_) => Classification::Elementary,

        FormulaKind::Not(inner) => match inner.kind() {
            // ¬p: elementary.
            FormulaKind::Atom(_) => Classification::Elementary,
            // ¬¬φ: α, component φ.
            FormulaKind::Not(phi) => Classification::Alpha(vec![phi.clone()]),
            // ¬(φ ∧ ψ): β, components ¬φ, ¬ψ.
            FormulaKind::And(phi, psi) => Classification::Beta(vec![phi.negate(), psi.negate()]),
            // ¬D_A φ: elementary (a diamond).
            FormulaKind::D(_, _) => Classification::Elementary,
            // ¬C_A φ: β, see above.
            FormulaKind::C(coalition, phi) => {
                Classification::Beta(common_knowledge_beta_components(coalition, phi, inner))
            }
        },

        // φ ∧ ψ: α, components φ, ψ.
        FormulaKind::And(phi, psi) => Classification::Alpha(vec![phi.clone(), psi.clone()]),

        // D_A φ: α, components D_A φ, φ (reflexive).
        FormulaKind::D(_, phi) => Classification::Alpha(vec![formula.clone(), phi.clone()]),

        // C_A φ: α, see above.
        FormulaKind::C(coalition, phi) => {
            Classification::Alpha(common_knowledge_alpha_components(coalition, phi, formula))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::agent::Agent;

    #[test]
    fn atom_is_elementary() {
        assert_eq!(classify(&Formula::atom("p")), Classification::Elementary);
    }

    #[test]
    fn negated_atom_is_elementary() {
        assert_eq!(classify(&Formula::atom("p").negate()), Classification::Elementary);
    }

    #[test]
    fn double_negation_is_alpha() {
        let p = Formula::atom("p");
        let nn_p = Formula::not(Formula::not(p.clone()));
        assert_eq!(classify(&nn_p), Classification::Alpha(vec![p]));
    }

    #[test]
    fn and_is_alpha() {
        let p = Formula::atom("p");
        let q = Formula::atom("q");
        let conj = Formula::and(p.clone(), q.clone());
        assert_eq!(classify(&conj), Classification::Alpha(vec![p, q]));
    }

    #[test]
    fn negated_and_is_beta() {
        let p = Formula::atom("p");
        let q = Formula::atom("q");
        let conj = Formula::and(p.clone(), q.clone());
        assert_eq!(
            classify(&conj.negate()),
            Classification::Beta(vec![p.negate(), q.negate()])
        );
    }

    #[test]
    fn diamond_is_elementary() {
        let a = Agent::new("a");
        let p = Formula::atom("p");
        let box_a_p = Formula::k(a, p);
        assert_eq!(classify(&box_a_p.negate()), Classification::Elementary);
    }

    #[test]
    fn box_is_alpha_reflexive() {
        let a = Agent::new("a");
        let p = Formula::atom("p");
        let box_a_p = Formula::k(a, p.clone());
        assert_eq!(
            classify(&box_a_p),
            Classification::Alpha(vec![box_a_p.clone(), p])
        );
    }

    #[test]
    fn common_knowledge_alpha_components_in_canonical_order() {
        let a = Agent::new("a");
        let b = Agent::new("b");
        let coalition =
            crate::core::coalition::Coalition::new(vec![b.clone(), a.clone()]).unwrap();
        let p = Formula::atom("p");
        let c_ab_p = Formula::c(coalition, p.clone());
        let Classification::Alpha(components) = classify(&c_ab_p) else {
            panic!("expected alpha");
        };
        assert_eq!(components[0], p);
        assert_eq!(components[1], Formula::d(crate::core::coalition::Coalition::singleton(a), c_ab_p.clone()));
        assert_eq!(components[2], Formula::d(crate::core::coalition::Coalition::singleton(b), c_ab_p));
    }

    #[test]
    fn negated_common_knowledge_is_beta() {
        let a = Agent::new("a");
        let coalition = crate::core::coalition::Coalition::singleton(a);
        let p = Formula::atom("p");
        let c_a_p = Formula::c(coalition, p.clone());
        let not_c_a_p = c_a_p.negate();
        let Classification::Beta(components) = classify(&not_c_a_p) else {
            panic!("expected beta");
        };
        assert_eq!(components[0], p.negate());
        assert_eq!(components.len(), 2);
    }
}
