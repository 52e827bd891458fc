//! Formulas: the tagged-union tree shape of §3, with a canonical key that
//! drives structural equality.
//!
//! We represent a formula as an immutable tagged variant behind an [`Rc`],
//! so cloning a formula is cheap and sharing a sub-formula across many
//! containing formulas costs nothing extra. Unlike the teacher's arena
//! (which interns expressions by identifier to support in-place mutation),
//! formulas here are never mutated after construction, so a simple
//! memoized key is enough to give us the cheap equality and hashing the
//! teacher gets from its `exprs_inv` lookup.

use std::fmt;
use std::rc::Rc;

use crate::core::coalition::Coalition;

/// The shape of a formula, before sugar is macro-expanded.
#[derive(Debug)]
pub enum FormulaKind {
    Atom(String),
    Not(Formula),
    And(Formula, Formula),
    /// Distributed knowledge of a coalition.
    D(Coalition, Formula),
    /// Common knowledge of a coalition.
    C(Coalition, Formula),
}

#[derive(Debug)]
struct FormulaNode {
    kind: FormulaKind,
    key: String,
}

/// A formula, cheaply cloneable and compared/hashed by its canonical key.
#[derive(Debug, Clone)]
pub struct Formula(Rc<FormulaNode>);

fn compute_key(kind: &FormulaKind) -> String {
    match kind {
        FormulaKind::Atom(name) => format!("p:{name}"),
        FormulaKind::Not(sub) => format!("~({})", sub.key()),
        FormulaKind::And(l, r) => format!("&({},{})", l.key(), r.key()),
        FormulaKind::D(coalition, sub) => format!("D[{}]({})", coalition.key(), sub.key()),
        FormulaKind::C(coalition, sub) => format!("C[{}]({})", coalition.key(), sub.key()),
    }
}

impl Formula {
    fn from_kind(kind: FormulaKind) -> Self {
        let key = compute_key(&kind);
        Formula(Rc::new(FormulaNode { kind, key }))
    }

    /// A propositional atom.
    pub fn atom(name: impl Into<String>) -> Self {
        Formula::from_kind(FormulaKind::Atom(name.into()))
    }

    /// Negation. Not auto-simplified: `¬¬φ` is kept distinct from `φ`, since
    /// the classifier's α-rule for double negation (§4.1) depends on the
    /// shape surviving until expansion unfolds it.
    pub fn not(phi: Formula) -> Self {
        Formula::from_kind(FormulaKind::Not(phi))
    }

    pub fn and(l: Formula, r: Formula) -> Self {
        Formula::from_kind(FormulaKind::And(l, r))
    }

    /// Distributed knowledge `D_A φ`.
    pub fn d(coalition: Coalition, phi: Formula) -> Self {
        Formula::from_kind(FormulaKind::D(coalition, phi))
    }

    /// Common knowledge `C_A φ`.
    pub fn c(coalition: Coalition, phi: Formula) -> Self {
        Formula::from_kind(FormulaKind::C(coalition, phi))
    }

    /// `K_a φ ≡ D_{a} φ` (sugar, macro-expanded at construction time).
    pub fn k(agent: crate::core::agent::Agent, phi: Formula) -> Self {
        Formula::d(Coalition::singleton(agent), phi)
    }

    /// `Or(p,q) ≡ ¬(¬p ∧ ¬q)` (sugar, macro-expanded at construction time).
    pub fn or(p: Formula, q: Formula) -> Self {
        Formula::not(Formula::and(Formula::not(p), Formula::not(q)))
    }

    /// `Implies(p,q) ≡ ¬(p ∧ ¬q)` (sugar, macro-expanded at construction time).
    pub fn implies(p: Formula, q: Formula) -> Self {
        Formula::not(Formula::and(p, Formula::not(q)))
    }

    pub fn kind(&self) -> &FormulaKind {
        &self.0.kind
    }

    /// The deterministic canonical key of this formula (§3).
    pub fn key(&self) -> &str {
        &self.0.key
    }

    pub fn is_atom(&self) -> bool {
        matches!(self.kind(), FormulaKind::Atom(_))
    }

    /// `isDiamond(φ) ⇔ φ = ¬D_A ψ` (§4.2).
    pub fn is_diamond(&self) -> bool {
        matches!(self.kind(), FormulaKind::Not(sub) if matches!(sub.kind(), FormulaKind::D(_, _)))
    }

    /// `isBox(φ) ⇔ φ = D_A ψ` (§4.2).
    pub fn is_box(&self) -> bool {
        matches!(self.kind(), FormulaKind::D(_, _))
    }

    /// `isEventuality(φ) ⇔ φ = ¬C_A ψ` (§4.2).
    pub fn is_eventuality(&self) -> bool {
        matches!(self.kind(), FormulaKind::Not(sub) if matches!(sub.kind(), FormulaKind::C(_, _)))
    }

    /// If this formula is `D_A ψ`, returns `(A, ψ)`.
    pub fn as_box(&self) -> Option<(&Coalition, &Formula)> {
        match self.kind() {
            FormulaKind::D(coalition, psi) => Some((coalition, psi)),
            _ => None,
        }
    }

    /// If this formula is `¬D_A ψ`, returns `(A, ψ)`.
    pub fn as_diamond(&self) -> Option<(&Coalition, &Formula)> {
        match self.kind() {
            FormulaKind::Not(sub) => match sub.kind() {
                FormulaKind::D(coalition, psi) => Some((coalition, psi)),
                _ => None,
            },
            _ => None,
        }
    }

    /// If this formula is `¬C_A ψ`, returns `(A, ψ)`.
    pub fn as_eventuality(&self) -> Option<(&Coalition, &Formula)> {
        match self.kind() {
            FormulaKind::Not(sub) => match sub.kind() {
                FormulaKind::C(coalition, psi) => Some((coalition, psi)),
                _ => None,
            },
            _ => None,
        }
    }

    /// The formula negating this one (not simplified away, see [`Formula::not`]).
    pub fn negate(&self) -> Formula {
        Formula::not(self.clone())
    }

    /// Returns the sub-formula of `¬φ`, if this formula is a negation.
    pub fn negated_operand(&self) -> Option<&Formula> {
        match self.kind() {
            FormulaKind::Not(sub) => Some(sub),
            _ => None,
        }
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0) || self.key() == other.key()
    }
}

impl Eq for Formula {}

impl std::hash::Hash for Formula {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            FormulaKind::Atom(name) => write!(f, "{name}"),
            FormulaKind::Not(sub) => write!(f, "¬{sub}"),
            FormulaKind::And(l, r) => write!(f, "({l} ∧ {r})"),
            FormulaKind::D(coalition, sub) => write!(f, "D_{coalition}{sub}"),
            FormulaKind::C(coalition, sub) => write!(f, "C_{coalition}{sub}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::agent::Agent;

    #[test]
    fn structural_equality_follows_key() {
        let p1 = Formula::atom("p");
        let p2 = Formula::atom("p");
        assert_eq!(p1, p2);
        assert_eq!(p1.key(), p2.key());
    }

    #[test]
    fn double_negation_not_collapsed() {
        let p = Formula::atom("p");
        let not_not_p = Formula::not(Formula::not(p.clone()));
        assert_ne!(not_not_p, p);
    }

    #[test]
    fn and_is_order_sensitive() {
        let a = Formula::atom("a");
        let b = Formula::atom("b");
        assert_ne!(Formula::and(a.clone(), b.clone()), Formula::and(b, a));
    }

    #[test]
    fn coalitions_normalized_within_key() {
        let ab = Coalition::new(vec![Agent::new("b"), Agent::new("a")]).unwrap();
        let ba = Coalition::new(vec![Agent::new("a"), Agent::new("b")]).unwrap();
        let p = Formula::atom("p");
        assert_eq!(Formula::d(ab, p.clone()), Formula::d(ba, p));
    }

    #[test]
    fn diamond_and_eventuality_predicates() {
        let a = Agent::new("a");
        let p = Formula::atom("p");
        let box_a_p = Formula::k(a.clone(), p.clone());
        let diamond = Formula::not(box_a_p.clone());
        assert!(diamond.is_diamond());
        assert!(box_a_p.is_box());

        let coalition = Coalition::singleton(a);
        let c_a_p = Formula::c(coalition, p);
        let eventuality = Formula::not(c_a_p);
        assert!(eventuality.is_eventuality());
        assert!(!eventuality.is_diamond());
    }
}
