//! `FormulaSet`: a finite set of formulas with O(1) membership and a
//! deterministic canonical key, keeping insertion order for iteration.
//!
//! Mirrors the teacher's dual-index idiom (`Arena::exprs` for order,
//! `Arena::exprs_inv` for fast lookup), adapted from expression identifiers
//! to formula canonical keys, per §9's explicit guidance to use "two
//! parallel structures (hash map + lazily computed sorted key)".

use std::fmt;

use rustc_hash::FxHashMap;

use crate::core::formula::Formula;

#[derive(Debug, Clone, Default)]
pub struct FormulaSet {
    /// Formulas in insertion order.
    order: Vec<Formula>,
    /// Maps a formula's key to its position in `order`, for O(1) membership.
    index: FxHashMap<String, usize>,
}

impl FormulaSet {
    pub fn new() -> Self {
        FormulaSet {
            order: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    pub fn singleton(formula: Formula) -> Self {
        let mut set = FormulaSet::new();
        set.insert(formula);
        set
    }

    pub fn from_iter(formulas: impl IntoIterator<Item = Formula>) -> Self {
        let mut set = FormulaSet::new();
        for f in formulas {
            set.insert(f);
        }
        set
    }

    /// Inserts a formula, returning `true` if it was not already present.
    pub fn insert(&mut self, formula: Formula) -> bool {
        if self.index.contains_key(formula.key()) {
            return false;
        }
        self.index.insert(formula.key().to_string(), self.order.len());
        self.order.push(formula);
        true
    }

    pub fn contains(&self, formula: &Formula) -> bool {
        self.index.contains_key(formula.key())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Formula> {
        self.order.iter()
    }

    /// The union of `self` and `other`, preserving `self`'s members first in
    /// their original order, followed by new members of `other`.
    pub fn union(&self, other: &FormulaSet) -> FormulaSet {
        let mut result = self.clone();
        for f in other.iter() {
            result.insert(f.clone());
        }
        result
    }

    /// Returns a new set equal to `self` with `formula` added.
    pub fn with(&self, formula: Formula) -> FormulaSet {
        let mut result = self.clone();
        result.insert(formula);
        result
    }

    pub fn is_subset_of(&self, other: &FormulaSet) -> bool {
        self.order.iter().all(|f| other.contains(f))
    }

    /// `∃ ψ` with both `ψ` and `¬ψ` present (§4.2).
    pub fn is_patently_inconsistent(&self) -> bool {
        self.order.iter().any(|f| self.contains(&f.negate()))
    }

    /// The canonical set key: members' keys, lexicographically sorted and
    /// concatenated. Invariant under insertion order (§8 property 7).
    pub fn key(&self) -> String {
        let mut keys: Vec<&str> = self.order.iter().map(|f| f.key()).collect();
        keys.sort_unstable();
        keys.join("|")
    }
}

impl PartialEq for FormulaSet {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for FormulaSet {}

impl std::hash::Hash for FormulaSet {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for FormulaSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, formula) in self.order.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{formula}")?;
        }
        write!(f, "}}")
    }
}

impl FromIterator<Formula> for FormulaSet {
    fn from_iter<T: IntoIterator<Item = Formula>>(iter: T) -> Self {
        FormulaSet::from_iter(iter)
    }
}
