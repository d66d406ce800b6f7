//! Clauses, aka. a collection of literals, interpreted as the disjunction of those literals.
//!
//! Literals are given in their DIMACS form: a non-zero integer whose magnitude is a variable id and whose sign is the polarity of the literal.
//!
//! - The empty clause is always false (never true).
//! - Single literals are identified with the clause containing that literal (aka. a 'unit' clause).
//!
//! A [Cnf] is the conjunction of its clauses.
//! Duplicate clauses are permitted, and the order of clauses carries no meaning.

use std::collections::BTreeMap;

/// A literal, in DIMACS form.
pub type Literal = i32;

/// The canonical implementation of a clause.
pub type Clause = Vec<Literal>;

/// A formula in conjunctive normal form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cnf {
    pub var_count: usize,
    pub clauses: Vec<Clause>,
}

impl Cnf {
    pub fn new(var_count: usize) -> Self {
        Cnf {
            var_count,
            clauses: Vec::default(),
        }
    }

    pub fn add_clause(&mut self, clause: impl Into<Clause>) {
        self.clauses.push(clause.into());
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The clauses of the formula as a multiset, with a count for each distinct clause.
    pub fn multiset(&self) -> BTreeMap<&Clause, usize> {
        let mut counts = BTreeMap::new();
        for clause in &self.clauses {
            *counts.entry(clause).or_default() += 1;
        }
        counts
    }

    /// Whether the formulas contain the same clauses with the same multiplicity, regardless of order.
    pub fn same_clauses(&self, other: &Cnf) -> bool {
        self.multiset() == other.multiset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiset_ignores_order() {
        let mut a = Cnf::new(3);
        a.add_clause(vec![1, -2]);
        a.add_clause(vec![3]);
        a.add_clause(vec![3]);

        let mut b = Cnf::new(3);
        b.add_clause(vec![3]);
        b.add_clause(vec![1, -2]);
        b.add_clause(vec![3]);

        assert!(a.same_clauses(&b));

        b.clauses.pop();
        assert!(!a.same_clauses(&b));
    }

    #[test]
    fn literal_order_within_clause_matters() {
        let mut a = Cnf::new(2);
        a.add_clause(vec![1, 2]);
        let mut b = Cnf::new(2);
        b.add_clause(vec![2, 1]);
        assert!(!a.same_clauses(&b));
    }
}
