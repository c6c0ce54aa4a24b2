//! First-order formula representation
//!
//! Formulas are immutable trees. Every conversion stage consumes a tree and
//! builds a new one, so no subtree is ever shared between two results.

use super::term::Term;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Predicate applied to terms
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Atom {
    pub predicate: String,
    pub args: Vec<Term>,
}

impl Atom {
    pub fn new(predicate: impl Into<String>, args: Vec<Term>) -> Self {
        Atom {
            predicate: predicate.into(),
            args,
        }
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.predicate)?;
        if self.args.is_empty() {
            return Ok(());
        }
        write!(f, "(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

/// First-order formula
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    /// Atomic formula
    Atom(Atom),
    /// Negation
    Not(Box<Formula>),
    /// Conjunction
    And(Box<Formula>, Box<Formula>),
    /// Disjunction
    Or(Box<Formula>, Box<Formula>),
    /// Implication
    Implies(Box<Formula>, Box<Formula>),
    /// Biconditional
    Iff(Box<Formula>, Box<Formula>),
    /// Universal quantification
    ForAll(String, Box<Formula>),
    /// Existential quantification
    Exists(String, Box<Formula>),
}

// Builders
impl Formula {
    pub fn atom(predicate: impl Into<String>, args: Vec<Term>) -> Formula {
        Formula::Atom(Atom::new(predicate, args))
    }

    /// Nullary atom, i.e. a propositional letter
    pub fn prop(name: impl Into<String>) -> Formula {
        Formula::Atom(Atom::new(name, vec![]))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(body: Formula) -> Formula {
        Formula::Not(Box::new(body))
    }

    pub fn and(left: Formula, right: Formula) -> Formula {
        Formula::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Formula, right: Formula) -> Formula {
        Formula::Or(Box::new(left), Box::new(right))
    }

    pub fn implies(left: Formula, right: Formula) -> Formula {
        Formula::Implies(Box::new(left), Box::new(right))
    }

    pub fn iff(left: Formula, right: Formula) -> Formula {
        Formula::Iff(Box::new(left), Box::new(right))
    }

    pub fn forall(var: impl Into<String>, body: Formula) -> Formula {
        Formula::ForAll(var.into(), Box::new(body))
    }

    pub fn exists(var: impl Into<String>, body: Formula) -> Formula {
        Formula::Exists(var.into(), Box::new(body))
    }
}

impl Formula {
    /// Human-readable name of the top-level node, used in error messages
    pub fn connective(&self) -> &'static str {
        match self {
            Formula::Atom(_) => "atom",
            Formula::Not(_) => "negation",
            Formula::And(_, _) => "conjunction",
            Formula::Or(_, _) => "disjunction",
            Formula::Implies(_, _) => "implication",
            Formula::Iff(_, _) => "biconditional",
            Formula::ForAll(_, _) => "universal quantifier",
            Formula::Exists(_, _) => "existential quantifier",
        }
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Formula::Atom(_))
    }

    /// Number of nodes in the tree (atoms count as one node)
    pub fn size(&self) -> usize {
        let mut size = 0;
        let mut stack = vec![self];
        while let Some(formula) = stack.pop() {
            size += 1;
            stack.extend(formula.children());
        }
        size
    }

    fn children(&self) -> impl Iterator<Item = &Formula> {
        let (first, second) = match self {
            Formula::Atom(_) => (None, None),
            Formula::Not(f) | Formula::ForAll(_, f) | Formula::Exists(_, f) => (Some(&**f), None),
            Formula::And(l, r)
            | Formula::Or(l, r)
            | Formula::Implies(l, r)
            | Formula::Iff(l, r) => (Some(&**l), Some(&**r)),
        };
        // Right child first so the stack visits the left subtree first
        second.into_iter().chain(first)
    }

    /// Variables occurring outside the scope of any quantifier binding them,
    /// in order of first occurrence
    pub fn free_variables(&self) -> IndexSet<String> {
        let mut free = IndexSet::new();
        let mut bound = Vec::new();
        self.collect_free_variables(&mut bound, &mut free);
        free
    }

    fn collect_free_variables(&self, bound: &mut Vec<String>, free: &mut IndexSet<String>) {
        match self {
            Formula::Atom(atom) => {
                let mut vars = IndexSet::new();
                for arg in &atom.args {
                    arg.collect_variables(&mut vars);
                }
                for var in vars {
                    if !bound.contains(&var) {
                        free.insert(var);
                    }
                }
            }
            Formula::Not(f) => f.collect_free_variables(bound, free),
            Formula::And(l, r)
            | Formula::Or(l, r)
            | Formula::Implies(l, r)
            | Formula::Iff(l, r) => {
                l.collect_free_variables(bound, free);
                r.collect_free_variables(bound, free);
            }
            Formula::ForAll(var, f) | Formula::Exists(var, f) => {
                bound.push(var.clone());
                f.collect_free_variables(bound, free);
                bound.pop();
            }
        }
    }

    /// Every name used in the formula: predicates, functions, constants,
    /// variables and quantifier-bound names
    pub fn symbols(&self) -> IndexSet<String> {
        let mut symbols = IndexSet::new();
        self.collect_symbols(&mut symbols);
        symbols
    }

    pub fn collect_symbols(&self, symbols: &mut IndexSet<String>) {
        let mut stack = vec![self];
        while let Some(formula) = stack.pop() {
            match formula {
                Formula::Atom(atom) => {
                    symbols.insert(atom.predicate.clone());
                    for arg in &atom.args {
                        arg.collect_symbols(symbols);
                    }
                }
                Formula::ForAll(var, _) | Formula::Exists(var, _) => {
                    symbols.insert(var.clone());
                }
                _ => {}
            }
            stack.extend(formula.children());
        }
    }

    /// Names bound by quantifiers, in pre-order, with repetitions
    pub fn bound_variables(&self) -> Vec<String> {
        let mut vars = Vec::new();
        self.collect_bound_variables(&mut vars);
        vars
    }

    fn collect_bound_variables(&self, vars: &mut Vec<String>) {
        match self {
            Formula::Atom(_) => {}
            Formula::Not(f) => f.collect_bound_variables(vars),
            Formula::And(l, r)
            | Formula::Or(l, r)
            | Formula::Implies(l, r)
            | Formula::Iff(l, r) => {
                l.collect_bound_variables(vars);
                r.collect_bound_variables(vars);
            }
            Formula::ForAll(var, f) | Formula::Exists(var, f) => {
                vars.push(var.clone());
                f.collect_bound_variables(vars);
            }
        }
    }

    pub fn contains_quantifier(&self) -> bool {
        match self {
            Formula::Atom(_) => false,
            Formula::Not(f) => f.contains_quantifier(),
            Formula::And(l, r)
            | Formula::Or(l, r)
            | Formula::Implies(l, r)
            | Formula::Iff(l, r) => l.contains_quantifier() || r.contains_quantifier(),
            Formula::ForAll(_, _) | Formula::Exists(_, _) => true,
        }
    }

    pub fn contains_existential(&self) -> bool {
        match self {
            Formula::Atom(_) => false,
            Formula::Not(f) | Formula::ForAll(_, f) => f.contains_existential(),
            Formula::And(l, r)
            | Formula::Or(l, r)
            | Formula::Implies(l, r)
            | Formula::Iff(l, r) => l.contains_existential() || r.contains_existential(),
            Formula::Exists(_, _) => true,
        }
    }

    /// No implications or biconditionals, and negation only over atoms
    pub fn is_nnf(&self) -> bool {
        match self {
            Formula::Atom(_) => true,
            Formula::Not(f) => f.is_atom(),
            Formula::And(l, r) | Formula::Or(l, r) => l.is_nnf() && r.is_nnf(),
            Formula::ForAll(_, f) | Formula::Exists(_, f) => f.is_nnf(),
            Formula::Implies(_, _) | Formula::Iff(_, _) => false,
        }
    }

    /// Conjunction of disjunctions of literals: no quantifiers, no `→`/`↔`,
    /// negation only over atoms, and no disjunction directly above a conjunction
    pub fn is_cnf(&self) -> bool {
        match self {
            Formula::Atom(_) => true,
            Formula::Not(f) => f.is_atom(),
            Formula::And(l, r) => l.is_cnf() && r.is_cnf(),
            Formula::Or(l, r) => {
                !matches!(**l, Formula::And(_, _))
                    && !matches!(**r, Formula::And(_, _))
                    && l.is_cnf()
                    && r.is_cnf()
            }
            _ => false,
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Atom(atom) => write!(f, "{}", atom),
            Formula::Not(body) => write!(f, "¬{}", body),
            Formula::And(l, r) => write!(f, "({} ∧ {})", l, r),
            Formula::Or(l, r) => write!(f, "({} ∨ {})", l, r),
            Formula::Implies(l, r) => write!(f, "({} → {})", l, r),
            Formula::Iff(l, r) => write!(f, "({} ↔ {})", l, r),
            Formula::ForAll(var, body) => write!(f, "∀{}.{}", var, body),
            Formula::Exists(var, body) => write!(f, "∃{}.{}", var, body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: &str) -> Formula {
        Formula::atom("P", vec![Term::var(x)])
    }

    #[test]
    fn test_pretty_printing() {
        // ∀x (P(x) → ∃y Q(y,x))
        let formula = Formula::forall(
            "x",
            Formula::implies(
                p("x"),
                Formula::exists("y", Formula::atom("Q", vec![Term::var("y"), Term::var("x")])),
            ),
        );
        assert_eq!(formula.to_string(), "∀x.(P(x) → ∃y.Q(y,x))");

        let formula = Formula::iff(
            Formula::not(Formula::prop("A")),
            Formula::or(Formula::prop("B"), Formula::prop("C")),
        );
        assert_eq!(formula.to_string(), "(¬A ↔ (B ∨ C))");
    }

    #[test]
    fn test_free_variables() {
        // ∀x (P(x) ∧ R(x, y)) ∨ P(z)
        let formula = Formula::or(
            Formula::forall(
                "x",
                Formula::and(p("x"), Formula::atom("R", vec![Term::var("x"), Term::var("y")])),
            ),
            p("z"),
        );
        let free: Vec<_> = formula.free_variables().into_iter().collect();
        assert_eq!(free, vec!["y".to_string(), "z".to_string()]);
    }

    #[test]
    fn test_variable_free_in_one_branch_bound_in_another() {
        let formula = Formula::and(Formula::exists("x", p("x")), p("x"));
        assert!(formula.free_variables().contains("x"));
        assert_eq!(formula.bound_variables(), vec!["x".to_string()]);
    }

    #[test]
    fn test_cnf_shape_check() {
        let a = Formula::prop("A");
        let b = Formula::prop("B");
        let c = Formula::prop("C");

        let cnf = Formula::and(
            Formula::or(a.clone(), c.clone()),
            Formula::or(b.clone(), Formula::not(c.clone())),
        );
        assert!(cnf.is_cnf());

        let not_cnf = Formula::or(Formula::and(a.clone(), b.clone()), c.clone());
        assert!(!not_cnf.is_cnf());

        assert!(!Formula::not(Formula::or(a.clone(), b.clone())).is_cnf());
        assert!(!Formula::forall("x", p("x")).is_cnf());
        assert!(!Formula::implies(a, b).is_cnf());
    }

    #[test]
    fn test_nnf_shape_check() {
        let formula = Formula::forall("x", Formula::or(Formula::not(p("x")), p("x")));
        assert!(formula.is_nnf());
        assert!(!Formula::not(Formula::not(p("x"))).is_nnf());
    }

    #[test]
    fn test_size_counts_nodes() {
        let formula = Formula::not(Formula::and(p("x"), Formula::exists("y", p("y"))));
        assert_eq!(formula.size(), 5);
    }
}
