//! Clause extraction from CNF-shaped formulas

use crate::error::{ClausifyError, Result};
use crate::logic::{Atom, Formula};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Possibly negated atom
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub polarity: bool,
    pub atom: Atom,
}

impl Literal {
    pub fn positive(atom: Atom) -> Self {
        Literal {
            polarity: true,
            atom,
        }
    }

    pub fn negative(atom: Atom) -> Self {
        Literal {
            polarity: false,
            atom,
        }
    }

    pub fn is_complement_of(&self, other: &Literal) -> bool {
        self.polarity != other.polarity && self.atom == other.atom
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.polarity {
            write!(f, "¬")?;
        }
        write!(f, "{}", self.atom)
    }
}

/// Disjunction of literals, in the left-to-right order of the formula
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clause {
    pub literals: Vec<Literal>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Clause { literals }
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// Contains a literal together with its complement
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .enumerate()
            .any(|(i, lit)| self.literals[i + 1..].iter().any(|other| lit.is_complement_of(other)))
    }

    pub fn variables(&self) -> IndexSet<String> {
        let mut vars = IndexSet::new();
        for lit in &self.literals {
            for arg in &lit.atom.args {
                arg.collect_variables(&mut vars);
            }
        }
        vars
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.literals.is_empty() {
            return write!(f, "□");
        }
        for (i, lit) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " ∨ ")?;
            }
            write!(f, "{}", lit)?;
        }
        Ok(())
    }
}

/// Conjunction of clauses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseSet {
    pub clauses: Vec<Clause>,
}

impl ClauseSet {
    /// Split a CNF formula into its clauses.
    ///
    /// The `∧` spine is flattened into clauses and each clause's `∨` spine
    /// into literals.
    pub fn from_formula(formula: Formula) -> Result<Self> {
        let mut clauses = Vec::new();
        collect_clauses(formula, &mut clauses)?;
        Ok(ClauseSet { clauses })
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Clause> {
        self.clauses.iter()
    }
}

impl<'a> IntoIterator for &'a ClauseSet {
    type Item = &'a Clause;
    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

impl fmt::Display for ClauseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for clause in &self.clauses {
            writeln!(f, "{}", clause)?;
        }
        Ok(())
    }
}

fn collect_clauses(formula: Formula, clauses: &mut Vec<Clause>) -> Result<()> {
    match formula {
        Formula::And(l, r) => {
            collect_clauses(*l, clauses)?;
            collect_clauses(*r, clauses)
        }
        other => {
            let mut literals = Vec::new();
            collect_literals(other, &mut literals)?;
            clauses.push(Clause::new(literals));
            Ok(())
        }
    }
}

fn collect_literals(formula: Formula, literals: &mut Vec<Literal>) -> Result<()> {
    match formula {
        Formula::Or(l, r) => {
            collect_literals(*l, literals)?;
            collect_literals(*r, literals)
        }
        Formula::Atom(atom) => {
            literals.push(Literal::positive(atom));
            Ok(())
        }
        Formula::Not(f) => match *f {
            Formula::Atom(atom) => {
                literals.push(Literal::negative(atom));
                Ok(())
            }
            other => Err(ClausifyError::NotCnf {
                connective: other.connective(),
            }),
        },
        other => Err(ClausifyError::NotCnf {
            connective: other.connective(),
        }),
    }
}
