//! Distribution of `∨` over `∧`

use super::Stage;
use crate::error::{ClausifyError, Result};
use crate::logic::Formula;

/// Rewrite a quantifier-free NNF formula into conjunctive normal form.
///
/// `(X ∧ Y) ∨ Z` becomes `(X ∨ Z) ∧ (Y ∨ Z)`, and symmetrically. Repeated
/// distribution can duplicate subformulas, so the output may be exponentially
/// larger than the input.
pub fn distribute(formula: Formula) -> Result<Formula> {
    let input_size = formula.size();
    let cnf = distribute_formula(formula)?;
    tracing::debug!(input_size, output_size = cnf.size(), "distributed disjunctions");
    Ok(cnf)
}

fn distribute_formula(formula: Formula) -> Result<Formula> {
    match formula {
        Formula::And(l, r) => {
            let l = distribute_formula(*l)?;
            Ok(Formula::and(l, distribute_formula(*r)?))
        }
        Formula::Or(l, r) => {
            let l = distribute_formula(*l)?;
            let r = distribute_formula(*r)?;
            Ok(distribute_or(l, r))
        }
        Formula::Atom(_) => Ok(formula),
        Formula::Not(f) => {
            if f.is_atom() {
                Ok(Formula::Not(f))
            } else {
                Err(ClausifyError::NegatedCompound {
                    stage: Stage::Distribute,
                    connective: f.connective(),
                })
            }
        }
        Formula::Implies(_, _)
        | Formula::Iff(_, _)
        | Formula::ForAll(_, _)
        | Formula::Exists(_, _) => {
            Err(ClausifyError::UnexpectedConnective {
                stage: Stage::Distribute,
                connective: formula.connective(),
            })
        }
    }
}

/// Disjunction of two formulas that are already in CNF
fn distribute_or(left: Formula, right: Formula) -> Formula {
    match (left, right) {
        (Formula::And(x, y), z) => {
            // (X ∧ Y) ∨ Z => (X ∨ Z) ∧ (Y ∨ Z)
            Formula::and(distribute_or(*x, z.clone()), distribute_or(*y, z))
        }
        (x, Formula::And(y, z)) => {
            // X ∨ (Y ∧ Z) => (X ∨ Y) ∧ (X ∨ Z)
            Formula::and(distribute_or(x.clone(), *y), distribute_or(x, *z))
        }
        (x, y) => Formula::or(x, y),
    }
}
