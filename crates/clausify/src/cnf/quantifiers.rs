//! Dropping universal quantifiers

use super::Stage;
use crate::error::{ClausifyError, Result};
use crate::logic::Formula;

/// Remove every `∀` wrapper, leaving its body. The variables become
/// implicitly universally closed.
///
/// Existentials must already be gone; finding one means the stages were
/// run out of order.
pub fn strip_universals(formula: Formula) -> Result<Formula> {
    match formula {
        Formula::ForAll(_, f) => strip_universals(*f),
        Formula::And(l, r) => Ok(Formula::and(strip_universals(*l)?, strip_universals(*r)?)),
        Formula::Or(l, r) => Ok(Formula::or(strip_universals(*l)?, strip_universals(*r)?)),
        Formula::Not(f) => Ok(Formula::not(strip_universals(*f)?)),
        Formula::Atom(_) => Ok(formula),
        Formula::Exists(_, _) | Formula::Implies(_, _) | Formula::Iff(_, _) => {
            Err(ClausifyError::UnexpectedConnective {
                stage: Stage::StripUniversals,
                connective: formula.connective(),
            })
        }
    }
}
