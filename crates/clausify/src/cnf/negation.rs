//! Negation normal form

use super::Stage;
use crate::error::{ClausifyError, Result};
use crate::logic::Formula;

impl Formula {
    /// Push negations inward until every `¬` sits directly on an atom.
    ///
    /// Uses an explicit work stack rather than recursion. The input must be
    /// free of `→` and `↔`.
    pub fn to_nnf(self) -> Result<Formula> {
        enum WorkItem {
            Process(Formula, bool), // (formula, negate)
            CombineAnd,
            CombineOr,
            CombineForAll(String),
            CombineExists(String),
        }

        let mut stack: Vec<WorkItem> = vec![WorkItem::Process(self, false)];
        let mut results: Vec<Formula> = Vec::new();

        while let Some(item) = stack.pop() {
            match item {
                WorkItem::Process(formula, negate) => match (formula, negate) {
                    (Formula::Atom(a), false) => results.push(Formula::Atom(a)),
                    (Formula::Atom(a), true) => results.push(Formula::not(Formula::Atom(a))),

                    // Double negation cancels by flipping the pending polarity
                    (Formula::Not(f), neg) => stack.push(WorkItem::Process(*f, !neg)),

                    (Formula::And(l, r), false) => {
                        stack.push(WorkItem::CombineAnd);
                        stack.push(WorkItem::Process(*r, false));
                        stack.push(WorkItem::Process(*l, false));
                    }
                    (Formula::And(l, r), true) => {
                        // ¬(A ∧ B) = ¬A ∨ ¬B
                        stack.push(WorkItem::CombineOr);
                        stack.push(WorkItem::Process(*r, true));
                        stack.push(WorkItem::Process(*l, true));
                    }

                    (Formula::Or(l, r), false) => {
                        stack.push(WorkItem::CombineOr);
                        stack.push(WorkItem::Process(*r, false));
                        stack.push(WorkItem::Process(*l, false));
                    }
                    (Formula::Or(l, r), true) => {
                        // ¬(A ∨ B) = ¬A ∧ ¬B
                        stack.push(WorkItem::CombineAnd);
                        stack.push(WorkItem::Process(*r, true));
                        stack.push(WorkItem::Process(*l, true));
                    }

                    (Formula::ForAll(var, f), false) => {
                        stack.push(WorkItem::CombineForAll(var));
                        stack.push(WorkItem::Process(*f, false));
                    }
                    (Formula::ForAll(var, f), true) => {
                        // ¬∀x.F = ∃x.¬F
                        stack.push(WorkItem::CombineExists(var));
                        stack.push(WorkItem::Process(*f, true));
                    }
                    (Formula::Exists(var, f), false) => {
                        stack.push(WorkItem::CombineExists(var));
                        stack.push(WorkItem::Process(*f, false));
                    }
                    (Formula::Exists(var, f), true) => {
                        // ¬∃x.F = ∀x.¬F
                        stack.push(WorkItem::CombineForAll(var));
                        stack.push(WorkItem::Process(*f, true));
                    }

                    (formula @ (Formula::Implies(_, _) | Formula::Iff(_, _)), _) => {
                        return Err(ClausifyError::UnexpectedConnective {
                            stage: Stage::NegationNormalForm,
                            connective: formula.connective(),
                        });
                    }
                },

                WorkItem::CombineAnd => {
                    let (l, r) = pop_pair(&mut results)?;
                    results.push(Formula::and(l, r));
                }
                WorkItem::CombineOr => {
                    let (l, r) = pop_pair(&mut results)?;
                    results.push(Formula::or(l, r));
                }
                WorkItem::CombineForAll(var) => {
                    let body = pop_one(&mut results)?;
                    results.push(Formula::forall(var, body));
                }
                WorkItem::CombineExists(var) => {
                    let body = pop_one(&mut results)?;
                    results.push(Formula::exists(var, body));
                }
            }
        }

        pop_one(&mut results)
    }
}

// Every Combine item is pushed beneath the Process items that produce its
// operands, so the result stack cannot run dry. A failure here is a bug in
// the work-stack bookkeeping and is reported as an invariant violation.
fn pop_one(results: &mut Vec<Formula>) -> Result<Formula> {
    results.pop().ok_or(ClausifyError::UnexpectedConnective {
        stage: Stage::NegationNormalForm,
        connective: "empty result stack",
    })
}

fn pop_pair(results: &mut Vec<Formula>) -> Result<(Formula, Formula)> {
    let right = pop_one(results)?;
    let left = pop_one(results)?;
    Ok((left, right))
}
