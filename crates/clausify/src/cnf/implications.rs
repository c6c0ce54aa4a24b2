//! Implication and biconditional elimination

use crate::logic::Formula;

impl Formula {
    /// Rewrite `A → B` as `¬A ∨ B` and `A ↔ B` as `(¬A ∨ B) ∧ (¬B ∨ A)`.
    ///
    /// Total over every formula; quantifier variables are kept as they are.
    /// Uses an explicit work stack, so nesting depth is bounded by memory
    /// rather than by the thread's stack.
    pub fn eliminate_implications(self) -> Formula {
        enum WorkItem {
            Process(Formula),
            CombineNot,
            CombineAnd,
            CombineOr,
            CombineIff,
            CombineForAll(String),
            CombineExists(String),
        }

        let mut stack: Vec<WorkItem> = vec![WorkItem::Process(self)];
        let mut results: Vec<Formula> = Vec::new();

        while let Some(item) = stack.pop() {
            match item {
                WorkItem::Process(formula) => match formula {
                    Formula::Atom(_) => results.push(formula),
                    Formula::Not(f) => {
                        stack.push(WorkItem::CombineNot);
                        stack.push(WorkItem::Process(*f));
                    }
                    Formula::And(l, r) => {
                        stack.push(WorkItem::CombineAnd);
                        stack.push(WorkItem::Process(*r));
                        stack.push(WorkItem::Process(*l));
                    }
                    Formula::Or(l, r) => {
                        stack.push(WorkItem::CombineOr);
                        stack.push(WorkItem::Process(*r));
                        stack.push(WorkItem::Process(*l));
                    }
                    Formula::Implies(l, r) => {
                        // A → B = ¬A ∨ B
                        stack.push(WorkItem::CombineOr);
                        stack.push(WorkItem::Process(*r));
                        stack.push(WorkItem::CombineNot);
                        stack.push(WorkItem::Process(*l));
                    }
                    Formula::Iff(l, r) => {
                        stack.push(WorkItem::CombineIff);
                        stack.push(WorkItem::Process(*r));
                        stack.push(WorkItem::Process(*l));
                    }
                    Formula::ForAll(var, f) => {
                        stack.push(WorkItem::CombineForAll(var));
                        stack.push(WorkItem::Process(*f));
                    }
                    Formula::Exists(var, f) => {
                        stack.push(WorkItem::CombineExists(var));
                        stack.push(WorkItem::Process(*f));
                    }
                },

                WorkItem::CombineNot => {
                    let body = pop(&mut results);
                    results.push(Formula::not(body));
                }
                WorkItem::CombineAnd => {
                    let r = pop(&mut results);
                    let l = pop(&mut results);
                    results.push(Formula::and(l, r));
                }
                WorkItem::CombineOr => {
                    let r = pop(&mut results);
                    let l = pop(&mut results);
                    results.push(Formula::or(l, r));
                }
                WorkItem::CombineIff => {
                    // Each side was rewritten once; the second copy is a clone of the result
                    let b = pop(&mut results);
                    let a = pop(&mut results);
                    results.push(Formula::and(
                        Formula::or(Formula::not(a.clone()), b.clone()),
                        Formula::or(Formula::not(b), a),
                    ));
                }
                WorkItem::CombineForAll(var) => {
                    let body = pop(&mut results);
                    results.push(Formula::forall(var, body));
                }
                WorkItem::CombineExists(var) => {
                    let body = pop(&mut results);
                    results.push(Formula::exists(var, body));
                }
            }
        }

        pop(&mut results)
    }
}

// Combine items sit beneath the Process items that produce their operands.
fn pop(results: &mut Vec<Formula>) -> Formula {
    results.pop().expect("work stack produced no operand")
}
