//! Skolemization

use super::Stage;
use crate::error::{ClausifyError, Result};
use crate::logic::{Atom, Formula, Term};
use crate::names::NameSupply;

/// Remove every existential quantifier by replacing its variable with a
/// Skolem term over the universal variables in scope.
///
/// Expects a standardized formula in negation normal form. Universal
/// quantifiers are kept; they are dropped by a later stage.
pub fn skolemize(formula: Formula, names: &mut NameSupply) -> Result<Formula> {
    let mut skolemizer = Skolemizer {
        names,
        universal_vars: Vec::new(),
    };
    skolemizer.skolemize(formula)
}

struct Skolemizer<'a> {
    names: &'a mut NameSupply,
    /// Universal variables enclosing the current position, outermost first
    universal_vars: Vec<String>,
}

impl Skolemizer<'_> {
    fn skolemize(&mut self, formula: Formula) -> Result<Formula> {
        match formula {
            Formula::Atom(_) => Ok(formula),

            Formula::Not(f) => match *f {
                Formula::Atom(atom) => Ok(Formula::not(Formula::Atom(atom))),
                other => Err(ClausifyError::NegatedCompound {
                    stage: Stage::Skolemize,
                    connective: other.connective(),
                }),
            },

            Formula::And(l, r) => {
                let l = self.skolemize(*l)?;
                Ok(Formula::and(l, self.skolemize(*r)?))
            }

            Formula::Or(l, r) => {
                let l = self.skolemize(*l)?;
                Ok(Formula::or(l, self.skolemize(*r)?))
            }

            Formula::ForAll(var, f) => {
                self.universal_vars.push(var.clone());
                let body = self.skolemize(*f);
                self.universal_vars.pop();
                Ok(Formula::forall(var, body?))
            }

            Formula::Exists(var, f) => {
                let skolem_term = self.skolem_term();
                tracing::trace!(variable = %var, term = %skolem_term, "introduced skolem term");
                self.skolemize(f.substitute(&var, &skolem_term))
            }

            Formula::Implies(_, _) | Formula::Iff(_, _) => Err(ClausifyError::UnexpectedConnective {
                stage: Stage::Skolemize,
                connective: formula.connective(),
            }),
        }
    }

    /// Fresh Skolem constant, or a Skolem function applied to the universal
    /// variables in scope, in the order their quantifiers were entered
    fn skolem_term(&mut self) -> Term {
        let name = self.names.fresh_skolem();
        if self.universal_vars.is_empty() {
            Term::Constant(name)
        } else {
            Term::function(
                name,
                self.universal_vars.iter().cloned().map(Term::Variable).collect(),
            )
        }
    }
}

impl Formula {
    /// Replace free occurrences of variable `var` with `term`.
    ///
    /// Stops at any quantifier that rebinds `var`.
    pub fn substitute(self, var: &str, term: &Term) -> Formula {
        match self {
            Formula::Atom(atom) => Formula::Atom(Atom {
                args: atom.args.iter().map(|arg| arg.substitute(var, term)).collect(),
                predicate: atom.predicate,
            }),
            Formula::Not(f) => Formula::not(f.substitute(var, term)),
            Formula::And(l, r) => Formula::and(l.substitute(var, term), r.substitute(var, term)),
            Formula::Or(l, r) => Formula::or(l.substitute(var, term), r.substitute(var, term)),
            Formula::Implies(l, r) => {
                Formula::implies(l.substitute(var, term), r.substitute(var, term))
            }
            Formula::Iff(l, r) => Formula::iff(l.substitute(var, term), r.substitute(var, term)),
            Formula::ForAll(v, f) => {
                if v == var {
                    Formula::ForAll(v, f)
                } else {
                    Formula::forall(v, f.substitute(var, term))
                }
            }
            Formula::Exists(v, f) => {
                if v == var {
                    Formula::Exists(v, f)
                } else {
                    Formula::exists(v, f.substitute(var, term))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existential_without_universal_becomes_constant() {
        // ∃X1 P(X1) ∧ ∃X2 Q(X2)  =>  P(SK1) ∧ Q(SK2)
        let formula = Formula::and(
            Formula::exists("X1", Formula::atom("P", vec![Term::var("X1")])),
            Formula::exists("X2", Formula::atom("Q", vec![Term::var("X2")])),
        );
        let mut names = NameSupply::default();
        let result = skolemize(formula, &mut names).unwrap();
        assert_eq!(
            result,
            Formula::and(
                Formula::atom("P", vec![Term::constant("SK1")]),
                Formula::atom("Q", vec![Term::constant("SK2")]),
            )
        );
        assert_eq!(result.to_string(), "(P(SK1) ∧ Q(SK2))");
    }

    #[test]
    fn test_skolem_function_over_enclosing_universal() {
        // ∀X1 (¬P(X1) ∨ ∃X2 Q(X2, X1))  =>  ∀X1 (¬P(X1) ∨ Q(SK1(X1), X1))
        let formula = Formula::forall(
            "X1",
            Formula::or(
                Formula::not(Formula::atom("P", vec![Term::var("X1")])),
                Formula::exists("X2", Formula::atom("Q", vec![Term::var("X2"), Term::var("X1")])),
            ),
        );
        let mut names = NameSupply::default();
        let result = skolemize(formula, &mut names).unwrap();
        assert_eq!(result.to_string(), "∀X1.(¬P(X1) ∨ Q(SK1(X1),X1))");
    }

    #[test]
    fn test_arguments_follow_quantifier_order() {
        // ∀a ∀b ∃c R(a, b, c)
        let formula = Formula::forall(
            "a",
            Formula::forall(
                "b",
                Formula::exists("c", Formula::atom("R", vec!["a".into(), "b".into(), "c".into()])),
            ),
        );
        let mut names = NameSupply::default();
        let result = skolemize(formula, &mut names).unwrap();
        assert_eq!(result.to_string(), "∀a.∀b.R(a,b,SK1(a,b))");
    }

    #[test]
    fn test_sibling_universal_not_in_scope() {
        // ∀a P(a) ∧ ∃b Q(b)
        let formula = Formula::and(
            Formula::forall("a", Formula::atom("P", vec!["a".into()])),
            Formula::exists("b", Formula::atom("Q", vec!["b".into()])),
        );
        let mut names = NameSupply::default();
        let result = skolemize(formula, &mut names).unwrap();
        assert_eq!(result.to_string(), "(∀a.P(a) ∧ Q(SK1))");
    }

    #[test]
    fn test_nested_existentials_inside_function_arguments() {
        // ∀a ∃b ∃c P(f(b), c)
        let formula = Formula::forall(
            "a",
            Formula::exists(
                "b",
                Formula::exists(
                    "c",
                    Formula::atom(
                        "P",
                        vec![Term::function("f", vec![Term::var("b")]), Term::var("c")],
                    ),
                ),
            ),
        );
        let mut names = NameSupply::default();
        let result = skolemize(formula, &mut names).unwrap();
        assert_eq!(result.to_string(), "∀a.P(f(SK1(a)),SK2(a))");
        assert!(!result.contains_existential());
    }

    #[test]
    fn test_substitution_stops_at_rebinding() {
        let formula = Formula::and(
            Formula::atom("P", vec!["x".into()]),
            Formula::forall("x", Formula::atom("Q", vec!["x".into()])),
        );
        let result = formula.substitute("x", &Term::constant("c"));
        assert_eq!(result.to_string(), "(P(c) ∧ ∀x.Q(x))");
    }

    #[test]
    fn test_rejects_non_nnf_input() {
        let formula = Formula::not(Formula::exists("x", Formula::atom("P", vec!["x".into()])));
        let mut names = NameSupply::default();
        let err = skolemize(formula, &mut names).unwrap_err();
        assert!(matches!(
            err,
            ClausifyError::NegatedCompound {
                stage: Stage::Skolemize,
                ..
            }
        ));
    }
}
