//! Standardizing variables apart

use crate::logic::{Atom, Formula};
use crate::names::NameSupply;
use indexmap::IndexMap;

/// Give every quantifier a fresh variable and rename its bound occurrences.
///
/// The renaming environment is scoped: a binding introduced by a quantifier
/// is visible only inside that quantifier's body. Free variables and
/// constants are never renamed.
pub fn standardize_variables(formula: Formula, names: &mut NameSupply) -> Formula {
    let mut env = IndexMap::new();
    standardize(formula, names, &mut env)
}

fn standardize(
    formula: Formula,
    names: &mut NameSupply,
    env: &mut IndexMap<String, String>,
) -> Formula {
    match formula {
        Formula::Atom(atom) => Formula::Atom(Atom {
            args: atom.args.iter().map(|arg| arg.rename(env)).collect(),
            predicate: atom.predicate,
        }),
        Formula::Not(f) => Formula::not(standardize(*f, names, env)),
        Formula::And(l, r) => {
            let l = standardize(*l, names, env);
            Formula::and(l, standardize(*r, names, env))
        }
        Formula::Or(l, r) => {
            let l = standardize(*l, names, env);
            Formula::or(l, standardize(*r, names, env))
        }
        Formula::Implies(l, r) => {
            let l = standardize(*l, names, env);
            Formula::implies(l, standardize(*r, names, env))
        }
        Formula::Iff(l, r) => {
            let l = standardize(*l, names, env);
            Formula::iff(l, standardize(*r, names, env))
        }
        Formula::ForAll(var, f) => {
            let (fresh, body) = standardize_scope(var, *f, names, env);
            Formula::forall(fresh, body)
        }
        Formula::Exists(var, f) => {
            let (fresh, body) = standardize_scope(var, *f, names, env);
            Formula::exists(fresh, body)
        }
    }
}

fn standardize_scope(
    var: String,
    body: Formula,
    names: &mut NameSupply,
    env: &mut IndexMap<String, String>,
) -> (String, Formula) {
    let fresh = names.fresh_variable();
    let shadowed = env.insert(var.clone(), fresh.clone());
    let body = standardize(body, names, env);
    match shadowed {
        Some(outer) => {
            env.insert(var, outer);
        }
        None => {
            env.shift_remove(&var);
        }
    }
    (fresh, body)
}
