//! First-order terms

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A term in first-order logic.
///
/// Skolem terms produced during conversion are ordinary `Function`s (or
/// `Constant`s when no universal variable is in scope), so every term stays
/// structured and substitution never has to look inside a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Variable(String),
    Constant(String),
    Function { name: String, args: Vec<Term> },
}

impl Term {
    pub fn var(name: impl Into<String>) -> Self {
        Term::Variable(name.into())
    }

    pub fn constant(name: impl Into<String>) -> Self {
        Term::Constant(name.into())
    }

    pub fn function(name: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Function {
            name: name.into(),
            args,
        }
    }

    /// The head symbol: variable, constant or function name.
    pub fn name(&self) -> &str {
        match self {
            Term::Variable(name) | Term::Constant(name) => name,
            Term::Function { name, .. } => name,
        }
    }

    /// Collect variable names in order of first occurrence
    pub fn collect_variables(&self, vars: &mut IndexSet<String>) {
        match self {
            Term::Variable(name) => {
                vars.insert(name.clone());
            }
            Term::Constant(_) => {}
            Term::Function { args, .. } => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
        }
    }

    /// Collect every symbol name (variables, constants, function names)
    pub fn collect_symbols(&self, symbols: &mut IndexSet<String>) {
        symbols.insert(self.name().to_string());
        if let Term::Function { args, .. } = self {
            for arg in args {
                arg.collect_symbols(symbols);
            }
        }
    }

    /// Rename variables according to `renaming`. Unmapped variables,
    /// constants and function symbols are left alone.
    pub fn rename(&self, renaming: &IndexMap<String, String>) -> Term {
        match self {
            Term::Variable(name) => match renaming.get(name) {
                Some(fresh) => Term::Variable(fresh.clone()),
                None => self.clone(),
            },
            Term::Constant(_) => self.clone(),
            Term::Function { name, args } => Term::Function {
                name: name.clone(),
                args: args.iter().map(|arg| arg.rename(renaming)).collect(),
            },
        }
    }

    /// Replace every occurrence of variable `var` with `replacement`
    pub fn substitute(&self, var: &str, replacement: &Term) -> Term {
        match self {
            Term::Variable(name) if name == var => replacement.clone(),
            Term::Variable(_) | Term::Constant(_) => self.clone(),
            Term::Function { name, args } => Term::Function {
                name: name.clone(),
                args: args
                    .iter()
                    .map(|arg| arg.substitute(var, replacement))
                    .collect(),
            },
        }
    }

    pub fn size(&self) -> usize {
        match self {
            Term::Variable(_) | Term::Constant(_) => 1,
            Term::Function { args, .. } => 1 + args.iter().map(Term::size).sum::<usize>(),
        }
    }
}

impl From<&str> for Term {
    fn from(name: &str) -> Self {
        Term::Variable(name.to_string())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(name) | Term::Constant(name) => write!(f, "{}", name),
            Term::Function { name, args } => {
                write!(f, "{}", name)?;
                if !args.is_empty() {
                    write!(f, "(")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }
}
