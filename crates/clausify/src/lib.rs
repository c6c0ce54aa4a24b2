//! Clausify: first-order formulas to conjunctive normal form
//!
//! Formulas are built programmatically with the [`Formula`] builders and
//! converted by [`to_cnf`] or a [`Converter`] through six fixed stages:
//! implication elimination, negation normal form, variable standardization,
//! Skolemization, quantifier stripping and distribution.

pub mod cnf;
pub mod config;
pub mod error;
pub mod logic;
pub mod names;

pub use cnf::{
    clausify, distribute, skolemize, standardize_variables, strip_universals, to_cnf, Clause,
    ClauseSet, ConversionTrace, Converter, Literal, Stage,
};
pub use config::ConversionConfig;
pub use error::{ClausifyError, Result};
pub use logic::{Atom, Formula, Term};
pub use names::NameSupply;
