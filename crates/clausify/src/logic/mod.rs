//! Formula and term data model

pub mod formula;
pub mod term;

pub use formula::{Atom, Formula};
pub use term::Term;
