//! Error types for clausify

use crate::cnf::Stage;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClausifyError {
    /// A stage received a node that an earlier stage is responsible for removing
    #[error("{stage} received an unexpected {connective}")]
    UnexpectedConnective {
        stage: Stage,
        connective: &'static str,
    },

    #[error("{stage} requires negation normal form, found a negated {connective}")]
    NegatedCompound {
        stage: Stage,
        connective: &'static str,
    },

    #[error("{connective} cannot appear inside a clause")]
    NotCnf { connective: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClausifyError>;
