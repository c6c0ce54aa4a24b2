//! Conversion from first-order formulas to conjunctive normal form
//!
//! Six stages run in a fixed order, each consuming the previous stage's tree:
//!
//! 1. eliminate `→` and `↔`
//! 2. negation normal form
//! 3. standardize variables apart
//! 4. Skolemize
//! 5. drop universal quantifiers
//! 6. distribute `∨` over `∧`

pub mod clause;
pub mod distribute;
pub mod implications;
pub mod negation;
pub mod quantifiers;
pub mod skolemize;
pub mod standardize;


pub use clause::{Clause, ClauseSet, Literal};
pub use distribute::distribute;
pub use quantifiers::strip_universals;
pub use skolemize::skolemize;
pub use standardize::standardize_variables;

use crate::config::ConversionConfig;
use crate::error::Result;
use crate::logic::Formula;
use crate::names::NameSupply;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipeline stage, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    EliminateImplications,
    NegationNormalForm,
    StandardizeVariables,
    Skolemize,
    StripUniversals,
    Distribute,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::EliminateImplications,
        Stage::NegationNormalForm,
        Stage::StandardizeVariables,
        Stage::Skolemize,
        Stage::StripUniversals,
        Stage::Distribute,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::EliminateImplications => "implication elimination",
            Stage::NegationNormalForm => "negation normal form",
            Stage::StandardizeVariables => "variable standardization",
            Stage::Skolemize => "skolemization",
            Stage::StripUniversals => "quantifier stripping",
            Stage::Distribute => "distribution",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Output of every stage of one conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionTrace {
    pub input: Formula,
    pub implication_free: Formula,
    pub nnf: Formula,
    pub standardized: Formula,
    pub skolemized: Formula,
    pub matrix: Formula,
    pub cnf: Formula,
}

impl ConversionTrace {
    pub fn stages(&self) -> [(Stage, &Formula); 6] {
        [
            (Stage::EliminateImplications, &self.implication_free),
            (Stage::NegationNormalForm, &self.nnf),
            (Stage::StandardizeVariables, &self.standardized),
            (Stage::Skolemize, &self.skolemized),
            (Stage::StripUniversals, &self.matrix),
            (Stage::Distribute, &self.cnf),
        ]
    }
}

/// Convert a formula to CNF with default settings.
///
/// Each call uses its own name supply, so generated names restart at `X1`
/// and `SK1`.
pub fn to_cnf(formula: Formula) -> Result<Formula> {
    Converter::new().convert(formula)
}

/// Convert a formula to CNF and split it into clauses
pub fn clausify(formula: Formula) -> Result<ClauseSet> {
    Converter::new().clausify(formula)
}

/// Drives the six stages and owns the fresh-name counters.
///
/// Counters persist across calls on the same converter, so formulas converted
/// by one converter never share generated names.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConversionConfig,
    names: NameSupply,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ConversionConfig) -> Self {
        let names = NameSupply::new(&config);
        Converter { config, names }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn names(&self) -> &NameSupply {
        &self.names
    }

    pub fn convert(&mut self, formula: Formula) -> Result<Formula> {
        let _span = tracing::debug_span!("to_cnf").entered();
        self.reserve_input_names(&formula);

        let f = formula.eliminate_implications();
        log_stage(Stage::EliminateImplications, &f);
        let f = f.to_nnf()?;
        log_stage(Stage::NegationNormalForm, &f);
        let f = standardize_variables(f, &mut self.names);
        log_stage(Stage::StandardizeVariables, &f);
        let f = skolemize(f, &mut self.names)?;
        log_stage(Stage::Skolemize, &f);
        let f = strip_universals(f)?;
        log_stage(Stage::StripUniversals, &f);
        let f = distribute(f)?;
        log_stage(Stage::Distribute, &f);
        Ok(f)
    }

    /// Like [`Converter::convert`], keeping every intermediate formula
    pub fn convert_traced(&mut self, formula: Formula) -> Result<ConversionTrace> {
        let _span = tracing::debug_span!("to_cnf", traced = true).entered();
        self.reserve_input_names(&formula);

        let implication_free = formula.clone().eliminate_implications();
        let nnf = implication_free.clone().to_nnf()?;
        let standardized = standardize_variables(nnf.clone(), &mut self.names);
        let skolemized = skolemize(standardized.clone(), &mut self.names)?;
        let matrix = strip_universals(skolemized.clone())?;
        let cnf = distribute(matrix.clone())?;

        let trace = ConversionTrace {
            input: formula,
            implication_free,
            nnf,
            standardized,
            skolemized,
            matrix,
            cnf,
        };
        for (stage, f) in trace.stages() {
            log_stage(stage, f);
        }
        Ok(trace)
    }

    pub fn clausify(&mut self, formula: Formula) -> Result<ClauseSet> {
        ClauseSet::from_formula(self.convert(formula)?)
    }

    fn reserve_input_names(&mut self, formula: &Formula) {
        if self.config.avoid_input_names {
            self.names.reserve_all(formula.symbols());
        }
    }
}

fn log_stage(stage: Stage, formula: &Formula) {
    tracing::debug!(%stage, size = formula.size(), "stage complete");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::Term;

    /// ∀x (P(x) → ∃y Q(y,x))
    fn example_formula() -> Formula {
        Formula::forall(
            "x",
            Formula::implies(
                Formula::atom("P", vec![Term::var("x")]),
                Formula::exists("y", Formula::atom("Q", vec![Term::var("y"), Term::var("x")])),
            ),
        )
    }

    #[test]
    fn test_single_clause_example() {
        let trace = Converter::new().convert_traced(example_formula()).unwrap();
        assert_eq!(trace.implication_free.to_string(), "∀x.(¬P(x) ∨ ∃y.Q(y,x))");
        assert_eq!(trace.standardized.to_string(), "∀X1.(¬P(X1) ∨ ∃X2.Q(X2,X1))");
        assert_eq!(trace.skolemized.to_string(), "∀X1.(¬P(X1) ∨ Q(SK1(X1),X1))");
        assert_eq!(trace.cnf.to_string(), "(¬P(X1) ∨ Q(SK1(X1),X1))");
        assert_eq!(trace.matrix, trace.cnf);
    }

    #[test]
    fn test_reused_existential_name_example() {
        // ∃x P(x) ∧ ∃x Q(x)
        let formula = Formula::and(
            Formula::exists("x", Formula::atom("P", vec![Term::var("x")])),
            Formula::exists("x", Formula::atom("Q", vec![Term::var("x")])),
        );
        let trace = Converter::new().convert_traced(formula).unwrap();
        assert_eq!(trace.standardized.to_string(), "(∃X1.P(X1) ∧ ∃X2.Q(X2))");
        assert_eq!(trace.cnf.to_string(), "(P(SK1) ∧ Q(SK2))");
    }

    #[test]
    fn test_convert_matches_traced_result() {
        let plain = to_cnf(example_formula()).unwrap();
        let traced = Converter::new().convert_traced(example_formula()).unwrap();
        assert_eq!(plain, traced.cnf);
    }

    #[test]
    fn test_converter_counters_persist_across_calls() {
        let mut converter = Converter::new();
        let first = converter.convert(example_formula()).unwrap();
        let second = converter.convert(example_formula()).unwrap();
        assert_eq!(first.to_string(), "(¬P(X1) ∨ Q(SK1(X1),X1))");
        assert_eq!(second.to_string(), "(¬P(X3) ∨ Q(SK2(X3),X3))");
    }

    #[test]
    fn test_input_names_are_avoided() {
        // ∀x P(x, X1, SK1) ∧ ∃y Q(y)
        let formula = Formula::and(
            Formula::forall(
                "x",
                Formula::atom("P", vec![Term::var("x"), Term::var("X1"), Term::constant("SK1")]),
            ),
            Formula::exists("y", Formula::atom("Q", vec![Term::var("y")])),
        );
        let cnf = to_cnf(formula).unwrap();
        assert_eq!(cnf.to_string(), "(P(X2,X1,SK1) ∧ Q(SK2))");
    }

    #[test]
    fn test_custom_prefixes() {
        let config = ConversionConfig {
            variable_prefix: "V".to_string(),
            skolem_prefix: "f".to_string(),
            first_index: 0,
            avoid_input_names: true,
        };
        let cnf = Converter::with_config(config).convert(example_formula()).unwrap();
        assert_eq!(cnf.to_string(), "(¬P(V0) ∨ Q(f0(V0),V0))");
    }

    #[test]
    fn test_biconditional_with_quantifier() {
        // ∀x (P(x) ↔ ∃y R(x,y))
        let formula = Formula::forall(
            "x",
            Formula::iff(
                Formula::atom("P", vec![Term::var("x")]),
                Formula::exists("y", Formula::atom("R", vec![Term::var("x"), Term::var("y")])),
            ),
        );
        let clauses = clausify(formula).unwrap();
        // (¬P(x) ∨ ∃y R(x,y)) ∧ (∀y ¬R(x,y) ∨ P(x))
        assert_eq!(clauses.to_string(), "¬P(X1) ∨ R(X1,SK1(X1))\n¬R(X1,X3) ∨ P(X1)\n");
    }

    #[test]
    fn test_deep_negation_chain_does_not_overflow() {
        // ∀x ¬¬…¬(P(x) → ∃y Q(y,x)) with an even number of negations
        let mut body = example_formula();
        for _ in 0..100_000 {
            body = Formula::not(body);
        }
        let cnf = to_cnf(body).unwrap();
        assert_eq!(cnf.to_string(), "(¬P(X1) ∨ Q(SK1(X1),X1))");
    }

    #[test]
    fn test_deep_negated_implication_does_not_overflow() {
        let mut formula = Formula::implies(Formula::prop("A"), Formula::prop("B"));
        for _ in 0..100_001 {
            formula = Formula::not(formula);
        }
        let cnf = to_cnf(formula).unwrap();
        assert_eq!(cnf.to_string(), "(A ∧ ¬B)");
        assert_eq!(cnf.size(), 4);
    }

    #[test]
    fn test_converter_exposes_config_and_reserved_names() {
        let config = ConversionConfig {
            variable_prefix: "V".to_string(),
            ..ConversionConfig::default()
        };
        let mut converter = Converter::with_config(config);
        converter.convert(example_formula()).unwrap();
        assert_eq!(converter.config().variable_prefix, "V");
        assert!(converter.names().is_used("P"));
        assert!(converter.names().is_used("V1"));
        assert!(converter.names().is_used("SK1"));
        assert!(!converter.names().is_used("V3"));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Skolemize.to_string(), "skolemization");
        assert_eq!(Stage::ALL.len(), 6);
    }
}
