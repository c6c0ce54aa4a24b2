//! Fresh-name supply for standardized variables and Skolem symbols

use crate::config::ConversionConfig;
use indexmap::IndexSet;

/// Two monotonically increasing counters plus the set of names already taken.
///
/// A name is never issued twice by the same supply, and never collides with a
/// reserved name. Callers reserve the symbols of the input before converting it.
#[derive(Debug, Clone)]
pub struct NameSupply {
    variable_prefix: String,
    skolem_prefix: String,
    next_variable: usize,
    next_skolem: usize,
    used: IndexSet<String>,
}

impl Default for NameSupply {
    fn default() -> Self {
        NameSupply::new(&ConversionConfig::default())
    }
}

impl NameSupply {
    pub fn new(config: &ConversionConfig) -> Self {
        NameSupply {
            variable_prefix: config.variable_prefix.clone(),
            skolem_prefix: config.skolem_prefix.clone(),
            next_variable: config.first_index,
            next_skolem: config.first_index,
            used: IndexSet::new(),
        }
    }

    pub fn reserve_all<I>(&mut self, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.used.extend(names);
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    pub fn fresh_variable(&mut self) -> String {
        Self::next_free(&mut self.used, &self.variable_prefix, &mut self.next_variable)
    }

    pub fn fresh_skolem(&mut self) -> String {
        Self::next_free(&mut self.used, &self.skolem_prefix, &mut self.next_skolem)
    }

    fn next_free(used: &mut IndexSet<String>, prefix: &str, counter: &mut usize) -> String {
        loop {
            let candidate = format!("{}{}", prefix, *counter);
            *counter += 1;
            if used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}
