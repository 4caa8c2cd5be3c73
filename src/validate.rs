//! Well-formedness checks for deterministic automata

use crate::*;

use itertools::Itertools;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// A single defect found in a DFA
#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum ValidationError {
    /// The state has no transition for this symbol
    #[error("DFA error: state {state} does not define a transition for input {symbol}")]
    Incomplete { state: String, symbol: BitVector },

    /// The state does not have exactly one successor for this symbol
    #[error(
        "DFA error: state {state} defines more than one transition for input {symbol}: {}",
        .successors.join(", ")
    )]
    Nondeterministic {
        state: String,
        symbol: BitVector,
        successors: Vec<String>,
    },
}

/// All defects found in an automaton, in state then symbol order.
///
/// The report is displayed with one message per line.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.errors.iter().join("\n"))
    }
}

/// Check that a DFA is complete and deterministic.
///
/// Every state must have exactly one successor for every symbol of the alphabet.
/// All states and symbols are checked, and all problems are reported together.
/// A NFA is always valid.
///
/// Returns ```None``` if no problem was found.
pub fn validate(automaton: &Automaton) -> Option<ValidationReport> {
    let mut errors = vec![];
    if automaton.kind() == AutomatonKind::Dfa {
        for (_, state) in automaton.states() {
            for symbol in automaton.alphabet() {
                match state.transitions().get(symbol) {
                    None => errors.push(ValidationError::Incomplete {
                        state: state.id().into(),
                        symbol: *symbol,
                    }),
                    Some(next) if next.len() != 1 => {
                        let successors = next
                            .iter()
                            .map(|idx| match automaton.state(*idx) {
                                Ok(s) => s.id().to_string(),
                                Err(_) => format!("#{}", idx),
                            })
                            .collect();
                        errors.push(ValidationError::Nondeterministic {
                            state: state.id().into(),
                            symbol: *symbol,
                            successors,
                        })
                    }
                    Some(_) => (),
                }
            }
        }
    }

    if errors.is_empty() {
        return None;
    }
    debug!(count = errors.len(), "validation found problems");
    Some(ValidationReport { errors })
}
