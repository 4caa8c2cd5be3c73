use crate::validate::ValidationReport;
use crate::BitVector;
use thiserror::Error;

/// Errors raised while building automata or synthesizing their logic.
///
/// Validator findings are not errors by themselves: they are collected in a [ValidationReport]
/// and only become [FsmError::Invalid] when a synthesis run uses validation as a gate.
#[derive(Error, Debug)]
pub enum FsmError {
    /// No state carries this id
    #[error("no state with id '{0}' found")]
    UnknownState(String),

    /// No state lives at this index of the automaton
    #[error("no state at index {0}")]
    UnknownStateIndex(usize),

    /// Two states can not share the same id
    #[error("a state with id '{0}' already exists")]
    DuplicateState(String),

    /// The state has no entry at all for this input
    #[error("no transition found from {state} with input {input}")]
    NoTransition { state: String, input: BitVector },

    /// A deterministic step found zero or several successors
    #[error("expected a single transition from {state} with input {input}, found {count}")]
    AmbiguousOrMissingTransition {
        state: String,
        input: BitVector,
        count: usize,
    },

    /// The magnitude needs more bits than the requested width
    #[error("value {magnitude} does not fit in {width} bits")]
    MagnitudeOverflow { magnitude: u64, width: u32 },

    /// Concatenation needs at least one operand
    #[error("can not concatenate an empty list of bit-vectors")]
    EmptyConcat,

    /// Widths must be in 1..=64
    #[error("the bit width {0} is outside of the supported range 1..=64")]
    InvalidWidth(u32),

    /// The text is not a sequence of 0 and 1
    #[error("'{0}' is not a valid binary string")]
    InvalidBinaryString(String),

    /// A value does not share the width of its peers
    #[error("the {what} has width {found}, expected {expected}")]
    WidthMismatch {
        what: &'static str,
        expected: u32,
        found: u32,
    },

    /// The transition grid can not be turned into an automaton
    #[error("invalid transition grid: {0}")]
    InvalidGrid(String),

    /// The automaton was rejected by the validator
    #[error("{0}")]
    Invalid(ValidationReport),
}
