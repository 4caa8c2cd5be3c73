//! State graphs of finite automata with bit-vector symbols and outputs

use crate::validate::{self, ValidationReport};
use crate::*;

use itertools::Itertools;
use slab::Slab;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;
use tabled::settings::Style;

/// Index of a state in the arena of its automaton
pub type StateIndex = usize;

/// Deterministic automata are subject to validation, nondeterministic ones are always valid
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum AutomatonKind {
    Dfa,
    Nfa,
}

impl fmt::Display for AutomatonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutomatonKind::Dfa => write!(f, "DFA"),
            AutomatonKind::Nfa => write!(f, "NFA"),
        }
    }
}

impl FromStr for AutomatonKind {
    type Err = FsmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DFA" => Ok(AutomatonKind::Dfa),
            "NFA" => Ok(AutomatonKind::Nfa),
            _ => Err(FsmError::InvalidGrid(format!("unknown automaton kind '{}'", s))),
        }
    }
}

/// A state with its output and its outgoing transitions.
///
/// Transitions map an input symbol to the ordered list of successors.
/// A missing symbol means that there is no transition, a single successor is a deterministic edge
/// and several successors denote a nondeterministic branch.
#[derive(Clone, Debug)]
pub struct State {
    id: String,
    output: BitVector,
    transitions: StructMap<BitVector, Vec<StateIndex>>,
}

impl State {
    fn new(id: String, output: BitVector) -> Self {
        Self {
            id,
            output,
            transitions: StructMap::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn output(&self) -> BitVector {
        self.output
    }

    pub fn transitions(&self) -> &StructMap<BitVector, Vec<StateIndex>> {
        &self.transitions
    }

    /// Retrieve all successors for a symbol.
    ///
    /// Fails if the symbol has no entry at all in the transitions of this state.
    pub fn next_states(&self, input: &BitVector) -> Result<&[StateIndex], FsmError> {
        self.transitions
            .get(input)
            .map(|v| v.as_slice())
            .ok_or_else(|| FsmError::NoTransition {
                state: self.id.clone(),
                input: *input,
            })
    }

    /// Retrieve the unique successor for a symbol.
    ///
    /// Fails unless there is exactly one successor.
    pub fn next_state(&self, input: &BitVector) -> Result<StateIndex, FsmError> {
        let count = self.transitions.get(input).map(|v| v.len()).unwrap_or(0);
        match self.transitions.get(input).map(|v| v.as_slice()) {
            Some([next]) => Ok(*next),
            _ => Err(FsmError::AmbiguousOrMissingTransition {
                state: self.id.clone(),
                input: *input,
                count,
            }),
        }
    }

    /// Append a successor, the same edge can be added twice
    fn add_connection(&mut self, input: BitVector, next: StateIndex) {
        self.transitions
            .get_or_insert_with(input, Vec::new)
            .push(next);
    }
}

/// Generate default state labels: A, B, ..., Z, BA, BB, ...
///
/// Each digit is a letter, A standing for zero.
#[derive(Clone, Default, Debug)]
pub struct LabelCounter {
    next: usize,
}

impl LabelCounter {
    /// Start the labels from a given value
    pub fn starting_at(next: usize) -> Self {
        Self { next }
    }

    pub fn next_label(&mut self) -> String {
        let label = Self::label(self.next);
        self.next += 1;
        label
    }

    /// The label associated to a given value
    pub fn label(mut n: usize) -> String {
        let mut letters = vec![];
        loop {
            letters.push((b'A' + (n % 26) as u8) as char);
            n /= 26;
            if n == 0 {
                break;
            }
        }
        letters.iter().rev().collect()
    }
}

/// A finite automaton over bit-vector symbols, whose states emit bit-vector outputs.
///
/// States are stored in an arena and refer to their successors by index, allowing cycles.
/// They are identified by a unique textual id. All alphabet symbols share the same width,
/// and so do all state outputs.
///
/// ```
/// use fsmkit::{Automaton, BitVector};
/// # use fsmkit::FsmError;
/// # fn main() -> Result<(), FsmError> {
///
/// let zero = BitVector::new(0, 1)?;
/// let one = BitVector::new(1, 1)?;
///
/// let mut fa = Automaton::dfa([zero, one])?;
/// let even = fa.add_state("even", zero)?;
/// let odd = fa.add_state("odd", one)?;
/// fa.add_connection(even, zero, even)?;
/// fa.add_connection(even, one, odd)?;
/// fa.add_connection(odd, zero, odd)?;
/// fa.add_connection(odd, one, even)?;
///
/// assert!(fa.validate().is_none());
/// let trace = fa.run(even, &[one, zero, one, one])?;
/// assert_eq!(trace, vec![even, odd, odd, even, odd]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Automaton {
    kind: AutomatonKind,
    alphabet: BTreeSet<BitVector>,
    states: Slab<State>,
    by_id: HashMap<String, StateIndex>,
    labels: LabelCounter,
}

impl Automaton {
    /// Create an automaton without states.
    ///
    /// Returns an error if the symbols do not share the same width.
    pub fn new(
        kind: AutomatonKind,
        alphabet: impl IntoIterator<Item = BitVector>,
    ) -> Result<Self, FsmError> {
        let alphabet: BTreeSet<BitVector> = alphabet.into_iter().collect();
        if let (Some(first), Some(last)) = (alphabet.first(), alphabet.last()) {
            // The set is ordered by width first
            if first.width() != last.width() {
                return Err(FsmError::WidthMismatch {
                    what: "alphabet symbol",
                    expected: first.width(),
                    found: last.width(),
                });
            }
        }
        Ok(Self {
            kind,
            alphabet,
            states: Slab::new(),
            by_id: HashMap::new(),
            labels: LabelCounter::default(),
        })
    }

    pub fn dfa(alphabet: impl IntoIterator<Item = BitVector>) -> Result<Self, FsmError> {
        Self::new(AutomatonKind::Dfa, alphabet)
    }

    pub fn nfa(alphabet: impl IntoIterator<Item = BitVector>) -> Result<Self, FsmError> {
        Self::new(AutomatonKind::Nfa, alphabet)
    }

    pub fn kind(&self) -> AutomatonKind {
        self.kind
    }

    /// The alphabet, ordered by increasing symbol value
    pub fn alphabet(&self) -> &BTreeSet<BitVector> {
        &self.alphabet
    }

    /// Width shared by all symbols, if the alphabet is not empty
    pub fn symbol_width(&self) -> Option<u32> {
        self.alphabet.first().map(|s| s.width())
    }

    /// Width shared by all outputs, if there is at least one state
    pub fn output_width(&self) -> Option<u32> {
        self.states.iter().next().map(|(_, s)| s.output.width())
    }

    /// Get the number of states
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Return whether there are no states
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Add a new state.
    ///
    /// Returns an error if the id is already used or if the width of the output differs from
    /// the outputs of existing states.
    pub fn add_state(
        &mut self,
        id: impl Into<String>,
        output: BitVector,
    ) -> Result<StateIndex, FsmError> {
        let id = id.into();
        if self.by_id.contains_key(&id) {
            return Err(FsmError::DuplicateState(id));
        }
        if let Some(expected) = self.output_width() {
            if expected != output.width() {
                return Err(FsmError::WidthMismatch {
                    what: "state output",
                    expected,
                    found: output.width(),
                });
            }
        }
        let idx = self.states.insert(State::new(id.clone(), output));
        self.by_id.insert(id, idx);
        Ok(idx)
    }

    /// Add a new state with the next free generated label
    pub fn add_generated_state(&mut self, output: BitVector) -> Result<StateIndex, FsmError> {
        let mut label = self.labels.next_label();
        while self.by_id.contains_key(&label) {
            label = self.labels.next_label();
        }
        self.add_state(label, output)
    }

    pub fn state(&self, idx: StateIndex) -> Result<&State, FsmError> {
        self.states.get(idx).ok_or(FsmError::UnknownStateIndex(idx))
    }

    /// Search a state by id
    pub fn get_state(&self, id: &str) -> Result<&State, FsmError> {
        self.index_of(id).map(|idx| &self.states[idx])
    }

    pub fn index_of(&self, id: &str) -> Result<StateIndex, FsmError> {
        self.by_id
            .get(id)
            .copied()
            .ok_or_else(|| FsmError::UnknownState(id.into()))
    }

    /// Iterate over the states in insertion order
    pub fn states(&self) -> impl Iterator<Item = (StateIndex, &State)> {
        self.states.iter()
    }

    /// List the state indices in ascending lexicographic order of their ids.
    ///
    /// The automaton itself is not reordered.
    pub fn sorted_indices(&self) -> Vec<StateIndex> {
        self.states
            .iter()
            .sorted_by(|(_, a), (_, b)| a.id.cmp(&b.id))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Add a transition from one state to another.
    ///
    /// Adding a second successor for the same symbol creates a nondeterministic branch,
    /// adding the same edge twice duplicates it.
    pub fn add_connection(
        &mut self,
        from: StateIndex,
        input: BitVector,
        to: StateIndex,
    ) -> Result<(), FsmError> {
        if let Some(expected) = self.symbol_width() {
            if expected != input.width() {
                return Err(FsmError::WidthMismatch {
                    what: "transition symbol",
                    expected,
                    found: input.width(),
                });
            }
        }
        if !self.states.contains(to) {
            return Err(FsmError::UnknownStateIndex(to));
        }
        self.states
            .get_mut(from)
            .ok_or(FsmError::UnknownStateIndex(from))?
            .add_connection(input, to);
        Ok(())
    }

    /// Add a transition between two states identified by their ids
    pub fn connect(&mut self, from: &str, input: BitVector, to: &str) -> Result<(), FsmError> {
        let from = self.index_of(from)?;
        let to = self.index_of(to)?;
        self.add_connection(from, input, to)
    }

    pub fn next_states(
        &self,
        from: StateIndex,
        input: &BitVector,
    ) -> Result<&[StateIndex], FsmError> {
        self.state(from)?.next_states(input)
    }

    pub fn next_state(&self, from: StateIndex, input: &BitVector) -> Result<StateIndex, FsmError> {
        self.state(from)?.next_state(input)
    }

    /// Execute a word deterministically from a start state.
    ///
    /// Returns all visited states, starting with the initial one.
    /// Fails on the first step which does not have exactly one successor.
    pub fn run<'a>(
        &self,
        start: StateIndex,
        word: impl IntoIterator<Item = &'a BitVector>,
    ) -> Result<Vec<StateIndex>, FsmError> {
        self.state(start)?;
        let mut trace = vec![start];
        let mut current = start;
        for symbol in word {
            current = self.next_state(current, symbol)?;
            trace.push(current);
        }
        Ok(trace)
    }

    /// Check the well-formedness of a DFA, see [validate::validate]
    pub fn validate(&self) -> Option<ValidationReport> {
        validate::validate(self)
    }

    /// Render the state transition table.
    ///
    /// Each row gives a state with its output and the successors for each symbol of the alphabet,
    /// ```-``` denoting a missing transition.
    pub fn transition_table(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State/Input".to_string())
                .chain(self.alphabet.iter().map(|s| s.to_string())),
        );
        for (_, state) in self.states() {
            let mut row = vec![format!("{}/{}", state.id, state.output)];
            for symbol in &self.alphabet {
                let cell = match state.transitions.get(symbol) {
                    Some(next) if !next.is_empty() => {
                        next.iter().map(|idx| &self.states[*idx].id).join(",")
                    }
                    _ => "-".to_string(),
                };
                row.push(cell);
            }
            builder.push_record(row);
        }
        builder.build().with(Style::ascii()).to_string()
    }
}
