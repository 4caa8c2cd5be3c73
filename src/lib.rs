//! Synthesize the Boolean logic of finite state machines.
//!
//! A [finite automaton](Automaton) is a set of states connected by transitions labeled with input
//! symbols. Symbols, state outputs and state codes are all [bit-vectors](BitVector): unsigned integers
//! with an explicit width. Each state emits an output (Moore machine) and a deterministic automaton
//! has exactly one successor for each state and symbol.
//!
//! The synthesis of an automaton into combinational logic goes through several steps:
//! * Each state receives a binary code of minimal width, in lexicographic order of the state ids ([StateEncoding]).
//! * Each transition gives a row of the [truth table](TruthTable), relating the input and current state code
//!   to the output and the next state code.
//! * For each bit of the output and of the next state, the set of minterms (state code followed by input
//!   symbol) where this bit is true is extracted ([MintermSets]).
//! * Finally each of these bit-lines is written as a canonical sum of products ([Equation]).
//!
//! ```
//! use fsmkit::{Automaton, BitVector};
//! # use fsmkit::FsmError;
//! # fn main() -> Result<(), FsmError> {
//!
//! let zero = BitVector::new(0, 1)?;
//! let one = BitVector::new(1, 1)?;
//!
//! // A detector of the sequence "11"
//! let mut fa = Automaton::dfa([zero, one])?;
//! fa.add_state("idle", zero)?;
//! fa.add_state("seen", zero)?;
//! fa.add_state("found", one)?;
//! fa.connect("idle", zero, "idle")?;
//! fa.connect("idle", one, "seen")?;
//! fa.connect("seen", zero, "idle")?;
//! fa.connect("seen", one, "found")?;
//! fa.connect("found", zero, "idle")?;
//! fa.connect("found", one, "found")?;
//!
//! // Complete and deterministic
//! assert!(fa.validate().is_none());
//!
//! // found=00, idle=01, seen=10
//! let table = fa.truth_table()?;
//! assert_eq!(table.code_width(), 2);
//! assert_eq!(table.len(), 6);
//! # Ok(())
//! # }
//! ```
//!
//! # Canonical expressions
//!
//! The equations are not minimized: they list one product term for each minterm of a bit-line.
//! Next-state bits are labeled ```b<N>``` and output bits ```i<N>```. In product terms, the state
//! variables are named ```b<N>``` (the leftmost bit being the highest one) and the input variables
//! ```i<N>``` (numbered from the left), a negated variable is followed by ```'```.
//!
//! ```
//! use fsmkit::{Automaton, BitVector, Synthesis, SynthesisConfig};
//! # use fsmkit::FsmError;
//! # fn main() -> Result<(), FsmError> {
//!
//! let zero = BitVector::new(0, 1)?;
//! let one = BitVector::new(1, 1)?;
//!
//! // Toggle the state on each 1
//! let mut fa = Automaton::dfa([zero, one])?;
//! fa.add_state("off", zero)?;
//! fa.add_state("on", one)?;
//! fa.connect("off", zero, "off")?;
//! fa.connect("off", one, "on")?;
//! fa.connect("on", zero, "on")?;
//! fa.connect("on", one, "off")?;
//!
//! // off=0, on=1
//! let synthesis = Synthesis::run(&fa, &SynthesisConfig::default())?;
//! assert_eq!(
//!     synthesis.expressions(),
//!     vec!["b0 = b0'i0 + b0i0'", "i0 = b0i0' + b0i0"]
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Transition grids
//!
//! Automata drawn in an editor are usually exported as a transition table, which can be loaded with
//! [grid::automaton_from_grid].

mod automaton;
mod bitvec;
pub mod efmt;
mod encoding;
mod equation;
mod error;
pub mod grid;
mod implicants;
mod minterm;
mod pattern;
mod rules;
mod structmap;
mod synthesis;
mod truth_table;
mod validate;
mod variable;

// Export public structures and API
pub use automaton::{Automaton, AutomatonKind, LabelCounter, State, StateIndex};
pub use bitvec::{BitVector, MAX_WIDTH};
pub use encoding::{code_width, StateEncoding};
pub use equation::{canonical_expressions, format_canonical_expressions, BitLine, Equation};
pub use error::FsmError;
pub use implicants::Implicants;
pub use minterm::{MintermSet, MintermSets};
pub use pattern::Pattern;
pub use rules::Rule;
pub use structmap::{Identity, StructMap};
pub use synthesis::{Synthesis, SynthesisConfig};
pub use truth_table::{Row, TruthTable};
pub use validate::{validate, ValidationError, ValidationReport};
pub use variable::{Signal, SignalNames, Variable};

impl Automaton {
    /// Build the truth table of this automaton, see [TruthTable::generate]
    pub fn truth_table(&self) -> Result<TruthTable, FsmError> {
        TruthTable::generate(self)
    }

    /// Collect the minterms of each output and next-state bit
    pub fn minterm_sets(&self) -> Result<MintermSets, FsmError> {
        self.truth_table()?.minterms()
    }

    /// Render the canonical equations of all bit-lines
    pub fn canonical_expressions(&self) -> Result<Vec<String>, FsmError> {
        let table = self.truth_table()?;
        Ok(format_canonical_expressions(
            &table.minterms()?,
            table.code_width(),
        ))
    }
}
