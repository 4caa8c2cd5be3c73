//! Expansion of an automaton into a combinational truth table

use crate::minterm::MintermSets;
use crate::*;

use std::fmt;
use tabled::settings::Style;
use tracing::debug;

/// A row of the truth table: the output and next state for a given state and input
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Row {
    pub input: BitVector,
    pub state: BitVector,
    pub output: BitVector,
    pub next_state: BitVector,
}

/// Truth table relating encoded state and input to output and encoded next state.
///
/// Each transition edge gives one row, a nondeterministic branch thus yields several rows
/// with the same input and state. States are visited in the order of their codes, then
/// their transitions in insertion order and finally the successors in insertion order.
#[derive(Clone, Debug)]
pub struct TruthTable {
    encoding: StateEncoding,
    rows: Vec<Row>,
}

impl TruthTable {
    pub fn generate(automaton: &Automaton) -> Result<Self, FsmError> {
        let encoding = StateEncoding::new(automaton)?;
        let mut rows = vec![];
        for (idx, code) in encoding.iter() {
            let state = automaton.state(idx)?;
            for (input, successors) in state.transitions().iter() {
                for next in successors {
                    rows.push(Row {
                        input: *input,
                        state: code,
                        output: state.output(),
                        next_state: encoding.code(*next)?,
                    });
                }
            }
        }
        debug!(
            states = encoding.len(),
            code_width = encoding.width(),
            rows = rows.len(),
            "generated truth table"
        );
        Ok(Self { encoding, rows })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The state assignment used to build this table
    pub fn encoding(&self) -> &StateEncoding {
        &self.encoding
    }

    /// Width of the state codes
    pub fn code_width(&self) -> u32 {
        self.encoding.width()
    }

    /// Collect the minterms of each output and next-state bit
    pub fn minterms(&self) -> Result<MintermSets, FsmError> {
        MintermSets::from_rows(&self.rows)
    }
}

/// Push the bits of a value, most significant first
fn push_bits(row: &mut Vec<String>, value: &BitVector) {
    row.extend(value.iter_msb_first().map(|b| if b { "1" } else { "0" }.to_string()));
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = tabled::builder::Builder::default();
        let names = SignalNames::new(self.code_width());
        if let Some(first) = self.rows.first() {
            let code = self.code_width();
            let mut header = vec![];
            header.extend((0..code).rev().map(|n| Signal::StateBit(n).to_string()));
            header.extend((0..first.input.width()).map(|n| Signal::Input(n).to_string()));
            header.extend((0..code).rev().map(|n| format!("{}+", Signal::StateBit(n))));
            header.extend((0..first.output.width()).rev().map(|n| names.output(n).to_string()));
            builder.push_record(header);
        }
        for row in &self.rows {
            let mut record = vec![];
            push_bits(&mut record, &row.state);
            push_bits(&mut record, &row.input);
            push_bits(&mut record, &row.next_state);
            push_bits(&mut record, &row.output);
            builder.push_record(record);
        }
        write!(f, "{}", builder.build().with(Style::ascii()))
    }
}
