//! Canonical sum-of-products equations for each bit-line

use crate::efmt::{FormatterConfig, DEFAULT_FMT_CFG};
use crate::minterm::MintermSets;
use crate::*;

use std::fmt;
use tracing::trace;

/// A bit-line driven by an equation.
///
/// The number is the index in the list of minterm sets, where 0 is the most significant bit.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BitLine {
    NextState(u32),
    Output(u32),
}

impl BitLine {
    /// The label on the left-hand side of the equation.
    ///
    /// Next-state lines are labeled as state bits. Output lines reuse the input label ```i<N>```
    /// rather than the output one.
    pub fn label(&self) -> Signal {
        match self {
            BitLine::NextState(n) => Signal::StateBit(*n),
            BitLine::Output(n) => Signal::Input(*n),
        }
    }
}

/// A canonical equation ```label = term + term + ...```, with one product term per minterm.
///
/// A bit-line without minterm is always false and has an empty right-hand side.
#[derive(Clone, Debug)]
pub struct Equation {
    line: BitLine,
    names: SignalNames,
    terms: Implicants,
}

impl Equation {
    pub fn new(line: BitLine, names: SignalNames, terms: Implicants) -> Self {
        Self { line, names, terms }
    }

    pub fn line(&self) -> BitLine {
        self.line
    }

    pub fn terms(&self) -> &Implicants {
        &self.terms
    }

    /// Evaluate the right-hand side on a minterm
    pub fn eval(&self, minterm: &BitVector) -> bool {
        self.terms.eval(minterm)
    }

    /// Render the equation with specific operators
    pub fn format_with(&self, cfg: &FormatterConfig) -> String {
        format!(
            "{} = {}",
            self.line.label(),
            cfg.named(&self.terms, &self.names)
        )
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with(&DEFAULT_FMT_CFG))
    }
}

/// Build the canonical equations of all bit-lines.
///
/// Next-state equations come first, then output equations, each group in descending bit-line order.
pub fn canonical_expressions(minterms: &MintermSets, code_width: u32) -> Vec<Equation> {
    let names = SignalNames::new(code_width);
    let next_states = minterms.next_states().iter().enumerate().rev().map(|(n, set)| {
        Equation::new(BitLine::NextState(n as u32), names, Implicants::from_minterms(set))
    });
    let outputs = minterms.outputs().iter().enumerate().rev().map(|(n, set)| {
        Equation::new(BitLine::Output(n as u32), names, Implicants::from_minterms(set))
    });
    let equations: Vec<Equation> = next_states.chain(outputs).collect();
    trace!(count = equations.len(), "built canonical equations");
    equations
}

/// Render the canonical equations of all bit-lines in the default notation
pub fn format_canonical_expressions(minterms: &MintermSets, code_width: u32) -> Vec<String> {
    canonical_expressions(minterms, code_width)
        .iter()
        .map(|e| e.to_string())
        .collect()
}
