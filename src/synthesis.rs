//! Full pipeline from an automaton to canonical equations

use crate::efmt::{FormatterConfig, DEFAULT_FMT_CFG};
use crate::equation::{self, Equation};
use crate::minterm::MintermSets;
use crate::*;

use tracing::{debug, warn};

/// Options of a synthesis run
#[derive(Clone, Debug)]
pub struct SynthesisConfig {
    /// Reject automata with validation problems
    pub validate: bool,
    /// Operators used to render the equations
    pub formatter: &'static FormatterConfig,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            validate: true,
            formatter: &DEFAULT_FMT_CFG,
        }
    }
}

impl SynthesisConfig {
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    pub fn with_formatter(mut self, formatter: &'static FormatterConfig) -> Self {
        self.formatter = formatter;
        self
    }
}

/// The result of all synthesis stages for a single automaton.
///
/// ```
/// use fsmkit::{Automaton, BitVector, Synthesis, SynthesisConfig};
/// # use fsmkit::FsmError;
/// # fn main() -> Result<(), FsmError> {
///
/// let zero = BitVector::new(0, 1)?;
/// let one = BitVector::new(1, 1)?;
/// let mut fa = Automaton::dfa([zero, one])?;
/// fa.add_state("A", zero)?;
/// fa.add_state("B", one)?;
/// for (from, input, to) in [("A", zero, "A"), ("A", one, "B"), ("B", zero, "A"), ("B", one, "B")] {
///     fa.connect(from, input, to)?;
/// }
///
/// let synthesis = Synthesis::run(&fa, &SynthesisConfig::default())?;
/// assert_eq!(synthesis.expressions(), vec!["b0 = b0'i0 + b0i0", "i0 = b0i0' + b0i0"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Synthesis {
    table: TruthTable,
    minterms: MintermSets,
    equations: Vec<Equation>,
    formatter: &'static FormatterConfig,
}

impl Synthesis {
    /// Run all stages: validation (if enabled), truth table, minterms and equations.
    ///
    /// Returns [FsmError::Invalid] if validation is enabled and the automaton is not a valid DFA.
    pub fn run(automaton: &Automaton, config: &SynthesisConfig) -> Result<Self, FsmError> {
        if config.validate {
            if let Some(report) = automaton.validate() {
                warn!(problems = report.len(), "refusing to synthesize an invalid automaton");
                return Err(FsmError::Invalid(report));
            }
        }
        let table = TruthTable::generate(automaton)?;
        let minterms = table.minterms()?;
        let equations = equation::canonical_expressions(&minterms, table.code_width());
        debug!(
            kind = %automaton.kind(),
            states = automaton.len(),
            equations = equations.len(),
            "synthesis complete"
        );
        Ok(Self {
            table,
            minterms,
            equations,
            formatter: config.formatter,
        })
    }

    pub fn truth_table(&self) -> &TruthTable {
        &self.table
    }

    pub fn encoding(&self) -> &StateEncoding {
        self.table.encoding()
    }

    pub fn minterms(&self) -> &MintermSets {
        &self.minterms
    }

    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    /// The equations rendered with the configured operators
    pub fn expressions(&self) -> Vec<String> {
        self.equations
            .iter()
            .map(|e| e.format_with(self.formatter))
            .collect()
    }
}
