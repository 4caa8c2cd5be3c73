//! Binary state assignment

use crate::*;

use std::collections::HashMap;
use tracing::trace;

/// Number of bits needed to give a distinct code to each state.
///
/// This is ```1 + floor(log2(n - 1))``` for two states or more.
/// A single state (or an empty automaton) still uses one bit, with the code 0.
pub fn code_width(state_count: usize) -> u32 {
    match state_count {
        0 | 1 => 1,
        n => 1 + (n - 1).ilog2(),
    }
}

/// A bijection between the states of an automaton and binary codes of minimal width.
///
/// States are sorted by id (in lexicographic order) and receive successive codes starting at 0.
/// Building the encoding does not change the automaton.
#[derive(Clone, Debug)]
pub struct StateEncoding {
    width: u32,
    order: Vec<StateIndex>,
    codes: HashMap<StateIndex, BitVector>,
}

impl StateEncoding {
    pub fn new(automaton: &Automaton) -> Result<Self, FsmError> {
        let width = code_width(automaton.len());
        let order = automaton.sorted_indices();
        let mut codes = HashMap::with_capacity(order.len());
        for (code, idx) in order.iter().enumerate() {
            let code = BitVector::new(code as u64, width)?;
            trace!(state = automaton.state(*idx)?.id(), %code, "assign state code");
            codes.insert(*idx, code);
        }
        Ok(Self {
            width,
            order,
            codes,
        })
    }

    /// Width of all state codes
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the number of encoded states
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Get the code of a state
    pub fn code(&self, idx: StateIndex) -> Result<BitVector, FsmError> {
        self.codes
            .get(&idx)
            .copied()
            .ok_or(FsmError::UnknownStateIndex(idx))
    }

    /// Iterate over states and their codes, in increasing code order
    pub fn iter(&self) -> impl Iterator<Item = (StateIndex, BitVector)> + '_ {
        self.order.iter().map(move |idx| (*idx, self.codes[idx]))
    }

    /// States in the order of their codes
    pub fn order(&self) -> &[StateIndex] {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use std::collections::HashSet;

    #[test]
    fn widths() {
        assert_eq!(code_width(0), 1);
        assert_eq!(code_width(1), 1);
        assert_eq!(code_width(2), 1);
        assert_eq!(code_width(3), 2);
        assert_eq!(code_width(4), 2);
        assert_eq!(code_width(5), 3);
        assert_eq!(code_width(8), 3);
        assert_eq!(code_width(9), 4);
        assert_eq!(code_width(1024), 10);
        assert_eq!(code_width(1025), 11);
    }

    #[test]
    fn sorted_assignment() -> Result<(), FsmError> {
        let out = BitVector::zero(1)?;
        let mut fa = Automaton::dfa([])?;
        let ids = ["delta", "alpha", "charlie", "bravo", "echo"];
        for id in ids {
            fa.add_state(id, out)?;
        }

        let encoding = StateEncoding::new(&fa)?;
        assert_eq!(encoding.width(), 3);
        assert_eq!(encoding.len(), ids.len());

        let assigned: Vec<(String, String)> = encoding
            .iter()
            .map(|(idx, code)| (fa.state(idx).unwrap().id().to_string(), code.to_string()))
            .collect();
        let expected: Vec<(String, String)> = [
            ("alpha", "000"),
            ("bravo", "001"),
            ("charlie", "010"),
            ("delta", "011"),
            ("echo", "100"),
        ]
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect();
        assert_eq!(assigned, expected);

        // The automaton keeps its insertion order
        let first = fa.states().next().map(|(_, s)| s.id().to_string());
        assert_eq!(first.as_deref(), Some("delta"));
        Ok(())
    }

    #[test]
    fn bijection() -> Result<(), FsmError> {
        for n in 2..40 {
            let mut fa = Automaton::nfa([])?;
            for _ in 0..n {
                fa.add_generated_state(BitVector::zero(1)?)?;
            }
            let encoding = StateEncoding::new(&fa)?;
            let codes: HashSet<BitVector> = encoding.iter().map(|(_, c)| c).collect();
            assert_eq!(codes.len(), n);
            assert!(codes.iter().all(|c| c.width() == code_width(n)));
            assert!(codes.iter().all(|c| c.magnitude() < n as u64));
        }
        Ok(())
    }

    #[test]
    fn single_state() -> Result<(), FsmError> {
        let mut fa = Automaton::dfa([])?;
        let only = fa.add_state("only", BitVector::zero(2)?)?;
        let encoding = StateEncoding::new(&fa)?;
        assert_eq!(encoding.code(only)?.to_string(), "0");
        assert!(encoding.code(only + 1).is_err());
        Ok(())
    }
}
