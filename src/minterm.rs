//! Extraction of the minterms of each bit-line

use crate::truth_table::Row;
use crate::*;

use std::collections::btree_set;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// A set of minterms, ordered by increasing value.
///
/// Each minterm is the concatenation of a state code (high-order bits) and an input symbol
/// (low-order bits). Inserting an existing minterm does not change the set.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct MintermSet {
    minterms: BTreeSet<BitVector>,
}

impl MintermSet {
    /// Add a minterm, return false if it was already present
    pub fn insert(&mut self, minterm: BitVector) -> bool {
        self.minterms.insert(minterm)
    }

    pub fn contains(&self, minterm: &BitVector) -> bool {
        self.minterms.contains(minterm)
    }

    pub fn len(&self) -> usize {
        self.minterms.len()
    }

    /// Return whether there are no minterm (the bit-line is always false)
    pub fn is_empty(&self) -> bool {
        self.minterms.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, BitVector> {
        self.minterms.iter()
    }
}

impl FromIterator<BitVector> for MintermSet {
    fn from_iter<I: IntoIterator<Item = BitVector>>(iter: I) -> Self {
        Self {
            minterms: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a MintermSet {
    type Item = &'a BitVector;
    type IntoIter = btree_set::Iter<'a, BitVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.minterms.iter()
    }
}

/// Minterms of all output bits and all next-state bits.
///
/// In both lists the index 0 corresponds to the most significant bit.
#[derive(Clone, Default, Debug)]
pub struct MintermSets {
    outputs: Vec<MintermSet>,
    next_states: Vec<MintermSet>,
}

impl MintermSets {
    /// Collect the minterms from the rows of a truth table.
    ///
    /// The widths of the output and next state of the first row apply to all rows:
    /// rows with other widths are rejected. An empty table gives empty lists.
    pub fn from_rows(rows: &[Row]) -> Result<Self, FsmError> {
        let first = match rows.first() {
            None => {
                warn!("no minterms to extract from an empty truth table");
                return Ok(Self::default());
            }
            Some(first) => first,
        };
        let output_width = first.output.width();
        let code_width = first.next_state.width();
        let mut outputs = vec![MintermSet::default(); output_width as usize];
        let mut next_states = vec![MintermSet::default(); code_width as usize];

        for row in rows {
            check_width("state output", output_width, &row.output)?;
            check_width("next state code", code_width, &row.next_state)?;
            let minterm = BitVector::concat([&row.state, &row.input])?;
            for (i, set) in outputs.iter_mut().enumerate() {
                if row.output.bit_at(output_width - 1 - i as u32) {
                    set.insert(minterm);
                }
            }
            for (i, set) in next_states.iter_mut().enumerate() {
                if row.next_state.bit_at(code_width - 1 - i as u32) {
                    set.insert(minterm);
                }
            }
        }

        debug!(
            outputs = outputs.len(),
            next_states = next_states.len(),
            "extracted minterm sets"
        );
        Ok(Self {
            outputs,
            next_states,
        })
    }

    /// Minterms of each output bit, most significant first
    pub fn outputs(&self) -> &[MintermSet] {
        &self.outputs
    }

    /// Minterms of each next-state bit, most significant first
    pub fn next_states(&self) -> &[MintermSet] {
        &self.next_states
    }
}

fn check_width(what: &'static str, expected: u32, value: &BitVector) -> Result<(), FsmError> {
    if value.width() != expected {
        return Err(FsmError::WidthMismatch {
            what,
            expected,
            found: value.width(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::truth_table::Row;
    use crate::*;

    fn bv(s: &str) -> BitVector {
        s.parse().unwrap()
    }

    fn row(input: &str, state: &str, output: &str, next_state: &str) -> Row {
        Row {
            input: bv(input),
            state: bv(state),
            output: bv(output),
            next_state: bv(next_state),
        }
    }

    #[test]
    fn msb_first_bit_lines() -> Result<(), FsmError> {
        let rows = [
            row("1", "01", "10", "11"),
            row("0", "10", "01", "10"),
        ];
        let sets = MintermSets::from_rows(&rows)?;
        assert_eq!(sets.outputs().len(), 2);
        assert_eq!(sets.next_states().len(), 2);

        // state bits are high, input bits are low
        let m1 = bv("011");
        let m2 = bv("100");
        assert_eq!(sets.outputs()[0], MintermSet::from_iter([m1]));
        assert_eq!(sets.outputs()[1], MintermSet::from_iter([m2]));
        assert_eq!(sets.next_states()[0], MintermSet::from_iter([m1, m2]));
        assert_eq!(sets.next_states()[1], MintermSet::from_iter([m1]));
        Ok(())
    }

    #[test]
    fn duplicates_collapse() -> Result<(), FsmError> {
        let rows = [
            row("1", "0", "1", "1"),
            row("1", "0", "1", "0"),
            row("1", "0", "1", "1"),
        ];
        let sets = MintermSets::from_rows(&rows)?;
        assert_eq!(sets.outputs()[0].len(), 1);
        assert_eq!(sets.next_states()[0].len(), 1);

        let mut set = sets.outputs()[0].clone();
        assert!(!set.insert(bv("01")));
        assert_eq!(set.len(), 1);
        assert!(set.insert(bv("001")));
        assert_eq!(set.len(), 2);
        Ok(())
    }

    #[test]
    fn empty_and_mismatched_tables() -> Result<(), FsmError> {
        let sets = MintermSets::from_rows(&[])?;
        assert!(sets.outputs().is_empty());
        assert!(sets.next_states().is_empty());

        let rows = [row("1", "0", "1", "1"), row("1", "0", "10", "1")];
        assert!(matches!(
            MintermSets::from_rows(&rows),
            Err(FsmError::WidthMismatch { what: "state output", .. })
        ));
        Ok(())
    }
}
