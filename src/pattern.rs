use crate::efmt::FormatterConfig;
use crate::*;

use bit_set::BitSet;
use std::fmt;
use std::str::FromStr;

/// A product term defined by sets of positive and negative variables, the others are implicitly free.
///
/// They are represented as a pair of [BitSet] storing the UID of positive and negative variables.
/// The pattern of a minterm fixes all its variables: the variable ```k``` is the ```k```-th bit of the
/// minterm read from left to right.
///
/// A Pattern can be parsed from strings where the position in the string defines the
/// variable UID and the character defines the value: - for free, 0 for negative, 1 for positive.
/// To make the strings easier to read, spaces and single quotes are ignored around and inside the string.
/// For example "0-100-100", "  0-100-100", and "0-100 -100" are equivalent.
///
/// ```
/// use fsmkit::{BitVector, Pattern, Rule};
/// # use fsmkit::FsmError;
/// # fn main() -> Result<(), FsmError> {
///
/// let minterm: BitVector = "101".parse()?;
/// let pattern = Pattern::from_minterm(&minterm);
/// assert_eq!(pattern.to_string(), "101");
/// assert!(pattern.eval(&minterm));
///
/// let wider: Pattern = "1-1".parse()?;
/// assert!(wider.eval(&"111".parse()?));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Pattern {
    pub(crate) positive: BitSet,
    pub(crate) negative: BitSet,
}

impl Pattern {
    /// Create a pattern restricted to a single minterm
    pub fn from_minterm(minterm: &BitVector) -> Self {
        let mut p = Self::default();
        for (uid, value) in minterm.iter_msb_first().enumerate() {
            p.set(Variable(uid), value);
        }
        p
    }

    /// Fix a variable to a specific value.
    ///
    /// If it was fixed to the opposite value, the existing restriction is replaced by the new one.
    pub fn set(&mut self, var: Variable, value: bool) {
        if value {
            self.negative.remove(var.uid());
            self.positive.insert(var.uid());
        } else {
            self.positive.remove(var.uid());
            self.negative.insert(var.uid());
        }
    }

    /// Remove all constraints on a given variable.
    pub fn free_variable(&mut self, var: Variable) {
        self.positive.remove(var.uid());
        self.negative.remove(var.uid());
    }

    /// Test if a variable is fixed at a specific value in this pattern
    pub fn has_restriction(&self, var: Variable, value: bool) -> bool {
        match value {
            true => self.positive.contains(var.uid()),
            false => self.negative.contains(var.uid()),
        }
    }

    /// Test if no variable is fixed
    pub fn is_free_pattern(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }

    /// Number of fixed variables
    pub fn len(&self) -> usize {
        self.positive.union(&self.negative).count()
    }

    pub fn is_empty(&self) -> bool {
        self.is_free_pattern()
    }

    /// Iterate over the fixed variables and their value, in increasing UID order
    pub fn iter_fixed_values(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.positive
            .union(&self.negative)
            .map(move |uid| (Variable(uid), self.positive.contains(uid)))
    }

    /// Check if a minterm is contained in this pattern.
    ///
    /// Variables beyond the width of the minterm can not be satisfied.
    pub fn contains_minterm(&self, minterm: &BitVector) -> bool {
        let width = minterm.width() as usize;
        self.iter_fixed_values().all(|(var, value)| {
            var.uid() < width && minterm.bit_at((width - 1 - var.uid()) as u32) == value
        })
    }
}

impl FromStr for Pattern {
    type Err = FsmError;

    fn from_str(descr: &str) -> Result<Pattern, FsmError> {
        let mut p = Pattern::default();
        let mut idx = 0;
        for c in descr.chars() {
            match c {
                ' ' | '\t' | '\'' => (), // skip spacing and ` for formatting
                '-' => idx += 1,
                '0' | '1' => {
                    p.set(Variable(idx), c == '1');
                    idx += 1;
                }
                _ => return Err(FsmError::InvalidBinaryString(descr.into())),
            };
        }
        Ok(p)
    }
}

impl Rule for Pattern {
    fn fmt_rule(
        &self,
        f: &mut fmt::Formatter,
        names: &SignalNames,
        cfg: &FormatterConfig,
    ) -> fmt::Result {
        cfg.write_pattern(f, names, self)
    }

    fn eval(&self, minterm: &BitVector) -> bool {
        self.contains_minterm(minterm)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut result = vec![];
        for (var, value) in self.iter_fixed_values() {
            if result.len() <= var.uid() {
                result.resize(var.uid() + 1, '-');
            }
            result[var.uid()] = if value { '1' } else { '0' };
        }
        let s: String = result.iter().collect();
        write!(f, "{}", &s)
    }
}

impl From<&BitVector> for Pattern {
    fn from(minterm: &BitVector) -> Self {
        Self::from_minterm(minterm)
    }
}
