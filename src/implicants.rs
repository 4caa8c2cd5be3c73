//! Manipulate sums of product terms.

use crate::efmt::{FormatterConfig, Operator};
use crate::minterm::MintermSet;
use crate::*;

use std::fmt;
use std::iter::FromIterator;
use std::slice::Iter;
use std::vec::IntoIter;

pub(crate) static PATTERN_SEPARATORS: [char; 4] = [',', ';', '|', '\n'];

/// Boolean function represented as a list of implicants (a sum of products).
///
/// An implicant of a Boolean function is a pattern such that the function is true for all covered minterms.
/// A canonical list only contains fully fixed patterns, one for each minterm of the function.
/// No simplification is attempted: the patterns are kept in insertion order.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Implicants {
    patterns: Vec<Pattern>,
}

impl Implicants {
    /// Canonical list of implicants for a set of minterms, in increasing minterm order
    pub fn from_minterms(minterms: &MintermSet) -> Self {
        minterms.iter().map(Pattern::from_minterm).collect()
    }

    pub fn iter(&self) -> Iter<'_, Pattern> {
        self.patterns.iter()
    }

    pub fn push(&mut self, p: Pattern) {
        self.patterns.push(p);
    }

    /// Test if the given pattern is covered by at least one pattern in this list.
    pub fn contains(&self, p: &Pattern) -> bool {
        self.patterns.contains(p)
    }

    /// Get the number of patterns in this list of implicants
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Return whether there are no implicant (the rule is always false)
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl FromIterator<Pattern> for Implicants {
    fn from_iter<I: IntoIterator<Item = Pattern>>(iter: I) -> Self {
        Self {
            patterns: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Implicants {
    type Item = &'a Pattern;
    type IntoIter = Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}

impl IntoIterator for Implicants {
    type Item = Pattern;
    type IntoIter = IntoIter<Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.into_iter()
    }
}

impl std::str::FromStr for Implicants {
    type Err = FsmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(&PATTERN_SEPARATORS[..])
            .filter(|elt| !elt.trim().is_empty())
            .map(|elt| elt.parse::<Pattern>())
            .collect()
    }
}

impl Rule for Implicants {
    fn fmt_rule(
        &self,
        f: &mut fmt::Formatter,
        names: &SignalNames,
        cfg: &FormatterConfig,
    ) -> fmt::Result {
        if self.is_empty() {
            return cfg.write_bool(f, false);
        }
        let mut first = true;
        for p in &self.patterns {
            match first {
                true => first = false,
                false => write!(f, "{}", cfg.operator(Operator::Or))?,
            }
            p.fmt_rule(f, names, cfg)?;
        }
        Ok(())
    }

    fn eval(&self, minterm: &BitVector) -> bool {
        self.patterns.iter().any(|p| p.contains_minterm(minterm))
    }
}

impl fmt::Display for Implicants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.patterns {
            writeln!(f, "{}", p)?;
        }
        Ok(())
    }
}
