use crate::efmt::FormatterConfig;
use crate::{BitVector, SignalNames};
use std::fmt;

/// Common API for the Boolean functions of a bit-line.
///
/// Rules are functions of a minterm (state code followed by input symbol):
/// they can be evaluated on a minterm and displayed with named signals.
pub trait Rule {
    /// Display the rule using the selected names and operators
    fn fmt_rule(
        &self,
        f: &mut fmt::Formatter,
        names: &SignalNames,
        cfg: &FormatterConfig,
    ) -> fmt::Result;

    /// Evaluate the rule on the given minterm
    fn eval(&self, minterm: &BitVector) -> bool;
}
