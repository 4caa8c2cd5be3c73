//! Formatting API for canonical expressions

use crate::{Pattern, Rule, SignalNames, Variable};

use std::fmt;

/// Boolean operators joining the variables of a product term and the terms of a sum
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Operator {
    /// AND operator: both children need to be true
    And,
    /// OR operator: at least one child needs to be true
    Or,
}

/// Placement of the negation mark around a variable
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Negation {
    /// ```!b0```
    Prefix(&'static str),
    /// ```b0'```
    Suffix(&'static str),
}

/// Operator strings used to display rules.
///
/// Only the operators can be configured: the names of the signals are fixed.
#[derive(Clone, Debug)]
pub struct FormatterConfig {
    s_and: &'static str,
    s_or: &'static str,
    s_not: Negation,
    s_false: &'static str,
    s_true: &'static str,
}

/// Textbook notation: ```b1'b0i0 + b1b0'i0'```.
///
/// An always-false function has an empty right-hand side.
pub static DEFAULT_FMT_CFG: FormatterConfig = FormatterConfig {
    s_and: "",
    s_or: " + ",
    s_not: Negation::Suffix("'"),
    s_false: "",
    s_true: "1",
};

/// Programming notation: ```!b1 & b0 & i0 | b1 & !b0 & !i0```
pub static LOGIC_FMT_CFG: FormatterConfig = FormatterConfig {
    s_and: " & ",
    s_or: " | ",
    s_not: Negation::Prefix("!"),
    s_false: "0",
    s_true: "1",
};

/// A rule displayed with named signals and a specific configuration
pub struct Named<'a, T: Rule + ?Sized> {
    rule: &'a T,
    names: &'a SignalNames,
    cfg: &'a FormatterConfig,
}

impl FormatterConfig {
    pub fn operator(&self, op: Operator) -> &str {
        match op {
            Operator::And => self.s_and,
            Operator::Or => self.s_or,
        }
    }

    pub fn named<'a, T: Rule + ?Sized>(
        &'a self,
        rule: &'a T,
        names: &'a SignalNames,
    ) -> Named<'a, T> {
        Named {
            rule,
            names,
            cfg: self,
        }
    }

    /// Write a fixed Boolean value
    pub fn write_bool(&self, f: &mut fmt::Formatter, b: bool) -> fmt::Result {
        match b {
            false => write!(f, "{}", self.s_false),
            true => write!(f, "{}", self.s_true),
        }
    }

    /// Write a single variable, which can be negated
    pub fn write_variable(
        &self,
        f: &mut fmt::Formatter,
        names: &SignalNames,
        var: Variable,
        value: bool,
    ) -> fmt::Result {
        match (value, self.s_not) {
            (true, _) => names.format_variable(f, var),
            (false, Negation::Prefix(s)) => {
                write!(f, "{}", s)?;
                names.format_variable(f, var)
            }
            (false, Negation::Suffix(s)) => {
                names.format_variable(f, var)?;
                write!(f, "{}", s)
            }
        }
    }

    /// Write a product term, a free pattern is always true
    pub fn write_pattern(
        &self,
        f: &mut fmt::Formatter,
        names: &SignalNames,
        p: &Pattern,
    ) -> fmt::Result {
        if p.is_free_pattern() {
            return self.write_bool(f, true);
        }
        let mut first = true;
        for (var, value) in p.iter_fixed_values() {
            match first {
                true => first = false,
                false => write!(f, "{}", self.operator(Operator::And))?,
            }
            self.write_variable(f, names, var, value)?;
        }
        Ok(())
    }
}

impl<T: Rule + ?Sized> fmt::Display for Named<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.rule.fmt_rule(f, self.names, self.cfg)
    }
}
