//! Variables of product terms and the naming of circuit signals

use std::fmt;

/// A single Boolean variable of a product term.
///
/// The UID is the position of the variable in the minterm, read from left to right:
/// the most significant bit of a minterm is the variable 0.
#[derive(Clone, Copy, Default, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Variable(pub(crate) usize);

impl Variable {
    /// Create a new variable with a specific UID
    pub fn new(uid: usize) -> Self {
        Self(uid)
    }

    /// Return the internal integer UID
    pub fn uid(&self) -> usize {
        self.0
    }
}

impl From<usize> for Variable {
    fn from(uid: usize) -> Self {
        Self(uid)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_{}_", self.0)
    }
}

/// A named signal of the synthesized circuit
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Signal {
    /// A bit of the state register, ```b<N>```
    StateBit(u32),
    /// A bit of the input symbol, ```i<N>```
    Input(u32),
    /// A bit of the output, ```o<N>```
    Output(u32),
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::StateBit(n) => write!(f, "b{}", n),
            Signal::Input(n) => write!(f, "i{}", n),
            Signal::Output(n) => write!(f, "o{}", n),
        }
    }
}

/// Associate the variables of a minterm to signals.
///
/// The first ```code_width``` variables select the current state: the leftmost one is the highest
/// state bit ```b<code_width-1>```. The remaining variables are input bits, numbered from 0 by their
/// position in the input part (```i0``` being its leftmost bit).
///
/// ```
/// use fsmkit::{Signal, SignalNames, Variable};
///
/// let names = SignalNames::new(2);
/// assert_eq!(names.signal(Variable::new(0)), Signal::StateBit(1));
/// assert_eq!(names.signal(Variable::new(1)), Signal::StateBit(0));
/// assert_eq!(names.signal(Variable::new(2)), Signal::Input(0));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SignalNames {
    code_width: u32,
}

impl SignalNames {
    pub fn new(code_width: u32) -> Self {
        Self { code_width }
    }

    pub fn code_width(&self) -> u32 {
        self.code_width
    }

    /// The signal carried by a variable of the minterm
    pub fn signal(&self, var: Variable) -> Signal {
        let code_width = self.code_width as usize;
        match var.uid() < code_width {
            true => Signal::StateBit((code_width - 1 - var.uid()) as u32),
            false => Signal::Input((var.uid() - code_width) as u32),
        }
    }

    /// The signal of an output bit
    pub fn output(&self, bit: u32) -> Signal {
        Signal::Output(bit)
    }

    /// Insert the name of a variable during a display operation
    pub fn format_variable(&self, f: &mut fmt::Formatter, var: Variable) -> fmt::Result {
        write!(f, "{}", self.signal(var))
    }
}
