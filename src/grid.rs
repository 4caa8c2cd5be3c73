//! Build automata from transition tables given as grids of cells

use crate::*;

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use tracing::debug;

static RE_SYMBOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:0b([01]+)|([0-9]+))\s*$").unwrap());
static RE_SUCCESSOR_SEP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[,|]\s*").unwrap());

/// Parse a symbol cell, given in decimal or as a ```0b``` prefixed binary string
fn parse_symbol(cell: &str) -> Result<u64, FsmError> {
    let invalid = || FsmError::InvalidGrid(format!("'{}' is not a valid symbol", cell));
    let cap = RE_SYMBOL.captures(cell).ok_or_else(invalid)?;
    match (cap.get(1), cap.get(2)) {
        (Some(bin), _) => u64::from_str_radix(bin.as_str(), 2).map_err(|_| invalid()),
        (None, Some(dec)) => dec.as_str().parse().map_err(|_| invalid()),
        (None, None) => Err(invalid()),
    }
}

/// Build an automaton from a transition grid and the output value of each state.
///
/// The first row is a header ```["State", symbol_0, symbol_1, ...]``` and each following row gives a state
/// and its successors ```[id, successor_0, successor_1, ...]```.
///
/// * All symbols use the bit length of the largest symbol.
/// * All outputs use the bit length of the largest output of the listed states (at least one bit).
/// * An empty cell (or ```-```) denotes a missing transition, several successors can be separated
///   by ```,``` or ```|``` to describe nondeterministic branches.
///
/// ```
/// use fsmkit::{grid, AutomatonKind};
/// use std::collections::HashMap;
/// # use fsmkit::FsmError;
/// # fn main() -> Result<(), FsmError> {
///
/// let table = vec![
///     vec!["State", "0", "1"],
///     vec!["A", "A", "C"],
///     vec!["C", "A", "C"],
/// ];
/// let outputs = HashMap::from([("A".to_string(), 0), ("C".to_string(), 2)]);
///
/// let fa = grid::automaton_from_grid(AutomatonKind::Dfa, &table, &outputs)?;
/// assert_eq!(fa.len(), 2);
/// assert_eq!(fa.get_state("C")?.output().to_string(), "10");
/// assert!(fa.validate().is_none());
/// # Ok(())
/// # }
/// ```
pub fn automaton_from_grid<S: AsRef<str>>(
    kind: AutomatonKind,
    grid: &[Vec<S>],
    outputs: &HashMap<String, u64>,
) -> Result<Automaton, FsmError> {
    let (header, rows) = grid
        .split_first()
        .ok_or_else(|| FsmError::InvalidGrid("the grid has no header".into()))?;
    if header.is_empty() {
        return Err(FsmError::InvalidGrid("the header is empty".into()));
    }

    let values: Vec<u64> = header[1..]
        .iter()
        .map(|c| parse_symbol(c.as_ref()))
        .collect::<Result<_, _>>()?;
    let mut seen = HashSet::new();
    if let Some(dup) = values.iter().find(|v| !seen.insert(**v)) {
        return Err(FsmError::InvalidGrid(format!("the symbol {} is repeated", dup)));
    }
    let symbol_width = values
        .iter()
        .map(|v| BitVector::minimal_width(*v))
        .max()
        .unwrap_or(1);
    let symbols: Vec<BitVector> = values
        .iter()
        .map(|v| BitVector::new(*v, symbol_width))
        .collect::<Result<_, _>>()?;

    let mut ids = Vec::with_capacity(rows.len());
    for row in rows {
        let id = row.first().map(|c| c.as_ref().trim()).unwrap_or("");
        if id.is_empty() {
            return Err(FsmError::InvalidGrid("a row has no state id".into()));
        }
        if row.len() > header.len() {
            return Err(FsmError::InvalidGrid(format!(
                "the row of state {} has more cells than the header",
                id
            )));
        }
        let output = outputs
            .get(id)
            .copied()
            .ok_or_else(|| FsmError::InvalidGrid(format!("no output for state {}", id)))?;
        ids.push((id, output));
    }
    let output_width = ids
        .iter()
        .map(|(_, o)| BitVector::minimal_width(*o))
        .max()
        .unwrap_or(1);

    let mut fa = Automaton::new(kind, symbols.iter().copied())?;
    // Create all states before the transitions: successors may appear in later rows
    for (id, output) in &ids {
        fa.add_state(*id, BitVector::new(*output, output_width)?)?;
    }
    for (row, (id, _)) in rows.iter().zip(&ids) {
        for (symbol, cell) in symbols.iter().zip(&row[1..]) {
            for next in RE_SUCCESSOR_SEP.split(cell.as_ref().trim()) {
                if next.is_empty() || next == "-" {
                    continue;
                }
                fa.connect(id, *symbol, next)?;
            }
        }
    }

    debug!(
        states = fa.len(),
        symbol_width,
        output_width,
        "built automaton from transition grid"
    );
    Ok(fa)
}

#[cfg(test)]
mod tests {
    use crate::grid::*;

    fn outputs(entries: &[(&str, u64)]) -> HashMap<String, u64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn symbols() -> Result<(), FsmError> {
        assert_eq!(parse_symbol("5")?, 5);
        assert_eq!(parse_symbol(" 0b101 ")?, 5);
        assert!(parse_symbol("x").is_err());
        assert!(parse_symbol("0b").is_err());
        assert!(parse_symbol("99999999999999999999999").is_err());
        Ok(())
    }

    #[test_log::test]
    fn widths_and_transitions() -> Result<(), FsmError> {
        let table = vec![
            vec!["State", "0", "1", "2", "3"],
            vec!["A", "B", "A", "", "-"],
            vec!["B", "A", "B", "A", "B"],
        ];
        let fa = automaton_from_grid(
            AutomatonKind::Dfa,
            &table,
            &outputs(&[("A", 0), ("B", 5), ("unused", 100)]),
        )?;

        assert_eq!(fa.symbol_width(), Some(2));
        assert_eq!(fa.output_width(), Some(3));
        assert_eq!(fa.get_state("B")?.output().to_string(), "101");

        let a = fa.index_of("A")?;
        let b = fa.index_of("B")?;
        assert_eq!(fa.next_state(a, &BitVector::new(0, 2)?)?, b);
        assert_eq!(fa.next_state(b, &BitVector::new(3, 2)?)?, b);
        assert!(fa.next_states(a, &BitVector::new(2, 2)?).is_err());

        let report = fa.validate().expect("A is incomplete");
        assert_eq!(report.len(), 2);
        Ok(())
    }

    #[test]
    fn nondeterministic_cells() -> Result<(), FsmError> {
        let table = vec![
            vec!["State".to_string(), "0b0".to_string(), "0b1".to_string()],
            vec!["p".to_string(), "p, q".to_string(), "q".to_string()],
            vec!["q".to_string(), "q|p".to_string(), "".to_string()],
        ];
        let fa = automaton_from_grid(AutomatonKind::Nfa, &table, &outputs(&[("p", 1), ("q", 0)]))?;
        let p = fa.index_of("p")?;
        let q = fa.index_of("q")?;
        let zero = BitVector::zero(1)?;
        assert_eq!(fa.next_states(p, &zero)?, &[p, q]);
        assert_eq!(fa.next_states(q, &zero)?, &[q, p]);
        Ok(())
    }

    #[test]
    fn broken_grids() {
        let out = outputs(&[("A", 0)]);
        let empty: Vec<Vec<&str>> = vec![];
        assert!(automaton_from_grid(AutomatonKind::Dfa, &empty, &out).is_err());

        let missing_output = vec![vec!["State", "0"], vec!["B", "B"]];
        assert!(automaton_from_grid(AutomatonKind::Dfa, &missing_output, &out).is_err());

        let unknown = vec![vec!["State", "0"], vec!["A", "Z"]];
        assert!(matches!(
            automaton_from_grid(AutomatonKind::Dfa, &unknown, &out),
            Err(FsmError::UnknownState(_))
        ));

        let repeated = vec![vec!["State", "1", "0b1"], vec!["A", "A", "A"]];
        assert!(automaton_from_grid(AutomatonKind::Dfa, &repeated, &out).is_err());

        let too_long = vec![vec!["State", "0"], vec!["A", "A", "A"]];
        assert!(automaton_from_grid(AutomatonKind::Dfa, &too_long, &out).is_err());
    }
}
