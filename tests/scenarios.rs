use fsmkit::efmt::LOGIC_FMT_CFG;
use fsmkit::*;
use std::collections::HashMap;

fn bit(v: u64) -> BitVector {
    BitVector::new(v, 1).unwrap()
}

fn bv(s: &str) -> BitVector {
    s.parse().unwrap()
}

fn minterms(descr: &[&str]) -> MintermSet {
    descr.iter().map(|s| bv(s)).collect()
}

/// Four states over a single input bit, each one moving forward on a specific input
fn four_states() -> Result<Automaton, FsmError> {
    let mut fa = Automaton::dfa([bit(0), bit(1)])?;
    for (id, output) in [("A", 0), ("B", 1), ("C", 1), ("D", 0)] {
        fa.add_state(id, bit(output))?;
    }
    for (from, input, to) in [
        ("A", 0, "A"),
        ("A", 1, "B"),
        ("B", 0, "C"),
        ("B", 1, "B"),
        ("C", 0, "C"),
        ("C", 1, "D"),
        ("D", 0, "A"),
        ("D", 1, "D"),
    ] {
        fa.connect(from, bit(input), to)?;
    }
    Ok(fa)
}

#[test_log::test]
fn complete_four_state_machine() -> Result<(), FsmError> {
    let fa = four_states()?;
    assert!(fa.validate().is_none());

    let table = fa.truth_table()?;
    assert_eq!(table.code_width(), 2);
    assert_eq!(table.len(), 8);

    let mut codes = vec![];
    for (idx, code) in table.encoding().iter() {
        codes.push(format!("{}={}", fa.state(idx)?.id(), code));
    }
    assert_eq!(codes, vec!["A=00", "B=01", "C=10", "D=11"]);

    let a = fa.index_of("A")?;
    let d = fa.index_of("D")?;
    let visited = fa.run(a, &[bit(1), bit(0), bit(0), bit(1)])?;
    assert_eq!(visited.last(), Some(&d));
    Ok(())
}

#[test_log::test]
fn four_state_equations() -> Result<(), FsmError> {
    let fa = four_states()?;
    let sets = fa.minterm_sets()?;
    assert_eq!(sets.next_states()[0], minterms(&["010", "100", "101", "111"]));
    assert_eq!(sets.next_states()[1], minterms(&["001", "011", "101", "111"]));
    assert_eq!(sets.outputs()[0], minterms(&["010", "011", "100", "101"]));

    assert_eq!(
        fa.canonical_expressions()?,
        vec![
            "b1 = b1'b0'i0 + b1'b0i0 + b1b0'i0 + b1b0i0",
            "b0 = b1'b0i0' + b1b0'i0' + b1b0'i0 + b1b0i0",
            "i0 = b1'b0i0' + b1'b0i0 + b1b0'i0' + b1b0'i0",
        ]
    );

    // Each equation agrees with its minterm set on all combinations
    let synthesis = Synthesis::run(&fa, &SynthesisConfig::default())?;
    let expected = [
        &sets.next_states()[1],
        &sets.next_states()[0],
        &sets.outputs()[0],
    ];
    for (equation, set) in synthesis.equations().iter().zip(expected) {
        for m in 0..8 {
            let minterm = BitVector::new(m, 3)?;
            assert_eq!(equation.eval(&minterm), set.contains(&minterm));
        }
    }
    Ok(())
}

#[test_log::test]
fn missing_transition() -> Result<(), FsmError> {
    let mut fa = Automaton::dfa([bit(0), bit(1)])?;
    for (id, output) in [("A", 0), ("B", 1), ("C", 1), ("D", 0)] {
        fa.add_state(id, bit(output))?;
    }
    for (from, input, to) in [
        ("A", 0, "A"),
        ("A", 1, "B"),
        ("B", 0, "C"),
        ("B", 1, "B"),
        ("C", 0, "C"),
        ("D", 0, "A"),
        ("D", 1, "D"),
    ] {
        fa.connect(from, bit(input), to)?;
    }

    let report = fa.validate().expect("C has no transition for 1");
    assert_eq!(
        report.errors(),
        &[ValidationError::Incomplete {
            state: "C".into(),
            symbol: bit(1),
        }]
    );
    assert!(report.to_string().contains("state C"));
    assert!(report.to_string().ends_with("input 1"));

    assert!(matches!(
        Synthesis::run(&fa, &SynthesisConfig::default()),
        Err(FsmError::Invalid(_))
    ));
    Ok(())
}

#[test_log::test]
fn wide_outputs() -> Result<(), FsmError> {
    let mut fa = Automaton::dfa([bit(0), bit(1)])?;
    for (id, output) in [("A", 0), ("B", 1), ("C", 2)] {
        fa.add_state(id, BitVector::new(output, 2)?)?;
    }
    for (from, input, to) in [
        ("A", 0, "A"),
        ("A", 1, "B"),
        ("B", 0, "A"),
        ("B", 1, "C"),
        ("C", 0, "A"),
        ("C", 1, "C"),
    ] {
        fa.connect(from, bit(input), to)?;
    }
    assert!(fa.validate().is_none());

    // A=00, B=01, C=10: one set for each bit of the output and of the state code
    let sets = fa.minterm_sets()?;
    assert_eq!(sets.outputs().len(), 2);
    assert_eq!(sets.next_states().len(), 2);
    assert_eq!(sets.outputs()[0], minterms(&["100", "101"]));
    assert_eq!(sets.outputs()[1], minterms(&["010", "011"]));
    assert_eq!(sets.next_states()[0], minterms(&["011", "101"]));
    assert_eq!(sets.next_states()[1], minterms(&["001"]));

    let config = SynthesisConfig::default().with_formatter(&LOGIC_FMT_CFG);
    let synthesis = Synthesis::run(&fa, &config)?;
    assert_eq!(
        synthesis.expressions(),
        vec![
            "b1 = !b1 & !b0 & i0",
            "b0 = !b1 & b0 & i0 | b1 & !b0 & i0",
            "i1 = !b1 & b0 & !i0 | !b1 & b0 & i0",
            "i0 = b1 & !b0 & !i0 | b1 & !b0 & i0",
        ]
    );
    Ok(())
}

#[test_log::test]
fn grid_import_matches_manual_construction() -> Result<(), FsmError> {
    let grid = vec![
        vec!["State", "0", "1"],
        vec!["D", "A", "D"],
        vec!["C", "C", "D"],
        vec!["B", "C", "B"],
        vec!["A", "A", "B"],
    ];
    let outputs: HashMap<String, u64> = [("A", 0), ("B", 1), ("C", 1), ("D", 0)]
        .iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect();
    let imported = grid::automaton_from_grid(AutomatonKind::Dfa, &grid, &outputs)?;

    assert_eq!(
        imported.canonical_expressions()?,
        four_states()?.canonical_expressions()?
    );
    assert!(imported.transition_table().contains("D/0"));
    Ok(())
}

#[test]
fn bit_vector_text_round_trip() -> Result<(), FsmError> {
    for width in 1..=8 {
        for magnitude in 0..(1u64 << width) {
            let v = BitVector::new(magnitude, width)?;
            let text = v.to_string();
            assert_eq!(text.len(), width as usize);
            assert_eq!(text.parse::<BitVector>()?, v);
        }
    }
    Ok(())
}

#[test]
fn concatenation_places_the_first_operand_high() -> Result<(), FsmError> {
    for (wa, wb) in [(1, 1), (2, 3), (3, 2), (4, 4)] {
        for a in 0..(1u64 << wa) {
            for b in 0..(1u64 << wb) {
                let va = BitVector::new(a, wa)?;
                let vb = BitVector::new(b, wb)?;
                let c = BitVector::concat([&va, &vb])?;
                assert_eq!(c.width(), wa + wb);
                assert_eq!(c.magnitude(), (a << wb) | b);
            }
        }
    }
    Ok(())
}

#[test]
fn structurally_equal_keys_collide() -> Result<(), FsmError> {
    let mut map = StructMap::new();
    for width in 1..=4 {
        for magnitude in 0..(1u64 << width) {
            map.set(BitVector::new(magnitude, width)?, magnitude);
            map.set(BitVector::new(magnitude, width)?, magnitude + 1);
        }
    }
    assert_eq!(map.len(), 2 + 4 + 8 + 16);
    assert_eq!(map.get(&bv("0101")), Some(&6));
    assert_eq!(map.get(&bv("101")), Some(&6));
    assert!(!map.has(&bv("00000")));
    Ok(())
}

#[test]
fn state_codes_are_distinct_and_minimal() -> Result<(), FsmError> {
    for n in 1..=33 {
        let mut fa = Automaton::dfa([bit(0)])?;
        for _ in 0..n {
            fa.add_generated_state(bit(0))?;
        }
        let encoding = StateEncoding::new(&fa)?;
        let mut codes: Vec<u64> = encoding.iter().map(|(_, c)| c.magnitude()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), n);
        assert_eq!(encoding.width(), code_width(n));
        if n > 1 {
            // one bit less would not be enough
            assert!(1usize << (encoding.width() - 1) < n);
        }
    }
    Ok(())
}

#[test]
fn duplicated_edges_yield_a_single_minterm() -> Result<(), FsmError> {
    let mut fa = Automaton::nfa([bit(0), bit(1)])?;
    let a = fa.add_state("A", bit(1))?;
    let b = fa.add_state("B", bit(0))?;
    fa.add_connection(a, bit(1), b)?;
    fa.add_connection(a, bit(1), b)?;
    fa.add_connection(b, bit(0), a)?;

    let table = fa.truth_table()?;
    assert_eq!(table.len(), 3);
    let sets = table.minterms()?;
    assert_eq!(sets.outputs()[0], minterms(&["01"]));
    assert_eq!(sets.next_states()[0], minterms(&["01"]));
    Ok(())
}
