// Raw, folded and run-length encoded programs must behave identically

use bftty::interpreter::engine::Interpreter;
use bftty::interpreter::headless::{run_headless, StdioPort};
use bftty::memory::{CellWidth, Tape};
use bftty::parser::encoder::encode;
use bftty::parser::Program;
use proptest::prelude::*;
use std::time::Duration;

/// Final cells, cursor and output of a headless run
fn execute(program: Program, width: CellWidth) -> (Vec<u32>, usize, Vec<u8>) {
    let mut interpreter = Interpreter::new(program, Tape::new(16, width));
    let mut port = StdioPort::new(&b""[..], Vec::new());
    run_headless(&mut interpreter, &mut port, Duration::ZERO).expect("program must terminate cleanly");
    let tape = interpreter.tape();
    (tape.cells().to_vec(), tape.cursor(), port.into_output())
}

/// Straight-line instructions plus clear loops, which always terminate
fn fragment() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        4 => Just("+"),
        3 => Just("-"),
        3 => Just("<"),
        3 => Just(">"),
        2 => Just("."),
        1 => Just("[-]"),
        1 => Just("[+]"),
        1 => Just("+[->+<]"),
    ]
}

fn source() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(fragment(), 0..200).prop_map(|parts| parts.concat().into_bytes())
}

/// No loops: a clear loop on a 16-bit cell can take 65535 turns
fn straight_source() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(b"+-<>.".to_vec()), 0..400)
}

proptest! {
    #[test]
    fn encoded_matches_raw(raw in source()) {
        let expected = execute(Program::from_raw(&raw), CellWidth::Bits8);

        let folded = execute(Program::compile(&raw), CellWidth::Bits8);
        prop_assert_eq!(&folded, &expected);

        let decoded = Program::from_encoded(&encode(&raw)).expect("encoder output must decode");
        let encoded = execute(decoded, CellWidth::Bits8);
        prop_assert_eq!(&encoded, &expected);
    }

    #[test]
    fn encoded_matches_raw_on_wide_cells(raw in straight_source()) {
        let expected = execute(Program::from_raw(&raw), CellWidth::Bits16);
        let decoded = Program::from_encoded(&encode(&raw)).expect("encoder output must decode");
        prop_assert_eq!(execute(decoded, CellWidth::Bits16), expected);
    }
}
