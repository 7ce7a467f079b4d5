// Integration tests for the brainfuck interpreter

use bftty::interpreter::engine::Interpreter;
use bftty::interpreter::errors::{RuntimeError, ScanDirection};
use bftty::interpreter::headless::{run_headless, StdioPort};
use bftty::interpreter::runner::{Engine, EngineOptions};
use bftty::memory::{CellWidth, Tape};
use bftty::parser::{loader, Alphabet, Program};
use bftty::snapshot::Status;
use std::time::Duration;

fn headless(program: Program, input: &[u8]) -> (Interpreter, Result<(), i32>, Vec<u8>) {
    let mut interpreter = Interpreter::new(program, Tape::new(4096, CellWidth::Bits8));
    let mut port = StdioPort::new(input, Vec::new());
    let result = run_headless(&mut interpreter, &mut port, Duration::ZERO).map_err(|e| e.exit_code());
    (interpreter, result, port.into_output())
}

fn unthrottled() -> EngineOptions {
    EngineOptions {
        delay: Duration::ZERO,
        ..Default::default()
    }
}

#[test]
fn test_clear_loop_completes() {
    let (interpreter, result, output) = headless(Program::compile(b"+[-]"), b"");

    assert_eq!(result, Ok(()));
    assert!(output.is_empty());
    assert_eq!(interpreter.tape().read(), 0);
    assert!(interpreter.is_finished());
}

#[test]
fn test_hello_digit() {
    let source = b"++++++++[>++++++++<-]>.";

    let (_, result, output) = headless(Program::compile(source), b"");
    assert_eq!(result, Ok(()));
    assert_eq!(output, vec![64]);

    // Unfolded, one op per character, as the interactive engine runs it
    let (engine, controller) = Engine::new(
        Interpreter::new(Program::from_raw(source), Tape::new(4096, CellWidth::Bits8)),
        unthrottled(),
    );
    let interpreter = engine.run();

    assert_eq!(controller.output(), vec![64]);
    assert_eq!(controller.snapshot().status, Status::Completed);
    assert_eq!(interpreter.tape().cells()[1], 64);
    assert_eq!(interpreter.tape().cursor(), 1);
}

#[test]
fn test_lone_open_bracket_fails() {
    let (engine, controller) = Engine::new(
        Interpreter::new(Program::from_raw(b"["), Tape::new(16, CellWidth::Bits8)),
        unthrottled(),
    );
    engine.run();

    let snapshot = controller.snapshot();
    assert_eq!(
        snapshot.status,
        Status::Failed(RuntimeError::UnmatchedBracket {
            offset: 0,
            direction: ScanDirection::Forward,
        })
    );
    assert!(controller.output().is_empty());
    assert_eq!(snapshot.executed, 0);

    let (_, result, output) = headless(Program::compile(b"["), b"");
    assert_eq!(result, Err(3));
    assert!(output.is_empty());
}

#[test]
fn test_unmatched_close_bracket_fails_when_taken() {
    let (_, result, output) = headless(Program::compile(b"+.]"), b"");
    assert_eq!(result, Err(3));
    assert_eq!(output, vec![1]);
}

#[test]
fn test_tape_wraps_both_ways() {
    for cells in [1usize, 2, 7, 4096] {
        let mut tape = Tape::new(cells, CellWidth::Bits8);
        tape.move_left(1);
        assert_eq!(tape.cursor(), cells - 1);
        tape.move_right(1);
        assert_eq!(tape.cursor(), 0);
    }

    // A program walking off the left edge writes the last cell
    let mut interpreter = Interpreter::new(Program::compile(b"<+++"), Tape::new(8, CellWidth::Bits8));
    let mut port = StdioPort::new(&b""[..], Vec::new());
    run_headless(&mut interpreter, &mut port, Duration::ZERO).unwrap();
    assert_eq!(interpreter.tape().cells()[7], 3);
}

#[test]
fn test_cells_wrap_at_width() {
    let (interpreter, result, output) = headless(Program::compile(b"-.+."), b"");
    assert_eq!(result, Ok(()));
    assert_eq!(output, vec![255, 0]);
    assert_eq!(interpreter.tape().read(), 0);

    let mut wide = Tape::new(1, CellWidth::Bits16);
    wide.decrement();
    assert_eq!(wide.read(), 0xFFFF);
    wide.increment();
    assert_eq!(wide.read(), 0);
}

#[test]
fn test_end_of_input_is_a_no_op() {
    let (interpreter, result, output) = headless(Program::compile(b"+++,,."), b"");
    assert_eq!(result, Ok(()));
    assert_eq!(output, vec![3]);
    assert_eq!(interpreter.executed(), 4);
}

#[test]
fn test_input_is_copied_verbatim() {
    let (_, result, output) = headless(Program::compile(b",+.,-."), b"AB");
    assert_eq!(result, Ok(()));
    assert_eq!(output, b"BA");
}

#[test]
fn test_loaded_source_skips_comments() {
    let source = b"add two: ++ then print.\nclear [-it?] here";
    let alphabet = Alphabet::default();
    let raw = loader::load(&source[..], &alphabet).unwrap();
    assert_eq!(raw, b"++.[-]");

    let (_, result, output) = headless(Program::compile(&raw), b"");
    assert_eq!(result, Ok(()));
    assert_eq!(output, vec![2]);
}

#[test]
fn test_random_fill_is_seeded() {
    let alphabet = Alphabet::with_extensions("?").unwrap();
    let raw = loader::load(&b"?.?."[..], &alphabet).unwrap();

    let run = || {
        let mut interpreter =
            Interpreter::new(Program::compile(&raw), Tape::new(4, CellWidth::Bits8)).with_seed(7);
        let mut port = StdioPort::new(&b""[..], Vec::new());
        run_headless(&mut interpreter, &mut port, Duration::ZERO).unwrap();
        port.into_output()
    };

    let first = run();
    assert_eq!(first.len(), 2);
    assert_eq!(first, run());
}

#[test]
fn test_unsupported_instruction_headless() {
    let alphabet = Alphabet::with_extensions("#").unwrap();
    let raw = loader::load(&b"+.#."[..], &alphabet).unwrap();

    let (_, result, output) = headless(Program::compile(&raw), b"");
    assert_eq!(result, Err(4));
    assert_eq!(output, vec![1]);
}
