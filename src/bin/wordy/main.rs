//! # Wordy
//!
//! This binary is the interpreter of Wordy. It wires the reader, lexer,
//! parser, and evaluator into a single application and maps each stage to
//! its exit code.

mod cli;

use cli::*;

use std::process;

use wordy_lang::{
    error::WordyError,
    interpreter::{parse_int, Interpreter, Value},
    lexer::Lexer,
    parser, reader,
};

fn main() {
    let args = Cli::init();

    simple_logger::init_with_level(args.verbosity.into()).unwrap();

    println!("Start reading in file");
    let lines = check_phase(reader::read_program(&args.file), 3);

    println!("Start lexing program");
    let tokens = check_phase(Lexer::new(lines).lex(), 3);

    println!("Start parsing program");
    let functions = check_phase(parser::parse(&tokens), 4);

    let arguments = args.arguments.iter().map(|raw| parse_argument(raw)).collect();

    println!("_____________START RUNNING PROGRAM_____________");
    let interpreter = Interpreter::new(functions);
    let value = check_phase(interpreter.call(&args.function, arguments, 0), 5);

    println!("Program exit value: {value}");
    println!("_________________PROGRAM ENDED_________________");
}

/// Unwrap a pipeline stage result. On failure the error is printed to
/// standard output and the process exits with the stage's exit code.
fn check_phase<T>(result: Result<T, WordyError>, exit_code: i32) -> T {
    match result {
        Ok(value) => value,
        Err(error) => {
            println!("{error}");
            process::exit(exit_code);
        }
    }
}

/// Convert a raw CLI argument into a runtime value: booleans first, then
/// base-auto integers, everything else as a (re-quoted) string.
fn parse_argument(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => match parse_int(raw) {
            Ok(number) => Value::Int(number),
            Err(_) => Value::Str(format!("\"{raw}\"")),
        },
    }
}
