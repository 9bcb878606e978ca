use std::{
    env,
    error::Error,
    io::{self, Write},
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
    str,
};

/// The stdout preamble every run prints while the pipeline comes up.
pub const PIPELINE_BANNERS: &str =
    "Start reading in file\nStart lexing program\nStart parsing program\n";

/// Printed right before the requested function is invoked.
pub const RUN_BANNER: &str = "_____________START RUNNING PROGRAM_____________\n";

/// Printed after the program finished without an error.
pub const END_BANNER: &str = "_________________PROGRAM ENDED_________________\n";

/// Expected outcome of a full interpreter run.
pub struct Expected<'a> {
    pub stdout: &'a str,
    pub exit_code: i32,
}

impl<'a> Expected<'a> {
    fn assert_matches(self, output: &Output) -> Result<(), Box<dyn Error>> {
        assert_eq!(self.stdout, str::from_utf8(&output.stdout)?);
        assert_eq!(Some(self.exit_code), output.status.code());
        Ok(())
    }
}

fn wordy_binary() -> PathBuf {
    env::var_os("CARGO_BIN_EXE_wordy")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./target/debug/wordy"))
}

fn run_interpreter(src_path: &Path, function: &str, args: &[&str]) -> io::Result<Output> {
    Command::new(wordy_binary())
        .arg(src_path)
        .arg(function)
        .args(args)
        .output()
}

/// Run a program through the interpreter binary and compare the transcript.
pub fn check_run(
    src_path: &Path,
    function: &str,
    args: &[&str],
    expected: Expected,
) -> Result<(), Box<dyn Error>> {
    let output = run_interpreter(src_path, function, args)?;
    expected.assert_matches(&output)
}

/// Same as [`check_run`], but with data piped into standard input for
/// programs using the `input` builtin.
pub fn check_run_with_stdin(
    src_path: &Path,
    function: &str,
    args: &[&str],
    stdin_data: &str,
    expected: Expected,
) -> Result<(), Box<dyn Error>> {
    let mut child = Command::new(wordy_binary())
        .arg(src_path)
        .arg(function)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(stdin_data.as_bytes())?;
    }
    let output = child.wait_with_output()?;

    expected.assert_matches(&output)
}
