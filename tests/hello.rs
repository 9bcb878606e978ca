use std::{error::Error, path::Path};

use test_utils::{check_run, Expected, END_BANNER, PIPELINE_BANNERS, RUN_BANNER};

const SRC_PATH: &str = "./demos/hello.wordy";

#[test]
fn interpret_hello() -> Result<(), Box<dyn Error>> {
    let stdout = format!(
        "{PIPELINE_BANNERS}{RUN_BANNER}hello\nworld\nProgram exit value: 0\n{END_BANNER}"
    );

    check_run(
        Path::new(SRC_PATH),
        "main",
        &[],
        Expected {
            stdout: &stdout,
            exit_code: 0,
        },
    )
}
