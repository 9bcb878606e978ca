use std::{error::Error, path::Path};

use test_utils::{check_run, Expected, PIPELINE_BANNERS, RUN_BANNER};

const SRC_PATH: &str = "./demos/division.wordy";

#[test]
fn interpret_division_by_zero() -> Result<(), Box<dyn Error>> {
    let stdout = format!(
        "{PIPELINE_BANNERS}{RUN_BANNER}RUNTIME_ERROR:\n\
         Error while executing broken. Function called at line: 0\n\
         Cannot divide by 0 at line 3\n"
    );

    check_run(
        Path::new(SRC_PATH),
        "broken",
        &[],
        Expected {
            stdout: &stdout,
            exit_code: 5,
        },
    )
}
