use std::{error::Error, path::Path};

use test_utils::{check_run, Expected, END_BANNER, PIPELINE_BANNERS, RUN_BANNER};

const SRC_PATH: &str = "./demos/counting.wordy";

#[test]
fn interpret_counting() -> Result<(), Box<dyn Error>> {
    let stdout =
        format!("{PIPELINE_BANNERS}{RUN_BANNER}0\n1\n2\nProgram exit value: 3\n{END_BANNER}");

    check_run(
        Path::new(SRC_PATH),
        "count",
        &["3"],
        Expected {
            stdout: &stdout,
            exit_code: 0,
        },
    )
}

#[test]
fn interpret_counting_with_zero_iterations() -> Result<(), Box<dyn Error>> {
    let stdout = format!("{PIPELINE_BANNERS}{RUN_BANNER}Program exit value: 0\n{END_BANNER}");

    check_run(
        Path::new(SRC_PATH),
        "count",
        &["0"],
        Expected {
            stdout: &stdout,
            exit_code: 0,
        },
    )
}
