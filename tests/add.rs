use std::{error::Error, path::Path};

use test_utils::{check_run, Expected, END_BANNER, PIPELINE_BANNERS, RUN_BANNER};

const SRC_PATH: &str = "./demos/add.wordy";

#[test]
fn interpret_add() -> Result<(), Box<dyn Error>> {
    let stdout = format!("{PIPELINE_BANNERS}{RUN_BANNER}Program exit value: 7\n{END_BANNER}");

    check_run(
        Path::new(SRC_PATH),
        "add",
        &["3", "4"],
        Expected {
            stdout: &stdout,
            exit_code: 0,
        },
    )
}
