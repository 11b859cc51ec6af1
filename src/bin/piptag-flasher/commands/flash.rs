use piptag_flasher::api;
use piptag_flasher::calibration::CalibrationTable;

use crate::cli;
use crate::context;
use crate::exit_codes;
use crate::output::{Event, Reporter};
use crate::prompt::StdinOperator;

pub fn run(args: cli::Cli, out: &mut dyn Reporter) -> i32 {
    let table = match CalibrationTable::load(&args.temp_file) {
        Ok(t) => t,
        Err(e) => {
            out.emit(Event::Error {
                code: exit_codes::EXIT_BAD_TABLE,
                message: format!("calibration table {}: {e}", args.temp_file.display()),
            });
            return exit_codes::EXIT_BAD_TABLE;
        }
    };

    let opts = context::flash_opts(&args);
    let tools = context::toolchain(&args);
    let mut operator = StdinOperator;

    let r = api::run_flash(
        &args.pip_image,
        &table,
        &opts,
        &tools,
        &mut operator,
        |ev| out.emit(Event::Operation(ev)),
    );

    match r {
        Ok(summary) => {
            out.emit(Event::Summary(summary));
            exit_codes::EXIT_OK
        }
        Err(e) => {
            let code = map_flash_error(&e);
            out.emit(Event::Error {
                code,
                message: e.to_string(),
            });
            code
        }
    }
}

fn map_flash_error(e: &api::FlashError) -> i32 {
    match e.kind() {
        api::FlashErrorKind::OperatorLost => exit_codes::EXIT_UNEXPECTED,
    }
}
