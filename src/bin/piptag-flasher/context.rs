use piptag_flasher::api::FlashOptions;
use piptag_flasher::tools::ExternalTools;

use crate::cli;

pub fn flash_opts(args: &cli::Cli) -> FlashOptions {
    FlashOptions {
        start: args.start,
        end: args.end,
        work_dir: args.work_dir.clone(),
        keep_artifacts: args.keep_artifacts,
    }
}

pub fn toolchain(args: &cli::Cli) -> ExternalTools {
    ExternalTools {
        patcher: args.bbe.clone(),
        float_helper: args.float_helper.clone(),
        programmer: args.mspdebug.clone(),
        driver: args.driver.clone(),
    }
}
