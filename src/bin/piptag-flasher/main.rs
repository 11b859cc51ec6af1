use std::process;

use clap::error::ErrorKind;
use clap::Parser;

mod cli;
mod commands;
mod context;
mod exit_codes;
mod logging;
mod output;
mod prompt;

fn main() {
    logging::init_tracing();

    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            process::exit(exit_codes::EXIT_OK);
        }
        Err(_) => {
            cli::print_usage();
            process::exit(exit_codes::EXIT_USAGE);
        }
    };

    let mut out = output::make_reporter(&cli);
    let code = commands::flash::run(cli, &mut *out);
    out.finish();
    process::exit(code);
}
