use piptag_flasher::api::RunSummary;
use piptag_flasher::operation::OperationEvent;

use crate::cli;

pub mod human;
pub mod json;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub verbose: bool,
    pub json_timestamps: bool,
}

#[derive(Debug, Clone)]
pub enum Event {
    Operation(OperationEvent),
    Summary(RunSummary),
    Error { code: i32, message: String },
}

pub trait Reporter {
    fn emit(&mut self, event: Event);
    fn finish(&mut self);
}

pub fn make_reporter(args: &cli::Cli) -> Box<dyn Reporter> {
    let opts = OutputOptions {
        verbose: args.verbose,
        json_timestamps: args.json_timestamps,
    };
    if args.json {
        Box::new(json::JsonOutput::new(opts))
    } else {
        Box::new(human::HumanOutput::new(opts))
    }
}
