use piptag_flasher::api::RunSummary;
use piptag_flasher::operation::OperationEvent;

use crate::output::{Event, OutputOptions, Reporter};

/// Operator dialogue on stdout, matching the prompts the flashing stations
/// already know. Errors go to stderr.
pub struct HumanOutput {
    opts: OutputOptions,
}

impl HumanOutput {
    pub fn new(opts: OutputOptions) -> Self {
        Self { opts }
    }

    pub(crate) fn failure_banner_lines() -> [&'static str; 5] {
        [
            "+------------------------+",
            "|                        |",
            "|    FLASHING FAILURE    |",
            "|                        |",
            "+------------------------+",
        ]
    }

    pub(crate) fn success_banner_lines() -> [&'static str; 3] {
        [
            "#######################",
            "# FLASHING SUCCESSFUL #",
            "#######################",
        ]
    }

    fn on_operation(&mut self, ev: OperationEvent) {
        match ev {
            OperationEvent::TableLoaded { entries } => {
                if self.opts.verbose {
                    println!("loaded {entries} calibration row(s)");
                }
            }
            OperationEvent::ScratchCreated { path } => {
                println!("Using temporary file {}", path.display());
            }
            OperationEvent::PromptDevice { index } => {
                println!("Please attach PIP {index}");
                println!("Press [ENTER] to continue or 's' to skip");
            }
            OperationEvent::DeviceSkipped { index } => {
                if self.opts.verbose {
                    println!("skipping PIP {index}");
                }
            }
            OperationEvent::PatchStart { index, step } => {
                if self.opts.verbose {
                    println!("{} for PIP {index}", step.describe());
                }
            }
            OperationEvent::CalibrationApplied { calibration, .. } => {
                println!(
                    "Setting slope: {}, and offset: {}",
                    calibration.slope, calibration.offset
                );
            }
            OperationEvent::CalibrationMissing { index } => {
                if self.opts.verbose {
                    println!("no calibration data for PIP {index}");
                }
            }
            OperationEvent::FlashStart { index } => {
                println!("Flashing PIP {index}");
            }
            OperationEvent::VerifyStart { index } => {
                println!("Verifying PIP {index}");
            }
            OperationEvent::StepFailed { step, detail, .. } => {
                if self.opts.verbose {
                    println!("{} failed: {detail}", step.describe());
                }
                for line in Self::failure_banner_lines() {
                    println!("{line}");
                }
                println!();
            }
            OperationEvent::AwaitRetry { .. } => {
                println!("Press any key to try again");
                println!("or [Ctrl]+C to quit.");
            }
            OperationEvent::TransientUsbRetry { .. } => {
                println!("USB device changed. Retrying flash");
            }
            OperationEvent::DeviceFlashed { .. } => {
                for line in Self::success_banner_lines() {
                    println!("{line}");
                }
                println!();
            }
            OperationEvent::RunFinished { .. } => {}
        }
    }

    fn on_summary(&mut self, summary: RunSummary) {
        println!(
            "Run complete: {} flashed, {} skipped",
            summary.flashed.len(),
            summary.skipped.len()
        );
    }
}

impl Reporter for HumanOutput {
    fn emit(&mut self, event: Event) {
        match event {
            Event::Operation(ev) => self.on_operation(ev),
            Event::Summary(summary) => self.on_summary(summary),
            Event::Error { message, .. } => eprintln!("error: {message}"),
        }
    }

    fn finish(&mut self) {}
}
