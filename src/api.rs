use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::calibration::CalibrationTable;
use crate::operation::{OperationEvent, Step};
use crate::operator::{Operator, PromptResponse};
use crate::patch;
use crate::scratch::ScratchSpace;
use crate::tools::{CmdOutput, ToolError, Toolchain, USB_DEVICE_MISSING_MARKER};

#[derive(Debug, Clone, Default)]
pub struct FlashOptions {
    /// First tag id to flash.
    pub start: u32,
    /// Last tag id to flash, inclusive. start > end is an empty run.
    pub end: u32,

    /// Directory for scratch images (None = current directory).
    pub work_dir: Option<PathBuf>,

    /// Keep scratch images after a successful flash.
    pub keep_artifacts: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FlashErrorKind {
    OperatorLost,
}

/// Fatal errors only. Tool failures are not errors: they banner and retry
/// under operator control, so the run keeps going.
#[derive(Error, Debug)]
pub enum FlashError {
    #[error("operator input lost: {source}")]
    OperatorLost {
        #[source]
        source: std::io::Error,
    },
}

impl FlashError {
    pub fn kind(&self) -> FlashErrorKind {
        match self {
            FlashError::OperatorLost { .. } => FlashErrorKind::OperatorLost,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub flashed: Vec<u32>,
    pub skipped: Vec<u32>,
}

enum DeviceOutcome {
    Flashed,
    TransientUsb,
    Failed,
}

/// Runs the whole range: for each tag id in `[start, end]`, prompt, patch
/// the template image, flash and verify. Failures retry the same id until
/// the operator skips it or interrupts the process.
pub fn run_flash<F>(
    image: &Path,
    table: &CalibrationTable,
    opts: &FlashOptions,
    tools: &dyn Toolchain,
    operator: &mut dyn Operator,
    mut on_event: F,
) -> Result<RunSummary, FlashError>
where
    F: FnMut(OperationEvent),
{
    let scratch = ScratchSpace::new(opts.work_dir.as_deref());
    on_event(OperationEvent::TableLoaded {
        entries: table.len(),
    });
    on_event(OperationEvent::ScratchCreated {
        path: scratch.image().to_path_buf(),
    });

    let mut summary = RunSummary::default();
    let mut index = opts.start;
    let mut prompt = true;

    while index <= opts.end {
        if prompt {
            on_event(OperationEvent::PromptDevice { index });
            let response = operator
                .confirm_device(index)
                .map_err(|source| FlashError::OperatorLost { source })?;
            if response == PromptResponse::Skip {
                on_event(OperationEvent::DeviceSkipped { index });
                summary.skipped.push(index);
                match index.checked_add(1) {
                    Some(next) => index = next,
                    None => break,
                }
                continue;
            }
        }
        prompt = true;

        match flash_one(index, image, table, &scratch, tools, &mut on_event) {
            DeviceOutcome::Flashed => {
                on_event(OperationEvent::DeviceFlashed { index });
                if !opts.keep_artifacts {
                    scratch.cleanup();
                }
                summary.flashed.push(index);
                match index.checked_add(1) {
                    Some(next) => index = next,
                    None => break,
                }
            }
            DeviceOutcome::TransientUsb => {
                tracing::debug!(index, "usb device re-enumerated, retrying flash");
                on_event(OperationEvent::TransientUsbRetry { index });
                prompt = false;
            }
            DeviceOutcome::Failed => {
                on_event(OperationEvent::AwaitRetry { index });
                operator
                    .acknowledge_failure()
                    .map_err(|source| FlashError::OperatorLost { source })?;
            }
        }
    }

    on_event(OperationEvent::RunFinished {
        flashed: summary.flashed.len(),
        skipped: summary.skipped.len(),
    });
    Ok(summary)
}

fn flash_one<F>(
    index: u32,
    image: &Path,
    table: &CalibrationTable,
    scratch: &ScratchSpace,
    tools: &dyn Toolchain,
    on_event: &mut F,
) -> DeviceOutcome
where
    F: FnMut(OperationEvent),
{
    // PATCH_ID: template -> scratch image
    on_event(OperationEvent::PatchStart {
        index,
        step: Step::PatchId,
    });
    let expr = patch::id_substitution(index);
    if run_step(
        index,
        Step::PatchId,
        tools.patch(image, scratch.image(), &expr),
        on_event,
    )
    .is_none()
    {
        return DeviceOutcome::Failed;
    }

    match table.lookup(index) {
        Some(cal) => {
            on_event(OperationEvent::CalibrationApplied {
                index,
                calibration: cal.clone(),
            });

            // PATCH_SLOPE: scratch image -> staging
            on_event(OperationEvent::PatchStart {
                index,
                step: Step::PatchSlope,
            });
            let expr = match word_expression(
                index,
                Step::PatchSlope,
                &patch::SLOPE_PLACEHOLDER,
                &cal.slope,
                tools,
                on_event,
            ) {
                Some(e) => e,
                None => return DeviceOutcome::Failed,
            };
            if run_step(
                index,
                Step::PatchSlope,
                tools.patch(scratch.image(), scratch.staging(), &expr),
                on_event,
            )
            .is_none()
            {
                return DeviceOutcome::Failed;
            }

            // PATCH_OFFSET: staging -> scratch image
            on_event(OperationEvent::PatchStart {
                index,
                step: Step::PatchOffset,
            });
            let expr = match word_expression(
                index,
                Step::PatchOffset,
                &patch::OFFSET_PLACEHOLDER,
                &cal.offset,
                tools,
                on_event,
            ) {
                Some(e) => e,
                None => return DeviceOutcome::Failed,
            };
            if run_step(
                index,
                Step::PatchOffset,
                tools.patch(scratch.staging(), scratch.image(), &expr),
                on_event,
            )
            .is_none()
            {
                return DeviceOutcome::Failed;
            }
        }
        None => on_event(OperationEvent::CalibrationMissing { index }),
    }

    // FLASH
    on_event(OperationEvent::FlashStart { index });
    match tools.program(scratch.image()) {
        Ok(out) if out.success() => {}
        Ok(out) => {
            if out.text.contains(USB_DEVICE_MISSING_MARKER) {
                return DeviceOutcome::TransientUsb;
            }
            on_event(OperationEvent::StepFailed {
                index,
                step: Step::Flash,
                detail: format!("exit status {}", out.status_code),
            });
            return DeviceOutcome::Failed;
        }
        Err(e) => {
            on_event(OperationEvent::StepFailed {
                index,
                step: Step::Flash,
                detail: e.to_string(),
            });
            return DeviceOutcome::Failed;
        }
    }

    // VERIFY
    on_event(OperationEvent::VerifyStart { index });
    if run_step(index, Step::Verify, tools.verify(scratch.image()), on_event).is_none() {
        return DeviceOutcome::Failed;
    }

    DeviceOutcome::Flashed
}

/// Converts a calibration value into a patch expression via the float
/// helper, reporting failures against `step`.
fn word_expression<F>(
    index: u32,
    step: Step,
    key: &[u8; 4],
    value: &str,
    tools: &dyn Toolchain,
    on_event: &mut F,
) -> Option<String>
where
    F: FnMut(OperationEvent),
{
    let out = run_step(index, step, tools.float_to_word(value), on_event)?;
    match patch::word_substitution(key, &out.text) {
        Ok(expr) => Some(expr),
        Err(e) => {
            on_event(OperationEvent::StepFailed {
                index,
                step,
                detail: e.to_string(),
            });
            None
        }
    }
}

fn run_step<F>(
    index: u32,
    step: Step,
    result: Result<CmdOutput, ToolError>,
    on_event: &mut F,
) -> Option<CmdOutput>
where
    F: FnMut(OperationEvent),
{
    match result {
        Ok(out) if out.success() => Some(out),
        Ok(out) => {
            on_event(OperationEvent::StepFailed {
                index,
                step,
                detail: format!("exit status {}", out.status_code),
            });
            None
        }
        Err(e) => {
            on_event(OperationEvent::StepFailed {
                index,
                step,
                detail: e.to_string(),
            });
            None
        }
    }
}
