use std::path::PathBuf;

use serde::Serialize;

use crate::calibration::Calibration;

/// One step of the per-tag flashing sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    PatchId,
    PatchSlope,
    PatchOffset,
    Flash,
    Verify,
}

impl Step {
    pub fn describe(&self) -> &'static str {
        match self {
            Step::PatchId => "patching tag id",
            Step::PatchSlope => "patching slope",
            Step::PatchOffset => "patching offset",
            Step::Flash => "flashing",
            Step::Verify => "verifying",
        }
    }
}

#[derive(Debug, Clone)]
pub enum OperationEvent {
    TableLoaded {
        entries: usize,
    },
    ScratchCreated {
        path: PathBuf,
    },

    /// Emitted before the loop blocks on the operator's continue/skip answer.
    PromptDevice {
        index: u32,
    },
    DeviceSkipped {
        index: u32,
    },

    PatchStart {
        index: u32,
        step: Step,
    },
    CalibrationApplied {
        index: u32,
        calibration: Calibration,
    },
    CalibrationMissing {
        index: u32,
    },

    FlashStart {
        index: u32,
    },
    VerifyStart {
        index: u32,
    },

    StepFailed {
        index: u32,
        step: Step,
        detail: String,
    },
    /// Emitted after a failure banner, before blocking on acknowledgment.
    AwaitRetry {
        index: u32,
    },
    /// The programmer lost the USB device mid-run; retrying without a prompt.
    TransientUsbRetry {
        index: u32,
    },

    DeviceFlashed {
        index: u32,
    },
    RunFinished {
        flashed: usize,
        skipped: usize,
    },
}
