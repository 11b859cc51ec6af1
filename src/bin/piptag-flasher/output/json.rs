use std::collections::BTreeMap;
use std::time::Instant;

use piptag_flasher::api::RunSummary;
use piptag_flasher::operation::{OperationEvent, Step};

use crate::output::{Event, OutputOptions, Reporter};

#[derive(serde::Serialize)]
pub struct JsonEvent {
    schema: u32,
    event: &'static str,
    #[serde(flatten)]
    fields: BTreeMap<&'static str, serde_json::Value>,
}

impl JsonEvent {
    pub fn status(event: &'static str) -> Self {
        Self {
            schema: 1,
            event,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_u64(mut self, k: &'static str, v: u64) -> Self {
        self.fields.insert(k, serde_json::Value::from(v));
        self
    }

    pub fn with_str(mut self, k: &'static str, v: &str) -> Self {
        self.fields.insert(k, serde_json::Value::from(v));
        self
    }

    pub fn with_value(mut self, k: &'static str, v: serde_json::Value) -> Self {
        self.fields.insert(k, v);
        self
    }
}

pub struct JsonOutput {
    opts: OutputOptions,
    start: Instant,
}

impl JsonOutput {
    pub fn new(opts: OutputOptions) -> Self {
        Self {
            opts,
            start: Instant::now(),
        }
    }

    pub(crate) fn render_event_json(&mut self, ev: JsonEvent) -> String {
        let mut ev = ev;
        if self.opts.json_timestamps {
            ev.fields.insert(
                "t_ms",
                serde_json::Value::from(self.start.elapsed().as_millis() as u64),
            );
        }
        serde_json::to_string(&ev).unwrap_or_else(|_| "{}".to_string())
    }

    fn json_event(&mut self, ev: JsonEvent) {
        println!("{}", self.render_event_json(ev));
    }
}

impl Reporter for JsonOutput {
    fn emit(&mut self, event: Event) {
        match event {
            Event::Operation(ev) => self.json_event(operation_event_to_json(ev)),
            Event::Summary(summary) => self.json_event(summary_to_json(&summary)),
            Event::Error { code, message } => {
                self.json_event(
                    JsonEvent::status("error")
                        .with_u64("code", code as u64)
                        .with_str("message", &message),
                );
                if self.opts.verbose {
                    eprintln!("error: {message}");
                }
            }
        }
    }

    fn finish(&mut self) {}
}

fn step_value(step: Step) -> serde_json::Value {
    serde_json::to_value(step).unwrap_or_else(|_| serde_json::Value::Null)
}

pub fn operation_event_to_json(ev: OperationEvent) -> JsonEvent {
    match ev {
        OperationEvent::TableLoaded { entries } => {
            JsonEvent::status("table_loaded").with_u64("entries", entries as u64)
        }
        OperationEvent::ScratchCreated { path } => {
            JsonEvent::status("scratch_created").with_str("path", &path.to_string_lossy())
        }
        OperationEvent::PromptDevice { index } => {
            JsonEvent::status("prompt").with_u64("index", index as u64)
        }
        OperationEvent::DeviceSkipped { index } => {
            JsonEvent::status("skipped").with_u64("index", index as u64)
        }
        OperationEvent::PatchStart { index, step } => JsonEvent::status("patch")
            .with_u64("index", index as u64)
            .with_value("step", step_value(step)),
        OperationEvent::CalibrationApplied { index, calibration } => {
            JsonEvent::status("calibration")
                .with_u64("index", index as u64)
                .with_value(
                    "calibration",
                    serde_json::to_value(&calibration)
                        .unwrap_or_else(|_| serde_json::Value::Null),
                )
        }
        OperationEvent::CalibrationMissing { index } => {
            JsonEvent::status("calibration_missing").with_u64("index", index as u64)
        }
        OperationEvent::FlashStart { index } => {
            JsonEvent::status("flash").with_u64("index", index as u64)
        }
        OperationEvent::VerifyStart { index } => {
            JsonEvent::status("verify").with_u64("index", index as u64)
        }
        OperationEvent::StepFailed {
            index,
            step,
            detail,
        } => JsonEvent::status("step_failed")
            .with_u64("index", index as u64)
            .with_value("step", step_value(step))
            .with_str("detail", &detail),
        OperationEvent::AwaitRetry { index } => {
            JsonEvent::status("await_retry").with_u64("index", index as u64)
        }
        OperationEvent::TransientUsbRetry { index } => {
            JsonEvent::status("usb_retry").with_u64("index", index as u64)
        }
        OperationEvent::DeviceFlashed { index } => {
            JsonEvent::status("device_flashed").with_u64("index", index as u64)
        }
        OperationEvent::RunFinished { flashed, skipped } => JsonEvent::status("run_finished")
            .with_u64("flashed", flashed as u64)
            .with_u64("skipped", skipped as u64),
    }
}

pub fn summary_to_json(summary: &RunSummary) -> JsonEvent {
    JsonEvent::status("summary")
        .with_value(
            "flashed",
            serde_json::Value::Array(
                summary
                    .flashed
                    .iter()
                    .map(|i| serde_json::Value::from(*i as u64))
                    .collect(),
            ),
        )
        .with_value(
            "skipped",
            serde_json::Value::Array(
                summary
                    .skipped
                    .iter()
                    .map(|i| serde_json::Value::from(*i as u64))
                    .collect(),
            ),
        )
}
