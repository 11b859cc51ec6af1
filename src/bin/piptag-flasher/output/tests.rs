use piptag_flasher::api::RunSummary;
use piptag_flasher::calibration::Calibration;
use piptag_flasher::operation::{OperationEvent, Step};

use super::human::HumanOutput;
use super::json::{operation_event_to_json, summary_to_json, JsonOutput};
use super::OutputOptions;

#[test]
fn json_event_has_schema_and_event() {
    let ev = operation_event_to_json(OperationEvent::TableLoaded { entries: 3 });
    let v = serde_json::to_value(&ev).unwrap();
    assert_eq!(v.get("schema").and_then(|v| v.as_u64()), Some(1));
    assert_eq!(v.get("event").and_then(|v| v.as_str()), Some("table_loaded"));
    assert_eq!(v.get("entries").and_then(|v| v.as_u64()), Some(3));
}

#[test]
fn json_step_names_are_snake_case() {
    let ev = operation_event_to_json(OperationEvent::StepFailed {
        index: 7,
        step: Step::PatchId,
        detail: "exit status 1".to_string(),
    });
    let v = serde_json::to_value(&ev).unwrap();
    assert_eq!(v.get("event").and_then(|v| v.as_str()), Some("step_failed"));
    assert_eq!(v.get("step").and_then(|v| v.as_str()), Some("patch_id"));
    assert_eq!(v.get("index").and_then(|v| v.as_u64()), Some(7));
}

#[test]
fn json_calibration_event_carries_both_values() {
    let ev = operation_event_to_json(OperationEvent::CalibrationApplied {
        index: 1,
        calibration: Calibration {
            slope: "2.5".to_string(),
            offset: "0.0".to_string(),
        },
    });
    let v = serde_json::to_value(&ev).unwrap();
    let cal = v.get("calibration").unwrap();
    assert_eq!(cal.get("slope").and_then(|v| v.as_str()), Some("2.5"));
    assert_eq!(cal.get("offset").and_then(|v| v.as_str()), Some("0.0"));
}

#[test]
fn json_summary_lists_ids() {
    let ev = summary_to_json(&RunSummary {
        flashed: vec![1, 2],
        skipped: vec![3],
    });
    let v = serde_json::to_value(&ev).unwrap();
    assert_eq!(
        v.get("flashed").unwrap().as_array().unwrap().len(),
        2
    );
    assert_eq!(v.get("skipped").unwrap().as_array().unwrap().len(), 1);
}

#[test]
fn json_timestamps_add_t_ms() {
    let mut out = JsonOutput::new(OutputOptions {
        verbose: false,
        json_timestamps: true,
    });
    let line = out.render_event_json(operation_event_to_json(OperationEvent::FlashStart {
        index: 1,
    }));
    let v: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert!(v.get("t_ms").is_some());
}

#[test]
fn banners_match_station_expectations() {
    let failure = HumanOutput::failure_banner_lines();
    assert!(failure.iter().any(|l| l.contains("FLASHING FAILURE")));
    assert_eq!(failure[0], failure[4]);

    let success = HumanOutput::success_banner_lines();
    assert!(success.iter().any(|l| l.contains("FLASHING SUCCESSFUL")));
}
