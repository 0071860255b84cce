use std::fs;

use cancelkit_core::ReducerKind;
use cancelkit_gcode::{output_path, process_file, Outcome, PreprocessorConfig, SlicerKind};
use tempfile::TempDir;

const SAMPLE: &str = "; generated by PrusaSlicer\n; printing object A\nG1 X1 Y1 E1\n; stop printing object A\n";

fn config() -> PreprocessorConfig {
    PreprocessorConfig {
        reducer: ReducerKind::Basic,
        ..Default::default()
    }
}

fn temp_entries(dir: &TempDir) -> usize {
    fs::read_dir(dir.path()).unwrap().count()
}

#[test]
fn test_process_with_suffix() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("part.gcode");
    fs::write(&input, SAMPLE).unwrap();

    let report = process_file(&input, Some(".cancel"), &config()).unwrap();
    assert_eq!(report.output, dir.path().join("part.cancel.gcode"));
    assert_eq!(report.slicer(), Some(SlicerKind::Slic3r));
    assert_eq!(report.objects(), 1);

    assert_eq!(fs::read_to_string(&input).unwrap(), SAMPLE);
    let out = fs::read_to_string(&report.output).unwrap();
    assert!(out.contains("EXCLUDE_OBJECT_START NAME=A\n"));
    assert_eq!(temp_entries(&dir), 2);
}

#[test]
fn test_process_in_place() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("part.gcode");
    fs::write(&input, SAMPLE).unwrap();

    let report = process_file(&input, None, &config()).unwrap();
    assert_eq!(report.output, input);
    assert!(fs::read_to_string(&input).unwrap().contains("EXCLUDE_OBJECT_DEFINE NAME=A"));
    assert_eq!(temp_entries(&dir), 1);

    // A second run recognizes its own output
    let report = process_file(&input, None, &config()).unwrap();
    assert_eq!(report.outcome, Outcome::AlreadyProcessed);
    assert_eq!(report.slicer(), None);
}

#[test]
fn test_replaces_existing_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("part.gcode");
    fs::write(&input, SAMPLE).unwrap();
    let output = output_path(&input, Some("-out"));
    fs::write(&output, "stale").unwrap();

    process_file(&input, Some("-out"), &config()).unwrap();
    assert!(fs::read_to_string(&output).unwrap().starts_with("\n\n; Pre-Processed"));
}

#[test]
fn test_failure_leaves_original_untouched() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("mystery.gcode");
    let original = "G28\nG1 X1 Y1 E1\n";
    fs::write(&input, original).unwrap();

    let err = process_file(&input, None, &config()).unwrap_err();
    assert!(err.is_detection_failure());
    assert_eq!(fs::read_to_string(&input).unwrap(), original);
    assert_eq!(temp_entries(&dir), 1);
}

#[test]
fn test_missing_input() {
    let dir = TempDir::new().unwrap();
    let err = process_file(&dir.path().join("nope.gcode"), None, &config()).unwrap_err();
    assert!(matches!(err, cancelkit_core::Error::Io(_)));
}
