use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use swimlane_cli::{Args, run};

/// Collects all files with the given extension from a directory
fn collect_files(dir: PathBuf, extension: &str) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some(extension)
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demos are at workspace root, relative to workspace not the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args_for(input: &Path, output: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        edits: None,
        reply: false,
        save_model: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_files(demos_path(), "json");

    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_filename = format!(
            "{}.bpmn",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        match run(&args_for(demo_path, &output_path)) {
            Ok(()) => {
                let xml = fs::read_to_string(&output_path).expect("Output should be written");
                if !xml.starts_with("<?xml") || !xml.contains("<bpmndi:BPMNDiagram") {
                    failed_demos.push((demo_path.clone(), "incomplete document".to_string()));
                }
            }
            Err(e) => failed_demos.push((demo_path.clone(), e.to_string())),
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_files(demos_path().join("errors"), "json");

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_filename = format!(
            "error_{}.bpmn",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        if run(&args_for(demo_path, &output_path)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
        assert!(
            !output_path.exists(),
            "{} left an output file behind",
            demo_path.display()
        );
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!(
        "✅ All {} error demos failed as expected",
        error_demos.len()
    );
}

#[test]
fn e2e_smoke_test_replies() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let replies = collect_files(demos_path().join("replies"), "txt");

    assert!(!replies.is_empty(), "No replies found in demos/replies/");

    for reply_path in &replies {
        let output_path = temp_dir.path().join(format!(
            "{}.bpmn",
            reply_path.file_stem().unwrap().to_string_lossy()
        ));

        let args = Args {
            reply: true,
            ..args_for(reply_path, &output_path)
        };
        run(&args).unwrap_or_else(|e| panic!("{}: {e}", reply_path.display()));

        // Read as a plain model, the reply is not valid JSON.
        let plain_output = temp_dir.path().join("plain.bpmn");
        assert!(run(&args_for(reply_path, &plain_output)).is_err());
    }
}

#[test]
fn e2e_edits_then_save_model() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = demos_path();

    let output_path = temp_dir.path().join("edited.bpmn");
    let model_path = temp_dir.path().join("edited.json");

    let args = Args {
        edits: Some(
            demos
                .join("edits")
                .join("add_review_step.json")
                .to_string_lossy()
                .to_string(),
        ),
        save_model: Some(model_path.to_string_lossy().to_string()),
        ..args_for(&demos.join("single_lane.json"), &output_path)
    };
    run(&args).expect("Edited demo should compile");

    let xml = fs::read_to_string(&output_path).unwrap();
    assert!(xml.contains(r#"id="Task_Review""#));
    assert!(xml.contains(r#"bpmnElement="Flow_Review""#));

    // The saved model compiles to the same document without the edits.
    let rerun_output = temp_dir.path().join("rerun.bpmn");
    run(&args_for(&model_path, &rerun_output)).expect("Saved model should compile");
    assert_eq!(fs::read_to_string(&rerun_output).unwrap(), xml);
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("missing.bpmn");

    let args = args_for(&temp_dir.path().join("nope.json"), &output_path);
    assert!(run(&args).is_err());
    assert!(!output_path.exists());
}
