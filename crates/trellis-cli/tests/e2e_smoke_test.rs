use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use trellis_cli::Args;

fn demos_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos")
}

/// Collects all .json files from a directory
fn collect_json_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args_for(input: &Path, output: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        highlight: Vec::new(),
        info: false,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_json_files(demos_dir());
    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_filename = format!("{}.svg", demo_path.file_stem().unwrap().to_string_lossy());
        let output_path = temp_dir.path().join(output_filename);

        match trellis_cli::run(&args_for(demo_path, &output_path)) {
            Ok(()) => {
                let svg = fs::read_to_string(&output_path).expect("Output should exist");
                assert!(svg.contains("wf-diagram-svg"), "{}", demo_path.display());
            }
            Err(e) => failed_demos.push((demo_path.clone(), e)),
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_json_files(demos_dir().join("errors"));
    assert!(!error_demos.is_empty(), "No error demos found in demos/errors/");

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_filename = format!(
            "error_{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        if trellis_cli::run(&args_for(demo_path, &output_path)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
        assert!(!output_path.exists(), "{}", demo_path.display());
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
}

#[test]
fn e2e_highlight_path() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("highlighted.svg");

    let mut args = args_for(&demos_dir().join("flowchart.json"), &output_path);
    args.highlight = vec!["start".to_string(), "browse".to_string()];
    trellis_cli::run(&args).expect("Highlighted render should succeed");

    let svg = fs::read_to_string(&output_path).unwrap();
    assert!(svg.contains("wf-diagram-node--start wf-diagram-node--highlighted"));
    assert!(svg.contains("wf-diagram-edge--flow wf-diagram-edge--highlighted"));
}

#[test]
fn e2e_missing_input() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = args_for(
        &temp_dir.path().join("missing.json"),
        &temp_dir.path().join("out.svg"),
    );

    assert!(matches!(
        trellis_cli::run(&args),
        Err(trellis::TrellisError::Io(_))
    ));
}

#[test]
fn e2e_info_flag() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("info.svg");

    let mut args = args_for(&demos_dir().join("er.json"), &output_path);
    args.info = true;
    trellis_cli::run(&args).expect("Render with --info should succeed");
    assert!(output_path.exists());
}
