use std::{fs, path::PathBuf};

use tempfile::tempdir;

use geotable_cli::{Args, FormatArg, ReportKindArg, run};

/// Collects all .toml files from a directory
fn collect_toml_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demo documents live at the workspace root
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args(input: &PathBuf, output: PathBuf, format: FormatArg, report: ReportKindArg) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        format: Some(format),
        report,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = collect_toml_files(demos_path());

    assert!(!demos.is_empty(), "No demo documents found in demos/");

    let mut failed = Vec::new();

    for demo in &demos {
        let stem = demo.file_stem().unwrap().to_string_lossy().to_string();
        for report in [ReportKindArg::Horizontal, ReportKindArg::Vertical] {
            for (format, extension) in [
                (FormatArg::Text, "txt"),
                (FormatArg::Xml, "xml"),
                (FormatArg::Document, "doc"),
            ] {
                let output = temp_dir.path().join(format!("{stem}_{report:?}.{extension}"));
                let args = args(demo, output.clone(), format, report);

                match run(&args) {
                    Ok(()) => {
                        let written = fs::metadata(&output).map(|m| m.len()).unwrap_or(0);
                        assert!(written > 0, "{} wrote an empty report", output.display());
                    }
                    Err(e) => failed.push((demo.clone(), format, e)),
                }
            }
        }
    }

    if !failed.is_empty() {
        eprintln!("\nDemo documents that failed:");
        for (path, format, err) in &failed {
            eprintln!("  - {} ({format:?}): {}", path.display(), err);
        }
        panic!("{} demo run(s) failed unexpectedly", failed.len());
    }

    println!("✅ All {} demo documents passed", demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_demos = collect_toml_files(demos_path().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo in &error_demos {
        let output = temp_dir.path().join(format!(
            "error_{}.txt",
            demo.file_stem().unwrap().to_string_lossy()
        ));
        let args = args(demo, output, FormatArg::Text, ReportKindArg::Horizontal);

        if run(&args).is_ok() {
            unexpectedly_succeeded.push(demo.clone());
        }
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
fn e2e_format_follows_output_extension() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demo = demos_path().join("mainline.toml");
    let output = temp_dir.path().join("mainline.xml");

    let args = Args {
        format: None,
        ..args(&demo, output.clone(), FormatArg::Text, ReportKindArg::Vertical)
    };
    run(&args).expect("Vertical XML report should succeed");

    let xml = fs::read_to_string(&output).expect("Output should be readable");
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<Name>Layout</Name>"));
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = args(
        &temp_dir.path().join("absent.toml"),
        temp_dir.path().join("out.txt"),
        FormatArg::Text,
        ReportKindArg::Horizontal,
    );

    assert!(run(&args).is_err());
}
