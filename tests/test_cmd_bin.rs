
use std::io::Write;
use std::process::{Command, Stdio};

const INPUT: &str = r"1
2024-01-01
100
Groceries
1
9999-01-01
20
Rent
4
2
3
";

const EXPECTED_FILE: &str = "Date,Amount,Category\n2024-01-01,100,Groceries\n";

fn run_binary(file: &std::path::Path, input: &str) -> std::process::Output {
    let bin_path = env!("CARGO_BIN_EXE_finance_tracker");

    let mut child = Command::new(bin_path)
        .arg("--file")
        .arg(file)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute binary");

    // The binary may exit before reading stdin when startup fails.
    let mut stdin = child.stdin.take().expect("stdin is piped");
    let _ = stdin.write_all(input.as_bytes());
    drop(stdin);

    child.wait_with_output().expect("Failed to wait for binary")
}

#[test]
fn test_finance_tracker_binary() {
    let dir = tempfile::TempDir::new().expect("Failed to create temporary directory");
    let file = dir.path().join("transactions.csv");

    let output = run_binary(&file, INPUT);
    assert!(output.status.success(),
        "Binary failed with stderr: {}",
        String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Transaction added successfully.").count(), 1, "stdout:\n{}", stdout);
    assert!(stdout.contains("Transaction date is in the future. Please enter a valid date."));
    assert!(stdout.contains("Invalid option, please try again."));
    assert!(stdout.contains("2024-01-01, 100, Groceries"));

    let written = std::fs::read_to_string(&file).expect("Failed to read transactions file");
    assert_eq!(written, EXPECTED_FILE);
}

#[test]
fn test_existing_file_is_reloaded() {
    let dir = tempfile::TempDir::new().expect("Failed to create temporary directory");
    let file = dir.path().join("transactions.csv");
    std::fs::write(&file, "Date,Amount,Category,Description\n2023-05-01,12.5,Fuel,old column\n")
        .expect("Failed to seed transactions file");

    let output = run_binary(&file, "1\n2024-01-01\n100\nGroceries\n2\n3\n");
    assert!(output.status.success(),
        "Binary failed with stderr: {}",
        String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2023-05-01, 12.5, Fuel"));
    assert!(stdout.contains("Total: 112.5"));

    let written = std::fs::read_to_string(&file).expect("Failed to read transactions file");
    assert_eq!(written, "Date,Amount,Category\n2023-05-01,12.5,Fuel\n2024-01-01,100,Groceries\n");
}

#[test]
fn test_unreadable_rows_stop_startup_and_keep_file() {
    let dir = tempfile::TempDir::new().expect("Failed to create temporary directory");
    let file = dir.path().join("transactions.csv");
    let seeded = "Date,Amount,Category\n2023-01-01,,Misc\n2023-03-01,7,Ok\n";
    std::fs::write(&file, seeded).expect("Failed to seed transactions file");

    let output = run_binary(&file, "1\n2024-01-01\n1\nNew\n3\n");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Format error: line 2"), "stderr:\n{}", stderr);

    let written = std::fs::read_to_string(&file).expect("Failed to read transactions file");
    assert_eq!(written, seeded);
}

#[test]
fn test_startup_error_is_printed_plainly() {
    let dir = tempfile::TempDir::new().expect("Failed to create temporary directory");

    // A directory in place of the file fails on first read.
    let output = run_binary(dir.path(), "3\n");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: "), "stderr:\n{}", stderr);
    assert!(!stderr.contains("Os {"), "stderr:\n{}", stderr);
}
