use std::fs;
use std::ops::ControlFlow;
use std::path::Path;

use sheetsplit::consts::{REASON_ALREADY_EXISTS, UNKNOWN};
use sheetsplit::sample::{SheetSpec, write_workbook};
use sheetsplit::{OutcomeStatus, run, scan};
use tempfile::TempDir;

fn report_rows(label: &str) -> Vec<Vec<String>> {
    [
        vec!["", "title", "", ""],
        vec!["", "", "", ""],
        vec!["", "", "", ""],
        vec!["", "", "", ""],
        vec!["", "Item", "Qty", "Note"],
        vec!["", label, "3", "a, b"],
        vec!["", "", "", ""],
        vec!["", "second", "4.5", ""],
    ]
    .into_iter()
    .map(|row| row.into_iter().map(str::to_string).collect())
    .collect()
}

fn convert_all(input: &Path, output: &Path) -> sheetsplit::ProcessingReport {
    let result = scan(input).expect("scan");
    run(&result.files, output, |_| ControlFlow::Continue(()))
}

#[test]
fn mixed_grammars_and_broken_file() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("in");
    let output = tmp.path().join("out");
    for folder in ["2024.02.01", "20240202"] {
        fs::create_dir_all(input.join(folder)).unwrap();
    }
    write_workbook(
        &input.join("2024.02.01").join("a.xlsx"),
        &[SheetSpec::new("Sales v1.2", &report_rows("first"))],
    )
    .unwrap();
    fs::write(input.join("20240202").join("broken.xlsx"), b"not a workbook").unwrap();

    let report = convert_all(&input, &output);
    assert_eq!(report.len(), 2);

    let ok = &report.records()[0];
    assert_eq!(ok.status, OutcomeStatus::Success);
    assert_eq!(ok.rows_written, Some(2));
    let csv = output.join("Sales_v1_2").join("Sales_v1_2 20240201.csv");
    assert_eq!(ok.output_path.as_deref(), Some(csv.as_path()));
    assert_eq!(
        fs::read_to_string(&csv).unwrap(),
        "Date,Item,Qty,Note\n2024-02-01,first,3,\"a, b\"\n2024-02-01,second,4.5,\n"
    );

    let broken = &report.records()[1];
    assert_eq!(broken.status, OutcomeStatus::Error);
    assert_eq!(broken.sheet_name, UNKNOWN);
    assert!(broken.reason.is_some());
    assert_eq!(report.created_folders().len(), 1);
}

#[test]
fn rerun_never_overwrites() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("in");
    let output = tmp.path().join("out");
    fs::create_dir_all(input.join("2024_03_05")).unwrap();
    write_workbook(
        &input.join("2024_03_05").join("b.xlsx"),
        &[
            SheetSpec::new("One", &report_rows("x")),
            SheetSpec::new("Two", &report_rows("y")),
        ],
    )
    .unwrap();

    let first = convert_all(&input, &output);
    assert_eq!(first.counts().success, 2);

    let target = output.join("One").join("One 20240305.csv");
    fs::write(&target, "edited by hand\n").unwrap();

    let second = convert_all(&input, &output);
    assert_eq!(second.counts().success, 0);
    assert_eq!(second.counts().skipped, 2);
    assert!(
        second
            .records()
            .iter()
            .all(|r| r.reason.as_deref() == Some(REASON_ALREADY_EXISTS))
    );
    assert_eq!(fs::read_to_string(&target).unwrap(), "edited by hand\n");
}
