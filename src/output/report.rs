use sheetsplit::{OutcomeStatus, ProcessingReport};

use crate::output::format::{
    create_styled_table, format_number, header_cell, right_cell, status_color, styled_cell,
};

pub(crate) fn output_report_json(report: &ProcessingReport) -> serde_json::Value {
    let counts = report.counts();
    let by_sheet: Vec<serde_json::Value> = report
        .by_sheet()
        .iter()
        .map(|g| {
            serde_json::json!({
                "sheet": g.key,
                "success": g.counts.success,
                "skipped": g.counts.skipped,
                "error": g.counts.error,
            })
        })
        .collect();
    let by_file: Vec<serde_json::Value> = report
        .by_source_file()
        .iter()
        .map(|g| {
            serde_json::json!({
                "file": g.key,
                "success": g.counts.success,
                "skipped": g.counts.skipped,
                "error": g.counts.error,
            })
        })
        .collect();

    serde_json::json!({
        "summary": {
            "total": counts.total(),
            "success": counts.success,
            "skipped": counts.skipped,
            "error": counts.error,
            "rows_written": report.rows_written(),
        },
        "by_sheet": by_sheet,
        "by_file": by_file,
        "created_folders": report.created_folders(),
        "records": report.records(),
    })
}

pub(crate) fn print_report(report: &ProcessingReport, use_color: bool) {
    let counts = report.counts();
    let color = |status| use_color.then(|| status_color(status));

    println!("\n  Processing complete");
    println!(
        "  {} successful | {} skipped | {} errors | {} rows written\n",
        format_number(counts.success),
        format_number(counts.skipped),
        format_number(counts.error),
        format_number(report.rows_written())
    );

    if report.is_empty() {
        return;
    }

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Sheet", use_color),
        header_cell("Success", use_color),
        header_cell("Skipped", use_color),
        header_cell("Error", use_color),
    ]);
    for group in report.by_sheet() {
        table.add_row(vec![
            styled_cell(group.key, None, false),
            right_cell(&format_number(group.counts.success), color(OutcomeStatus::Success), false),
            right_cell(&format_number(group.counts.skipped), color(OutcomeStatus::Skipped), false),
            right_cell(&format_number(group.counts.error), color(OutcomeStatus::Error), false),
        ]);
    }
    table.add_row(vec![
        styled_cell("TOTAL", None, true),
        right_cell(&format_number(counts.success), color(OutcomeStatus::Success), true),
        right_cell(&format_number(counts.skipped), color(OutcomeStatus::Skipped), true),
        right_cell(&format_number(counts.error), color(OutcomeStatus::Error), true),
    ]);
    println!("{table}");

    let problems: Vec<_> = report
        .records()
        .iter()
        .filter(|r| !r.is_success())
        .collect();
    if !problems.is_empty() {
        let mut details = create_styled_table();
        details.set_header(vec![
            header_cell("Status", use_color),
            header_cell("File", use_color),
            header_cell("Sheet", use_color),
            header_cell("Reason", use_color),
        ]);
        for record in problems {
            let file = record
                .source_file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| record.source_file.display().to_string());
            details.add_row(vec![
                styled_cell(&record.status.to_string(), color(record.status), false),
                styled_cell(&file, None, false),
                styled_cell(&record.sheet_name, None, false),
                styled_cell(record.reason.as_deref().unwrap_or(""), None, false),
            ]);
        }
        println!("\n{details}");
    }

    let folders = report.created_folders();
    if !folders.is_empty() {
        println!("\n  Output folders written:");
        for folder in folders {
            println!("    {}", folder.display());
        }
    }
    println!();
}
