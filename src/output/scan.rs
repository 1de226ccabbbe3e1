use comfy_table::Color;
use std::path::Path;

use sheetsplit::ScanResult;

use crate::output::format::{
    create_styled_table, format_number, header_cell, right_cell, styled_cell,
};

pub(crate) fn output_scan_json(
    root: &Path,
    scan: &ScanResult,
    existing_outputs: Option<usize>,
) -> serde_json::Value {
    serde_json::json!({
        "root": root,
        "total_partitions": scan.total_partitions(),
        "total_files": scan.total_files(),
        "existing_output_files": existing_outputs,
        "partitions": scan.partitions,
        "files": scan.files,
    })
}

pub(crate) fn print_scan_table(
    root: &Path,
    scan: &ScanResult,
    existing_outputs: Option<usize>,
    use_color: bool,
) {
    if scan.is_empty() {
        println!("No date folders found under {}.", root.display());
        println!("Expected subfolders named YYYY-MM-DD, YYYY.MM.DD, YYYY_MM_DD or YYYYMMDD.");
        return;
    }

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Folder Name", use_color),
        header_cell("Date", use_color),
        header_cell("Files", use_color),
        header_cell("Path", use_color),
    ]);

    for partition in &scan.partitions {
        let files_color = (use_color && partition.file_count == 0).then_some(Color::Yellow);
        table.add_row(vec![
            styled_cell(&partition.name, None, false),
            styled_cell(&partition.date.iso(), None, false),
            right_cell(&format_number(partition.file_count), files_color, false),
            styled_cell(&partition.path.display().to_string(), None, false),
        ]);
    }

    println!("{table}");
    println!(
        "\n  {} date folders | {} spreadsheet files",
        format_number(scan.total_partitions()),
        format_number(scan.total_files())
    );
    if let Some(count) = existing_outputs {
        println!("  {} existing output files", format_number(count));
    }
    println!();
}
