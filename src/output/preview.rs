use std::path::Path;

use sheetsplit::sanitize_sheet_name;

use crate::output::format::{create_styled_table, header_cell, right_cell, styled_cell};

pub(crate) fn output_preview_json(file: &Path, sheet_names: &[String]) -> serde_json::Value {
    let sheets: Vec<serde_json::Value> = sheet_names
        .iter()
        .map(|name| {
            serde_json::json!({
                "sheet": name,
                "folder": sanitize_sheet_name(name),
            })
        })
        .collect();
    serde_json::json!({
        "file": file,
        "sheets": sheets,
    })
}

pub(crate) fn print_preview_table(file: &Path, sheet_names: &[String], use_color: bool) {
    println!("\n  Sheets in {}\n", file.display());
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("#", use_color),
        header_cell("Sheet", use_color),
        header_cell("Output Folder", use_color),
    ]);
    for (i, name) in sheet_names.iter().enumerate() {
        table.add_row(vec![
            right_cell(&(i + 1).to_string(), None, false),
            styled_cell(name, None, false),
            styled_cell(&sanitize_sheet_name(name), None, false),
        ]);
    }
    println!("{table}\n");
}
