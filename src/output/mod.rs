mod format;
mod preview;
mod report;
mod scan;

pub(crate) use format::print_json;
pub(crate) use preview::{output_preview_json, print_preview_table};
pub(crate) use report::{output_report_json, print_report};
pub(crate) use scan::{output_scan_json, print_scan_table};
