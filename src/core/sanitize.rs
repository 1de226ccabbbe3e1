use crate::consts::DEFAULT_SHEET_NAME;

/// Characters that cannot appear in a folder or file name on common filesystems
const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Map a sheet name to a filesystem-safe token usable as folder and file stem.
///
/// Dots, ellipses, reserved characters and whitespace become `_`, runs of `_`
/// collapse to one, and leading/trailing `_` or spaces are stripped. Names that
/// end up empty become `"Sheet"`. The mapping is deterministic and idempotent.
pub fn sanitize_sheet_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let replace = c == '.'
            || c == '…'
            || c.is_whitespace()
            || c.is_control()
            || RESERVED.contains(&c);
        let c = if replace { '_' } else { c };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }

    let trimmed = out.trim_matches(|c: char| c == '_' || c == ' ');
    if trimmed.is_empty() {
        DEFAULT_SHEET_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}
