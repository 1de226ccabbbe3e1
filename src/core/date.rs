use chrono::NaiveDate;

use crate::core::types::{DateGrammar, PartitionDate};

/// Parse a partition folder name into a date.
///
/// Grammars are tried in [`DateGrammar::ALL`] order; the first one whose shape
/// matches the whole name and whose digits form a real calendar date wins.
pub fn parse_partition_date(name: &str) -> Option<PartitionDate> {
    DateGrammar::ALL
        .iter()
        .find_map(|&grammar| parse_with(name, grammar))
}

fn parse_with(name: &str, grammar: DateGrammar) -> Option<PartitionDate> {
    let bytes = name.as_bytes();
    let (year, month, day) = match grammar.separator() {
        Some(sep) => {
            let sep = sep as u8;
            if bytes.len() != 10 || bytes[4] != sep || bytes[7] != sep {
                return None;
            }
            (&bytes[0..4], &bytes[5..7], &bytes[8..10])
        }
        None => {
            if bytes.len() != 8 {
                return None;
            }
            (&bytes[0..4], &bytes[4..6], &bytes[6..8])
        }
    };

    let year = digits(year)? as i32;
    let month = digits(month)?;
    let day = digits(day)?;
    NaiveDate::from_ymd_opt(year, month, day).map(|date| PartitionDate::new(date, grammar))
}

fn digits(part: &[u8]) -> Option<u32> {
    if !part.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(
        part.iter()
            .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0')),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_grammar() {
        let cases = [
            ("2024-01-15", DateGrammar::Dashed),
            ("2024.01.15", DateGrammar::Dotted),
            ("2024_01_15", DateGrammar::Underscored),
            ("20240115", DateGrammar::Compact),
        ];
        for (name, grammar) in cases {
            let pd = parse_partition_date(name).unwrap_or_else(|| panic!("{name} should parse"));
            assert_eq!(pd.grammar(), grammar);
            assert_eq!(pd.date(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        }
    }

    #[test]
    fn reformat_reproduces_folder_name() {
        for name in ["2024-02-29", "1999.12.31", "2030_06_01", "20001001"] {
            let pd = parse_partition_date(name).unwrap();
            assert_eq!(pd.folder_name(), name);
        }
    }

    #[test]
    fn rejects_invalid_calendar_values() {
        assert!(parse_partition_date("2024-13-40").is_none());
        assert!(parse_partition_date("2023-02-29").is_none());
        assert!(parse_partition_date("2024.00.10").is_none());
        assert!(parse_partition_date("20241301").is_none());
        assert!(parse_partition_date("2024_04_31").is_none());
    }

    #[test]
    fn rejects_non_date_names() {
        for name in [
            "notadate",
            "",
            "2024-1-15",
            "2024-01-15x",
            " 2024-01-15",
            "2024/01/15",
            "2024-01.15",
            "202401150",
            "2024011",
            "+2024-01-15",
            "２０２４０１１５",
        ] {
            assert!(parse_partition_date(name).is_none(), "{name:?} should not parse");
        }
    }
}
