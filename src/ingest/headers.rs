//! Header row detection and header cleaning.

use std::collections::{HashMap, HashSet};

use crate::config::ColumnConfig;
use crate::models::CellValue;

/// Characters removed from header text before it is used.
const STRIPPED_HEADER_CHARS: [char; 3] = ['`', '\u{2019}', '\u{2018}'];

/// Returns the index of the first row holding a cell whose text equals `marker`.
pub fn find_header_row(grid: &[Vec<CellValue>], marker: &str) -> Option<usize> {
    grid.iter().position(|row| {
        row.iter()
            .any(|cell| matches!(cell, CellValue::Text(s) if s == marker))
    })
}

/// Cleans one header: drops back-ticks and typographic single quotes, trims
/// whitespace, then applies the configured rename.
pub fn clean_header(raw: &str, columns: &ColumnConfig) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| !STRIPPED_HEADER_CHARS.contains(c))
        .collect();
    let trimmed = stripped.trim();

    match columns.header_renames.get(trimmed) {
        Some(renamed) => renamed.clone(),
        None => trimmed.to_string(),
    }
}

/// Cleans a header row and returns the kept column indices with their names.
///
/// Blank headers are named `Unnamed: <index>`. Repeated raw headers are
/// suffixed `.1`, `.2` and so on before cleaning, so `EPF`, `EPF` becomes
/// `EPF`, `EPF.1`. When cleaning or renaming makes two columns share a
/// name only the first is kept.
pub fn clean_headers(row: &[CellValue], columns: &ColumnConfig) -> Vec<(usize, String)> {
    let raw = row
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            if cell.is_blank() {
                format!("Unnamed: {idx}")
            } else {
                cell.display_text()
            }
        })
        .collect();

    let mut seen = HashSet::new();
    suffix_repeated(raw)
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let header = clean_header(&name, columns);
            if header.is_empty() {
                (idx, format!("Unnamed: {idx}"))
            } else {
                (idx, header)
            }
        })
        .filter(|(_, header)| seen.insert(header.clone()))
        .collect()
}

/// Gives every repeat of a name a `.N` suffix, skipping suffixes already taken.
fn suffix_repeated(names: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    names
        .into_iter()
        .map(|mut name| {
            let mut count = counts.get(&name).copied().unwrap_or(0);
            while count > 0 {
                counts.insert(name.clone(), count + 1);
                name = format!("{name}.{count}");
                count = counts.get(&name).copied().unwrap_or(0);
            }
            counts.insert(name.clone(), 1);
            name
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_find_header_row_skips_title_rows() {
        let grid = vec![
            vec![text("PAYROLL REPORT MARCH")],
            vec![CellValue::Empty],
            vec![text("No."), text("Name")],
            vec![CellValue::Number(1.into()), text("Ali")],
        ];
        assert_eq!(find_header_row(&grid, "No."), Some(2));
        assert_eq!(find_header_row(&grid, "No"), None);
    }

    #[test]
    fn test_clean_header_strips_quotes_and_whitespace() {
        let columns = ColumnConfig::default();
        assert_eq!(clean_header("  EPF\u{2019}ER ", &columns), "EPFER");
        assert_eq!(clean_header("`Soc ER`", &columns), "Soc ER");
        assert_eq!(clean_header("\u{2018}Name\u{2019}", &columns), "Name");
    }

    #[test]
    fn test_clean_header_applies_renames() {
        let columns = ColumnConfig::default();
        assert_eq!(clean_header("EPFEE", &columns), "EPF");
        assert_eq!(clean_header(" SocEE", &columns), "Socso");
        assert_eq!(clean_header("EIS`EE", &columns), "EIS");
    }

    #[test]
    fn test_repeated_raw_headers_are_suffixed() {
        let columns = ColumnConfig::default();
        let row = vec![text("EPF"), text("EPF"), text("EPF.1"), text("EPF")];
        assert_eq!(
            clean_headers(&row, &columns),
            vec![
                (0, "EPF".to_string()),
                (1, "EPF.1".to_string()),
                (2, "EPF.1.1".to_string()),
                (3, "EPF.2".to_string()),
            ]
        );
    }

    #[test]
    fn test_duplicate_headers_keep_first() {
        let columns = ColumnConfig::default();
        let row = vec![text("No."), text("EPFEE"), text("EPF"), CellValue::Empty];
        assert_eq!(
            clean_headers(&row, &columns),
            vec![
                (0, "No.".to_string()),
                (1, "EPF".to_string()),
                (3, "Unnamed: 3".to_string()),
            ]
        );
    }
}
