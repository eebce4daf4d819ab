//! Markdown report with a pipe table.

use crate::models::{is_link_column, ResultTable};
use crate::utils::truncate_chars;

use super::is_linkable;

/// Non-link cells longer than this are shortened
const MAX_CELL_CHARS: usize = 100;

/// Prepare one cell value for a pipe table
///
/// Link cells become `[Link](url)` first. Everything is then escaped so it
/// cannot break the row, and long non-link text is truncated.
fn format_cell(column: usize, value: &str) -> String {
    let link = is_link_column(column);
    let value = if link && is_linkable(value) {
        format!("[Link]({})", value)
    } else {
        value.to_string()
    };

    let escaped = value
        .replace('|', "\\|")
        .replace('\n', " ")
        .replace('\r', "")
        .replace('_', "\\_")
        .replace('*', "\\*");

    if link {
        escaped
    } else {
        truncate_chars(&escaped, MAX_CELL_CHARS)
    }
}

fn table_row(cells: &[String]) -> String {
    format!("| {} |\n", cells.join(" | "))
}

/// Render the full Markdown document for `table`
pub fn render_markdown(table: &ResultTable, keywords: &[String], timestamp: &str) -> String {
    let mut md = String::from("# Paper Search Results\n\n## Search Information\n\n");
    md.push_str(&format!("- Search time: {}\n", timestamp));
    let keyword_text = if keywords.is_empty() {
        "None".to_string()
    } else {
        keywords.join(", ")
    };
    md.push_str(&format!("- Keywords: {}\n", keyword_text));
    md.push_str(&format!("- Total papers found: {}\n\n", table.len()));

    md.push_str("## Paper List\n\n");
    let header: Vec<String> = table.columns().iter().map(|c| c.to_string()).collect();
    let separator = vec!["---".to_string(); header.len()];
    md.push_str(&table_row(&header));
    md.push_str(&table_row(&separator));

    for row in table.rows() {
        let cells: Vec<String> = row
            .cells()
            .iter()
            .enumerate()
            .map(|(idx, value)| format_cell(idx, value))
            .collect();
        md.push_str(&table_row(&cells));
    }

    md.push_str("\n\n*Generated by paper-harvest*");
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::sample_table;
    use crate::models::{Candidate, MatchResult, PaperRecord};

    /// Split a rendered row on unescaped pipes
    fn column_count(line: &str) -> usize {
        let mut count = 0;
        let mut prev = ' ';
        for ch in line.chars() {
            if ch == '|' && prev != '\\' {
                count += 1;
            }
            prev = ch;
        }
        count - 1
    }

    fn table_lines(md: &str) -> Vec<&str> {
        md.lines().filter(|l| l.starts_with("| ")).collect()
    }

    #[test]
    fn test_preamble() {
        let md = render_markdown(&sample_table(), &["diffusion".to_string(), "nerf".to_string()], "2025-06-01 12:00:00");
        assert!(md.starts_with("# Paper Search Results\n"));
        assert!(md.contains("- Search time: 2025-06-01 12:00:00\n"));
        assert!(md.contains("- Keywords: diffusion, nerf\n"));
        assert!(md.contains("- Total papers found: 2\n"));
        assert!(md.ends_with("*Generated by paper-harvest*"));

        let md = render_markdown(&sample_table(), &[], "now");
        assert!(md.contains("- Keywords: None\n"));
    }

    #[test]
    fn test_row_count_and_links() {
        let md = render_markdown(&sample_table(), &[], "now");
        let lines = table_lines(&md);
        // header, separator, two rows
        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("[Link](http://arxiv.org/abs/2401.01234v2)"));
        assert!(lines[3].contains("| Not Found |"));
    }

    #[test]
    fn test_escaping_keeps_column_count() {
        let md = render_markdown(&sample_table(), &[], "now");
        for line in table_lines(&md) {
            assert_eq!(column_count(line), 5, "line: {}", line);
        }
        assert!(md.contains(r"Pipes \| and \*stars\* in\_titles"));
    }

    #[test]
    fn test_newlines_flattened() {
        assert_eq!(format_cell(0, "line one\r\nline two"), "line one line two");
    }

    #[test]
    fn test_truncation() {
        let long_title = "word ".repeat(40);
        let cell = format_cell(0, &long_title);
        assert_eq!(cell.chars().count(), 100);
        assert!(cell.ends_with("..."));

        let exactly = "x".repeat(100);
        assert_eq!(format_cell(4, &exactly), exactly);
    }

    #[test]
    fn test_links_never_truncated() {
        let long_url = format!("http://arxiv.org/abs/{}", "9".repeat(120));
        let cell = format_cell(2, &long_url);
        assert_eq!(cell, format!("[Link]({})", long_url));

        let record = PaperRecord::try_new("A Sufficiently Long Title", "").unwrap();
        let candidate = Candidate::new("A Sufficiently Long Title", long_url.clone());
        let table = ResultTable::new(vec![MatchResult::matched(&record, &candidate, long_url.clone())]);
        let md = render_markdown(&table, &[], "now");
        assert_eq!(md.matches(&format!("[Link]({})", long_url)).count(), 2);
    }
}
