//! Standalone HTML report.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::models::{is_link_column, ResultTable};

use super::is_linkable;

/// Stylesheet shared by the report and the web front end
pub(crate) const STYLE: &str = r#"
    body { font-family: Arial, sans-serif; line-height: 1.6; margin: 20px; background-color: #f5f5f5; }
    h1 { color: #333; text-align: center; margin-bottom: 20px; }
    .container { max-width: 1200px; margin: 0 auto; background-color: white; padding: 20px; border-radius: 5px; box-shadow: 0 0 10px rgba(0, 0, 0, 0.1); }
    table { width: 100%; border-collapse: collapse; margin-bottom: 20px; }
    th, td { padding: 12px 15px; text-align: left; border-bottom: 1px solid #ddd; }
    th { background-color: #4CAF50; color: white; position: sticky; top: 0; }
    tr:hover { background-color: #f5f5f5; }
    a { color: #2196F3; text-decoration: none; }
    a:hover { text-decoration: underline; }
    .footer { text-align: center; margin-top: 20px; color: #666; font-size: 0.9em; }
    .search-info { margin-bottom: 20px; padding: 10px; background-color: #e7f3fe; border-left: 6px solid #2196F3; }
    .error { padding: 10px; background-color: #fdecea; border-left: 6px solid #f44336; }
"#;

/// Render the results `<table>` element alone
pub(crate) fn render_table(table: &ResultTable) -> String {
    let mut out = String::from("<table>\n<thead><tr>");
    for column in table.columns() {
        out.push_str(&format!("<th>{}</th>", encode_text(column)));
    }
    out.push_str("</tr></thead>\n<tbody>\n");

    for row in table.rows() {
        out.push_str("<tr>");
        for (idx, value) in row.cells().iter().enumerate() {
            if is_link_column(idx) && is_linkable(value) {
                out.push_str(&format!(
                    r#"<td><a href="{}" target="_blank">{}</a></td>"#,
                    encode_double_quoted_attribute(value),
                    encode_text(value)
                ));
            } else {
                out.push_str(&format!("<td>{}</td>", encode_text(value)));
            }
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>");
    out
}

/// Render a complete page for `table`
pub fn render_html(table: &ResultTable, keywords: &[String], timestamp: &str) -> String {
    let mut info = format!(
        "<p>Search time: {}</p>\n<p>Total papers found: {}</p>",
        encode_text(timestamp),
        table.len()
    );
    if !keywords.is_empty() {
        info.push_str(&format!("\n<p>Keywords: {}</p>", encode_text(&keywords.join(", "))));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Paper Search Results</title>
<style>{style}</style>
</head>
<body>
<div class="container">
<h1>Paper Search Results</h1>
<div class="search-info">
{info}
</div>
{table}
<div class="footer">
<p>Generated by paper-harvest</p>
</div>
</div>
</body>
</html>
"#,
        style = STYLE,
        info = info,
        table = render_table(table),
    )
}
