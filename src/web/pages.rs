//! HTML pages served by the front end.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::export::html::{render_table, STYLE};
use crate::models::ResultTable;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<div class="container">
<h1>{title}</h1>
{body}
</div>
</body>
</html>
"#,
        title = encode_text(title),
        style = STYLE,
        body = body,
    )
}

pub(super) fn form_page(default_url: &str) -> String {
    let body = format!(
        r#"<form method="post" action="/fetch">
<p><label for="url">Listing URL</label><br>
<input type="text" id="url" name="url" size="80" value="{url}"></p>
<p><label for="keywords">Keywords (comma separated)</label><br>
<input type="text" id="keywords" name="keywords" size="80" placeholder="diffusion, nerf"></p>
<p><label for="output_format">Output format</label><br>
<select id="output_format" name="output_format">
<option value="html" selected>HTML</option>
<option value="csv">CSV</option>
<option value="excel">Excel</option>
<option value="markdown">Markdown</option>
</select></p>
<p><button type="submit">Search</button></p>
</form>
<p class="footer">Every matched paper is looked up on arXiv, so large listings take a while.</p>"#,
        url = encode_double_quoted_attribute(default_url),
    );
    layout("Paper Search", &body)
}

pub(super) fn results_page(table: &ResultTable, keywords: &[String], timestamp: &str) -> String {
    let keyword_text = if keywords.is_empty() {
        "None".to_string()
    } else {
        keywords.join(", ")
    };
    let body = format!(
        r#"<div class="search-info">
<p>Search time: {timestamp}</p>
<p>Keywords: {keywords}</p>
<p>Total papers found: {total}</p>
<p>Found on arXiv: {matched}</p>
</div>
{table}
<p><a href="/">New search</a></p>"#,
        timestamp = encode_text(timestamp),
        keywords = encode_text(&keyword_text),
        total = table.len(),
        matched = table.matched_count(),
        table = render_table(table),
    );
    layout("Paper Search Results", &body)
}

pub(super) fn error_page(message: &str) -> String {
    let body = format!(
        r#"<p class="error">{}</p>
<p><a href="/">Back to search</a></p>"#,
        encode_text(message)
    );
    layout("Error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_escapes_default_url() {
        let html = form_page(r#"https://example.org/?a="b""#);
        assert!(html.contains("&quot;b&quot;"));
        assert!(html.contains(r#"name="output_format""#));
    }

    #[test]
    fn test_error_page() {
        let html = error_page("No papers <found>");
        assert!(html.contains("No papers &lt;found&gt;"));
        assert!(html.contains(r#"href="/""#));
    }

    #[test]
    fn test_results_page() {
        let html = results_page(&ResultTable::default(), &[], "2025-06-01 12:00:00");
        assert!(html.contains("Keywords: None"));
        assert!(html.contains("Total papers found: 0"));
    }
}
