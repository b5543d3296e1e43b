//! Static HTML output for the leaderboard.
//!
//! Header items carry the same CSS state classes the browser sorter toggles
//! (`filter__link--active`, `asc`, `desc`), so an exported page shows which
//! column the table was sorted by.

use std::fmt::Write as _;

use crate::sort::{ColumnKind, ColumnToggle, SortState};
use crate::table::{Column, RenderedRow};

pub const TABLE_BODY_ID: &str = "table-content";

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_row_html(row: &RenderedRow) -> String {
    let mut out = String::from("<tr class=\"table-row\">");
    for cell in &row.cells {
        let _ = write!(
            out,
            "<td scope=\"col\" class=\"table-data\">{}</td>",
            escape_html(cell)
        );
    }
    out.push_str("</tr>");
    out
}

pub fn render_rows_html(rows: &[RenderedRow]) -> String {
    rows.iter()
        .map(render_row_html)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn header_link_classes(column: Column, sort: &SortState) -> String {
    let mut classes = vec!["filter__link"];
    if column.kind() == ColumnKind::Numeric {
        classes.push("filter__link--number");
    }
    match sort.toggle(column) {
        ColumnToggle::None => {}
        ColumnToggle::Ascending => classes.extend(["filter__link--active", "asc"]),
        ColumnToggle::Descending => classes.extend(["filter__link--active", "desc"]),
    }
    classes.join(" ")
}

pub fn render_header_html(sort: &SortState) -> String {
    let mut out = String::from("<tr class=\"table-header\">");
    for col in Column::ALL {
        let _ = write!(
            out,
            "<th class=\"header__item\"><a id=\"{}\" class=\"{}\" href=\"#\">{}</a></th>",
            col.id(),
            header_link_classes(col, sort),
            escape_html(col.label())
        );
    }
    out.push_str("</tr>");
    out
}

pub fn render_page(title: &str, rows: &[RenderedRow], sort: &SortState, generated_at: &str) -> String {
    let title = escape_html(title);
    format!(
        "<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"utf-8\">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ padding: 0.3rem 0.6rem; text-align: center; border-bottom: 1px solid #ddd; }}
.filter__link {{ color: inherit; text-decoration: none; }}
.filter__link--active {{ font-weight: bold; }}
.filter__link.asc::after {{ content: \" \\25B2\"; }}
.filter__link.desc::after {{ content: \" \\25BC\"; }}
</style>
</head>
<body>
<h1>{title}</h1>
<table class=\"table\">
<thead>
{header}
</thead>
<tbody id=\"{body_id}\" class=\"table-content\">
{body}
</tbody>
</table>
<p class=\"generated\">Generated {generated}</p>
</body>
</html>
",
        header = render_header_html(sort),
        body_id = TABLE_BODY_ID,
        body = render_rows_html(rows),
        generated = escape_html(generated_at),
    )
}
