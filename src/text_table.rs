use crate::sort::SortState;
use crate::table::{Column, RenderedRow};

/// Plain-text table with centered cells, for terminals and logs.
pub fn render_text_table(rows: &[RenderedRow], sort: &SortState) -> String {
    let headers: Vec<String> = Column::ALL
        .iter()
        .map(|col| match sort.toggle(*col).direction() {
            Some(dir) => format!("{} {}", col.label(), dir.arrow()),
            None => col.label().to_string(),
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (idx, cell) in row.cells.iter().enumerate() {
            if let Some(width) = widths.get_mut(idx) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let separator = {
        let parts: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
        format!("+{}+", parts.join("+"))
    };

    let mut lines = vec![separator.clone(), format_line(&headers, &widths), separator.clone()];
    for row in rows {
        lines.push(format_line(&row.cells, &widths));
    }
    lines.push(separator);
    lines.join("\n")
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let parts: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(idx, width)| {
            let cell = cells.get(idx).map(String::as_str).unwrap_or("");
            format!(" {} ", center(cell, *width))
        })
        .collect();
    format!("|{}|", parts.join("|"))
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let pad = width - len;
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_splits_padding() {
        assert_eq!(center("ab", 5), " ab  ");
        assert_eq!(center("abcdef", 3), "abcdef");
    }

    #[test]
    fn table_has_one_line_per_row_plus_frame() {
        let rows = vec![RenderedRow {
            team_id: "0001".to_string(),
            cells: vec!["Ravens".to_string(); Column::ALL.len()],
        }];
        let out = render_text_table(&rows, &SortState::new());
        assert_eq!(out.lines().count(), 5);
        assert!(out.contains("| Team Name |"));
    }
}
