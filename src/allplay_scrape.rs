// Minimal tag scanning for the MFL power-rankings report.
// The page is server-rendered and regular, so no DOM is built.

/// One row of the all-play report, still as page text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllPlayTeamStats {
    pub franchise_name: String,
    pub all_play_wins: String,
    pub all_play_losses: String,
    pub all_play_ties: String,
    pub all_play_percentage: String,
}

// 0-based cell positions in a report row.
const NAME_CELL: usize = 0;
const WINS_CELL: usize = 12;
const LOSSES_CELL: usize = 13;
const TIES_CELL: usize = 14;
const PCT_CELL: usize = 15;

pub fn parse_all_play_html(html: &str) -> Vec<AllPlayTeamStats> {
    let Some(tbody) = report_tbody(html) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut from = 0;
    while let Some((start, end)) = next_tag_block_ci(tbody, "<tr", "</tr>", from) {
        let cells = row_cells(&tbody[start..end]);
        from = end;
        let cell = |idx: usize| cells.get(idx).cloned().unwrap_or_default();
        let stats = AllPlayTeamStats {
            franchise_name: cell(NAME_CELL),
            all_play_wins: cell(WINS_CELL),
            all_play_losses: cell(LOSSES_CELL),
            all_play_ties: cell(TIES_CELL),
            all_play_percentage: cell(PCT_CELL),
        };
        if starts_with_ascii_letter(&stats.franchise_name) {
            out.push(stats);
        }
    }
    out
}

// Header, divider and footer rows do not start with a letter.
fn starts_with_ascii_letter(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}

fn report_tbody(html: &str) -> Option<&str> {
    let lc = html.to_ascii_lowercase();
    let mut from = 0;
    loop {
        let table_start = lc.get(from..)?.find("<table")? + from;
        let open_end = lc[table_start..].find('>')? + table_start;
        let open_tag = &lc[table_start..open_end];
        if has_class(open_tag, "report") {
            let table_end = lc[open_end..]
                .find("</table>")
                .map(|i| i + open_end)
                .unwrap_or(lc.len());
            let body_start = lc[open_end..table_end].find("<tbody").map(|i| i + open_end);
            return match body_start {
                Some(bs) => {
                    let inner_start = lc[bs..].find('>')? + bs + 1;
                    let inner_end = lc[inner_start..table_end]
                        .find("</tbody>")
                        .map(|i| i + inner_start)
                        .unwrap_or(table_end);
                    Some(&html[inner_start..inner_end])
                }
                None => Some(&html[open_end + 1..table_end]),
            };
        }
        from = open_end;
    }
}

fn has_class(open_tag: &str, class: &str) -> bool {
    let Some(pos) = open_tag.find("class=") else {
        return false;
    };
    let rest = &open_tag[pos + "class=".len()..];
    let (quote, rest) = match rest.chars().next() {
        Some(q @ ('"' | '\'')) => (q, &rest[1..]),
        _ => (' ', rest),
    };
    let value = rest.split(quote).next().unwrap_or("");
    value.split_whitespace().any(|c| c == class)
}

fn row_cells(row: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut from = 0;
    while let Some((start, end)) = next_tag_block_ci(row, "<td", "</td>", from) {
        cells.push(strip_tags(inner_after_open_tag(&row[start..end])));
        from = end;
    }
    cells
}

fn next_tag_block_ci(s: &str, open: &str, close: &str, from: usize) -> Option<(usize, usize)> {
    let lc = s.to_ascii_lowercase();
    let start = lc.get(from..)?.find(open)? + from;
    let open_end = lc[start..].find('>')? + start + 1;
    let end = lc[open_end..].find(close)? + open_end + close.len();
    Some((start, end))
}

fn inner_after_open_tag(block: &str) -> &str {
    match (block.find('>'), block.rfind('<')) {
        (Some(oe), Some(cs)) if cs > oe => &block[oe + 1..cs],
        _ => "",
    }
}

fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&decode_entities(&out))
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
