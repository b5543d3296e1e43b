use std::cmp::Ordering;

use crate::state::ScoringRecord;
use crate::table::{Column, RenderOptions, RenderedRow, cell_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnToggle {
    #[default]
    None,
    Ascending,
    Descending,
}

impl ColumnToggle {
    pub fn direction(self) -> Option<SortDirection> {
        match self {
            ColumnToggle::None => None,
            ColumnToggle::Ascending => Some(SortDirection::Ascending),
            ColumnToggle::Descending => Some(SortDirection::Descending),
        }
    }
}

/// One toggle per column. At most one column is active at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    toggles: [ColumnToggle; Column::ALL.len()],
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header activation: resets every other column, then flips this one.
    /// A column that was not active starts at ascending.
    pub fn click(&mut self, column: Column) -> SortDirection {
        let next = match self.toggles[column.index()] {
            ColumnToggle::None | ColumnToggle::Descending => ColumnToggle::Ascending,
            ColumnToggle::Ascending => ColumnToggle::Descending,
        };
        self.toggles = [ColumnToggle::None; Column::ALL.len()];
        self.toggles[column.index()] = next;
        match next {
            ColumnToggle::Descending => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }

    pub fn toggle(&self, column: Column) -> ColumnToggle {
        self.toggles[column.index()]
    }

    pub fn active(&self) -> Option<(Column, SortDirection)> {
        Column::ALL
            .into_iter()
            .find_map(|col| self.toggle(col).direction().map(|dir| (col, dir)))
    }

    pub fn reset(&mut self) {
        self.toggles = [ColumnToggle::None; Column::ALL.len()];
    }
}

/// Compare two cells of one column.
///
/// Numeric cells compare by parsed value; a cell that does not parse sorts
/// after every numeric cell regardless of direction. Text cells compare by
/// code point.
pub fn compare_cells(a: &str, b: &str, kind: ColumnKind, direction: SortDirection) -> Ordering {
    match kind {
        ColumnKind::Text => directed(a.cmp(b), direction),
        ColumnKind::Numeric => match (parse_numeric(a), parse_numeric(b)) {
            (Some(x), Some(y)) => directed(x.total_cmp(&y), direction),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        },
    }
}

/// Stable in-place sort of rendered rows by the cell at `column_index`.
pub fn sort_rows(
    rows: &mut [RenderedRow],
    column_index: usize,
    kind: ColumnKind,
    direction: SortDirection,
) {
    rows.sort_by(|a, b| {
        let x = a.cells.get(column_index).map(String::as_str).unwrap_or("");
        let y = b.cells.get(column_index).map(String::as_str).unwrap_or("");
        compare_cells(x, y, kind, direction)
    });
}

/// Same ordering as [`sort_rows`], applied to records by their rendered cell text.
pub fn sort_records(
    records: &mut [ScoringRecord],
    column: Column,
    direction: SortDirection,
    options: RenderOptions,
) {
    let kind = column.kind();
    records.sort_by(|a, b| {
        let x = cell_text(a, column, options);
        let y = cell_text(b, column, options);
        compare_cells(&x, &y, kind, direction)
    });
}

fn directed(ord: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim().trim_end_matches('%').trim_end();
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}
