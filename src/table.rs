//! Column layout and the record → row renderer.
//!
//! Cell order in a [`RenderedRow`] always follows [`Column::ALL`], so a
//! column's index is also its cell index.

use crate::sort::ColumnKind;
use crate::state::ScoringRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    TeamName,
    Owner,
    Record,
    PointsFor,
    PointScore,
    RecordScore,
    TotalScore,
    AllPlayRecord,
    AllPlayPct,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::TeamName,
        Column::Owner,
        Column::Record,
        Column::PointsFor,
        Column::PointScore,
        Column::RecordScore,
        Column::TotalScore,
        Column::AllPlayRecord,
        Column::AllPlayPct,
    ];

    pub fn index(self) -> usize {
        match self {
            Column::TeamName => 0,
            Column::Owner => 1,
            Column::Record => 2,
            Column::PointsFor => 3,
            Column::PointScore => 4,
            Column::RecordScore => 5,
            Column::TotalScore => 6,
            Column::AllPlayRecord => 7,
            Column::AllPlayPct => 8,
        }
    }

    pub fn from_index(index: usize) -> Option<Column> {
        Column::ALL.get(index).copied()
    }

    /// Stable token used for HTML ids and CLI arguments.
    pub fn id(self) -> &'static str {
        match self {
            Column::TeamName => "team",
            Column::Owner => "owner",
            Column::Record => "record",
            Column::PointsFor => "points_for",
            Column::PointScore => "point_score",
            Column::RecordScore => "record_score",
            Column::TotalScore => "total",
            Column::AllPlayRecord => "allplay_record",
            Column::AllPlayPct => "allplay_pct",
        }
    }

    pub fn from_id(id: &str) -> Option<Column> {
        let id = id.trim();
        Column::ALL
            .into_iter()
            .find(|col| col.id().eq_ignore_ascii_case(id))
    }

    pub fn label(self) -> &'static str {
        match self {
            Column::TeamName => "Team Name",
            Column::Owner => "Owner",
            Column::Record => "W-L-T",
            Column::PointsFor => "Fantasy Pts",
            Column::PointScore => "Pts Score",
            Column::RecordScore => "Rcrd Score",
            Column::TotalScore => "Total Pts",
            Column::AllPlayRecord => "AllPlay W-L-T",
            Column::AllPlayPct => "AllPlay %",
        }
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            Column::TeamName | Column::Owner | Column::Record | Column::AllPlayRecord => {
                ColumnKind::Text
            }
            Column::PointsFor
            | Column::PointScore
            | Column::RecordScore
            | Column::TotalScore
            | Column::AllPlayPct => ColumnKind::Numeric,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Show team ids instead of team names and blank out owners.
    pub hide_names: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub team_id: String,
    pub cells: Vec<String>,
}

impl RenderedRow {
    pub fn cell(&self, column: Column) -> &str {
        self.cells
            .get(column.index())
            .map(String::as_str)
            .unwrap_or("")
    }
}

pub fn render_rows(records: &[ScoringRecord], options: RenderOptions) -> Vec<RenderedRow> {
    records
        .iter()
        .map(|record| render_row(record, options))
        .collect()
}

pub fn render_row(record: &ScoringRecord, options: RenderOptions) -> RenderedRow {
    RenderedRow {
        team_id: record.team_id.clone(),
        cells: Column::ALL
            .iter()
            .map(|col| cell_text(record, *col, options))
            .collect(),
    }
}

pub fn cell_text(record: &ScoringRecord, column: Column, options: RenderOptions) -> String {
    match column {
        Column::TeamName if options.hide_names => record.team_id.clone(),
        Column::TeamName => record.team_name.clone(),
        Column::Owner if options.hide_names => String::new(),
        Column::Owner => first_name(&record.owner_name).to_string(),
        Column::Record => record.record.clone(),
        Column::PointsFor => record.points_for.clone(),
        Column::PointScore => format_float_text(&record.point_score),
        Column::RecordScore => record.record_score.clone(),
        Column::TotalScore => record.total_score.clone(),
        Column::AllPlayRecord => record.all_play_record.clone(),
        Column::AllPlayPct => record.all_play_percentage.clone(),
    }
}

/// Record as it may be shown: with hidden names the team name becomes the
/// team id and the owner is blank. Numbers keep their payload text.
pub fn masked_record(record: &ScoringRecord, options: RenderOptions) -> ScoringRecord {
    if !options.hide_names {
        return record.clone();
    }
    ScoringRecord {
        team_name: record.team_id.clone(),
        owner_name: String::new(),
        ..record.clone()
    }
}

pub fn first_name(owner: &str) -> &str {
    owner.split_whitespace().next().unwrap_or("")
}

/// Shortest float form: `"12.50"` → `12.5`, `"9.0"` → `9`. Non-numbers stay as-is.
pub fn format_float_text(raw: &str) -> String {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => format!("{value}"),
        _ => raw.to_string(),
    }
}
