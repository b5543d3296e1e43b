use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::sort::{SortDirection, SortState, sort_rows};
use crate::table::{Column, RenderOptions, RenderedRow, render_rows};

/// One team's leaderboard line, as presentational text.
/// Serialises with the canonical payload field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScoringRecord {
    #[serde(rename = "TeamID")]
    pub team_id: String,
    pub team_name: String,
    pub owner_name: String,
    pub record: String,
    pub points_for: String,
    pub point_score: String,
    pub record_score: String,
    pub total_score: String,
    pub all_play_record: String,
    pub all_play_percentage: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Loaded { fetched_at: String },
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub rows: Vec<RenderedRow>,
    pub records: Vec<ScoringRecord>,
    pub sort: SortState,
    pub render_options: RenderOptions,
    pub status: LoadStatus,
    pub source_label: String,
    pub header_cursor: usize,
    pub selected: usize,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            rows: Vec::with_capacity(16),
            records: Vec::with_capacity(16),
            sort: SortState::new(),
            render_options: RenderOptions::default(),
            status: LoadStatus::Loading,
            source_label: String::new(),
            header_cursor: 0,
            selected: 0,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        }
    }

    pub fn with_options(render_options: RenderOptions) -> Self {
        Self {
            render_options,
            ..Self::new()
        }
    }

    /// Replace the table with freshly rendered rows in payload order.
    /// A reload starts over with no active sort.
    pub fn set_records(&mut self, records: Vec<ScoringRecord>, fetched_at: String) {
        self.rows = render_rows(&records, self.render_options);
        self.records = records;
        self.sort.reset();
        self.selected = 0;
        self.status = LoadStatus::Loaded { fetched_at };
    }

    /// Equivalent of clicking a column header.
    pub fn click_column(&mut self, column: Column) -> SortDirection {
        let selected_id = self.selected_row().map(|row| row.team_id.clone());
        let direction = self.sort.click(column);
        sort_rows(&mut self.rows, column.index(), column.kind(), direction);
        self.header_cursor = column.index();
        self.reselect(selected_id);
        direction
    }

    pub fn click_header_cursor(&mut self) -> Option<SortDirection> {
        Column::from_index(self.header_cursor).map(|col| self.click_column(col))
    }

    pub fn header_next(&mut self) {
        self.header_cursor = (self.header_cursor + 1) % Column::ALL.len();
    }

    pub fn header_prev(&mut self) {
        self.header_cursor = self
            .header_cursor
            .checked_sub(1)
            .unwrap_or(Column::ALL.len() - 1);
    }

    pub fn select_next(&mut self) {
        if self.rows.is_empty() {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1).min(self.rows.len() - 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_row(&self) -> Option<&RenderedRow> {
        self.rows.get(self.selected)
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    fn reselect(&mut self, team_id: Option<String>) {
        if let Some(id) = team_id
            && let Some(pos) = self.rows.iter().position(|row| row.team_id == id)
        {
            self.selected = pos;
            return;
        }
        self.selected = 0;
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    Loading,
    SetScoring {
        records: Vec<ScoringRecord>,
        fetched_at: String,
    },
    ScoringFailed(String),
    Log(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderCommand {
    Refresh,
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::Loading => {
            state.status = LoadStatus::Loading;
        }
        Delta::SetScoring {
            records,
            fetched_at,
        } => {
            let count = records.len();
            state.set_records(records, fetched_at);
            state.push_log(format!("[INFO] Loaded {count} teams"));
        }
        Delta::ScoringFailed(msg) => {
            state.push_log(format!("[WARN] Scoring unavailable: {msg}"));
            state.status = LoadStatus::Failed(msg);
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}

pub fn status_label(status: &LoadStatus) -> String {
    match status {
        LoadStatus::Loading => "LOADING".to_string(),
        LoadStatus::Loaded { fetched_at } => format!("UPDATED {fetched_at}"),
        LoadStatus::Failed(_) => "FAILED".to_string(),
    }
}
