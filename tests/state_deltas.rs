mod common;

use mfl_scoreboard::sort::SortDirection;
use mfl_scoreboard::state::{
    AppState, Delta, LoadStatus, ScoringRecord, apply_delta, status_label,
};
use mfl_scoreboard::table::{Column, RenderOptions};

use common::record;

fn two_teams() -> Vec<ScoringRecord> {
    vec![
        record("0001", "Ravens", "Jane Doe", "12.5"),
        record("0002", "Bears", "Sam Lee", "9"),
    ]
}

#[test]
fn set_scoring_renders_rows_and_logs() {
    let mut state = AppState::new();
    assert_eq!(state.status, LoadStatus::Loading);

    apply_delta(
        &mut state,
        Delta::SetScoring {
            records: two_teams(),
            fetched_at: "2026-10-16 09:00".to_string(),
        },
    );

    assert_eq!(state.rows.len(), 2);
    assert_eq!(state.records.len(), 2);
    assert_eq!(state.rows[0].cell(Column::Owner), "Jane");
    assert_eq!(
        state.status,
        LoadStatus::Loaded {
            fetched_at: "2026-10-16 09:00".to_string()
        }
    );
    assert_eq!(status_label(&state.status), "UPDATED 2026-10-16 09:00");
    assert_eq!(
        state.logs.back().map(String::as_str),
        Some("[INFO] Loaded 2 teams")
    );
}

#[test]
fn failure_before_any_data_leaves_an_empty_table() {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::Loading);
    apply_delta(
        &mut state,
        Delta::ScoringFailed("request failed with status 500".to_string()),
    );

    assert!(state.rows.is_empty());
    assert_eq!(
        state.status,
        LoadStatus::Failed("request failed with status 500".to_string())
    );
    assert_eq!(status_label(&state.status), "FAILED");
    assert!(
        state
            .logs
            .iter()
            .any(|l| l.starts_with("[WARN]") && l.contains("status 500"))
    );
}

#[test]
fn failed_refresh_keeps_previous_rows() {
    let mut state = AppState::new();
    apply_delta(
        &mut state,
        Delta::SetScoring {
            records: two_teams(),
            fetched_at: "09:00".to_string(),
        },
    );
    apply_delta(&mut state, Delta::Loading);
    apply_delta(&mut state, Delta::ScoringFailed("timed out".to_string()));

    assert_eq!(state.rows.len(), 2);
    assert!(matches!(state.status, LoadStatus::Failed(_)));
}

#[test]
fn reload_discards_active_sort() {
    let mut state = AppState::new();
    apply_delta(
        &mut state,
        Delta::SetScoring {
            records: two_teams(),
            fetched_at: "09:00".to_string(),
        },
    );
    state.click_column(Column::TotalScore);
    assert_eq!(
        state.sort.active(),
        Some((Column::TotalScore, SortDirection::Ascending))
    );
    assert_eq!(state.rows[0].team_id, "0002");

    apply_delta(
        &mut state,
        Delta::SetScoring {
            records: two_teams(),
            fetched_at: "09:05".to_string(),
        },
    );
    assert_eq!(state.sort.active(), None);
    assert_eq!(state.rows[0].team_id, "0001");
    assert_eq!(state.selected, 0);
}

#[test]
fn hidden_names_apply_to_loaded_rows() {
    let mut state = AppState::with_options(RenderOptions { hide_names: true });
    apply_delta(
        &mut state,
        Delta::SetScoring {
            records: two_teams(),
            fetched_at: "09:00".to_string(),
        },
    );
    assert_eq!(state.rows[1].cell(Column::TeamName), "0002");
    assert_eq!(state.rows[1].cell(Column::Owner), "");
}

#[test]
fn log_is_capped() {
    let mut state = AppState::new();
    for i in 0..250 {
        apply_delta(&mut state, Delta::Log(format!("line {i}")));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.front().map(String::as_str), Some("line 50"));
    assert_eq!(state.logs.back().map(String::as_str), Some("line 249"));
}
