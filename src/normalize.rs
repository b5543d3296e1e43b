use serde_json::{Map, Value};
use thiserror::Error;

use crate::scoring_fetch::ScoringPayload;
use crate::state::ScoringRecord;

const TEAM_ID_KEYS: &[&str] = &["TeamID", "TeamId", "id"];
const TEAM_NAME_KEYS: &[&str] = &["TeamName", "name"];
const OWNER_KEYS: &[&str] = &["OwnerName", "owner_name"];
const RECORD_KEYS: &[&str] = &["Record"];
const POINTS_FOR_KEYS: &[&str] = &["PointsFor", "PointsForString", "pf"];
const POINT_SCORE_KEYS: &[&str] = &["PointScore", "PointScoreString"];
const RECORD_SCORE_KEYS: &[&str] = &["RecordScore", "RecordScoreString"];
const TOTAL_SCORE_KEYS: &[&str] = &["TotalScore", "TotalScoreString"];
const ALL_PLAY_RECORD_KEYS: &[&str] = &["AllPlayRecord"];
const ALL_PLAY_PCT_KEYS: &[&str] = &["AllPlayPercentage", "AllPlayPercentageString"];

#[derive(Debug, Error, PartialEq)]
pub enum PayloadError {
    #[error("expected a list of franchises, found {found}")]
    UnexpectedShape { found: &'static str },

    #[error("franchise #{index} is {found}, expected an object")]
    BadRecord { index: usize, found: &'static str },
}

pub fn normalize_payload(payload: &ScoringPayload) -> Result<Vec<ScoringRecord>, PayloadError> {
    normalize_value(payload.as_value())
}

/// Accepts the canonical flat list, or the legacy `{ "franchise": [...] }` wrapper.
pub fn normalize_value(value: &Value) -> Result<Vec<ScoringRecord>, PayloadError> {
    let list = match value {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("franchise") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(PayloadError::UnexpectedShape {
                    found: json_kind(other),
                });
            }
            None => {
                return Err(PayloadError::UnexpectedShape {
                    found: "an object without `franchise`",
                });
            }
        },
        other => {
            return Err(PayloadError::UnexpectedShape {
                found: json_kind(other),
            });
        }
    };

    list.iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(record_from_map(map)),
            other => Err(PayloadError::BadRecord {
                index,
                found: json_kind(other),
            }),
        })
        .collect()
}

fn record_from_map(map: &Map<String, Value>) -> ScoringRecord {
    ScoringRecord {
        team_id: pick_text(map, TEAM_ID_KEYS),
        team_name: pick_text(map, TEAM_NAME_KEYS),
        owner_name: pick_text(map, OWNER_KEYS),
        record: pick_text(map, RECORD_KEYS),
        points_for: pick_text(map, POINTS_FOR_KEYS),
        point_score: pick_text(map, POINT_SCORE_KEYS),
        record_score: pick_text(map, RECORD_SCORE_KEYS),
        total_score: pick_text(map, TOTAL_SCORE_KEYS),
        all_play_record: pick_text(map, ALL_PLAY_RECORD_KEYS),
        all_play_percentage: pick_text(map, ALL_PLAY_PCT_KEYS),
    }
}

// First present, non-null key wins. Missing fields render as empty cells.
fn pick_text(map: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find_map(value_text)
        .unwrap_or_default()
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
