//! Leaderboard scoring computed from raw league data.
//!
//! Each team earns two rank-based scores: a *point score* from fantasy points
//! scored and a *record score* from its head-to-head record. With `n` teams the
//! leader of a ranking earns `n`, the next `n - 1`, down to `1` for last place.
//! Tied teams split the points of the places they occupy evenly. The total of
//! both scores decides the standings.

use std::cmp::Ordering;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::allplay_scrape::AllPlayTeamStats;
use crate::mfl_fetch::{LeagueResponse, LeagueStandingsResponse, MflSnapshot};
use crate::state::ScoringRecord;

/// Serialises to the canonical scoring payload shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Franchise {
    #[serde(rename = "TeamID")]
    pub team_id: String,
    pub team_name: String,
    pub owner_name: String,
    pub record_wins: u32,
    pub record_losses: u32,
    pub record_ties: u32,
    pub record: String,
    pub points_for: f64,
    pub points_for_string: String,
    pub point_score: f64,
    pub point_score_string: String,
    pub record_magic: f64,
    pub record_score: f64,
    pub record_score_string: String,
    pub total_score: f64,
    pub total_score_string: String,
    pub all_play_wins: u32,
    pub all_play_losses: u32,
    pub all_play_ties: u32,
    pub all_play_record: String,
    pub all_play_percentage: f64,
    pub all_play_percentage_string: String,
}

impl Franchise {
    pub fn to_scoring_record(&self) -> ScoringRecord {
        ScoringRecord {
            team_id: self.team_id.clone(),
            team_name: self.team_name.clone(),
            owner_name: self.owner_name.clone(),
            record: self.record.clone(),
            points_for: self.points_for_string.clone(),
            point_score: self.point_score_string.clone(),
            record_score: self.record_score_string.clone(),
            total_score: self.total_score_string.clone(),
            all_play_record: self.all_play_record.clone(),
            all_play_percentage: self.all_play_percentage_string.clone(),
        }
    }
}

/// Full pipeline: association, both rank scores, totals, all-play, final order.
pub fn build_scoreboard(snapshot: &MflSnapshot) -> Result<Vec<Franchise>> {
    check_response_parity(&snapshot.league, &snapshot.standings)?;

    let mut franchises = associate_standings(&snapshot.league, &snapshot.standings)?;
    populate_head_to_head_records(&mut franchises);

    sort_desc_by(&mut franchises, |f| f.points_for);
    calculate_point_score(&mut franchises);

    calculate_record_magic(&mut franchises);
    sort_desc_by(&mut franchises, |f| f.record_magic);
    calculate_record_score(&mut franchises);

    calculate_total_score(&mut franchises);

    append_all_play(&mut franchises, &snapshot.all_play)?;
    populate_all_play_records(&mut franchises);

    sort_franchises(&mut franchises);
    Ok(franchises)
}

pub fn build_scoring_records(snapshot: &MflSnapshot) -> Result<Vec<ScoringRecord>> {
    Ok(build_scoreboard(snapshot)?
        .iter()
        .map(Franchise::to_scoring_record)
        .collect())
}

pub fn check_response_parity(
    league: &LeagueResponse,
    standings: &LeagueStandingsResponse,
) -> Result<()> {
    let franchises = &league.league.franchises;
    let declared: usize = franchises
        .count
        .trim()
        .parse()
        .with_context(|| format!("franchise count {:?} is not a number", franchises.count))?;
    let listed = franchises.franchise.len();
    let standings_len = standings.league_standings.franchise.len();

    if declared != listed || declared != standings_len {
        return Err(anyhow!(
            "responses disagree on franchise count (league count {declared}, league list {listed}, standings {standings_len})"
        ));
    }
    Ok(())
}

/// One `Franchise` per league entry, filled from the standings row with the same id.
/// Franchises without a standings row keep zeroed stats.
pub fn associate_standings(
    league: &LeagueResponse,
    standings: &LeagueStandingsResponse,
) -> Result<Vec<Franchise>> {
    league
        .league
        .franchises
        .franchise
        .iter()
        .map(|entry| {
            let mut franchise = Franchise {
                team_id: entry.id.clone(),
                team_name: entry.name.clone(),
                owner_name: entry.owner_name.clone(),
                ..Franchise::default()
            };
            let row = standings
                .league_standings
                .franchise
                .iter()
                .find(|row| row.id == entry.id);
            if let Some(row) = row {
                franchise.record_wins = parse_count(&row.record_wins, "h2hw", &entry.id)?;
                franchise.record_losses = parse_count(&row.record_losses, "h2hl", &entry.id)?;
                franchise.record_ties = parse_count(&row.record_ties, "h2ht", &entry.id)?;
                franchise.points_for = parse_float(&row.points_for, "pf", &entry.id)?;
                franchise.points_for_string = row.points_for.clone();
            }
            Ok(franchise)
        })
        .collect()
}

pub fn populate_head_to_head_records(franchises: &mut [Franchise]) {
    for f in franchises {
        f.record = format_record(f.record_wins, f.record_losses, f.record_ties);
    }
}

/// Expects `franchises` sorted by points-for, best first.
pub fn calculate_point_score(franchises: &mut [Franchise]) {
    let scores = shared_rank_scores(franchises, |f| f.points_for);
    for (f, score) in franchises.iter_mut().zip(scores) {
        f.point_score = score;
        f.point_score_string = format_one_decimal(score);
    }
}

pub fn calculate_record_magic(franchises: &mut [Franchise]) {
    for f in franchises {
        f.record_magic = f64::from(f.record_wins) + f64::from(f.record_ties) * 0.5;
    }
}

/// Expects `franchises` sorted by record magic, best first.
pub fn calculate_record_score(franchises: &mut [Franchise]) {
    let scores = shared_rank_scores(franchises, |f| f.record_magic);
    for (f, score) in franchises.iter_mut().zip(scores) {
        f.record_score = score;
        f.record_score_string = format_one_decimal(score);
    }
}

pub fn calculate_total_score(franchises: &mut [Franchise]) {
    for f in franchises {
        f.total_score = f.point_score + f.record_score;
        f.total_score_string = format_one_decimal(f.total_score);
    }
}

/// Copy all-play stats onto franchises by exact team name.
pub fn append_all_play(franchises: &mut [Franchise], all_play: &[AllPlayTeamStats]) -> Result<()> {
    for f in franchises.iter_mut() {
        for stats in all_play.iter().filter(|s| s.franchise_name == f.team_name) {
            let name = stats.franchise_name.as_str();
            f.all_play_wins = parse_count(&stats.all_play_wins, "all-play wins", name)?;
            f.all_play_losses = parse_count(&stats.all_play_losses, "all-play losses", name)?;
            f.all_play_ties = parse_count(&stats.all_play_ties, "all-play ties", name)?;
            f.all_play_percentage =
                parse_float(&stats.all_play_percentage, "all-play percentage", name)?;
            f.all_play_percentage_string = stats.all_play_percentage.clone();
        }
    }
    Ok(())
}

pub fn populate_all_play_records(franchises: &mut [Franchise]) {
    for f in franchises {
        f.all_play_record = format_record(f.all_play_wins, f.all_play_losses, f.all_play_ties);
    }
}

/// Final standings: total score, then fantasy points, then all-play percentage.
pub fn sort_franchises(franchises: &mut [Franchise]) {
    franchises.sort_by(|a, b| {
        desc(a.total_score, b.total_score)
            .then_with(|| desc(a.points_for, b.points_for))
            .then_with(|| desc(a.all_play_percentage, b.all_play_percentage))
    });
}

fn shared_rank_scores(franchises: &[Franchise], key: impl Fn(&Franchise) -> f64) -> Vec<f64> {
    let n = franchises.len();
    let mut scores = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let current = key(&franchises[i]);
        let tied = franchises[i..]
            .iter()
            .take_while(|f| key(f) == current)
            .count()
            .max(1);
        // Places i..i+tied are worth n-i, n-i-1, ...
        let pool: f64 = (0..tied).map(|k| (n - i - k) as f64).sum();
        let share = pool / tied as f64;
        for score in &mut scores[i..i + tied] {
            *score = share;
        }
        i += tied;
    }
    scores
}

fn sort_desc_by(franchises: &mut [Franchise], key: impl Fn(&Franchise) -> f64) {
    franchises.sort_by(|a, b| desc(key(a), key(b)));
}

fn desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

fn format_record(wins: u32, losses: u32, ties: u32) -> String {
    format!("{wins}-{losses}-{ties}")
}

fn format_one_decimal(value: f64) -> String {
    format!("{value:.1}")
}

fn parse_count(raw: &str, field: &str, team: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .with_context(|| format!("{field} {raw:?} for {team} is not a whole number"))
}

fn parse_float(raw: &str, field: &str, team: &str) -> Result<f64> {
    let value = raw
        .trim()
        .parse::<f64>()
        .with_context(|| format!("{field} {raw:?} for {team} is not a number"))?;
    if !value.is_finite() {
        return Err(anyhow!("{field} {raw:?} for {team} is not a finite number"));
    }
    Ok(value)
}
