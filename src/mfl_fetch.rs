use std::thread;

use anyhow::{Context, Result, anyhow};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::allplay_scrape::{AllPlayTeamStats, parse_all_play_html};
use crate::config::MflSettings;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeagueResponse {
    #[serde(default)]
    pub version: String,
    pub league: League,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct League {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub franchises: LeagueFranchises,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeagueFranchises {
    #[serde(default)]
    pub count: String,
    #[serde(default)]
    pub franchise: Vec<LeagueFranchise>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeagueFranchise {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub owner_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeagueStandingsResponse {
    #[serde(rename = "leagueStandings")]
    pub league_standings: LeagueStandings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeagueStandings {
    #[serde(default)]
    pub franchise: Vec<StandingsFranchise>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StandingsFranchise {
    pub id: String,
    #[serde(rename = "h2hw", default)]
    pub record_wins: String,
    #[serde(rename = "h2hl", default)]
    pub record_losses: String,
    #[serde(rename = "h2ht", default)]
    pub record_ties: String,
    #[serde(rename = "pf", default)]
    pub points_for: String,
    #[serde(rename = "pa", default)]
    pub points_against: String,
}

/// Everything the local scoring pipeline needs from MFL.
#[derive(Debug, Clone, Default)]
pub struct MflSnapshot {
    pub league: LeagueResponse,
    pub standings: LeagueStandingsResponse,
    pub all_play: Vec<AllPlayTeamStats>,
}

pub fn export_url(settings: &MflSettings, export_type: &str) -> String {
    let mut url = format!(
        "{}{}/export?TYPE={}&L={}&JSON=1",
        settings.host, settings.year, export_type, settings.league_id
    );
    if let Some(key) = settings.api_key.as_deref() {
        url.push_str("&APIKEY=");
        url.push_str(key);
    }
    url
}

pub fn power_rankings_url(settings: &MflSettings) -> String {
    format!(
        "{}{}/options?L={}&O=101&SORT=ALLPLAY",
        settings.host, settings.year, settings.league_id
    )
}

pub fn fetch_league(client: &Client, settings: &MflSettings) -> Result<LeagueResponse> {
    let body = get_text(client, &export_url(settings, "league")).context("league export")?;
    parse_league_json(&body)
}

pub fn fetch_standings(client: &Client, settings: &MflSettings) -> Result<LeagueStandingsResponse> {
    let body = get_text(client, &export_url(settings, "leagueStandings"))
        .context("leagueStandings export")?;
    parse_standings_json(&body)
}

pub fn fetch_all_play(client: &Client, settings: &MflSettings) -> Result<Vec<AllPlayTeamStats>> {
    let body = get_text(client, &power_rankings_url(settings)).context("power rankings page")?;
    Ok(parse_all_play_html(&body))
}

/// League and standings exports go out in parallel; the report page follows.
pub fn fetch_snapshot(client: &Client, settings: &MflSettings) -> Result<MflSnapshot> {
    let (league, standings) = thread::scope(|scope| {
        let league = scope.spawn(|| fetch_league(client, settings));
        let standings = scope.spawn(|| fetch_standings(client, settings));
        (
            league
                .join()
                .unwrap_or_else(|_| Err(anyhow!("league fetch thread panicked"))),
            standings
                .join()
                .unwrap_or_else(|_| Err(anyhow!("standings fetch thread panicked"))),
        )
    });
    let all_play = fetch_all_play(client, settings)?;
    Ok(MflSnapshot {
        league: league?,
        standings: standings?,
        all_play,
    })
}

pub fn parse_league_json(raw: &str) -> Result<LeagueResponse> {
    serde_json::from_str(raw.trim()).context("invalid league json")
}

pub fn parse_standings_json(raw: &str) -> Result<LeagueStandingsResponse> {
    serde_json::from_str(raw.trim()).context("invalid leagueStandings json")
}

fn get_text(client: &Client, url: &str) -> Result<String> {
    let resp = client.get(url).send().context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow!("http {}", status));
    }
    Ok(body)
}
