mod common;

use mfl_scoreboard::allplay_scrape::{AllPlayTeamStats, parse_all_play_html};
use mfl_scoreboard::league_scoring::{
    Franchise, append_all_play, associate_standings, build_scoreboard, build_scoring_records,
    calculate_point_score, calculate_record_magic, calculate_record_score, calculate_total_score,
    check_response_parity, populate_all_play_records, populate_head_to_head_records,
    sort_franchises,
};
use mfl_scoreboard::mfl_fetch::{MflSnapshot, parse_league_json, parse_standings_json};
use mfl_scoreboard::normalize::normalize_value;

use common::read_fixture;

fn fixture_snapshot() -> MflSnapshot {
    MflSnapshot {
        league: parse_league_json(&read_fixture("mfl_league.json")).expect("league fixture"),
        standings: parse_standings_json(&read_fixture("mfl_standings.json"))
            .expect("standings fixture"),
        all_play: parse_all_play_html(&read_fixture("mfl_power_rankings.html")),
    }
}

fn with<F: FnOnce(&mut Franchise)>(f: F) -> Franchise {
    let mut franchise = Franchise::default();
    f(&mut franchise);
    franchise
}

#[test]
fn record_magic_counts_ties_as_half_wins() {
    let mut teams = vec![
        with(|f| {
            f.record_wins = 6;
            f.record_ties = 1;
        }),
        with(|f| {
            f.record_wins = 3;
            f.record_ties = 7;
        }),
        with(|f| f.record_wins = 1),
    ];
    calculate_record_magic(&mut teams);
    let magic: Vec<f64> = teams.iter().map(|f| f.record_magic).collect();
    assert_eq!(magic, vec![6.5, 6.5, 1.0]);
}

#[test]
fn total_score_is_formatted_to_one_decimal() {
    let mut teams = vec![
        with(|f| {
            f.point_score = 3.0;
            f.record_score = 4.5;
        }),
        with(|f| {
            f.point_score = 7.0;
            f.record_score = 9.0;
        }),
        with(|f| {
            f.point_score = 2.0;
            f.record_score = 1.5;
        }),
    ];
    calculate_total_score(&mut teams);
    let totals: Vec<&str> = teams.iter().map(|f| f.total_score_string.as_str()).collect();
    assert_eq!(totals, vec!["7.5", "16.0", "3.5"]);
}

#[test]
fn tied_records_split_their_places() {
    let mut teams: Vec<Franchise> = [8.5, 8.5, 7.0, 5.0]
        .into_iter()
        .map(|magic| with(|f| f.record_magic = magic))
        .collect();
    calculate_record_score(&mut teams);

    let scores: Vec<f64> = teams.iter().map(|f| f.record_score).collect();
    assert_eq!(scores, vec![3.5, 3.5, 2.0, 1.0]);
    let strings: Vec<&str> = teams.iter().map(|f| f.record_score_string.as_str()).collect();
    assert_eq!(strings, vec!["3.5", "3.5", "2.0", "1.0"]);
}

#[test]
fn tied_points_split_their_places() {
    let mut teams: Vec<Franchise> = [15.0, 15.0, 10.0, 5.0]
        .into_iter()
        .map(|pf| with(|f| f.points_for = pf))
        .collect();
    calculate_point_score(&mut teams);

    let scores: Vec<f64> = teams.iter().map(|f| f.point_score).collect();
    assert_eq!(scores, vec![3.5, 3.5, 2.0, 1.0]);
    assert_eq!(teams[2].point_score_string, "2.0");
}

#[test]
fn standings_order_by_total_score() {
    let mut teams = vec![
        with(|f| {
            f.total_score = 10.0;
            f.points_for = 20.0;
            f.all_play_percentage = 0.5;
        }),
        with(|f| {
            f.total_score = 30.0;
            f.points_for = 30.0;
            f.all_play_percentage = 0.4;
        }),
        with(|f| {
            f.total_score = 20.0;
            f.points_for = 10.0;
            f.all_play_percentage = 0.6;
        }),
    ];
    sort_franchises(&mut teams);
    let totals: Vec<f64> = teams.iter().map(|f| f.total_score).collect();
    assert_eq!(totals, vec![30.0, 20.0, 10.0]);
}

#[test]
fn standings_ties_fall_back_to_points_then_all_play() {
    let team = |id: &str, pf: f64, pct: f64| {
        with(|f| {
            f.team_id = id.to_string();
            f.total_score = 10.0;
            f.points_for = pf;
            f.all_play_percentage = pct;
        })
    };
    let mut teams = vec![
        team("3", 20.0, 0.56),
        team("1", 20.0, 0.59),
        team("0", 20.0, 0.51),
        team("2", 21.0, 0.51),
    ];
    sort_franchises(&mut teams);
    let ids: Vec<&str> = teams.iter().map(|f| f.team_id.as_str()).collect();
    assert_eq!(ids, vec!["2", "1", "3", "0"]);
}

#[test]
fn mismatched_franchise_counts_are_an_error() {
    let mut snapshot = fixture_snapshot();
    assert!(check_response_parity(&snapshot.league, &snapshot.standings).is_ok());

    snapshot.standings.league_standings.franchise.pop();
    let err = check_response_parity(&snapshot.league, &snapshot.standings)
        .expect_err("standings list is short");
    assert!(err.to_string().contains("standings 3"));
    assert!(build_scoreboard(&snapshot).is_err());

    let mut snapshot = fixture_snapshot();
    snapshot.league.league.franchises.count = "four".to_string();
    assert!(check_response_parity(&snapshot.league, &snapshot.standings).is_err());
}

#[test]
fn standings_attach_to_league_franchises_by_id() {
    let snapshot = fixture_snapshot();
    let mut teams =
        associate_standings(&snapshot.league, &snapshot.standings).expect("numeric standings");
    populate_head_to_head_records(&mut teams);

    assert_eq!(teams.len(), 4);
    let ghosts = &teams[0];
    assert_eq!(ghosts.team_id, "0001");
    assert_eq!(ghosts.team_name, "Gridiron Ghosts");
    assert_eq!(ghosts.owner_name, "Jane Doe");
    assert_eq!(
        (ghosts.record_wins, ghosts.record_losses, ghosts.record_ties),
        (9, 4, 1)
    );
    assert_eq!(ghosts.points_for, 1650.5);
    assert_eq!(ghosts.points_for_string, "1650.5");
    assert_eq!(ghosts.record, "9-4-1");
}

#[test]
fn non_numeric_standings_are_rejected() {
    let mut snapshot = fixture_snapshot();
    snapshot.standings.league_standings.franchise[1].record_wins = "nine".to_string();
    let err = associate_standings(&snapshot.league, &snapshot.standings)
        .expect_err("wins must be a whole number");
    assert!(format!("{err:#}").contains("0002"));
}

#[test]
fn non_finite_points_for_is_rejected() {
    for raw in ["NaN", "inf", "-infinity"] {
        let mut snapshot = fixture_snapshot();
        snapshot.standings.league_standings.franchise[0].points_for = raw.to_string();
        let err = build_scoreboard(&snapshot).expect_err("points for must be finite");
        let msg = format!("{err:#}");
        assert!(msg.contains("pf") && msg.contains("0001"), "message was {msg}");
    }
}

#[test]
fn non_finite_all_play_percentage_is_rejected() {
    let mut teams = vec![with(|f| f.team_name = "Gridiron Ghosts".to_string())];
    let stats = vec![AllPlayTeamStats {
        franchise_name: "Gridiron Ghosts".to_string(),
        all_play_wins: "1".to_string(),
        all_play_losses: "1".to_string(),
        all_play_ties: "0".to_string(),
        all_play_percentage: "NaN".to_string(),
    }];
    assert!(append_all_play(&mut teams, &stats).is_err());
}

#[test]
fn power_rankings_page_yields_team_rows_only() {
    let stats = parse_all_play_html(&read_fixture("mfl_power_rankings.html"));
    assert_eq!(stats.len(), 4);
    assert_eq!(
        stats[0],
        AllPlayTeamStats {
            franchise_name: "Touchdown Turtles".to_string(),
            all_play_wins: "30".to_string(),
            all_play_losses: "12".to_string(),
            all_play_ties: "0".to_string(),
            all_play_percentage: ".714".to_string(),
        }
    );
    let names: Vec<&str> = stats.iter().map(|s| s.franchise_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Touchdown Turtles",
            "Gridiron Ghosts",
            "Blitz Brigade",
            "End Zone Envy"
        ]
    );
}

#[test]
fn all_play_stats_attach_by_team_name() {
    let mut teams = vec![
        with(|f| f.team_name = "Gridiron Ghosts".to_string()),
        with(|f| f.team_name = "Nobody Home".to_string()),
    ];
    let stats = parse_all_play_html(&read_fixture("mfl_power_rankings.html"));
    append_all_play(&mut teams, &stats).expect("numeric all-play cells");
    populate_all_play_records(&mut teams);

    assert_eq!(teams[0].all_play_record, "28-13-1");
    assert_eq!(teams[0].all_play_percentage, 0.679);
    assert_eq!(teams[0].all_play_percentage_string, ".679");
    assert_eq!(teams[1].all_play_record, "0-0-0");
    assert_eq!(teams[1].all_play_percentage_string, "");
}

#[test]
fn fixture_league_scores_end_to_end() {
    let board = build_scoreboard(&fixture_snapshot()).expect("fixture league scores");

    let summary: Vec<(&str, f64, f64, f64)> = board
        .iter()
        .map(|f| {
            (
                f.team_id.as_str(),
                f.point_score,
                f.record_score,
                f.total_score,
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("0002", 4.0, 3.0, 7.0),
            ("0001", 2.5, 4.0, 6.5),
            ("0003", 2.5, 2.0, 4.5),
            ("0004", 1.0, 1.0, 2.0),
        ]
    );
    assert_eq!(board[1].record_magic, 9.5);
    assert_eq!(board[0].all_play_record, "30-12-0");
    assert_eq!(board[3].all_play_percentage_string, ".143");
}

#[test]
fn computed_scoreboard_reads_back_through_the_normalizer() {
    let board = build_scoreboard(&fixture_snapshot()).expect("fixture league scores");
    let payload = serde_json::to_value(&board).expect("franchises serialize");

    let first = &payload[0];
    assert_eq!(first["TeamID"], "0002");
    assert_eq!(first["TotalScoreString"], "7.0");
    assert_eq!(first["TotalScore"], 7.0);

    let records = normalize_value(&payload).expect("canonical shape");
    let direct = build_scoring_records(&fixture_snapshot()).expect("fixture league scores");
    assert_eq!(records.len(), direct.len());
    assert_eq!(records[0].team_name, direct[0].team_name);
    assert_eq!(records[0].record, "9-5-0");
    assert_eq!(direct[0].total_score, "7.0");
    assert_eq!(direct[0].points_for, "1712.3");
}
