use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use anyhow::{Context, Result};
use chrono::Local;
use reqwest::blocking::Client;

use crate::config::{ScoreboardConfig, ScoringSource};
use crate::http_client::http_client;
use crate::league_scoring::build_scoring_records;
use crate::mfl_fetch::fetch_snapshot;
use crate::normalize::normalize_payload;
use crate::scoring_fetch::fetch_scoring;
use crate::state::{Delta, ProviderCommand, ScoringRecord};

/// Loads once immediately, then once per `Refresh` command, until the command
/// channel closes.
pub fn spawn_scoring_provider(
    config: ScoreboardConfig,
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
) {
    thread::spawn(move || {
        let client = match http_client(config.timeout) {
            Ok(client) => client,
            Err(err) => {
                let _ = tx.send(Delta::ScoringFailed(format!("{err:#}")));
                return;
            }
        };

        load_and_report(client, &config, &tx);
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                ProviderCommand::Refresh => load_and_report(client, &config, &tx),
            }
        }
    });
}

/// One fetch → normalise pass, reported to the UI as deltas.
pub fn load_and_report(client: &Client, config: &ScoreboardConfig, tx: &Sender<Delta>) {
    let _ = tx.send(Delta::Loading);
    let _ = tx.send(Delta::Log(format!(
        "[INFO] Fetching scoring ({})",
        config.source.label()
    )));
    match load_records(client, config) {
        Ok(records) => {
            let _ = tx.send(Delta::SetScoring {
                records,
                fetched_at: Local::now().format("%Y-%m-%d %H:%M").to_string(),
            });
        }
        Err(err) => {
            let _ = tx.send(Delta::ScoringFailed(format!("{err:#}")));
        }
    }
}

pub fn load_records(client: &Client, config: &ScoreboardConfig) -> Result<Vec<ScoringRecord>> {
    match config.source {
        ScoringSource::Endpoint => {
            let payload =
                fetch_scoring(client, &config.scoring_url).context("scoring endpoint")?;
            normalize_payload(&payload).context("scoring payload")
        }
        ScoringSource::Mfl => {
            let snapshot = fetch_snapshot(client, &config.mfl).context("mfl fetch")?;
            build_scoring_records(&snapshot).context("mfl scoring")
        }
    }
}
