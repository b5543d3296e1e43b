use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use chrono::Local;

use mfl_scoreboard::config::{ScoreboardConfig, ScoringSource};
use mfl_scoreboard::feed::load_records;
use mfl_scoreboard::html_render::render_page;
use mfl_scoreboard::http_client::build_client;
use mfl_scoreboard::sort::{SortDirection, SortState, sort_records, sort_rows};
use mfl_scoreboard::table::{Column, RenderOptions, masked_record, render_rows};
use mfl_scoreboard::text_table::render_text_table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Html,
    Text,
    Json,
}

fn main() -> Result<()> {
    let mut config = ScoreboardConfig::load();
    let args = std::env::args().skip(1).collect::<Vec<_>>();

    if let Some(raw) = arg_value(&args, "--source") {
        config.source =
            ScoringSource::parse(&raw).ok_or_else(|| anyhow!("unknown source {raw:?}"))?;
    }
    if args.iter().any(|a| a == "--hide-names") {
        config.hide_names = true;
    }
    let format = match arg_value(&args, "--format").as_deref() {
        None | Some("text") => OutputFormat::Text,
        Some("html") => OutputFormat::Html,
        Some("json") => OutputFormat::Json,
        Some(other) => return Err(anyhow!("unknown format {other:?}")),
    };
    let sort = arg_value(&args, "--sort")
        .map(|raw| parse_sort_arg(&raw))
        .transpose()?;
    let out_path = arg_value(&args, "--out").map(PathBuf::from);

    let client = build_client(config.timeout)?;
    let mut records = load_records(&client, &config)?;
    let options = RenderOptions {
        hide_names: config.hide_names,
    };

    let mut rows = render_rows(&records, options);
    let mut sort_state = SortState::new();
    if let Some((col, want)) = sort {
        let mut dir = sort_state.click(col);
        if dir != want {
            dir = sort_state.click(col);
        }
        sort_rows(&mut rows, col.index(), col.kind(), dir);
        sort_records(&mut records, col, dir, options);
    }

    let output = match format {
        OutputFormat::Text => render_text_table(&rows, &sort_state),
        OutputFormat::Html => {
            let generated = Local::now().format("%Y-%m-%d %H:%M").to_string();
            render_page("MFL Scoreboard", &rows, &sort_state, &generated)
        }
        OutputFormat::Json => {
            let shown: Vec<_> = records.iter().map(|r| masked_record(r, options)).collect();
            serde_json::to_string_pretty(&shown).context("serialize scoring records")?
        }
    };

    match out_path {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("write {}", path.display()))?;
            println!("Wrote {} teams to {}", rows.len(), path.display());
        }
        None => println!("{output}"),
    }
    Ok(())
}

/// `<column-id>` or `<column-id>:desc`.
fn parse_sort_arg(raw: &str) -> Result<(Column, SortDirection)> {
    let (id, dir) = match raw.split_once(':') {
        Some((id, dir)) => (id, dir),
        None => (raw, "asc"),
    };
    let col = Column::from_id(id).ok_or_else(|| {
        let known = Column::ALL.iter().map(|c| c.id()).collect::<Vec<_>>();
        anyhow!("unknown column {id:?} (expected one of {})", known.join(", "))
    })?;
    let dir = match dir.trim().to_ascii_lowercase().as_str() {
        "asc" | "" => SortDirection::Ascending,
        "desc" => SortDirection::Descending,
        other => return Err(anyhow!("unknown sort direction {other:?}")),
    };
    Ok((col, dir))
}

fn arg_value(args: &[String], name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == name
            && let Some(next) = args.get(idx + 1)
            && !next.trim().is_empty()
        {
            return Some(next.trim().to_string());
        }
    }
    None
}
