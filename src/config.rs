use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SCORING_URL: &str =
    "https://3xi97uokw5.execute-api.us-east-1.amazonaws.com/stage/mfl-scoring?output=json";
pub const DEFAULT_MFL_HOST: &str = "https://www46.myfantasyleague.com/";
pub const DEFAULT_MFL_YEAR: &str = "2023";
pub const DEFAULT_MFL_LEAGUE_ID: &str = "15781";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_EXPORT_PATH: &str = "scoreboard.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringSource {
    /// The hosted scoring endpoint that already serves computed rows.
    Endpoint,
    /// Compute the leaderboard locally from the MFL export API.
    Mfl,
}

impl ScoringSource {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "endpoint" | "remote" | "" => Some(ScoringSource::Endpoint),
            "mfl" | "local" => Some(ScoringSource::Mfl),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoringSource::Endpoint => "ENDPOINT",
            ScoringSource::Mfl => "MFL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MflSettings {
    pub host: String,
    pub year: String,
    pub league_id: String,
    pub api_key: Option<String>,
}

impl Default for MflSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_MFL_HOST.to_string(),
            year: DEFAULT_MFL_YEAR.to_string(),
            league_id: DEFAULT_MFL_LEAGUE_ID.to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoreboardConfig {
    pub scoring_url: String,
    pub timeout: Duration,
    pub source: ScoringSource,
    pub hide_names: bool,
    pub mfl: MflSettings,
    pub export_path: PathBuf,
}

impl Default for ScoreboardConfig {
    fn default() -> Self {
        Self {
            scoring_url: DEFAULT_SCORING_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            source: ScoringSource::Endpoint,
            hide_names: false,
            mfl: MflSettings::default(),
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
        }
    }
}

impl ScoreboardConfig {
    /// Load `.env.local` / `.env` (if present) and read settings from the environment.
    pub fn load() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let timeout_secs = get("SCORING_TIMEOUT_SECS")
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .max(1);

        Self {
            scoring_url: get("SCORING_URL").unwrap_or(defaults.scoring_url),
            timeout: Duration::from_secs(timeout_secs),
            source: get("SCOREBOARD_SOURCE")
                .and_then(|val| ScoringSource::parse(&val))
                .unwrap_or(defaults.source),
            hide_names: get("SCOREBOARD_HIDE_NAMES")
                .map(|val| parse_flag(&val))
                .unwrap_or(false),
            mfl: MflSettings {
                host: get("MFL_HOST")
                    .map(|host| with_trailing_slash(&host))
                    .unwrap_or(defaults.mfl.host),
                year: get("MFL_YEAR").unwrap_or(defaults.mfl.year),
                league_id: get("MFL_LEAGUE_ID").unwrap_or(defaults.mfl.league_id),
                api_key: get("MFL_API_KEY"),
            },
            export_path: get("SCOREBOARD_EXPORT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.export_path),
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn with_trailing_slash(host: &str) -> String {
    if host.ends_with('/') {
        host.to_string()
    } else {
        format!("{host}/")
    }
}
