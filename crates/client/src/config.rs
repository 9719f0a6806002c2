//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Result, bail};
use game_core::{GameConfig, PlayerSetup};

const DEFAULT_ROSTER: &str = "Yan Hui:ai,Zilu:ai,Zigong:ai";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub roster: Vec<PlayerSetup>,
    pub session_id: String,
    /// Mirror logs to stderr in addition to the session log file.
    pub log_stderr: bool,
    /// Directory holding `config.toml` and content overrides.
    pub data_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Reads `SAGE_PLAYERS`, `SAGE_SESSION_ID`, `SAGE_LOG_STDERR` and
    /// `SAGE_DATA_DIR`.
    pub fn from_env() -> Result<Self> {
        let roster = match env::var("SAGE_PLAYERS") {
            Ok(value) => parse_roster(&value)?,
            Err(_) => parse_roster(DEFAULT_ROSTER)?,
        };
        let session_id = env::var("SAGE_SESSION_ID").unwrap_or_else(|_| default_session_id());

        Ok(Self {
            roster,
            session_id,
            log_stderr: read_env("SAGE_LOG_STDERR").unwrap_or(true),
            data_dir: env::var_os("SAGE_DATA_DIR").map(PathBuf::from),
        })
    }
}

/// Parses `name[:ai|:human]` entries separated by commas.
pub fn parse_roster(value: &str) -> Result<Vec<PlayerSetup>> {
    let mut roster = Vec::new();
    for entry in value.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, kind) = match entry.rsplit_once(':') {
            Some((name, kind)) => (name.trim(), kind.trim()),
            None => (entry, "human"),
        };
        if name.is_empty() {
            bail!("empty player name in '{entry}'");
        }
        let player = match kind.to_ascii_lowercase().as_str() {
            "ai" => PlayerSetup::ai(name),
            "human" => PlayerSetup::human(name),
            other => bail!("unknown player kind '{other}' for {name}"),
        };
        roster.push(player);
    }

    let count = roster.len();
    if !(GameConfig::MIN_PLAYERS..=GameConfig::MAX_PLAYERS).contains(&count) {
        bail!(
            "a game needs {}-{} players, got {count}",
            GameConfig::MIN_PLAYERS,
            GameConfig::MAX_PLAYERS
        );
    }
    Ok(roster)
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn default_session_id() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!("session-{secs}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_defaults_to_human_players() {
        let roster = parse_roster("Yan Hui, Zigong:ai").unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].character, "Yan Hui");
        assert!(!roster[0].is_ai);
        assert_eq!(roster[1].character, "Zigong");
        assert!(roster[1].is_ai);
    }

    #[test]
    fn roster_rejects_bad_entries() {
        assert!(parse_roster("Zilu").is_err());
        assert!(parse_roster("Zilu:robot,Zigong").is_err());
        assert!(parse_roster(":ai,Zigong").is_err());
        assert!(parse_roster("a,b,c,d,e").is_err());
    }

    #[test]
    fn default_roster_is_valid() {
        let roster = parse_roster(DEFAULT_ROSTER).unwrap();
        assert_eq!(roster.len(), 3);
        assert!(roster.iter().all(|p| p.is_ai));
    }
}
