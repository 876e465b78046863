//! Application configuration: environment first, command line on top.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::types::ROUND_SECONDS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub seed: u32,
    pub round_seconds: u32,
    pub sound: bool,
    pub log_path: Option<PathBuf>,
    pub journal_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            round_seconds: ROUND_SECONDS,
            sound: true,
            log_path: None,
            journal_path: None,
        }
    }
}

impl AppConfig {
    /// Read `MEMORY_MATCH_*` variables. Values that do not parse are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(seed) = lookup("MEMORY_MATCH_SEED").and_then(|s| s.trim().parse().ok()) {
            config.seed = seed;
        }
        if let Some(secs) = lookup("MEMORY_MATCH_ROUND_SECONDS")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&s| s > 0)
        {
            config.round_seconds = secs;
        }
        if let Some(sound) = lookup("MEMORY_MATCH_SOUND") {
            config.sound = !matches!(sound.trim().to_ascii_lowercase().as_str(), "0" | "false" | "off" | "no");
        }
        config.log_path = non_empty_path(lookup("MEMORY_MATCH_LOG_PATH"));
        config.journal_path = non_empty_path(lookup("MEMORY_MATCH_JOURNAL_PATH"));

        config
    }

    /// Apply command-line overrides (program name already stripped).
    pub fn apply_args(mut self, args: &[String]) -> Result<Self> {
        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => {
                    i += 1;
                    let v = args.get(i).ok_or_else(|| anyhow!("missing value for --seed"))?;
                    self.seed = v
                        .parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
                }
                "--seconds" => {
                    i += 1;
                    let v = args.get(i).ok_or_else(|| anyhow!("missing value for --seconds"))?;
                    self.round_seconds = v
                        .parse::<u32>()
                        .ok()
                        .filter(|&s| s > 0)
                        .ok_or_else(|| anyhow!("invalid --seconds value: {}", v))?;
                }
                "--mute" => self.sound = false,
                "--log" => {
                    i += 1;
                    let v = args.get(i).ok_or_else(|| anyhow!("missing value for --log"))?;
                    self.log_path = Some(PathBuf::from(v));
                }
                "--journal" => {
                    i += 1;
                    let v = args.get(i).ok_or_else(|| anyhow!("missing value for --journal"))?;
                    self.journal_path = Some(PathBuf::from(v));
                }
                other => return Err(anyhow!("unknown argument: {}", other)),
            }
            i += 1;
        }
        Ok(self)
    }

    /// Environment plus the process arguments
    pub fn load() -> Result<Self> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::from_env().apply_args(&args)
    }
}

fn non_empty_path(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

fn clock_seed() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
