//! Session parameters handed over by the launcher on the command line.
//!
//! Only the cosmetic memory value is range-checked by clap. A bad seed is not an error: the
//! session falls back to the wall clock and says so in the log once logging is running.

use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use serde::{Deserialize, Serialize};

pub const RANDOM_DREAM: &str = "Random Dream";

pub const DREAM_LEVELS: [&str; 6] = [
    "Haunted Hallway (B3313-Style)",
    "Shifting Color Plains",
    "Lost Daisy World",
    "Mario's Recurring Room",
    "Beta Skybox Maze",
    "Infinite Fuzzy Platforms",
];

pub const DEFAULT_MEMORY_MB: u32 = 64;

/// Command-line arguments passed in by the launcher.
#[derive(Debug, Parser)]
#[command(author, version, about = "SMM64 dream platformer", long_about = None)]
pub struct SessionArgs {
    /// Dream level to enter; "Random Dream" picks one of the built-in names from the seed.
    #[arg(long = "level", value_name = "NAME", default_value = RANDOM_DREAM)]
    pub level: String,
    /// Integer seed for the level and colors. Anything unparsable falls back to the current time.
    #[arg(long, value_name = "INTEGER", allow_hyphen_values = true)]
    pub seed: Option<String>,
    /// Allocated dream RAM shown in the HUD. Purely cosmetic.
    #[arg(
        long = "memory-mb",
        value_name = "MEGABYTES",
        default_value_t = DEFAULT_MEMORY_MB,
        value_parser = clap::value_parser!(u32).range(32..=512)
    )]
    pub memory_mb: u32,
    /// Print the generated level as JSON and exit without opening a window.
    #[arg(long)]
    pub dump_level: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedSource {
    Parsed,
    /// The argument was missing or was not an integer.
    Clock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionParams {
    pub level_name: String,
    pub seed: i64,
    pub seed_source: SeedSource,
    pub memory_mb: u32,
}

impl SessionArgs {
    pub fn resolve(&self) -> SessionParams {
        let parsed = self.seed.as_deref().map(|text| text.trim().parse::<i64>());
        let (seed, seed_source) = match parsed {
            Some(Ok(seed)) => (seed, SeedSource::Parsed),
            _ => (clock_seed(), SeedSource::Clock),
        };

        SessionParams {
            level_name: resolve_level_name(&self.level, seed),
            seed,
            seed_source,
            memory_mb: self.memory_mb,
        }
    }
}

fn resolve_level_name(requested: &str, seed: i64) -> String {
    if requested.trim().eq_ignore_ascii_case(RANDOM_DREAM) {
        let index = seed.rem_euclid(DREAM_LEVELS.len() as i64) as usize;
        DREAM_LEVELS[index].to_owned()
    } else {
        requested.to_owned()
    }
}

fn clock_seed() -> i64 {
    let elapsed = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => d,
        Err(err) => err.duration(),
    };
    elapsed.as_secs() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<SessionArgs, clap::Error> {
        let argv = std::iter::once("dream_platformer").chain(args.iter().copied());
        SessionArgs::try_parse_from(argv)
    }

    #[test]
    fn defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.level, RANDOM_DREAM);
        assert_eq!(args.memory_mb, 64);
        assert!(!args.dump_level);

        let params = args.resolve();
        assert_eq!(params.seed_source, SeedSource::Clock);
        assert!(DREAM_LEVELS.contains(&params.level_name.as_str()));
    }

    #[test]
    fn explicit_parameters_pass_through() {
        let params = parse(&[
            "--level",
            "Beta Skybox Maze",
            "--seed",
            "-17",
            "--memory-mb",
            "512",
        ])
        .unwrap()
        .resolve();

        assert_eq!(
            params,
            SessionParams {
                level_name: "Beta Skybox Maze".to_owned(),
                seed: -17,
                seed_source: SeedSource::Parsed,
                memory_mb: 512,
            }
        );
    }

    #[test]
    fn malformed_seed_falls_back_to_clock() {
        let params = parse(&["--seed", "twelve"]).unwrap().resolve();
        assert_eq!(params.seed_source, SeedSource::Clock);
        assert!(params.seed > 0);
    }

    #[test]
    fn memory_outside_slider_range_is_rejected() {
        assert!(parse(&["--memory-mb", "31"]).is_err());
        assert!(parse(&["--memory-mb", "513"]).is_err());
        assert!(parse(&["--memory-mb", "32"]).is_ok());
    }

    #[test]
    fn random_dream_is_picked_from_seed() {
        assert_eq!(resolve_level_name("random dream", 8), DREAM_LEVELS[2]);
        assert_eq!(resolve_level_name(RANDOM_DREAM, -1), DREAM_LEVELS[5]);
        assert_eq!(resolve_level_name("My Own Dream", 8), "My Own Dream");
    }
}
