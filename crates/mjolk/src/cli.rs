use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::report::Format;

/// Knox test for space-time interaction of the events in JSON files
#[derive(Debug, Parser)]
#[command(name = "mjolk", version, about)]
pub struct Cli {
    /// Maximum spatial distance in meters for two events to be close in space
    #[arg(long, env = "MJOLK_DIST", default_value_t = 1800.0, value_name = "METERS")]
    pub dist: f64,

    /// Maximum temporal distance in days for two events to be close in time
    #[arg(long, env = "MJOLK_TIME", default_value_t = 16, value_name = "DAYS")]
    pub time: i64,

    /// Number of worker threads counting pairs
    #[arg(long, env = "MJOLK_WORKERS", default_value = "4", value_name = "N")]
    pub workers: NonZeroUsize,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Increase logging verbosity and show progress (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Event files, each a JSON array of [id, "YYYY-MM-DD HH:MM:SS", [x, y]]
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["mjolk", "a.json"]).unwrap();
        assert_eq!(cli.dist, 1800.0);
        assert_eq!(cli.time, 16);
        assert_eq!(cli.workers.get(), 4);
        assert_eq!(cli.format, Format::Text);
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.files, [PathBuf::from("a.json")]);
    }

    #[test]
    fn explicit_options() {
        let cli = Cli::try_parse_from([
            "mjolk", "--dist", "250.5", "--time", "3", "--workers", "8", "--format", "json",
            "-vv", "a.json", "b.json",
        ])
        .unwrap();
        assert_eq!(cli.dist, 250.5);
        assert_eq!(cli.time, 3);
        assert_eq!(cli.workers.get(), 8);
        assert_eq!(cli.format, Format::Json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.files.len(), 2);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(Cli::try_parse_from(["mjolk"]).is_err());
        assert!(Cli::try_parse_from(["mjolk", "--workers", "0", "a.json"]).is_err());
        assert!(Cli::try_parse_from(["mjolk", "--format", "xml", "a.json"]).is_err());
    }
}
