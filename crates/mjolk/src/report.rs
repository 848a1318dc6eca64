use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use galaxy::{ClusterConfig, ClusterResult, KnoxSummary};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// The outcome of processing one event file
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub file: &'a Path,
    pub config: ClusterConfig,
    pub partial: bool,
    pub counts: ClusterResult,
    /// `None` when the Knox test is undefined for the counts
    pub statistics: Option<KnoxSummary>,
    /// why `statistics` is missing
    pub not_applicable: Option<String>,
}

impl<'a> Report<'a> {
    pub fn new(file: &'a Path, config: ClusterConfig, counts: ClusterResult) -> Self {
        let (statistics, not_applicable) = match KnoxSummary::from_counts(&counts) {
            Ok(summary) => (Some(summary), None),
            Err(err) => {
                tracing::warn!(file = %file.display(), "{err}");
                (None, Some(err.to_string()))
            }
        };
        Report {
            file,
            config,
            partial: counts.is_partial(),
            counts,
            statistics,
            not_applicable,
        }
    }

    pub fn write(&self, format: Format, out: &mut impl Write) -> anyhow::Result<()> {
        match format {
            Format::Text => self.write_text(out)?,
            Format::Json => {
                serde_json::to_writer_pretty(&mut *out, self)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    fn write_text(&self, out: &mut impl Write) -> std::io::Result<()> {
        let counts = &self.counts;
        writeln!(out, "{}", self.file.display())?;
        if self.partial {
            writeln!(
                out,
                "PARTIAL RESULTS: processed {} of {} events",
                counts.n_visited, counts.n_events
            )?;
        }

        writeln!(out, "\nCounts:")?;
        writeln!(out, "Ns: {}", counts.ns)?;
        writeln!(out, "N2s: {}", counts.n2s)?;
        writeln!(out, "Nt: {}", counts.nt)?;
        writeln!(out, "N2t: {}", counts.n2t)?;
        writeln!(out, "X: {}", counts.x)?;
        writeln!(out, "n: {}", counts.n_events)?;

        writeln!(out, "\nStatistics:")?;
        match (&self.statistics, &self.not_applicable) {
            (Some(summary), _) => {
                writeln!(out, "N: {}", summary.result.n_pairs)?;
                writeln!(out, "E: {}", summary.result.expected)?;
                writeln!(out, "V: {}", summary.result.variance)?;
                writeln!(out, "Std: {}", summary.std_dev)?;
                writeln!(out, "\nZ-score:")?;
                writeln!(out, "Z: {}", summary.z_score)?;
            }
            (None, Some(reason)) => writeln!(out, "not applicable: {reason}")?,
            (None, None) => writeln!(out, "not applicable")?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(n_visited: usize) -> ClusterResult {
        ClusterResult {
            ns: 5,
            n2s: 4,
            nt: 3,
            n2t: 2,
            x: 3,
            n_events: 6,
            n_visited,
        }
    }

    #[test]
    fn text_report() {
        let report = Report::new(
            Path::new("month.json"),
            ClusterConfig::default(),
            counts(6),
        );
        let mut buf = Vec::new();
        report.write(Format::Text, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("month.json\n\nCounts:\nNs: 5\n"));
        assert!(text.contains("N: 15\n"));
        assert!(text.contains("E: 1\n"));
        assert!(text.contains("Z: "));
        assert!(!text.contains("PARTIAL"));
    }

    #[test]
    fn partial_text_report() {
        let report = Report::new(Path::new("a.json"), ClusterConfig::default(), counts(2));
        let mut buf = Vec::new();
        report.write(Format::Text, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("PARTIAL RESULTS: processed 2 of 6 events"));
    }

    #[test]
    fn json_report_without_statistics() {
        // a zero variance makes the test undefined
        let zeros = ClusterResult {
            n_events: 5,
            n_visited: 5,
            ..Default::default()
        };
        let report = Report::new(Path::new("b.json"), ClusterConfig::default(), zeros);
        let mut buf = Vec::new();
        report.write(Format::Json, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["counts"]["n_events"], 5);
        assert_eq!(value["partial"], false);
        assert!(value["statistics"].is_null());
        assert!(value["not_applicable"].as_str().unwrap().contains("undefined"));
        assert_eq!(value["config"]["d_max"], 1800.0);
    }
}
