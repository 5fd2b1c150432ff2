//! Report formatting for search results
//!
//! Text mode prints three lines per match:
//!
//! ```text
//!
//! Name: Phishing
//! URL: https://attack.mitre.org/techniques/T1566
//! ```
//!
//! JSON mode prints the records as an array. Neither mode prints anything
//! extra for an empty result set beyond `[]` in JSON mode.

use anyhow::Result;
use owo_colors::OwoColorize;
use std::io::Write;

use crate::models::MatchRecord;

/// How the report should be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json { pretty: bool },
    Count,
}

/// Output formatter configuration
pub struct ReportFormatter {
    pub format: ReportFormat,
    /// Bold the `Name:`/`URL:` labels in text mode
    pub use_colors: bool,
}

impl ReportFormatter {
    pub fn new(format: ReportFormat, use_colors: bool) -> Self {
        Self { format, use_colors }
    }

    /// Plain text report without colors
    pub fn plain() -> Self {
        Self::new(ReportFormat::Text, false)
    }

    /// Render `records` into `out`
    pub fn write_report(&self, records: &[MatchRecord], out: &mut impl Write) -> Result<()> {
        match self.format {
            ReportFormat::Text => {
                for record in records {
                    self.write_record(record, out)?;
                }
            }
            ReportFormat::Json { pretty } => {
                let json = if pretty {
                    serde_json::to_string_pretty(records)?
                } else {
                    serde_json::to_string(records)?
                };
                writeln!(out, "{}", json)?;
            }
            ReportFormat::Count => {
                writeln!(out, "{}", records.len())?;
            }
        }

        out.flush()?;
        Ok(())
    }

    fn write_record(&self, record: &MatchRecord, out: &mut impl Write) -> Result<()> {
        writeln!(out)?;
        if self.use_colors {
            writeln!(out, "{} {}", "Name:".bold(), record.name)?;
            writeln!(out, "{} {}", "URL:".bold(), record.url.cyan())?;
        } else {
            writeln!(out, "Name: {}", record.name)?;
            writeln!(out, "URL: {}", record.url)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(formatter: &ReportFormatter, records: &[MatchRecord]) -> String {
        let mut buf = Vec::new();
        formatter.write_report(records, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn sample() -> Vec<MatchRecord> {
        vec![
            MatchRecord::new("Phishing", "https://attack.mitre.org/techniques/T1566"),
            MatchRecord::new("Spearphishing Link", "https://attack.mitre.org/techniques/T1566/002"),
        ]
    }

    #[test]
    fn test_text_layout() {
        let text = render(&ReportFormatter::plain(), &sample());
        assert_eq!(
            text,
            "\nName: Phishing\nURL: https://attack.mitre.org/techniques/T1566\n\
             \nName: Spearphishing Link\nURL: https://attack.mitre.org/techniques/T1566/002\n"
        );
    }

    #[test]
    fn test_text_empty_prints_nothing() {
        assert_eq!(render(&ReportFormatter::plain(), &[]), "");
    }

    #[test]
    fn test_colored_text_keeps_values() {
        let formatter = ReportFormatter::new(ReportFormat::Text, true);
        let text = render(&formatter, &sample()[..1]);
        assert!(text.starts_with('\n'));
        assert!(text.contains("Name:"));
        assert!(text.contains("Phishing"));
        assert!(text.contains('\u{1b}'));
    }

    #[test]
    fn test_json_output() {
        let formatter = ReportFormatter::new(ReportFormat::Json { pretty: false }, false);
        let text = render(&formatter, &sample());
        let parsed: Vec<MatchRecord> = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(parsed, sample());
        assert_eq!(text.lines().count(), 1);

        let empty = render(&formatter, &[]);
        assert_eq!(empty, "[]\n");
    }

    #[test]
    fn test_pretty_json_output() {
        let formatter = ReportFormatter::new(ReportFormat::Json { pretty: true }, false);
        let text = render(&formatter, &sample());
        assert!(text.lines().count() > 1);
        let parsed: Vec<MatchRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_count_output() {
        let formatter = ReportFormatter::new(ReportFormat::Count, false);
        assert_eq!(render(&formatter, &sample()), "2\n");
    }
}
